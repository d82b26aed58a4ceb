use phonedir_core::{
    ContactDraft, ContactStore, Directory, DirectoryError, DirectoryService, JsonFileStore,
    ServiceError, StoreError,
};
use std::fs;
use tempfile::TempDir;

fn open_service(dir: &TempDir) -> DirectoryService<JsonFileStore> {
    DirectoryService::open(JsonFileStore::new(dir.path().join("phonebook.json"))).unwrap()
}

#[test]
fn open_starts_fresh_when_no_snapshot_exists() {
    let dir = tempfile::tempdir().unwrap();
    let service = open_service(&dir);

    assert!(service.directory().is_empty());
    assert!(!service.store().path().exists());
}

#[test]
fn open_propagates_corrupt_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("phonebook.json");
    fs::write(&path, "{ broken").unwrap();

    let result = DirectoryService::open(JsonFileStore::new(&path));
    assert!(matches!(
        result,
        Err(ServiceError::Store(StoreError::Decode { .. }))
    ));
}

#[test]
fn add_save_and_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let mut service = open_service(&dir);

    service
        .add_contact(
            ContactDraft::new(" Alice Smith ")
                .phone(" 555-0101 ")
                .email("alice@example.com"),
        )
        .unwrap();
    service.add_contact(ContactDraft::new("Bob").email("")).unwrap();
    service.toggle_favorite("bob").unwrap();
    service.save().unwrap();

    let reopened = open_service(&dir);
    let alice = reopened.directory().get_by_name("alice smith").unwrap();
    assert_eq!(alice.name(), "Alice Smith");
    assert_eq!(alice.phone_number(), Some("555-0101"));
    let bob = reopened.directory().get_by_name("BOB").unwrap();
    assert_eq!(bob.email(), None);
    assert!(bob.is_favorite());
}

#[test]
fn add_surfaces_validation_and_duplicates() {
    let dir = tempfile::tempdir().unwrap();
    let mut service = open_service(&dir);

    let err = service.add_contact(ContactDraft::new("   ")).unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));

    service.add_contact(ContactDraft::new("Alice")).unwrap();
    let err = service
        .add_contact(ContactDraft::new("ALICE"))
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Directory(DirectoryError::DuplicateContact { .. })
    ));
    assert_eq!(service.directory().len(), 1);
}

#[test]
fn edit_keeps_flags_and_allows_rename() {
    let dir = tempfile::tempdir().unwrap();
    let mut service = open_service(&dir);
    service
        .add_contact(ContactDraft::new("Bob").phone("555-0202"))
        .unwrap();
    assert!(service.toggle_favorite("Bob").unwrap());
    assert!(service.toggle_blocked("Bob").unwrap());

    service
        .edit_contact("bob", ContactDraft::new("Bob").phone("555-9999"))
        .unwrap();
    let bob = service.directory().get_by_name("Bob").unwrap();
    assert_eq!(bob.phone_number(), Some("555-9999"));
    assert!(bob.is_favorite());
    assert!(bob.is_blocked());

    service
        .edit_contact("Bob", ContactDraft::new("Robert"))
        .unwrap();
    assert!(service.directory().get_by_name("Bob").is_none());
    let robert = service.directory().get_by_name("robert").unwrap();
    assert!(robert.is_favorite());
    assert_eq!(robert.phone_number(), None);
}

#[test]
fn edit_into_taken_name_fails_without_changes() {
    let dir = tempfile::tempdir().unwrap();
    let mut service = open_service(&dir);
    service.add_contact(ContactDraft::new("Alice")).unwrap();
    service.add_contact(ContactDraft::new("Bob")).unwrap();
    let before = service.directory().clone();

    let err = service
        .edit_contact("Bob", ContactDraft::new("alice"))
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Directory(DirectoryError::DuplicateContact { .. })
    ));
    let err = service
        .edit_contact("Zed", ContactDraft::new("Zed"))
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Directory(DirectoryError::ContactNotFound { .. })
    ));
    assert_eq!(service.directory(), &before);
}

#[test]
fn delete_then_undo_restores_contact_with_flags() {
    let dir = tempfile::tempdir().unwrap();
    let mut service = open_service(&dir);
    service.add_contact(ContactDraft::new("Carol")).unwrap();
    service.toggle_blocked("carol").unwrap();

    assert!(!service.delete_contact("Zed"));
    assert!(service.delete_contact("CAROL"));
    assert!(service.directory().is_empty());
    assert_eq!(service.last_deleted().unwrap().name(), "Carol");

    service.undo_delete().unwrap();
    assert!(service.directory().get_by_name("carol").unwrap().is_blocked());
    assert!(matches!(
        service.undo_delete(),
        Err(ServiceError::NothingToUndo)
    ));
}

#[test]
fn undo_after_name_reuse_fails_and_keeps_target() {
    let dir = tempfile::tempdir().unwrap();
    let mut service = open_service(&dir);
    service.add_contact(ContactDraft::new("Carol")).unwrap();
    service.delete_contact("Carol");
    service.add_contact(ContactDraft::new("carol")).unwrap();

    let err = service.undo_delete().unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Directory(DirectoryError::DuplicateContact { .. })
    ));
    assert_eq!(service.last_deleted().unwrap().name(), "Carol");
}

#[test]
fn toggles_report_new_state_and_missing_names() {
    let dir = tempfile::tempdir().unwrap();
    let mut service = open_service(&dir);
    service.add_contact(ContactDraft::new("Dave")).unwrap();

    assert!(service.toggle_favorite("dave").unwrap());
    assert!(!service.toggle_favorite("dave").unwrap());
    let err = service.toggle_blocked("Zed").unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Directory(DirectoryError::ContactNotFound { name }) if name == "Zed"
    ));
}

#[test]
fn with_directory_saves_through_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("phonebook.json"));
    let mut directory = Directory::new();
    directory
        .add(phonedir_core::Contact::new("Eve", None, None).unwrap())
        .unwrap();

    let service = DirectoryService::with_directory(store.clone(), directory.clone());
    service.save().unwrap();
    assert_eq!(store.load().unwrap(), directory);
}

#[test]
fn add_saves_emails_without_format_checks() {
    let dir = tempfile::tempdir().unwrap();
    let mut service = open_service(&dir);

    let draft = ContactDraft::new("Alice").email("alice.example.com");
    assert!(draft.email_looks_unusual());
    service.add_contact(draft).unwrap();
    service
        .add_contact(ContactDraft::new("Bob").email("bob smith@example.com"))
        .unwrap();
    service.save().unwrap();

    let reopened = open_service(&dir);
    assert_eq!(
        reopened.directory().get_by_name("alice").unwrap().email(),
        Some("alice.example.com")
    );
    assert_eq!(
        reopened.directory().get_by_name("bob").unwrap().email(),
        Some("bob smith@example.com")
    );
}

use phonedir_core::{Contact, ContactValidationError};

fn contact(name: &str, phone: Option<&str>, email: Option<&str>) -> Contact {
    Contact::new(name, phone.map(str::to_string), email.map(str::to_string)).unwrap()
}

#[test]
fn new_sets_defaults_and_keeps_fields_as_given() {
    let contact = contact(" Alice Smith ", Some("555-0101"), None);

    assert_eq!(contact.name(), " Alice Smith ");
    assert_eq!(contact.phone_number(), Some("555-0101"));
    assert_eq!(contact.email(), None);
    assert!(!contact.is_favorite());
    assert!(!contact.is_blocked());
    assert_eq!(contact.normalized_key(), "alice smith");
}

#[test]
fn new_rejects_blank_names() {
    for name in ["", "   ", "\t\n"] {
        let err = Contact::new(name, None, None).unwrap_err();
        assert_eq!(err, ContactValidationError::BlankName);
    }
}

#[test]
fn new_does_not_validate_phone_or_email_format() {
    let contact = contact("Bob", Some("not a phone"), Some("no-at-sign"));
    assert_eq!(contact.phone_number(), Some("not a phone"));
    assert_eq!(contact.email(), Some("no-at-sign"));
}

#[test]
fn matches_is_case_insensitive_over_all_fields() {
    let contact = contact("Carol King", Some("555-0303"), Some("Carol@X.com"));

    assert!(contact.matches("carol k"));
    assert!(contact.matches("KING"));
    assert!(contact.matches("0303"));
    assert!(contact.matches("carol@x.COM"));
    assert!(!contact.matches("dave"));
}

#[test]
fn matches_skips_absent_fields() {
    let contact = contact("Dave", None, None);
    assert!(!contact.matches("555"));
    assert!(!contact.matches("@"));
}

#[test]
fn empty_query_matches_everything() {
    assert!(contact("Eve", None, None).matches(""));
}

#[test]
fn flag_setters_do_not_touch_identity() {
    let mut contact = contact("Frank", None, None);

    contact.set_favorite(true);
    contact.set_blocked(true);
    assert!(contact.is_favorite());
    assert!(contact.is_blocked());
    assert_eq!(contact.name(), "Frank");

    contact.set_favorite(false);
    assert!(!contact.is_favorite());
    assert!(contact.is_blocked());
}

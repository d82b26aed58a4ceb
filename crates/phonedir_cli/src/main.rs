//! Command-line host for the contact directory.
//!
//! # Responsibility
//! - Parse flags and map subcommands onto `DirectoryService` calls.
//! - Save the snapshot after every mutating command.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use phonedir_core::{
    init_logging, Contact, ContactDraft, ContactFilter, DirectoryService, JsonFileStore, LogLevel,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "phonedir", version = phonedir_core::core_version())]
#[command(about = "Personal contact directory")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Snapshot file
    #[arg(short, long, default_value = "data/phonebook.json")]
    data: PathBuf,
    /// Absolute directory for log files; logging is off when omitted
    #[arg(long)]
    log_dir: Option<PathBuf>,
    /// trace|debug|info|warn|error; needs --log-dir
    #[arg(long, requires = "log_dir")]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a contact
    Add {
        name: String,
        #[arg(short, long)]
        phone: Option<String>,
        #[arg(short, long)]
        email: Option<String>,
    },
    /// Show one contact
    Get { name: String },
    /// Remove a contact
    Remove { name: String },
    /// Replace a contact, keeping its flags
    Edit {
        old_name: String,
        name: String,
        #[arg(short, long)]
        phone: Option<String>,
        #[arg(short, long)]
        email: Option<String>,
    },
    /// List contacts, optionally narrowed by text and flags
    List {
        #[arg(short, long, value_enum, default_value_t = FilterArg::All)]
        filter: FilterArg,
        #[arg(short, long)]
        query: Option<String>,
    },
    /// Substring search over name, phone and email
    Search { query: String },
    /// Toggle the favorite flag
    Favorite { name: String },
    /// Toggle the blocked flag
    Block { name: String },
    /// Show flag counts
    Stats,
}

#[derive(Clone, Copy, ValueEnum)]
enum FilterArg {
    All,
    Favorites,
    Blocked,
    HideBlocked,
}

impl From<FilterArg> for ContactFilter {
    fn from(value: FilterArg) -> Self {
        match value {
            FilterArg::All => ContactFilter::All,
            FilterArg::Favorites => ContactFilter::Favorites,
            FilterArg::Blocked => ContactFilter::Blocked,
            FilterArg::HideBlocked => ContactFilter::HideBlocked,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = &cli.log_dir {
        let level = match cli.log_level.as_deref() {
            Some(level) => level
                .parse::<LogLevel>()
                .map_err(|err| anyhow!("invalid --log-level: {err}"))?,
            None => LogLevel::default_for_build(),
        };
        init_logging(level, log_dir)
            .map_err(|err| anyhow!("failed to initialize logging: {err}"))?;
    }

    let store = JsonFileStore::new(cli.data);
    let mut service = DirectoryService::open(store).context("failed to load directory")?;

    match cli.command {
        Commands::Add { name, phone, email } => {
            service.add_contact(draft(name, phone, email))?;
            service.save()?;
            println!("added");
        }
        Commands::Get { name } => {
            let contact = service.directory().get_by_name_or_err(&name)?;
            print_contact(contact);
        }
        Commands::Remove { name } => {
            if service.delete_contact(&name) {
                service.save()?;
                println!("removed");
            } else {
                println!("not found: {name}");
            }
        }
        Commands::Edit {
            old_name,
            name,
            phone,
            email,
        } => {
            service.edit_contact(&old_name, draft(name, phone, email))?;
            service.save()?;
            println!("updated");
        }
        Commands::List { filter, query } => {
            for contact in service
                .directory()
                .list_filtered(query.as_deref(), filter.into())
            {
                print_contact(contact);
            }
        }
        Commands::Search { query } => {
            for contact in service.directory().search_or_err(&query)? {
                print_contact(contact);
            }
        }
        Commands::Favorite { name } => {
            let favorite = service.toggle_favorite(&name)?;
            service.save()?;
            println!("favorite={favorite}");
        }
        Commands::Block { name } => {
            let blocked = service.toggle_blocked(&name)?;
            service.save()?;
            println!("blocked={blocked}");
        }
        Commands::Stats => {
            let stats = service.directory().stats();
            println!("total: {}", stats.total);
            println!(
                "favorites: {} ({}%)",
                stats.favorites,
                stats.favorite_percent()
            );
            println!("blocked: {} ({}%)", stats.blocked, stats.blocked_percent());
        }
    }

    Ok(())
}

fn draft(name: String, phone: Option<String>, email: Option<String>) -> ContactDraft {
    let draft = ContactDraft { name, phone, email };
    if draft.email_looks_unusual() {
        eprintln!("warning: email has no `@`; saving it as given");
    }
    draft
}

fn print_contact(contact: &Contact) {
    println!("{contact}");
}

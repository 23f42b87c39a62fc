use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::db::Database;

pub mod add;
pub mod delete;
pub mod display;
pub mod import;
pub mod list;
pub mod prompt;
pub mod show;
pub mod update;

pub use add::run_add;
pub use delete::run_delete;
pub use display::print_contact_detail;
pub use import::{read_import_file, run_import};
pub use list::{run_list, run_search};
pub use show::run_show;
pub use update::run_update;

#[derive(Parser)]
#[command(name = "phonebook")]
#[command(about = "Local phone book with CSV import")]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Database file (overrides the config file)
    #[arg(long, global = true, value_name = "FILE")]
    pub db: Option<PathBuf>,
    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the database if needed and print its location
    Init,
    /// Add a new contact
    Add(AddArgs),
    /// List all contacts
    List(ListArgs),
    /// Find contacts whose first or last name starts with a prefix
    Search(SearchArgs),
    /// Show phones and emails for a contact
    Show(ContactArgs),
    /// Change a contact's name, phone or email
    Edit(EditArgs),
    /// Delete a contact with all of its phones and emails
    Delete(DeleteArgs),
    /// Import contacts from a CSV file (header, then first,last,phone,email)
    Import(ImportArgs),
}

#[derive(Args)]
pub struct AddArgs {
    #[arg(short, long)]
    pub first: Option<String>,
    #[arg(short, long)]
    pub last: Option<String>,
    /// Phone number (repeatable)
    #[arg(short, long)]
    pub phone: Vec<String>,
    /// Email address (repeatable)
    #[arg(short, long)]
    pub email: Vec<String>,
}

#[derive(Args)]
pub struct ListArgs {
    /// Prefix each line with the contact id
    #[arg(short, long)]
    pub ids: bool,
}

#[derive(Args)]
pub struct SearchArgs {
    /// Leading characters of a first or last name
    #[arg(default_value = "")]
    pub prefix: String,
    #[arg(short, long)]
    pub ids: bool,
}

/// Which contact a command acts on: a name pair or an id.
#[derive(Args)]
pub struct ContactArgs {
    #[arg(required_unless_present = "id")]
    pub first: Option<String>,
    #[arg(required_unless_present = "id")]
    pub last: Option<String>,
    /// Contact id, as printed by `list --ids`
    #[arg(long, conflicts_with_all = ["first", "last"])]
    pub id: Option<i64>,
}

#[derive(Args)]
pub struct EditArgs {
    #[command(flatten)]
    pub target: ContactArgs,
    /// New first name
    #[arg(long = "first", value_name = "FIRST")]
    pub new_first: Option<String>,
    /// New last name
    #[arg(long = "last", value_name = "LAST")]
    pub new_last: Option<String>,
    /// Replaces every phone of the contact
    #[arg(short, long)]
    pub phone: Option<String>,
    /// Replaces every email of the contact
    #[arg(short, long)]
    pub email: Option<String>,
}

#[derive(Args)]
pub struct DeleteArgs {
    #[command(flatten)]
    pub target: ContactArgs,
    /// Skip the confirmation prompt
    #[arg(long)]
    pub force: bool,
}

#[derive(Args)]
pub struct ImportArgs {
    pub file: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactRef {
    Id(i64),
    Name { first: String, last: String },
}

impl ContactArgs {
    pub fn target(&self) -> ContactRef {
        match self.id {
            Some(id) => ContactRef::Id(id),
            None => ContactRef::Name {
                first: self.first.clone().unwrap_or_default(),
                last: self.last.clone().unwrap_or_default(),
            },
        }
    }
}

impl ContactRef {
    pub fn name(first: &str, last: &str) -> Self {
        Self::Name {
            first: first.to_string(),
            last: last.to_string(),
        }
    }
}

/// Execute one parsed command against an open store
pub fn dispatch(db: &Database, command: Commands) -> anyhow::Result<()> {
    match command {
        // Opening the store already created the tables
        Commands::Init => {}
        Commands::Add(args) => {
            run_add(db, args.first, args.last, args.phone, args.email)?;
        }
        Commands::List(args) => run_list(db, args.ids)?,
        Commands::Search(args) => run_search(db, &args.prefix, args.ids)?,
        Commands::Show(args) => {
            run_show(db, &args.target())?;
        }
        Commands::Edit(args) => {
            run_update(
                db,
                &args.target.target(),
                args.new_first,
                args.new_last,
                args.phone,
                args.email,
            )?;
        }
        Commands::Delete(args) => {
            run_delete(db, &args.target.target(), args.force)?;
        }
        Commands::Import(args) => {
            run_import(db, &args.file)?;
        }
    }
    Ok(())
}

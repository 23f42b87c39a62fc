use clap::Parser;
use tracing::debug;

use phonebook::cli::{dispatch, Cli, Commands};
use phonebook::config::AppConfig;
use phonebook::{logging, Database, StoreError};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;
    logging::init_logging(&config.logging.level, cli.verbose);

    let db_path = match cli.db {
        Some(path) => path,
        None => config.database_path()?,
    };
    let db = Database::open_at(&db_path)?;

    if matches!(cli.command, Commands::Init) {
        println!("Phone book ready at {}", db_path.display());
    }

    let result = dispatch(&db, cli.command);
    db.close()?;
    debug!("connection closed");

    match result {
        // A contact that cannot be found is reported, not treated as a failure
        Err(err) if err.downcast_ref::<StoreError>().is_some_and(StoreError::is_lookup_miss) => {
            println!("{}", err);
            Ok(())
        }
        other => other,
    }
}

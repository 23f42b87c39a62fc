pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;

pub use db::Database;
pub use error::{StoreError, StoreResult};

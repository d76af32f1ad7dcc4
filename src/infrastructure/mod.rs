//! Infrastructure layer - external concerns

pub mod crypto;
pub mod database;
pub mod mail;
pub mod storage;

pub use database::{init_and_migrate, init_database, DatabaseConfig};
pub use mail::{InMemoryMailer, LogMailer};
pub use storage::{InMemoryFileStore, LocalFileStore};

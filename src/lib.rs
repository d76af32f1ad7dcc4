//! # EcoConnect booking core
//!
//! Provider directory, availability calendar and booking workflow for
//! eco-service providers (solar, insulation, compost, rainwater).
//!
//! ## Architecture
//!
//! - **domain**: records, repository traits and the pure validation rules
//! - **application**: use-case services, notification dispatch, outbound ports
//! - **infrastructure**: SeaORM/SQLite persistence, mail and file adapters
//! - **shared**: error types, pagination, clock
//! - **app**: wiring everything together from [`AppConfig`]

pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod logging;
pub mod shared;

pub use app::{AppContext, AppOptions};
pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::database::repositories::SeaOrmRepositoryProvider;
pub use infrastructure::{init_and_migrate, init_database, DatabaseConfig};

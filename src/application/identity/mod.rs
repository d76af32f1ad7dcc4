//! Identity module: account registration and credential checks
//!
//! Stands in for the identity collaborator; everything downstream only
//! sees the resulting `Principal`.

pub mod service;

pub use service::AccountService;

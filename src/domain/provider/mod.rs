//! Provider aggregate
//!
//! Contains the Provider entity, its category, certification uploads,
//! and the repository interface.

pub mod certification;
pub mod model;
pub mod repository;

pub use certification::{CertificationUpload, ALLOWED_CERTIFICATION_EXTENSIONS, MAX_CERTIFICATION_BYTES};
pub use model::{Category, Provider, ProviderFilter, ProviderInput, ProviderProfile};
pub use repository::ProviderRepository;

pub mod service;

pub use service::ProviderService;

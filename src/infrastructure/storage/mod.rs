//! File storage adapters for certification uploads

mod local;
mod memory;

pub use local::LocalFileStore;
pub use memory::InMemoryFileStore;

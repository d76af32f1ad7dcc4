//! User aggregate
//!
//! Accounts, the authenticated principal, and the repository interface.

pub mod model;
pub mod repository;

mod dto_create;

pub use dto_create::CreateUserDto;
pub use model::{Principal, User};
pub use repository::UserRepository;

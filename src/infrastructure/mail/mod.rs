//! Mailer adapters

mod log_mailer;
mod memory;

pub use log_mailer::LogMailer;
pub use memory::InMemoryMailer;

//! Page and account operations, expressed against the ports.

mod accounts;
mod posts;

pub use accounts::{AccountService, Session};
pub use posts::PostService;

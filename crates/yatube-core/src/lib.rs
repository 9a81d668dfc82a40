//! # Yatube Core
//!
//! The domain layer of Yatube.
//! This crate contains the entities, the paginator, the post form, the
//! per-route view results, and the page and account services. It has zero
//! infrastructure dependencies: storage and credentials are reached through
//! the ports.

pub mod domain;
pub mod error;
pub mod forms;
pub mod pagination;
pub mod ports;
pub mod services;
pub mod views;

pub use error::DomainError;
pub use pagination::{Page, Paginator};
pub use services::{AccountService, PostService, Session};
pub use views::{AuthContext, Outcome, View};

//! # Yatube Shared
//!
//! Wire types shared between the server and its clients (and the tests that
//! play the client).

pub mod dto;
pub mod response;

pub use dto::{PageContext, RenderedPage};
pub use response::ErrorResponse;

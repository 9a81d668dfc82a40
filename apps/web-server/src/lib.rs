//! # Yatube Web Server
//!
//! Actix-web application serving the post pages, the accounts endpoints and
//! the health check. `main.rs` wires it to the environment; the integration
//! tests build it around in-memory state.

pub mod config;
pub mod fixtures;
pub mod handlers;
pub mod middleware;
pub mod render;
pub mod state;
pub mod telemetry;

pub use handlers::configure_app;
pub use state::AppState;

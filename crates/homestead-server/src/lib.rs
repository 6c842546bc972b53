//! HTTP front end for the homestead record store.
//!
//! The binary in `main.rs` wires configuration, logging and the listener;
//! everything a test needs to drive the routes lives in this library.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use routes::router;
pub use state::AppState;

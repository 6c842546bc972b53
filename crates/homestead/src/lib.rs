//! # Homestead Architecture
//!
//! Homestead keeps a flat set of customer records in one YAML document and
//! exposes fetch, partial update, and insert over it. It is a library first;
//! the HTTP server in `homestead-server` is one client of it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Transport (homestead-server)                               │
//! │  - Routing, JSON bodies, status codes                       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Field validation, one store call, structured result      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - RecordStore: identity, uniqueness, merge                 │
//! │  - StorageBackend: whole-document load/save (file, memory)  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! From `api.rs` inward nothing writes to stdout or assumes a terminal or a
//! web server. Log events go through `tracing`; installing a subscriber is
//! the client's job.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: One module per operation
//! - [`store`]: Record store and storage backends
//! - [`model`]: `Customer`, `Address`, `CustomerPatch`, `Collection`
//! - [`validation`]: Email and postal code checks
//! - [`config`]: Configuration loading
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod store;
#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
pub mod validation;

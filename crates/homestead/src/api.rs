//! # API Facade
//!
//! A **thin facade** over the command layer and the single entry point for
//! clients (the HTTP server, tests, anything else embedding the store).
//!
//! The facade dispatches to `commands::*` and returns their structured
//! results. It holds no business logic and performs no I/O of its own.
//!
//! `HomesteadApi<S: CustomerStore>` is generic over the store:
//! - Production: `HomesteadApi<FileStore>`
//! - Testing: `HomesteadApi<InMemoryStore>`

use crate::commands;
use crate::error::Result;
use crate::model::{Customer, CustomerPatch};
use crate::store::CustomerStore;

pub use crate::commands::{CmdMessage, CmdResult, MessageLevel};

pub struct HomesteadApi<S: CustomerStore> {
    store: S,
}

impl<S: CustomerStore> HomesteadApi<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn get_customer(&self, id: &str) -> Result<CmdResult> {
        commands::get::run(&self.store, id)
    }

    pub fn update_customer(&self, id: &str, patch: &CustomerPatch) -> Result<CmdResult> {
        commands::update::run(&self.store, id, patch)
    }

    pub fn create_customer(&self, customer: Customer) -> Result<CmdResult> {
        commands::create::run(&self.store, customer)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

use super::backend::StorageBackend;
use super::document;
use crate::error::{HomesteadError, Result};
use crate::model::Collection;
use std::io;
use std::sync::{Mutex, MutexGuard};

#[derive(Default)]
struct State {
    /// Serialized document; `None` means "never written".
    text: Option<String>,
    simulate_write_error: bool,
    saves: usize,
}

/// In-memory storage backend for testing.
///
/// Keeps the rendered YAML rather than the parsed collection so every load
/// goes through the same codec as the file backend.
#[derive(Default)]
pub struct MemBackend {
    state: Mutex<State>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing document text, as if read from a file.
    pub fn with_document(text: impl Into<String>) -> Self {
        let backend = Self::new();
        backend.lock().text = Some(text.into());
        backend
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.lock().simulate_write_error = simulate;
    }

    /// Current document text, if anything was ever stored.
    pub fn document(&self) -> Option<String> {
        self.lock().text.clone()
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.lock().saves
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // A panicking test thread must not wedge the others.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl StorageBackend for MemBackend {
    fn load(&self) -> Result<Collection> {
        match &self.lock().text {
            Some(text) => document::parse(text),
            None => Ok(Collection::default()),
        }
    }

    fn save(&self, collection: &Collection) -> Result<()> {
        let mut state = self.lock();
        if state.simulate_write_error {
            return Err(HomesteadError::StorageWrite(io::Error::other(
                "Simulated write error",
            )));
        }
        state.text = Some(document::render(collection)?);
        state.saves += 1;
        Ok(())
    }

    fn describe(&self) -> String {
        "memory://customers.yaml".to_string()
    }
}

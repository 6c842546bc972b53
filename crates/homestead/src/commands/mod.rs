//! # Command Layer
//!
//! Each command lives in its own submodule and is a plain function over a
//! [`CustomerStore`](crate::store::CustomerStore).
//!
//! Commands:
//! - Validate the fields they receive before touching the store
//! - Call exactly one store operation
//! - Return a [`CmdResult`] with the affected customer and a message
//!
//! They never format output for a particular client. The HTTP server decides
//! how a `CmdResult` or an error turns into a response.
//!
//! ## Command Modules
//!
//! - [`get`]: Fetch one customer by id
//! - [`update`]: Apply a partial update
//! - [`create`]: Insert a new customer

use crate::model::{Customer, Record};
use serde::Serialize;

pub mod create;
pub mod get;
pub mod update;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn new(level: MessageLevel, content: impl Into<String>) -> Self {
        Self {
            level,
            content: content.into(),
        }
    }

    pub fn info(content: impl Into<String>) -> Self {
        Self::new(MessageLevel::Info, content)
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self::new(MessageLevel::Success, content)
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self::new(MessageLevel::Warning, content)
    }
}

#[derive(Debug, Default, Clone, Serialize)]
pub struct CmdResult {
    pub customer: Option<Customer>,
    /// Set instead of `customer` when the affected record does not bind.
    pub partial: Option<Record>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn with_customer(customer: Customer) -> Self {
        Self {
            customer: Some(customer),
            ..Default::default()
        }
    }

    pub fn with_partial(record: Record) -> Self {
        Self {
            partial: Some(record),
            ..Default::default()
        }
    }

    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    /// Content of the first message, if any.
    pub fn summary(&self) -> Option<&str> {
        self.messages.first().map(|m| m.content.as_str())
    }
}

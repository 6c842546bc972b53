//! YAML codec for the customer document.
//!
//! Both backends go through these two functions, so the in-memory backend
//! fails on exactly the inputs the filesystem backend fails on.

use crate::error::{HomesteadError, Result};
use crate::model::Collection;
use serde_yaml::Value;

/// Parses the full document text.
///
/// Blank text and a bare null document both read as an empty collection.
/// Anything else must be a mapping with an optional `customers` sequence;
/// its other keys are kept on [`Collection::other`].
pub fn parse(text: &str) -> Result<Collection> {
    if text.trim().is_empty() {
        return Ok(Collection::default());
    }
    let value: Value = serde_yaml::from_str(text)?;
    match value {
        Value::Null => Ok(Collection::default()),
        Value::Mapping(_) => Ok(serde_yaml::from_value(value)?),
        other => Err(HomesteadError::StorageFormat(format!(
            "expected a mapping with a `customers` key at the top level, found {}",
            kind(&other)
        ))),
    }
}

pub fn render(collection: &Collection) -> Result<String> {
    Ok(serde_yaml::to_string(collection)?)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

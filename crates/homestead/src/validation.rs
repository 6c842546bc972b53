//! Field-shape validation for customer input.
//!
//! Runs before anything reaches the store:
//! - Postal codes are exactly five ASCII digits
//! - Email addresses are `local@domain.tld` with conventional characters
//! - Customer ids are not blank
//!
//! Email addresses come back normalized: surrounding whitespace is dropped and
//! the domain is lowercased. The store compares the normalized text exactly.

use crate::model::{Customer, CustomerPatch};
use once_cell::sync::Lazy;
use regex::Regex;

static POSTAL_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\A[0-9]{5}\z").unwrap());

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"\A[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*",
        r"@(?:[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?\.)+[A-Za-z]{2,}\z",
    ))
    .unwrap()
});

/// Checks a postal code.
///
/// # Examples
/// ```
/// use homestead::validation::validate_postal_code;
///
/// assert!(validate_postal_code("12345").is_ok());
/// assert!(validate_postal_code("1234").is_err());
/// assert!(validate_postal_code("12345\n").is_err());
/// assert!(validate_postal_code("1234a").is_err());
/// ```
pub fn validate_postal_code(code: &str) -> Result<(), ValidationError> {
    if POSTAL_CODE.is_match(code) {
        Ok(())
    } else {
        Err(ValidationError::PostalCode(code.to_string()))
    }
}

/// Checks the syntax of an email address and returns its normalized form.
/// Deliverability is not checked.
///
/// # Examples
/// ```
/// use homestead::validation::validate_email;
///
/// assert_eq!(validate_email(" Ann@Example.COM ").unwrap(), "Ann@example.com");
/// assert!(validate_email("ann@").is_err());
/// ```
pub fn validate_email(email: &str) -> Result<String, ValidationError> {
    let trimmed = email.trim();
    if !EMAIL.is_match(trimmed) {
        return Err(ValidationError::Email(trimmed.to_string()));
    }
    // The pattern guarantees exactly one '@'.
    match trimmed.split_once('@') {
        Some((local, domain)) => Ok(format!("{}@{}", local, domain.to_ascii_lowercase())),
        None => Err(ValidationError::Email(trimmed.to_string())),
    }
}

/// Checks a new customer and returns it with its email normalized.
pub fn validate_customer(mut customer: Customer) -> Result<Customer, ValidationError> {
    if customer.id.trim().is_empty() {
        return Err(ValidationError::BlankId);
    }
    customer.email = validate_email(&customer.email)?;
    validate_postal_code(&customer.property_address.postal_code)?;
    Ok(customer)
}

/// Only the fields a patch actually carries are checked.
pub fn validate_patch(patch: &CustomerPatch) -> Result<CustomerPatch, ValidationError> {
    let mut checked = patch.clone();
    if let Some(email) = &patch.email {
        checked.email = Some(validate_email(email)?);
    }
    if let Some(address) = &patch.property_address {
        validate_postal_code(&address.postal_code)?;
    }
    Ok(checked)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Postal code is not five digits
    PostalCode(String),
    /// Email address is malformed
    Email(String),
    /// Customer id is empty or whitespace
    BlankId,
}

impl ValidationError {
    /// Name of the offending field as it appears in request bodies.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::PostalCode(_) => "property_address.postal_code",
            ValidationError::Email(_) => "email",
            ValidationError::BlankId => "id",
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::PostalCode(code) => {
                write!(f, "Postal Code must be 5 numeric digits, got '{}'", code)
            }
            ValidationError::Email(email) => {
                write!(f, "'{}' is not a valid email address", email)
            }
            ValidationError::BlankId => write!(f, "customer id cannot be empty"),
        }
    }
}

impl std::error::Error for ValidationError {}

//! # Domain Model
//!
//! Two layers of types live here:
//!
//! - **Typed records**: [`Customer`] and its embedded [`Address`]. These are what
//!   callers hand to the store and what they get back.
//! - **Raw records**: [`Record`], a plain YAML mapping. The persisted
//!   [`Collection`] holds raw records so that entries written by older versions
//!   (extra keys, integer ids) survive a load/save cycle untouched. Top-level
//!   keys other than `customers` are carried along the same way.
//!
//! An update on a record too incomplete to bind as a [`Customer`] still
//! succeeds and hands back a [`StoredCustomer::Partial`].
//!
//! ## Patches
//!
//! [`CustomerPatch`] lists the fields an update may change. Every field is an
//! `Option`: `Some` means "overwrite", `None` means "leave alone". The `id` and
//! `electricity_usage_kwh` fields are absent from the type, so no patch can
//! carry them. An address in a patch replaces the stored address whole.
//!
//! ## On-disk Shape
//!
//! ```text
//! customers:
//!   - id: "1"
//!     first_name: John
//!     ...
//!     property_address:
//!       street: 1 Main St
//!       ...
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::{Mapping, Value};

/// A raw customer entry as it sits in the document.
pub type Record = Mapping;

pub const ID_KEY: &str = "id";
pub const EMAIL_KEY: &str = "email";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub postal_code: String,
    pub state_code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub electricity_usage_kwh: Option<i64>,
    pub old_roof: bool,
    pub property_address: Address,
}

impl Customer {
    /// Converts to the raw form stored in the document.
    pub fn to_record(&self) -> crate::error::Result<Record> {
        match serde_yaml::to_value(self)? {
            Value::Mapping(map) => Ok(map),
            other => Err(crate::error::HomesteadError::StorageFormat(format!(
                "customer serialized to {:?} instead of a mapping",
                other
            ))),
        }
    }

    /// Binds a raw record to the typed shape.
    ///
    /// Integer ids are accepted and turned into their decimal text.
    pub fn from_record(record: &Record) -> crate::error::Result<Self> {
        let mut record = record.clone();
        if let Some(id) = record_id(&record) {
            record.insert(Value::from(ID_KEY), Value::from(id));
        }
        serde_yaml::from_value(Value::Mapping(record)).map_err(|e| {
            crate::error::HomesteadError::StorageFormat(format!(
                "record does not match the customer shape: {}",
                e
            ))
        })
    }
}

/// A customer as it reads after an update.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StoredCustomer {
    Complete(Customer),
    /// Still missing required fields after the merge.
    Partial(Record),
}

impl StoredCustomer {
    pub fn from_record(record: Record) -> Self {
        match Customer::from_record(&record) {
            Ok(customer) => StoredCustomer::Complete(customer),
            Err(_) => StoredCustomer::Partial(record),
        }
    }

    pub fn complete(self) -> Option<Customer> {
        match self {
            StoredCustomer::Complete(customer) => Some(customer),
            StoredCustomer::Partial(_) => None,
        }
    }
}

/// The editable subset of a customer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_roof: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_address: Option<Address>,
}

impl CustomerPatch {
    pub fn is_empty(&self) -> bool {
        self.changes().is_empty()
    }

    /// The fields this patch sets, keyed by their on-disk names.
    pub fn changes(&self) -> Vec<(&'static str, Value)> {
        let mut out = Vec::new();
        if let Some(v) = &self.first_name {
            out.push(("first_name", Value::from(v.as_str())));
        }
        if let Some(v) = &self.last_name {
            out.push(("last_name", Value::from(v.as_str())));
        }
        if let Some(v) = &self.email {
            out.push(("email", Value::from(v.as_str())));
        }
        if let Some(v) = self.old_roof {
            out.push(("old_roof", Value::from(v)));
        }
        if let Some(address) = &self.property_address {
            let mut map = Mapping::new();
            map.insert("street".into(), address.street.as_str().into());
            map.insert("city".into(), address.city.as_str().into());
            map.insert("postal_code".into(), address.postal_code.as_str().into());
            map.insert("state_code".into(), address.state_code.as_str().into());
            out.push(("property_address", Value::Mapping(map)));
        }
        out
    }
}

/// The whole persisted customer set. This is the unit of load and save.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub customers: Vec<Record>,
    /// Other top-level keys, written back as found.
    #[serde(flatten)]
    pub other: Mapping,
}

impl Collection {
    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    /// First record whose id matches, in document order.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.customers
            .iter()
            .position(|record| record_id(record).as_deref() == Some(id))
    }

    pub fn contains_email(&self, email: &str) -> bool {
        self.customers
            .iter()
            .any(|record| record_email(record) == Some(email))
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.position(id).is_some()
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Record>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Record>>::deserialize(deserializer)?.unwrap_or_default())
}

/// The id of a raw record as text. Integer ids compare by their decimal form.
pub fn record_id(record: &Record) -> Option<String> {
    match record.get(ID_KEY)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub fn record_email(record: &Record) -> Option<&str> {
    record.get(EMAIL_KEY).and_then(Value::as_str)
}

use crate::validation::ValidationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HomesteadError {
    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    #[error("Email address already taken: {0}")]
    DuplicateEmail(String),

    #[error("Customer ID is not unique: {0}")]
    DuplicateId(String),

    #[error("Storage format error: {0}")]
    StorageFormat(String),

    #[error("Storage read error: {0}")]
    StorageRead(#[source] std::io::Error),

    #[error("Storage write error: {0}")]
    StorageWrite(#[source] std::io::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl HomesteadError {
    /// True for failures caused by the backing document rather than the request.
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            HomesteadError::StorageFormat(_)
                | HomesteadError::StorageRead(_)
                | HomesteadError::StorageWrite(_)
        )
    }
}

impl From<serde_yaml::Error> for HomesteadError {
    fn from(err: serde_yaml::Error) -> Self {
        HomesteadError::StorageFormat(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, HomesteadError>;

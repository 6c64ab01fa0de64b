use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub title: String,
    pub description: String,
}

impl FieldError {
    pub fn new(field: &str, title: impl Into<String>, description: impl Into<String>) -> Self {
        FieldError {
            field: field.to_string(),
            title: title.into(),
            description: description.into(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum LedgerError {
    /// Client with given ID not found (or only present in the trash)
    #[error("Client {0} not found")]
    ClientNotFound(String),

    /// Vehicle type with given ID not found
    #[error("Vehicle type {0} not found")]
    VehicleTypeNotFound(String),

    /// Transaction with given ID not found
    #[error("Transaction {0} not found")]
    TransactionNotFound(String),

    /// Vehicle type is still the default of an active client
    #[error("Vehicle type {0} is still assigned to a client")]
    VehicleTypeInUse(String),

    /// Entity is already in the trash
    #[error("{0} is already in the trash")]
    AlreadyDeleted(String),

    /// Restore or purge requested for an entity that is not in the trash
    #[error("{0} is not in the trash")]
    NotInTrash(String),

    /// Transaction cannot be restored while its client is in the trash
    #[error("Client {0} is in the trash")]
    ClientInTrash(String),

    /// Custom date range with start after end
    #[error("Invalid date range: {0}")]
    InvalidDateRange(String),

    /// Generic input validation error with detailed field information
    #[error("Invalid input for field `{0}`: {1:?}")]
    InvalidInput(String, FieldError),

    #[error("Internal server error: {0}")]
    InternalServerError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Logging error: {0}")]
    LoggingError(String),

    #[error("Cache error: {0}")]
    CacheError(String),
}

impl LedgerError {
    pub fn invalid_input(field: &str, title: impl Into<String>, description: impl Into<String>) -> Self {
        LedgerError::InvalidInput(field.to_string(), FieldError::new(field, title, description))
    }
}

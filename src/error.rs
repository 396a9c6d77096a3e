use thiserror::Error;

/// Internal failure taxonomy. `Store` flattens it to `bool`/`Option` at the
/// boundary after logging.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Not Found")]
    NotFound,

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Integrity violation: {0}")]
    Integrity(String),

    #[error("Credential error: {0}")]
    Credential(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("ORM error: {0}")]
    Orm(#[from] sea_orm::DbErr),
}

impl StoreError {
    pub fn kind(&self) -> &'static str {
        match self {
            StoreError::NotFound => "not_found",
            StoreError::Validation(_) => "validation",
            StoreError::Integrity(_) => "integrity",
            StoreError::Credential(_) => "credential",
            StoreError::Database(_) | StoreError::Orm(_) => "storage",
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        StoreError::Validation(message.into())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

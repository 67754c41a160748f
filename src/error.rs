use thiserror::Error;

/// Errors that can occur when talking to the document store
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The store could not be reached (server selection, I/O, authentication)
    #[error("Connection error: {0}")]
    Connection(String),

    /// The store rejected or failed the operation
    #[error("Store operation failed: {0}")]
    Operation(String),

    /// A document could not be converted between JSON and BSON
    #[error("Encoding error: {0}")]
    Encoding(String),
}

/// Errors raised while turning an HTTP request into a store operation
#[derive(Debug, Clone, Error)]
pub enum RequestError {
    /// Path identifier is not a valid ObjectId
    #[error("Invalid identifier: {0}")]
    InvalidId(String),

    /// Body is missing, not JSON, or not a JSON object
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Body is well-formed JSON but fails validation (should map to HTTP 422)
    #[error("Invalid field '{field}': {message}")]
    Validation { field: String, message: String },

    /// The store call itself failed
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl RequestError {
    /// Shorthand for a [`RequestError::Validation`].
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        RequestError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

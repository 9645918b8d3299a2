//! Error types for event-signup

use thiserror::Error;

/// Errors raised while preparing or submitting a registration
#[derive(Debug, Error)]
pub enum Error {
    /// The request never produced a usable response
    #[error("transport error: {0}")]
    Transport(String),

    /// The server answered with a JSON-RPC error object
    #[error("server error ({code}): {message}")]
    Rpc {
        /// JSON-RPC error code
        code: i64,
        /// Human readable message (prefers `error.data.message`)
        message: String,
    },

    /// The anti-abuse token could not be obtained
    #[error("token error: {0}")]
    Token(String),

    /// Operation needs a mounted form
    #[error("no form is mounted")]
    NotMounted,

    /// The form has no ticket field with this name
    #[error("unknown ticket field: {0}")]
    UnknownField(String),

    /// The value is not one of the field's choices
    #[error("invalid quantity {value:?} for ticket field {field}")]
    InvalidQuantity {
        /// Ticket field name
        field: String,
        /// Rejected value
        value: String,
    },

    /// Invalid configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// HTTP client error
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// JSON (de)serialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Malformed endpoint URL
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Interactive prompt error
    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
}

/// Result alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

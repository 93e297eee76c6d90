//! Error taxonomy for the estimation engine.
//!
//! Every fallible engine operation returns [`EngineError`]. Each variant maps
//! to a stable wire code so API clients can branch on failures without
//! parsing human-readable messages. Store-level failures carry their own
//! richer context (see [`crate::store::StoreError`]) and are folded into this
//! taxonomy at the service boundary.

use crate::store::StoreError;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Error type shared by all engine services.
///
/// `Clone` is required because the single-flight coordinator broadcasts one
/// failure to every waiter of an in-flight computation.
#[derive(Debug, Clone, thiserror::Error)]
pub enum EngineError {
    /// Request parameters failed validation before any data access.
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// A referenced airport or flight does not exist.
    #[error("Not found: {message}")]
    NotFound {
        message: String,
        /// Optional hints for the client (e.g. the list of known airports).
        details: Option<serde_json::Value>,
    },

    /// The flight store failed or returned unusable data.
    #[error("Data source error: {source}")]
    DataSource {
        #[source]
        source: StoreError,
    },

    /// A waiter's deadline expired before the shared computation finished.
    #[error("Computation timed out after {waited_ms} ms")]
    ComputationTimeout { waited_ms: u64 },

    /// Unexpected internal failure.
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl EngineError {
    /// Create an input validation error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            details: None,
        }
    }

    /// Create a not-found error carrying structured hints for the client.
    pub fn not_found_with_details(
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self::NotFound {
            message: message.into(),
            details: Some(details),
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Stable machine-readable code for the API error envelope.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => "INPUT_VALIDATION",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::DataSource { .. } => "DATA_SOURCE",
            Self::ComputationTimeout { .. } => "COMPUTATION_TIMEOUT",
            Self::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    /// Whether retrying the same request later could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::DataSource { source } => source.is_retryable(),
            Self::ComputationTimeout { .. } => true,
            _ => false,
        }
    }
}

impl From<StoreError> for EngineError {
    fn from(err: StoreError) -> Self {
        match err {
            // Store-level "no such airport" surfaces as a client-visible 404,
            // not an upstream failure.
            StoreError::NotFound { message, .. } => Self::NotFound {
                message,
                details: None,
            },
            other => Self::DataSource { source: other },
        }
    }
}

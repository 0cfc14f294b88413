//! Error types for the audit trail system

pub type Result<T> = std::result::Result<T, AuditError>;

#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    /// Required configuration field absent or empty
    #[error("configuration field '{field}' must not be empty")]
    NullField { field: &'static str },

    /// Destination value outside the closed enumerated set
    #[error("unsupported destination '{value}'")]
    UnsupportedDestination { value: String },

    /// Timestamp pattern failed to compile
    #[error("invalid timestamp pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// Resolving a validated destination to a live sink failed
    #[error("failed to activate {sink} sink: {message}")]
    Activation { sink: &'static str, message: String },

    /// `log` called before the first `activate`
    #[error("logger has not been activated")]
    NotActivated,

    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Sink error (generic)
    #[error("sink error: {0}")]
    Sink(String),
}

impl AuditError {
    /// Create a missing-field error
    pub fn null_field(field: &'static str) -> Self {
        AuditError::NullField { field }
    }

    /// Create an unsupported destination error
    pub fn unsupported_destination(value: impl Into<String>) -> Self {
        AuditError::UnsupportedDestination {
            value: value.into(),
        }
    }

    /// Create an invalid pattern error
    pub fn invalid_pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        AuditError::InvalidPattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }

    /// Create an activation error for the named sink kind
    pub fn activation(sink: &'static str, message: impl Into<String>) -> Self {
        AuditError::Activation {
            sink,
            message: message.into(),
        }
    }

    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        AuditError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a sink error (generic)
    pub fn sink<S: Into<String>>(msg: S) -> Self {
        AuditError::Sink(msg.into())
    }
}

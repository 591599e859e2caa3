//! Error types for the intake engine and CLI
//!
//! Each error type has a corresponding error code for programmatic handling.

use thiserror::Error;

/// Result type alias for intake operations
pub type Result<T> = std::result::Result<T, IntakeError>;

/// Main error type for all intake operations
#[derive(Debug, Error)]
pub enum IntakeError {
    /// Requested flow id is not in the registry
    #[error("Flow not found: {0}")]
    FlowNotFound(String),

    /// Flow definition failed the referential-integrity pass
    #[error("Invalid flow definition: {0}")]
    InvalidFlow(String),

    /// A required step was submitted without an answer
    #[error("An answer is required for step '{0}'")]
    MissingAnswer(String),

    /// Answer does not fit the step's input kind or options
    #[error("Invalid answer for step '{step_id}': {reason}")]
    InvalidAnswer { step_id: String, reason: String },

    /// Task id is not in the task store
    #[error("Task not found: {0}")]
    TaskNotFound(String),

    /// Invalid JSON format
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Key-value storage failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// Input stream closed or interrupted mid-session
    #[error("Session interrupted")]
    Interrupted,

    /// IO error wrapper
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error with context
    #[error("{context}: {message}")]
    Wrapped { context: String, message: String },
}

impl IntakeError {
    /// Get the error code for this error type
    pub fn code(&self) -> &'static str {
        match self {
            IntakeError::FlowNotFound(_) => "FLOW_NOT_FOUND",
            IntakeError::InvalidFlow(_) => "INVALID_FLOW",
            IntakeError::MissingAnswer(_) => "MISSING_ANSWER",
            IntakeError::InvalidAnswer { .. } => "INVALID_ANSWER",
            IntakeError::TaskNotFound(_) => "TASK_NOT_FOUND",
            IntakeError::InvalidJson(_) => "INVALID_JSON",
            IntakeError::FileNotFound(_) => "FILE_NOT_FOUND",
            IntakeError::ConfigError(_) => "CONFIG_ERROR",
            IntakeError::Storage(_) => "STORAGE_ERROR",
            IntakeError::Interrupted => "INTERRUPTED",
            IntakeError::Io(_) => "IO_ERROR",
            IntakeError::Wrapped { .. } => "WRAPPED_ERROR",
        }
    }

    /// Wrap an error with additional context
    pub fn wrap<E: std::fmt::Display>(error: E, context: impl Into<String>) -> Self {
        IntakeError::Wrapped {
            context: context.into(),
            message: error.to_string(),
        }
    }

    /// Whether the error is a rejection at the answer boundary the user can correct by re-entering
    pub fn is_answer_rejection(&self) -> bool {
        matches!(
            self,
            IntakeError::MissingAnswer(_) | IntakeError::InvalidAnswer { .. }
        )
    }
}

/// Convert an error to an appropriate exit code
pub fn to_exit_code(error: &IntakeError) -> i32 {
    match error {
        IntakeError::Interrupted => 130, // Standard Unix exit code for SIGINT
        _ => 1,
    }
}

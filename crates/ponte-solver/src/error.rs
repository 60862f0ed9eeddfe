//! Solver error types.

/// Error type for solve-lifecycle operations.
#[derive(Debug, Clone, PartialEq)]
pub enum SolverError {
    /// An optional feature or unimplemented operation was invoked
    /// without backend support.
    Unsupported { operation: String },
    /// A backend-native failure, wrapped with the backend name.
    Backend {
        backend: &'static str,
        message: String,
    },
    /// A status predicate was queried before classification ran.
    /// Programming error.
    StatusNotAssigned,
    /// No registered option matches the given name or synonym.
    UnknownOption { name: String },
    /// The value's type does not match the option's declared type.
    InvalidOptionValue { name: String, message: String },
    /// Internal pipeline error.
    Internal(String),
}

impl SolverError {
    pub fn unsupported(operation: impl Into<String>) -> Self {
        SolverError::Unsupported {
            operation: operation.into(),
        }
    }

    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            SolverError::Unsupported { .. } => "SOLVER_UNSUPPORTED",
            SolverError::Backend { .. } => "SOLVER_BACKEND",
            SolverError::StatusNotAssigned => "SOLVER_STATUS_NOT_ASSIGNED",
            SolverError::UnknownOption { .. } => "SOLVER_UNKNOWN_OPTION",
            SolverError::InvalidOptionValue { .. } => "SOLVER_INVALID_OPTION_VALUE",
            SolverError::Internal(_) => "SOLVER_INTERNAL",
        }
    }
}

impl std::fmt::Display for SolverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverError::Unsupported { operation } => {
                write!(f, "[{}] Unsupported operation: {}", self.code(), operation)
            }
            SolverError::Backend { backend, message } => {
                write!(f, "[{}] {}: {}", self.code(), backend, message)
            }
            SolverError::StatusNotAssigned => write!(
                f,
                "[{}] Solution status queried before classification",
                self.code()
            ),
            SolverError::UnknownOption { name } => {
                write!(f, "[{}] Unknown option: {}", self.code(), name)
            }
            SolverError::InvalidOptionValue { name, message } => {
                write!(
                    f,
                    "[{}] Invalid value for option {}: {}",
                    self.code(),
                    name,
                    message
                )
            }
            SolverError::Internal(msg) => {
                write!(f, "[{}] Solver internal error: {}", self.code(), msg)
            }
        }
    }
}

impl std::error::Error for SolverError {}

//! Model error types.

use crate::ids::VariableId;

/// Errors that can occur during model operations
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    /// Invalid variable ID
    InvalidVariableId(VariableId),
    /// Invalid variable bounds
    InvalidVariableBounds { lower: f64, upper: f64 },
}

impl ModelError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            ModelError::InvalidVariableId(_) => "VARIABLE_INVALID_ID",
            ModelError::InvalidVariableBounds { .. } => "VARIABLE_INVALID_BOUNDS",
        }
    }
}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelError::InvalidVariableId(id) => write!(
                f,
                "[{}] Variable ID {} does not exist",
                self.code(),
                id.inner()
            ),
            ModelError::InvalidVariableBounds { lower, upper } => write!(
                f,
                "[{}] Variable bounds invalid: lower ({}) > upper ({})",
                self.code(),
                lower,
                upper
            ),
        }
    }
}

impl std::error::Error for ModelError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_is_stable() {
        assert_eq!(
            ModelError::InvalidVariableId(VariableId::new(0)).code(),
            "VARIABLE_INVALID_ID"
        );
        assert_eq!(
            ModelError::InvalidVariableBounds {
                lower: 1.0,
                upper: 0.0
            }
            .code(),
            "VARIABLE_INVALID_BOUNDS"
        );
    }

    #[test]
    fn test_display_prefixes_error_code() {
        let msg = ModelError::InvalidVariableId(VariableId::new(42)).to_string();
        assert!(msg.starts_with("[VARIABLE_INVALID_ID]"));
        assert!(msg.contains("42"));
    }
}

//! Conversion pipeline error types.

use ponte_model::ConstraintKind;

/// Errors raised while routing constraints between the registry, the
/// converter and the backend. All are fatal to the current solve.
#[derive(Debug, Clone, PartialEq)]
pub enum ConvertError {
    /// The converter has no decomposition for this constraint kind.
    NoConversion { kind: ConstraintKind },
    /// `propagate_result` was called on a converter that does not
    /// override it for this kind. Programming error.
    PropagateUnimplemented { kind: ConstraintKind },
    /// A converter failure, wrapped with the converter name.
    Converter {
        converter: &'static str,
        message: String,
    },
    /// A backend ingestion failure, wrapped with the backend name.
    Ingestion {
        backend: &'static str,
        message: String,
    },
}

impl ConvertError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            ConvertError::NoConversion { .. } => "CONVERT_NO_CONVERSION",
            ConvertError::PropagateUnimplemented { .. } => "CONVERT_PROPAGATE_UNIMPLEMENTED",
            ConvertError::Converter { .. } => "CONVERT_CONVERTER_FAILURE",
            ConvertError::Ingestion { .. } => "CONVERT_INGESTION_FAILURE",
        }
    }

    /// Wrap a converter-side failure with the converter's name, keeping
    /// an already-wrapped message intact.
    pub fn in_converter(self, converter: &'static str) -> Self {
        match self {
            ConvertError::Converter { .. } => self,
            other => ConvertError::Converter {
                converter,
                message: other.to_string(),
            },
        }
    }
}

impl std::fmt::Display for ConvertError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConvertError::NoConversion { kind } => {
                write!(f, "[{}] Not converting constraint {}", self.code(), kind)
            }
            ConvertError::PropagateUnimplemented { kind } => write!(
                f,
                "[{}] Result propagation not implemented for constraint {}",
                self.code(),
                kind
            ),
            ConvertError::Converter { converter, message } => {
                write!(f, "[{}] {}: {}", self.code(), converter, message)
            }
            ConvertError::Ingestion { backend, message } => {
                write!(f, "[{}] {}: {}", self.code(), backend, message)
            }
        }
    }
}

impl std::error::Error for ConvertError {}

//! The backend ingestion contract.

use ponte_model::Constraint;

use crate::acceptance::ConstraintCapabilities;

/// What a backend exposes to the conversion driver: its identity, its
/// static capability table, and the actual ingestion operation.
///
/// `add_constraint` reports native failures as plain strings; the driver
/// wraps them with the backend name
/// ([`ConvertError::Ingestion`](crate::ConvertError)).
pub trait ConstraintSink {
    fn backend_name(&self) -> &'static str;

    fn capabilities(&self) -> &ConstraintCapabilities;

    /// Ingest one accepted constraint. Only called for kinds whose
    /// acceptance level is not `NotAccepted`.
    fn add_constraint(&mut self, constraint: &Constraint) -> Result<(), String>;
}

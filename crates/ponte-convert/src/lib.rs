//! Heterogeneous-constraint registry and conversion pipeline.
//!
//! A model builder emits constraints one at a time; each is wrapped in a
//! [`ConstraintKeeper`] and registered. The [`ConversionDriver`] then asks
//! the backend's [`ConstraintCapabilities`] table for an acceptance level
//! per constraint kind: accepted constraints are handed to the backend's
//! [`ConstraintSink`], everything else is decomposed by the
//! [`ConstraintConverter`] into primitives that re-enter the same check
//! until every surviving constraint is accepted.

pub mod acceptance;
pub mod converter;
pub mod driver;
pub mod error;
pub mod keeper;
pub mod registry;
pub mod sink;

pub use acceptance::{AcceptanceLevel, ConstraintCapabilities};
pub use converter::{ConstraintConverter, FlatConverter, PreproInfo};
pub use driver::ConversionDriver;
pub use error::ConvertError;
pub use keeper::{ConstraintKeeper, ConstraintOrigin, KeeperId};
pub use registry::ConstraintRegistry;
pub use sink::ConstraintSink;

//! Solver-independent optimization model types.
//!
//! This crate holds the canonical data the conversion pipeline and the
//! solve orchestrator agree on:
//!
//! - [`Constraint`]: the closed set of constraint variants a model builder
//!   can emit.
//! - [`Context`]: propagation tag for derived result variables.
//! - [`SuffixDef`]/[`SuffixStore`]: named numeric annotations flowing in
//!   and out of a solve.
//! - [`Model`]: the growable variable table decompositions extend.

pub mod constraint;
pub mod context;
pub mod error;
pub mod ids;
pub mod model;
pub mod suffix;
pub mod types;

pub use constraint::{
    Constraint, ConstraintKind, CustomConstraint, IndicatorConstraint, LinearConstraint,
    LinearDefiningConstraint, QuadraticConstraint,
};
pub use context::Context;
pub use error::ModelError;
pub use ids::VariableId;
pub use model::Model;
pub use suffix::{SuffixDef, SuffixDirection, SuffixStore, SuffixTarget};
pub use types::{Bounds, Objective, Sense, Variable};

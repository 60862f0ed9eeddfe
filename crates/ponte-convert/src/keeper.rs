//! The owning wrapper around one constraint instance.

use ponte_model::{define_id_type, Constraint};

define_id_type!(KeeperId);

/// Where a registered constraint came from.
///
/// Downstream consumers use this to distinguish rows present in the
/// original input from decomposition products.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintOrigin {
    /// Registered directly by the model builder.
    Original,
    /// Rewrite of an original constraint into an equivalent form
    /// (e.g. a defining constraint lowered to a plain linear row).
    Rewritten,
    /// Created by a decomposition; has no counterpart in the input.
    Synthesized,
}

/// Exclusively owns one [`Constraint`] plus its lifecycle flag.
///
/// Invariant: once `removed` is set, the keeper is never handed to
/// conversion or backend ingestion again.
#[derive(Debug)]
pub struct ConstraintKeeper {
    constraint: Constraint,
    removed: bool,
    origin: ConstraintOrigin,
}

impl ConstraintKeeper {
    pub fn new(constraint: Constraint, origin: ConstraintOrigin) -> Self {
        Self {
            constraint,
            removed: false,
            origin,
        }
    }

    pub fn constraint(&self) -> &Constraint {
        &self.constraint
    }

    /// Mutable access for in-place simplification only; the variant must
    /// never change.
    pub fn constraint_mut(&mut self) -> &mut Constraint {
        &mut self.constraint
    }

    pub fn is_removed(&self) -> bool {
        self.removed
    }

    /// Idempotent.
    pub fn remove(&mut self) {
        self.removed = true;
    }

    pub fn origin(&self) -> ConstraintOrigin {
        self.origin
    }

    /// Description derived from the converter/backend/kind triple, used
    /// in diagnostics.
    pub fn describe(&self, converter: &str, backend: &str) -> String {
        format!(
            "ConstraintKeeper<{}, {}, {}>",
            converter,
            backend,
            self.constraint.kind()
        )
    }
}

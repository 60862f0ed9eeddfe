//! The registry owning all constraint keepers.

use tracing::debug;

use ponte_model::Constraint;

use crate::keeper::{ConstraintKeeper, ConstraintOrigin, KeeperId};

/// Owns every [`ConstraintKeeper`]. Registration is pure bookkeeping and
/// never fails; acceptance querying and conversion happen in a separate
/// driver pass.
#[derive(Debug, Default)]
pub struct ConstraintRegistry {
    keepers: Vec<ConstraintKeeper>,
    /// Backend row indices of linear constraints stemming from original
    /// input (directly registered or rewritten from defining rows), in
    /// ingestion order.
    original_linear: Vec<usize>,
}

impl ConstraintRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a constraint coming from the model builder.
    pub fn register(&mut self, constraint: Constraint) -> KeeperId {
        self.register_with_origin(constraint, ConstraintOrigin::Original)
    }

    /// Register a replacement constraint produced by a decomposition.
    pub fn register_derived(&mut self, constraint: Constraint, origin: ConstraintOrigin) -> KeeperId {
        self.register_with_origin(constraint, origin)
    }

    fn register_with_origin(&mut self, constraint: Constraint, origin: ConstraintOrigin) -> KeeperId {
        let id = KeeperId::new(self.keepers.len() as u32);
        debug!(
            component = "registry",
            operation = "register",
            keeper = id.inner(),
            kind = %constraint.kind(),
            "Registered constraint"
        );
        self.keepers.push(ConstraintKeeper::new(constraint, origin));
        id
    }

    pub fn len(&self) -> usize {
        self.keepers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keepers.is_empty()
    }

    pub fn keeper(&self, id: KeeperId) -> &ConstraintKeeper {
        &self.keepers[id.inner() as usize]
    }

    pub fn constraint(&self, id: KeeperId) -> &Constraint {
        self.keepers[id.inner() as usize].constraint()
    }

    /// Mutable access for in-place simplification only.
    pub fn constraint_mut(&mut self, id: KeeperId) -> &mut Constraint {
        self.keepers[id.inner() as usize].constraint_mut()
    }

    pub fn is_removed(&self, id: KeeperId) -> bool {
        self.keepers[id.inner() as usize].is_removed()
    }

    /// Idempotent; no error if already removed.
    pub fn remove(&mut self, id: KeeperId) {
        self.keepers[id.inner() as usize].remove();
    }

    /// IDs of keepers that are still live.
    pub fn live_ids(&self) -> impl Iterator<Item = KeeperId> + '_ {
        self.keepers
            .iter()
            .enumerate()
            .filter(|(_, k)| !k.is_removed())
            .map(|(i, _)| KeeperId::new(i as u32))
    }

    pub(crate) fn record_original_linear(&mut self, row: usize) {
        self.original_linear.push(row);
    }

    /// Backend row indices of linear constraints present in the original
    /// input, in ingestion order.
    pub fn original_linear(&self) -> &[usize] {
        &self.original_linear
    }
}

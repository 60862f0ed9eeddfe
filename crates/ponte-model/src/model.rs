//! The growable variable table the conversion pipeline extends.
//!
//! Decompositions create auxiliary variables and tighten their bounds as
//! tighter ranges are inferred; the usage [`Context`] accumulated per
//! variable feeds later simplification passes.

use tracing::debug;

use crate::context::Context;
use crate::error::ModelError;
use crate::ids::VariableId;
use crate::types::{Bounds, Objective, Variable};

#[derive(Debug, Default)]
pub struct Model {
    variables: Vec<Variable>,
    contexts: Vec<Context>,
    objectives: Vec<Objective>,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable; never fails, IDs are dense and ascending.
    pub fn add_variable(&mut self, var: Variable) -> VariableId {
        let id = VariableId::new(self.variables.len() as u32);
        self.variables.push(var);
        self.contexts.push(Context::Unknown);
        id
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn variable(&self, id: VariableId) -> Result<&Variable, ModelError> {
        self.variables
            .get(id.inner() as usize)
            .ok_or(ModelError::InvalidVariableId(id))
    }

    pub fn context(&self, id: VariableId) -> Result<Context, ModelError> {
        self.contexts
            .get(id.inner() as usize)
            .copied()
            .ok_or(ModelError::InvalidVariableId(id))
    }

    /// Append an objective; solved in declaration order by lexicographic
    /// backends, blended by the rest.
    pub fn add_objective(&mut self, objective: Objective) {
        self.objectives.push(objective);
    }

    pub fn objectives(&self) -> &[Objective] {
        &self.objectives
    }

    pub fn num_objectives(&self) -> usize {
        self.objectives.len()
    }

    /// Tighten a variable's declared bounds by intersecting with an
    /// inferred range. The incoming range itself must be consistent.
    pub fn tighten_variable(&mut self, id: VariableId, range: Bounds) -> Result<(), ModelError> {
        if !range.is_consistent() {
            return Err(ModelError::InvalidVariableBounds {
                lower: range.lower,
                upper: range.upper,
            });
        }
        let idx = id.inner() as usize;
        let var = self
            .variables
            .get_mut(idx)
            .ok_or(ModelError::InvalidVariableId(id))?;
        let tightened = var.bounds.intersect(range);
        debug!(
            component = "model",
            operation = "tighten_variable",
            variable = id.inner(),
            lower = tightened.lower,
            upper = tightened.upper,
            "Tightened variable bounds"
        );
        var.bounds = tightened;
        Ok(())
    }

    /// Merge a newly observed usage context into the variable's record.
    pub fn merge_context(&mut self, id: VariableId, ctx: Context) -> Result<(), ModelError> {
        let idx = id.inner() as usize;
        let slot = self
            .contexts
            .get_mut(idx)
            .ok_or(ModelError::InvalidVariableId(id))?;
        *slot = slot.combine(ctx);
        Ok(())
    }

    /// Per-variable integrality flags, indexed by variable ID.
    pub fn integrality(&self) -> Vec<bool> {
        self.variables.iter().map(|v| v.is_integer).collect()
    }

    /// True when at least one variable is integer-constrained.
    pub fn is_mip(&self) -> bool {
        self.variables.iter().any(|v| v.is_integer)
    }
}

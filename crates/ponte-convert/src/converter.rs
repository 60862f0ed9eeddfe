//! The constraint converter protocol and the default flat converter.

use std::collections::HashMap;

use ponte_model::{Bounds, Constraint, Context, LinearDefiningConstraint, Model};

use crate::error::ConvertError;
use crate::keeper::KeeperId;

/// Scratch data a converter may fill during preprocessing: tighter bounds
/// and usage context for the eventual result variable, computed before
/// the full decomposition runs. Used to short-circuit cheap cases.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreproInfo {
    pub result_bounds: Option<Bounds>,
    pub context: Context,
}

/// The contract a converter implements for constraint kinds the backend
/// does not natively forward.
///
/// Only `convert` is required for a kind to be handled; `preprocess`
/// defaults to a no-op and `propagate_result` must be overridden for any
/// kind that defines a result variable.
pub trait ConstraintConverter {
    fn name(&self) -> &'static str;

    /// May compute tighter bounds/context for the eventual result before
    /// decomposition runs. Default: no-op.
    fn preprocess(&mut self, _constraint: &Constraint, _info: &mut PreproInfo) {}

    /// Decompose into zero or more replacement constraints, registering
    /// any auxiliary variables in `model`. Default: no conversion
    /// available for this kind.
    fn convert(
        &mut self,
        constraint: &Constraint,
        _model: &mut Model,
    ) -> Result<Vec<Constraint>, ConvertError> {
        Err(ConvertError::NoConversion {
            kind: constraint.kind(),
        })
    }

    /// Tighten the result variable's declared bounds with a freshly
    /// computed range and record how the variable is used. Required for
    /// kinds that define a result variable; calling the default is a
    /// programming error.
    fn propagate_result(
        &mut self,
        constraint: &Constraint,
        _lb: f64,
        _ub: f64,
        _ctx: Context,
        _model: &mut Model,
    ) -> Result<(), ConvertError> {
        Err(ConvertError::PropagateUnimplemented {
            kind: constraint.kind(),
        })
    }

    /// Common-subexpression lookup: an existing keeper structurally equal
    /// to this constraint, or `None`. Default: always misses.
    fn map_find(&self, _constraint: &Constraint) -> Option<KeeperId> {
        None
    }

    /// Record a keeper for later `map_find` hits. Returns `false` when a
    /// duplicate is detected. Default: no deduplication, always `true`.
    fn map_insert(&mut self, _id: KeeperId, _constraint: &Constraint) -> bool {
        true
    }
}

/// Structural signature of a defining row, keyed on sorted terms and the
/// constant. f64 payloads are compared bit-exact.
type DefiningSignature = (Vec<(u32, u64)>, u64);

fn defining_signature(ldc: &LinearDefiningConstraint) -> DefiningSignature {
    let mut terms: Vec<(u32, u64)> = ldc
        .vars
        .iter()
        .zip(&ldc.coefs)
        .map(|(v, c)| (v.inner(), c.to_bits()))
        .collect();
    terms.sort_unstable();
    (terms, ldc.constant.to_bits())
}

/// The default converter: lowers defining rows to plain linear rows,
/// propagates result bounds for them, and dedups structurally identical
/// defining rows.
#[derive(Debug, Default)]
pub struct FlatConverter {
    defining_map: HashMap<DefiningSignature, KeeperId>,
}

impl FlatConverter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConstraintConverter for FlatConverter {
    fn name(&self) -> &'static str {
        "FlatConverter"
    }

    fn convert(
        &mut self,
        constraint: &Constraint,
        _model: &mut Model,
    ) -> Result<Vec<Constraint>, ConvertError> {
        match constraint {
            Constraint::LinearDefining(ldc) => Ok(vec![Constraint::Linear(ldc.to_linear())]),
            other => Err(ConvertError::NoConversion { kind: other.kind() }),
        }
    }

    fn propagate_result(
        &mut self,
        constraint: &Constraint,
        lb: f64,
        ub: f64,
        ctx: Context,
        model: &mut Model,
    ) -> Result<(), ConvertError> {
        let result_var = match constraint.result_var() {
            Some(v) => v,
            None => {
                return Err(ConvertError::PropagateUnimplemented {
                    kind: constraint.kind(),
                })
            }
        };
        model
            .tighten_variable(result_var, Bounds::new(lb, ub))
            .map_err(|err| ConvertError::Converter {
                converter: self.name(),
                message: err.to_string(),
            })?;
        model
            .merge_context(result_var, ctx)
            .map_err(|err| ConvertError::Converter {
                converter: self.name(),
                message: err.to_string(),
            })?;
        Ok(())
    }

    fn map_find(&self, constraint: &Constraint) -> Option<KeeperId> {
        match constraint {
            Constraint::LinearDefining(ldc) => {
                self.defining_map.get(&defining_signature(ldc)).copied()
            }
            _ => None,
        }
    }

    fn map_insert(&mut self, id: KeeperId, constraint: &Constraint) -> bool {
        match constraint {
            Constraint::LinearDefining(ldc) => self
                .defining_map
                .insert(defining_signature(ldc), id)
                .is_none(),
            _ => true,
        }
    }
}

//! The conversion driver loop.
//!
//! For every live keeper the driver asks the backend's capability table
//! for the constraint kind's acceptance level. Accepted constraints go
//! straight to the backend; everything else is decomposed and its
//! replacements re-enter the same check until all surviving constraints
//! are accepted.

use tracing::{debug, trace};

use ponte_model::{Bounds, Constraint, LinearConstraint, Model};

use crate::acceptance::AcceptanceLevel;
use crate::converter::{ConstraintConverter, PreproInfo};
use crate::error::ConvertError;
use crate::keeper::{ConstraintOrigin, KeeperId};
use crate::registry::ConstraintRegistry;
use crate::sink::ConstraintSink;

#[derive(Debug, Default)]
pub struct ConversionDriver;

impl ConversionDriver {
    pub fn new() -> Self {
        Self
    }

    /// Route every live constraint to the backend, converting kinds the
    /// backend does not accept. Replacements re-enter the worklist, so a
    /// decomposition may itself be decomposed further.
    pub fn run<C, S>(
        &self,
        registry: &mut ConstraintRegistry,
        converter: &mut C,
        sink: &mut S,
        model: &mut Model,
    ) -> Result<(), ConvertError>
    where
        C: ConstraintConverter,
        S: ConstraintSink,
    {
        let mut next_row = 0usize;
        let mut index = 0usize;
        while index < registry.len() {
            let id = KeeperId::new(index as u32);
            index += 1;
            if registry.is_removed(id) {
                continue;
            }
            let kind = registry.constraint(id).kind();
            let level = sink.capabilities().acceptance(kind);
            trace!(
                component = "driver",
                keeper = id.inner(),
                kind = %kind,
                level = ?level,
                "Routing constraint"
            );
            if level == AcceptanceLevel::NotAccepted {
                self.convert_keeper(id, registry, converter, model)?;
            } else {
                self.ingest_keeper(id, registry, sink, &mut next_row)?;
            }
        }
        debug!(
            component = "driver",
            operation = "run",
            status = "success",
            constraints = registry.len() as u64,
            rows = next_row as u64,
            "Conversion finished"
        );
        Ok(())
    }

    fn convert_keeper<C>(
        &self,
        id: KeeperId,
        registry: &mut ConstraintRegistry,
        converter: &mut C,
        model: &mut Model,
    ) -> Result<(), ConvertError>
    where
        C: ConstraintConverter,
    {
        let constraint = registry.constraint(id).clone();
        let parent_origin = registry.keeper(id).origin();

        let mut info = PreproInfo::default();
        converter.preprocess(&constraint, &mut info);

        // Common-subexpression elimination: an equivalent decomposition
        // already exists, so equate the result variables instead of
        // re-registering the replacements.
        if constraint.result_var().is_some() {
            if let Some(existing) = converter.map_find(&constraint) {
                self.reuse_existing(id, existing, registry, &constraint)?;
                return Ok(());
            }
        }

        let replacements = converter
            .convert(&constraint, model)
            .map_err(|err| err.in_converter(converter.name()))?;
        registry.remove(id);

        if constraint.result_var().is_some() {
            if !converter.map_insert(id, &constraint) {
                debug!(
                    component = "driver",
                    operation = "map_insert",
                    keeper = id.inner(),
                    "Duplicate decomposition detected after conversion"
                );
            }
            if let Some(range) = info.result_bounds {
                converter
                    .propagate_result(&constraint, range.lower, range.upper, info.context, model)
                    .map_err(|err| ConvertError::Converter {
                        converter: converter.name(),
                        message: format!(
                            "propagating result for constraint {}: {}",
                            constraint.kind(),
                            err
                        ),
                    })?;
            }
        }

        // A lone replacement of an original constraint inherits its row
        // identity; everything else is synthesized.
        let single = replacements.len() == 1;
        for replacement in replacements {
            let origin = if single && parent_origin != ConstraintOrigin::Synthesized {
                ConstraintOrigin::Rewritten
            } else {
                ConstraintOrigin::Synthesized
            };
            registry.register_derived(replacement, origin);
        }
        Ok(())
    }

    /// Replace a duplicated decomposition by a row equating the two
    /// result variables.
    fn reuse_existing(
        &self,
        id: KeeperId,
        existing: KeeperId,
        registry: &mut ConstraintRegistry,
        constraint: &Constraint,
    ) -> Result<(), ConvertError> {
        registry.remove(id);
        let this_result = match constraint.result_var() {
            Some(v) => v,
            None => return Ok(()),
        };
        let existing_result = registry.constraint(existing).result_var();
        if let Some(other) = existing_result {
            if other != this_result {
                registry.register_derived(
                    Constraint::Linear(LinearConstraint::new(
                        vec![1.0, -1.0],
                        vec![this_result, other],
                        Bounds::fixed(0.0),
                    )),
                    ConstraintOrigin::Synthesized,
                );
            }
        }
        debug!(
            component = "driver",
            operation = "map_find",
            keeper = id.inner(),
            existing = existing.inner(),
            "Reused existing decomposition"
        );
        Ok(())
    }

    fn ingest_keeper<S>(
        &self,
        id: KeeperId,
        registry: &mut ConstraintRegistry,
        sink: &mut S,
        next_row: &mut usize,
    ) -> Result<(), ConvertError>
    where
        S: ConstraintSink,
    {
        debug_assert!(!registry.is_removed(id));
        let origin = registry.keeper(id).origin();
        let is_linear = matches!(registry.constraint(id), Constraint::Linear(_));
        sink.add_constraint(registry.constraint(id))
            .map_err(|message| ConvertError::Ingestion {
                backend: sink.backend_name(),
                message,
            })?;
        if is_linear && origin != ConstraintOrigin::Synthesized {
            registry.record_original_linear(*next_row);
        }
        *next_row += 1;
        Ok(())
    }
}

//! Named, typed, replayable solver options.
//!
//! Options come in two flavors: stored options write fields the core
//! itself reads (kappa export, feasibility relaxation, rounding), solver
//! options are forwarded to the backend's native setter. Every
//! successful solver-option set is additionally captured as a
//! `(key, value)` record in an ordered replay log, so `replay_all`
//! reproduces backend configuration from scratch after an environment
//! reset without re-parsing the original option string.

use tracing::debug;

use crate::error::SolverError;
use crate::features::{Feature, FeatureSet};

/// A typed option value.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    Int(i64),
    Dbl(f64),
    Str(String),
}

impl OptionValue {
    fn type_name(&self) -> &'static str {
        match self {
            OptionValue::Int(_) => "int",
            OptionValue::Dbl(_) => "double",
            OptionValue::Str(_) => "string",
        }
    }
}

/// Backend-native option key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OptionKey(pub &'static str);

/// The get/set accessor pair a backend exposes for its native options.
pub trait OptionBackend {
    fn set_option(&mut self, key: OptionKey, value: &OptionValue) -> Result<(), String>;
    fn get_option(&self, key: OptionKey) -> Result<OptionValue, String>;
}

/// Core-owned option storage read by the orchestrator.
#[derive(Debug, Clone)]
pub struct StoredOptions {
    /// Condition-number reporting: bit 1 = message line, bit 2 = suffix
    /// output. The two bits are independent toggles.
    pub export_kappa: i64,
    /// Feasibility relaxation mode, 0 = off, 1..6 = relaxation variants.
    pub feasrelax_mode: i64,
    /// Default penalties; negative means infinite (no violation allowed).
    pub lbpen: f64,
    pub ubpen: f64,
    pub rhspen: f64,
    /// Rounding bits: 1 = assign, 2 = modify status, 4 = modify message.
    pub round: i64,
    /// Max integrality deviation below which rounding is not reported.
    pub round_reptol: f64,
}

impl Default for StoredOptions {
    fn default() -> Self {
        Self {
            export_kappa: 0,
            feasrelax_mode: 0,
            lbpen: 1.0,
            ubpen: 1.0,
            rhspen: 1.0,
            round: 0,
            round_reptol: 1e-9,
        }
    }
}

/// Identifies one field of [`StoredOptions`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoredOptionId {
    ExportKappa,
    FeasRelaxMode,
    LbPen,
    UbPen,
    RhsPen,
    Round,
    RoundRepTol,
}

/// Where a set lands: a core-owned field or the backend's native setter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionTarget {
    Stored(StoredOptionId),
    Solver(OptionKey),
}

#[derive(Debug)]
struct OptionDef {
    /// First name is canonical; the rest are synonyms.
    names: Vec<&'static str>,
    #[allow(dead_code)]
    description: &'static str,
    target: OptionTarget,
}

/// The registry of named options plus the solver-option replay log.
#[derive(Debug, Default)]
pub struct OptionRegistry {
    defs: Vec<OptionDef>,
    replay: Vec<(OptionKey, OptionValue)>,
}

impl OptionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the standard options whose features are allowed.
    pub fn with_standard_options(features: &FeatureSet) -> Self {
        let mut registry = Self::new();
        if features.allows(Feature::Kappa) {
            registry.add_stored_option(
                vec!["alg:kappa", "kappa", "basis_cond"],
                "Whether to return the estimated condition number (kappa) of the optimal \
                 basis: sum of 1 = report kappa in the result message; 2 = return kappa \
                 in the solver-defined suffix kappa on the objective and problem.",
                StoredOptionId::ExportKappa,
            );
        }
        if features.allows(Feature::FeasibilityRelaxation) {
            registry.add_stored_option(
                vec!["alg:feasrelax", "feasrelax"],
                "Whether to modify the problem into a feasibility relaxation problem; \
                 0 = no, 1..6 = relaxation variants. Weights are given by suffixes \
                 .lbpen/.ubpen on variables and .rhspen on constraints, else by the \
                 lbpen/ubpen/rhspen keywords. Weights < 0 are treated as Infinity.",
                StoredOptionId::FeasRelaxMode,
            );
            registry.add_stored_option(
                vec!["alg:lbpen", "lbpen"],
                "See alg:feasrelax.",
                StoredOptionId::LbPen,
            );
            registry.add_stored_option(
                vec!["alg:ubpen", "ubpen"],
                "See alg:feasrelax.",
                StoredOptionId::UbPen,
            );
            registry.add_stored_option(
                vec!["alg:rhspen", "rhspen"],
                "See alg:feasrelax.",
                StoredOptionId::RhsPen,
            );
        }
        if features.allows(Feature::Rounding) {
            registry.add_stored_option(
                vec!["mip:round", "round"],
                "Whether to round integer variables to integral values before returning \
                 the solution: sum of 1 = round, 2 = modify solve status, 4 = modify \
                 solve message. Modifications are reported only if the maximum deviation \
                 from integrality exceeds mip:round_reptol.",
                StoredOptionId::Round,
            );
            registry.add_stored_option(
                vec!["mip:round_reptol", "round_reptol"],
                "Tolerance for reporting rounding of integer variables; see mip:round.",
                StoredOptionId::RoundRepTol,
            );
        }
        registry
    }

    pub fn add_stored_option(
        &mut self,
        names: Vec<&'static str>,
        description: &'static str,
        id: StoredOptionId,
    ) {
        self.defs.push(OptionDef {
            names,
            description,
            target: OptionTarget::Stored(id),
        });
    }

    pub fn add_solver_option(
        &mut self,
        names: Vec<&'static str>,
        description: &'static str,
        key: OptionKey,
    ) {
        self.defs.push(OptionDef {
            names,
            description,
            target: OptionTarget::Solver(key),
        });
    }

    fn find(&self, name: &str) -> Option<&OptionDef> {
        self.defs.iter().find(|d| d.names.iter().any(|n| *n == name))
    }

    /// Apply a value immediately. Solver options are additionally
    /// captured in the replay log.
    pub fn set<B: OptionBackend>(
        &mut self,
        name: &str,
        value: OptionValue,
        stored: &mut StoredOptions,
        backend: &mut B,
    ) -> Result<(), SolverError> {
        let def = self.find(name).ok_or_else(|| SolverError::UnknownOption {
            name: name.to_string(),
        })?;
        match def.target {
            OptionTarget::Stored(id) => set_stored(stored, id, name, &value)?,
            OptionTarget::Solver(key) => {
                backend
                    .set_option(key, &value)
                    .map_err(|message| SolverError::InvalidOptionValue {
                        name: name.to_string(),
                        message,
                    })?;
                self.replay.push((key, value.clone()));
            }
        }
        debug!(
            component = "options",
            operation = "set",
            option = name,
            value = ?value,
            "Applied option"
        );
        Ok(())
    }

    /// Read an option's current value.
    pub fn get<B: OptionBackend>(
        &self,
        name: &str,
        stored: &StoredOptions,
        backend: &B,
    ) -> Result<OptionValue, SolverError> {
        let def = self.find(name).ok_or_else(|| SolverError::UnknownOption {
            name: name.to_string(),
        })?;
        match def.target {
            OptionTarget::Stored(id) => Ok(get_stored(stored, id)),
            OptionTarget::Solver(key) => {
                backend
                    .get_option(key)
                    .map_err(|message| SolverError::InvalidOptionValue {
                        name: name.to_string(),
                        message,
                    })
            }
        }
    }

    /// Re-apply every captured solver-option record in original order.
    pub fn replay_all<B: OptionBackend>(&self, backend: &mut B) -> Result<(), SolverError> {
        for (key, value) in &self.replay {
            backend
                .set_option(*key, value)
                .map_err(|message| SolverError::InvalidOptionValue {
                    name: key.0.to_string(),
                    message,
                })?;
        }
        debug!(
            component = "options",
            operation = "replay_all",
            records = self.replay.len(),
            "Replayed solver options"
        );
        Ok(())
    }

    /// Number of captured replay records.
    pub fn replay_len(&self) -> usize {
        self.replay.len()
    }
}

fn set_stored(
    stored: &mut StoredOptions,
    id: StoredOptionId,
    name: &str,
    value: &OptionValue,
) -> Result<(), SolverError> {
    let type_mismatch = || SolverError::InvalidOptionValue {
        name: name.to_string(),
        message: format!("unexpected {} value", value.type_name()),
    };
    match id {
        StoredOptionId::ExportKappa | StoredOptionId::FeasRelaxMode | StoredOptionId::Round => {
            let v = match value {
                OptionValue::Int(v) => *v,
                _ => return Err(type_mismatch()),
            };
            match id {
                StoredOptionId::ExportKappa => stored.export_kappa = v,
                StoredOptionId::FeasRelaxMode => stored.feasrelax_mode = v,
                StoredOptionId::Round => stored.round = v,
                _ => unreachable!(),
            }
        }
        StoredOptionId::LbPen
        | StoredOptionId::UbPen
        | StoredOptionId::RhsPen
        | StoredOptionId::RoundRepTol => {
            let v = match value {
                OptionValue::Dbl(v) => *v,
                OptionValue::Int(v) => *v as f64,
                _ => return Err(type_mismatch()),
            };
            match id {
                StoredOptionId::LbPen => stored.lbpen = v,
                StoredOptionId::UbPen => stored.ubpen = v,
                StoredOptionId::RhsPen => stored.rhspen = v,
                StoredOptionId::RoundRepTol => stored.round_reptol = v,
                _ => unreachable!(),
            }
        }
    }
    Ok(())
}

fn get_stored(stored: &StoredOptions, id: StoredOptionId) -> OptionValue {
    match id {
        StoredOptionId::ExportKappa => OptionValue::Int(stored.export_kappa),
        StoredOptionId::FeasRelaxMode => OptionValue::Int(stored.feasrelax_mode),
        StoredOptionId::LbPen => OptionValue::Dbl(stored.lbpen),
        StoredOptionId::UbPen => OptionValue::Dbl(stored.ubpen),
        StoredOptionId::RhsPen => OptionValue::Dbl(stored.rhspen),
        StoredOptionId::Round => OptionValue::Int(stored.round),
        StoredOptionId::RoundRepTol => OptionValue::Dbl(stored.round_reptol),
    }
}

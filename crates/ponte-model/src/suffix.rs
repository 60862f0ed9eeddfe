//! Suffixes: named numeric arrays attached to model entities.
//!
//! Suffixes are the wire contract for auxiliary annotations (priorities,
//! weights, tolerances, penalties, dual values, condition numbers). A
//! [`SuffixDef`] declares name, attachment target and direction; a
//! [`SuffixStore`] holds the values keyed by (name, target).

use std::collections::HashMap;

/// Which entity class a suffix attaches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SuffixTarget {
    Variable,
    Constraint,
    Objective,
    Problem,
}

impl SuffixTarget {
    pub fn as_str(self) -> &'static str {
        match self {
            SuffixTarget::Variable => "variable",
            SuffixTarget::Constraint => "constraint",
            SuffixTarget::Objective => "objective",
            SuffixTarget::Problem => "problem",
        }
    }
}

/// Data-flow direction of a suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuffixDirection {
    Input,
    Output,
    InOut,
}

/// Declaration of one suffix: the typed key used by readers and writers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuffixDef {
    pub name: &'static str,
    pub target: SuffixTarget,
    pub direction: SuffixDirection,
}

impl SuffixDef {
    pub const fn new(name: &'static str, target: SuffixTarget, direction: SuffixDirection) -> Self {
        Self {
            name,
            target,
            direction,
        }
    }
}

/// Standard suffixes defined by the core.
pub mod std_suffixes {
    use super::{SuffixDef, SuffixDirection, SuffixTarget};

    pub const OBJ_PRIORITY: SuffixDef =
        SuffixDef::new("objpriority", SuffixTarget::Objective, SuffixDirection::Input);
    pub const OBJ_WEIGHT: SuffixDef =
        SuffixDef::new("objweight", SuffixTarget::Objective, SuffixDirection::Input);
    pub const OBJ_ABS_TOL: SuffixDef =
        SuffixDef::new("objabstol", SuffixTarget::Objective, SuffixDirection::Input);
    pub const OBJ_REL_TOL: SuffixDef =
        SuffixDef::new("objreltol", SuffixTarget::Objective, SuffixDirection::Input);

    pub const OBJ_KAPPA: SuffixDef =
        SuffixDef::new("kappa", SuffixTarget::Objective, SuffixDirection::Output);
    pub const PROB_KAPPA: SuffixDef =
        SuffixDef::new("kappa", SuffixTarget::Problem, SuffixDirection::Output);

    /// Feasibility-relaxation penalty inputs.
    pub const VAR_LB_PEN: SuffixDef =
        SuffixDef::new("lbpen", SuffixTarget::Variable, SuffixDirection::Input);
    pub const VAR_UB_PEN: SuffixDef =
        SuffixDef::new("ubpen", SuffixTarget::Variable, SuffixDirection::Input);
    pub const CON_RHS_PEN: SuffixDef =
        SuffixDef::new("rhspen", SuffixTarget::Constraint, SuffixDirection::Input);
}

/// Typed storage for suffix values.
///
/// Reading an absent suffix yields an empty slice; producers overwrite
/// whole arrays at once.
#[derive(Debug, Default)]
pub struct SuffixStore {
    int_values: HashMap<(&'static str, SuffixTarget), Vec<i32>>,
    dbl_values: HashMap<(&'static str, SuffixTarget), Vec<f64>>,
}

impl SuffixStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_int(&mut self, suf: SuffixDef, values: Vec<i32>) {
        self.int_values.insert((suf.name, suf.target), values);
    }

    pub fn write_dbl(&mut self, suf: SuffixDef, values: Vec<f64>) {
        self.dbl_values.insert((suf.name, suf.target), values);
    }

    pub fn read_int(&self, suf: SuffixDef) -> &[i32] {
        self.int_values
            .get(&(suf.name, suf.target))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn read_dbl(&self, suf: SuffixDef) -> &[f64] {
        self.dbl_values
            .get(&(suf.name, suf.target))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Write a single-element double suffix (problem- or objective-wide
    /// scalars such as kappa).
    pub fn write_single_dbl(&mut self, suf: SuffixDef, value: f64) {
        self.write_dbl(suf, vec![value]);
    }
}

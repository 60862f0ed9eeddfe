//! The closed set of constraint variants a model builder can emit.
//!
//! Every variant carries its own coefficients and operands. A constraint
//! that defines an auxiliary variable exposes it via
//! [`Constraint::result_var`]; all others report `None`.

use crate::ids::VariableId;
use crate::types::Bounds;

/// Tag identifying a constraint variant, used to key per-backend
/// acceptance tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    Linear,
    Quadratic,
    Indicator,
    LinearDefining,
    /// Custom kinds are distinguished by their static name.
    Custom(&'static str),
}

impl ConstraintKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ConstraintKind::Linear => "LinearConstraint",
            ConstraintKind::Quadratic => "QuadraticConstraint",
            ConstraintKind::Indicator => "IndicatorConstraint",
            ConstraintKind::LinearDefining => "LinearDefiningConstraint",
            ConstraintKind::Custom(name) => name,
        }
    }
}

impl std::fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// lb <= sum(coefs[i] * vars[i]) <= ub
#[derive(Debug, Clone, PartialEq)]
pub struct LinearConstraint {
    pub coefs: Vec<f64>,
    pub vars: Vec<VariableId>,
    pub bounds: Bounds,
}

impl LinearConstraint {
    pub fn new(coefs: Vec<f64>, vars: Vec<VariableId>, bounds: Bounds) -> Self {
        debug_assert_eq!(coefs.len(), vars.len());
        Self { coefs, vars, bounds }
    }

    pub fn nnz(&self) -> usize {
        self.coefs.len()
    }
}

/// A linear part plus quadratic product terms (var_a, var_b, coef).
#[derive(Debug, Clone, PartialEq)]
pub struct QuadraticConstraint {
    pub linear: LinearConstraint,
    pub quad_terms: Vec<(VariableId, VariableId, f64)>,
}

/// binary_var == active_value  ==>  sum(coefs[i] * vars[i]) <= rhs
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorConstraint {
    pub binary_var: VariableId,
    pub active_value: bool,
    pub coefs: Vec<f64>,
    pub vars: Vec<VariableId>,
    pub rhs: f64,
}

/// result_var == sum(coefs[i] * vars[i]) + constant
///
/// Defines an auxiliary variable for a subexpression. Backends that do
/// not post these directly receive the plain linear rewrite instead.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearDefiningConstraint {
    pub result_var: VariableId,
    pub coefs: Vec<f64>,
    pub vars: Vec<VariableId>,
    pub constant: f64,
}

impl LinearDefiningConstraint {
    /// Rewrite into a plain linear row:
    /// sum(coefs[i] * vars[i]) - result_var == -constant
    pub fn to_linear(&self) -> LinearConstraint {
        let mut coefs = self.coefs.clone();
        let mut vars = self.vars.clone();
        coefs.push(-1.0);
        vars.push(self.result_var);
        LinearConstraint::new(coefs, vars, Bounds::fixed(-self.constant))
    }
}

/// A named nonlinear primitive (abs, max, ...) over a list of operand
/// variables, optionally defining a result variable.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomConstraint {
    pub name: &'static str,
    pub operands: Vec<VariableId>,
    pub parameters: Vec<f64>,
    pub result_var: Option<VariableId>,
}

/// One constraint instance. Immutable once created except for in-place
/// simplification that never changes the variant.
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    Linear(LinearConstraint),
    Quadratic(QuadraticConstraint),
    Indicator(IndicatorConstraint),
    LinearDefining(LinearDefiningConstraint),
    Custom(CustomConstraint),
}

impl Constraint {
    pub fn kind(&self) -> ConstraintKind {
        match self {
            Constraint::Linear(_) => ConstraintKind::Linear,
            Constraint::Quadratic(_) => ConstraintKind::Quadratic,
            Constraint::Indicator(_) => ConstraintKind::Indicator,
            Constraint::LinearDefining(_) => ConstraintKind::LinearDefining,
            Constraint::Custom(c) => ConstraintKind::Custom(c.name),
        }
    }

    /// The auxiliary variable this constraint defines, if any.
    pub fn result_var(&self) -> Option<VariableId> {
        match self {
            Constraint::LinearDefining(c) => Some(c.result_var),
            Constraint::Custom(c) => c.result_var,
            _ => None,
        }
    }
}

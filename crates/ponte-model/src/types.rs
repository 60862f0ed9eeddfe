use crate::ids::VariableId;

/// Optimization sense
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    Minimize,
    Maximize,
}

/// A linear objective: optimize `sense` over sum(coef * var).
#[derive(Debug, Clone, PartialEq)]
pub struct Objective {
    pub sense: Sense,
    pub terms: Vec<(VariableId, f64)>,
}

impl Objective {
    pub fn new(sense: Sense, terms: Vec<(VariableId, f64)>) -> Self {
        Self { sense, terms }
    }
}

/// Bounds for a variable or constraint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub lower: f64,
    pub upper: f64,
}

impl Bounds {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// Free bounds: (-inf, +inf).
    pub fn free() -> Self {
        Self::new(f64::NEG_INFINITY, f64::INFINITY)
    }

    /// Equality bounds: [value, value].
    pub fn fixed(value: f64) -> Self {
        Self::new(value, value)
    }

    /// Intersect with another range, keeping the tighter side of each bound.
    pub fn intersect(self, other: Bounds) -> Self {
        Self::new(self.lower.max(other.lower), self.upper.min(other.upper))
    }

    /// True when lower <= upper.
    pub fn is_consistent(&self) -> bool {
        self.lower <= self.upper
    }
}

/// A decision variable with bounds and integrality constraint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Variable {
    pub bounds: Bounds,
    pub is_integer: bool,
}

impl Variable {
    /// Create a binary variable with bounds [0, 1] and integer constraint.
    pub fn binary() -> Self {
        Self {
            bounds: Bounds::new(0.0, 1.0),
            is_integer: true,
        }
    }

    /// Create a continuous variable with specified bounds.
    pub fn continuous(bounds: Bounds) -> Self {
        Self {
            bounds,
            is_integer: false,
        }
    }

    /// Create an integer variable with specified bounds.
    pub fn integer(bounds: Bounds) -> Self {
        Self {
            bounds,
            is_integer: true,
        }
    }
}

//! Optional standard backend features.

use crate::error::SolverError;

/// Optional capabilities a backend may turn on. Everything defaults to
/// disabled; invoking a feature-gated operation while its flag is off is
/// a contract violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    MultipleObjectives,
    MultipleSolutions,
    /// Condition-number (kappa) reporting.
    Kappa,
    FeasibilityRelaxation,
    /// MIP solution rounding.
    Rounding,
}

impl Feature {
    pub fn as_str(self) -> &'static str {
        match self {
            Feature::MultipleObjectives => "multiple_objectives",
            Feature::MultipleSolutions => "multiple_solutions",
            Feature::Kappa => "kappa",
            Feature::FeasibilityRelaxation => "feasibility_relaxation",
            Feature::Rounding => "rounding",
        }
    }
}

const ALL_FEATURES: usize = 5;

fn feature_index(feature: Feature) -> usize {
    match feature {
        Feature::MultipleObjectives => 0,
        Feature::MultipleSolutions => 1,
        Feature::Kappa => 2,
        Feature::FeasibilityRelaxation => 3,
        Feature::Rounding => 4,
    }
}

/// Fixed table of feature flags, resolved at backend construction.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureSet {
    allowed: [bool; ALL_FEATURES],
}

impl FeatureSet {
    /// All features disabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Turn one feature on.
    pub fn allow(mut self, feature: Feature) -> Self {
        self.allowed[feature_index(feature)] = true;
        self
    }

    pub fn allows(&self, feature: Feature) -> bool {
        self.allowed[feature_index(feature)]
    }

    /// Gate a feature-dependent operation: error when the flag is off.
    pub fn require(&self, feature: Feature) -> Result<(), SolverError> {
        if self.allows(feature) {
            Ok(())
        } else {
            debug_assert!(false, "feature {} invoked while disabled", feature.as_str());
            Err(SolverError::unsupported(format!(
                "feature {}",
                feature.as_str()
            )))
        }
    }
}

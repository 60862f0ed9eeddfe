//! Feasibility relaxation I/O data.
//!
//! A feasibility relaxation turns a possibly-infeasible problem into one
//! minimizing weighted bound/constraint violations. The core only builds
//! the penalty arrays and records the backend's output; the relaxation
//! itself is a backend concern.

use ponte_model::suffix::std_suffixes::{CON_RHS_PEN, VAR_LB_PEN, VAR_UB_PEN};
use ponte_model::SuffixStore;

use crate::options::StoredOptions;

/// Input/output data for one feasibility relaxation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeasRelaxSpec {
    /// 0 = off; 1..6 = relaxation variants.
    pub mode: i64,
    /// Empty vector means infinite penalties: no violation allowed.
    pub lbpen: Vec<f64>,
    pub ubpen: Vec<f64>,
    pub rhspen: Vec<f64>,
    /// Output, filled by the backend.
    pub orig_obj_available: bool,
    pub orig_obj_value: f64,
}

impl FeasRelaxSpec {
    /// Whether the backend should perform the relaxation.
    pub fn is_active(&self) -> bool {
        self.mode != 0
    }
}

/// Expand per-entity penalty overrides against a scalar default.
///
/// Empty overrides with a negative default mean "infinite penalty
/// everywhere" and collapse to an empty array. Otherwise the result has
/// one entry per entity: the override where present (negative override
/// means infinite), else the default.
pub fn fill_penalty(overrides: &[f64], default: f64, n: usize) -> Vec<f64> {
    if overrides.is_empty() && default < 0.0 {
        return Vec::new();
    }
    let fill = if default < 0.0 { f64::INFINITY } else { default };
    let mut result = vec![fill; n];
    for (slot, &pen) in result.iter_mut().zip(overrides) {
        *slot = if pen < 0.0 { f64::INFINITY } else { pen };
    }
    result
}

/// Build the relaxation spec from suffix overrides and keyword defaults.
///
/// Returns `None` when every override is empty and every default is
/// negative: nothing to relax.
pub fn build_spec(
    suffixes: &SuffixStore,
    stored: &StoredOptions,
    num_variables: usize,
    num_constraints: usize,
) -> Option<FeasRelaxSpec> {
    let suf_lbpen = suffixes.read_dbl(VAR_LB_PEN);
    let suf_ubpen = suffixes.read_dbl(VAR_UB_PEN);
    let suf_rhspen = suffixes.read_dbl(CON_RHS_PEN);
    if suf_lbpen.is_empty()
        && suf_ubpen.is_empty()
        && suf_rhspen.is_empty()
        && stored.lbpen < 0.0
        && stored.ubpen < 0.0
        && stored.rhspen < 0.0
    {
        return None;
    }
    Some(FeasRelaxSpec {
        mode: stored.feasrelax_mode,
        lbpen: fill_penalty(suf_lbpen, stored.lbpen, num_variables),
        ubpen: fill_penalty(suf_ubpen, stored.ubpen, num_variables),
        rhspen: fill_penalty(suf_rhspen, stored.rhspen, num_constraints),
        orig_obj_available: false,
        orig_obj_value: 0.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ponte_model::suffix::std_suffixes::VAR_LB_PEN;

    #[test]
    fn test_fill_empty_overrides_negative_default_is_empty() {
        let result = fill_penalty(&[], -1.0, 3);
        assert!(result.is_empty());
    }

    #[test]
    fn test_fill_overrides_beat_default() {
        let result = fill_penalty(&[-1.0, 2.0], 1.0, 3);
        assert_eq!(result, vec![f64::INFINITY, 2.0, 1.0]);
    }

    #[test]
    fn test_fill_negative_default_with_overrides_is_infinite_fill() {
        let result = fill_penalty(&[0.5], -1.0, 3);
        assert_eq!(result, vec![0.5, f64::INFINITY, f64::INFINITY]);
    }

    #[test]
    fn test_build_spec_skips_when_nothing_to_relax() {
        let suffixes = SuffixStore::new();
        let stored = StoredOptions {
            feasrelax_mode: 1,
            lbpen: -1.0,
            ubpen: -1.0,
            rhspen: -1.0,
            ..StoredOptions::default()
        };
        assert!(build_spec(&suffixes, &stored, 3, 2).is_none());
    }

    #[test]
    fn test_build_spec_fills_all_three_classes() {
        let mut suffixes = SuffixStore::new();
        suffixes.write_dbl(VAR_LB_PEN, vec![-1.0, 2.0]);
        let stored = StoredOptions {
            feasrelax_mode: 2,
            ..StoredOptions::default()
        };
        let spec = build_spec(&suffixes, &stored, 3, 2).unwrap();
        assert_eq!(spec.mode, 2);
        assert_eq!(spec.lbpen, vec![f64::INFINITY, 2.0, 1.0]);
        assert_eq!(spec.ubpen, vec![1.0, 1.0, 1.0]);
        assert_eq!(spec.rhspen, vec![1.0, 1.0]);
        assert!(spec.is_active());
        assert!(!spec.orig_obj_available);
    }
}

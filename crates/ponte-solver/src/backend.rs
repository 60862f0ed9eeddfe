//! The contract a concrete backend implements.
//!
//! The orchestrator drives the shared solve lifecycle through this
//! interface; a backend supplies only its identity, its capability and
//! feature tables, the native solve call, and the status mapping. Every
//! optional operation defaults to an `Unsupported` failure naming the
//! operation, so a backend that forgot to gate a feature fails loudly.

use ponte_convert::ConstraintSink;

use crate::error::SolverError;
use crate::feasrelax::FeasRelaxSpec;
use crate::features::FeatureSet;
use crate::interrupt::Interrupter;
use crate::options::OptionBackend;
use crate::status::SolveStatus;

pub trait Backend: ConstraintSink + OptionBackend {
    fn solver_name(&self) -> &'static str;

    fn solver_version(&self) -> &'static str {
        "1.0.0"
    }

    /// Prefix of every reported message.
    fn solver_long_name(&self) -> String {
        format!("{} {}", self.solver_name(), self.solver_version())
    }

    /// Fixed table of optional standard features, resolved at
    /// construction.
    fn features(&self) -> &FeatureSet;

    fn num_variables(&self) -> usize;
    fn num_constraints(&self) -> usize;
    fn num_objectives(&self) -> usize;
    fn is_mip(&self) -> bool;

    /// The native solve call. Must poll the interrupter cooperatively
    /// and return control when cancellation is observed.
    fn solve(&mut self, interrupter: &Interrupter) -> Result<(), SolverError>;

    /// Map the backend-native status code to the canonical taxonomy.
    /// Must yield `Interrupted` when a cancellation was requested.
    fn classify_status(&self, interrupter: &Interrupter) -> (SolveStatus, String);

    fn objective_value(&self) -> Result<f64, SolverError> {
        Err(SolverError::unsupported("Backend::objective_value"))
    }

    /// Per-objective values; `MultipleObjectives`-gated.
    fn objective_values(&self) -> Result<Vec<f64>, SolverError> {
        Err(SolverError::unsupported("Backend::objective_values"))
    }

    /// Empty when no solution is available.
    fn primal_solution(&self) -> Vec<f64> {
        Vec::new()
    }

    /// Empty when not available.
    fn dual_solution(&self) -> Vec<f64> {
        Vec::new()
    }

    fn number_of_iterations(&self) -> u64 {
        0
    }

    fn node_count(&self) -> u64 {
        0
    }

    /// Condition-number estimate; `Kappa`-gated.
    fn kappa(&self) -> Result<f64, SolverError> {
        Err(SolverError::unsupported("Backend::kappa"))
    }

    /// Extra lines the backend wants appended to the outgoing message.
    fn solver_message_extra(&self) -> &str {
        ""
    }

    // Multi-objective inputs; `MultipleObjectives`-gated.
    fn set_obj_priorities(&mut self, _priorities: &[i32]) -> Result<(), SolverError> {
        Err(SolverError::unsupported("Backend::set_obj_priorities"))
    }

    fn set_obj_weights(&mut self, _weights: &[f64]) -> Result<(), SolverError> {
        Err(SolverError::unsupported("Backend::set_obj_weights"))
    }

    fn set_obj_abs_tol(&mut self, _tolerances: &[f64]) -> Result<(), SolverError> {
        Err(SolverError::unsupported("Backend::set_obj_abs_tol"))
    }

    fn set_obj_rel_tol(&mut self, _tolerances: &[f64]) -> Result<(), SolverError> {
        Err(SolverError::unsupported("Backend::set_obj_rel_tol"))
    }

    /// Hand the relaxation penalties to the native library;
    /// `FeasibilityRelaxation`-gated.
    fn apply_feas_relax(&mut self, _spec: &FeasRelaxSpec) -> Result<(), SolverError> {
        Err(SolverError::unsupported("Backend::apply_feas_relax"))
    }

    /// Original objective value under an active relaxation, once known.
    fn feasrelax_original_objective(&self) -> Option<f64> {
        None
    }
}

/// The reporting collaborator receiving the terminal outcome of a solve
/// and any intermediate feasible solutions.
pub trait SolutionHandler {
    fn handle_solution(
        &mut self,
        status: SolveStatus,
        message: &str,
        primal: &[f64],
        dual: &[f64],
        objective: f64,
    );

    /// Intermediate (alternative) solution callback.
    fn handle_feasible_solution(&mut self, message: &str, primal: &[f64], dual: &[f64], objective: f64);
}

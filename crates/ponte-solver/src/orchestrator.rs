//! The shared solve lifecycle.
//!
//! `SolveOrchestrator` runs the phases every backend shares, strictly in
//! order: feed extra inputs, arm the timer and interrupter, call the
//! native solve, record solve time, classify the status, report suffixes
//! and the solution. Any phase failure propagates and aborts the
//! pipeline; there are no retries.

use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use ponte_model::suffix::std_suffixes::{
    OBJ_ABS_TOL, OBJ_KAPPA, OBJ_PRIORITY, OBJ_REL_TOL, OBJ_WEIGHT, PROB_KAPPA,
};
use ponte_model::SuffixStore;
use ponte_tools::PhaseProbe;

use crate::backend::{Backend, SolutionHandler};
use crate::error::SolverError;
use crate::feasrelax::{build_spec, FeasRelaxSpec};
use crate::features::Feature;
use crate::interrupt::Interrupter;
use crate::options::{OptionRegistry, OptionValue, StoredOptions};
use crate::rounding::{apply_rounding, round_solution, rounding_summary, ROUND_ASSIGN, ROUND_MODIFY_MESSAGE};
use crate::status::SolveStatus;

/// Orchestrator knobs, builder style.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrchestratorConfig {
    log_timing: bool,
}

impl OrchestratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log per-phase timing and memory growth after each solve.
    pub fn with_log_timing(mut self, log_timing: bool) -> Self {
        self.log_timing = log_timing;
        self
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct SolveStats {
    setup_time: Duration,
    solve_time: Duration,
}

/// Drives the solve lifecycle over a concrete [`Backend`].
pub struct SolveOrchestrator<B: Backend> {
    backend: B,
    config: OrchestratorConfig,
    stored: StoredOptions,
    options: OptionRegistry,
    suffixes: SuffixStore,
    interrupter: Interrupter,
    /// Per-variable integrality marks, in backend column order.
    integrality: Vec<bool>,
    status: SolveStatus,
    status_text: String,
    feasrelax: Option<FeasRelaxSpec>,
    probe: PhaseProbe,
    stats: SolveStats,
    lifecycle_started: Instant,
    solve_started: Instant,
}

impl<B: Backend> SolveOrchestrator<B> {
    pub fn new(backend: B) -> Self {
        Self::with_config(backend, OrchestratorConfig::new())
    }

    pub fn with_config(backend: B, config: OrchestratorConfig) -> Self {
        let options = OptionRegistry::with_standard_options(backend.features());
        Self {
            backend,
            config,
            stored: StoredOptions::default(),
            options,
            suffixes: SuffixStore::new(),
            interrupter: Interrupter::default(),
            integrality: Vec::new(),
            status: SolveStatus::NotChecked,
            status_text: String::new(),
            feasrelax: None,
            probe: PhaseProbe::new(),
            stats: SolveStats::default(),
            lifecycle_started: Instant::now(),
            solve_started: Instant::now(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// A clone sharing the underlying flag; hand it to signal handlers.
    pub fn interrupter(&self) -> Interrupter {
        self.interrupter.clone()
    }

    pub fn suffixes(&self) -> &SuffixStore {
        &self.suffixes
    }

    pub fn suffixes_mut(&mut self) -> &mut SuffixStore {
        &mut self.suffixes
    }

    pub fn options_mut(&mut self) -> &mut OptionRegistry {
        &mut self.options
    }

    pub fn stored_options(&self) -> &StoredOptions {
        &self.stored
    }

    /// Mark which columns are integer; consulted by MIP rounding.
    pub fn set_integrality(&mut self, integrality: Vec<bool>) {
        self.integrality = integrality;
    }

    pub fn set_option(&mut self, name: &str, value: OptionValue) -> Result<(), SolverError> {
        self.options
            .set(name, value, &mut self.stored, &mut self.backend)
    }

    pub fn get_option(&self, name: &str) -> Result<OptionValue, SolverError> {
        self.options.get(name, &self.stored, &self.backend)
    }

    /// Re-apply every recorded solver option, e.g. after the backend's
    /// native environment was rebuilt.
    pub fn replay_options(&mut self) -> Result<(), SolverError> {
        self.options.replay_all(&mut self.backend)
    }

    pub fn status(&self) -> SolveStatus {
        self.status
    }

    /// The classified status; fails while classification has not run.
    pub fn assigned_status(&self) -> Result<SolveStatus, SolverError> {
        if self.status.is_assigned() {
            Ok(self.status)
        } else {
            Err(SolverError::StatusNotAssigned)
        }
    }

    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    /// Run the whole lifecycle and report through `handler`.
    pub fn solve_and_report<H: SolutionHandler>(
        &mut self,
        handler: &mut H,
    ) -> Result<(), SolverError> {
        self.lifecycle_started = Instant::now();
        self.input_extras()?;
        self.setup_timer_and_interrupter();
        self.backend.solve(&self.interrupter)?;
        self.record_solve_time();
        self.classify_status();
        self.report_results(handler)?;
        self.log_solve_stats();
        Ok(())
    }

    fn input_extras(&mut self) -> Result<(), SolverError> {
        self.input_multiobj_extras()?;
        self.input_feasrelax_data()
    }

    fn input_multiobj_extras(&mut self) -> Result<(), SolverError> {
        if !self.backend.features().allows(Feature::MultipleObjectives) {
            return Ok(());
        }
        let priorities = self.suffixes.read_int(OBJ_PRIORITY).to_vec();
        if !priorities.is_empty() {
            self.backend.set_obj_priorities(&priorities)?;
        }
        let weights = self.suffixes.read_dbl(OBJ_WEIGHT).to_vec();
        if !weights.is_empty() {
            self.backend.set_obj_weights(&weights)?;
        }
        let abs_tol = self.suffixes.read_dbl(OBJ_ABS_TOL).to_vec();
        if !abs_tol.is_empty() {
            self.backend.set_obj_abs_tol(&abs_tol)?;
        }
        let rel_tol = self.suffixes.read_dbl(OBJ_REL_TOL).to_vec();
        if !rel_tol.is_empty() {
            self.backend.set_obj_rel_tol(&rel_tol)?;
        }
        Ok(())
    }

    fn input_feasrelax_data(&mut self) -> Result<(), SolverError> {
        if !self
            .backend
            .features()
            .allows(Feature::FeasibilityRelaxation)
        {
            return Ok(());
        }
        let any_default_negative =
            self.stored.lbpen < 0.0 || self.stored.ubpen < 0.0 || self.stored.rhspen < 0.0;
        if self.stored.feasrelax_mode == 0 && !any_default_negative {
            return Ok(());
        }
        let spec = build_spec(
            &self.suffixes,
            &self.stored,
            self.backend.num_variables(),
            self.backend.num_constraints(),
        );
        if let Some(spec) = spec {
            if spec.is_active() {
                self.backend.apply_feas_relax(&spec)?;
                debug!(
                    component = "orchestrator",
                    operation = "input_feasrelax_data",
                    mode = spec.mode,
                    "Applied feasibility relaxation"
                );
                self.feasrelax = Some(spec);
            }
        }
        Ok(())
    }

    fn setup_timer_and_interrupter(&mut self) {
        self.interrupter.reset();
        self.probe = PhaseProbe::new();
        if let Err(err) = self.probe.record("setup") {
            warn!(
                component = "orchestrator",
                operation = "setup",
                error = %err,
                "Memory snapshot failed"
            );
        }
        self.stats = SolveStats {
            setup_time: self.lifecycle_started.elapsed(),
            solve_time: Duration::default(),
        };
        self.solve_started = Instant::now();
    }

    fn record_solve_time(&mut self) {
        self.stats.solve_time = self.solve_started.elapsed();
    }

    fn classify_status(&mut self) {
        let (status, text) = self.backend.classify_status(&self.interrupter);
        debug!(
            component = "orchestrator",
            operation = "classify_status",
            status = status.as_str(),
            "Classified solve result"
        );
        self.status = status;
        self.status_text = text;
    }

    fn report_results<H: SolutionHandler>(&mut self, handler: &mut H) -> Result<(), SolverError> {
        self.report_standard_suffixes()?;
        self.report_solution(handler)
    }

    /// Fill the output suffixes the core owns; for now, kappa.
    fn report_standard_suffixes(&mut self) -> Result<(), SolverError> {
        if self.backend.features().allows(Feature::Kappa)
            && self.stored.export_kappa & 2 != 0
            && self.status.is_problem_solved()
        {
            let kappa = self.backend.kappa()?;
            self.suffixes.write_single_dbl(OBJ_KAPPA, kappa);
            self.suffixes.write_single_dbl(PROB_KAPPA, kappa);
        }
        Ok(())
    }

    fn report_solution<H: SolutionHandler>(&mut self, handler: &mut H) -> Result<(), SolverError> {
        let mut message = format!("{}: {}", self.backend.solver_long_name(), self.status_text);
        let mut objective = f64::NAN;
        if self.status.is_assigned() && self.status < SolveStatus::Infeasible {
            objective = self.append_objective_lines(&mut message)?;
        }
        if self.backend.features().allows(Feature::Kappa)
            && self.stored.export_kappa & 1 != 0
            && self.status.is_problem_solved()
        {
            message.push_str(&format!("\nkappa value: {}", self.backend.kappa()?));
        }
        let iterations = self.backend.number_of_iterations();
        if iterations != 0 {
            message.push_str(&format!("\n{} simplex iterations", iterations));
        }
        let nodes = self.backend.node_count();
        if nodes != 0 {
            message.push_str(&format!("\n{} branching nodes", nodes));
        }
        let extra = self.backend.solver_message_extra();
        if !extra.is_empty() {
            message.push('\n');
            message.push_str(extra);
        }
        let mut primal = self.backend.primal_solution();
        if self.backend.features().allows(Feature::Rounding)
            && self.stored.round != 0
            && self.backend.is_mip()
            && !primal.is_empty()
        {
            self.status = apply_rounding(
                &mut primal,
                &self.integrality,
                &self.stored,
                self.status,
                &mut message,
            );
        }
        let dual = self.backend.dual_solution();
        handler.handle_solution(self.status, &message, &primal, &dual, objective);
        Ok(())
    }

    /// Append the objective part of the message; returns the value to
    /// report (first objective in multi-objective mode).
    fn append_objective_lines(&mut self, message: &mut String) -> Result<f64, SolverError> {
        if self.backend.num_objectives() == 0 {
            return Ok(f64::NAN);
        }
        let multiobj = self.backend.features().allows(Feature::MultipleObjectives)
            && self.backend.num_objectives() > 1;
        if multiobj {
            let values = self.backend.objective_values()?;
            if values.len() != self.backend.num_objectives() {
                return Err(SolverError::Internal(format!(
                    "backend reports {} objectives but returned {} values",
                    self.backend.num_objectives(),
                    values.len()
                )));
            }
            message.push_str(&format!("; objective {}", values[0]));
            message.push_str("\nIndividual objective values:");
            for (i, value) in values.iter().enumerate() {
                message.push_str(&format!("\n\t_sobj[{}] = {}", i + 1, value));
            }
            return Ok(values[0]);
        }
        let value = self.backend.objective_value()?;
        let relaxed = self.feasrelax.as_ref().map_or(false, |s| s.is_active());
        message.push_str(&format!(
            "; {}objective {}",
            if relaxed { "feasrelax " } else { "" },
            value
        ));
        if relaxed {
            if let Some(original) = self.backend.feasrelax_original_objective() {
                message.push_str(&format!("\nOriginal objective = {}", original));
            }
        }
        Ok(value)
    }

    /// Report an intermediate feasible solution found during the solve.
    /// Gated on `MultipleSolutions`.
    pub fn report_intermediate_solution<H: SolutionHandler>(
        &mut self,
        handler: &mut H,
        objective: f64,
        mut primal: Vec<f64>,
        dual: Vec<f64>,
    ) -> Result<(), SolverError> {
        self.backend
            .features()
            .require(Feature::MultipleSolutions)?;
        let mut message = format!("{}: Alternative solution", self.backend.solver_long_name());
        if self.backend.num_objectives() > 0 {
            message.push_str(&format!("; objective {}", objective));
        }
        if self.backend.features().allows(Feature::Rounding)
            && self.stored.round != 0
            && self.backend.is_mip()
        {
            let assign = self.stored.round & ROUND_ASSIGN != 0;
            let report = round_solution(&mut primal, &self.integrality, assign);
            if report.any()
                && report.max_error > self.stored.round_reptol
                && self.stored.round & ROUND_MODIFY_MESSAGE != 0
            {
                message.push_str(&rounding_summary(report, assign));
            }
        }
        handler.handle_feasible_solution(&message, &primal, &dual, objective);
        Ok(())
    }

    fn log_solve_stats(&mut self) {
        if let Err(err) = self.probe.record("solve") {
            warn!(
                component = "orchestrator",
                operation = "report",
                error = %err,
                "Memory snapshot failed"
            );
        }
        if !self.config.log_timing {
            return;
        }
        info!(
            component = "orchestrator",
            operation = "solve",
            status = self.status.as_str(),
            setup_time_s = self.stats.setup_time.as_secs_f64(),
            solve_time_s = self.stats.solve_time.as_secs_f64(),
            memory_growth_bytes = self.probe.last_memory_growth().unwrap_or(0),
            "Solve finished"
        );
    }
}

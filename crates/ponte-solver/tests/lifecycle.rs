#![allow(clippy::float_cmp)]

use std::collections::HashMap;

use ponte_convert::{
    AcceptanceLevel, ConstraintCapabilities, ConstraintRegistry, ConstraintSink, ConversionDriver,
    FlatConverter,
};
use ponte_model::suffix::std_suffixes::{OBJ_KAPPA, OBJ_PRIORITY, PROB_KAPPA, VAR_LB_PEN};
use ponte_model::{
    Bounds, Constraint, ConstraintKind, LinearDefiningConstraint, Model, Objective, Sense,
    Variable,
};
use ponte_solver::{
    Backend, FeasRelaxSpec, Feature, FeatureSet, Interrupter, OptionBackend, OptionKey,
    OptionValue, SolutionHandler, SolveOrchestrator, SolveStatus, SolverError,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// In-memory backend standing in for a native solver library.
struct FixtureBackend {
    features: FeatureSet,
    capabilities: ConstraintCapabilities,
    constraints: Vec<Constraint>,
    options: HashMap<OptionKey, OptionValue>,
    num_objectives: usize,
    mip: bool,
    solution: Vec<f64>,
    objective: f64,
    objectives: Vec<f64>,
    iterations: u64,
    nodes: u64,
    kappa_value: f64,
    interrupt_self: bool,
    fail_solve: bool,
    solved: bool,
    priorities_in: Vec<i32>,
    feasrelax_in: Option<FeasRelaxSpec>,
    original_objective: Option<f64>,
}

impl FixtureBackend {
    fn new(features: FeatureSet) -> Self {
        Self {
            features,
            capabilities: ConstraintCapabilities::standard(),
            constraints: Vec::new(),
            options: HashMap::new(),
            num_objectives: 1,
            mip: false,
            solution: Vec::new(),
            objective: 0.0,
            objectives: Vec::new(),
            iterations: 0,
            nodes: 0,
            kappa_value: 0.0,
            interrupt_self: false,
            fail_solve: false,
            solved: false,
            priorities_in: Vec::new(),
            feasrelax_in: None,
            original_objective: None,
        }
    }
}

impl ConstraintSink for FixtureBackend {
    fn backend_name(&self) -> &'static str {
        "Fixture"
    }

    fn capabilities(&self) -> &ConstraintCapabilities {
        &self.capabilities
    }

    fn add_constraint(&mut self, constraint: &Constraint) -> Result<(), String> {
        self.constraints.push(constraint.clone());
        Ok(())
    }
}

impl OptionBackend for FixtureBackend {
    fn set_option(&mut self, key: OptionKey, value: &OptionValue) -> Result<(), String> {
        self.options.insert(key, value.clone());
        Ok(())
    }

    fn get_option(&self, key: OptionKey) -> Result<OptionValue, String> {
        self.options
            .get(&key)
            .cloned()
            .ok_or_else(|| format!("option {} never set", key.0))
    }
}

impl Backend for FixtureBackend {
    fn solver_name(&self) -> &'static str {
        "Fixture"
    }

    fn solver_version(&self) -> &'static str {
        "1.2.3"
    }

    fn features(&self) -> &FeatureSet {
        &self.features
    }

    fn num_variables(&self) -> usize {
        self.solution.len()
    }

    fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    fn num_objectives(&self) -> usize {
        self.num_objectives
    }

    fn is_mip(&self) -> bool {
        self.mip
    }

    fn solve(&mut self, interrupter: &Interrupter) -> Result<(), SolverError> {
        if self.fail_solve {
            return Err(SolverError::Backend {
                backend: "Fixture",
                message: "native solve failed".to_string(),
            });
        }
        if self.interrupt_self {
            interrupter.interrupt();
            return Ok(());
        }
        self.solved = true;
        Ok(())
    }

    fn classify_status(&self, interrupter: &Interrupter) -> (SolveStatus, String) {
        if interrupter.is_requested() {
            return (SolveStatus::Interrupted, "interrupted".to_string());
        }
        (SolveStatus::Solved, "optimal solution".to_string())
    }

    fn objective_value(&self) -> Result<f64, SolverError> {
        Ok(self.objective)
    }

    fn objective_values(&self) -> Result<Vec<f64>, SolverError> {
        Ok(self.objectives.clone())
    }

    fn primal_solution(&self) -> Vec<f64> {
        self.solution.clone()
    }

    fn number_of_iterations(&self) -> u64 {
        self.iterations
    }

    fn node_count(&self) -> u64 {
        self.nodes
    }

    fn kappa(&self) -> Result<f64, SolverError> {
        Ok(self.kappa_value)
    }

    fn set_obj_priorities(&mut self, priorities: &[i32]) -> Result<(), SolverError> {
        self.priorities_in = priorities.to_vec();
        Ok(())
    }

    fn set_obj_weights(&mut self, _weights: &[f64]) -> Result<(), SolverError> {
        Ok(())
    }

    fn apply_feas_relax(&mut self, spec: &FeasRelaxSpec) -> Result<(), SolverError> {
        self.feasrelax_in = Some(spec.clone());
        Ok(())
    }

    fn feasrelax_original_objective(&self) -> Option<f64> {
        self.original_objective
    }
}

#[derive(Default)]
struct RecordingHandler {
    status: Option<SolveStatus>,
    message: String,
    primal: Vec<f64>,
    objective: f64,
    feasible_messages: Vec<String>,
}

impl SolutionHandler for RecordingHandler {
    fn handle_solution(
        &mut self,
        status: SolveStatus,
        message: &str,
        primal: &[f64],
        _dual: &[f64],
        objective: f64,
    ) {
        self.status = Some(status);
        self.message = message.to_string();
        self.primal = primal.to_vec();
        self.objective = objective;
    }

    fn handle_feasible_solution(
        &mut self,
        message: &str,
        _primal: &[f64],
        _dual: &[f64],
        objective: f64,
    ) {
        self.feasible_messages.push(message.to_string());
        self.objective = objective;
    }
}

#[test]
fn test_solved_lp_message_and_status() {
    init_tracing();
    let mut backend = FixtureBackend::new(FeatureSet::new());
    backend.objective = 12.5;
    backend.iterations = 42;
    backend.solution = vec![1.0, 2.0];
    let mut orchestrator = SolveOrchestrator::new(backend);
    let mut handler = RecordingHandler::default();
    orchestrator
        .solve_and_report(&mut handler)
        .unwrap_or_else(|err| panic!("{}", err));

    assert_eq!(handler.status, Some(SolveStatus::Solved));
    assert_eq!(
        handler.message,
        "Fixture 1.2.3: optimal solution; objective 12.5\n42 simplex iterations"
    );
    assert_eq!(handler.primal, vec![1.0, 2.0]);
    assert_eq!(handler.objective, 12.5);
    assert!(orchestrator.status().is_problem_solved());
    assert!(orchestrator.backend().solved);
}

#[test]
fn test_interrupted_solve_has_no_objective_line() {
    let mut backend = FixtureBackend::new(FeatureSet::new());
    backend.interrupt_self = true;
    backend.objective = 12.5;
    let mut orchestrator = SolveOrchestrator::new(backend);
    let mut handler = RecordingHandler::default();
    orchestrator
        .solve_and_report(&mut handler)
        .unwrap_or_else(|err| panic!("{}", err));

    assert_eq!(handler.status, Some(SolveStatus::Interrupted));
    assert_eq!(handler.message, "Fixture 1.2.3: interrupted");
    assert!(handler.objective.is_nan());
}

#[test]
fn test_status_query_is_guarded_before_classification() {
    let backend = FixtureBackend::new(FeatureSet::new());
    let mut orchestrator = SolveOrchestrator::new(backend);
    let err = orchestrator.assigned_status().unwrap_err();
    assert_eq!(err.code(), "SOLVER_STATUS_NOT_ASSIGNED");

    let mut handler = RecordingHandler::default();
    orchestrator
        .solve_and_report(&mut handler)
        .unwrap_or_else(|err| panic!("{}", err));
    assert_eq!(orchestrator.assigned_status().unwrap(), SolveStatus::Solved);
}

#[test]
fn test_objective_count_mismatch_is_an_internal_error() {
    let mut backend = FixtureBackend::new(FeatureSet::new().allow(Feature::MultipleObjectives));
    backend.num_objectives = 2;
    backend.objectives = vec![5.0];
    let mut orchestrator = SolveOrchestrator::new(backend);
    let mut handler = RecordingHandler::default();
    let err = orchestrator.solve_and_report(&mut handler).unwrap_err();
    assert_eq!(err.code(), "SOLVER_INTERNAL");
    assert!(err.to_string().contains("2 objectives"));
}

#[test]
fn test_solve_failure_propagates() {
    let mut backend = FixtureBackend::new(FeatureSet::new());
    backend.fail_solve = true;
    let mut orchestrator = SolveOrchestrator::new(backend);
    let mut handler = RecordingHandler::default();
    let err = orchestrator.solve_and_report(&mut handler).unwrap_err();
    assert_eq!(err.code(), "SOLVER_BACKEND");
    assert!(handler.status.is_none());
}

#[test]
fn test_mip_rounding_adjusts_solution_status_and_message() {
    let mut backend = FixtureBackend::new(FeatureSet::new().allow(Feature::Rounding));
    backend.mip = true;
    backend.objective = 4.0;
    backend.nodes = 17;
    backend.solution = vec![1.4999999, 2.7, 3.0000001];
    let mut orchestrator = SolveOrchestrator::new(backend);
    orchestrator.set_integrality(vec![true, false, true]);
    orchestrator
        .set_option("mip:round", OptionValue::Int(7))
        .unwrap_or_else(|err| panic!("{}", err));
    let mut handler = RecordingHandler::default();
    orchestrator
        .solve_and_report(&mut handler)
        .unwrap_or_else(|err| panic!("{}", err));

    assert_eq!(handler.status, Some(SolveStatus::SolvedRounded));
    assert_eq!(handler.primal, vec![1.0, 2.7, 3.0]);
    assert!(handler.message.contains("17 branching nodes"));
    assert!(handler
        .message
        .contains("2 integer variables rounded to integers"));
    assert!(!orchestrator.status().is_problem_solved());
    assert!(!orchestrator.status().is_problem_inf_or_unb());
}

#[test]
fn test_kappa_message_line_and_suffixes() {
    let mut backend = FixtureBackend::new(FeatureSet::new().allow(Feature::Kappa));
    backend.objective = 1.0;
    backend.kappa_value = 7.25;
    let mut orchestrator = SolveOrchestrator::new(backend);
    orchestrator
        .set_option("alg:kappa", OptionValue::Int(3))
        .unwrap_or_else(|err| panic!("{}", err));
    let mut handler = RecordingHandler::default();
    orchestrator
        .solve_and_report(&mut handler)
        .unwrap_or_else(|err| panic!("{}", err));

    assert!(handler.message.contains("\nkappa value: 7.25"));
    assert_eq!(orchestrator.suffixes().read_dbl(OBJ_KAPPA), &[7.25]);
    assert_eq!(orchestrator.suffixes().read_dbl(PROB_KAPPA), &[7.25]);
}

#[test]
fn test_kappa_bits_are_independent() {
    let mut backend = FixtureBackend::new(FeatureSet::new().allow(Feature::Kappa));
    backend.objective = 1.0;
    backend.kappa_value = 7.25;
    let mut orchestrator = SolveOrchestrator::new(backend);
    // Bit 2 only: suffixes but no message line.
    orchestrator
        .set_option("alg:kappa", OptionValue::Int(2))
        .unwrap_or_else(|err| panic!("{}", err));
    let mut handler = RecordingHandler::default();
    orchestrator
        .solve_and_report(&mut handler)
        .unwrap_or_else(|err| panic!("{}", err));

    assert!(!handler.message.contains("kappa value"));
    assert_eq!(orchestrator.suffixes().read_dbl(OBJ_KAPPA), &[7.25]);
}

#[test]
fn test_feasibility_relaxation_inputs_and_message() {
    let mut backend =
        FixtureBackend::new(FeatureSet::new().allow(Feature::FeasibilityRelaxation));
    backend.objective = 15.0;
    backend.original_objective = Some(20.0);
    backend.solution = vec![0.0, 0.0];
    backend.constraints.push(Constraint::Linear(
        ponte_model::LinearConstraint::new(
            vec![1.0],
            vec![ponte_model::VariableId::new(0)],
            Bounds::fixed(1.0),
        ),
    ));
    let mut orchestrator = SolveOrchestrator::new(backend);
    orchestrator
        .set_option("alg:feasrelax", OptionValue::Int(1))
        .unwrap_or_else(|err| panic!("{}", err));
    orchestrator
        .suffixes_mut()
        .write_dbl(VAR_LB_PEN, vec![-1.0, 2.0]);
    let mut handler = RecordingHandler::default();
    orchestrator
        .solve_and_report(&mut handler)
        .unwrap_or_else(|err| panic!("{}", err));

    let spec = orchestrator
        .backend()
        .feasrelax_in
        .clone()
        .unwrap_or_else(|| panic!("relaxation never reached the backend"));
    assert_eq!(spec.mode, 1);
    assert_eq!(spec.lbpen, vec![f64::INFINITY, 2.0]);
    assert_eq!(spec.ubpen, vec![1.0, 1.0]);
    assert_eq!(spec.rhspen, vec![1.0]);
    assert!(handler.message.contains("feasrelax objective 15"));
    assert!(handler.message.contains("\nOriginal objective = 20"));
}

#[test]
fn test_multiobjective_inputs_and_sobj_lines() {
    let mut backend = FixtureBackend::new(FeatureSet::new().allow(Feature::MultipleObjectives));
    backend.num_objectives = 2;
    backend.objectives = vec![5.0, 7.5];
    let mut orchestrator = SolveOrchestrator::new(backend);
    orchestrator
        .suffixes_mut()
        .write_int(OBJ_PRIORITY, vec![2, 1]);
    let mut handler = RecordingHandler::default();
    orchestrator
        .solve_and_report(&mut handler)
        .unwrap_or_else(|err| panic!("{}", err));

    assert_eq!(orchestrator.backend().priorities_in, vec![2, 1]);
    assert!(handler.message.contains("; objective 5"));
    assert!(handler.message.contains("Individual objective values:"));
    assert!(handler.message.contains("\n\t_sobj[1] = 5"));
    assert!(handler.message.contains("\n\t_sobj[2] = 7.5"));
    assert_eq!(handler.objective, 5.0);
}

#[test]
fn test_intermediate_solution_reporting() {
    let backend = FixtureBackend::new(FeatureSet::new().allow(Feature::MultipleSolutions));
    let mut orchestrator = SolveOrchestrator::new(backend);
    let mut handler = RecordingHandler::default();
    orchestrator
        .report_intermediate_solution(&mut handler, 3.5, vec![1.0, 2.0], vec![])
        .unwrap_or_else(|err| panic!("{}", err));

    assert_eq!(handler.feasible_messages.len(), 1);
    assert_eq!(
        handler.feasible_messages[0],
        "Fixture 1.2.3: Alternative solution; objective 3.5"
    );
}

#[test]
fn test_solver_option_replay_restores_backend_state() {
    let backend = FixtureBackend::new(FeatureSet::new());
    let mut orchestrator = SolveOrchestrator::new(backend);
    orchestrator.options_mut().add_solver_option(
        vec!["tech:threads", "threads"],
        "Thread count.",
        OptionKey("threads"),
    );
    orchestrator
        .set_option("threads", OptionValue::Int(4))
        .unwrap_or_else(|err| panic!("{}", err));

    // Environment rebuilt from scratch: native options are lost.
    orchestrator.backend_mut().options.clear();
    assert!(orchestrator.get_option("threads").is_err());

    orchestrator
        .replay_options()
        .unwrap_or_else(|err| panic!("{}", err));
    assert_eq!(
        orchestrator.get_option("threads").unwrap(),
        OptionValue::Int(4)
    );
}

/// Full pipeline: a defining constraint is rewritten to linear form by
/// the conversion driver, ingested by the backend, then solved.
#[test]
fn test_conversion_feeds_the_backend() {
    init_tracing();
    let mut model = Model::new();
    let x = model.add_variable(Variable::continuous(Bounds::new(0.0, 10.0)));
    let y = model.add_variable(Variable::continuous(Bounds::new(0.0, 10.0)));
    let r = model.add_variable(Variable::continuous(Bounds::free()));
    model.add_objective(Objective::new(Sense::Minimize, vec![(x, 2.0), (y, 3.0)]));

    let mut registry = ConstraintRegistry::new();
    registry.register(Constraint::LinearDefining(LinearDefiningConstraint {
        result_var: r,
        coefs: vec![2.0, 3.0],
        vars: vec![x, y],
        constant: 0.0,
    }));

    let mut backend = FixtureBackend::new(FeatureSet::new());
    backend.objective = 6.0;
    backend.num_objectives = model.num_objectives();
    let mut converter = FlatConverter::new();
    ConversionDriver::new()
        .run(&mut registry, &mut converter, &mut backend, &mut model)
        .unwrap_or_else(|err| panic!("{}", err));

    assert_eq!(backend.constraints.len(), 1);
    assert_eq!(backend.constraints[0].kind(), ConstraintKind::Linear);
    assert_eq!(
        backend.capabilities().acceptance(ConstraintKind::Linear),
        AcceptanceLevel::Recommended
    );

    let mut orchestrator = SolveOrchestrator::new(backend);
    let mut handler = RecordingHandler::default();
    orchestrator
        .solve_and_report(&mut handler)
        .unwrap_or_else(|err| panic!("{}", err));
    assert_eq!(handler.status, Some(SolveStatus::Solved));
    assert!(handler.message.starts_with("Fixture 1.2.3: optimal solution"));
}

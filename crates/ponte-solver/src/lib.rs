//! Solve lifecycle shared by all Ponte backends.
//!
//! A backend implements the [`Backend`] contract (identity, feature
//! table, native solve, status mapping); the [`SolveOrchestrator`] runs
//! the common pipeline around it: extra inputs, timing, interruption,
//! status classification, suffix and solution reporting. Options,
//! feasibility relaxation and MIP rounding live here too.

pub mod backend;
pub mod error;
pub mod feasrelax;
pub mod features;
pub mod interrupt;
pub mod options;
pub mod orchestrator;
pub mod rounding;
pub mod status;

pub use backend::{Backend, SolutionHandler};
pub use error::SolverError;
pub use feasrelax::{build_spec, fill_penalty, FeasRelaxSpec};
pub use features::{Feature, FeatureSet};
pub use interrupt::Interrupter;
pub use options::{
    OptionBackend, OptionKey, OptionRegistry, OptionValue, StoredOptionId, StoredOptions,
};
pub use orchestrator::{OrchestratorConfig, SolveOrchestrator};
pub use rounding::{
    apply_rounding, round_solution, rounding_summary, RoundingReport, ROUND_ASSIGN,
    ROUND_MODIFY_MESSAGE, ROUND_MODIFY_STATUS,
};
pub use status::SolveStatus;

pub mod run_action;

pub use run_action::{
    Action, ActionReport, OutcomeStatus, ProjectOutcome, RunActionConfig, RunActionUseCase,
};

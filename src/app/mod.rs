mod output;
mod runner;


pub(crate) use output::print_outcomes;
pub(crate) use runner::{RequestPlan, TargetOutcome, execute_plan, run_spec};

//! Application services for the deal pipeline.

mod gate;
mod transition;

pub use gate::{GateDecision, GateEvaluationError, GateEvaluator};
pub use transition::{TransitionError, TransitionService};

mod plan;
mod service;

// Public API of the selection subsystem.
pub use crate::error::SelectionError;
pub use plan::{SelectionBuilder, SelectionPlan, fisher_yates_shuffle};
pub use service::QuestionSelector;

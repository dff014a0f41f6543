#![forbid(unsafe_code)]

pub mod entropy;
pub mod error;
pub mod selection;

pub use entropy::Entropy;
pub use error::SelectionError;
pub use selection::{QuestionSelector, SelectionBuilder, SelectionPlan, fisher_yates_shuffle};

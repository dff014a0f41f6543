mod ids;
mod question;
mod request;

pub use ids::{ParseIdError, QuestionId, TopicId, UserId};

pub use question::{AttemptRecord, Difficulty, Question, QuestionError};
pub use request::{RequestError, SelectionInput, SelectionRequest, TierCounts};

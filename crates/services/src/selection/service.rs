use std::sync::Arc;

use quiz_core::model::{QuestionId, SelectionInput, SelectionRequest};
use storage::repository::{AttemptRepository, QuestionRepository, Storage};
use tracing::{debug, info};

use super::plan::{SelectionBuilder, SelectionPlan};
use crate::Entropy;
use crate::error::SelectionError;

/// Picks unattempted questions for a user from a topic's question bank.
///
/// Holds no per-call state; one instance can serve concurrent invocations.
#[derive(Clone)]
pub struct QuestionSelector {
    entropy: Entropy,
    questions: Arc<dyn QuestionRepository>,
    attempts: Arc<dyn AttemptRepository>,
}

impl QuestionSelector {
    #[must_use]
    pub fn new(
        entropy: Entropy,
        questions: Arc<dyn QuestionRepository>,
        attempts: Arc<dyn AttemptRepository>,
    ) -> Self {
        Self {
            entropy,
            questions,
            attempts,
        }
    }

    #[must_use]
    pub fn from_storage(entropy: Entropy, storage: &Storage) -> Self {
        Self::new(
            entropy,
            Arc::clone(&storage.questions),
            Arc::clone(&storage.attempts),
        )
    }

    /// Validate a raw invocation payload and select questions for it.
    ///
    /// # Errors
    ///
    /// Returns `SelectionError::InvalidRequest` for malformed input, or
    /// `SelectionError::SourceUnavailable` when either source fails.
    pub async fn select_from_input(
        &self,
        input: SelectionInput,
    ) -> Result<Vec<QuestionId>, SelectionError> {
        let request = input.into_request()?;
        self.select_questions(&request).await
    }

    /// Select question ids for the request, in shuffled order.
    ///
    /// # Errors
    ///
    /// Returns `SelectionError::SourceUnavailable` when either source fails.
    pub async fn select_questions(
        &self,
        request: &SelectionRequest,
    ) -> Result<Vec<QuestionId>, SelectionError> {
        Ok(self.plan(request).await?.into_ids())
    }

    /// Fetch both sources concurrently and build the selection plan.
    ///
    /// # Errors
    ///
    /// Returns `SelectionError::SourceUnavailable` when either source fails.
    pub async fn plan(&self, request: &SelectionRequest) -> Result<SelectionPlan, SelectionError> {
        let (questions, attempted) = tokio::try_join!(
            self.questions.questions_by_topic(&request.topic_id),
            self.attempts.attempted_question_ids(&request.user_id),
        )?;
        debug!(
            user = %request.user_id,
            topic = %request.topic_id,
            questions = questions.len(),
            attempted = attempted.len(),
            "fetched selection sources"
        );

        let mut rng = self.entropy.rng();
        let plan = SelectionBuilder::new(request.counts).build(&questions, &attempted, &mut rng);

        info!(
            user = %request.user_id,
            topic = %request.topic_id,
            requested = request.counts.total(),
            easy = plan.easy_picked,
            medium = plan.medium_picked,
            hard = plan.hard_picked,
            excluded = plan.excluded,
            selected = plan.total(),
            "selected questions"
        );
        Ok(plan)
    }
}

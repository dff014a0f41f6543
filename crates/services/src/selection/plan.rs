use rand::Rng;
use std::collections::HashSet;

use quiz_core::model::{Difficulty, Question, QuestionId, TierCounts};

/// Outcome of one selection, before projection to ids.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionPlan {
    pub questions: Vec<Question>,
    pub easy_picked: usize,
    pub medium_picked: usize,
    pub hard_picked: usize,
    pub excluded: usize,
}

impl SelectionPlan {
    /// Number of questions in the final selection.
    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Project the selection onto question ids, keeping shuffle order.
    #[must_use]
    pub fn into_ids(self) -> Vec<QuestionId> {
        self.questions.into_iter().map(Question::into_id).collect()
    }
}

/// Uniform in-place permutation (Fisher–Yates, descending index).
pub fn fisher_yates_shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

/// Builds a selection from a topic's questions and a user's answer history.
pub struct SelectionBuilder {
    counts: TierCounts,
}

impl SelectionBuilder {
    #[must_use]
    pub fn new(counts: TierCounts) -> Self {
        Self { counts }
    }

    /// Build a selection plan from source-provided data.
    ///
    /// - Each tier keeps the first `count[tier]` questions in source order; short tiers
    ///   are not backfilled from other tiers.
    /// - Attempted questions are removed after the tier picks, so an attempted pick is
    ///   not replaced by a later question of the same tier.
    /// - The remaining pool is shuffled and cut to the requested total.
    ///
    /// Duplicate entries from the source are kept as-is.
    pub fn build<R: Rng + ?Sized>(
        self,
        questions: &[Question],
        attempted: &HashSet<QuestionId>,
        rng: &mut R,
    ) -> SelectionPlan {
        let mut picked = [0usize; 3];
        let mut pool: Vec<Question> = Vec::new();

        for (slot, tier) in Difficulty::ALL.into_iter().enumerate() {
            let take = usize::try_from(self.counts.for_tier(tier)).unwrap_or(usize::MAX);
            let before = pool.len();
            pool.extend(
                questions
                    .iter()
                    .filter(|q| q.difficulty() == tier)
                    .take(take)
                    .cloned(),
            );
            picked[slot] = pool.len() - before;
        }

        let candidates = pool.len();
        pool.retain(|q| !attempted.contains(q.id()));
        let excluded = candidates - pool.len();

        fisher_yates_shuffle(&mut pool, rng);
        pool.truncate(self.counts.total());

        SelectionPlan {
            questions: pool,
            easy_picked: picked[0],
            medium_picked: picked[1],
            hard_picked: picked[2],
            excluded,
        }
    }
}

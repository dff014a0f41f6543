//! Bulk loading of questions and attempt history from a JSON document.

use quiz_core::model::{AttemptRecord, Question};
use serde::Deserialize;

use crate::repository::{Storage, StorageError};

/// Seed document: `{ "questions": [...], "attempts": [...] }`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedFixture {
    #[serde(default)]
    pub questions: Vec<Question>,
    #[serde(default)]
    pub attempts: Vec<AttemptRecord>,
}

/// Counts of rows written by [`Storage::seed`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub questions: usize,
    pub attempts: usize,
}

impl Storage {
    /// Upsert every question and append every attempt from the fixture.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on the first write that fails; earlier writes are kept.
    pub async fn seed(&self, fixture: &SeedFixture) -> Result<SeedReport, StorageError> {
        for question in &fixture.questions {
            self.questions.upsert_question(question).await?;
        }
        for attempt in &fixture.attempts {
            self.attempts.record_attempt(attempt).await?;
        }
        Ok(SeedReport {
            questions: fixture.questions.len(),
            attempts: fixture.attempts.len(),
        })
    }
}

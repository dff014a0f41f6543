use async_trait::async_trait;
use quiz_core::model::{AttemptRecord, Question, QuestionId, TopicId, UserId};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Read contract for the question bank.
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// Fetch every question tagged with the topic, in bank order.
    ///
    /// Implementations must return the complete set; callers never page.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the bank cannot be read.
    async fn questions_by_topic(&self, topic_id: &TopicId) -> Result<Vec<Question>, StorageError>;

    /// Persist or update a question.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the question cannot be stored.
    async fn upsert_question(&self, question: &Question) -> Result<(), StorageError>;
}

/// Read contract for a user's answer history.
#[async_trait]
pub trait AttemptRepository: Send + Sync {
    /// Fetch the ids of every question the user has answered, across all topics.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the history cannot be read.
    async fn attempted_question_ids(
        &self,
        user_id: &UserId,
    ) -> Result<HashSet<QuestionId>, StorageError>;

    /// Append an attempt to the history.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the attempt cannot be stored.
    async fn record_attempt(&self, attempt: &AttemptRecord) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    questions: Arc<Mutex<Vec<Question>>>,
    attempts: Arc<Mutex<Vec<AttemptRecord>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a repository pre-populated with questions and attempts.
    #[must_use]
    pub fn with_data(questions: Vec<Question>, attempts: Vec<AttemptRecord>) -> Self {
        Self {
            questions: Arc::new(Mutex::new(questions)),
            attempts: Arc::new(Mutex::new(attempts)),
        }
    }
}

#[async_trait]
impl QuestionRepository for InMemoryRepository {
    async fn questions_by_topic(&self, topic_id: &TopicId) -> Result<Vec<Question>, StorageError> {
        let guard = self
            .questions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard
            .iter()
            .filter(|q| q.topic_id() == topic_id)
            .cloned()
            .collect())
    }

    async fn upsert_question(&self, question: &Question) -> Result<(), StorageError> {
        let mut guard = self
            .questions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        match guard.iter_mut().find(|q| q.id() == question.id()) {
            Some(existing) => *existing = question.clone(),
            None => guard.push(question.clone()),
        }
        Ok(())
    }
}

#[async_trait]
impl AttemptRepository for InMemoryRepository {
    async fn attempted_question_ids(
        &self,
        user_id: &UserId,
    ) -> Result<HashSet<QuestionId>, StorageError> {
        let guard = self
            .attempts
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard
            .iter()
            .filter(|a| &a.user_id == user_id)
            .map(|a| a.question_id.clone())
            .collect())
    }

    async fn record_attempt(&self, attempt: &AttemptRecord) -> Result<(), StorageError> {
        let mut guard = self
            .attempts
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.push(attempt.clone());
        Ok(())
    }
}

/// Aggregates question and attempt repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub questions: Arc<dyn QuestionRepository>,
    pub attempts: Arc<dyn AttemptRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let questions: Arc<dyn QuestionRepository> = Arc::new(repo.clone());
        let attempts: Arc<dyn AttemptRepository> = Arc::new(repo);
        Self {
            questions,
            attempts,
        }
    }
}

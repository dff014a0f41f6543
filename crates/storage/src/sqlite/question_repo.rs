use quiz_core::model::{Question, TopicId};

use super::{SqliteRepository, mapping::map_question_row};
use crate::repository::{QuestionRepository, StorageError};

#[async_trait::async_trait]
impl QuestionRepository for SqliteRepository {
    async fn questions_by_topic(&self, topic_id: &TopicId) -> Result<Vec<Question>, StorageError> {
        // rowid order keeps first-N tier picks stable across calls.
        let rows = sqlx::query(
            r"
            SELECT question_id, topic_id, difficulty
            FROM questions
            WHERE topic_id = ?1
            ORDER BY rowid ASC
            ",
        )
        .bind(topic_id.as_str().to_owned())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut questions = Vec::with_capacity(rows.len());
        for row in rows {
            questions.push(map_question_row(&row)?);
        }
        tracing::debug!(topic = %topic_id, count = questions.len(), "loaded topic questions");
        Ok(questions)
    }

    async fn upsert_question(&self, question: &Question) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO questions (question_id, topic_id, difficulty)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(question_id) DO UPDATE SET
                topic_id = excluded.topic_id,
                difficulty = excluded.difficulty
            ",
        )
        .bind(question.id().as_str().to_owned())
        .bind(question.topic_id().as_str().to_owned())
        .bind(question.difficulty().as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(())
    }
}

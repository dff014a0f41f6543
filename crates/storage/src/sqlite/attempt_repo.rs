use std::collections::HashSet;

use quiz_core::model::{AttemptRecord, QuestionId, UserId};

use super::{SqliteRepository, mapping::map_question_id_row};
use crate::repository::{AttemptRepository, StorageError};

#[async_trait::async_trait]
impl AttemptRepository for SqliteRepository {
    async fn attempted_question_ids(
        &self,
        user_id: &UserId,
    ) -> Result<HashSet<QuestionId>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT DISTINCT question_id
            FROM attempts
            WHERE user_id = ?1
            ",
        )
        .bind(user_id.as_str().to_owned())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut ids = HashSet::with_capacity(rows.len());
        for row in rows {
            ids.insert(map_question_id_row(&row)?);
        }
        tracing::debug!(user = %user_id, count = ids.len(), "loaded attempted question ids");
        Ok(ids)
    }

    async fn record_attempt(&self, attempt: &AttemptRecord) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO attempts (user_id, question_id)
            VALUES (?1, ?2)
            ",
        )
        .bind(attempt.user_id.as_str().to_owned())
        .bind(attempt.question_id.as_str().to_owned())
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(())
    }
}

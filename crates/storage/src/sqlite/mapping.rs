use quiz_core::model::{Difficulty, Question, QuestionId, TopicId};
use sqlx::Row;

use crate::repository::StorageError;

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn parse_difficulty(s: &str) -> Result<Difficulty, StorageError> {
    s.parse::<Difficulty>().map_err(ser)
}

pub(crate) fn map_question_row(row: &sqlx::sqlite::SqliteRow) -> Result<Question, StorageError> {
    let difficulty: String = row.try_get("difficulty").map_err(ser)?;
    Ok(Question::new(
        QuestionId::new(row.try_get::<String, _>("question_id").map_err(ser)?),
        TopicId::new(row.try_get::<String, _>("topic_id").map_err(ser)?),
        parse_difficulty(&difficulty)?,
    ))
}

pub(crate) fn map_question_id_row(
    row: &sqlx::sqlite::SqliteRow,
) -> Result<QuestionId, StorageError> {
    Ok(QuestionId::new(
        row.try_get::<String, _>("question_id").map_err(ser)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unknown_difficulty() {
        let err = parse_difficulty("Impossible").unwrap_err();
        assert!(matches!(err, StorageError::Serialization(msg) if msg.contains("Impossible")));
    }
}

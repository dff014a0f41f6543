use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{QuestionId, TopicId, UserId};

//
// ─── DIFFICULTY ────────────────────────────────────────────────────────────────
//

/// Difficulty tier of a question.
///
/// The string forms (`"Easy"`, `"Medium"`, `"Hard"`) are the values stored in the
/// question bank and are case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Tiers in selection order.
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = QuestionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Easy" => Ok(Difficulty::Easy),
            "Medium" => Ok(Difficulty::Medium),
            "Hard" => Ok(Difficulty::Hard),
            other => Err(QuestionError::UnknownDifficulty(other.to_owned())),
        }
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("unknown difficulty: {0}")]
    UnknownDifficulty(String),
}

/// A question as returned by the question bank. Never mutated by selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    question_id: QuestionId,
    topic_id: TopicId,
    difficulty: Difficulty,
}

impl Question {
    #[must_use]
    pub fn new(question_id: QuestionId, topic_id: TopicId, difficulty: Difficulty) -> Self {
        Self {
            question_id,
            topic_id,
            difficulty,
        }
    }

    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.question_id
    }

    #[must_use]
    pub fn topic_id(&self) -> &TopicId {
        &self.topic_id
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn into_id(self) -> QuestionId {
        self.question_id
    }
}

/// A user's answer to a question. Only the question id matters for selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptRecord {
    pub user_id: UserId,
    #[serde(alias = "qId")]
    pub question_id: QuestionId,
}

impl AttemptRecord {
    #[must_use]
    pub fn new(user_id: UserId, question_id: QuestionId) -> Self {
        Self {
            user_id,
            question_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_parses_stored_names_only() {
        for tier in Difficulty::ALL {
            assert_eq!(tier.as_str().parse::<Difficulty>().unwrap(), tier);
        }
        assert_eq!(
            "easy".parse::<Difficulty>(),
            Err(QuestionError::UnknownDifficulty("easy".into()))
        );
    }

    #[test]
    fn question_deserializes_from_bank_item() {
        let q: Question = serde_json::from_str(
            r#"{"questionId":"E1","topicId":"algebra","difficulty":"Easy"}"#,
        )
        .unwrap();
        assert_eq!(q.id(), &QuestionId::new("E1"));
        assert_eq!(q.topic_id(), &TopicId::new("algebra"));
        assert_eq!(q.difficulty(), Difficulty::Easy);
    }

    #[test]
    fn attempt_accepts_legacy_qid_field() {
        let a: AttemptRecord = serde_json::from_str(r#"{"userId":"u1","qId":"E1"}"#).unwrap();
        assert_eq!(a.question_id, QuestionId::new("E1"));
        assert_eq!(a.user_id, UserId::new("u1"));
    }
}

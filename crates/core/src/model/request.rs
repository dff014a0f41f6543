use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{TopicId, UserId};
use crate::model::question::Difficulty;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RequestError {
    #[error("userId is required")]
    MissingUserId,
    #[error("topicId is required")]
    MissingTopicId,
    #[error("{tier} question count must not be negative (got {value})")]
    NegativeCount { tier: Difficulty, value: i64 },
    #[error("{tier} question count is too large (got {value})")]
    CountTooLarge { tier: Difficulty, value: i64 },
    #[error("malformed request: {0}")]
    Malformed(String),
}

//
// ─── TIER COUNTS ───────────────────────────────────────────────────────────────
//

/// Requested number of questions per difficulty tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierCounts {
    pub easy: u32,
    pub medium: u32,
    pub hard: u32,
}

impl TierCounts {
    #[must_use]
    pub fn new(easy: u32, medium: u32, hard: u32) -> Self {
        Self { easy, medium, hard }
    }

    #[must_use]
    pub fn for_tier(&self, tier: Difficulty) -> u32 {
        match tier {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }

    /// Upper bound on the number of selected questions.
    #[must_use]
    pub fn total(&self) -> usize {
        Difficulty::ALL
            .iter()
            .map(|tier| usize::try_from(self.for_tier(*tier)).unwrap_or(usize::MAX))
            .fold(0usize, usize::saturating_add)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

//
// ─── SELECTION REQUEST ─────────────────────────────────────────────────────────
//

/// Validated request to select questions for a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionRequest {
    pub user_id: UserId,
    pub topic_id: TopicId,
    pub counts: TierCounts,
}

impl SelectionRequest {
    #[must_use]
    pub fn new(user_id: UserId, topic_id: TopicId, counts: TierCounts) -> Self {
        Self {
            user_id,
            topic_id,
            counts,
        }
    }
}

/// Invocation payload as it arrives on the wire.
///
/// Every field is optional here; [`SelectionInput::into_request`] enforces presence
/// of the identifiers and defaults missing counts to zero. The hard-count key keeps
/// its historical `numberofHardQuestions` spelling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionInput {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub topic_id: Option<String>,
    #[serde(default)]
    pub number_of_easy_questions: Option<i64>,
    #[serde(default)]
    pub number_of_medium_questions: Option<i64>,
    #[serde(
        default,
        rename = "numberofHardQuestions",
        alias = "numberOfHardQuestions"
    )]
    pub number_of_hard_questions: Option<i64>,
}

impl SelectionInput {
    /// Parse an invocation payload.
    ///
    /// # Errors
    ///
    /// Returns `RequestError::Malformed` when the payload is not a JSON object of the
    /// expected shape (for example a fractional or string count).
    pub fn from_json(raw: &str) -> Result<Self, RequestError> {
        serde_json::from_str(raw).map_err(|e| RequestError::Malformed(e.to_string()))
    }

    /// Validate the payload and turn it into a [`SelectionRequest`].
    ///
    /// # Errors
    ///
    /// Returns `RequestError` for blank identifiers or out-of-range counts.
    pub fn into_request(self) -> Result<SelectionRequest, RequestError> {
        let user_id = self
            .user_id
            .as_deref()
            .and_then(|raw| raw.parse::<UserId>().ok())
            .ok_or(RequestError::MissingUserId)?;
        let topic_id = self
            .topic_id
            .as_deref()
            .and_then(|raw| raw.parse::<TopicId>().ok())
            .ok_or(RequestError::MissingTopicId)?;

        let counts = TierCounts::new(
            count(Difficulty::Easy, self.number_of_easy_questions)?,
            count(Difficulty::Medium, self.number_of_medium_questions)?,
            count(Difficulty::Hard, self.number_of_hard_questions)?,
        );

        Ok(SelectionRequest::new(user_id, topic_id, counts))
    }
}

impl TryFrom<SelectionInput> for SelectionRequest {
    type Error = RequestError;

    fn try_from(input: SelectionInput) -> Result<Self, Self::Error> {
        input.into_request()
    }
}

fn count(tier: Difficulty, raw: Option<i64>) -> Result<u32, RequestError> {
    let value = raw.unwrap_or(0);
    if value < 0 {
        return Err(RequestError::NegativeCount { tier, value });
    }
    u32::try_from(value).map_err(|_| RequestError::CountTooLarge { tier, value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_payload() {
        let input = SelectionInput::from_json(
            r#"{
                "userId": "u1",
                "topicId": "algebra",
                "numberOfEasyQuestions": 2,
                "numberOfMediumQuestions": 1,
                "numberofHardQuestions": 3
            }"#,
        )
        .unwrap();
        let request = input.into_request().unwrap();
        assert_eq!(request.user_id, UserId::new("u1"));
        assert_eq!(request.topic_id, TopicId::new("algebra"));
        assert_eq!(request.counts, TierCounts::new(2, 1, 3));
        assert_eq!(request.counts.total(), 6);
    }

    #[test]
    fn missing_counts_default_to_zero() {
        let request = SelectionInput::from_json(r#"{"userId":"u1","topicId":"t1"}"#)
            .unwrap()
            .into_request()
            .unwrap();
        assert_eq!(request.counts, TierCounts::default());
        assert!(request.counts.is_empty());
    }

    #[test]
    fn null_counts_default_to_zero() {
        let request = SelectionInput::from_json(
            r#"{"userId":"u1","topicId":"t1","numberOfEasyQuestions":null}"#,
        )
        .unwrap()
        .into_request()
        .unwrap();
        assert_eq!(request.counts.easy, 0);
    }

    #[test]
    fn accepts_camel_case_hard_alias() {
        let request = SelectionInput::from_json(
            r#"{"userId":"u1","topicId":"t1","numberOfHardQuestions":4}"#,
        )
        .unwrap()
        .into_request()
        .unwrap();
        assert_eq!(request.counts.hard, 4);
    }

    #[test]
    fn rejects_negative_count() {
        let err = SelectionInput::from_json(
            r#"{"userId":"u1","topicId":"t1","numberOfMediumQuestions":-1}"#,
        )
        .unwrap()
        .into_request()
        .unwrap_err();
        assert_eq!(
            err,
            RequestError::NegativeCount {
                tier: Difficulty::Medium,
                value: -1
            }
        );
    }

    #[test]
    fn rejects_oversized_count() {
        let input = SelectionInput {
            user_id: Some("u1".into()),
            topic_id: Some("t1".into()),
            number_of_easy_questions: Some(i64::from(u32::MAX) + 1),
            ..SelectionInput::default()
        };
        assert!(matches!(
            input.into_request(),
            Err(RequestError::CountTooLarge {
                tier: Difficulty::Easy,
                ..
            })
        ));
    }

    #[test]
    fn rejects_missing_or_blank_ids() {
        let missing_user = SelectionInput::from_json(r#"{"topicId":"t1"}"#)
            .unwrap()
            .into_request();
        assert_eq!(missing_user, Err(RequestError::MissingUserId));

        let blank_topic = SelectionInput::from_json(r#"{"userId":"u1","topicId":"  "}"#)
            .unwrap()
            .into_request();
        assert_eq!(blank_topic, Err(RequestError::MissingTopicId));
    }

    #[test]
    fn rejects_fractional_count_as_malformed() {
        let err = SelectionInput::from_json(
            r#"{"userId":"u1","topicId":"t1","numberOfEasyQuestions":1.5}"#,
        )
        .unwrap_err();
        assert!(matches!(err, RequestError::Malformed(_)));
    }

    #[test]
    fn total_saturates_instead_of_overflowing() {
        let counts = TierCounts::new(u32::MAX, u32::MAX, u32::MAX);
        assert!(counts.total() >= usize::try_from(u32::MAX).unwrap());
    }
}

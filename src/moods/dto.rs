use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::moods::repo::MoodEntry;

pub const SCORE_MIN: i16 = 1;
pub const SCORE_MAX: i16 = 5;

pub fn score_in_range(score: i16) -> bool {
    (SCORE_MIN..=SCORE_MAX).contains(&score)
}

/// POST body for a new entry. `date` is the caller-asserted event time,
/// not the record's creation time.
#[derive(Debug, Deserialize)]
pub struct NewMoodRequest {
    pub score: i16,
    #[serde(default)]
    pub description: String,
    pub emotions: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
}

/// PUT body: the entry id plus only the fields to change.
#[derive(Debug, Deserialize)]
pub struct UpdateMoodRequest {
    pub id: i64,
    pub score: Option<i16>,
    pub description: Option<String>,
    pub emotions: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub date: Option<OffsetDateTime>,
}

/// DELETE body.
#[derive(Debug, Deserialize)]
pub struct DeleteMoodRequest {
    pub id: i64,
}

#[derive(Debug, Serialize)]
pub struct MoodResponse {
    pub id: i64,
    pub score: i16,
    pub description: String,
    pub emotions: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<MoodEntry> for MoodResponse {
    fn from(m: MoodEntry) -> Self {
        Self {
            id: m.id,
            score: m.score,
            description: m.description,
            emotions: m.emotions,
            date: m.date,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_bounds() {
        assert!(!score_in_range(0));
        assert!(score_in_range(1));
        assert!(score_in_range(3));
        assert!(score_in_range(5));
        assert!(!score_in_range(6));
        assert!(!score_in_range(-2));
    }

    #[test]
    fn new_mood_defaults_description() {
        let req: NewMoodRequest = serde_json::from_str(
            r#"{"score":4,"date":"2025-06-01T20:15:00Z"}"#,
        )
        .unwrap();
        assert_eq!(req.score, 4);
        assert_eq!(req.description, "");
        assert!(req.emotions.is_none());
    }

    #[test]
    fn update_mood_absent_fields_are_none() {
        let req: UpdateMoodRequest = serde_json::from_str(r#"{"id":12}"#).unwrap();
        assert_eq!(req.id, 12);
        assert!(req.score.is_none());
        assert!(req.description.is_none());
        assert!(req.emotions.is_none());
        assert!(req.date.is_none());

        let req: UpdateMoodRequest =
            serde_json::from_str(r#"{"id":12,"score":2,"date":"2025-06-02T08:00:00Z"}"#).unwrap();
        assert_eq!(req.score, Some(2));
        assert!(req.date.is_some());
    }

    #[test]
    fn mood_response_uses_rfc3339_dates() {
        let response = MoodResponse {
            id: 1,
            score: 5,
            description: "good day".into(),
            emotions: Some("calm".into()),
            date: OffsetDateTime::UNIX_EPOCH,
            created_at: OffsetDateTime::UNIX_EPOCH,
            updated_at: OffsetDateTime::UNIX_EPOCH,
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("1970-01-01T00:00:00Z"));
        assert!(json.contains("good day"));
    }
}

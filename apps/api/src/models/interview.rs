#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// Interview lifecycle status. Transitions are strictly monotonic:
/// `pending` → `in_progress` → `completed`. There is no failure state —
/// a failed call placement surfaces as an error and leaves the interview
/// `pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "interview_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum InterviewStatus {
    Pending,
    InProgress,
    Completed,
}

impl InterviewStatus {
    /// Whether moving from `self` to `next` respects the monotonic order.
    pub fn can_advance_to(self, next: InterviewStatus) -> bool {
        matches!(
            (self, next),
            (InterviewStatus::Pending, InterviewStatus::InProgress)
                | (InterviewStatus::InProgress, InterviewStatus::Completed)
        )
    }

    pub fn is_terminal(self) -> bool {
        self == InterviewStatus::Completed
    }
}

/// A single scored answer. One per question index, immutable once written.
/// Scoring happens before the answer is persisted, so `score` and `rationale`
/// are always present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    pub q_idx: u32,
    pub question: String,
    pub recording_url: String,
    /// Object-store key of the archived recording (live mode only).
    pub recording_key: Option<String>,
    pub transcript: String,
    /// 1–5 integer scale.
    pub score: u8,
    pub rationale: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InterviewRow {
    pub id: Uuid,
    pub job_id: Uuid,
    pub candidate_id: Uuid,
    pub status: InterviewStatus,
    pub provider_call_id: Option<String>,
    pub answers: Json<Vec<Answer>>,
    pub final_recommendation: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl InterviewRow {
    pub fn answers(&self) -> &[Answer] {
        &self.answers.0
    }

    pub fn has_answer_for(&self, q_idx: u32) -> bool {
        self.answers.0.iter().any(|a| a.q_idx == q_idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_advances_in_order() {
        assert!(InterviewStatus::Pending.can_advance_to(InterviewStatus::InProgress));
        assert!(InterviewStatus::InProgress.can_advance_to(InterviewStatus::Completed));
    }

    #[test]
    fn test_status_never_skips_or_reverses() {
        assert!(!InterviewStatus::Pending.can_advance_to(InterviewStatus::Completed));
        assert!(!InterviewStatus::InProgress.can_advance_to(InterviewStatus::Pending));
        assert!(!InterviewStatus::Completed.can_advance_to(InterviewStatus::InProgress));
        assert!(!InterviewStatus::Completed.can_advance_to(InterviewStatus::Pending));
    }

    #[test]
    fn test_completed_is_terminal() {
        assert!(InterviewStatus::Completed.is_terminal());
        assert!(!InterviewStatus::Pending.is_terminal());
        assert!(!InterviewStatus::InProgress.is_terminal());
    }

    #[test]
    fn test_status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&InterviewStatus::InProgress).unwrap(),
            r#""in_progress""#
        );
        let status: InterviewStatus = serde_json::from_str(r#""completed""#).unwrap();
        assert_eq!(status, InterviewStatus::Completed);
    }

    #[test]
    fn test_answer_round_trips_with_score_and_rationale() {
        let answer = Answer {
            q_idx: 2,
            question: "Describe a production incident you debugged.".to_string(),
            recording_url: "https://recordings.example.com/abc/q_2.mp3".to_string(),
            recording_key: None,
            transcript: "We had a connection pool leak that...".to_string(),
            score: 4,
            rationale: "Concrete incident with clear root-cause narrative.".to_string(),
        };
        let json = serde_json::to_string(&answer).unwrap();
        let recovered: Answer = serde_json::from_str(&json).unwrap();
        assert_eq!(recovered.q_idx, 2);
        assert_eq!(recovered.score, 4);
        assert!(recovered.recording_key.is_none());
    }

    #[test]
    fn test_answer_without_score_fails_deserialization() {
        let bad = r#"{
            "q_idx": 0,
            "question": "Tell me about yourself.",
            "recording_url": "https://recordings.example.com/x/q_0.mp3",
            "recording_key": null,
            "transcript": "..."
        }"#;
        assert!(serde_json::from_str::<Answer>(bad).is_err());
    }
}

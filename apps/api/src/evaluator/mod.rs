//! Evaluator — pluggable, trait-based collaborator for question generation,
//! per-answer scoring, and the final hiring recommendation.
//!
//! Default in development mode: `CannedEvaluator` (pure-Rust, deterministic,
//! no network effect). Live: `LlmEvaluator` via the Anthropic Messages API.
//! `AppState` holds an `Arc<dyn Evaluator>`, selected once at startup.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::interview::Answer;

pub mod canned;
pub mod llm;
pub mod prompts;

pub use canned::CannedEvaluator;
pub use llm::LlmEvaluator;

/// Bounds on the generated question list.
pub const MIN_QUESTIONS: usize = 5;
pub const MAX_QUESTIONS: usize = 7;

/// Score and rationale for a single answer. Integer scale 1–5, 5 = excellent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerScore {
    pub score: u8,
    pub rationale: String,
}

/// Final categorical recommendation over the full answer set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    #[serde(rename = "Strong yes")]
    StrongYes,
    Yes,
    #[serde(rename = "Leaning yes")]
    LeaningYes,
    Neutral,
    #[serde(rename = "Leaning no")]
    LeaningNo,
    No,
}

impl Recommendation {
    pub fn as_str(self) -> &'static str {
        match self {
            Recommendation::StrongYes => "Strong yes",
            Recommendation::Yes => "Yes",
            Recommendation::LeaningYes => "Leaning yes",
            Recommendation::Neutral => "Neutral",
            Recommendation::LeaningNo => "Leaning no",
            Recommendation::No => "No",
        }
    }

    /// Maps a mean answer score (1–5) onto the categorical scale.
    pub fn from_mean_score(mean: f64) -> Self {
        if mean >= 4.5 {
            Recommendation::StrongYes
        } else if mean >= 4.0 {
            Recommendation::Yes
        } else if mean >= 3.5 {
            Recommendation::LeaningYes
        } else if mean >= 3.0 {
            Recommendation::Neutral
        } else if mean >= 2.0 {
            Recommendation::LeaningNo
        } else {
            Recommendation::No
        }
    }
}

/// The evaluation collaborator. Implement this to swap backends without
/// touching handlers or the lifecycle code.
#[async_trait]
pub trait Evaluator: Send + Sync {
    /// Generates 5–7 phone-interview questions from a raw job description.
    async fn generate_questions(&self, jd_text: &str) -> Result<Vec<String>, AppError>;

    /// Scores one transcript against its question: 1–5 plus a short rationale.
    async fn score_answer(&self, question: &str, transcript: &str)
        -> Result<AnswerScore, AppError>;

    /// Computes the final recommendation from the complete scored answer set.
    async fn recommend(&self, answers: &[Answer]) -> Result<Recommendation, AppError>;
}

/// Trims, drops empties, truncates to [`MAX_QUESTIONS`]. Fewer than
/// [`MIN_QUESTIONS`] usable questions is a generation failure.
pub fn normalize_questions(raw: Vec<String>) -> Result<Vec<String>, AppError> {
    let mut questions: Vec<String> = raw
        .into_iter()
        .map(|q| q.trim().to_string())
        .filter(|q| !q.is_empty())
        .collect();
    questions.truncate(MAX_QUESTIONS);

    if questions.len() < MIN_QUESTIONS {
        return Err(AppError::Generation(format!(
            "Expected at least {MIN_QUESTIONS} questions, got {}",
            questions.len()
        )));
    }
    Ok(questions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_questions_drops_blanks_and_truncates() {
        let raw: Vec<String> = (0..9)
            .map(|i| {
                if i == 3 {
                    "   ".to_string()
                } else {
                    format!("  Question {i}?  ")
                }
            })
            .collect();
        let questions = normalize_questions(raw).unwrap();
        assert_eq!(questions.len(), MAX_QUESTIONS);
        assert!(questions.iter().all(|q| q == q.trim() && !q.is_empty()));
    }

    #[test]
    fn test_normalize_questions_rejects_too_few() {
        let raw = vec!["One?".to_string(), "Two?".to_string()];
        assert!(matches!(
            normalize_questions(raw),
            Err(AppError::Generation(_))
        ));
    }

    #[test]
    fn test_normalize_questions_rejects_empty_output() {
        assert!(matches!(
            normalize_questions(vec![]),
            Err(AppError::Generation(_))
        ));
    }

    #[test]
    fn test_recommendation_from_mean_covers_scale() {
        assert_eq!(Recommendation::from_mean_score(5.0), Recommendation::StrongYes);
        assert_eq!(Recommendation::from_mean_score(4.2), Recommendation::Yes);
        assert_eq!(Recommendation::from_mean_score(3.7), Recommendation::LeaningYes);
        assert_eq!(Recommendation::from_mean_score(3.1), Recommendation::Neutral);
        assert_eq!(Recommendation::from_mean_score(2.4), Recommendation::LeaningNo);
        assert_eq!(Recommendation::from_mean_score(1.0), Recommendation::No);
    }

    #[test]
    fn test_recommendation_serde_matches_wire_strings() {
        assert_eq!(
            serde_json::to_string(&Recommendation::StrongYes).unwrap(),
            r#""Strong yes""#
        );
        let r: Recommendation = serde_json::from_str(r#""Leaning no""#).unwrap();
        assert_eq!(r, Recommendation::LeaningNo);
    }
}

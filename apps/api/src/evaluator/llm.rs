//! LLM-backed evaluator. All calls go through `llm_client`.

use async_trait::async_trait;
use serde::Deserialize;

use crate::errors::AppError;
use crate::evaluator::prompts::{
    QUESTION_GEN_SYSTEM, QUESTION_GEN_TEMPLATE, RECOMMEND_TEMPLATE, SCORE_ANSWER_TEMPLATE,
    SCORING_SYSTEM,
};
use crate::evaluator::{normalize_questions, AnswerScore, Evaluator, Recommendation};
use crate::llm_client::LlmClient;
use crate::models::interview::Answer;

pub struct LlmEvaluator {
    llm: LlmClient,
}

impl LlmEvaluator {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[derive(Debug, Deserialize)]
struct RecommendationEnvelope {
    recommendation: Recommendation,
}

#[async_trait]
impl Evaluator for LlmEvaluator {
    async fn generate_questions(&self, jd_text: &str) -> Result<Vec<String>, AppError> {
        let prompt = QUESTION_GEN_TEMPLATE.replace("{jd_text}", jd_text);
        let raw: Vec<String> = self
            .llm
            .call_json(&prompt, QUESTION_GEN_SYSTEM)
            .await
            .map_err(|e| AppError::Generation(format!("Question generation failed: {e}")))?;
        normalize_questions(raw)
    }

    async fn score_answer(
        &self,
        question: &str,
        transcript: &str,
    ) -> Result<AnswerScore, AppError> {
        let prompt = SCORE_ANSWER_TEMPLATE
            .replace("{question}", question)
            .replace("{transcript}", transcript);
        let scored: AnswerScore = self
            .llm
            .call_json(&prompt, SCORING_SYSTEM)
            .await
            .map_err(|e| AppError::Scoring(format!("Answer scoring failed: {e}")))?;

        if !(1..=5).contains(&scored.score) {
            return Err(AppError::Scoring(format!(
                "Score {} outside the 1-5 scale",
                scored.score
            )));
        }
        Ok(scored)
    }

    async fn recommend(&self, answers: &[Answer]) -> Result<Recommendation, AppError> {
        let answers_json = serde_json::to_string_pretty(
            &answers
                .iter()
                .map(|a| {
                    serde_json::json!({
                        "q_idx": a.q_idx,
                        "question": a.question,
                        "transcript": a.transcript,
                        "score": a.score,
                        "rationale": a.rationale,
                    })
                })
                .collect::<Vec<_>>(),
        )
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize answers: {e}")))?;

        let prompt = RECOMMEND_TEMPLATE.replace("{answers_json}", &answers_json);
        let envelope: RecommendationEnvelope = self
            .llm
            .call_json(&prompt, SCORING_SYSTEM)
            .await
            .map_err(|e| AppError::Scoring(format!("Recommendation failed: {e}")))?;
        Ok(envelope.recommendation)
    }
}

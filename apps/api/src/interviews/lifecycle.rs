//! Interview state progression — the only place answers are written.
//!
//! Flow per answer: acquire per-interview lock → load interview + job →
//! reject terminal/duplicate writes → score via the evaluator → persist.
//! The answer set, status, and recommendation move in a single UPDATE, so a
//! scoring or recommendation failure leaves the interview untouched.

use sqlx::types::Json;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::interviews::simulate;
use crate::models::interview::{Answer, InterviewRow, InterviewStatus};
use crate::models::job::JobRow;
use crate::state::AppState;

/// One inbound transcribed answer, before scoring.
pub struct RecordedAnswer {
    pub q_idx: u32,
    pub recording_url: String,
    pub recording_key: Option<String>,
    pub transcript: String,
}

pub async fn fetch_interview(
    state: &AppState,
    interview_id: Uuid,
) -> Result<InterviewRow, AppError> {
    sqlx::query_as::<_, InterviewRow>("SELECT * FROM interviews WHERE id = $1")
        .bind(interview_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Interview {interview_id} not found")))
}

async fn fetch_job(state: &AppState, job_id: Uuid) -> Result<JobRow, AppError> {
    sqlx::query_as::<_, JobRow>("SELECT * FROM jobs WHERE id = $1")
        .bind(job_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))
}

/// Scores and records a single answer. Completes the interview when the last
/// outstanding index is filled.
pub async fn record_answer(
    state: &AppState,
    interview_id: Uuid,
    input: RecordedAnswer,
) -> Result<InterviewRow, AppError> {
    let _guard = state.locks.acquire(interview_id).await;

    let interview = fetch_interview(state, interview_id).await?;
    if interview.status.is_terminal() {
        return Err(AppError::InvalidState(format!(
            "Interview {interview_id} is already completed"
        )));
    }

    let job = fetch_job(state, interview.job_id).await?;
    let questions = job.questions();
    let Some(question) = questions.get(input.q_idx as usize) else {
        return Err(AppError::Validation(format!(
            "Question index {} out of range (job has {} questions)",
            input.q_idx,
            questions.len()
        )));
    };
    if interview.has_answer_for(input.q_idx) {
        return Err(AppError::InvalidState(format!(
            "Question {} already has an answer",
            input.q_idx
        )));
    }

    let scored = state
        .evaluator
        .score_answer(question, &input.transcript)
        .await?;

    let mut answers = interview.answers.0.clone();
    answers.push(Answer {
        q_idx: input.q_idx,
        question: question.clone(),
        recording_url: input.recording_url,
        recording_key: input.recording_key,
        transcript: input.transcript,
        score: scored.score,
        rationale: scored.rationale,
    });

    persist(state, interview, answers, questions.len()).await
}

/// Development-mode batch path: synthesizes, scores, and records one answer
/// per outstanding question, then completes the interview.
pub async fn simulate_answers(
    state: &AppState,
    interview_id: Uuid,
) -> Result<(InterviewRow, usize), AppError> {
    let _guard = state.locks.acquire(interview_id).await;

    let interview = fetch_interview(state, interview_id).await?;
    if interview.status.is_terminal() {
        return Err(AppError::InvalidState(format!(
            "Interview {interview_id} is already completed"
        )));
    }

    let job = fetch_job(state, interview.job_id).await?;
    let questions = job.questions();

    let mut answers = interview.answers.0.clone();
    let mut added = 0usize;
    for (idx, question) in questions.iter().enumerate() {
        let q_idx = idx as u32;
        if answers.iter().any(|a| a.q_idx == q_idx) {
            continue;
        }
        let transcript = simulate::transcript_for(interview_id, q_idx);
        let scored = state.evaluator.score_answer(question, &transcript).await?;
        answers.push(Answer {
            q_idx,
            question: question.clone(),
            recording_url: simulate::recording_url_for(interview_id, q_idx),
            recording_key: None,
            transcript,
            score: scored.score,
            rationale: scored.rationale,
        });
        added += 1;
    }

    let interview = persist(state, interview, answers, questions.len()).await?;
    Ok((interview, added))
}

/// Single-UPDATE persistence of the new answer set. Computes the final
/// recommendation first when the set is complete, so a recommendation
/// failure persists nothing.
async fn persist(
    state: &AppState,
    mut interview: InterviewRow,
    mut answers: Vec<Answer>,
    question_count: usize,
) -> Result<InterviewRow, AppError> {
    answers.sort_by_key(|a| a.q_idx);

    let complete = answers.len() == question_count;
    let recommendation = if complete {
        Some(state.evaluator.recommend(&answers).await?)
    } else {
        None
    };
    let next_status = if complete {
        InterviewStatus::Completed
    } else {
        InterviewStatus::InProgress
    };

    sqlx::query(
        r#"
        UPDATE interviews
        SET status = $1, answers = $2, final_recommendation = $3, updated_at = now()
        WHERE id = $4
        "#,
    )
    .bind(next_status)
    .bind(Json(&answers))
    .bind(recommendation.map(|r| r.as_str()))
    .bind(interview.id)
    .execute(&state.db)
    .await?;

    interview.status = next_status;
    interview.final_recommendation = recommendation.map(|r| r.as_str().to_string());
    interview.answers = Json(answers);

    if complete {
        info!(
            "Interview {} completed: {} answers, recommendation {:?}",
            interview.id,
            interview.answers().len(),
            interview.final_recommendation
        );
        state.locks.forget(interview.id).await;
    }

    Ok(interview)
}

//! Axum route handlers for the interview lifecycle API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::candidates::handlers::create_candidate;
use crate::errors::AppError;
use crate::interviews::lifecycle::{self, fetch_interview};
use crate::models::candidate::CandidateRow;
use crate::models::interview::{Answer, InterviewStatus};
use crate::models::job::JobRow;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Trigger payload. Either reference an existing candidate by id, or supply
/// `name` + `phone_e164` and one is created inline. A missing `job_id` falls
/// back to the most recently created job.
#[derive(Debug, Deserialize)]
pub struct TriggerInterviewRequest {
    pub job_id: Option<Uuid>,
    pub candidate_id: Option<Uuid>,
    pub name: Option<String>,
    pub phone_e164: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TriggerInterviewResponse {
    pub interview_id: Uuid,
    pub call_id: String,
    pub job_id: Uuid,
    pub candidate_id: Uuid,
    pub status: InterviewStatus,
    pub dev_mode: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct JobSummary {
    pub job_id: Uuid,
    pub questions: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct CandidateSummary {
    pub candidate_id: Uuid,
    pub name: String,
    pub phone_e164: String,
}

/// Full denormalized interview view.
#[derive(Debug, Serialize)]
pub struct InterviewView {
    pub interview_id: Uuid,
    pub status: InterviewStatus,
    pub job: JobSummary,
    pub candidate: CandidateSummary,
    pub answers: Vec<Answer>,
    pub final_recommendation: Option<String>,
    pub dev_mode: bool,
}

#[derive(Debug, Serialize)]
pub struct SimulateAnswersResponse {
    pub message: String,
    pub interview_id: Uuid,
    pub answers_count: usize,
    pub status: InterviewStatus,
    pub next_step: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /v1/interviews
///
/// Resolves job and candidate, inserts the interview as `pending`, places the
/// call through the configured `CallPlacer`, and advances to `in_progress`
/// with the provider call id. A placement failure surfaces as 502 and leaves
/// the interview `pending`.
pub async fn handle_trigger_interview(
    State(state): State<AppState>,
    Json(request): Json<TriggerInterviewRequest>,
) -> Result<Json<TriggerInterviewResponse>, AppError> {
    let job: JobRow = match request.job_id {
        Some(id) => sqlx::query_as("SELECT * FROM jobs WHERE id = $1")
            .bind(id)
            .fetch_optional(&state.db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))?,
        None => sqlx::query_as("SELECT * FROM jobs ORDER BY created_at DESC LIMIT 1")
            .fetch_optional(&state.db)
            .await?
            .ok_or_else(|| {
                AppError::NotFound("No job found. Create one via POST /v1/jd first.".to_string())
            })?,
    };

    let candidate: CandidateRow = match request.candidate_id {
        Some(id) => sqlx::query_as("SELECT * FROM candidates WHERE id = $1")
            .bind(id)
            .fetch_optional(&state.db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Candidate {id} not found")))?,
        None => {
            let (Some(name), Some(phone)) = (request.name, request.phone_e164) else {
                return Err(AppError::Validation(
                    "Provide candidate_id or name + phone_e164".to_string(),
                ));
            };
            create_candidate(&state, name, &phone).await?
        }
    };

    let interview_id = Uuid::new_v4();
    sqlx::query("INSERT INTO interviews (id, job_id, candidate_id, status) VALUES ($1, $2, $3, $4)")
        .bind(interview_id)
        .bind(job.id)
        .bind(candidate.id)
        .bind(InterviewStatus::Pending)
        .execute(&state.db)
        .await?;

    let placed = state
        .placer
        .place_call(interview_id, &candidate.phone_e164, job.questions())
        .await?;

    sqlx::query(
        "UPDATE interviews SET provider_call_id = $1, status = $2, updated_at = now() WHERE id = $3",
    )
    .bind(&placed.call_id)
    .bind(InterviewStatus::InProgress)
    .bind(interview_id)
    .execute(&state.db)
    .await?;

    let message = placed.simulated.then(|| {
        format!("Call simulated. POST /v1/dev/simulate-answers/{interview_id} to synthesize answers.")
    });

    Ok(Json(TriggerInterviewResponse {
        interview_id,
        call_id: placed.call_id,
        job_id: job.id,
        candidate_id: candidate.id,
        status: InterviewStatus::InProgress,
        dev_mode: state.config.development_mode,
        message,
    }))
}

/// GET /v1/interviews/:interview_id
///
/// Full denormalized view: job, candidate, ordered answers, status,
/// recommendation. Pure read — scoring happens when answers are recorded.
pub async fn handle_get_interview(
    State(state): State<AppState>,
    Path(interview_id): Path<Uuid>,
) -> Result<Json<InterviewView>, AppError> {
    let interview = fetch_interview(&state, interview_id).await?;

    let job: JobRow = sqlx::query_as("SELECT * FROM jobs WHERE id = $1")
        .bind(interview.job_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {} not found", interview.job_id)))?;

    let candidate: CandidateRow = sqlx::query_as("SELECT * FROM candidates WHERE id = $1")
        .bind(interview.candidate_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Candidate {} not found", interview.candidate_id))
        })?;

    Ok(Json(InterviewView {
        interview_id: interview.id,
        status: interview.status,
        job: JobSummary {
            job_id: job.id,
            questions: job.questions.0.clone(),
        },
        candidate: CandidateSummary {
            candidate_id: candidate.id,
            name: candidate.name,
            phone_e164: candidate.phone_e164,
        },
        answers: interview.answers.0,
        final_recommendation: interview.final_recommendation,
        dev_mode: state.config.development_mode,
    }))
}

/// POST /v1/dev/simulate-answers/:interview_id
///
/// Development mode only: synthesizes, scores, and records one answer per
/// outstanding question, completing the interview.
pub async fn handle_simulate_answers(
    State(state): State<AppState>,
    Path(interview_id): Path<Uuid>,
) -> Result<Json<SimulateAnswersResponse>, AppError> {
    if !state.config.development_mode {
        return Err(AppError::Validation(
            "simulate-answers is only available in development mode".to_string(),
        ));
    }

    let (interview, added) = lifecycle::simulate_answers(&state, interview_id).await?;

    Ok(Json(SimulateAnswersResponse {
        message: format!("Recorded {added} simulated answers"),
        interview_id,
        answers_count: interview.answers().len(),
        status: interview.status,
        next_step: format!("GET /v1/interviews/{interview_id} for the scored results"),
    }))
}

/// GET /v1/dev/status
///
/// Development mode only: record counts and latest ids for smoke-testing.
pub async fn handle_dev_status(
    State(state): State<AppState>,
) -> Result<Json<Value>, AppError> {
    if !state.config.development_mode {
        return Err(AppError::Validation(
            "Only available in development mode".to_string(),
        ));
    }

    let jobs: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM jobs")
        .fetch_one(&state.db)
        .await?;
    let candidates: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM candidates")
        .fetch_one(&state.db)
        .await?;
    let interviews: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM interviews")
        .fetch_one(&state.db)
        .await?;

    let latest_job: Option<Uuid> =
        sqlx::query_scalar("SELECT id FROM jobs ORDER BY created_at DESC LIMIT 1")
            .fetch_optional(&state.db)
            .await?;
    let latest_candidate: Option<Uuid> =
        sqlx::query_scalar("SELECT id FROM candidates ORDER BY created_at DESC LIMIT 1")
            .fetch_optional(&state.db)
            .await?;
    let latest_interview: Option<Uuid> =
        sqlx::query_scalar("SELECT id FROM interviews ORDER BY created_at DESC LIMIT 1")
            .fetch_optional(&state.db)
            .await?;

    Ok(Json(json!({
        "development_mode": true,
        "database_stats": {
            "jobs": jobs,
            "candidates": candidates,
            "interviews": interviews,
        },
        "latest_records": {
            "job_id": latest_job,
            "candidate_id": latest_candidate,
            "interview_id": latest_interview,
        },
    })))
}

//! Axum route handlers for job creation.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use sqlx::types::Json as SqlJson;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateJobRequest {
    pub jd_text: String,
}

#[derive(Debug, Serialize)]
pub struct CreateJobResponse {
    pub job_id: Uuid,
    pub questions: Vec<String>,
}

/// POST /v1/jd
///
/// Generates 5–7 interview questions from the job description via the
/// configured `Evaluator` and persists the job. The job is immutable after
/// this point.
pub async fn handle_create_job(
    State(state): State<AppState>,
    Json(request): Json<CreateJobRequest>,
) -> Result<Json<CreateJobResponse>, AppError> {
    let jd_text = request.jd_text.trim();
    if jd_text.is_empty() {
        return Err(AppError::Validation("jd_text cannot be empty".to_string()));
    }

    let questions = state.evaluator.generate_questions(jd_text).await?;

    let job_id = Uuid::new_v4();
    sqlx::query("INSERT INTO jobs (id, jd_text, questions) VALUES ($1, $2, $3)")
        .bind(job_id)
        .bind(jd_text)
        .bind(SqlJson(&questions))
        .execute(&state.db)
        .await?;

    info!("Created job {job_id} with {} questions", questions.len());

    Ok(Json(CreateJobResponse { job_id, questions }))
}

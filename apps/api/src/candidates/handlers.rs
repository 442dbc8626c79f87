//! Axum route handlers for candidates and resume parsing.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::candidates::phone::to_e164;
use crate::candidates::resume::{parse_resume, ResumeMeta};
use crate::errors::AppError;
use crate::models::candidate::CandidateRow;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateCandidateRequest {
    pub name: String,
    pub phone_e164: String,
}

#[derive(Debug, Serialize)]
pub struct CreateCandidateResponse {
    pub candidate_id: Uuid,
    pub name: String,
    pub phone_e164: String,
}

#[derive(Debug, Serialize)]
pub struct UploadResumeResponse {
    pub parsed: ResumeMeta,
}

/// Validates, whitelists (outside development mode), and inserts a candidate.
/// Shared with the interview trigger's inline-candidate path.
pub async fn create_candidate(
    state: &AppState,
    name: String,
    phone_raw: &str,
) -> Result<CandidateRow, AppError> {
    if name.trim().is_empty() {
        return Err(AppError::Validation("name cannot be empty".to_string()));
    }
    let phone_e164 = to_e164(phone_raw)?;

    // Whitelist applies only outside development mode; simulated calls
    // never dial out.
    if !state.config.development_mode
        && !state.config.outbound_whitelist.is_empty()
        && !state.config.outbound_whitelist.contains(&phone_e164)
    {
        return Err(AppError::Forbidden(
            "Outbound number not in whitelist".to_string(),
        ));
    }

    let candidate: CandidateRow = sqlx::query_as(
        "INSERT INTO candidates (id, name, phone_e164) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(name.trim())
    .bind(&phone_e164)
    .fetch_one(&state.db)
    .await?;

    info!("Created candidate {} ({})", candidate.id, candidate.phone_e164);
    Ok(candidate)
}

/// POST /v1/candidates
pub async fn handle_create_candidate(
    State(state): State<AppState>,
    Json(request): Json<CreateCandidateRequest>,
) -> Result<Json<CreateCandidateResponse>, AppError> {
    let candidate = create_candidate(&state, request.name, &request.phone_e164).await?;
    Ok(Json(CreateCandidateResponse {
        candidate_id: candidate.id,
        name: candidate.name,
        phone_e164: candidate.phone_e164,
    }))
}

/// POST /v1/resumes
///
/// Multipart upload with a `file` field. Returns parsed metadata; nothing is
/// persisted until it is attached to a candidate.
pub async fn handle_upload_resume(
    State(_state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResumeResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or("resume.txt").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Could not read upload: {e}")))?;

        let parsed = parse_resume(&bytes, &filename)?;
        return Ok(Json(UploadResumeResponse { parsed }));
    }

    Err(AppError::Validation(
        "Provide a multipart 'file' field".to_string(),
    ))
}

/// POST /v1/candidates/:candidate_id/resume
///
/// Attaches a parsed-resume metadata blob to an existing candidate.
pub async fn handle_attach_resume_meta(
    State(state): State<AppState>,
    Path(candidate_id): Path<Uuid>,
    Json(meta): Json<Value>,
) -> Result<StatusCode, AppError> {
    let result = sqlx::query("UPDATE candidates SET resume_meta = $1 WHERE id = $2")
        .bind(&meta)
        .bind(candidate_id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!(
            "Candidate {candidate_id} not found"
        )));
    }

    Ok(StatusCode::NO_CONTENT)
}

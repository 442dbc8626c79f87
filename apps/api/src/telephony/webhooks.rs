//! Inbound voice webhooks. The telephony provider calls these, so they sit
//! outside the API-key layer and are only mounted outside development mode.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::interviews::lifecycle::{record_answer, RecordedAnswer};
use crate::models::interview::InterviewRow;
use crate::models::job::JobRow;
use crate::state::AppState;
use crate::telephony::vonage::build_ncco;

#[derive(Debug, Deserialize)]
pub struct InterviewQuery {
    pub interview: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct EventQuery {
    pub interview: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct RecordQuery {
    pub interview: Uuid,
    pub q: u32,
}

#[derive(Debug, Deserialize)]
pub struct RecordCallback {
    #[serde(alias = "RECORDING_URL", alias = "url")]
    pub recording_url: Option<String>,
    #[serde(alias = "text")]
    pub transcript: Option<String>,
}

fn fallback_ncco(text: &str) -> Vec<Value> {
    vec![json!({"action": "talk", "text": text})]
}

/// GET /v1/voice/answer — serves the NCCO for a ringing call.
/// The provider expects an NCCO no matter what, so lookup failures answer
/// with a spoken apology rather than an error status.
pub async fn handle_answer(
    State(state): State<AppState>,
    Query(params): Query<InterviewQuery>,
) -> Json<Vec<Value>> {
    let interview: Option<InterviewRow> =
        sqlx::query_as("SELECT * FROM interviews WHERE id = $1")
            .bind(params.interview)
            .fetch_optional(&state.db)
            .await
            .ok()
            .flatten();

    let Some(interview) = interview else {
        return Json(fallback_ncco("Interview not found."));
    };

    let job: Option<JobRow> = sqlx::query_as("SELECT * FROM jobs WHERE id = $1")
        .bind(interview.job_id)
        .fetch_optional(&state.db)
        .await
        .ok()
        .flatten();

    let Some(job) = job else {
        return Json(fallback_ncco("Interview not found."));
    };

    let base_url = state
        .config
        .live
        .as_ref()
        .map(|l| l.public_base_url.as_str())
        .unwrap_or("http://localhost:8080");

    Json(build_ncco(job.questions(), base_url, interview.id))
}

/// POST /v1/voice/event — call-progress logging. Terminal call states with
/// missing answers leave the interview `in_progress`; re-triggering is the
/// recovery path.
pub async fn handle_event(
    Query(params): Query<EventQuery>,
    Json(body): Json<Value>,
) -> &'static str {
    let status = body.get("status").and_then(Value::as_str).unwrap_or("unknown");
    match status {
        "failed" | "timeout" | "rejected" => {
            warn!("Call event '{status}' for interview {:?}", params.interview);
        }
        _ => {
            info!("Call event '{status}' for interview {:?}", params.interview);
        }
    }
    "OK"
}

/// POST /v1/voice/record — one transcribed answer per question index.
/// Archives the recording, then scores and records the answer; a scoring
/// failure surfaces as an error and records nothing.
pub async fn handle_record(
    State(state): State<AppState>,
    Query(params): Query<RecordQuery>,
    Json(callback): Json<RecordCallback>,
) -> Result<&'static str, AppError> {
    let recording_url = callback
        .recording_url
        .ok_or_else(|| AppError::Validation("Missing recording_url".to_string()))?;
    let transcript = callback
        .transcript
        .ok_or_else(|| AppError::Validation("Missing transcript".to_string()))?;

    // Archival is best-effort; the provider recording URL is kept on the
    // answer regardless.
    let recording_key = match download_audio(&state, &recording_url).await {
        Some(audio) => match &state.recordings {
            Some(store) => store
                .archive(params.interview, params.q, audio)
                .await
                .map_err(|e| warn!("Recording archive failed: {e}"))
                .ok(),
            None => None,
        },
        None => None,
    };

    record_answer(
        &state,
        params.interview,
        RecordedAnswer {
            q_idx: params.q,
            recording_url,
            recording_key,
            transcript,
        },
    )
    .await?;

    Ok("OK")
}

async fn download_audio(state: &AppState, url: &str) -> Option<Vec<u8>> {
    let response = state
        .http
        .get(url)
        .send()
        .await
        .and_then(reqwest::Response::error_for_status);
    match response {
        Ok(r) => match r.bytes().await {
            Ok(bytes) => Some(bytes.to_vec()),
            Err(e) => {
                warn!("Recording download failed: {e}");
                None
            }
        },
        Err(e) => {
            warn!("Recording download failed: {e}");
            None
        }
    }
}

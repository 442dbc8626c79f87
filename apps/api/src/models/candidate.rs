use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// A candidate to be screened. The phone number is stored normalized to
/// E.164; `resume_meta` is an optional parsed-resume blob attached later.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CandidateRow {
    pub id: Uuid,
    pub name: String,
    pub phone_e164: String,
    pub resume_meta: Option<Value>,
    pub created_at: DateTime<Utc>,
}

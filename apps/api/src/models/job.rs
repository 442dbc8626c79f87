use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// A screening job: the raw job description plus the ordered interview
/// questions generated from it. Immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobRow {
    pub id: Uuid,
    pub jd_text: String,
    pub questions: Json<Vec<String>>,
    pub created_at: DateTime<Utc>,
}

impl JobRow {
    pub fn questions(&self) -> &[String] {
        &self.questions.0
    }
}

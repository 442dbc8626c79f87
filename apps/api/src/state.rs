use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::evaluator::Evaluator;
use crate::interviews::locks::InterviewLocks;
use crate::telephony::{CallPlacer, RecordingStore};

/// Shared application state injected into all route handlers via Axum
/// extractors. The two collaborators are chosen once at startup from
/// `Config` — `CannedEvaluator`/`SimulatedCaller` in development mode,
/// `LlmEvaluator`/`VonageCaller` otherwise.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
    pub evaluator: Arc<dyn Evaluator>,
    pub placer: Arc<dyn CallPlacer>,
    /// Recording archival, live mode only.
    pub recordings: Option<RecordingStore>,
    /// Outbound HTTP client for recording downloads.
    pub http: reqwest::Client,
    /// Per-interview writer locks for answer mutations.
    pub locks: InterviewLocks,
}

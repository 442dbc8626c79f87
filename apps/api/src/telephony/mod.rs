//! Call placement — the second external collaborator, behind a trait so the
//! development/production split is decided once at startup and never branched
//! on at call sites.

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::AppError;

pub mod recordings;
pub mod simulated;
pub mod vonage;
pub mod webhooks;

pub use recordings::RecordingStore;
pub use simulated::SimulatedCaller;
pub use vonage::VonageCaller;

/// Result of placing (or simulating) an outbound screening call.
#[derive(Debug, Clone)]
pub struct PlacedCall {
    /// Provider call identifier, or a deterministic `sim-call-…` placeholder.
    pub call_id: String,
    pub simulated: bool,
}

/// Places the outbound screening call that asks the job's questions.
/// Answers come back asynchronously through the voice webhooks; the
/// simulated implementation has no external effect at all.
#[async_trait]
pub trait CallPlacer: Send + Sync {
    async fn place_call(
        &self,
        interview_id: Uuid,
        phone_e164: &str,
        questions: &[String],
    ) -> Result<PlacedCall, AppError>;
}

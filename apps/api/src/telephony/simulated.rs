//! Deterministic stand-in call placer for development mode.

use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::telephony::{CallPlacer, PlacedCall};

pub struct SimulatedCaller;

/// The placeholder call id is derived from the interview id so repeated
/// simulated runs are reproducible.
pub fn simulated_call_id(interview_id: Uuid) -> String {
    let simple = interview_id.simple().to_string();
    format!("sim-call-{}", &simple[..8])
}

#[async_trait]
impl CallPlacer for SimulatedCaller {
    async fn place_call(
        &self,
        interview_id: Uuid,
        phone_e164: &str,
        questions: &[String],
    ) -> Result<PlacedCall, AppError> {
        info!(
            "[simulated] would call {phone_e164} with {} questions for interview {interview_id}",
            questions.len()
        );
        for (idx, question) in questions.iter().enumerate() {
            info!("[simulated] Q{}: {question}", idx + 1);
        }

        Ok(PlacedCall {
            call_id: simulated_call_id(interview_id),
            simulated: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_simulated_call_id_is_deterministic() {
        let id = Uuid::new_v4();
        let caller = SimulatedCaller;
        let first = caller
            .place_call(id, "+919876543210", &["Q?".to_string()])
            .await
            .unwrap();
        let second = caller
            .place_call(id, "+919876543210", &["Q?".to_string()])
            .await
            .unwrap();

        assert_eq!(first.call_id, second.call_id);
        assert!(first.call_id.starts_with("sim-call-"));
        assert!(first.simulated);
    }

    #[tokio::test]
    async fn test_distinct_interviews_get_distinct_call_ids() {
        let caller = SimulatedCaller;
        let a = caller
            .place_call(Uuid::new_v4(), "+919876543210", &[])
            .await
            .unwrap();
        let b = caller
            .place_call(Uuid::new_v4(), "+919876543210", &[])
            .await
            .unwrap();
        assert_ne!(a.call_id, b.call_id);
    }
}

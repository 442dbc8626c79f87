//! Live call placement via the Vonage Voice API.
//!
//! Authentication is an RS256 application JWT minted per request from the
//! application id and private key configured at startup. The call is driven
//! by an NCCO that alternates talk/record actions, one pair per question,
//! with provider-side transcription delivered to the record webhook.

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use async_trait::async_trait;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use crate::config::LiveConfig;
use crate::errors::AppError;
use crate::telephony::{CallPlacer, PlacedCall};

const VONAGE_CALLS_URL: &str = "https://api.nexmo.com/v1/calls";
const JWT_TTL_SECS: u64 = 300;

#[derive(Debug, Serialize)]
struct VonageClaims {
    application_id: String,
    iat: u64,
    exp: u64,
    jti: String,
}

#[derive(Debug, Deserialize)]
struct CallCreated {
    uuid: String,
}

pub struct VonageCaller {
    client: reqwest::Client,
    application_id: String,
    from_number: String,
    public_base_url: String,
    encoding_key: EncodingKey,
}

impl VonageCaller {
    /// Reads the private key once at startup; a missing or malformed key is
    /// a configuration error, not a per-request one.
    pub fn new(config: &LiveConfig) -> Result<Self> {
        let pem = std::fs::read(&config.vonage_private_key_path).with_context(|| {
            format!(
                "Could not read Vonage private key at '{}'",
                config.vonage_private_key_path
            )
        })?;
        let encoding_key =
            EncodingKey::from_rsa_pem(&pem).context("Vonage private key is not valid RSA PEM")?;

        Ok(Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to build HTTP client"),
            application_id: config.vonage_application_id.clone(),
            from_number: config.vonage_from_number.clone(),
            public_base_url: config.public_base_url.trim_end_matches('/').to_string(),
            encoding_key,
        })
    }

    fn mint_jwt(&self) -> Result<String, AppError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("System clock error: {e}")))?
            .as_secs();
        let claims = VonageClaims {
            application_id: self.application_id.clone(),
            iat: now,
            exp: now + JWT_TTL_SECS,
            jti: Uuid::new_v4().simple().to_string(),
        };
        encode(&Header::new(Algorithm::RS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::Telephony(format!("Failed to mint Vonage JWT: {e}")))
    }
}

#[async_trait]
impl CallPlacer for VonageCaller {
    async fn place_call(
        &self,
        interview_id: Uuid,
        phone_e164: &str,
        questions: &[String],
    ) -> Result<PlacedCall, AppError> {
        let token = self.mint_jwt()?;
        let payload = json!({
            "to": [{"type": "phone", "number": phone_e164}],
            "from": {"type": "phone", "number": self.from_number},
            "answer_url": [format!(
                "{}/v1/voice/answer?interview={interview_id}",
                self.public_base_url
            )],
            "event_url": [format!(
                "{}/v1/voice/event?interview={interview_id}",
                self.public_base_url
            )],
        });

        let response = self
            .client
            .post(VONAGE_CALLS_URL)
            .bearer_auth(token)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AppError::Telephony(format!("Vonage call create failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Telephony(format!(
                "Vonage call create failed (status {status}): {body}"
            )));
        }

        let created: CallCreated = response
            .json()
            .await
            .map_err(|e| AppError::Telephony(format!("Malformed Vonage response: {e}")))?;

        info!(
            "Placed call {} for interview {} ({} questions)",
            created.uuid,
            interview_id,
            questions.len()
        );

        Ok(PlacedCall {
            call_id: created.uuid,
            simulated: false,
        })
    }
}

/// Builds the NCCO for an interview: one talk/record pair per question and a
/// closing talk action. Served to Vonage by the answer webhook.
pub fn build_ncco(questions: &[String], public_base_url: &str, interview_id: Uuid) -> Vec<Value> {
    let base = public_base_url.trim_end_matches('/');
    let mut actions = Vec::with_capacity(questions.len() * 2 + 1);
    for (idx, question) in questions.iter().enumerate() {
        let record_url = format!("{base}/v1/voice/record?interview={interview_id}&q={idx}");
        actions.push(json!({
            "action": "talk",
            "text": format!("Question {}. {question}", idx + 1),
        }));
        actions.push(json!({
            "action": "record",
            "beepStart": true,
            "endOnSilence": 3,
            "format": "mp3",
            "eventUrl": [record_url],
            "transcription": {
                "eventUrl": [record_url],
                "language": "en-US",
            },
        }));
    }
    actions.push(json!({
        "action": "talk",
        "text": "Thanks. This concludes the interview. Goodbye.",
    }));
    actions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ncco_has_talk_record_pair_per_question_plus_goodbye() {
        let questions = vec!["Q one?".to_string(), "Q two?".to_string()];
        let id = Uuid::new_v4();
        let ncco = build_ncco(&questions, "https://screener.example.com", id);

        assert_eq!(ncco.len(), questions.len() * 2 + 1);
        assert_eq!(ncco[0]["action"], "talk");
        assert_eq!(ncco[1]["action"], "record");
        assert_eq!(ncco.last().unwrap()["action"], "talk");
    }

    #[test]
    fn test_ncco_record_urls_carry_interview_and_question_index() {
        let questions = vec!["Q one?".to_string(), "Q two?".to_string()];
        let id = Uuid::new_v4();
        let ncco = build_ncco(&questions, "https://screener.example.com/", id);

        let second_record = &ncco[3]["eventUrl"][0];
        let url = second_record.as_str().unwrap();
        assert!(url.starts_with("https://screener.example.com/v1/voice/record"));
        assert!(url.contains(&format!("interview={id}")));
        assert!(url.ends_with("q=1"));
    }

    #[test]
    fn test_ncco_speaks_question_numbers_starting_at_one() {
        let questions = vec!["Tell me about yourself.".to_string()];
        let ncco = build_ncco(&questions, "https://x.example.com", Uuid::new_v4());
        let spoken = ncco[0]["text"].as_str().unwrap();
        assert!(spoken.starts_with("Question 1."));
        assert!(spoken.contains("Tell me about yourself."));
    }
}

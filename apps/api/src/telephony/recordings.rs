//! Archival of call recordings to object storage (live mode only).

use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use aws_sdk_s3::primitives::ByteStream;
use tracing::info;
use uuid::Uuid;

use crate::config::LiveConfig;
use crate::errors::AppError;

#[derive(Clone)]
pub struct RecordingStore {
    s3: aws_sdk_s3::Client,
    bucket: String,
}

impl RecordingStore {
    /// Constructs an S3 client configured for MinIO (local) or AWS.
    pub async fn connect(config: &LiveConfig) -> Self {
        let credentials = Credentials::new(
            &config.aws_access_key_id,
            &config.aws_secret_access_key,
            None,
            None,
            "screener-static",
        );

        let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .credentials_provider(credentials)
            .endpoint_url(&config.s3_endpoint)
            .load()
            .await;

        Self {
            s3: aws_sdk_s3::Client::new(&s3_config),
            bucket: config.s3_bucket.clone(),
        }
    }

    /// Uploads one answer recording; returns the object key.
    pub async fn archive(
        &self,
        interview_id: Uuid,
        q_idx: u32,
        audio: Vec<u8>,
    ) -> Result<String, AppError> {
        let key = format!("recordings/{interview_id}/q_{q_idx}.mp3");
        self.s3
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(audio))
            .content_type("audio/mpeg")
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("Recording upload failed: {e}")))?;

        info!("Archived recording to s3://{}/{key}", self.bucket);
        Ok(key)
    }
}

//! Remote publish endpoint.
//!
//! Posts the full document payload to a configured endpoint. The core does
//! not depend on this for its own operation; failures and timeouts become
//! user notifications, never rollbacks.

use std::time::Duration;
use thiserror::Error;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Error, Debug)]
pub enum PublishError {
    #[error("Publish request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Publish endpoint returned status {0}")]
    Status(u16),
}

pub struct Publisher {
    endpoint: String,
    client: reqwest::Client,
}

impl Publisher {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: reqwest::Client::builder()
                .timeout(DEFAULT_TIMEOUT)
                .build()
                .unwrap_or_default(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POST the serialized document. The payload is the whole document;
    /// the latest publish always wins on the remote side.
    pub async fn publish(&self, payload: &serde_json::Value) -> Result<(), PublishError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(payload)
            .send()
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(PublishError::Status(response.status().as_u16()))
        }
    }
}

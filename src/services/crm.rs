use std::time::Duration;

use reqwest::Client;
use thiserror::Error;

use crate::models::ParticipantProfile;

/// Errors that can occur when delivering a profile to the CRM
#[derive(Debug, Error)]
pub enum CrmError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("CRM returned error: {0}")]
    Api(String),
}

/// Client for the participant CRM sink
///
/// The finalized profile is forwarded exactly as received. Delivery is
/// best-effort: callers log failures and move on, and matching never waits
/// on this client.
pub struct CrmClient {
    endpoint: String,
    api_key: String,
    client: Client,
}

impl CrmClient {
    pub fn new(endpoint: String, api_key: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            endpoint,
            api_key,
            client,
        }
    }

    /// Push one finalized profile, unchanged, to the configured endpoint
    pub async fn push_profile(&self, profile: &ParticipantProfile) -> Result<(), CrmError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", &self.api_key)
            .json(profile)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CrmError::Api(format!("{}: {}", status, body)));
        }
        Ok(())
    }
}

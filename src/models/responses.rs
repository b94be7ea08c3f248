use serde::{Deserialize, Serialize};

use crate::models::domain::MatchGroup;

/// Response for the match endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindMatchesResponse {
    pub groups: Vec<MatchGroup>,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
    #[serde(rename = "totalMatches")]
    pub total_matches: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub trials: usize,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Acknowledgement for a CRM submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitParticipantResponse {
    pub accepted: bool,
    #[serde(rename = "submissionId")]
    pub submission_id: String,
}

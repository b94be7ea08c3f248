use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::ParticipantProfile;

/// Request to match a participant profile against the corpus
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FindMatchesRequest {
    pub profile: ParticipantProfile,
    #[validate(range(min = 1, max = 100))]
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Request to hand a finalized profile to the CRM sink
///
/// The profile is forwarded unchanged; nothing in it is required beyond
/// what the collector already enforces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitParticipantRequest {
    #[serde(flatten)]
    pub profile: ParticipantProfile,
}

// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    AgeField, AgeFocus, Coordinate, LocationInfo, MatchGroup, MatchTuning, ParticipantProfile,
    ProximityBucket, TrialMatch, TrialRecord, VisitPreference,
};
pub use requests::{FindMatchesRequest, SubmitParticipantRequest};
pub use responses::{ErrorResponse, FindMatchesResponse, HealthResponse, SubmitParticipantResponse};

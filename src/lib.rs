//! Hey Trial Algo - clinical trial matching service for the Hey Trial assistant
//!
//! This library provides the matching and ranking engine behind Hey Trial.
//! Given a participant profile and a corpus of trial records it filters out
//! ineligible trials, scores the rest with a human-readable rationale, and
//! returns a deterministic grouped ranking by proximity.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{distance_km, Exclusion, Geocoder, MatchObserver, MatchOutcome, Matcher};
pub use crate::models::{
    FindMatchesRequest, FindMatchesResponse, MatchGroup, MatchTuning, ParticipantProfile,
    ProximityBucket, TrialMatch, TrialRecord,
};

use crate::core::proximity::ProximityAssessment;
use crate::models::{MatchTuning, ParticipantProfile, ProximityBucket, TrialRecord};

/// Textual markers that a study supports off-site participation, checked
/// when the corpus carries no structured remote-visits flag
const REMOTE_MARKERS: [&str; 4] = [
    "telehealth",
    "remote visit",
    "virtual visit",
    "remote participation",
];

/// Combine the independent score contributions for one eligible trial
///
/// Additive and deterministic; each contribution appends one short
/// rationale phrase. The total is not normalized; scaling for display is
/// a presentation concern.
pub fn score_trial(
    profile: &ParticipantProfile,
    trial: &TrialRecord,
    proximity: &ProximityAssessment,
    tuning: &MatchTuning,
) -> (f64, Vec<String>) {
    let mut score = 0.0;
    let mut rationale = Vec::new();

    // Always true for a trial past the eligibility filter; recorded
    // explicitly for transparency.
    score += tuning.relevance_base;
    rationale.push("matches the study's condition focus".to_string());

    score += proximity.partial_score;
    rationale.push(proximity_phrase(proximity));

    let shared = shared_comorbidities(profile, trial, tuning);
    if !shared.is_empty() {
        score += tuning.comorbidity_bonus;
        rationale.push(format!("also addresses {}", shared.join(", ")));
    }

    if supports_remote(trial) && profile.visit_preference.accepts_remote() {
        score += tuning.remote_bonus;
        rationale.push("supports remote or telehealth visits".to_string());
    }

    (score, rationale)
}

fn proximity_phrase(proximity: &ProximityAssessment) -> String {
    match (proximity.bucket, proximity.distance_km) {
        (ProximityBucket::NearYou, Some(km)) => format!("study site {:.0} km away", km),
        (ProximityBucket::NearYou, None) => "study site in your city".to_string(),
        (ProximityBucket::Regional, Some(km)) => {
            format!("study site {:.0} km away, within your region", km)
        }
        (ProximityBucket::Regional, None) => "study site in your state".to_string(),
        (ProximityBucket::National, Some(km)) => {
            format!("study site {:.0} km away, elsewhere in the country", km)
        }
        (ProximityBucket::National, None) => "study site elsewhere in the country".to_string(),
        (ProximityBucket::Other, _) => "study location not specified".to_string(),
    }
}

/// Comorbidity vocabulary terms present in both the profile's condition
/// tags and the trial's criteria text
fn shared_comorbidities(
    profile: &ParticipantProfile,
    trial: &TrialRecord,
    tuning: &MatchTuning,
) -> Vec<String> {
    if profile.condition_tags.is_empty() {
        return vec![];
    }
    let criteria = trial.criteria_text();
    let tags: Vec<String> = profile
        .condition_tags
        .iter()
        .map(|tag| tag.to_lowercase())
        .collect();

    tuning
        .comorbidity_vocabulary
        .iter()
        .filter(|term| {
            let term = term.to_lowercase();
            tags.iter().any(|tag| tag.contains(&term)) && criteria.contains(&term)
        })
        .cloned()
        .collect()
}

fn supports_remote(trial: &TrialRecord) -> bool {
    if let Some(flag) = trial.remote_visits {
        return flag;
    }
    let mut text = trial.criteria_text();
    if let Some(summary) = &trial.summary {
        text.push(' ');
        text.push_str(&summary.to_lowercase());
    }
    REMOTE_MARKERS.iter().any(|marker| text.contains(marker))
}

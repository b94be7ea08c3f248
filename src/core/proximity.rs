use crate::core::distance::distance_km;
use crate::models::{LocationInfo, MatchTuning, ProximityBucket};

/// Result of classifying one profile/trial location pair
#[derive(Debug, Clone, PartialEq)]
pub struct ProximityAssessment {
    pub bucket: ProximityBucket,
    pub distance_km: Option<f64>,
    pub partial_score: f64,
}

/// Map a location pair to a proximity bucket and partial score
///
/// Coordinates win when both sides have usable ones; otherwise an exact
/// city or state text match stands in at reduced confidence; otherwise the
/// pair carries no signal and falls to Other at the floor partial, which
/// must stay nonzero. Pure mapping.
pub fn classify(
    profile_loc: &LocationInfo,
    trial_loc: &LocationInfo,
    tuning: &MatchTuning,
) -> ProximityAssessment {
    if let (Some(from), Some(to)) = (profile_loc.usable_coordinate(), trial_loc.usable_coordinate())
    {
        // Both coordinates already validated, so the checked entry point
        // cannot fail here.
        if let Ok(distance) = distance_km(from, to) {
            let (bucket, partial_score) = if distance <= tuning.near_km {
                (ProximityBucket::NearYou, tuning.near_score)
            } else if distance <= tuning.regional_km {
                (ProximityBucket::Regional, tuning.regional_score)
            } else {
                (ProximityBucket::National, tuning.national_score)
            };
            return ProximityAssessment {
                bucket,
                distance_km: Some(distance),
                partial_score,
            };
        }
    }

    if text_matches(profile_loc.city.as_deref(), trial_loc.city.as_deref()) {
        return ProximityAssessment {
            bucket: ProximityBucket::NearYou,
            distance_km: None,
            partial_score: tuning.near_score - tuning.text_confidence_penalty,
        };
    }

    if text_matches(profile_loc.state.as_deref(), trial_loc.state.as_deref()) {
        return ProximityAssessment {
            bucket: ProximityBucket::Regional,
            distance_km: None,
            partial_score: tuning.regional_score - tuning.text_confidence_penalty,
        };
    }

    ProximityAssessment {
        bucket: ProximityBucket::Other,
        distance_km: None,
        partial_score: tuning.unknown_location_score,
    }
}

fn text_matches(a: Option<&str>, b: Option<&str>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.trim().eq_ignore_ascii_case(b.trim()),
        _ => false,
    }
}

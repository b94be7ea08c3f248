use std::fmt;

use crate::models::{AgeField, AgeFocus, MatchTuning, ParticipantProfile, TrialRecord};

/// Widest permissible age range, applied when a bound is absent or unparseable
pub const MIN_AGE_DEFAULT: f64 = 0.0;
pub const MAX_AGE_DEFAULT: f64 = 120.0;

/// Boundary between pediatric and adult enrollment in years
const ADULT_CUTOFF_YEARS: f64 = 18.0;

/// Why a trial was excluded for a given profile
///
/// Rules run in a fixed order and the first failure wins, so every
/// exclusion carries exactly one reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exclusion {
    MalformedRecord,
    NotRelevant,
    NotRecruiting,
    AgeOutOfRange,
    AgeFocusMismatch,
    OutOfServiceRegion,
}

impl fmt::Display for Exclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Exclusion::MalformedRecord => "malformed record: no condition text",
            Exclusion::NotRelevant => "condition not relevant",
            Exclusion::NotRecruiting => "not recruiting",
            Exclusion::AgeOutOfRange => "age out of range",
            Exclusion::AgeFocusMismatch => "age-focus mismatch",
            Exclusion::OutOfServiceRegion => "out of service region",
        };
        f.write_str(reason)
    }
}

/// Decide whether a trial admits this participant at all
///
/// Rules, in order, first failure wins: condition text present, condition
/// relevance, recruitment status, inclusive age range, age-focus
/// constraint, service country. Never mutates the trial record.
pub fn check_eligibility(
    profile: &ParticipantProfile,
    trial: &TrialRecord,
    tuning: &MatchTuning,
) -> Result<(), Exclusion> {
    let criteria = trial.criteria_text();
    if criteria.trim().is_empty() {
        return Err(Exclusion::MalformedRecord);
    }

    if !tuning
        .condition_keywords
        .iter()
        .any(|keyword| criteria.contains(&keyword.to_lowercase()))
    {
        return Err(Exclusion::NotRelevant);
    }

    // Absent status passes: missing data must not over-filter. Present
    // status must equal a whitelisted value, not merely contain one, so
    // "Not yet recruiting" never slips through.
    if let Some(status) = &trial.status {
        let status = status.trim().to_lowercase();
        if !tuning
            .recruiting_statuses
            .iter()
            .any(|allowed| allowed.to_lowercase() == status)
        {
            return Err(Exclusion::NotRecruiting);
        }
    }

    let min_age = parse_age_bound(trial.min_age.as_ref());
    let max_age = parse_age_bound(trial.max_age.as_ref());
    let age = f64::from(profile.age);
    if age < min_age.unwrap_or(MIN_AGE_DEFAULT) || age > max_age.unwrap_or(MAX_AGE_DEFAULT) {
        return Err(Exclusion::AgeOutOfRange);
    }

    // The focus rule only fires on explicitly parsed bounds: a trial that
    // never declared a bound is unrestricted, not mismatched.
    match profile.age_focus {
        AgeFocus::Pediatric => {
            if matches!(max_age, Some(max) if max > ADULT_CUTOFF_YEARS) {
                return Err(Exclusion::AgeFocusMismatch);
            }
        }
        AgeFocus::Adult => {
            if matches!(min_age, Some(min) if min < ADULT_CUTOFF_YEARS) {
                return Err(Exclusion::AgeFocusMismatch);
            }
        }
        AgeFocus::Either => {}
    }

    if let (Some(trial_country), Some(service_country)) =
        (trial.country.as_deref(), tuning.service_country.as_deref())
    {
        if normalize_country(trial_country) != normalize_country(service_country) {
            return Err(Exclusion::OutOfServiceRegion);
        }
    }

    Ok(())
}

/// Canonical age-bound parser used by every rule that reads trial ages
///
/// Numeric fields pass through as years. Text fields yield the first
/// integer they contain; "month" and "week" unit words convert to
/// fractional years. Anything else is unparseable and returns None so the
/// caller applies the 0–120 defaults.
pub fn parse_age_bound(field: Option<&AgeField>) -> Option<f64> {
    match field {
        None => None,
        Some(AgeField::Years(years)) => Some(*years),
        Some(AgeField::Text(text)) => {
            let value = first_integer(text)?;
            let lowered = text.to_lowercase();
            if lowered.contains("month") {
                Some(value / 12.0)
            } else if lowered.contains("week") {
                Some(value / 52.0)
            } else {
                Some(value)
            }
        }
    }
}

fn first_integer(text: &str) -> Option<f64> {
    let mut digits = String::new();
    for ch in text.chars() {
        if ch.is_ascii_digit() {
            digits.push(ch);
        } else if !digits.is_empty() {
            break;
        }
    }
    digits.parse().ok()
}

fn normalize_country(country: &str) -> String {
    let lowered = country.trim().to_lowercase();
    match lowered.as_str() {
        "us" | "usa" | "u.s." | "u.s.a." | "united states of america" => {
            "united states".to_string()
        }
        _ => lowered,
    }
}

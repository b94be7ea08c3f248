use std::sync::Arc;

use crate::core::eligibility::{check_eligibility, Exclusion};
use crate::core::geocode::{Geocoder, NullGeocoder};
use crate::core::grouping::group_and_rank;
use crate::core::proximity::classify;
use crate::core::scoring::score_trial;
use crate::models::{
    LocationInfo, MatchGroup, MatchTuning, ParticipantProfile, ProximityBucket, TrialMatch,
    TrialRecord,
};

/// Structured hook invoked on every include/exclude decision
///
/// Replaces ad hoc print tracing in filtering logic; implementations must
/// not influence the decision itself.
pub trait MatchObserver: Send + Sync {
    fn on_included(&self, trial: &TrialRecord, score: f64, bucket: ProximityBucket);
    fn on_excluded(&self, trial: &TrialRecord, reason: &Exclusion);
}

/// Default observer emitting `tracing` events
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl MatchObserver for TracingObserver {
    fn on_included(&self, trial: &TrialRecord, score: f64, bucket: ProximityBucket) {
        tracing::debug!(nct_id = %trial.nct_id, score, bucket = %bucket, "trial included");
    }

    fn on_excluded(&self, trial: &TrialRecord, reason: &Exclusion) {
        tracing::debug!(nct_id = %trial.nct_id, reason = %reason, "trial excluded");
    }
}

/// Result of one match call
#[derive(Debug)]
pub struct MatchOutcome {
    pub groups: Vec<MatchGroup>,
    pub total_candidates: usize,
    pub eligible: usize,
}

impl MatchOutcome {
    pub fn total_matches(&self) -> usize {
        self.groups.iter().map(|group| group.matches.len()).sum()
    }
}

/// Main matching orchestrator
///
/// # Pipeline stages
/// 1. Eligibility filtering (exclusions observed, never propagated)
/// 2. Location resolution (injected geocoder for text-only locations)
/// 3. Proximity classification
/// 4. Scoring with rationale
/// 5. Grouped ranking with the global cap
///
/// Stateless between calls; identical profile + corpus always produce an
/// identical ordered result.
#[derive(Clone)]
pub struct Matcher {
    tuning: MatchTuning,
    geocoder: Arc<dyn Geocoder>,
    observer: Arc<dyn MatchObserver>,
}

impl Matcher {
    pub fn new(tuning: MatchTuning) -> Self {
        Self {
            tuning,
            geocoder: Arc::new(NullGeocoder),
            observer: Arc::new(TracingObserver),
        }
    }

    pub fn with_default_tuning() -> Self {
        Self::new(MatchTuning::default())
    }

    pub fn with_geocoder(mut self, geocoder: Arc<dyn Geocoder>) -> Self {
        self.geocoder = geocoder;
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn MatchObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn tuning(&self) -> &MatchTuning {
        &self.tuning
    }

    /// Match one participant profile against the full corpus
    ///
    /// Per-record problems become exclusion decisions; nothing a single
    /// trial carries can abort the batch. An empty corpus yields an empty
    /// grouped result.
    pub fn match_trials(
        &self,
        profile: &ParticipantProfile,
        corpus: &[TrialRecord],
        limit: usize,
    ) -> MatchOutcome {
        let total_candidates = corpus.len();
        let profile_loc = self.resolve_location(profile.location_info());

        let mut scored: Vec<TrialMatch> = Vec::new();
        for trial in corpus {
            if let Err(reason) = check_eligibility(profile, trial, &self.tuning) {
                self.observer.on_excluded(trial, &reason);
                continue;
            }

            let trial_loc = self.resolve_location(trial.location_info());
            let assessment = classify(&profile_loc, &trial_loc, &self.tuning);
            let (score, rationale) = score_trial(profile, trial, &assessment, &self.tuning);

            self.observer.on_included(trial, score, assessment.bucket);
            scored.push(TrialMatch {
                nct_id: trial.nct_id.clone(),
                title: trial.title.clone(),
                summary: trial.summary.clone(),
                contact: trial.contact.clone(),
                location: trial.location_text(),
                url: trial.study_url(),
                score,
                rationale,
                bucket: assessment.bucket,
                distance_km: assessment.distance_km,
            });
        }

        let eligible = scored.len();
        MatchOutcome {
            groups: group_and_rank(scored, limit),
            total_candidates,
            eligible,
        }
    }

    /// Fill in a coordinate from location text when none is usable
    fn resolve_location(&self, mut info: LocationInfo) -> LocationInfo {
        if info.usable_coordinate().is_none() {
            let texts = [info.city.clone(), info.state.clone()];
            for text in texts.into_iter().flatten() {
                if let Some(coordinate) = self.geocoder.geocode(&text) {
                    info.coordinate = Some(coordinate);
                    break;
                }
            }
        }
        info
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_tuning()
    }
}

// Integration tests for the Hey Trial matching engine

use heytrial_algo::core::Matcher;
use heytrial_algo::models::{
    AgeField, AgeFocus, MatchTuning, ParticipantProfile, ProximityBucket, TrialRecord,
};

fn create_trial(nct_id: &str, conditions: &str) -> TrialRecord {
    TrialRecord {
        nct_id: nct_id.to_string(),
        title: format!("Study {}", nct_id),
        conditions: Some(conditions.to_string()),
        eligibility: None,
        min_age: None,
        max_age: None,
        status: Some("Recruiting".to_string()),
        country: Some("United States".to_string()),
        city: None,
        state: None,
        latitude: None,
        longitude: None,
        contact: None,
        summary: None,
        url: None,
        remote_visits: None,
    }
}

fn create_profile(age: u8) -> ParticipantProfile {
    ParticipantProfile {
        name: None,
        age,
        latitude: None,
        longitude: None,
        city: None,
        state: None,
        age_focus: AgeFocus::Either,
        condition_tags: vec![],
        visit_preference: Default::default(),
        phone: None,
        email: None,
    }
}

fn flattened_ids(matcher: &Matcher, profile: &ParticipantProfile, corpus: &[TrialRecord]) -> Vec<String> {
    matcher
        .match_trials(profile, corpus, 10)
        .groups
        .iter()
        .flat_map(|g| g.matches.iter().map(|m| m.nct_id.clone()))
        .collect()
}

#[test]
fn scenario_a_nearby_recruiting_trial_matches_near_you() {
    // Dallas participant, study site ~1.5 km away
    let matcher = Matcher::with_default_tuning();
    let mut profile = create_profile(8);
    profile.latitude = Some(32.77);
    profile.longitude = Some(-96.79);

    let mut trial = create_trial("NCT01000001", "Autism Spectrum Disorder study");
    trial.min_age = Some(AgeField::Years(2.0));
    trial.max_age = Some(AgeField::Years(17.0));
    trial.latitude = Some(32.78);
    trial.longitude = Some(-96.80);

    let outcome = matcher.match_trials(&profile, &[trial], 10);

    assert_eq!(outcome.groups.len(), 1);
    assert_eq!(outcome.groups[0].bucket, ProximityBucket::NearYou);
    assert_eq!(outcome.groups[0].matches.len(), 1);

    let matched = &outcome.groups[0].matches[0];
    assert!(matched.score > MatchTuning::default().relevance_base);
    assert!(matched.distance_km.unwrap() < 5.0);
}

#[test]
fn scenario_b_pediatric_only_adult_participant_is_excluded() {
    let matcher = Matcher::with_default_tuning();
    let mut profile = create_profile(25);
    profile.age_focus = AgeFocus::Pediatric;

    let mut trial = create_trial("NCT01000002", "autism study");
    trial.max_age = Some(AgeField::Years(18.0));

    let outcome = matcher.match_trials(&profile, &[trial], 10);
    assert!(outcome.groups.is_empty());
    assert_eq!(outcome.eligible, 0);
}

#[test]
fn scenario_c_irrelevant_condition_excluded_despite_fit() {
    let matcher = Matcher::with_default_tuning();
    let mut profile = create_profile(8);
    profile.latitude = Some(32.77);
    profile.longitude = Some(-96.79);

    let mut trial = create_trial("NCT01000003", "Chronic migraine prevention");
    trial.latitude = Some(32.78);
    trial.longitude = Some(-96.80);

    let outcome = matcher.match_trials(&profile, &[trial], 10);
    assert!(outcome.groups.is_empty());
}

#[test]
fn scenario_d_missing_age_bounds_default_to_widest_range() {
    let matcher = Matcher::with_default_tuning();
    let trial = create_trial("NCT01000004", "autism study");
    assert!(trial.min_age.is_none() && trial.max_age.is_none());

    let outcome = matcher.match_trials(&create_profile(95), &[trial], 10);
    assert_eq!(outcome.eligible, 1);
}

#[test]
fn scenario_e_score_ties_rank_by_identifier() {
    let matcher = Matcher::with_default_tuning();
    let corpus = vec![
        create_trial("A002", "autism study"),
        create_trial("A001", "autism study"),
    ];

    let ids = flattened_ids(&matcher, &create_profile(8), &corpus);
    assert_eq!(ids, vec!["A001", "A002"]);
}

#[test]
fn property_repeated_matches_are_identical() {
    let matcher = Matcher::with_default_tuning();
    let profile = create_profile(8);
    let corpus: Vec<TrialRecord> = (0..12)
        .map(|i| {
            let mut trial = create_trial(&format!("NCT{:08}", i), "autism study");
            trial.latitude = Some(32.0 + f64::from(i));
            trial.longitude = Some(-96.79);
            trial
        })
        .collect();

    let first = matcher.match_trials(&profile, &corpus, 10);
    let second = matcher.match_trials(&profile, &corpus, 10);

    let first_json = serde_json::to_string(&first.groups).unwrap();
    let second_json = serde_json::to_string(&second.groups).unwrap();
    assert_eq!(first_json, second_json);
}

#[test]
fn property_removing_a_trial_preserves_relative_order() {
    let matcher = Matcher::with_default_tuning();
    let profile = create_profile(8);

    let mut corpus = vec![
        create_trial("NCT03", "autism study"),
        create_trial("NCT01", "autism and adhd study"),
        create_trial("NCT02", "autism study"),
    ];

    let before = flattened_ids(&matcher, &profile, &corpus);
    corpus.remove(0); // Drop NCT03
    let after = flattened_ids(&matcher, &profile, &corpus);

    let before_without: Vec<&String> = before.iter().filter(|id| *id != "NCT03").collect();
    let after_refs: Vec<&String> = after.iter().collect();
    assert_eq!(before_without, after_refs);
}

#[test]
fn property_age_boundaries_are_inclusive() {
    let matcher = Matcher::with_default_tuning();
    let mut trial = create_trial("NCT01000005", "autism study");
    trial.min_age = Some(AgeField::Text("2 Years".to_string()));
    trial.max_age = Some(AgeField::Text("17 Years".to_string()));

    for age in [2, 17] {
        let outcome = matcher.match_trials(&create_profile(age), &[trial.clone()], 10);
        assert_eq!(outcome.eligible, 1, "age {} should be eligible", age);
    }
    for age in [1, 18] {
        let outcome = matcher.match_trials(&create_profile(age), &[trial.clone()], 10);
        assert_eq!(outcome.eligible, 0, "age {} should be excluded", age);
    }
}

#[test]
fn property_bucket_precedence_beats_score() {
    let matcher = Matcher::with_default_tuning();
    let mut profile = create_profile(8);
    profile.latitude = Some(32.77);
    profile.longitude = Some(-96.79);

    // Near site with no bonuses vs distant site loaded with bonuses
    let mut near = create_trial("NCT02", "autism study");
    near.latitude = Some(32.78);
    near.longitude = Some(-96.80);

    let mut far = create_trial("NCT01", "autism and adhd study");
    far.latitude = Some(42.36);
    far.longitude = Some(-71.06);
    far.remote_visits = Some(true);
    far.eligibility = Some("adhd welcome".to_string());

    let corpus = vec![far, near];
    let outcome = matcher.match_trials(&profile, &corpus, 10);

    assert_eq!(outcome.groups[0].bucket, ProximityBucket::NearYou);
    assert_eq!(outcome.groups[0].matches[0].nct_id, "NCT02");
    assert_eq!(outcome.groups[1].bucket, ProximityBucket::National);
}

#[test]
fn property_result_cap_is_respected() {
    let matcher = Matcher::with_default_tuning();
    let corpus: Vec<TrialRecord> = (0..50)
        .map(|i| create_trial(&format!("NCT{:08}", i), "autism study"))
        .collect();

    let outcome = matcher.match_trials(&create_profile(8), &corpus, 10);
    let total: usize = outcome.groups.iter().map(|g| g.matches.len()).sum();
    assert!(total <= 10);
    assert_eq!(outcome.total_candidates, 50);
}

#[test]
fn rationale_names_every_contribution() {
    let matcher = Matcher::with_default_tuning();
    let mut profile = create_profile(8);
    profile.latitude = Some(32.77);
    profile.longitude = Some(-96.79);
    profile.condition_tags = vec!["ADHD".to_string()];

    let mut trial = create_trial("NCT01000006", "Autism Spectrum Disorder study");
    trial.eligibility = Some("co-occurring adhd accepted, telehealth visits available".to_string());
    trial.latitude = Some(32.78);
    trial.longitude = Some(-96.80);

    let outcome = matcher.match_trials(&profile, &[trial], 10);
    let rationale = &outcome.groups[0].matches[0].rationale;

    assert_eq!(rationale.len(), 4);
    assert!(rationale[0].contains("condition focus"));
    assert!(rationale[1].contains("km away"));
    assert!(rationale[2].contains("adhd"));
    assert!(rationale[3].contains("remote"));
}

#[test]
fn malformed_records_never_abort_the_batch() {
    let matcher = Matcher::with_default_tuning();

    let mut broken = create_trial("NCT01", "");
    broken.conditions = None;
    broken.min_age = Some(AgeField::Text("unknown".to_string()));
    let good = create_trial("NCT02", "autism study");

    let outcome = matcher.match_trials(&create_profile(8), &[broken, good], 10);
    assert_eq!(outcome.eligible, 1);
    assert_eq!(outcome.groups[0].matches[0].nct_id, "NCT02");
}

#[test]
fn text_only_city_match_lands_near_you_without_distance() {
    let matcher = Matcher::with_default_tuning();
    let mut profile = create_profile(8);
    profile.city = Some("Dallas".to_string());

    let mut trial = create_trial("NCT01000007", "autism study");
    trial.city = Some("dallas".to_string());

    let outcome = matcher.match_trials(&profile, &[trial], 10);
    let matched = &outcome.groups[0].matches[0];

    assert_eq!(matched.bucket, ProximityBucket::NearYou);
    assert_eq!(matched.distance_km, None);
}

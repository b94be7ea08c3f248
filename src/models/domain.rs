use serde::{Deserialize, Serialize};

/// Geographic coordinate in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Latitude must lie in [-90, 90] and longitude in [-180, 180]
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Whether the participant restricts matching to pediatric or adult studies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgeFocus {
    Pediatric,
    Adult,
    #[default]
    Either,
}

/// How the participant is willing to attend study visits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VisitPreference {
    Remote,
    InPerson,
    #[default]
    Either,
}

impl VisitPreference {
    /// Remote participation is acceptable unless the profile insists on in-person visits
    pub fn accepts_remote(&self) -> bool {
        !matches!(self, VisitPreference::InPerson)
    }
}

/// Participant profile produced by the conversational collector
///
/// Immutable input to a single match call. Contact fields are carried for
/// CRM passthrough only; the engine never reads them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantProfile {
    #[serde(default)]
    pub name: Option<String>,
    pub age: u8,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(alias = "age_focus", rename = "ageFocus", default)]
    pub age_focus: AgeFocus,
    #[serde(alias = "condition_tags", rename = "conditionTags", default)]
    pub condition_tags: Vec<String>,
    #[serde(alias = "visit_preference", rename = "visitPreference", default)]
    pub visit_preference: VisitPreference,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl ParticipantProfile {
    pub fn location_info(&self) -> LocationInfo {
        LocationInfo {
            coordinate: match (self.latitude, self.longitude) {
                (Some(lat), Some(lon)) => Some(Coordinate::new(lat, lon)),
                _ => None,
            },
            city: self.city.clone(),
            state: self.state.clone(),
        }
    }
}

/// Trial age bound as found in corpus files: a number of years or free text
/// such as "18 Years" or "6 Months"
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AgeField {
    Years(f64),
    Text(String),
}

/// One candidate clinical study from the corpus
///
/// Read-only for the engine. Location may carry a coordinate, city/state
/// text, both, or neither.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialRecord {
    #[serde(alias = "nct_id", rename = "nctId")]
    pub nct_id: String,
    pub title: String,
    #[serde(default)]
    pub conditions: Option<String>,
    #[serde(default)]
    pub eligibility: Option<String>,
    #[serde(alias = "min_age", rename = "minAge", default)]
    pub min_age: Option<AgeField>,
    #[serde(alias = "max_age", rename = "maxAge", default)]
    pub max_age: Option<AgeField>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(alias = "remote_visits", rename = "remoteVisits", default)]
    pub remote_visits: Option<bool>,
}

impl TrialRecord {
    pub fn location_info(&self) -> LocationInfo {
        LocationInfo {
            coordinate: match (self.latitude, self.longitude) {
                (Some(lat), Some(lon)) => Some(Coordinate::new(lat, lon)),
                _ => None,
            },
            city: self.city.clone(),
            state: self.state.clone(),
        }
    }

    /// Combined condition + eligibility text, lowercased for keyword checks
    pub fn criteria_text(&self) -> String {
        let mut text = String::new();
        if let Some(conditions) = &self.conditions {
            text.push_str(conditions);
        }
        if let Some(eligibility) = &self.eligibility {
            if !text.is_empty() {
                text.push(' ');
            }
            text.push_str(eligibility);
        }
        text.to_lowercase()
    }

    /// Registry link, derived from the NCT id when the corpus carries none
    pub fn study_url(&self) -> String {
        match &self.url {
            Some(url) => url.clone(),
            None => format!("https://clinicaltrials.gov/study/{}", self.nct_id),
        }
    }

    /// Human-readable site location for display fields
    pub fn location_text(&self) -> Option<String> {
        let parts: Vec<&str> = [self.city.as_deref(), self.state.as_deref(), self.country.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }
}

/// Location view shared by profiles and trial sites
#[derive(Debug, Clone, Default)]
pub struct LocationInfo {
    pub coordinate: Option<Coordinate>,
    pub city: Option<String>,
    pub state: Option<String>,
}

impl LocationInfo {
    /// Coordinate suitable for distance computation; out-of-range
    /// coordinates are treated as absent rather than raised
    pub fn usable_coordinate(&self) -> Option<Coordinate> {
        self.coordinate.filter(Coordinate::is_valid)
    }
}

/// Participant-relative distance grouping
///
/// Variant order is presentation precedence: nearer buckets always render
/// before farther ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProximityBucket {
    NearYou,
    Regional,
    National,
    Other,
}

impl ProximityBucket {
    pub fn label(&self) -> &'static str {
        match self {
            ProximityBucket::NearYou => "Near you",
            ProximityBucket::Regional => "In your region",
            ProximityBucket::National => "Across the country",
            ProximityBucket::Other => "Other locations",
        }
    }
}

impl std::fmt::Display for ProximityBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Scored trial ready for presentation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialMatch {
    #[serde(rename = "nctId")]
    pub nct_id: String,
    pub title: String,
    pub summary: Option<String>,
    pub contact: Option<String>,
    pub location: Option<String>,
    pub url: String,
    pub score: f64,
    pub rationale: Vec<String>,
    pub bucket: ProximityBucket,
    #[serde(rename = "distanceKm")]
    pub distance_km: Option<f64>,
}

/// One presentation bucket with its ordered matches
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchGroup {
    pub bucket: ProximityBucket,
    pub label: String,
    pub matches: Vec<TrialMatch>,
}

/// Tunable constants for filtering, classification, and scoring
///
/// Every threshold the pipeline consults lives here so call sites never
/// hard-code their own values.
#[derive(Debug, Clone)]
pub struct MatchTuning {
    /// Coordinate distance (km) at or under which a site counts as NearYou
    pub near_km: f64,
    /// Coordinate distance (km) at or under which a site counts as Regional
    pub regional_km: f64,
    /// Score contribution recorded for passing the relevance rule
    pub relevance_base: f64,
    pub near_score: f64,
    pub regional_score: f64,
    pub national_score: f64,
    /// Subtracted from the bucket partial when the bucket was confirmed by
    /// text match only, not coordinates
    pub text_confidence_penalty: f64,
    /// Floor partial for pairs with no location signal; must stay nonzero
    pub unknown_location_score: f64,
    pub comorbidity_bonus: f64,
    pub remote_bonus: f64,
    pub condition_keywords: Vec<String>,
    pub comorbidity_vocabulary: Vec<String>,
    pub recruiting_statuses: Vec<String>,
    pub service_country: Option<String>,
}

impl Default for MatchTuning {
    fn default() -> Self {
        Self {
            near_km: 50.0,
            regional_km: 300.0,
            relevance_base: 2.0,
            near_score: 3.0,
            regional_score: 2.0,
            national_score: 1.0,
            text_confidence_penalty: 0.5,
            unknown_location_score: 0.5,
            comorbidity_bonus: 1.0,
            remote_bonus: 1.0,
            condition_keywords: vec![
                "autism".to_string(),
                "asd".to_string(),
                "asperger".to_string(),
                "pervasive developmental".to_string(),
            ],
            comorbidity_vocabulary: vec![
                "adhd".to_string(),
                "anxiety".to_string(),
                "depression".to_string(),
                "epilepsy".to_string(),
                "seizure".to_string(),
                "gastrointestinal".to_string(),
                "intellectual disability".to_string(),
                "ocd".to_string(),
                "sleep".to_string(),
                "speech".to_string(),
            ],
            recruiting_statuses: vec![
                "recruiting".to_string(),
                "enrolling by invitation".to_string(),
                "available".to_string(),
            ],
            service_country: Some("United States".to_string()),
        }
    }
}

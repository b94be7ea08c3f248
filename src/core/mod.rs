// Core algorithm exports
pub mod distance;
pub mod eligibility;
pub mod geocode;
pub mod grouping;
pub mod matcher;
pub mod proximity;
pub mod scoring;

pub use distance::{distance_km, GeoError};
pub use eligibility::{check_eligibility, parse_age_bound, Exclusion};
pub use geocode::{Geocoder, NullGeocoder};
pub use grouping::{group_and_rank, DEFAULT_RESULT_LIMIT};
pub use matcher::{MatchObserver, MatchOutcome, Matcher, TracingObserver};
pub use proximity::{classify, ProximityAssessment};
pub use scoring::score_trial;

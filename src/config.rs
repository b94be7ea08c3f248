use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::models::MatchTuning;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub corpus: CorpusSettings,
    #[serde(default)]
    pub crm: CrmSettings,
    #[serde(default)]
    pub geocoder: GeocoderSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorpusSettings {
    #[serde(default = "default_corpus_path")]
    pub path: String,
    #[serde(default = "default_corpus_ttl")]
    pub ttl_secs: u64,
}

impl Default for CorpusSettings {
    fn default() -> Self {
        Self {
            path: default_corpus_path(),
            ttl_secs: default_corpus_ttl(),
        }
    }
}

fn default_corpus_path() -> String {
    "data/indexed_studies.json".to_string()
}
fn default_corpus_ttl() -> u64 {
    300
}

/// CRM delivery is disabled unless an endpoint is configured
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CrmSettings {
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeocoderSettings {
    #[serde(default)]
    pub table_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_result_limit")]
    pub default_limit: usize,
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,
    #[serde(default = "default_near_km")]
    pub near_km: f64,
    #[serde(default = "default_regional_km")]
    pub regional_km: f64,
    #[serde(default = "default_service_country")]
    pub service_country: Option<String>,
    #[serde(default = "default_condition_keywords")]
    pub condition_keywords: Vec<String>,
    #[serde(default = "default_comorbidity_vocabulary")]
    pub comorbidity_vocabulary: Vec<String>,
    #[serde(default = "default_recruiting_statuses")]
    pub recruiting_statuses: Vec<String>,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            default_limit: default_result_limit(),
            max_limit: default_max_limit(),
            near_km: default_near_km(),
            regional_km: default_regional_km(),
            service_country: default_service_country(),
            condition_keywords: default_condition_keywords(),
            comorbidity_vocabulary: default_comorbidity_vocabulary(),
            recruiting_statuses: default_recruiting_statuses(),
        }
    }
}

fn default_result_limit() -> usize {
    10
}
fn default_max_limit() -> usize {
    100
}
fn default_near_km() -> f64 {
    50.0
}
fn default_regional_km() -> f64 {
    300.0
}
fn default_service_country() -> Option<String> {
    MatchTuning::default().service_country
}
fn default_condition_keywords() -> Vec<String> {
    MatchTuning::default().condition_keywords
}
fn default_comorbidity_vocabulary() -> Vec<String> {
    MatchTuning::default().comorbidity_vocabulary
}
fn default_recruiting_statuses() -> Vec<String> {
    MatchTuning::default().recruiting_statuses
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_relevance_base")]
    pub relevance_base: f64,
    #[serde(default = "default_near_score")]
    pub near: f64,
    #[serde(default = "default_regional_score")]
    pub regional: f64,
    #[serde(default = "default_national_score")]
    pub national: f64,
    #[serde(default = "default_text_penalty")]
    pub text_penalty: f64,
    #[serde(default = "default_unknown_score")]
    pub unknown: f64,
    #[serde(default = "default_comorbidity_bonus")]
    pub comorbidity_bonus: f64,
    #[serde(default = "default_remote_bonus")]
    pub remote_bonus: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            relevance_base: default_relevance_base(),
            near: default_near_score(),
            regional: default_regional_score(),
            national: default_national_score(),
            text_penalty: default_text_penalty(),
            unknown: default_unknown_score(),
            comorbidity_bonus: default_comorbidity_bonus(),
            remote_bonus: default_remote_bonus(),
        }
    }
}

fn default_relevance_base() -> f64 {
    2.0
}
fn default_near_score() -> f64 {
    3.0
}
fn default_regional_score() -> f64 {
    2.0
}
fn default_national_score() -> f64 {
    1.0
}
fn default_text_penalty() -> f64 {
    0.5
}
fn default_unknown_score() -> f64 {
    0.5
}
fn default_comorbidity_bonus() -> f64 {
    1.0
}
fn default_remote_bonus() -> f64 {
    1.0
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "json".to_string()
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Environment variables (prefixed with HEYTRIAL_)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            // Add default config file
            .add_source(File::with_name("config/default").required(false))
            // Add local config file (for development overrides)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables (prefixed with HEYTRIAL_)
            // e.g., HEYTRIAL_SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("HEYTRIAL")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("HEYTRIAL")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Tuning constants handed to the matcher
    pub fn tuning(&self) -> MatchTuning {
        MatchTuning {
            near_km: self.matching.near_km,
            regional_km: self.matching.regional_km,
            relevance_base: self.scoring.weights.relevance_base,
            near_score: self.scoring.weights.near,
            regional_score: self.scoring.weights.regional,
            national_score: self.scoring.weights.national,
            text_confidence_penalty: self.scoring.weights.text_penalty,
            unknown_location_score: self.scoring.weights.unknown,
            comorbidity_bonus: self.scoring.weights.comorbidity_bonus,
            remote_bonus: self.scoring.weights.remote_bonus,
            condition_keywords: self.matching.condition_keywords.clone(),
            comorbidity_vocabulary: self.matching.comorbidity_vocabulary.clone(),
            recruiting_statuses: self.matching.recruiting_statuses.clone(),
            service_country: self.matching.service_country.clone(),
        }
    }
}

/// Convenience environment overrides for deploy targets that only set flat
/// variables, e.g. CORPUS_PATH or CRM_API_KEY from a secret store
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(path) = env::var("CORPUS_PATH") {
        builder = builder.set_override("corpus.path", path)?;
    }
    if let Ok(endpoint) = env::var("CRM_ENDPOINT") {
        builder = builder.set_override("crm.endpoint", endpoint)?;
    }
    if let Ok(api_key) = env::var("CRM_API_KEY") {
        builder = builder.set_override("crm.api_key", api_key)?;
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights() {
        let weights = WeightsConfig::default();
        assert_eq!(weights.relevance_base, 2.0);
        assert_eq!(weights.near, 3.0);
        assert_eq!(weights.regional, 2.0);
        assert_eq!(weights.national, 1.0);
        assert_eq!(weights.comorbidity_bonus, 1.0);
        assert_eq!(weights.remote_bonus, 1.0);
    }

    #[test]
    fn test_default_matching_thresholds() {
        let matching = MatchingSettings::default();
        assert_eq!(matching.near_km, 50.0);
        assert_eq!(matching.regional_km, 300.0);
        assert_eq!(matching.default_limit, 10);
        assert!(matching.condition_keywords.iter().any(|k| k == "autism"));
    }

    #[test]
    fn test_tuning_reflects_settings() {
        let mut settings = Settings::default();
        settings.matching.near_km = 25.0;
        settings.scoring.weights.near = 4.0;

        let tuning = settings.tuning();
        assert_eq!(tuning.near_km, 25.0);
        assert_eq!(tuning.near_score, 4.0);
    }

    #[test]
    fn test_default_logging() {
        let logging = LoggingSettings::default();
        assert_eq!(logging.level, "info");
        assert_eq!(logging.format, "json");
    }
}

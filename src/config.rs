//! YAML configuration file support for Pawmatch.
//!
//! One file holds the matcher tuning, the extraction confidence threshold
//! and the log setup used by the `pawmatch` binary. Every section is
//! optional; missing fields fall back to the library defaults.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//! name: "santiago"
//!
//! matcher:
//!   search_radius_km: 10.0
//!   min_match_score: 0.3
//!   rrf_k: 60
//!   embedding_dim: 1408
//!   max_limit: 100
//!   parallel: true
//!
//! extraction:
//!   min_confidence: 0.7
//!
//! logging:
//!   level: "info"
//!   json: false
//! ```
//!
//! ## Environment overrides
//!
//! | variable                    | field                      |
//! |-----------------------------|----------------------------|
//! | `PAWMATCH_SEARCH_RADIUS_KM` | `matcher.search_radius_km` |
//! | `PAWMATCH_MIN_MATCH_SCORE`  | `matcher.min_match_score`  |
//! | `PAWMATCH_LOG_LEVEL`        | `logging.level`            |

use std::fs;
use std::path::Path;

use attributes::DEFAULT_MIN_CONFIDENCE;
use matcher::MatcherConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const ENV_SEARCH_RADIUS_KM: &str = "PAWMATCH_SEARCH_RADIUS_KM";
pub const ENV_MIN_MATCH_SCORE: &str = "PAWMATCH_MIN_MATCH_SCORE";
pub const ENV_LOG_LEVEL: &str = "PAWMATCH_LOG_LEVEL";

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),

    #[error("invalid value for {key}: {value:?}")]
    InvalidOverride { key: &'static str, value: String },
}

/// Top-level YAML configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PawmatchConfig {
    /// Configuration format version
    pub version: String,

    /// Optional configuration name/description
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub matcher: MatcherConfig,

    #[serde(default)]
    pub extraction: ExtractionYamlConfig,

    #[serde(default)]
    pub logging: LoggingYamlConfig,
}

impl PawmatchConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: PawmatchConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        self.matcher
            .validate()
            .map_err(|err| ConfigLoadError::Validation(err.to_string()))?;
        self.extraction.validate()?;
        self.logging.validate()?;

        Ok(())
    }

    /// Apply `PAWMATCH_*` overrides read through `lookup`, then re-validate.
    ///
    /// `lookup` maps a variable name to its value; pass
    /// `|key| std::env::var(key).ok()` for the process environment.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigLoadError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_SEARCH_RADIUS_KM) {
            self.matcher.search_radius_km = parse_override(ENV_SEARCH_RADIUS_KM, raw)?;
        }
        if let Some(raw) = lookup(ENV_MIN_MATCH_SCORE) {
            self.matcher.min_match_score = parse_override(ENV_MIN_MATCH_SCORE, raw)?;
        }
        if let Some(raw) = lookup(ENV_LOG_LEVEL) {
            self.logging.level = raw.trim().to_string();
        }
        self.validate()
    }

    /// Shorthand for [`Self::apply_env_overrides`] against the process environment.
    pub fn apply_process_env(&mut self) -> Result<(), ConfigLoadError> {
        self.apply_env_overrides(|key| std::env::var(key).ok())
    }

    /// Runtime configuration for [`matcher::RankingEngine`].
    pub fn to_matcher_config(&self) -> MatcherConfig {
        self.matcher.clone()
    }
}

impl Default for PawmatchConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            name: None,
            matcher: MatcherConfig::default(),
            extraction: ExtractionYamlConfig::default(),
            logging: LoggingYamlConfig::default(),
        }
    }
}

fn parse_override(key: &'static str, raw: String) -> Result<f64, ConfigLoadError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| ConfigLoadError::InvalidOverride { key, value: raw })
}

/// Attribute extraction YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionYamlConfig {
    /// Extractions reporting a lower confidence are not used as query attributes.
    #[serde(default = "default_min_confidence")]
    pub min_confidence: f64,
}

impl ExtractionYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(ConfigLoadError::Validation(
                "extraction.min_confidence must be between 0.0 and 1.0".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ExtractionYamlConfig {
    fn default() -> Self {
        Self {
            min_confidence: default_min_confidence(),
        }
    }
}

/// Logging YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingYamlConfig {
    /// `EnvFilter` directive, e.g. `"info"` or `"pawmatch=debug,matcher=debug"`.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl LoggingYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.level.trim().is_empty() {
            return Err(ConfigLoadError::Validation(
                "logging.level must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for LoggingYamlConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_min_confidence() -> f64 {
    DEFAULT_MIN_CONFIDENCE
}
fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_load_valid_yaml() {
        let yaml = r#"
version: "1.0"
name: "test config"
matcher:
  search_radius_km: 25.0
extraction:
  min_confidence: 0.8
"#;

        let config = PawmatchConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.name, Some("test config".to_string()));
        assert_eq!(config.matcher.search_radius_km, 25.0);
        assert_eq!(config.matcher.min_match_score, 0.3);
        assert_eq!(config.extraction.min_confidence, 0.8);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_from_file() {
        let yaml = r#"
version: "1"
logging:
  level: "debug"
  json: true
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(yaml.as_bytes()).unwrap();

        let config = PawmatchConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.version, "1");
        assert!(config.logging.json);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_default_config() {
        let config = PawmatchConfig::default();
        assert_eq!(config.version, "1.0");
        assert!(config.name.is_none());
        assert!(config.validate().is_ok());
        assert_eq!(config.to_matcher_config(), MatcherConfig::default());
    }

    #[test]
    fn test_unsupported_version() {
        let result = PawmatchConfig::from_yaml("version: \"2.0\"\n");
        assert!(matches!(
            result,
            Err(ConfigLoadError::UnsupportedVersion(v)) if v == "2.0"
        ));
    }

    #[test]
    fn test_matcher_validation() {
        let yaml = r#"
version: "1.0"
matcher:
  min_match_score: 1.5
"#;

        let result = PawmatchConfig::from_yaml(yaml);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("min_match_score"));
    }

    #[test]
    fn test_extraction_validation() {
        let yaml = r#"
version: "1.0"
extraction:
  min_confidence: -0.1
"#;

        let result = PawmatchConfig::from_yaml(yaml);
        assert!(result.unwrap_err().to_string().contains("min_confidence"));
    }

    #[test]
    fn test_env_overrides_apply() {
        let mut config = PawmatchConfig::default();
        config
            .apply_env_overrides(lookup_from(&[
                (ENV_SEARCH_RADIUS_KM, "5.5"),
                (ENV_MIN_MATCH_SCORE, " 0.45 "),
                (ENV_LOG_LEVEL, "warn"),
            ]))
            .unwrap();

        assert_eq!(config.matcher.search_radius_km, 5.5);
        assert_eq!(config.matcher.min_match_score, 0.45);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_env_override_unparseable() {
        let mut config = PawmatchConfig::default();
        let err = config
            .apply_env_overrides(lookup_from(&[(ENV_SEARCH_RADIUS_KM, "far")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigLoadError::InvalidOverride { key: ENV_SEARCH_RADIUS_KM, .. }
        ));
    }

    #[test]
    fn test_env_override_revalidates() {
        let mut config = PawmatchConfig::default();
        let err = config
            .apply_env_overrides(lookup_from(&[(ENV_MIN_MATCH_SCORE, "2")]))
            .unwrap_err();
        assert!(matches!(err, ConfigLoadError::Validation(_)));
    }

    #[test]
    fn test_no_overrides_is_noop() {
        let mut config = PawmatchConfig::default();
        config.apply_env_overrides(|_| None).unwrap();
        assert_eq!(config.matcher, MatcherConfig::default());
    }

    #[test]
    fn test_full_yaml_roundtrip() {
        let yaml = r#"
version: "1.0"
name: "production"
matcher:
  search_radius_km: 15.0
  min_match_score: 0.35
  rrf_k: 60
  embedding_dim: 1408
  max_limit: 50
  parallel: false
extraction:
  min_confidence: 0.75
logging:
  level: "pawmatch=debug"
  json: true
"#;

        let config = PawmatchConfig::from_yaml(yaml).unwrap();
        let serialized = serde_yaml::to_string(&config).unwrap();
        let reparsed = PawmatchConfig::from_yaml(&serialized).unwrap();
        assert_eq!(reparsed.matcher, config.matcher);
        assert!(!reparsed.matcher.parallel);
        assert_eq!(reparsed.extraction.min_confidence, 0.75);
        assert_eq!(reparsed.logging.level, "pawmatch=debug");
    }
}

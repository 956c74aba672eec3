use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::core::Matcher;
use crate::models::{ScoringWeights, MAX_SCORE_PRECISION};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    pub auth: AuthSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// Postgres connection string, or `memory` for the in-process store
    pub url: String,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
    pub idle_timeout_secs: Option<u64>,
}

impl DatabaseSettings {
    pub fn is_memory(&self) -> bool {
        self.url.eq_ignore_ascii_case("memory")
    }
}

/// Matching policy: scoring weights, acceptance threshold and reply texts
#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_recall_weight")]
    pub recall_weight: f64,
    #[serde(default = "default_precision_weight")]
    pub precision_weight: f64,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    #[serde(default = "default_fallback_reply")]
    pub fallback_reply: String,
    #[serde(default = "default_empty_reply")]
    pub empty_reply: String,
    #[serde(default = "default_score_precision")]
    pub score_precision: u32,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            recall_weight: default_recall_weight(),
            precision_weight: default_precision_weight(),
            threshold: default_threshold(),
            fallback_reply: default_fallback_reply(),
            empty_reply: default_empty_reply(),
            score_precision: default_score_precision(),
        }
    }
}

impl MatchingSettings {
    pub fn weights(&self) -> ScoringWeights {
        ScoringWeights {
            recall: self.recall_weight,
            precision: self.precision_weight,
        }
    }

    pub fn matcher(&self) -> Matcher {
        Matcher::new(self.weights(), self.threshold)
    }

    /// Weights must be finite, non-negative and sum to 1 so scores stay in [0, 1]
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, weight) in [("recall_weight", self.recall_weight), ("precision_weight", self.precision_weight)] {
            if !weight.is_finite() || weight < 0.0 {
                return Err(ConfigError::Message(format!(
                    "matching.{} must be a finite non-negative number, got {}",
                    name, weight
                )));
            }
        }
        let sum = self.recall_weight + self.precision_weight;
        if (sum - 1.0).abs() > 1e-9 {
            return Err(ConfigError::Message(format!(
                "matching weights must sum to 1.0, got {}",
                sum
            )));
        }
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(ConfigError::Message(format!(
                "matching threshold must be within [0, 1], got {}",
                self.threshold
            )));
        }
        if self.score_precision > MAX_SCORE_PRECISION {
            return Err(ConfigError::Message(format!(
                "matching.score_precision must be at most {}, got {}",
                MAX_SCORE_PRECISION, self.score_precision
            )));
        }
        Ok(())
    }
}

fn default_recall_weight() -> f64 { 0.6 }
fn default_precision_weight() -> f64 { 0.4 }
fn default_threshold() -> f64 { crate::core::DEFAULT_THRESHOLD }
fn default_fallback_reply() -> String {
    "Sorry, I couldn't find an exact answer. Please contact an admin or try rephrasing your question."
        .to_string()
}
fn default_empty_reply() -> String { "Please type a question.".to_string() }
fn default_score_precision() -> u32 { 3 }

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    pub jwt_secret: String,
    #[serde(default = "default_token_ttl")]
    pub token_ttl_secs: u64,
    #[serde(default = "default_admin_username")]
    pub default_admin_username: String,
    pub default_admin_password: String,
}

fn default_token_ttl() -> u64 { 8 * 60 * 60 }
fn default_admin_username() -> String { "admin".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    #[serde(default = "default_cache_ttl")]
    pub ttl_secs: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self { ttl_secs: default_cache_ttl() }
    }
}

fn default_cache_ttl() -> u64 { 60 }

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

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with FAQBOT__)
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., FAQBOT__SERVER__PORT -> server.port
            .add_source(env_source());

        // DATABASE_URL wins over everything, as most hosting platforms set it
        if let Ok(url) = std::env::var("DATABASE_URL") {
            builder = builder.set_override("database.url", url)?;
        }

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings: Settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(env_source())
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.matching.validate()?;
        if self.auth.jwt_secret.trim().is_empty() {
            return Err(ConfigError::Message("auth.jwt_secret must be set".to_string()));
        }
        Ok(())
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("FAQBOT")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matching() {
        let matching = MatchingSettings::default();
        assert_eq!(matching.recall_weight, 0.6);
        assert_eq!(matching.precision_weight, 0.4);
        assert_eq!(matching.threshold, 0.25);
        assert_eq!(matching.empty_reply, "Please type a question.");
        assert_eq!(matching.score_precision, 3);
        assert!(matching.validate().is_ok());
    }

    #[test]
    fn test_weights_must_sum_to_one() {
        let matching = MatchingSettings {
            recall_weight: 0.7,
            precision_weight: 0.4,
            ..MatchingSettings::default()
        };
        assert!(matching.validate().is_err());
    }

    #[test]
    fn test_negative_weight_rejected() {
        let matching = MatchingSettings {
            recall_weight: 1.2,
            precision_weight: -0.2,
            ..MatchingSettings::default()
        };
        assert!(matching.validate().is_err());
    }

    #[test]
    fn test_threshold_range() {
        let matching = MatchingSettings {
            threshold: 1.5,
            ..MatchingSettings::default()
        };
        assert!(matching.validate().is_err());
    }

    #[test]
    fn test_nan_weight_rejected() {
        let matching = MatchingSettings {
            recall_weight: f64::NAN,
            ..MatchingSettings::default()
        };
        assert!(matching.validate().is_err());

        let matching = MatchingSettings {
            precision_weight: f64::NAN,
            ..MatchingSettings::default()
        };
        assert!(matching.validate().is_err());
    }

    #[test]
    fn test_infinite_weight_rejected() {
        let matching = MatchingSettings {
            recall_weight: f64::INFINITY,
            precision_weight: f64::NEG_INFINITY,
            ..MatchingSettings::default()
        };
        assert!(matching.validate().is_err());
    }

    #[test]
    fn test_nan_threshold_rejected() {
        let matching = MatchingSettings {
            threshold: f64::NAN,
            ..MatchingSettings::default()
        };
        assert!(matching.validate().is_err());
    }

    #[test]
    fn test_score_precision_capped() {
        let matching = MatchingSettings {
            score_precision: MAX_SCORE_PRECISION,
            ..MatchingSettings::default()
        };
        assert!(matching.validate().is_ok());

        let matching = MatchingSettings {
            score_precision: u32::MAX,
            ..MatchingSettings::default()
        };
        assert!(matching.validate().is_err());
    }

    #[test]
    fn test_default_logging() {
        let logging = LoggingSettings::default();
        assert_eq!(logging.level, "info");
        assert_eq!(logging.format, "json");
    }

    #[test]
    fn test_load_from_file() {
        let dir = std::env::temp_dir().join(format!("faqbot-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("test.toml");
        std::fs::write(
            &path,
            r#"
[server]
host = "127.0.0.1"
port = 9000

[database]
url = "memory"

[matching]
threshold = 0.3

[auth]
jwt_secret = "test-secret"
default_admin_password = "secret"
"#,
        )
        .unwrap();

        let settings = Settings::load_from(&path).unwrap();

        assert_eq!(settings.server.port, 9000);
        assert!(settings.database.is_memory());
        assert_eq!(settings.matching.threshold, 0.3);
        assert_eq!(settings.matching.recall_weight, 0.6);
        assert_eq!(settings.auth.default_admin_username, "admin");
        assert_eq!(settings.cache.ttl_secs, 60);

        std::fs::remove_dir_all(&dir).ok();
    }
}

use std::env;
use std::fmt;
use std::time::Duration;

use crate::assessments::AggregationConfig;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the scoring engine, read from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    /// TTL applied when the service repopulates a cached composite.
    pub composite_cache_ttl: Duration,
    pub aggregation: AggregationConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let ttl_secs = env::var("COMPOSITE_CACHE_TTL_SECS")
            .unwrap_or_else(|_| "300".to_string())
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidCacheTtl)?;

        let mut aggregation = AggregationConfig::default();
        if let Ok(raw) = env::var("SCORE_BLEND_RATIO") {
            let blend = raw
                .parse::<f64>()
                .map_err(|_| ConfigError::InvalidBlendRatio { value: raw.clone() })?;
            if !(blend > 0.0 && blend <= 1.0) {
                return Err(ConfigError::InvalidBlendRatio { value: raw });
            }
            aggregation.dimension_blend = blend;
        }

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            composite_cache_ttl: Duration::from_secs(ttl_secs),
            aggregation,
        })
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidCacheTtl,
    InvalidBlendRatio { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidCacheTtl => {
                write!(f, "COMPOSITE_CACHE_TTL_SECS must be a valid u64")
            }
            ConfigError::InvalidBlendRatio { value } => {
                write!(f, "SCORE_BLEND_RATIO '{value}' must be a decimal in (0,1]")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

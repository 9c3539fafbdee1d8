use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use crate::eligibility::EngineConfig;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Staging,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "staging" | "stage" => Self::Staging,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub eligibility: EligibilityConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let log_format = LogFormat::from_str(
            &env::var("APP_LOG_FORMAT").unwrap_or_else(|_| "text".to_string()),
        );

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig {
                log_level,
                log_format,
            },
            eligibility: EligibilityConfig::from_env()?,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Output layout for the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub log_format: LogFormat,
}

const DEFAULT_MAX_EVALUATION_SECS: f64 = 5.0;

/// Engine dials and the catalog source.
#[derive(Debug, Clone, PartialEq)]
pub struct EligibilityConfig {
    pub max_evaluation_time: Duration,
    pub catalog_path: Option<PathBuf>,
    pub report_ineligible: bool,
}

impl EligibilityConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let raw_budget = env::var("ELIGIBILITY_MAX_EVALUATION_SECS")
            .unwrap_or_else(|_| DEFAULT_MAX_EVALUATION_SECS.to_string());
        let seconds = raw_budget
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite() && *value > 0.0)
            .ok_or(ConfigError::InvalidEvaluationBudget { value: raw_budget })?;

        let catalog_path = env::var("ELIGIBILITY_CATALOG_PATH")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);

        let report_ineligible = match env::var("ELIGIBILITY_REPORT_INELIGIBLE") {
            Ok(value) => parse_flag(&value).ok_or(ConfigError::InvalidFlag {
                name: "ELIGIBILITY_REPORT_INELIGIBLE",
                value,
            })?,
            Err(_) => false,
        };

        Ok(Self {
            max_evaluation_time: Duration::from_secs_f64(seconds),
            catalog_path,
            report_ineligible,
        })
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            max_evaluation_time: self.max_evaluation_time,
            report_ineligible: self.report_ineligible,
            ..EngineConfig::default()
        }
    }
}

impl Default for EligibilityConfig {
    fn default() -> Self {
        Self {
            max_evaluation_time: Duration::from_secs_f64(DEFAULT_MAX_EVALUATION_SECS),
            catalog_path: None,
            report_ineligible: false,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidEvaluationBudget { value: String },
    InvalidFlag { name: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidEvaluationBudget { value } => write!(
                f,
                "ELIGIBILITY_MAX_EVALUATION_SECS must be a positive number of seconds (found '{value}')"
            ),
            ConfigError::InvalidFlag { name, value } => {
                write!(f, "{name} must be true or false (found '{value}')")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidEvaluationBudget { .. }
            | ConfigError::InvalidFlag { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_HOST");
        env::remove_var("APP_PORT");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("APP_LOG_FORMAT");
        env::remove_var("ELIGIBILITY_MAX_EVALUATION_SECS");
        env::remove_var("ELIGIBILITY_CATALOG_PATH");
        env::remove_var("ELIGIBILITY_REPORT_INELIGIBLE");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.telemetry.log_format, LogFormat::Text);
        assert_eq!(config.eligibility, EligibilityConfig::default());
        assert_eq!(
            config.eligibility.max_evaluation_time,
            Duration::from_secs(5)
        );
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 8000));
    }

    #[test]
    fn reads_eligibility_overrides() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_ENV", "production");
        env::set_var("APP_LOG_FORMAT", "JSON");
        env::set_var("ELIGIBILITY_MAX_EVALUATION_SECS", "2.5");
        env::set_var("ELIGIBILITY_CATALOG_PATH", "config/schemes.json");
        env::set_var("ELIGIBILITY_REPORT_INELIGIBLE", "yes");

        let config = AppConfig::load().expect("config loads");
        reset_env();

        assert_eq!(config.environment, AppEnvironment::Production);
        assert_eq!(config.telemetry.log_format, LogFormat::Json);
        assert_eq!(
            config.eligibility.max_evaluation_time,
            Duration::from_millis(2500)
        );
        assert_eq!(
            config.eligibility.catalog_path,
            Some(PathBuf::from("config/schemes.json"))
        );
        let engine = config.eligibility.engine_config();
        assert!(engine.report_ineligible);
        assert_eq!(engine.max_evaluation_time, Duration::from_millis(2500));
    }

    #[test]
    fn rejects_non_positive_budget() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("ELIGIBILITY_MAX_EVALUATION_SECS", "0");
        let result = AppConfig::load();
        reset_env();

        match result {
            Err(ConfigError::InvalidEvaluationBudget { value }) => assert_eq!(value, "0"),
            other => panic!("expected invalid budget error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unrecognised_flag_values() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("ELIGIBILITY_REPORT_INELIGIBLE", "sometimes");
        let result = AppConfig::load();
        reset_env();

        assert!(matches!(result, Err(ConfigError::InvalidFlag { .. })));
    }
}

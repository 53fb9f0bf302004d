use std::env;
use std::fmt;

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

/// Top-level configuration for the coordination engine.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub workflow: WorkflowConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let default_max_volunteers = env::var("APP_DEFAULT_MAX_VOLUNTEERS")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u32>()
            .map_err(|_| ConfigError::InvalidMaxVolunteers)?;
        if default_max_volunteers == 0 {
            return Err(ConfigError::InvalidMaxVolunteers);
        }

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            workflow: WorkflowConfig {
                default_max_volunteers,
            },
        })
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Defaults applied when a project is created without explicit limits.
#[derive(Debug, Clone)]
pub struct WorkflowConfig {
    pub default_max_volunteers: u32,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidMaxVolunteers,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidMaxVolunteers => {
                write!(f, "APP_DEFAULT_MAX_VOLUNTEERS must be a positive u32")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

use chrono::NaiveDate;
use std::env;
use std::path::PathBuf;
use thiserror::Error;

/// Distinguishes runtime behavior for different stages of the tool.
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

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub plan: PlanConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let defaults = PlanConfig::default();
        let portfolio_path = env::var("PLAN_PORTFOLIO_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.portfolio_path);
        let output_path = env::var("PLAN_OUTPUT_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.output_path);

        let seed = match env::var("PLAN_SEED") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidSeed(raw))?,
            Err(_) => defaults.seed,
        };

        let fallback_start = date_var("PLAN_FALLBACK_START", defaults.fallback_start)?;
        let fallback_end = date_var("PLAN_FALLBACK_END", defaults.fallback_end)?;
        let jitter_min = factor_var("PLAN_JITTER_MIN", defaults.jitter_min)?;
        let jitter_max = factor_var("PLAN_JITTER_MAX", defaults.jitter_max)?;

        let plan = PlanConfig {
            portfolio_path,
            output_path,
            seed,
            fallback_start,
            fallback_end,
            jitter_min,
            jitter_max,
        };
        plan.validate()?;

        Ok(Self {
            environment,
            plan,
            telemetry: TelemetryConfig { log_level },
        })
    }
}

pub const DEFAULT_FALLBACK_START: NaiveDate = const_date(2023, 1, 1);
pub const DEFAULT_FALLBACK_END: NaiveDate = const_date(2024, 9, 1);

// Evaluated at compile time, so an impossible date fails the build.
const fn const_date(year: i32, month: u32, day: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => date,
        None => panic!("invalid default date"),
    }
}

/// Inputs, outputs and demo constants of a plan run.
///
/// The fallback date range and the jitter bounds only exist to keep the
/// generated fixtures non-null; they carry no valuation meaning.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanConfig {
    pub portfolio_path: PathBuf,
    pub output_path: PathBuf,
    pub seed: u64,
    pub fallback_start: NaiveDate,
    pub fallback_end: NaiveDate,
    pub jitter_min: f64,
    pub jitter_max: f64,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            portfolio_path: PathBuf::from("public/portfolioData.json"),
            output_path: PathBuf::from("public/revaluationPlan.json"),
            seed: 130,
            fallback_start: DEFAULT_FALLBACK_START,
            fallback_end: DEFAULT_FALLBACK_END,
            jitter_min: 0.8,
            jitter_max: 1.2,
        }
    }
}

impl PlanConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fallback_start > self.fallback_end {
            return Err(ConfigError::InvertedFallbackRange {
                start: self.fallback_start,
                end: self.fallback_end,
            });
        }
        if self.jitter_min > self.jitter_max {
            return Err(ConfigError::InvertedJitterRange {
                min: self.jitter_min,
                max: self.jitter_max,
            });
        }
        Ok(())
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("PLAN_SEED must be an unsigned integer, got '{0}'")]
    InvalidSeed(String),
    #[error("{name} must be a YYYY-MM-DD date, got '{value}'")]
    InvalidDate { name: &'static str, value: String },
    #[error("{name} must be a positive finite number, got '{value}'")]
    InvalidFactor { name: &'static str, value: String },
    #[error("fallback range start {start} is after its end {end}")]
    InvertedFallbackRange { start: NaiveDate, end: NaiveDate },
    #[error("jitter lower bound {min} exceeds upper bound {max}")]
    InvertedJitterRange { min: f64, max: f64 },
}

fn date_var(name: &'static str, default: NaiveDate) -> Result<NaiveDate, ConfigError> {
    match env::var(name) {
        Ok(value) => NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
            .map_err(|_| ConfigError::InvalidDate { name, value }),
        Err(_) => Ok(default),
    }
}

fn factor_var(name: &'static str, default: f64) -> Result<f64, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|factor| factor.is_finite() && *factor > 0.0)
            .ok_or(ConfigError::InvalidFactor { name, value }),
        Err(_) => Ok(default),
    }
}

use crate::pipeline::SurveyPipeline;
use crate::scoring::ScoreWeights;
use crate::survey::{SchemaError, SurveySchema};
use std::env;
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Distinguishes runtime behavior for different stages of the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn parse(value: &str) -> Self {
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
    pub survey: SurveyConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::parse(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let header_rows = match env::var("SURVEY_HEADER_ROWS") {
            Ok(value) => value
                .trim()
                .parse::<usize>()
                .map_err(|_| ConfigError::InvalidHeaderRows { value })?,
            Err(_) => 1,
        };

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            survey: SurveyConfig {
                csv_path: path_var("SURVEY_CSV_PATH"),
                schema_path: path_var("SURVEY_SCHEMA_PATH"),
                weights_path: path_var("SURVEY_WEIGHTS_PATH"),
                header_rows,
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

fn path_var(name: &str) -> Option<PathBuf> {
    env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
}

/// Where survey data and its static configuration come from.
#[derive(Debug, Clone)]
pub struct SurveyConfig {
    pub csv_path: Option<PathBuf>,
    pub schema_path: Option<PathBuf>,
    pub weights_path: Option<PathBuf>,
    pub header_rows: usize,
}

impl Default for SurveyConfig {
    fn default() -> Self {
        Self {
            csv_path: None,
            schema_path: None,
            weights_path: None,
            header_rows: 1,
        }
    }
}

impl SurveyConfig {
    /// The configured schema file, or the built-in questionnaire.
    pub fn load_schema(&self) -> Result<SurveySchema, ConfigError> {
        let Some(path) = &self.schema_path else {
            return Ok(SurveySchema::standard());
        };

        SurveySchema::from_reader(open(path)?).map_err(|source| ConfigError::Schema {
            path: path.clone(),
            source,
        })
    }

    pub fn load_weights(&self) -> Result<ScoreWeights, ConfigError> {
        let Some(path) = &self.weights_path else {
            return Ok(ScoreWeights::default());
        };

        ScoreWeights::from_reader(open(path)?).map_err(|source| ConfigError::Weights {
            path: path.clone(),
            source,
        })
    }

    /// Fails fast when the schema cannot support scoring.
    pub fn pipeline(&self) -> Result<SurveyPipeline, ConfigError> {
        if self.schema_path.is_none() && self.weights_path.is_none() {
            return Ok(SurveyPipeline::standard());
        }

        let schema = self.load_schema()?;
        let weights = self.load_weights()?;
        SurveyPipeline::new(schema, weights).map_err(ConfigError::Scoring)
    }
}

fn open(path: &Path) -> Result<BufReader<File>, ConfigError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidHeaderRows {
        value: String,
    },
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },
    Schema {
        path: PathBuf,
        source: SchemaError,
    },
    Weights {
        path: PathBuf,
        source: serde_json::Error,
    },
    Scoring(SchemaError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidHeaderRows { value } => write!(
                f,
                "SURVEY_HEADER_ROWS must be a non-negative integer, got '{}'",
                value
            ),
            ConfigError::ReadFile { path, .. } => {
                write!(f, "unable to read {}", path.display())
            }
            ConfigError::Schema { path, .. } => {
                write!(f, "invalid survey schema in {}", path.display())
            }
            ConfigError::Weights { path, .. } => {
                write!(f, "invalid score weights in {}", path.display())
            }
            ConfigError::Scoring(err) => write!(f, "schema cannot be scored: {}", err),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHeaderRows { .. } => None,
            ConfigError::ReadFile { source, .. } => Some(source),
            ConfigError::Schema { source, .. } => Some(source),
            ConfigError::Weights { source, .. } => Some(source),
            ConfigError::Scoring(err) => Some(err),
        }
    }
}

use crate::config::ConfigError;
use crate::importer::SurveyImportError;
use crate::survey::SchemaError;
use crate::telemetry::TelemetryError;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Schema(SchemaError),
    Import(SurveyImportError),
    Io(std::io::Error),
    Output(serde_json::Error),
    MissingInput,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Schema(err) => write!(f, "schema error: {}", err),
            AppError::Import(err) => write!(f, "import error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Output(err) => write!(f, "could not encode output: {}", err),
            AppError::MissingInput => {
                write!(f, "no survey CSV given; pass --csv or set SURVEY_CSV_PATH")
            }
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Schema(err) => Some(err),
            AppError::Import(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Output(err) => Some(err),
            AppError::MissingInput => None,
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<SchemaError> for AppError {
    fn from(value: SchemaError) -> Self {
        Self::Schema(value)
    }
}

impl From<SurveyImportError> for AppError {
    fn from(value: SurveyImportError) -> Self {
        Self::Import(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Output(value)
    }
}

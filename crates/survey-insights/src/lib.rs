//! Normalization, scoring and aggregation engine for small-business
//! digitalization surveys.

pub mod analytics;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod importer;
pub mod pipeline;
pub mod scoring;
pub mod survey;
pub mod telemetry;

pub use dashboard::{DashboardReport, DashboardState, FilterOptions, LoadSummary, SurveyFilter};
pub use importer::{SurveyImportError, SurveyImporter};
pub use pipeline::{BusinessRecord, LoadOutcome, SkippedRow, SurveyPipeline};
pub use scoring::{ScoreCard, ScoreComponent, ScoreEngine, ScoreKind, ScoreWeights, SubFactor};
pub use survey::{FieldValue, QuestionSpec, QuestionType, SchemaError, SurveyResponse, SurveySchema};

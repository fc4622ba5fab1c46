use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use survey_insights::{BusinessRecord, DashboardReport, LoadSummary, SurveySchema};

/// Envelope shared by every command that reads a survey export.
#[derive(Debug, Serialize)]
pub struct Envelope<'a, T: Serialize> {
    pub generated_at: DateTime<Utc>,
    pub source: &'a Path,
    pub load: LoadSummary,
    #[serde(flatten)]
    pub body: T,
}

#[derive(Debug, Serialize)]
pub struct ReportBody {
    pub report: DashboardReport,
}

#[derive(Debug, Serialize)]
pub struct RecordsBody<'a> {
    pub records: &'a [BusinessRecord],
}

#[derive(Debug, Serialize)]
pub struct SchemaBody<'a> {
    pub generated_at: DateTime<Utc>,
    pub schema: &'a SurveySchema,
}

pub fn write_json<T: Serialize, W: Write>(
    mut writer: W,
    value: &T,
    pretty: bool,
) -> Result<(), serde_json::Error> {
    if pretty {
        serde_json::to_writer_pretty(&mut writer, value)?;
    } else {
        serde_json::to_writer(&mut writer, value)?;
    }
    writeln!(writer).map_err(serde_json::Error::io)
}

use crate::pipeline::{LoadOutcome, SurveyPipeline};
use crate::scoring::ScoreWeights;
use crate::survey::{RawRow, SchemaError, SurveySchema};
use std::io::Read;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum SurveyImportError {
    #[error("failed to read survey export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid survey CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("survey schema cannot be used: {0}")]
    Schema(#[from] SchemaError),
}

/// Reads survey CSV exports and runs them through a [`SurveyPipeline`].
#[derive(Debug, Clone)]
pub struct SurveyImporter {
    pipeline: SurveyPipeline,
    header_rows: usize,
}

impl SurveyImporter {
    pub fn new(pipeline: SurveyPipeline, header_rows: usize) -> Self {
        Self {
            pipeline,
            header_rows,
        }
    }

    /// Built-in questionnaire, default weights, one header row.
    pub fn standard() -> Self {
        Self::new(SurveyPipeline::standard(), 1)
    }

    pub fn with_schema(
        schema: SurveySchema,
        weights: ScoreWeights,
        header_rows: usize,
    ) -> Result<Self, SurveyImportError> {
        let pipeline = SurveyPipeline::new(schema, weights)?;
        Ok(Self::new(pipeline, header_rows))
    }

    pub fn pipeline(&self) -> &SurveyPipeline {
        &self.pipeline
    }

    pub fn header_rows(&self) -> usize {
        self.header_rows
    }

    pub fn from_path<P: AsRef<Path>>(&self, path: P) -> Result<LoadOutcome, SurveyImportError> {
        let rows = Self::read_path(path)?;
        Ok(self.pipeline.process(&rows, self.header_rows))
    }

    pub fn from_reader<R: Read>(&self, reader: R) -> Result<LoadOutcome, SurveyImportError> {
        let rows = Self::read_rows(reader)?;
        Ok(self.pipeline.process(&rows, self.header_rows))
    }

    pub fn read_path<P: AsRef<Path>>(path: P) -> Result<Vec<RawRow>, SurveyImportError> {
        let file = std::fs::File::open(path)?;
        Ok(Self::read_rows(file)?)
    }

    /// Raw rows exactly as exported. Header handling is left to the pipeline
    /// and ragged rows are kept. Cells that are not valid UTF-8 are decoded
    /// lossily so one mis-encoded answer does not drop the whole export.
    pub fn read_rows<R: Read>(reader: R) -> Result<Vec<RawRow>, csv::Error> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);
        let mut rows: Vec<RawRow> = Vec::new();

        for record in csv_reader.byte_records() {
            let record = record?;
            rows.push(
                record
                    .iter()
                    .map(|cell| String::from_utf8_lossy(cell).into_owned())
                    .collect(),
            );
        }

        Ok(rows)
    }
}

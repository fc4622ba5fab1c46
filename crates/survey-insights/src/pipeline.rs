use crate::scoring::{ScoreCard, ScoreEngine, ScoreWeights};
use crate::survey::{
    FieldValue, RawRow, RowNormalizer, RowRejection, SchemaError, SurveyResponse, SurveySchema,
};
use serde::Serialize;
use tracing::{debug, info};

/// A normalized response together with its composite scores.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BusinessRecord {
    #[serde(flatten)]
    pub response: SurveyResponse,
    pub scores: ScoreCard,
}

impl BusinessRecord {
    pub fn business_name(&self) -> &str {
        &self.response.business_name
    }

    pub fn answer(&self, key: &str) -> &FieldValue {
        self.response.answer(key)
    }

    pub fn choice(&self, key: &str) -> Option<&str> {
        self.response.choice(key)
    }

    pub fn choices(&self, key: &str) -> &[String] {
        self.response.choices(key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkippedRow {
    /// Zero-based index into the raw rows, header rows included.
    pub index: usize,
    pub reason: RowRejection,
}

/// Result of one load cycle.
#[derive(Debug, Clone, Default)]
pub struct LoadOutcome {
    pub records: Vec<BusinessRecord>,
    pub rows_read: usize,
    pub skipped: Vec<SkippedRow>,
}

/// Schema plus score engine: turns raw rows into scored business records.
#[derive(Debug, Clone)]
pub struct SurveyPipeline {
    schema: SurveySchema,
    engine: ScoreEngine,
}

impl SurveyPipeline {
    pub fn new(schema: SurveySchema, weights: ScoreWeights) -> Result<Self, SchemaError> {
        schema.validate()?;
        let engine = ScoreEngine::new(&schema, weights)?;
        Ok(Self { schema, engine })
    }

    pub fn standard() -> Self {
        Self {
            schema: SurveySchema::standard(),
            engine: ScoreEngine::standard(),
        }
    }

    pub fn schema(&self) -> &SurveySchema {
        &self.schema
    }

    pub fn engine(&self) -> &ScoreEngine {
        &self.engine
    }

    pub fn score(&self, response: SurveyResponse) -> BusinessRecord {
        let scores = self.engine.score(&response);
        BusinessRecord { response, scores }
    }

    /// Skips `header_rows` leading rows, then normalizes and scores the rest.
    /// Malformed rows are dropped and reported in the outcome, never raised.
    pub fn process(&self, rows: &[RawRow], header_rows: usize) -> LoadOutcome {
        let normalizer = RowNormalizer::new(&self.schema);
        let mut outcome = LoadOutcome {
            records: Vec::with_capacity(rows.len().saturating_sub(header_rows)),
            rows_read: rows.len(),
            skipped: Vec::new(),
        };

        for (index, row) in rows.iter().enumerate().skip(header_rows) {
            match normalizer.normalize_row(row.as_slice()) {
                Ok(response) => outcome.records.push(self.score(response)),
                Err(reason) => {
                    debug!(row = index, %reason, "skipping survey row");
                    outcome.skipped.push(SkippedRow { index, reason });
                }
            }
        }

        info!(
            rows_read = outcome.rows_read,
            records = outcome.records.len(),
            skipped = outcome.skipped.len(),
            "survey load cycle complete"
        );

        outcome
    }
}

use super::fields::{FieldNormalizer, FieldValue};
use super::schema::{QuestionSpec, SurveySchema};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// One CSV line as delivered by the parsing collaborator.
pub type RawRow = Vec<String>;

static MISSING: FieldValue = FieldValue::Missing;

/// A business's typed answers keyed by question key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurveyResponse {
    pub respondent_id: String,
    pub business_name: String,
    pub answers: BTreeMap<String, FieldValue>,
}

impl SurveyResponse {
    pub fn new(respondent_id: impl Into<String>, business_name: impl Into<String>) -> Self {
        Self {
            respondent_id: respondent_id.into(),
            business_name: business_name.into(),
            answers: BTreeMap::new(),
        }
    }

    pub fn answer(&self, key: &str) -> &FieldValue {
        self.answers.get(key).unwrap_or(&MISSING)
    }

    /// Single-choice or matrix answer.
    pub fn choice(&self, key: &str) -> Option<&str> {
        match self.answer(key) {
            FieldValue::Choice(value) | FieldValue::Cell(value) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn choices(&self, key: &str) -> &[String] {
        match self.answer(key) {
            FieldValue::Choices(items) => items,
            _ => &[],
        }
    }

    pub fn level(&self, key: &str) -> Option<i64> {
        match self.answer(key) {
            FieldValue::Level(level) => Some(*level),
            _ => None,
        }
    }
}

/// Why a raw row was left out of a load cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowRejection {
    TooShort { len: usize, required: usize },
    MissingBusinessName,
}

impl fmt::Display for RowRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowRejection::TooShort { len, required } => {
                write!(f, "row has {len} cell(s), at least {required} required")
            }
            RowRejection::MissingBusinessName => write!(f, "row has no business name"),
        }
    }
}

/// Applies every question of the schema to a raw row.
pub struct RowNormalizer<'a> {
    schema: &'a SurveySchema,
    fields: Vec<(&'a QuestionSpec, FieldNormalizer<'a>)>,
}

impl<'a> RowNormalizer<'a> {
    pub fn new(schema: &'a SurveySchema) -> Self {
        let fields = schema
            .questions()
            .iter()
            .map(|question| (question, FieldNormalizer::new(question)))
            .collect();

        Self { schema, fields }
    }

    pub fn normalize_row<S: AsRef<str>>(&self, row: &[S]) -> Result<SurveyResponse, RowRejection> {
        let required = self.schema.min_row_len();
        if row.len() < required {
            return Err(RowRejection::TooShort {
                len: row.len(),
                required,
            });
        }

        let identity = self.schema.identity();
        let business_name = cell(row, identity.business_name);
        if business_name.trim().is_empty() {
            return Err(RowRejection::MissingBusinessName);
        }

        let mut response = SurveyResponse::new(cell(row, identity.respondent_id), business_name);
        for (question, normalizer) in &self.fields {
            let value = normalizer.normalize(cell(row, question.column));
            response.answers.insert(question.key.clone(), value);
        }

        Ok(response)
    }
}

// Short rows are common in survey exports; anything past the end reads as blank.
fn cell<S: AsRef<str>>(row: &[S], index: usize) -> &str {
    row.get(index).map(|value| value.as_ref()).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::survey::catalog::keys;

    fn row_with(cells: &[(usize, &str)]) -> Vec<String> {
        let mut row = vec![String::new(); 135];
        for (index, value) in cells {
            row[*index] = value.to_string();
        }
        row
    }

    #[test]
    fn normalizes_every_schema_question() {
        let schema = SurveySchema::standard();
        let normalizer = RowNormalizer::new(&schema);
        let row = row_with(&[
            (0, "1"),
            (8, "Café Luna"),
            (11, "Restaurante"),
            (14, "1 a 5 personas"),
            (38, "3- promedio"),
            (41, "Digital basica"),
        ]);

        let response = normalizer.normalize_row(row.as_slice()).expect("row accepted");
        assert_eq!(response.respondent_id, "1");
        assert_eq!(response.business_name, "Café Luna");
        assert_eq!(response.answers.len(), schema.questions().len());
        assert_eq!(response.choice(keys::TIPO_NEGOCIO), Some("Restaurante"));
        assert_eq!(response.choice(keys::TAMANO_NEGOCIO), Some("1 a 5 personas"));
        assert_eq!(response.level(keys::NIVEL_DIGITALIZACION), Some(3));
        assert_eq!(
            response.choice(keys::GESTION_RESERVACIONES),
            Some("Digital basica")
        );
        assert_eq!(response.answer(keys::GESTION_PAGOS), &FieldValue::Missing);
        assert!(response.choices(keys::HERRAMIENTAS_DIGITALES).is_empty());
    }

    #[test]
    fn short_rows_read_missing_columns_as_blank() {
        let schema = SurveySchema::standard();
        let normalizer = RowNormalizer::new(&schema);
        let mut row = vec![String::new(); 15];
        row[8] = "Hostal Sol".to_string();
        row[11] = "hotel".to_string();

        let response = normalizer.normalize_row(row.as_slice()).expect("row accepted");
        assert_eq!(response.choice(keys::TIPO_NEGOCIO), Some("Hotel / Hospedaje"));
        assert_eq!(response.choice(keys::CAPACIDAD_ESCALAR), None);
        assert!(response.choices(keys::CAUSA_ERRORES).is_empty());
    }

    #[test]
    fn rejects_rows_that_are_too_short_or_unnamed() {
        let schema = SurveySchema::standard();
        let normalizer = RowNormalizer::new(&schema);

        let short = vec!["1".to_string(), "x".to_string()];
        assert_eq!(
            normalizer.normalize_row(short.as_slice()),
            Err(RowRejection::TooShort {
                len: 2,
                required: 10
            })
        );

        let unnamed = row_with(&[(0, "7"), (8, "   "), (11, "Restaurante")]);
        assert_eq!(
            normalizer.normalize_row(unnamed.as_slice()),
            Err(RowRejection::MissingBusinessName)
        );

        let blank: Vec<&str> = Vec::new();
        assert!(normalizer.normalize_row(blank.as_slice()).is_err());
    }

    #[test]
    fn unknown_keys_read_as_missing() {
        let response = SurveyResponse::new("1", "Negocio");
        assert_eq!(response.answer("noExiste"), &FieldValue::Missing);
        assert_eq!(response.choice("noExiste"), None);
        assert!(response.choices("noExiste").is_empty());
        assert_eq!(response.level("noExiste"), None);
    }
}

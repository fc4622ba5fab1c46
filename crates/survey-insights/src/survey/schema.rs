use super::catalog;
use super::normalizer::canonicalize;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::io::Read;

/// Answer shape of a questionnaire item; decides how a raw cell is normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    Single,
    Multi,
    Scale,
    Matrix,
}

impl QuestionType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Multi => "multi",
            Self::Scale => "scale",
            Self::Matrix => "matrix",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One questionnaire item. Owns both its raw column and its option catalog so
/// the two can never drift apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionSpec {
    pub key: String,
    pub column: usize,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    #[serde(deserialize_with = "option_labels")]
    pub options: Vec<String>,
}

impl QuestionSpec {
    pub fn new(
        key: impl Into<String>,
        column: usize,
        question_type: QuestionType,
        options: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            key: key.into(),
            column,
            question_type,
            options: options.into_iter().map(Into::into).collect(),
        }
    }

    /// Inclusive `(min, max)` of a scale question. `None` for other types or
    /// when an option is not an integer.
    pub fn scale_bounds(&self) -> Option<(i64, i64)> {
        scale_bounds(self.question_type, &self.options)
    }
}

pub(crate) fn scale_bounds(question_type: QuestionType, options: &[String]) -> Option<(i64, i64)> {
    if question_type != QuestionType::Scale {
        return None;
    }

    let values = options
        .iter()
        .map(|option| option.trim().parse::<i64>().ok())
        .collect::<Option<Vec<_>>>()?;
    let min = values.iter().copied().min()?;
    let max = values.iter().copied().max()?;
    Some((min, max))
}

/// Raw row positions that are passed through without normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityColumns {
    pub respondent_id: usize,
    pub business_name: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("survey schema declares no questions")]
    NoQuestions,
    #[error("question '{key}' has an empty option list")]
    EmptyOptions { key: String },
    #[error("question '{key}' has a blank option at position {index}")]
    BlankOption { key: String, index: usize },
    #[error("scale question '{key}' has non-integer option '{value}'")]
    InvalidScaleOption { key: String, value: String },
    #[error("question key '{key}' is declared more than once")]
    DuplicateKey { key: String },
    #[error("column {column} is claimed by both '{first}' and '{second}'")]
    DuplicateColumn {
        column: usize,
        first: String,
        second: String,
    },
    #[error("scored question '{key}' is missing from the schema")]
    MissingQuestion { key: String },
    #[error("question '{key}' must be {expected}, found {found}")]
    UnexpectedType {
        key: String,
        expected: QuestionType,
        found: QuestionType,
    },
    #[error("invalid schema document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Static questionnaire definition shared by every load cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveySchema {
    identity: IdentityColumns,
    min_row_len: usize,
    questions: Vec<QuestionSpec>,
}

impl SurveySchema {
    pub fn new(
        identity: IdentityColumns,
        min_row_len: usize,
        questions: Vec<QuestionSpec>,
    ) -> Result<Self, SchemaError> {
        let schema = Self {
            identity,
            min_row_len,
            questions,
        };
        schema.validate()?;
        Ok(schema)
    }

    /// The tourism business questionnaire.
    pub fn standard() -> Self {
        Self {
            identity: IdentityColumns {
                respondent_id: catalog::RESPONDENT_ID_COLUMN,
                business_name: catalog::BUSINESS_NAME_COLUMN,
            },
            min_row_len: catalog::MIN_ROW_LEN,
            questions: catalog::standard_questions(),
        }
    }

    /// Reads a JSON schema document and validates it before handing it out.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, SchemaError> {
        let schema: Self = serde_json::from_reader(reader)?;
        schema.validate()?;
        Ok(schema)
    }

    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.questions.is_empty() {
            return Err(SchemaError::NoQuestions);
        }

        let mut keys: HashSet<&str> = HashSet::with_capacity(self.questions.len());
        let mut columns: HashMap<usize, &str> = HashMap::with_capacity(self.questions.len());

        for question in &self.questions {
            if !keys.insert(question.key.as_str()) {
                return Err(SchemaError::DuplicateKey {
                    key: question.key.clone(),
                });
            }

            if let Some(first) = columns.insert(question.column, question.key.as_str()) {
                return Err(SchemaError::DuplicateColumn {
                    column: question.column,
                    first: first.to_string(),
                    second: question.key.clone(),
                });
            }

            if question.options.is_empty() {
                return Err(SchemaError::EmptyOptions {
                    key: question.key.clone(),
                });
            }

            if let Some(index) = question
                .options
                .iter()
                .position(|option| canonicalize(option).is_empty())
            {
                return Err(SchemaError::BlankOption {
                    key: question.key.clone(),
                    index,
                });
            }

            if question.question_type == QuestionType::Scale {
                if let Some(bad) = question
                    .options
                    .iter()
                    .find(|option| option.trim().parse::<i64>().is_err())
                {
                    return Err(SchemaError::InvalidScaleOption {
                        key: question.key.clone(),
                        value: bad.clone(),
                    });
                }
            }
        }

        Ok(())
    }

    pub fn identity(&self) -> IdentityColumns {
        self.identity
    }

    pub fn min_row_len(&self) -> usize {
        self.min_row_len
    }

    pub fn questions(&self) -> &[QuestionSpec] {
        &self.questions
    }

    pub fn question(&self, key: &str) -> Option<&QuestionSpec> {
        self.questions.iter().find(|question| question.key == key)
    }

    /// Looks up a question and checks its type, for consumers that depend on it.
    pub fn require(
        &self,
        key: &str,
        expected: QuestionType,
    ) -> Result<&QuestionSpec, SchemaError> {
        let question = self.question(key).ok_or_else(|| SchemaError::MissingQuestion {
            key: key.to_string(),
        })?;

        if question.question_type != expected {
            return Err(SchemaError::UnexpectedType {
                key: key.to_string(),
                expected,
                found: question.question_type,
            });
        }

        Ok(question)
    }
}

// Scale catalogs are usually written as JSON numbers; accept both forms.
fn option_labels<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OptionLabel {
        Text(String),
        Number(i64),
    }

    let labels = Vec::<OptionLabel>::deserialize(deserializer)?;
    Ok(labels
        .into_iter()
        .map(|label| match label {
            OptionLabel::Text(text) => text,
            OptionLabel::Number(number) => number.to_string(),
        })
        .collect())
}

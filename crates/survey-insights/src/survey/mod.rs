pub mod catalog;
mod fields;
mod normalizer;
mod rows;
mod schema;

pub use fields::{normalize_value, FieldNormalizer, FieldValue, OTHER_OPTION};
pub use normalizer::canonicalize;
pub use rows::{RawRow, RowNormalizer, RowRejection, SurveyResponse};
pub use schema::{IdentityColumns, QuestionSpec, QuestionType, SchemaError, SurveySchema};

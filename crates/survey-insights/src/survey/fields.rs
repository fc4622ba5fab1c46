use super::normalizer::canonicalize;
use super::schema::{scale_bounds, QuestionSpec, QuestionType};
use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::OnceLock;

/// Catch-all bucket for single-choice answers that match no catalog option.
pub const OTHER_OPTION: &str = "Otro";

static FIRST_NUMBER: OnceLock<Regex> = OnceLock::new();

fn first_number() -> &'static Regex {
    FIRST_NUMBER.get_or_init(|| Regex::new(r"[0-9]+").expect("static pattern compiles"))
}

/// Typed answer for one question of one business.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Missing,
    Choice(String),
    Choices(Vec<String>),
    Level(i64),
    Cell(String),
}

impl FieldValue {
    pub fn is_missing(&self) -> bool {
        match self {
            FieldValue::Missing => true,
            FieldValue::Choices(items) => items.is_empty(),
            _ => false,
        }
    }

    /// Single-valued answer as text: the choice, the matrix cell, or the scale level.
    pub fn as_label(&self) -> Option<String> {
        match self {
            FieldValue::Choice(value) | FieldValue::Cell(value) => Some(value.clone()),
            FieldValue::Level(level) => Some(level.to_string()),
            FieldValue::Missing | FieldValue::Choices(_) => None,
        }
    }
}

/// Normalizes raw cells for one question. The option catalog is canonicalized once up front.
#[derive(Debug, Clone)]
pub struct FieldNormalizer<'a> {
    question_type: QuestionType,
    options: &'a [String],
    canonical: Vec<String>,
    bounds: Option<(i64, i64)>,
}

impl<'a> FieldNormalizer<'a> {
    pub fn new(question: &'a QuestionSpec) -> Self {
        Self::from_parts(question.question_type, &question.options)
    }

    pub fn from_parts(question_type: QuestionType, options: &'a [String]) -> Self {
        Self {
            question_type,
            options,
            canonical: options.iter().map(|option| canonicalize(option)).collect(),
            bounds: scale_bounds(question_type, options),
        }
    }

    pub fn normalize(&self, raw: &str) -> FieldValue {
        if raw.trim().is_empty() {
            return self.empty_value();
        }

        match self.question_type {
            QuestionType::Single => self.single(raw),
            QuestionType::Multi => self.multi(raw),
            QuestionType::Scale => self.scale(raw),
            QuestionType::Matrix => self.matrix(raw),
        }
    }

    fn empty_value(&self) -> FieldValue {
        match self.question_type {
            QuestionType::Multi => FieldValue::Choices(Vec::new()),
            _ => FieldValue::Missing,
        }
    }

    fn single(&self, raw: &str) -> FieldValue {
        let canonical = canonicalize(raw);
        if canonical.is_empty() {
            return FieldValue::Missing;
        }

        if let Some(index) = self.canonical.iter().position(|option| *option == canonical) {
            return FieldValue::Choice(self.options[index].clone());
        }

        match self.partial_match(&canonical) {
            Some(option) => FieldValue::Choice(option.clone()),
            None => FieldValue::Choice(OTHER_OPTION.to_string()),
        }
    }

    fn multi(&self, raw: &str) -> FieldValue {
        let items: Vec<&str> = match [';', ','].into_iter().find(|sep| raw.contains(*sep)) {
            Some(separator) => raw.split(separator).collect(),
            None => vec![raw],
        };

        let mut seen = HashSet::new();
        let mut values = Vec::new();
        for item in items.into_iter().map(str::trim).filter(|item| !item.is_empty()) {
            let canonical = canonicalize(item);
            if canonical.is_empty() {
                continue;
            }

            let value = self
                .partial_match(&canonical)
                .cloned()
                .unwrap_or_else(|| item.to_string());

            if seen.insert(canonicalize(&value)) {
                values.push(value);
            }
        }

        FieldValue::Choices(values)
    }

    fn scale(&self, raw: &str) -> FieldValue {
        let Some((min, max)) = self.bounds else {
            return FieldValue::Missing;
        };

        first_number()
            .find(raw)
            .and_then(|digits| digits.as_str().parse::<i64>().ok())
            .filter(|level| (min..=max).contains(level))
            .map_or(FieldValue::Missing, FieldValue::Level)
    }

    fn matrix(&self, raw: &str) -> FieldValue {
        let canonical = canonicalize(raw);
        let index = self
            .canonical
            .iter()
            .position(|option| *option == canonical)
            .unwrap_or(0);

        self.options
            .get(index)
            .map_or(FieldValue::Missing, |option| FieldValue::Cell(option.clone()))
    }

    // Bidirectional containment, first hit in catalog order.
    fn partial_match(&self, canonical: &str) -> Option<&String> {
        self.canonical
            .iter()
            .position(|option| option.contains(canonical) || canonical.contains(option.as_str()))
            .map(|index| &self.options[index])
    }
}

/// Normalizes one raw cell against an option catalog.
pub fn normalize_value(raw: &str, question_type: QuestionType, options: &[String]) -> FieldValue {
    FieldNormalizer::from_parts(question_type, options).normalize(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::survey::catalog::{PROBLEM_FREQUENCIES, PROCESS_LEVELS};

    fn options(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    fn tools() -> Vec<String> {
        options(&[
            "WhatsApp",
            "Redes sociales",
            "Sistemas especializados",
            "Punto de venta",
            "Office",
            "Google Sheets",
            "Ninguna",
        ])
    }

    fn choices(value: FieldValue) -> Vec<String> {
        match value {
            FieldValue::Choices(items) => items,
            other => panic!("expected multi-choice value, got {other:?}"),
        }
    }

    #[test]
    fn blank_cells_are_missing_or_empty_sets() {
        let opts = options(&["Si", "No"]);
        assert_eq!(
            normalize_value("   ", QuestionType::Single, &opts),
            FieldValue::Missing
        );
        assert_eq!(
            normalize_value("", QuestionType::Matrix, &opts),
            FieldValue::Missing
        );
        assert_eq!(
            normalize_value("", QuestionType::Scale, &options(&["1", "5"])),
            FieldValue::Missing
        );
        assert_eq!(
            normalize_value(" ", QuestionType::Multi, &opts),
            FieldValue::Choices(Vec::new())
        );
    }

    #[test]
    fn single_choice_prefers_exact_canonical_match() {
        let opts = options(&["Hotel / Hospedaje", "Restaurante", "Otro"]);
        assert_eq!(
            normalize_value("  RESTAURANTE ", QuestionType::Single, &opts),
            FieldValue::Choice("Restaurante".to_string())
        );
        assert_eq!(
            normalize_value("hotel /  hospedaje", QuestionType::Single, &opts),
            FieldValue::Choice("Hotel / Hospedaje".to_string())
        );
    }

    #[test]
    fn single_choice_exact_match_beats_earlier_partial_match() {
        let opts = options(&["Muy dispuesto", "Dispuesto"]);
        assert_eq!(
            normalize_value("Dispuesto", QuestionType::Single, &opts),
            FieldValue::Choice("Dispuesto".to_string())
        );
    }

    #[test]
    fn single_choice_falls_back_to_partial_then_other() {
        let opts = options(&["Restaurante", "Vinedo / Casa de vino", "Otro"]);
        assert_eq!(
            normalize_value("Restaurante familiar", QuestionType::Single, &opts),
            FieldValue::Choice("Restaurante".to_string())
        );
        assert_eq!(
            normalize_value("Viñedo", QuestionType::Single, &opts),
            FieldValue::Choice("Vinedo / Casa de vino".to_string())
        );
        assert_eq!(
            normalize_value("Agencia de viajes", QuestionType::Single, &opts),
            FieldValue::Choice(OTHER_OPTION.to_string())
        );
    }

    #[test]
    fn multi_choice_splits_on_semicolons_first() {
        let value = choices(normalize_value(
            "WhatsApp; Redes Sociales; Excel",
            QuestionType::Multi,
            &tools(),
        ));
        assert_eq!(value.len(), 3);
        assert!(value.contains(&"WhatsApp".to_string()));
        assert!(value.contains(&"Redes sociales".to_string()));
        assert!(value.contains(&"Excel".to_string()));
    }

    #[test]
    fn multi_choice_does_not_split_on_commas_when_semicolons_present() {
        let value = choices(normalize_value(
            "Punto de venta; Office, Google Sheets",
            QuestionType::Multi,
            &tools(),
        ));
        assert_eq!(value, vec!["Punto de venta".to_string(), "Office".to_string()]);
    }

    #[test]
    fn multi_choice_splits_on_commas_and_drops_duplicates() {
        let value = choices(normalize_value(
            "whatsapp, WhatsApp ,, Punto de venta,punto de VENTA",
            QuestionType::Multi,
            &tools(),
        ));
        assert_eq!(
            value,
            vec!["WhatsApp".to_string(), "Punto de venta".to_string()]
        );
    }

    #[test]
    fn multi_choice_keeps_unmatched_items_verbatim() {
        let value = choices(normalize_value(
            "Canva; canva ",
            QuestionType::Multi,
            &tools(),
        ));
        assert_eq!(value, vec!["Canva".to_string()]);
    }

    #[test]
    fn scale_extracts_first_number_within_bounds() {
        let scale = options(&["1", "2", "3", "4", "5"]);
        assert_eq!(
            normalize_value("3- promedio", QuestionType::Scale, &scale),
            FieldValue::Level(3)
        );
        assert_eq!(
            normalize_value("nivel 5 (alto)", QuestionType::Scale, &scale),
            FieldValue::Level(5)
        );
        assert_eq!(
            normalize_value("\u{0663} - 3 promedio", QuestionType::Scale, &scale),
            FieldValue::Level(3)
        );
        assert_eq!(
            normalize_value("7", QuestionType::Scale, &scale),
            FieldValue::Missing
        );
        assert_eq!(
            normalize_value("0 nada", QuestionType::Scale, &scale),
            FieldValue::Missing
        );
        assert_eq!(
            normalize_value("sin respuesta", QuestionType::Scale, &scale),
            FieldValue::Missing
        );
        assert_eq!(
            normalize_value("99999999999999999999999", QuestionType::Scale, &scale),
            FieldValue::Missing
        );
    }

    #[test]
    fn matrix_matches_exactly_or_defaults_to_baseline() {
        let levels = options(&PROCESS_LEVELS);
        assert_eq!(
            normalize_value("digital AUTOMATIZADA", QuestionType::Matrix, &levels),
            FieldValue::Cell("Digital automatizada".to_string())
        );
        assert_eq!(
            normalize_value("Digital", QuestionType::Matrix, &levels),
            FieldValue::Cell("Manual".to_string())
        );

        let frequencies = options(&PROBLEM_FREQUENCIES);
        assert_eq!(
            normalize_value("Sí muchas veces", QuestionType::Matrix, &frequencies),
            FieldValue::Cell("Si muchas veces".to_string())
        );
    }

    #[test]
    fn labels_cover_single_valued_answers_only() {
        assert_eq!(FieldValue::Level(4).as_label(), Some("4".to_string()));
        assert_eq!(
            FieldValue::Cell("Manual".to_string()).as_label(),
            Some("Manual".to_string())
        );
        assert_eq!(FieldValue::Choices(vec!["x".to_string()]).as_label(), None);
        assert!(FieldValue::Choices(Vec::new()).is_missing());
        assert!(!FieldValue::Level(1).is_missing());
    }
}

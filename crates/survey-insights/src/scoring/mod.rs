mod config;
mod rules;

pub use config::{
    DigitalMaturityWeights, OperationalRiskWeights, ScalabilityWeights, ScoreWeights,
    TechAdoptionWeights,
};

use crate::survey::catalog::keys;
use crate::survey::{QuestionType, SchemaError, SurveyResponse, SurveySchema};
use rules::ScoringCatalog;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// The four composite dimensions computed per business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreKind {
    DigitalMaturity,
    OperationalRisk,
    TechAdoptionReadiness,
    ScalabilityReadiness,
}

impl ScoreKind {
    pub const fn ordered() -> [ScoreKind; 4] {
        [
            Self::DigitalMaturity,
            Self::OperationalRisk,
            Self::TechAdoptionReadiness,
            Self::ScalabilityReadiness,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::DigitalMaturity => "Digital Maturity",
            Self::OperationalRisk => "Operational Risk",
            Self::TechAdoptionReadiness => "Tech Adoption Readiness",
            Self::ScalabilityReadiness => "Scalability Readiness",
        }
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::DigitalMaturity => "digital_maturity",
            Self::OperationalRisk => "operational_risk",
            Self::TechAdoptionReadiness => "tech_adoption_readiness",
            Self::ScalabilityReadiness => "scalability_readiness",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownScoreKind(pub String);

impl fmt::Display for UnknownScoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown score '{}'", self.0)
    }
}

impl std::error::Error for UnknownScoreKind {}

impl FromStr for ScoreKind {
    type Err = UnknownScoreKind;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = fold(value);

        Self::ordered()
            .into_iter()
            .find(|kind| fold(kind.key()) == wanted)
            .ok_or_else(|| UnknownScoreKind(value.to_string()))
    }
}

// Separators and case are ignored so `digitalMaturity` and `digital-maturity` both parse.
fn fold(value: &str) -> String {
    value
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Composite scores of one business, each an integer in 0..=100.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreCard {
    pub digital_maturity: u8,
    pub operational_risk: u8,
    pub tech_adoption_readiness: u8,
    pub scalability_readiness: u8,
}

impl ScoreCard {
    pub fn get(&self, kind: ScoreKind) -> u8 {
        match kind {
            ScoreKind::DigitalMaturity => self.digital_maturity,
            ScoreKind::OperationalRisk => self.operational_risk,
            ScoreKind::TechAdoptionReadiness => self.tech_adoption_readiness,
            ScoreKind::ScalabilityReadiness => self.scalability_readiness,
        }
    }
}

/// Named input of a composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubFactor {
    DigitizationLevel,
    AdvancedTools,
    DigitalProcesses,
    DataUsage,
    DigitalDocumentation,
    OperationalProblems,
    KeyPersonDependency,
    UndocumentedKnowledge,
    ErrorCauses,
    Openness,
    Barriers,
    TeamLearning,
    PersonalComfort,
    ScalingCapacity,
    Automation,
    GrowthIntent,
}

/// Weighted contribution of one sub-factor, kept for audits.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreComponent {
    pub score: ScoreKind,
    pub factor: SubFactor,
    /// Sub-factor value on a 0–100 scale before weighting.
    pub value: f64,
    pub weight: f64,
    pub contribution: f64,
}

/// Stateless calculator that applies the weights to a normalized response.
#[derive(Debug, Clone)]
pub struct ScoreEngine {
    weights: ScoreWeights,
    catalog: ScoringCatalog,
}

impl ScoreEngine {
    /// Checks that every scored question exists with the expected shape.
    pub fn new(schema: &SurveySchema, weights: ScoreWeights) -> Result<Self, SchemaError> {
        use QuestionType::{Matrix, Multi, Scale, Single};

        let digitization = schema.require(keys::NIVEL_DIGITALIZACION, Scale)?;
        let digitization_bounds =
            digitization
                .scale_bounds()
                .ok_or_else(|| SchemaError::InvalidScaleOption {
                    key: digitization.key.clone(),
                    value: digitization.options.join(","),
                })?;

        for key in keys::GESTION.iter().chain(keys::PROBLEMAS.iter()) {
            schema.require(key, Matrix)?;
        }
        for key in [
            keys::USO_DATOS_DIGITALES,
            keys::RIESGO_SALIDA_RESPONSABLE_TI,
            keys::APERTURA_TECNOLOGICA,
            keys::CAPACIDAD_APRENDIZAJE_EQUIPO,
            keys::COMODIDAD_APRENDER_TECNOLOGIA,
            keys::CAPACIDAD_ESCALAR,
            keys::INTERES_CRECIMIENTO,
        ] {
            schema.require(key, Single)?;
        }
        schema.require(keys::HERRAMIENTAS_DIGITALES, Multi)?;

        let documentation = schema.require(keys::DOCUMENTACION_PROCESOS, Multi)?;
        let barriers = schema.require(keys::BARRERAS_TECNOLOGIA, Multi)?;
        let error_causes = schema.require(keys::CAUSA_ERRORES, Multi)?;

        for (kind, total) in weights.unbalanced() {
            warn!(score = kind.key(), total, "score weights do not sum to 1.0");
        }

        Ok(Self {
            weights,
            catalog: ScoringCatalog {
                digitization_bounds,
                barrier_options: barriers.options.clone(),
                error_cause_options: error_causes.options.clone(),
                documentation_options: documentation.options.len(),
            },
        })
    }

    /// Engine over the built-in questionnaire and default weights.
    pub fn standard() -> Self {
        Self::new(&SurveySchema::standard(), ScoreWeights::default())
            .expect("built-in questionnaire carries every scored question")
    }

    pub fn weights(&self) -> &ScoreWeights {
        &self.weights
    }

    pub fn explain(&self, response: &SurveyResponse) -> Vec<ScoreComponent> {
        let mut components = rules::digital_maturity(response, &self.weights, &self.catalog);
        components.extend(rules::operational_risk(response, &self.weights, &self.catalog));
        components.extend(rules::tech_adoption_readiness(
            response,
            &self.weights,
            &self.catalog,
        ));
        components.extend(rules::scalability_readiness(response, &self.weights));
        components
    }

    pub fn score(&self, response: &SurveyResponse) -> ScoreCard {
        let components = self.explain(response);
        let composite = |kind: ScoreKind| {
            let total: f64 = components
                .iter()
                .filter(|component| component.score == kind)
                .map(|component| component.contribution)
                .sum();
            round_score(total)
        };

        ScoreCard {
            digital_maturity: composite(ScoreKind::DigitalMaturity),
            operational_risk: composite(ScoreKind::OperationalRisk),
            tech_adoption_readiness: composite(ScoreKind::TechAdoptionReadiness),
            scalability_readiness: composite(ScoreKind::ScalabilityReadiness),
        }
    }
}

// Half-up rounding; sums are never negative.
fn round_score(total: f64) -> u8 {
    (total + 0.5).floor().clamp(0.0, 100.0) as u8
}

use super::ScoreKind;
use serde::{Deserialize, Serialize};
use std::io::Read;

const WEIGHT_TOLERANCE: f64 = 1e-6;

/// Sub-factor weights of every composite score. Each group is expected to sum to 1.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub digital_maturity: DigitalMaturityWeights,
    pub operational_risk: OperationalRiskWeights,
    pub tech_adoption_readiness: TechAdoptionWeights,
    pub scalability_readiness: ScalabilityWeights,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DigitalMaturityWeights {
    pub digitization_level: f64,
    pub advanced_tools: f64,
    pub digital_processes: f64,
    pub data_usage: f64,
    pub digital_documentation: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationalRiskWeights {
    pub operational_problems: f64,
    pub key_person_dependency: f64,
    pub undocumented_knowledge: f64,
    pub error_causes: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechAdoptionWeights {
    pub openness: f64,
    pub barriers: f64,
    pub team_learning: f64,
    pub personal_comfort: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalabilityWeights {
    pub scaling_capacity: f64,
    pub automation: f64,
    pub data_usage: f64,
    pub growth_intent: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            digital_maturity: DigitalMaturityWeights {
                digitization_level: 0.30,
                advanced_tools: 0.20,
                digital_processes: 0.25,
                data_usage: 0.15,
                digital_documentation: 0.10,
            },
            operational_risk: OperationalRiskWeights {
                operational_problems: 0.35,
                key_person_dependency: 0.25,
                undocumented_knowledge: 0.20,
                error_causes: 0.20,
            },
            tech_adoption_readiness: TechAdoptionWeights {
                openness: 0.30,
                barriers: 0.25,
                team_learning: 0.25,
                personal_comfort: 0.20,
            },
            scalability_readiness: ScalabilityWeights {
                scaling_capacity: 0.30,
                automation: 0.30,
                data_usage: 0.25,
                growth_intent: 0.15,
            },
        }
    }
}

impl ScoreWeights {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, serde_json::Error> {
        serde_json::from_reader(reader)
    }

    pub fn total(&self, kind: ScoreKind) -> f64 {
        match kind {
            ScoreKind::DigitalMaturity => {
                let w = &self.digital_maturity;
                w.digitization_level
                    + w.advanced_tools
                    + w.digital_processes
                    + w.data_usage
                    + w.digital_documentation
            }
            ScoreKind::OperationalRisk => {
                let w = &self.operational_risk;
                w.operational_problems
                    + w.key_person_dependency
                    + w.undocumented_knowledge
                    + w.error_causes
            }
            ScoreKind::TechAdoptionReadiness => {
                let w = &self.tech_adoption_readiness;
                w.openness + w.barriers + w.team_learning + w.personal_comfort
            }
            ScoreKind::ScalabilityReadiness => {
                let w = &self.scalability_readiness;
                w.scaling_capacity + w.automation + w.data_usage + w.growth_intent
            }
        }
    }

    /// Composite scores whose weights do not add up to 1.0.
    pub fn unbalanced(&self) -> Vec<(ScoreKind, f64)> {
        ScoreKind::ordered()
            .into_iter()
            .map(|kind| (kind, self.total(kind)))
            .filter(|(_, total)| (total - 1.0).abs() > WEIGHT_TOLERANCE)
            .collect()
    }
}

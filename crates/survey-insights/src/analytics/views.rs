use super::segments::Segment;
use crate::scoring::{ScoreCard, ScoreKind};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DistributionEntry {
    pub option: String,
    pub count: usize,
}

/// Per-option counts in catalog order. Every option is present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Distribution {
    pub field: String,
    pub entries: Vec<DistributionEntry>,
}

impl Distribution {
    pub fn count(&self, option: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|entry| entry.option == option)
            .map(|entry| entry.count)
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|entry| entry.count).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProblemRankingEntry {
    pub key: &'static str,
    pub name: &'static str,
    pub count: usize,
    pub total_severity: u32,
    pub avg_severity: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GlobalKpis {
    pub total_businesses: usize,
    pub average_scores: ScoreCard,
    pub high_risk_count: usize,
    pub tech_ready_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Low,
    Medium,
    High,
    Critical,
}

impl ScoreBand {
    pub const fn ordered() -> [ScoreBand; 4] {
        [Self::Low, Self::Medium, Self::High, Self::Critical]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }

    /// Inclusive score range.
    pub const fn range(self) -> (u8, u8) {
        match self {
            Self::Low => (0, 30),
            Self::Medium => (31, 60),
            Self::High => (61, 80),
            Self::Critical => (81, 100),
        }
    }

    pub const fn for_score(score: u8) -> ScoreBand {
        match score {
            0..=30 => Self::Low,
            31..=60 => Self::Medium,
            61..=80 => Self::High,
            _ => Self::Critical,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreBandEntry {
    pub band: ScoreBand,
    pub label: &'static str,
    pub min: u8,
    pub max: u8,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreBands {
    pub score: ScoreKind,
    pub bands: Vec<ScoreBandEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DimensionScores {
    pub group: String,
    pub count: usize,
    pub averages: ScoreCard,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelCount {
    pub level: String,
    pub count: usize,
}

/// Process-level counts of every gestion cell for one dimension value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessLevelRow {
    pub group: String,
    pub levels: Vec<LevelCount>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VisibilityShare {
    pub low_visibility: usize,
    pub total: usize,
    pub percentage: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Opportunity {
    ReduceOperationalRisk,
    TechnologyAdoption,
    ImproveScalability,
    Maintain,
}

impl Opportunity {
    pub fn for_scores(scores: &ScoreCard) -> Opportunity {
        if scores.operational_risk >= 70 {
            Self::ReduceOperationalRisk
        } else if scores.tech_adoption_readiness >= 60 && scores.digital_maturity < 50 {
            Self::TechnologyAdoption
        } else if scores.scalability_readiness < 40 {
            Self::ImproveScalability
        } else {
            Self::Maintain
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::ReduceOperationalRisk => "Reduce operational risk",
            Self::TechnologyAdoption => "Technology adoption",
            Self::ImproveScalability => "Improve scalability",
            Self::Maintain => "Maintain and optimize",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreTableRow {
    pub business_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    pub scores: ScoreCard,
    pub segment: Segment,
    pub segment_label: &'static str,
    pub opportunity: Opportunity,
    pub opportunity_label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Insight {
    pub title: &'static str,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Critical,
    High,
    Medium,
    Strategic,
}

impl Priority {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Strategic => "Strategic",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub segment: Segment,
    pub title: &'static str,
    pub text: String,
    pub priority: Priority,
    pub priority_label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardInsights {
    pub insights: Vec<Insight>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub recommendations: Vec<Recommendation>,
}

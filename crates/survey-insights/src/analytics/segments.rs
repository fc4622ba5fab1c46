use crate::pipeline::BusinessRecord;
use crate::scoring::ScoreCard;
use serde::Serialize;

/// Mutually exclusive business profile derived from the composite scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Segment {
    DigitalLeaders,
    TechReady,
    GrowthPotential,
    HighRisk,
    Traditional,
}

impl Segment {
    /// Presentation order.
    pub const fn ordered() -> [Segment; 5] {
        [
            Self::DigitalLeaders,
            Self::TechReady,
            Self::GrowthPotential,
            Self::HighRisk,
            Self::Traditional,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::DigitalLeaders => "Digital Leaders",
            Self::TechReady => "Tech Ready",
            Self::GrowthPotential => "Growth Potential",
            Self::HighRisk => "High Risk",
            Self::Traditional => "Traditional",
        }
    }

    /// First matching rule wins. High risk is checked before growth potential.
    pub fn classify(scores: &ScoreCard) -> Segment {
        if scores.digital_maturity >= 70 && scores.tech_adoption_readiness >= 70 {
            Self::DigitalLeaders
        } else if scores.digital_maturity < 50 && scores.tech_adoption_readiness >= 60 {
            Self::TechReady
        } else if scores.operational_risk >= 70 {
            Self::HighRisk
        } else if scores.scalability_readiness >= 70 {
            Self::GrowthPotential
        } else {
            Self::Traditional
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SegmentGroup<'a> {
    pub segment: Segment,
    pub label: &'static str,
    pub records: Vec<&'a BusinessRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SegmentCount {
    pub segment: Segment,
    pub label: &'static str,
    pub count: usize,
    /// Share of the partitioned collection, one decimal place.
    pub percentage: f64,
}

/// Exact partition of a record collection; every segment is present, possibly empty.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct ProfileSegments<'a> {
    groups: Vec<SegmentGroup<'a>>,
}

impl<'a> ProfileSegments<'a> {
    pub fn get(&self, segment: Segment) -> &[&'a BusinessRecord] {
        self.groups
            .iter()
            .find(|group| group.segment == segment)
            .map(|group| group.records.as_slice())
            .unwrap_or(&[])
    }

    pub fn count(&self, segment: Segment) -> usize {
        self.get(segment).len()
    }

    pub fn total(&self) -> usize {
        self.groups.iter().map(|group| group.records.len()).sum()
    }

    pub fn groups(&self) -> &[SegmentGroup<'a>] {
        &self.groups
    }

    pub fn counts(&self) -> Vec<SegmentCount> {
        let total = self.total();
        self.groups
            .iter()
            .map(|group| SegmentCount {
                segment: group.segment,
                label: group.segment.label(),
                count: group.records.len(),
                percentage: share(group.records.len(), total),
            })
            .collect()
    }
}

fn share(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (count as f64 * 1000.0 / total as f64).round() / 10.0
}

pub fn segment_by_profile(records: &[BusinessRecord]) -> ProfileSegments<'_> {
    let mut groups: Vec<SegmentGroup<'_>> = Segment::ordered()
        .into_iter()
        .map(|segment| SegmentGroup {
            segment,
            label: segment.label(),
            records: Vec::new(),
        })
        .collect();

    for record in records {
        let segment = Segment::classify(&record.scores);
        if let Some(group) = groups.iter_mut().find(|group| group.segment == segment) {
            group.records.push(record);
        }
    }

    ProfileSegments { groups }
}

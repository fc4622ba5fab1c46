use super::segments::{ProfileSegments, Segment};
use super::views::{DashboardInsights, GlobalKpis, Insight, Priority, Recommendation};

const HEALTHY_AVERAGE: u8 = 50;

pub fn generate_insights(kpis: &GlobalKpis, segments: &ProfileSegments<'_>) -> DashboardInsights {
    let averages = &kpis.average_scores;

    let mut insights = Vec::with_capacity(4);
    insights.push(Insight {
        title: "Digital maturity",
        text: format!(
            "Average digital maturity is {}/100. {}",
            averages.digital_maturity,
            if averages.digital_maturity < HEALTHY_AVERAGE {
                "There is a significant digitization opportunity."
            } else {
                "Businesses show a good level of digital adoption."
            }
        ),
    });
    insights.push(Insight {
        title: "Operational risk",
        text: format!(
            "{} business(es) carry high operational risk (score >= 70). Prioritize process automation and documentation.",
            kpis.high_risk_count
        ),
    });
    insights.push(Insight {
        title: "Technology readiness",
        text: format!(
            "{} business(es) are ready to adopt technology. Simple solutions can deliver quick wins.",
            kpis.tech_ready_count
        ),
    });
    insights.push(Insight {
        title: "Scalability",
        text: format!(
            "Average scalability readiness is {}/100. {}",
            averages.scalability_readiness,
            if averages.scalability_readiness < HEALTHY_AVERAGE {
                "Processes need strengthening before growth."
            } else {
                "There is a good base for expansion with the right technology."
            }
        ),
    });

    DashboardInsights {
        insights,
        recommendations: recommendations(segments),
    }
}

fn recommendations(segments: &ProfileSegments<'_>) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    let count = segments.count(Segment::TechReady);
    if count > 0 {
        recommendations.push(recommendation(
            Segment::TechReady,
            "Quick wins identified",
            format!(
                "{count} business(es) are eager to adopt technology but have low digital maturity. Simple solutions with fast payback fit them best."
            ),
            Priority::High,
        ));
    }

    let count = segments.count(Segment::HighRisk);
    if count > 0 {
        recommendations.push(recommendation(
            Segment::HighRisk,
            "Urgent attention",
            format!(
                "{count} business(es) are at high operational risk and need their critical processes automated first."
            ),
            Priority::Critical,
        ));
    }

    let count = segments.count(Segment::GrowthPotential);
    if count > 0 {
        recommendations.push(recommendation(
            Segment::GrowthPotential,
            "Scalability potential",
            format!(
                "{count} business(es) are prepared to grow. Favor solutions that support expansion."
            ),
            Priority::Medium,
        ));
    }

    let count = segments.count(Segment::DigitalLeaders);
    if count > 0 {
        recommendations.push(recommendation(
            Segment::DigitalLeaders,
            "Success stories",
            format!(
                "{count} digital leader(s) can serve as case studies to persuade traditional businesses."
            ),
            Priority::Strategic,
        ));
    }

    recommendations
}

fn recommendation(
    segment: Segment,
    title: &'static str,
    text: String,
    priority: Priority,
) -> Recommendation {
    Recommendation {
        segment,
        title,
        text,
        priority,
        priority_label: priority.label(),
    }
}

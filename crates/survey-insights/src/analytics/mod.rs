//! Read-only views over a scored record collection. Every function is pure and
//! tolerates an empty collection.

mod aggregate;
mod insights;
mod segments;
pub mod views;

pub use aggregate::{
    average_by_dimension, distribution, global_kpis, low_visibility_share, problems_ranking,
    process_levels_by_dimension, score_bands, score_table, scores_by_dimension,
    HIGH_RISK_THRESHOLD, TECH_READY_THRESHOLD,
};
pub use insights::generate_insights;
pub use segments::{segment_by_profile, ProfileSegments, Segment, SegmentCount, SegmentGroup};

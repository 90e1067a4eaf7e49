//! Aggregation result rows handed to the presentation layer.

use crate::stats::HistogramBucket;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearCount {
    pub year: i32,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelCount {
    pub label: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodyMeasurement {
    pub height: f64,
    pub weight: f64,
    pub sex: String,
}

/// Everything the dashboard shows for one filter selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregationResult {
    pub total_athletes: usize,
    pub total_sports: usize,
    pub total_medals: usize,
    pub countries_participated: usize,
    /// Ignores the filter.
    pub sports_per_year: Vec<YearCount>,
    /// Ignores the filter.
    pub medals_per_year: Vec<YearCount>,
    pub top_sports_by_medals: Vec<LabelCount>,
    pub top_teams_by_medals: Vec<LabelCount>,
    pub age_distribution: Vec<HistogramBucket>,
    pub gender_counts: Vec<LabelCount>,
    pub height_weight_scatter: Vec<BodyMeasurement>,
}

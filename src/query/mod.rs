//! Query module - filtering and aggregation over the canonical table

mod engine;
mod filter;
mod result;

pub use engine::{AggregationEngine, HISTOGRAM_BINS, TOP_N};
pub use filter::{QueryError, QueryFilter};
pub use result::{AggregationResult, BodyMeasurement, LabelCount, YearCount};

//! Statistics module - summary helpers shared by cleaning and aggregation

mod calculator;

pub use calculator::{HistogramBucket, StatsCalculator};

//! Olympics Dashboard - core library
//!
//! Loads the athlete-events dataset once, cleans it into a canonical table and
//! answers filtered aggregation queries for the dashboard.

pub mod config;
pub mod data;
pub mod logging;
pub mod query;
pub mod stats;

pub use config::DashboardConfig;
pub use data::{CanonicalTable, DataLoader, LoaderError};
pub use query::{AggregationEngine, AggregationResult, QueryError, QueryFilter};

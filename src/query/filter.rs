//! Query Filter
//! The (year, sport) selection; `None` on either dimension means "All".

use crate::data::columns::{SPORT, YEAR};
use crate::data::CanonicalTable;
use polars::prelude::*;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Invalid filter: {dimension} '{value}' does not occur in the dataset")]
    InvalidFilter {
        dimension: &'static str,
        value: String,
    },
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueryFilter {
    pub year: Option<i32>,
    pub sport: Option<String>,
}

impl QueryFilter {
    /// No restriction on either dimension.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_sport(mut self, sport: impl Into<String>) -> Self {
        self.sport = Some(sport.into());
        self
    }

    pub fn is_unrestricted(&self) -> bool {
        self.year.is_none() && self.sport.is_none()
    }

    /// Reject values outside the table's observed domains.
    pub fn validate(&self, table: &CanonicalTable) -> Result<(), QueryError> {
        if let Some(year) = self.year {
            if !table.has_year(year) {
                return Err(QueryError::InvalidFilter {
                    dimension: "year",
                    value: year.to_string(),
                });
            }
        }
        if let Some(sport) = &self.sport {
            if !table.has_sport(sport) {
                return Err(QueryError::InvalidFilter {
                    dimension: "sport",
                    value: sport.clone(),
                });
            }
        }
        Ok(())
    }

    /// Transient view of the rows matching both predicates.
    pub fn apply(&self, table: &CanonicalTable) -> PolarsResult<DataFrame> {
        if self.is_unrestricted() {
            return Ok(table.dataframe().clone());
        }

        let mut lazy = table.dataframe().clone().lazy();
        if let Some(year) = self.year {
            lazy = lazy.filter(col(YEAR).eq(lit(year)));
        }
        if let Some(sport) = &self.sport {
            lazy = lazy.filter(col(SPORT).eq(lit(sport.as_str())));
        }
        lazy.collect()
    }
}

impl std::fmt::Display for QueryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let year = self
            .year
            .map(|y| y.to_string())
            .unwrap_or_else(|| "All".to_string());
        let sport = self.sport.as_deref().unwrap_or("All");
        write!(f, "year={}, sport={}", year, sport)
    }
}

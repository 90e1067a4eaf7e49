//! Data Processor Module
//! Coerces the raw frame to the canonical schema and runs the cleaning pipeline.

use super::columns::{self, AGE, HEIGHT, ID, MEDAL, NOC, WEIGHT, YEAR};
use super::loader::LoaderError;
use super::NO_MEDAL;
use crate::stats::StatsCalculator;
use polars::prelude::*;
use tracing::debug;

/// Means used to fill missing measurements, one decimal place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImputedMeans {
    pub age: f64,
    pub height: f64,
    pub weight: f64,
}

/// Handles schema coercion and cleaning operations.
pub struct DataProcessor;

impl DataProcessor {
    /// Check required columns and cast every column to its canonical dtype.
    ///
    /// Numeric columns use a strict cast so a value like `"abc"` in `Age`
    /// surfaces as a schema error instead of silently becoming null.
    pub fn coerce_schema(mut df: DataFrame) -> Result<DataFrame, LoaderError> {
        for name in columns::REQUIRED {
            if df.get_column_index(name).is_none() {
                return Err(LoaderError::MissingColumn(name.to_string()));
            }
        }

        Self::strict_cast(&mut df, ID, DataType::Int64, "integer")?;
        Self::strict_cast(&mut df, YEAR, DataType::Int32, "integer")?;
        for name in columns::MEASUREMENTS {
            Self::strict_cast(&mut df, name, DataType::Float64, "number")?;
        }

        for name in columns::TEXT {
            if df.get_column_index(name).is_none() {
                continue;
            }
            let series = df
                .column(name)?
                .as_materialized_series()
                .cast(&DataType::String)?;
            df.with_column(series)?;
        }

        Ok(df)
    }

    fn strict_cast(
        df: &mut DataFrame,
        name: &str,
        dtype: DataType,
        expected: &'static str,
    ) -> Result<(), LoaderError> {
        let series = df
            .column(name)?
            .as_materialized_series()
            .strict_cast(&dtype)
            .map_err(|_| LoaderError::Schema {
                column: name.to_string(),
                expected,
            })?;
        df.with_column(series)?;
        Ok(())
    }

    /// Remove exact-duplicate rows, keeping the first occurrence in file order.
    pub fn drop_duplicates(df: DataFrame) -> PolarsResult<DataFrame> {
        df.lazy()
            .unique_stable(None, UniqueKeepStrategy::First)
            .collect()
    }

    /// Compute the fill values for `Age`, `Height` and `Weight`.
    ///
    /// Must run on the deduplicated frame: duplicates would otherwise weigh
    /// twice in the mean.
    pub fn imputation_means(df: &DataFrame) -> Result<ImputedMeans, LoaderError> {
        Ok(ImputedMeans {
            age: Self::column_mean(df, AGE)?,
            height: Self::column_mean(df, HEIGHT)?,
            weight: Self::column_mean(df, WEIGHT)?,
        })
    }

    fn column_mean(df: &DataFrame, name: &str) -> Result<f64, LoaderError> {
        let values: Vec<f64> = df.column(name)?.f64()?.into_iter().flatten().collect();
        match StatsCalculator::imputation_mean(&values) {
            Some(mean) => Ok(mean),
            // Nothing to fill in an empty table.
            None if df.height() == 0 => Ok(0.0),
            None => Err(LoaderError::NoObservations(name.to_string())),
        }
    }

    /// Fill missing measurements with their means and missing medals with the sentinel.
    pub fn fill_missing(df: DataFrame, means: ImputedMeans) -> PolarsResult<DataFrame> {
        df.lazy()
            .with_columns([
                col(AGE).fill_null(lit(means.age)),
                col(HEIGHT).fill_null(lit(means.height)),
                col(WEIGHT).fill_null(lit(means.weight)),
                col(MEDAL).fill_null(lit(NO_MEDAL)),
            ])
            .collect()
    }

    /// Drop the country-code column; a source without it is fine.
    pub fn drop_unused(df: DataFrame) -> PolarsResult<DataFrame> {
        if df.get_column_index(NOC).is_some() {
            df.drop(NOC)
        } else {
            Ok(df)
        }
    }

    /// Full cleaning pipeline. Order matters: dedup, then means, then fills.
    pub fn clean(df: DataFrame) -> Result<(DataFrame, ImputedMeans), LoaderError> {
        let df = Self::coerce_schema(df)?;
        let raw_rows = df.height();

        let df = Self::drop_duplicates(df)?;
        debug!(
            removed = raw_rows - df.height(),
            "Dropped duplicate rows"
        );

        let means = Self::imputation_means(&df)?;
        let df = Self::fill_missing(df, means)?;
        let df = Self::drop_unused(df)?;

        Ok((df, means))
    }
}

//! Aggregation Engine
//! Computes every dashboard projection for one filter selection.

use super::filter::{QueryError, QueryFilter};
use super::result::{AggregationResult, BodyMeasurement, LabelCount, YearCount};
use crate::data::columns::{AGE, HEIGHT, MEDAL, SEX, SPORT, TEAM, WEIGHT, YEAR};
use crate::data::{CanonicalTable, NO_MEDAL};
use crate::stats::StatsCalculator;
use polars::prelude::*;
use tracing::debug;

/// Entries kept in the top-sports and top-teams rankings.
pub const TOP_N: usize = 10;

/// Buckets in the age distribution.
pub const HISTOGRAM_BINS: usize = 30;

const COUNT: &str = "count";

/// Stateless query engine over a shared canonical table.
pub struct AggregationEngine;

impl AggregationEngine {
    /// Validate the filter, build the filtered view and compute all projections.
    ///
    /// The per-year trends always use the whole table; everything else
    /// respects the filter.
    pub fn aggregate(
        table: &CanonicalTable,
        filter: &QueryFilter,
    ) -> Result<AggregationResult, QueryError> {
        filter.validate(table)?;
        let view = filter.apply(table)?;

        let (total_sports, countries_participated, total_medals) = Self::totals(&view)?;

        let result = AggregationResult {
            total_athletes: view.height(),
            total_sports,
            total_medals,
            countries_participated,
            sports_per_year: Self::sports_per_year(table)?,
            medals_per_year: Self::medals_per_year(table)?,
            top_sports_by_medals: Self::top_by_medals(&view, SPORT)?,
            top_teams_by_medals: Self::top_by_medals(&view, TEAM)?,
            age_distribution: Self::age_distribution(&view)?,
            gender_counts: Self::gender_counts(&view)?,
            height_weight_scatter: Self::height_weight_scatter(&view)?,
        };

        debug!(
            %filter,
            athletes = result.total_athletes,
            medals = result.total_medals,
            "Aggregated filtered view"
        );

        Ok(result)
    }

    fn medal_rows(lazy: LazyFrame) -> LazyFrame {
        lazy.filter(col(MEDAL).neq(lit(NO_MEDAL)))
    }

    /// Distinct sports, distinct teams and medal rows of the view.
    fn totals(view: &DataFrame) -> PolarsResult<(usize, usize, usize)> {
        let totals = view
            .clone()
            .lazy()
            .select([
                col(SPORT)
                    .drop_nulls()
                    .n_unique()
                    .cast(DataType::UInt64)
                    .alias("sports"),
                col(TEAM)
                    .drop_nulls()
                    .n_unique()
                    .cast(DataType::UInt64)
                    .alias("teams"),
                col(MEDAL)
                    .neq(lit(NO_MEDAL))
                    .sum()
                    .cast(DataType::UInt64)
                    .alias("medals"),
            ])
            .collect()?;

        let scalar = |name: &str| -> PolarsResult<usize> {
            Ok(totals.column(name)?.u64()?.get(0).unwrap_or(0) as usize)
        };

        Ok((scalar("sports")?, scalar("teams")?, scalar("medals")?))
    }

    /// Distinct sports contested per year over the whole table.
    pub fn sports_per_year(table: &CanonicalTable) -> PolarsResult<Vec<YearCount>> {
        let df = table
            .dataframe()
            .clone()
            .lazy()
            .group_by([col(YEAR)])
            .agg([col(SPORT)
                .drop_nulls()
                .n_unique()
                .cast(DataType::UInt64)
                .alias(COUNT)])
            .sort([YEAR], SortMultipleOptions::default())
            .collect()?;

        Self::year_counts(&df)
    }

    /// Medals awarded per year over the whole table.
    pub fn medals_per_year(table: &CanonicalTable) -> PolarsResult<Vec<YearCount>> {
        let df = Self::medal_rows(table.dataframe().clone().lazy())
            .group_by([col(YEAR)])
            .agg([len().cast(DataType::UInt64).alias(COUNT)])
            .sort([YEAR], SortMultipleOptions::default())
            .collect()?;

        Self::year_counts(&df)
    }

    /// Medal count per `key`, highest first, at most [`TOP_N`] entries.
    ///
    /// Groups are formed in first-seen order and the sort is stable, so ties
    /// keep that order.
    fn top_by_medals(view: &DataFrame, key: &str) -> PolarsResult<Vec<LabelCount>> {
        let df = Self::medal_rows(view.clone().lazy())
            .group_by_stable([col(key)])
            .agg([len().cast(DataType::UInt64).alias(COUNT)])
            .sort(
                [COUNT],
                SortMultipleOptions::default()
                    .with_order_descending(true)
                    .with_maintain_order(true),
            )
            .limit(TOP_N as IdxSize)
            .collect()?;

        Self::label_counts(&df, key)
    }

    fn gender_counts(view: &DataFrame) -> PolarsResult<Vec<LabelCount>> {
        let df = view
            .clone()
            .lazy()
            .group_by_stable([col(SEX)])
            .agg([len().cast(DataType::UInt64).alias(COUNT)])
            .collect()?;

        Self::label_counts(&df, SEX)
    }

    fn age_distribution(view: &DataFrame) -> PolarsResult<Vec<crate::stats::HistogramBucket>> {
        let ages: Vec<f64> = view.column(AGE)?.f64()?.into_iter().flatten().collect();
        Ok(StatsCalculator::histogram(&ages, HISTOGRAM_BINS))
    }

    fn height_weight_scatter(view: &DataFrame) -> PolarsResult<Vec<BodyMeasurement>> {
        let heights = view.column(HEIGHT)?.f64()?;
        let weights = view.column(WEIGHT)?.f64()?;
        let sexes = view.column(SEX)?.str()?;

        Ok(heights
            .into_iter()
            .zip(weights.into_iter())
            .zip(sexes.into_iter())
            .filter_map(|((h, w), s)| {
                Some(BodyMeasurement {
                    height: h?,
                    weight: w?,
                    sex: s.unwrap_or_default().to_string(),
                })
            })
            .collect())
    }

    fn year_counts(df: &DataFrame) -> PolarsResult<Vec<YearCount>> {
        let years = df.column(YEAR)?.i32()?;
        let counts = df.column(COUNT)?.u64()?;

        Ok(years
            .into_iter()
            .zip(counts.into_iter())
            .filter_map(|(year, count)| {
                Some(YearCount {
                    year: year?,
                    count: count.unwrap_or(0),
                })
            })
            .collect())
    }

    fn label_counts(df: &DataFrame, key: &str) -> PolarsResult<Vec<LabelCount>> {
        let labels = df.column(key)?.str()?;
        let counts = df.column(COUNT)?.u64()?;

        Ok(labels
            .into_iter()
            .zip(counts.into_iter())
            .filter_map(|(label, count)| {
                Some(LabelCount {
                    label: label?.to_string(),
                    count: count.unwrap_or(0),
                })
            })
            .collect())
    }
}

//! Canonical Table
//! The cleaned, read-only dataset every query runs against.

use super::columns::{SPORT, YEAR};
use super::loader::LoaderError;
use super::processor::{DataProcessor, ImputedMeans};
use polars::prelude::*;

/// Deduplicated, null-free athlete-event table.
///
/// Built once and never mutated; share it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct CanonicalTable {
    df: DataFrame,
    means: ImputedMeans,
    years: Vec<i32>,
    sports: Vec<String>,
}

impl CanonicalTable {
    /// Run the cleaning pipeline over an already-read frame.
    pub fn from_raw(raw: DataFrame) -> Result<Self, LoaderError> {
        let (df, means) = DataProcessor::clean(raw)?;

        let mut years: Vec<i32> = df.column(YEAR)?.i32()?.into_iter().flatten().collect();
        years.sort_unstable();
        years.dedup();

        let mut sports: Vec<String> = df
            .column(SPORT)?
            .str()?
            .into_iter()
            .flatten()
            .map(str::to_string)
            .collect();
        sports.sort();
        sports.dedup();

        Ok(Self {
            df,
            means,
            years,
            sports,
        })
    }

    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }

    pub fn height(&self) -> usize {
        self.df.height()
    }

    pub fn width(&self) -> usize {
        self.df.width()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    /// Fill values used for missing age, height and weight.
    pub fn imputed_means(&self) -> ImputedMeans {
        self.means
    }

    /// Distinct years, ascending.
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    /// Distinct sports, alphabetical.
    pub fn sports(&self) -> &[String] {
        &self.sports
    }

    pub fn has_year(&self, year: i32) -> bool {
        self.years.binary_search(&year).is_ok()
    }

    pub fn has_sport(&self, sport: &str) -> bool {
        self.sports
            .binary_search_by(|s| s.as_str().cmp(sport))
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::columns::{AGE, HEIGHT, MEDAL, NOC, WEIGHT};
    use crate::data::fixtures::{raw_frame, RawRow};

    fn table() -> CanonicalTable {
        CanonicalTable::from_raw(raw_frame(&[
            RawRow::new(1, 2004, "Judo", Some("Gold")),
            RawRow::new(2, 2000, "Archery", None).age(None),
            RawRow::new(3, 2000, "Judo", None).body(None, None),
        ]))
        .unwrap()
    }

    #[test]
    fn domains_are_sorted_and_distinct() {
        let t = table();
        assert_eq!(t.years(), &[2000, 2004]);
        assert_eq!(t.sports(), &["Archery".to_string(), "Judo".to_string()]);
        assert!(t.has_year(2004));
        assert!(!t.has_year(1900));
        assert!(t.has_sport("Judo"));
        assert!(!t.has_sport("Curling"));
    }

    #[test]
    fn canonical_columns_have_no_nulls() {
        let t = table();
        for name in [AGE, HEIGHT, WEIGHT, MEDAL] {
            assert_eq!(t.dataframe().column(name).unwrap().null_count(), 0, "{name}");
        }
        assert!(!t.column_names().iter().any(|c| c == NOC));
    }
}

//! CSV Data Loader Module
//! Reads the athlete-events file with Polars and hands it to the cleaning pipeline.

use super::table::CanonicalTable;
use polars::io::csv::read::NullValues;
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load dataset {path}: {reason}")]
    DataLoad { path: PathBuf, reason: String },
    #[error("Dataset is missing required column '{0}'")]
    MissingColumn(String),
    #[error("Column '{column}' contains values that are not a valid {expected}")]
    Schema {
        column: String,
        expected: &'static str,
    },
    #[error("Column '{0}' has no observed values to compute a mean from")]
    NoObservations(String),
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
}

impl LoaderError {
    /// True for failures caused by the shape of the data rather than access to it.
    pub fn is_schema_error(&self) -> bool {
        matches!(self, Self::Schema { .. } | Self::NoObservations(_))
    }
}

/// Reads the source file once and produces the canonical table.
pub struct DataLoader {
    null_values: Vec<String>,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new(vec!["NA".to_string()])
    }
}

impl DataLoader {
    pub fn new(null_values: Vec<String>) -> Self {
        Self { null_values }
    }

    /// Read the CSV without any cleaning.
    pub fn read_raw(&self, path: &Path) -> Result<DataFrame, LoaderError> {
        if !path.is_file() {
            return Err(LoaderError::DataLoad {
                path: path.to_path_buf(),
                reason: "file not found".to_string(),
            });
        }

        // Infer over the whole file so a stray string in a numeric column
        // yields a String column (caught by the strict cast) instead of a parse error.
        LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(None)
            .with_null_values(self.null_values())
            .finish()
            .and_then(|lazy| lazy.collect())
            .map_err(|e| LoaderError::DataLoad {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })
    }

    fn null_values(&self) -> Option<NullValues> {
        match self.null_values.as_slice() {
            [] => None,
            [single] => Some(NullValues::AllColumnsSingle(single.as_str().into())),
            many => Some(NullValues::AllColumns(
                many.iter().map(|v| v.as_str().into()).collect(),
            )),
        }
    }

    /// Read and clean the dataset.
    pub fn load_and_clean(&self, path: &Path) -> Result<CanonicalTable, LoaderError> {
        let raw = self.read_raw(path)?;
        let raw_rows = raw.height();
        let table = CanonicalTable::from_raw(raw)?;

        let means = table.imputed_means();
        info!(
            path = %path.display(),
            raw_rows,
            rows = table.height(),
            columns = table.width(),
            age = means.age,
            height = means.height,
            weight = means.weight,
            "Loaded canonical table"
        );

        Ok(table)
    }
}

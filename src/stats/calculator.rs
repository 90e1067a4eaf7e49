//! Statistics Calculator Module
//! Mean imputation values and equal-width histogram bucketing.

use serde::Serialize;
use statrs::statistics::Statistics;

/// One equal-width histogram bucket, `[lower, upper)` except the last which is closed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBucket {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Stateless statistical helpers.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Arithmetic mean, `None` for an empty sample.
    pub fn mean(values: &[f64]) -> Option<f64> {
        if values.is_empty() {
            return None;
        }
        Some(Statistics::mean(values.iter()))
    }

    /// Round to `decimals` places, halves to the even digit.
    ///
    /// Works on the exact decimal expansion of `value` through the formatter,
    /// so `0.35` (stored just below the half) rounds down.
    pub fn round_to(value: f64, decimals: u32) -> f64 {
        if !value.is_finite() {
            return value;
        }
        format!("{:.*}", decimals as usize, value)
            .parse()
            .unwrap_or(value)
    }

    /// Mean rounded to one decimal, the value used to fill missing measurements.
    pub fn imputation_mean(values: &[f64]) -> Option<f64> {
        Self::mean(values).map(|m| Self::round_to(m, 1))
    }

    /// Split the observed `min..=max` range into `bins` equal-width buckets.
    ///
    /// NaN values are skipped. An empty sample yields no buckets. When every
    /// value is identical the buckets have zero width and all values are
    /// counted in the first one.
    pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBucket> {
        let finite: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
        if finite.is_empty() || bins == 0 {
            return Vec::new();
        }

        let min = Statistics::min(finite.iter());
        let max = Statistics::max(finite.iter());
        let width = (max - min) / bins as f64;

        let mut buckets: Vec<HistogramBucket> = (0..bins)
            .map(|i| HistogramBucket {
                lower: min + width * i as f64,
                upper: if i + 1 == bins {
                    max
                } else {
                    min + width * (i + 1) as f64
                },
                count: 0,
            })
            .collect();

        for v in finite {
            let idx = if width > 0.0 {
                (((v - min) / width).floor() as usize).min(bins - 1)
            } else {
                0
            };
            buckets[idx].count += 1;
        }

        buckets
    }
}

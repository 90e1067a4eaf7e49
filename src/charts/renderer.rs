//! Static Chart Renderer
//! Writes a PNG snapshot of the dashboard for the current filter.
//!
//! Layout (4 rows x 2 columns):
//! 1. Key statistics | Number of sports over years
//! 2. Total medals over years | Age distribution
//! 3. Top 10 sports by medals | Top 10 countries by medals
//! 4. Gender participation | Height vs weight

use olympics_dashboard::query::{AggregationResult, LabelCount, QueryFilter, YearCount};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;
use thiserror::Error;

const SKY: RGBColor = RGBColor(52, 152, 219);
const GOLD: RGBColor = RGBColor(250, 204, 21);
const EMERALD: RGBColor = RGBColor(46, 204, 113);
const PINK: RGBColor = RGBColor(233, 30, 99);
const PURPLE: RGBColor = RGBColor(155, 89, 182);
const GREY: RGBColor = RGBColor(96, 125, 139);
const FONT: &str = "sans-serif";

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to draw chart: {0}")]
    Drawing(String),
}

fn draw_err<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Drawing(e.to_string())
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render every chart of `result` into one PNG at `path`.
    pub fn render_dashboard(
        result: &AggregationResult,
        filter: &QueryFilter,
        path: &Path,
        size: (u32, u32),
    ) -> Result<(), RenderError> {
        let root = BitMapBackend::new(path, size).into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;
        let root = root
            .titled(
                &format!("Olympics Athlete Events Dashboard ({})", filter),
                (FONT, 30),
            )
            .map_err(draw_err)?;

        let panels = root.split_evenly((4, 2));

        Self::draw_metrics(&panels[0], result)?;
        Self::draw_year_chart(
            &panels[1],
            "Number of Sports Over Years",
            &result.sports_per_year,
            false,
        )?;
        Self::draw_year_chart(
            &panels[2],
            "Total Medals Won Over Years",
            &result.medals_per_year,
            true,
        )?;
        Self::draw_histogram(&panels[3], result)?;
        Self::draw_ranking(
            &panels[4],
            "Top 10 Sports by Medals",
            &result.top_sports_by_medals,
            SKY,
            false,
        )?;
        Self::draw_ranking(
            &panels[5],
            "Top 10 Countries by Medals",
            &result.top_teams_by_medals,
            PURPLE,
            false,
        )?;
        Self::draw_ranking(
            &panels[6],
            "Gender Participation",
            &result.gender_counts,
            PINK,
            true,
        )?;
        Self::draw_scatter(&panels[7], result)?;

        root.present().map_err(draw_err)?;
        Ok(())
    }

    fn bar_color(label: &str, color: RGBColor, by_sex: bool) -> RGBColor {
        if by_sex {
            Self::sex_color(label)
        } else {
            color
        }
    }

    fn sex_color(sex: &str) -> RGBColor {
        match sex {
            "M" => SKY,
            "F" => PINK,
            _ => GREY,
        }
    }

    fn draw_metrics<DB: DrawingBackend>(
        area: &DrawingArea<DB, Shift>,
        result: &AggregationResult,
    ) -> Result<(), RenderError> {
        area.draw(&Text::new(
            "Key Statistics",
            (30, 30),
            (FONT, 28).into_font().color(&BLACK),
        ))
        .map_err(draw_err)?;

        let lines = [
            format!("Total Athletes: {}", result.total_athletes),
            format!("Total Sports: {}", result.total_sports),
            format!("Total Medals: {}", result.total_medals),
            format!("Countries Participated: {}", result.countries_participated),
        ];
        for (i, text) in lines.iter().enumerate() {
            area.draw(&Text::new(
                text.as_str(),
                (40, 80 + i as i32 * 40),
                (FONT, 22).into_font().color(&BLACK),
            ))
            .map_err(draw_err)?;
        }
        Ok(())
    }

    fn draw_year_chart<DB: DrawingBackend>(
        area: &DrawingArea<DB, Shift>,
        caption: &str,
        rows: &[YearCount],
        filled: bool,
    ) -> Result<(), RenderError> {
        let x_min = rows.first().map(|r| r.year as f64).unwrap_or(0.0);
        let x_max = rows.last().map(|r| r.year as f64).unwrap_or(1.0).max(x_min + 1.0);
        let y_max = rows.iter().map(|r| r.count).max().unwrap_or(0) as f64 * 1.1 + 1.0;

        let mut chart = ChartBuilder::on(area)
            .caption(caption, (FONT, 20))
            .margin(10)
            .x_label_area_size(30)
            .y_label_area_size(50)
            .build_cartesian_2d(x_min..x_max, 0f64..y_max)
            .map_err(draw_err)?;

        chart
            .configure_mesh()
            .x_desc("Year")
            .x_label_formatter(&|x| format!("{:.0}", x))
            .draw()
            .map_err(draw_err)?;

        let points = rows.iter().map(|r| (r.year as f64, r.count as f64));
        if filled {
            chart
                .draw_series(
                    AreaSeries::new(points, 0.0, GOLD.mix(0.35).filled()).border_style(&GOLD),
                )
                .map_err(draw_err)?;
        } else {
            chart
                .draw_series(LineSeries::new(points, SKY.stroke_width(2)))
                .map_err(draw_err)?;
            chart
                .draw_series(
                    rows.iter()
                        .map(|r| Circle::new((r.year as f64, r.count as f64), 3, SKY.filled())),
                )
                .map_err(draw_err)?;
        }
        Ok(())
    }

    fn draw_histogram<DB: DrawingBackend>(
        area: &DrawingArea<DB, Shift>,
        result: &AggregationResult,
    ) -> Result<(), RenderError> {
        let buckets = &result.age_distribution;
        let x_min = buckets.first().map(|b| b.lower).unwrap_or(0.0);
        let x_max = buckets.last().map(|b| b.upper).unwrap_or(1.0).max(x_min + 1.0);
        let y_max = buckets.iter().map(|b| b.count).max().unwrap_or(0) as f64 * 1.1 + 1.0;

        let mut chart = ChartBuilder::on(area)
            .caption("Age Distribution", (FONT, 20))
            .margin(10)
            .x_label_area_size(30)
            .y_label_area_size(50)
            .build_cartesian_2d(x_min..x_max, 0f64..y_max)
            .map_err(draw_err)?;

        chart
            .configure_mesh()
            .x_desc("Age")
            .y_desc("Count")
            .draw()
            .map_err(draw_err)?;

        chart
            .draw_series(buckets.iter().map(|b| {
                Rectangle::new([(b.lower, 0.0), (b.upper, b.count as f64)], EMERALD.filled())
            }))
            .map_err(draw_err)?;
        Ok(())
    }

    /// Horizontal bars with the label written at the start of each bar.
    ///
    /// With `by_sex` each bar takes its label's sex colour instead of `color`.
    fn draw_ranking<DB: DrawingBackend>(
        area: &DrawingArea<DB, Shift>,
        caption: &str,
        rows: &[LabelCount],
        color: RGBColor,
        by_sex: bool,
    ) -> Result<(), RenderError> {
        let n = rows.len().max(1) as f64;
        let x_max = rows.iter().map(|r| r.count).max().unwrap_or(0) as f64 * 1.15 + 1.0;

        let mut chart = ChartBuilder::on(area)
            .caption(caption, (FONT, 20))
            .margin(10)
            .x_label_area_size(30)
            .y_label_area_size(10)
            .build_cartesian_2d(0f64..x_max, 0f64..n)
            .map_err(draw_err)?;

        chart
            .configure_mesh()
            .disable_y_mesh()
            .y_labels(0)
            .draw()
            .map_err(draw_err)?;

        let top = rows.len() as f64;
        chart
            .draw_series(rows.iter().enumerate().map(|(i, r)| {
                let y = top - 1.0 - i as f64;
                let fill = Self::bar_color(&r.label, color, by_sex);
                Rectangle::new([(0.0, y + 0.15), (r.count as f64, y + 0.85)], fill.mix(0.8).filled())
            }))
            .map_err(draw_err)?;

        chart
            .draw_series(rows.iter().enumerate().map(|(i, r)| {
                let y = top - 1.0 - i as f64;
                Text::new(
                    format!("{} ({})", r.label, r.count),
                    (x_max * 0.01, y + 0.65),
                    (FONT, 14).into_font().color(&BLACK),
                )
            }))
            .map_err(draw_err)?;
        Ok(())
    }

    fn draw_scatter<DB: DrawingBackend>(
        area: &DrawingArea<DB, Shift>,
        result: &AggregationResult,
    ) -> Result<(), RenderError> {
        let points = &result.height_weight_scatter;
        let bounds = |f: fn(&olympics_dashboard::query::BodyMeasurement) -> f64| {
            let lo = points.iter().map(f).fold(f64::INFINITY, f64::min);
            let hi = points.iter().map(f).fold(f64::NEG_INFINITY, f64::max);
            if lo.is_finite() && hi.is_finite() {
                (lo - 5.0, hi + 5.0)
            } else {
                (0.0, 1.0)
            }
        };
        let (h_min, h_max) = bounds(|p| p.height);
        let (w_min, w_max) = bounds(|p| p.weight);

        let mut chart = ChartBuilder::on(area)
            .caption("Height vs Weight", (FONT, 20))
            .margin(10)
            .x_label_area_size(30)
            .y_label_area_size(50)
            .build_cartesian_2d(h_min..h_max, w_min..w_max)
            .map_err(draw_err)?;

        chart
            .configure_mesh()
            .x_desc("Height (cm)")
            .y_desc("Weight (kg)")
            .draw()
            .map_err(draw_err)?;

        chart
            .draw_series(points.iter().map(|p| {
                Circle::new(
                    (p.height, p.weight),
                    2,
                    Self::sex_color(&p.sex).mix(0.6).filled(),
                )
            }))
            .map_err(draw_err)?;
        Ok(())
    }
}

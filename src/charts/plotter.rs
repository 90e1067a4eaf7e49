//! Chart Plotter Module
//! Creates interactive visualizations of an aggregation result using egui_plot.

use egui::{Color32, RichText};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Points};
use olympics_dashboard::query::{BodyMeasurement, LabelCount, YearCount};
use olympics_dashboard::stats::HistogramBucket;

pub const ACCENT: Color32 = Color32::from_rgb(250, 204, 21); // Gold

pub const PALETTE: [Color32; 10] = [
    Color32::from_rgb(52, 152, 219),  // Blue
    Color32::from_rgb(231, 76, 60),   // Red
    Color32::from_rgb(46, 204, 113),  // Green
    Color32::from_rgb(155, 89, 182),  // Purple
    Color32::from_rgb(243, 156, 18),  // Orange
    Color32::from_rgb(26, 188, 156),  // Teal
    Color32::from_rgb(233, 30, 99),   // Pink
    Color32::from_rgb(0, 188, 212),   // Cyan
    Color32::from_rgb(121, 85, 72),   // Brown
    Color32::from_rgb(96, 125, 139),  // Blue Grey
];

const CHART_HEIGHT: f32 = 280.0;

/// Draws the dashboard charts.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Stable color per sex so the pie and scatter agree.
    pub fn sex_color(sex: &str) -> Color32 {
        match sex {
            "M" => PALETTE[0],
            "F" => PALETTE[6],
            _ => PALETTE[9],
        }
    }

    fn year_points(rows: &[YearCount]) -> PlotPoints {
        rows.iter()
            .map(|r| [r.year as f64, r.count as f64])
            .collect()
    }

    /// Line chart with markers: sports contested per year.
    pub fn draw_sports_per_year(ui: &mut egui::Ui, rows: &[YearCount]) {
        Plot::new("sports_per_year")
            .height(CHART_HEIGHT)
            .x_axis_label("Year")
            .y_axis_label("No. of sports")
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(Self::year_points(rows))
                        .color(PALETTE[0])
                        .width(2.0)
                        .name("Sports"),
                );
                plot_ui.points(
                    Points::new(Self::year_points(rows))
                        .radius(3.0)
                        .color(PALETTE[0]),
                );
            });
    }

    /// Area chart: medals awarded per year.
    pub fn draw_medals_per_year(ui: &mut egui::Ui, rows: &[YearCount]) {
        Plot::new("medals_per_year")
            .height(CHART_HEIGHT)
            .x_axis_label("Year")
            .y_axis_label("Medal count")
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(Self::year_points(rows))
                        .color(ACCENT)
                        .fill(0.0_f32)
                        .width(1.5)
                        .name("Medals"),
                );
            });
    }

    /// Horizontal bar chart of a top-N ranking, highest at the top.
    pub fn draw_ranking(ui: &mut egui::Ui, id: &str, rows: &[LabelCount], color: Color32) {
        let n = rows.len();
        let labels: Vec<String> = rows.iter().map(|r| r.label.clone()).collect();

        let bars: Vec<Bar> = rows
            .iter()
            .enumerate()
            .map(|(i, r)| {
                Bar::new((n - 1 - i) as f64, r.count as f64)
                    .name(&r.label)
                    .width(0.7)
            })
            .collect();

        Plot::new(id.to_string())
            .height(CHART_HEIGHT)
            .x_axis_label("Medals")
            .allow_scroll(false)
            .allow_drag(false)
            .y_axis_formatter(move |mark, _range| {
                let v = mark.value;
                if v < 0.0 || v.fract() != 0.0 {
                    return String::new();
                }
                let idx = v as usize;
                if idx < n {
                    labels[n - 1 - idx].clone()
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).horizontal().color(color));
            });
    }

    /// Age histogram from precomputed buckets.
    pub fn draw_age_histogram(ui: &mut egui::Ui, buckets: &[HistogramBucket]) {
        let bars: Vec<Bar> = buckets
            .iter()
            .map(|b| {
                let width = (b.upper - b.lower).max(0.5);
                Bar::new((b.lower + b.upper) / 2.0, b.count as f64)
                    .width(width)
                    .name(format!("{:.1} - {:.1}", b.lower, b.upper))
            })
            .collect();

        Plot::new("age_distribution")
            .height(CHART_HEIGHT)
            .x_axis_label("Age")
            .y_axis_label("Count")
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).color(PALETTE[2]));
            });
    }

    /// Pie chart of gender participation drawn with the painter.
    pub fn draw_gender_pie(ui: &mut egui::Ui, rows: &[LabelCount]) {
        let total: u64 = rows.iter().map(|r| r.count).sum();
        let size = egui::vec2(ui.available_width().min(CHART_HEIGHT), CHART_HEIGHT - 40.0);
        let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());

        if total == 0 {
            ui.painter().text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                "No data",
                egui::FontId::proportional(14.0),
                Color32::GRAY,
            );
            return;
        }

        let center = rect.center();
        let radius = rect.height().min(rect.width()) / 2.0 - 4.0;
        let painter = ui.painter();
        let mut start = -std::f32::consts::FRAC_PI_2;

        for row in rows {
            let sweep = std::f32::consts::TAU * row.count as f32 / total as f32;
            let color = Self::sex_color(&row.label);
            // fan of thin triangles keeps every shape convex
            let steps = ((sweep / 0.05).ceil() as usize).max(1);
            for s in 0..steps {
                let a0 = start + sweep * s as f32 / steps as f32;
                let a1 = start + sweep * (s + 1) as f32 / steps as f32;
                painter.add(egui::Shape::convex_polygon(
                    vec![
                        center,
                        center + radius * egui::vec2(a0.cos(), a0.sin()),
                        center + radius * egui::vec2(a1.cos(), a1.sin()),
                    ],
                    color,
                    egui::Stroke::NONE,
                ));
            }
            start += sweep;
        }

        ui.horizontal(|ui| {
            for row in rows {
                let (swatch, _) = ui.allocate_exact_size(egui::vec2(14.0, 14.0), egui::Sense::hover());
                ui.painter().rect_filled(swatch, 3.0, Self::sex_color(&row.label));
                let share = 100.0 * row.count as f64 / total as f64;
                ui.label(RichText::new(format!("{} {:.1}%", row.label, share)).size(13.0));
                ui.add_space(12.0);
            }
        });
    }

    /// Height vs weight scatter, one series per sex.
    pub fn draw_height_weight(ui: &mut egui::Ui, points: &[BodyMeasurement]) {
        let mut sexes: Vec<&str> = Vec::new();
        for p in points {
            if !sexes.contains(&p.sex.as_str()) {
                sexes.push(&p.sex);
            }
        }

        Plot::new("height_weight")
            .height(CHART_HEIGHT + 60.0)
            .x_axis_label("Height (cm)")
            .y_axis_label("Weight (kg)")
            .legend(Legend::default())
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                for sex in &sexes {
                    let series: PlotPoints = points
                        .iter()
                        .filter(|p| p.sex == *sex)
                        .map(|p| [p.height, p.weight])
                        .collect();
                    plot_ui.points(
                        Points::new(series)
                            .radius(2.0)
                            .color(Self::sex_color(sex).gamma_multiply(0.6))
                            .name(*sex),
                    );
                }
            });
    }
}

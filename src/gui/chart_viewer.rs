//! Chart Viewer Widget
//! Right side scrollable panel: key statistics, trends, rankings and demographics.

use crate::charts::{ChartPlotter, PALETTE};
use egui::{Color32, RichText, ScrollArea};
use olympics_dashboard::query::{AggregationResult, QueryFilter};

const SECTION_SPACING: f32 = 15.0;

/// Scrollable dashboard body for the latest aggregation result.
#[derive(Default)]
pub struct ChartViewer {
    pub result: Option<AggregationResult>,
    pub filter: QueryFilter,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.result = None;
    }

    pub fn set_result(&mut self, result: AggregationResult, filter: QueryFilter) {
        self.result = Some(result);
        self.filter = filter;
    }

    /// Draw the chart viewer
    pub fn show(&self, ui: &mut egui::Ui) {
        let Some(result) = &self.result else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        };

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.label(
                    RichText::new("🏅 Olympics Athlete Events Dashboard")
                        .size(24.0)
                        .strong()
                        .color(Color32::from_rgb(250, 204, 21)),
                );
                ui.label(
                    RichText::new(format!("Filter: {}", self.filter))
                        .size(12.0)
                        .color(Color32::GRAY),
                );
                ui.add_space(SECTION_SPACING);

                Self::section(ui, "📊 Key Statistics");
                Self::draw_metrics(ui, result);
                ui.separator();

                Self::section(ui, "📅 Year-wise Trends");
                ui.label("Number of Sports Over Years");
                ChartPlotter::draw_sports_per_year(ui, &result.sports_per_year);
                ui.add_space(10.0);
                ui.label("Total Medals Won Over Years");
                ChartPlotter::draw_medals_per_year(ui, &result.medals_per_year);
                ui.separator();

                Self::section(ui, "🏆 Top Performing Sports & Countries");
                ui.columns(2, |cols| {
                    cols[0].label("Top 10 Sports by Medals");
                    ChartPlotter::draw_ranking(
                        &mut cols[0],
                        "top_sports",
                        &result.top_sports_by_medals,
                        PALETTE[0],
                    );
                    cols[1].label("Top 10 Countries by Medals");
                    ChartPlotter::draw_ranking(
                        &mut cols[1],
                        "top_teams",
                        &result.top_teams_by_medals,
                        PALETTE[3],
                    );
                });
                ui.separator();

                Self::section(ui, "👤 Athlete Demographics");
                ui.columns(2, |cols| {
                    cols[0].label("Age Distribution");
                    ChartPlotter::draw_age_histogram(&mut cols[0], &result.age_distribution);
                    cols[1].label("Gender Participation");
                    ChartPlotter::draw_gender_pie(&mut cols[1], &result.gender_counts);
                });
                ui.add_space(10.0);
                ui.label("Height vs Weight");
                ChartPlotter::draw_height_weight(ui, &result.height_weight_scatter);
            });
    }

    fn section(ui: &mut egui::Ui, title: &str) {
        ui.add_space(SECTION_SPACING);
        ui.label(RichText::new(title).size(18.0).strong());
        ui.add_space(8.0);
    }

    fn draw_metrics(ui: &mut egui::Ui, result: &AggregationResult) {
        let metrics = [
            ("Total Athletes", result.total_athletes),
            ("Total Sports", result.total_sports),
            ("Total Medals", result.total_medals),
            ("Countries Participated", result.countries_participated),
        ];

        ui.columns(metrics.len(), |cols| {
            for (col, (label, value)) in cols.iter_mut().zip(metrics) {
                egui::Frame::none()
                    .fill(col.visuals().widgets.noninteractive.bg_fill)
                    .rounding(12.0)
                    .inner_margin(15.0)
                    .show(col, |ui| {
                        ui.vertical_centered(|ui| {
                            ui.label(RichText::new(label).size(13.0).color(Color32::GRAY));
                            ui.label(RichText::new(value.to_string()).size(26.0).strong());
                        });
                    });
            }
        });
        ui.add_space(10.0);
    }
}

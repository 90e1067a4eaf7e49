//! Control Panel Widget
//! Left side panel with the year and sport filters and export controls.

use egui::{Color32, ComboBox, RichText};
use olympics_dashboard::query::QueryFilter;
use std::path::PathBuf;

const ALL: &str = "All";

/// Left side control panel: data source, filters, exports, status.
pub struct ControlPanel {
    pub dataset_path: Option<PathBuf>,
    pub filter: QueryFilter,
    pub years: Vec<i32>,
    pub sports: Vec<String>,
    pub progress: f32,
    pub status: String,
    pub export_enabled: bool,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            dataset_path: None,
            filter: QueryFilter::all(),
            years: Vec::new(),
            sports: Vec::new(),
            progress: 0.0,
            status: "Ready".to_string(),
            export_enabled: false,
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Populate the selectors once the table is loaded.
    pub fn update_domains(&mut self, years: Vec<i32>, sports: Vec<String>) {
        self.years = years;
        self.sports = sports;
        self.filter = QueryFilter::all();
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🏅 Olympics Dashboard")
                    .size(22.0)
                    .color(Color32::from_rgb(250, 204, 21)),
            );
            ui.label(
                RichText::new("Athlete Events Analysis")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Source Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                let path_text = self
                    .dataset_path
                    .as_ref()
                    .and_then(|p| p.file_name())
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| "No dataset configured".to_string());
                ui.label(RichText::new(path_text).size(12.0));
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Filters Section =====
        ui.label(RichText::new("🔎 Filters").size(14.0).strong());
        ui.add_space(8.0);

        let label_width = 90.0;
        let combo_width = 170.0;

        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Select Year:"));
            let selected = self
                .filter
                .year
                .map(|y| y.to_string())
                .unwrap_or_else(|| ALL.to_string());
            ComboBox::from_id_salt("year_filter")
                .width(combo_width)
                .selected_text(selected)
                .show_ui(ui, |ui| {
                    if ui
                        .selectable_label(self.filter.year.is_none(), ALL)
                        .clicked()
                        && self.filter.year.is_some()
                    {
                        self.filter.year = None;
                        action = ControlPanelAction::FilterChanged;
                    }
                    for year in &self.years {
                        let is_selected = self.filter.year == Some(*year);
                        if ui
                            .selectable_label(is_selected, year.to_string())
                            .clicked()
                            && !is_selected
                        {
                            self.filter.year = Some(*year);
                            action = ControlPanelAction::FilterChanged;
                        }
                    }
                });
        });

        ui.add_space(5.0);

        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Select Sport:"));
            let selected = self.filter.sport.clone().unwrap_or_else(|| ALL.to_string());
            ComboBox::from_id_salt("sport_filter")
                .width(combo_width)
                .selected_text(selected)
                .show_ui(ui, |ui| {
                    if ui
                        .selectable_label(self.filter.sport.is_none(), ALL)
                        .clicked()
                        && self.filter.sport.is_some()
                    {
                        self.filter.sport = None;
                        action = ControlPanelAction::FilterChanged;
                    }
                    for sport in &self.sports {
                        let is_selected = self.filter.sport.as_deref() == Some(sport.as_str());
                        if ui.selectable_label(is_selected, sport).clicked() && !is_selected {
                            self.filter.sport = Some(sport.clone());
                            action = ControlPanelAction::FilterChanged;
                        }
                    }
                });
        });

        ui.add_space(8.0);
        ui.vertical_centered(|ui| {
            if ui.small_button("Reset to All").clicked() && !self.filter.is_unrestricted() {
                self.filter = QueryFilter::all();
                action = ControlPanelAction::FilterChanged;
            }
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Export Buttons =====
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(self.export_enabled, |ui| {
                let png = egui::Button::new(RichText::new("🖼 Export PNG").size(14.0))
                    .min_size(egui::vec2(150.0, 30.0));
                if ui.add(png).clicked() {
                    action = ControlPanelAction::ExportPng;
                }

                ui.add_space(8.0);

                let json = egui::Button::new(RichText::new("📄 Export JSON").size(14.0))
                    .min_size(egui::vec2(150.0, 30.0));
                if ui.add(json).clicked() {
                    action = ControlPanelAction::ExportJson;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Progress Section =====
        ui.label(RichText::new("📊 Status").size(14.0).strong());
        ui.add_space(5.0);

        ui.add(
            egui::ProgressBar::new(self.progress / 100.0)
                .show_percentage()
                .animate(self.progress > 0.0 && self.progress < 100.0),
        );

        ui.add_space(5.0);

        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.progress >= 100.0 {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    /// Set progress and status
    pub fn set_progress(&mut self, progress: f32, status: &str) {
        self.progress = progress;
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    FilterChanged,
    ExportPng,
    ExportJson,
}

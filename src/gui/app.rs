//! Olympics Dashboard Main Application
//! Main window with control panel and chart viewer.

use crate::charts::StaticChartRenderer;
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use egui::SidePanel;
use olympics_dashboard::query::{AggregationEngine, QueryError, QueryFilter};
use olympics_dashboard::{CanonicalTable, DashboardConfig, DataLoader};
use std::sync::mpsc::{channel, Receiver};
use std::sync::Arc;
use std::thread;
use tracing::{error, info, warn};

/// Size of the PNG snapshot.
const EXPORT_SIZE: (u32, u32) = (1600, 2000);

/// Dataset loading result from background thread
enum LoadResult {
    Progress(String),
    Complete(Arc<CanonicalTable>),
    Error(String),
}

/// Main application window.
pub struct DashboardApp {
    config: DashboardConfig,
    table: Option<Arc<CanonicalTable>>,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,

    // Async dataset loading
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,
}

impl DashboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: DashboardConfig) -> Self {
        let mut app = Self {
            control_panel: ControlPanel::new(),
            chart_viewer: ChartViewer::new(),
            config,
            table: None,
            load_rx: None,
            is_loading: false,
        };
        app.start_loading();
        app
    }

    /// Load and clean the dataset once, off the UI thread.
    fn start_loading(&mut self) {
        let path = self.config.dataset_path.clone();
        let loader = DataLoader::new(self.config.null_values.clone());

        self.control_panel.dataset_path = Some(path.clone());
        self.control_panel.set_progress(0.0, "Loading dataset...");
        self.chart_viewer.clear();
        self.is_loading = true;

        let (tx, rx) = channel();
        self.load_rx = Some(rx);

        thread::spawn(move || {
            let _ = tx.send(LoadResult::Progress("Reading and cleaning CSV...".to_string()));

            match loader.load_and_clean(&path) {
                Ok(table) => {
                    let _ = tx.send(LoadResult::Complete(Arc::new(table)));
                }
                Err(e) => {
                    error!(error = %e, "Dataset load failed");
                    let _ = tx.send(LoadResult::Error(e.to_string()));
                }
            }
        });
    }

    /// Check for dataset loading results
    fn check_load_results(&mut self) {
        let rx = self.load_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            while let Ok(result) = rx.try_recv() {
                match result {
                    LoadResult::Progress(status) => {
                        self.control_panel.set_progress(10.0, &status);
                    }
                    LoadResult::Complete(table) => {
                        self.control_panel
                            .update_domains(table.years().to_vec(), table.sports().to_vec());
                        self.control_panel.export_enabled = true;
                        self.table = Some(table);
                        self.refresh();
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                    LoadResult::Error(error) => {
                        self.control_panel
                            .set_progress(0.0, &format!("Error: {}", error));
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                }
            }

            if should_keep_receiver {
                self.load_rx = Some(rx);
            }
        }
    }

    /// Recompute every projection for the current filter.
    ///
    /// An out-of-domain filter is reset to "All" and retried.
    fn refresh(&mut self) {
        let Some(table) = self.table.clone() else {
            return;
        };
        let filter = self.control_panel.filter.clone();

        let outcome = match AggregationEngine::aggregate(&table, &filter) {
            Err(err @ QueryError::InvalidFilter { .. }) => {
                warn!(%filter, error = %err, "Resetting filters to All");
                self.control_panel.filter = QueryFilter::all();
                AggregationEngine::aggregate(&table, &QueryFilter::all())
            }
            other => other,
        };

        match outcome {
            Ok(result) => {
                let status = format!(
                    "Complete! {} rows, {} columns",
                    table.height(),
                    table.width()
                );
                self.chart_viewer
                    .set_result(result, self.control_panel.filter.clone());
                self.control_panel.set_progress(100.0, &status);
            }
            Err(e) => {
                error!(error = %e, "Aggregation failed");
                self.chart_viewer.clear();
                self.control_panel
                    .set_progress(0.0, &format!("Error: {}", e));
            }
        }
    }

    /// Handle PNG export - render the current charts with plotters
    fn handle_export_png(&mut self) {
        let Some(result) = &self.chart_viewer.result else {
            self.control_panel.set_progress(0.0, "No charts to export");
            return;
        };

        let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG Image", &["png"])
            .set_file_name("olympics_dashboard.png")
            .save_file()
        else {
            return; // User cancelled
        };

        match StaticChartRenderer::render_dashboard(
            result,
            &self.chart_viewer.filter,
            &path,
            EXPORT_SIZE,
        ) {
            Ok(()) => {
                info!(path = %path.display(), "Exported PNG snapshot");
                self.control_panel
                    .set_progress(100.0, &format!("Exported {}", path.display()));
            }
            Err(e) => {
                error!(error = %e, "PNG export failed");
                self.control_panel
                    .set_progress(0.0, &format!("Error: {}", e));
            }
        }
    }

    /// Handle JSON export - write the filter and every projection
    fn handle_export_json(&mut self) {
        let Some(result) = &self.chart_viewer.result else {
            self.control_panel.set_progress(0.0, "Nothing to export");
            return;
        };

        let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .set_file_name("olympics_dashboard.json")
            .save_file()
        else {
            return;
        };

        let bundle = serde_json::json!({
            "filter": self.chart_viewer.filter,
            "result": result,
        });
        let written = serde_json::to_string_pretty(&bundle)
            .map_err(|e| e.to_string())
            .and_then(|content| std::fs::write(&path, content).map_err(|e| e.to_string()));

        match written {
            Ok(()) => {
                info!(path = %path.display(), "Exported aggregation JSON");
                self.control_panel
                    .set_progress(100.0, &format!("Exported {}", path.display()));
            }
            Err(e) => {
                error!(error = %e, "JSON export failed");
                self.control_panel
                    .set_progress(0.0, &format!("Error: {}", e));
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for background results
        self.check_load_results();

        // Request repaint while loading
        if self.is_loading {
            ctx.request_repaint();
        }

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(300.0)
            .max_width(350.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui);

                    match action {
                        ControlPanelAction::FilterChanged => self.refresh(),
                        ControlPanelAction::ExportPng => self.handle_export_png(),
                        ControlPanelAction::ExportJson => self.handle_export_json(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Chart Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui);
        });
    }
}

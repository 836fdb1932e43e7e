//! PoU Explorer Main Application
//! Main window with control panel and chart viewer.

use crate::config::DashboardConfig;
use crate::data::{DashboardView, DataLoader, DataProcessor, Dataset};
use crate::export::DashboardExporter;
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use egui::SidePanel;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};
use std::thread;
use tracing::{error, info, warn};

/// CSV loading result from background thread
enum LoadResult {
    Complete { dataset: Dataset, path: PathBuf },
    Error(String),
}

/// Main application window.
pub struct ExplorerApp {
    config: DashboardConfig,
    loader: DataLoader,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
    view: DashboardView,

    // Async CSV loading
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,
}

impl ExplorerApp {
    /// Create the app, optionally with a dataset already loaded at startup.
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        config: DashboardConfig,
        initial: Option<(Dataset, PathBuf)>,
    ) -> Self {
        Self::with_config(config, initial)
    }

    fn with_config(config: DashboardConfig, initial: Option<(Dataset, PathBuf)>) -> Self {
        let mut app = Self {
            config,
            loader: DataLoader::new(),
            control_panel: ControlPanel::new(),
            chart_viewer: ChartViewer::new(),
            view: DashboardView::default(),
            load_rx: None,
            is_loading: false,
        };
        if let Some((dataset, path)) = initial {
            app.install_dataset(dataset, path);
        }
        app
    }

    /// Handle CSV file selection; the read happens on a worker thread.
    fn handle_browse_csv(&mut self) {
        if self.is_loading {
            return;
        }

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        {
            self.chart_viewer.clear();
            self.control_panel.settings.csv_path = Some(path.clone());
            self.control_panel.set_status("Loading CSV file...");
            self.is_loading = true;

            let (tx, rx) = channel();
            self.load_rx = Some(rx);
            let regions = self.config.regions.clone();

            thread::spawn(move || {
                let result = match DataLoader::read_dataset(&path, &regions) {
                    Ok(dataset) => LoadResult::Complete { dataset, path },
                    Err(e) => LoadResult::Error(e.to_string()),
                };
                let _ = tx.send(result);
            });
        }
    }

    /// Check for CSV loading results
    fn check_load_results(&mut self) {
        let Some(rx) = self.load_rx.take() else {
            return;
        };

        match rx.try_recv() {
            Ok(LoadResult::Complete { dataset, path }) => {
                self.install_dataset(dataset, path);
                self.is_loading = false;
            }
            Ok(LoadResult::Error(message)) => {
                self.load_failed(&message);
            }
            Err(std::sync::mpsc::TryRecvError::Empty) => {
                self.load_rx = Some(rx);
            }
            Err(std::sync::mpsc::TryRecvError::Disconnected) => {
                self.load_failed("loader thread stopped unexpectedly");
            }
        }
    }

    /// A failed load keeps the previous dataset, so point the panel back at it.
    fn load_failed(&mut self, message: &str) {
        error!(%message, "csv load failed");
        self.control_panel.settings.csv_path = self.loader.get_file_path().cloned();
        if self.loader.get_dataset().is_some() {
            self.chart_viewer.set_view(&self.view);
        }
        self.control_panel.set_status(format!("Error: {}", message));
        self.is_loading = false;
    }

    fn install_dataset(&mut self, dataset: Dataset, path: PathBuf) {
        let summary = dataset.summary().clone();
        let missing = self
            .control_panel
            .update_countries(dataset.countries(), &self.config.default_countries);
        if !missing.is_empty() {
            warn!(countries = ?missing, "default countries not present in data");
        }

        self.control_panel.settings.csv_path = Some(path.clone());
        self.loader.set_dataset(dataset, path);
        self.control_panel.set_status(format!(
            "Loaded {} rows ({} malformed years, {} malformed values, {} bound values)",
            summary.rows, summary.malformed_years, summary.malformed_values, summary.qualified_values
        ));
        self.refresh_view();
    }

    /// Re-run selection and aggregation for the current picker state.
    fn refresh_view(&mut self) {
        let Some(dataset) = self.loader.get_dataset() else {
            return;
        };

        self.view = DataProcessor::build_view(
            dataset.records(),
            &self.control_panel.settings.selected_countries,
            &self.config.indicator,
        );
        self.chart_viewer.set_view(&self.view);
        self.control_panel.export_enabled = !self.view.is_empty();
    }

    fn handle_reset_selection(&mut self) {
        let countries = self.control_panel.countries.clone();
        self.control_panel
            .update_countries(countries, &self.config.default_countries);
        self.refresh_view();
    }

    /// Export both series and charts into a chosen folder
    fn handle_export(&mut self) {
        let Some(dir) = rfd::FileDialog::new().pick_folder() else {
            return; // User cancelled
        };

        match DashboardExporter::export(&self.view, &dir, true) {
            Ok(report) => {
                info!(dir = %dir.display(), files = report.files.len(), "exported from GUI");
                self.control_panel.set_status(format!(
                    "Exported {} files to {}",
                    report.files.len(),
                    dir.display()
                ));
                if self.control_panel.settings.open_after_export {
                    if let Err(e) = open::that(&dir) {
                        warn!(error = %e, "could not open export folder");
                    }
                }
            }
            Err(e) => {
                error!(error = %e, "export failed");
                self.control_panel.set_status(format!("Error: {}", e));
            }
        }
    }
}

impl eframe::App for ExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_load_results();

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
                        ControlPanelAction::BrowseCsv => self.handle_browse_csv(),
                        ControlPanelAction::SelectionChanged => self.refresh_view(),
                        ControlPanelAction::ResetSelection => self.handle_reset_selection(),
                        ControlPanelAction::Export => self.handle_export(),
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::RegionTable;
    use polars::prelude::*;

    fn egypt_dataset() -> Dataset {
        let df = df!(
            "Area" => ["Egypt", "Egypt"],
            "Item" => ["PoU", "PoU"],
            "Year" => ["2009-2011", "2010-2012"],
            "Value" => ["5", "7"],
        )
        .unwrap();
        Dataset::from_dataframe(&df, &RegionTable::builtin()).unwrap()
    }

    fn config() -> DashboardConfig {
        DashboardConfig {
            indicator: "PoU".into(),
            default_countries: vec!["Egypt".into()],
            ..DashboardConfig::default()
        }
    }

    #[test]
    fn failed_load_restores_previous_source() {
        let loaded = PathBuf::from("faostat.csv");
        let mut app = ExplorerApp::with_config(config(), Some((egypt_dataset(), loaded.clone())));
        assert!(app.control_panel.export_enabled);

        // State as left by Browse before the worker answers.
        app.chart_viewer.clear();
        app.control_panel.settings.csv_path = Some(PathBuf::from("broken.csv"));
        app.is_loading = true;
        let (tx, rx) = channel();
        app.load_rx = Some(rx);
        tx.send(LoadResult::Error("Data file not found: broken.csv".into()))
            .unwrap();

        app.check_load_results();

        assert!(!app.is_loading);
        assert_eq!(app.control_panel.settings.csv_path, Some(loaded));
        assert!(app.control_panel.status.starts_with("Error:"));
        assert_eq!(app.view.country_rows.len(), 2);
        assert!(app.chart_viewer.country_chart.is_some());
        assert!(app.control_panel.export_enabled);
    }

    #[test]
    fn failed_first_load_leaves_no_source() {
        let mut app = ExplorerApp::with_config(config(), None);
        app.control_panel.settings.csv_path = Some(PathBuf::from("broken.csv"));
        app.is_loading = true;
        let (tx, rx) = channel();
        app.load_rx = Some(rx);
        drop(tx);

        app.check_load_results();

        assert!(!app.is_loading);
        assert_eq!(app.control_panel.settings.csv_path, None);
        assert!(app.chart_viewer.country_chart.is_none());
        assert!(!app.control_panel.export_enabled);
    }
}

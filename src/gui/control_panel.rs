//! Control Panel Widget
//! Left side panel with data source, country selection and export controls.

use egui::{Color32, RichText, ScrollArea};
use std::collections::BTreeSet;
use std::path::PathBuf;

/// User settings for the current view
#[derive(Default, Clone)]
pub struct UserSettings {
    pub csv_path: Option<PathBuf>,
    pub selected_countries: BTreeSet<String>,
    pub open_after_export: bool,
}

/// Left side control panel with file selection and country picker.
pub struct ControlPanel {
    pub settings: UserSettings,
    pub countries: Vec<String>,
    pub search: String,
    pub status: String,
    pub export_enabled: bool,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            settings: UserSettings {
                open_after_export: true,
                ..UserSettings::default()
            },
            countries: Vec::new(),
            search: String::new(),
            status: "Ready".to_string(),
            export_enabled: false,
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update available countries after a load and keep only the defaults
    /// that actually occur in the data.
    pub fn update_countries(&mut self, countries: Vec<String>, defaults: &[String]) -> Vec<String> {
        let available: BTreeSet<&str> = countries.iter().map(String::as_str).collect();
        let (present, missing): (Vec<&String>, Vec<&String>) = defaults
            .iter()
            .partition(|c| available.contains(c.as_str()));

        self.settings.selected_countries = present.into_iter().cloned().collect();
        self.countries = countries;
        missing.into_iter().cloned().collect()
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🌾 PoU Explorer")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("Prevalence of Undernourishment")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== CSV File Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let path_text = self
                        .settings
                        .csv_path
                        .as_ref()
                        .and_then(|p| p.file_name())
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| "No file selected".to_string());

                    ui.label(RichText::new(&path_text).size(12.0).color(
                        if self.settings.csv_path.is_some() {
                            Color32::WHITE
                        } else {
                            Color32::GRAY
                        },
                    ));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("📂 Browse").clicked() {
                            action = ControlPanelAction::BrowseCsv;
                        }
                    });
                });
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Country Selection Section =====
        ui.label(
            RichText::new(format!(
                "🌍 Countries ({} selected)",
                self.settings.selected_countries.len()
            ))
            .size(14.0)
            .strong(),
        );
        ui.add_space(5.0);

        ui.horizontal(|ui| {
            ui.label("Search:");
            ui.text_edit_singleline(&mut self.search);
        });
        ui.add_space(5.0);

        let needle = self.search.to_lowercase();
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(5.0)
            .show(ui, |ui| {
                ScrollArea::vertical().max_height(260.0).show(ui, |ui| {
                    for country in &self.countries {
                        if !needle.is_empty() && !country.to_lowercase().contains(&needle) {
                            continue;
                        }
                        let mut checked = self.settings.selected_countries.contains(country);
                        if ui.checkbox(&mut checked, country).changed() {
                            if checked {
                                self.settings.selected_countries.insert(country.clone());
                            } else {
                                self.settings.selected_countries.remove(country);
                            }
                            action = ControlPanelAction::SelectionChanged;
                        }
                    }
                });
            });

        ui.add_space(5.0);
        ui.horizontal(|ui| {
            if ui.small_button("Select All").clicked() {
                self.settings.selected_countries = self.countries.iter().cloned().collect();
                action = ControlPanelAction::SelectionChanged;
            }
            if ui.small_button("Clear All").clicked() {
                self.settings.selected_countries.clear();
                action = ControlPanelAction::SelectionChanged;
            }
            if ui.small_button("Defaults").clicked() {
                action = ControlPanelAction::ResetSelection;
            }
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Export =====
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(self.export_enabled, |ui| {
                let button = egui::Button::new(RichText::new("💾 Export Charts").size(15.0))
                    .min_size(egui::vec2(200.0, 32.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::Export;
                }
            });
            ui.checkbox(&mut self.settings.open_after_export, "Open folder after export");
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Status =====
        ui.label(RichText::new("📊 Status").size(14.0).strong());
        ui.add_space(5.0);

        let status_color = if self.status.starts_with("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.starts_with("Loaded") || self.status.starts_with("Exported") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    BrowseCsv,
    SelectionChanged,
    ResetSelection,
    Export,
}

//! Chart Viewer Widget
//! Central scrollable panel with both trend charts and the narrative notes.

use crate::charts::{ChartData, ChartPlotter};
use crate::data::DashboardView;
use egui::{Color32, RichText, ScrollArea};

const CHART_HEIGHT: f32 = 420.0;
const CHART_SPACING: f32 = 15.0;

const NARRATIVE: [(&str, &str); 4] = [
    (
        "Indonesia",
        "shows steady improvement as social protection and food policy expanded.",
    ),
    (
        "Brazil and Egypt",
        "lost ground after 2015, in step with policy rollbacks and macroeconomic shocks.",
    ),
    (
        "China, Japan and Korea",
        "stay at very low prevalence, backed by strong institutions and past agrarian reform.",
    ),
    (
        "Nigeria and India",
        "are volatile, pointing to gaps in governance and food system resilience.",
    ),
];

/// Holds the charts built from the latest selection.
#[derive(Default)]
pub struct ChartViewer {
    pub country_chart: Option<ChartData>,
    pub region_chart: Option<ChartData>,
    /// (bound contributions, total contributions) in the regional means.
    pub qualified: (usize, usize),
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn set_view(&mut self, view: &DashboardView) {
        self.country_chart = Some(view.country_chart());
        self.region_chart = Some(view.region_chart());
        self.qualified = view.qualified_contributions();
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading(RichText::new("Global Undernourishment Explorer").size(26.0));
                ui.add_space(4.0);
                ui.label(
                    "A comparative look at the Prevalence of Undernourishment (PoU) across \
                     selected countries, with attention to institutional, economic and \
                     political dynamics.",
                );
                ui.add_space(CHART_SPACING);

                let Some(country_chart) = &self.country_chart else {
                    ui.centered_and_justified(|ui| {
                        ui.label(RichText::new("No Data").size(20.0));
                    });
                    return;
                };

                Self::draw_chart_card(ui, country_chart, None);
                ui.add_space(CHART_SPACING);

                ui.label(RichText::new("Regional Trends").size(18.0).strong());
                ui.add_space(6.0);
                if let Some(region_chart) = &self.region_chart {
                    let (bounds, total) = self.qualified;
                    let note = (bounds > 0).then(|| {
                        format!(
                            "{bounds} of {total} contributions were reported as bounds (<x or >x) \
                             and are averaged as if exact."
                        )
                    });
                    Self::draw_chart_card(ui, region_chart, note.as_deref());
                }
                ui.add_space(CHART_SPACING);

                egui::CollapsingHeader::new(RichText::new("Narrative Analysis").strong())
                    .default_open(false)
                    .show(ui, |ui| {
                        for (subject, text) in NARRATIVE {
                            ui.horizontal_wrapped(|ui| {
                                ui.label("•");
                                ui.label(RichText::new(subject).strong());
                                ui.label(text);
                            });
                        }
                        ui.add_space(6.0);
                        ui.label(
                            "Institutional quality and policy consistency track hunger \
                             reduction more closely than GDP growth alone.",
                        );
                    });
            });
    }

    fn draw_chart_card(ui: &mut egui::Ui, chart: &ChartData, note: Option<&str>) {
        egui::Frame::none()
            .rounding(8.0)
            .stroke(egui::Stroke::new(1.0, Color32::from_gray(90)))
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.label(RichText::new(&chart.title).size(16.0).strong());
                ui.add_space(8.0);

                if chart.is_empty() {
                    ui.label(RichText::new("No points for this selection").color(Color32::GRAY));
                } else {
                    ChartPlotter::draw_trend_chart(ui, chart, CHART_HEIGHT);
                }

                if let Some(note) = note {
                    ui.add_space(6.0);
                    ui.label(
                        RichText::new(note)
                            .size(11.0)
                            .color(Color32::from_rgb(243, 156, 18)),
                    );
                }
            });
    }
}

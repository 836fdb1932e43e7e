//! Chart Plotter Module
//! Creates interactive trend charts using egui_plot.

use crate::data::NormalizedRecord;
use crate::stats::RegionalMean;
use egui::Color32;
use egui_plot::{Legend, Line, Plot, PlotPoints, Points};
use std::collections::BTreeMap;

/// Series colors, shared with the static renderer.
pub const PALETTE_RGB: [(u8, u8, u8); 10] = [
    (52, 152, 219),  // Blue
    (231, 76, 60),   // Red
    (46, 204, 113),  // Green
    (155, 89, 182),  // Purple
    (243, 156, 18),  // Orange
    (26, 188, 156),  // Teal
    (233, 30, 99),   // Pink
    (0, 188, 212),   // Cyan
    (121, 85, 72),   // Brown
    (96, 125, 139),  // Blue Grey
];

pub const COUNTRY_CHART_TITLE: &str = "Trends in Undernourishment Across Selected Countries";
pub const REGION_CHART_TITLE: &str = "Regional Average of Undernourishment";
pub const POU_AXIS_LABEL: &str = "Prevalence of Undernourishment (%)";

/// One line on a trend chart. Points are `[year, value]`, sorted by year.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrendSeries {
    pub name: String,
    pub points: Vec<[f64; 2]>,
}

/// Data for one trend chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub id: String,
    pub title: String,
    pub y_label: String,
    pub markers: bool,
    pub series: Vec<TrendSeries>,
}

impl ChartData {
    /// One series per area. Rows missing a year or value are gaps and get
    /// no point.
    pub fn country_trends(records: &[NormalizedRecord]) -> Self {
        let mut by_area: BTreeMap<&str, Vec<[f64; 2]>> = BTreeMap::new();
        for record in records {
            let points = by_area.entry(record.area.as_str()).or_default();
            if let (Some(year), Some(value)) = (record.year, record.value) {
                points.push([year as f64, value]);
            }
        }

        Self {
            id: "country_trends".to_string(),
            title: COUNTRY_CHART_TITLE.to_string(),
            y_label: POU_AXIS_LABEL.to_string(),
            markers: true,
            series: Self::into_series(by_area),
        }
    }

    /// One series per region from the aggregated means.
    pub fn regional_trends(means: &[RegionalMean]) -> Self {
        let mut by_region: BTreeMap<&str, Vec<[f64; 2]>> = BTreeMap::new();
        for mean in means {
            by_region
                .entry(mean.region.as_str())
                .or_default()
                .push([mean.year as f64, mean.mean]);
        }

        Self {
            id: "regional_trends".to_string(),
            title: REGION_CHART_TITLE.to_string(),
            y_label: POU_AXIS_LABEL.to_string(),
            markers: false,
            series: Self::into_series(by_region),
        }
    }

    fn into_series(groups: BTreeMap<&str, Vec<[f64; 2]>>) -> Vec<TrendSeries> {
        groups
            .into_iter()
            .map(|(name, mut points)| {
                points.sort_by(|a, b| a[0].total_cmp(&b[0]));
                TrendSeries {
                    name: name.to_string(),
                    points,
                }
            })
            .collect()
    }

    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.point_count() == 0
    }

    /// `((x_min, x_max), (y_min, y_max))` with a little padding so single
    /// points and flat lines still get a usable axis.
    pub fn bounds(&self) -> Option<((f64, f64), (f64, f64))> {
        let mut points = self.series.iter().flat_map(|s| s.points.iter());
        let first = points.next()?;
        let (mut x_min, mut x_max, mut y_min, mut y_max) = (first[0], first[0], first[1], first[1]);
        for p in points {
            x_min = x_min.min(p[0]);
            x_max = x_max.max(p[0]);
            y_min = y_min.min(p[1]);
            y_max = y_max.max(p[1]);
        }

        let x_pad = if x_max > x_min { 0.5 } else { 1.0 };
        let y_pad = if y_max > y_min {
            (y_max - y_min) * 0.1
        } else {
            1.0
        };
        Some((
            (x_min - x_pad, x_max + x_pad),
            ((y_min - y_pad).max(0.0), y_max + y_pad),
        ))
    }
}

/// Draws trend charts inside egui panels.
pub struct ChartPlotter;

impl ChartPlotter {
    pub fn series_color(index: usize) -> Color32 {
        let (r, g, b) = PALETTE_RGB[index % PALETTE_RGB.len()];
        Color32::from_rgb(r, g, b)
    }

    /// Draw a year/value line chart with one line per series.
    pub fn draw_trend_chart(ui: &mut egui::Ui, chart: &ChartData, height: f32) {
        Plot::new(&chart.id)
            .height(height)
            .legend(Legend::default())
            .allow_scroll(false)
            .x_axis_label("Year")
            .y_axis_label(chart.y_label.clone())
            .x_axis_formatter(|mark, _range| format!("{:.0}", mark.value))
            .show(ui, |plot_ui| {
                for (idx, series) in chart.series.iter().enumerate() {
                    if series.points.is_empty() {
                        continue;
                    }
                    let color = Self::series_color(idx);

                    plot_ui.line(
                        Line::new(PlotPoints::from(series.points.clone()))
                            .color(color)
                            .width(2.0)
                            .name(&series.name),
                    );

                    if chart.markers {
                        plot_ui.points(
                            Points::new(PlotPoints::from(series.points.clone()))
                                .radius(3.5)
                                .color(color)
                                .name(&series.name),
                        );
                    }
                }
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ValueQualifier;

    fn rec(area: &str, year: Option<i64>, value: Option<f64>) -> NormalizedRecord {
        NormalizedRecord {
            area: area.to_string(),
            item: "PoU".to_string(),
            year,
            value,
            qualifier: ValueQualifier::Exact,
            region: None,
        }
    }

    #[test]
    fn country_points_are_grouped_and_sorted() {
        let records = vec![
            rec("India", Some(2012), Some(15.0)),
            rec("Brazil", Some(2011), Some(3.0)),
            rec("India", Some(2010), Some(17.0)),
        ];

        let chart = ChartData::country_trends(&records);

        assert_eq!(chart.series.len(), 2);
        assert_eq!(chart.series[0].name, "Brazil");
        assert_eq!(
            chart.series[1].points,
            vec![[2010.0, 17.0], [2012.0, 15.0]]
        );
        assert!(chart.markers);
    }

    #[test]
    fn gaps_keep_their_series_but_add_no_point() {
        let records = vec![rec("Nigeria", None, Some(9.0)), rec("Nigeria", Some(2015), None)];

        let chart = ChartData::country_trends(&records);

        assert_eq!(chart.series.len(), 1);
        assert!(chart.series[0].points.is_empty());
        assert!(chart.is_empty());
        assert_eq!(chart.bounds(), None);
    }

    #[test]
    fn regional_chart_uses_means() {
        let means = vec![
            RegionalMean {
                region: "MENA".into(),
                year: 2011,
                mean: 7.0,
                count: 1,
                qualified: 0,
            },
            RegionalMean {
                region: "MENA".into(),
                year: 2010,
                mean: 5.0,
                count: 1,
                qualified: 0,
            },
        ];

        let chart = ChartData::regional_trends(&means);

        assert_eq!(chart.title, REGION_CHART_TITLE);
        assert_eq!(chart.series[0].points, vec![[2010.0, 5.0], [2011.0, 7.0]]);
        assert!(!chart.markers);
    }

    #[test]
    fn bounds_are_padded() {
        let chart = ChartData::country_trends(&[rec("Kenya", Some(2015), Some(20.0))]);
        let ((x_min, x_max), (y_min, y_max)) = chart.bounds().unwrap();

        assert!(x_min < 2015.0 && x_max > 2015.0);
        assert!(y_min < 20.0 && y_max > 20.0);
    }
}

//! Dashboard Export Module
//! Writes both series as JSON and, optionally, both charts as PNG images.

use crate::charts::{RenderError, StaticChartRenderer};
use crate::data::DashboardView;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

pub const COUNTRY_SERIES_FILE: &str = "country_series.json";
pub const REGION_SERIES_FILE: &str = "region_series.json";
pub const COUNTRY_CHART_FILE: &str = "country_trends.png";
pub const REGION_CHART_FILE: &str = "regional_trends.png";

const CHART_WIDTH: u32 = 1400;
const CHART_HEIGHT: u32 = 800;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to serialize {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// What an export produced.
#[derive(Debug, Clone, Default)]
pub struct ExportReport {
    pub files: Vec<PathBuf>,
    pub country_rows: usize,
    pub regional_rows: usize,
}

/// Writes the current view to an output directory.
pub struct DashboardExporter;

impl DashboardExporter {
    /// Export the view into `out_dir`, creating it if needed.
    ///
    /// Empty charts are skipped rather than treated as errors.
    pub fn export(
        view: &DashboardView,
        out_dir: &Path,
        with_charts: bool,
    ) -> Result<ExportReport, ExportError> {
        fs::create_dir_all(out_dir).map_err(|source| ExportError::Io {
            path: out_dir.to_path_buf(),
            source,
        })?;

        let mut report = ExportReport {
            country_rows: view.country_rows.len(),
            regional_rows: view.regional_means.len(),
            ..ExportReport::default()
        };

        let country_json = out_dir.join(COUNTRY_SERIES_FILE);
        Self::write_json(&country_json, &view.country_rows)?;
        report.files.push(country_json);

        let region_json = out_dir.join(REGION_SERIES_FILE);
        Self::write_json(&region_json, &view.regional_means)?;
        report.files.push(region_json);

        if with_charts {
            for (chart, file_name) in [
                (view.country_chart(), COUNTRY_CHART_FILE),
                (view.region_chart(), REGION_CHART_FILE),
            ] {
                if chart.is_empty() {
                    continue;
                }
                let path = out_dir.join(file_name);
                StaticChartRenderer::save_png(&chart, &path, CHART_WIDTH, CHART_HEIGHT)?;
                report.files.push(path);
            }
        }

        info!(
            dir = %out_dir.display(),
            files = report.files.len(),
            country_rows = report.country_rows,
            regional_rows = report.regional_rows,
            "export written"
        );
        Ok(report)
    }

    fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), ExportError> {
        let file = File::create(path).map_err(|source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, value).map_err(|source| ExportError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        writer.flush().map_err(|source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{NormalizedRecord, ValueQualifier};
    use crate::stats::RegionalMean;

    fn view() -> DashboardView {
        DashboardView {
            country_rows: vec![NormalizedRecord {
                area: "Egypt".into(),
                item: "PoU".into(),
                year: Some(2010),
                value: Some(5.0),
                qualifier: ValueQualifier::LessThan,
                region: Some("MENA".into()),
            }],
            regional_means: vec![RegionalMean {
                region: "MENA".into(),
                year: 2010,
                mean: 5.0,
                count: 1,
                qualified: 1,
            }],
        }
    }

    #[test]
    fn writes_both_series() {
        let dir = tempfile::tempdir().unwrap();
        let report = DashboardExporter::export(&view(), dir.path(), false).unwrap();

        assert_eq!(report.files.len(), 2);
        assert_eq!(report.country_rows, 1);

        let countries: serde_json::Value = serde_json::from_str(
            &fs::read_to_string(dir.path().join(COUNTRY_SERIES_FILE)).unwrap(),
        )
        .unwrap();
        assert_eq!(countries[0]["area"], "Egypt");
        assert_eq!(countries[0]["qualifier"], "less_than");

        let regions: serde_json::Value = serde_json::from_str(
            &fs::read_to_string(dir.path().join(REGION_SERIES_FILE)).unwrap(),
        )
        .unwrap();
        assert_eq!(regions[0]["mean"], 5.0);
        assert_eq!(regions[0]["qualified"], 1);
    }

    #[test]
    fn creates_missing_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        DashboardExporter::export(&DashboardView::default(), &nested, true).unwrap();

        assert!(nested.join(COUNTRY_SERIES_FILE).is_file());
        assert!(!nested.join(COUNTRY_CHART_FILE).exists());
    }
}

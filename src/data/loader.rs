//! CSV Data Loader Module
//! Reads a FAOSTAT export with Polars and normalizes every row.

use super::model::{NormalizedRecord, Record};
use super::normalize::RawField;
use super::region::RegionTable;
use polars::prelude::*;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

pub const AREA_COLUMN: &str = "Area";
pub const ITEM_COLUMN: &str = "Item";
pub const YEAR_COLUMN: &str = "Year";
pub const VALUE_COLUMN: &str = "Value";

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Data file not found: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Missing required column '{0}'")]
    MissingColumn(&'static str),
}

/// Counts collected while normalizing a file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub rows: usize,
    /// Rows without an `Area` cell; these are dropped.
    pub skipped: usize,
    pub malformed_years: usize,
    pub malformed_values: usize,
    pub qualified_values: usize,
    /// Distinct areas with no region entry.
    pub unmapped_areas: usize,
}

/// All normalized rows of one input file.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<NormalizedRecord>,
    summary: LoadSummary,
}

impl Dataset {
    /// Normalize a DataFrame holding at least `Area`, `Item`, `Year`, `Value`.
    pub fn from_dataframe(df: &DataFrame, regions: &RegionTable) -> Result<Self, LoaderError> {
        let area_col = required_column(df, AREA_COLUMN)?;
        let item_col = required_column(df, ITEM_COLUMN)?;
        let year_col = required_column(df, YEAR_COLUMN)?;
        let value_col = required_column(df, VALUE_COLUMN)?;

        let mut records = Vec::with_capacity(df.height());
        let mut summary = LoadSummary::default();

        for i in 0..df.height() {
            let Some(area) = text_cell(area_col.get(i)?) else {
                summary.skipped += 1;
                continue;
            };
            let record = Record {
                area,
                item: text_cell(item_col.get(i)?).unwrap_or_default(),
                year_raw: raw_field(year_col.get(i)?),
                value_raw: raw_field(value_col.get(i)?),
            };
            records.push(NormalizedRecord::from_record(record, regions));
        }

        let mut unmapped = BTreeSet::new();
        for record in &records {
            summary.malformed_years += usize::from(record.year.is_none());
            summary.malformed_values += usize::from(record.value.is_none());
            summary.qualified_values += usize::from(record.qualifier.is_bound());
            if record.region.is_none() {
                unmapped.insert(record.area.as_str());
            }
        }
        summary.rows = records.len();
        summary.unmapped_areas = unmapped.len();

        Ok(Self { records, summary })
    }

    pub fn records(&self) -> &[NormalizedRecord] {
        &self.records
    }

    pub fn summary(&self) -> &LoadSummary {
        &self.summary
    }

    /// Sorted distinct area names.
    pub fn countries(&self) -> Vec<String> {
        self.records
            .iter()
            .map(|r| r.area.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_owned)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Names from `wanted` that never occur as an area, in input order.
    pub fn missing_countries(&self, wanted: &[String]) -> Vec<String> {
        let present: BTreeSet<&str> = self.records.iter().map(|r| r.area.as_str()).collect();
        wanted
            .iter()
            .filter(|name| !present.contains(name.as_str()))
            .cloned()
            .collect()
    }
}

/// Handles CSV file loading with Polars and keeps the normalized result.
pub struct DataLoader {
    dataset: Option<Dataset>,
    file_path: Option<PathBuf>,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLoader {
    pub fn new() -> Self {
        Self {
            dataset: None,
            file_path: None,
        }
    }

    /// Read a file without touching loader state (used by background loads).
    ///
    /// Every column is read as text; `Year` and `Value` mix ranges and `<x`
    /// bounds with plain numbers anywhere in the file, so typing is left to
    /// the normalizers.
    pub fn read_dataset(file_path: &Path, regions: &RegionTable) -> Result<Dataset, LoaderError> {
        if !file_path.is_file() {
            return Err(LoaderError::FileNotFound(file_path.to_path_buf()));
        }

        let df = LazyCsvReader::new(file_path)
            .with_infer_schema_length(Some(0))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;
        debug!(rows = df.height(), columns = df.width(), "csv read");

        let dataset = Dataset::from_dataframe(&df, regions)?;
        let summary = dataset.summary();
        info!(
            path = %file_path.display(),
            rows = summary.rows,
            skipped = summary.skipped,
            malformed_years = summary.malformed_years,
            malformed_values = summary.malformed_values,
            qualified_values = summary.qualified_values,
            unmapped_areas = summary.unmapped_areas,
            "dataset loaded"
        );
        Ok(dataset)
    }

    pub fn get_dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    pub fn get_file_path(&self) -> Option<&PathBuf> {
        self.file_path.as_ref()
    }

    /// Set dataset directly (used for async loading)
    pub fn set_dataset(&mut self, dataset: Dataset, file_path: PathBuf) {
        self.dataset = Some(dataset);
        self.file_path = Some(file_path);
    }
}

fn required_column<'a>(df: &'a DataFrame, name: &'static str) -> Result<&'a Column, LoaderError> {
    df.column(name).map_err(|_| LoaderError::MissingColumn(name))
}

fn text_cell(value: AnyValue<'_>) -> Option<String> {
    match value {
        AnyValue::Null => None,
        AnyValue::String(s) => Some(s.to_string()),
        AnyValue::StringOwned(s) => Some(s.to_string()),
        other => Some(other.to_string()),
    }
}

fn raw_field(value: AnyValue<'_>) -> RawField {
    match value {
        AnyValue::Null => RawField::Missing,
        AnyValue::String(s) => RawField::Text(s.to_string()),
        AnyValue::StringOwned(s) => RawField::Text(s.to_string()),
        AnyValue::Int8(v) => RawField::Int(i64::from(v)),
        AnyValue::Int16(v) => RawField::Int(i64::from(v)),
        AnyValue::Int32(v) => RawField::Int(i64::from(v)),
        AnyValue::Int64(v) => RawField::Int(v),
        AnyValue::UInt8(v) => RawField::Int(i64::from(v)),
        AnyValue::UInt16(v) => RawField::Int(i64::from(v)),
        AnyValue::UInt32(v) => RawField::Int(i64::from(v)),
        AnyValue::UInt64(v) => i64::try_from(v)
            .map(RawField::Int)
            .unwrap_or(RawField::Float(v as f64)),
        AnyValue::Float32(v) => RawField::Float(f64::from(v)),
        AnyValue::Float64(v) => RawField::Float(v),
        other => RawField::Text(other.to_string()),
    }
}

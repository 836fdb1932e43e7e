//! Dashboard configuration: indicator, default selection and region table.

use crate::data::RegionTable;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_INDICATOR: &str = "Prevalence of undernourishment (percent) (3-year average)";

pub const DEFAULT_COUNTRIES: [&str; 10] = [
    "Indonesia",
    "Viet Nam",
    "Philippines",
    "India",
    "Egypt",
    "Brazil",
    "Nigeria",
    "Japan",
    "Republic of Korea",
    "China",
];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// On-disk shape; every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    indicator: Option<String>,
    default_countries: Option<Vec<String>>,
    regions: BTreeMap<String, String>,
    replace_regions: bool,
}

/// Inputs that drive the pipeline, passed in explicitly.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub indicator: String,
    pub default_countries: Vec<String>,
    pub regions: RegionTable,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            indicator: DEFAULT_INDICATOR.to_string(),
            default_countries: DEFAULT_COUNTRIES.iter().map(|c| c.to_string()).collect(),
            regions: RegionTable::builtin(),
        }
    }
}

impl DashboardConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        let file: ConfigFile = serde_json::from_str(text)?;
        Ok(Self::from_parsed(file))
    }

    fn from_parsed(file: ConfigFile) -> Self {
        let defaults = Self::default();
        let regions = if file.replace_regions {
            RegionTable::from_entries(file.regions)
        } else {
            defaults.regions.with_entries(file.regions)
        };

        Self {
            indicator: file.indicator.unwrap_or(defaults.indicator),
            default_countries: file.default_countries.unwrap_or(defaults.default_countries),
            regions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let config = DashboardConfig::from_json_str("{}").unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.default_countries.len(), 10);
        assert_eq!(config.indicator, DEFAULT_INDICATOR);
    }

    #[test]
    fn regions_extend_builtin_table() {
        let config = DashboardConfig::from_json_str(
            r#"{ "regions": { "France": "Western Europe" }, "default_countries": ["France"] }"#,
        )
        .unwrap();

        assert_eq!(config.regions.classify("France"), Some("Western Europe"));
        assert_eq!(config.regions.classify("Viet Nam"), Some("Southeast Asia"));
        assert_eq!(config.default_countries, vec!["France"]);
    }

    #[test]
    fn replace_regions_drops_builtin_entries() {
        let config = DashboardConfig::from_json_str(
            r#"{ "regions": { "Chad": "Sahel" }, "replace_regions": true }"#,
        )
        .unwrap();

        assert_eq!(config.regions.len(), 1);
        assert_eq!(config.regions.classify("Egypt"), None);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(DashboardConfig::from_json_str(r#"{ "indicatr": "x" }"#).is_err());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = DashboardConfig::from_file(Path::new("no/such/config.json")).unwrap_err();
        assert!(err.to_string().contains("no/such/config.json"));
    }
}

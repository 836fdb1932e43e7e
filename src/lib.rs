//! PoU Explorer - Prevalence of Undernourishment dashboard
//!
//! Loads a FAOSTAT food-security export, cleans the `Year` and `Value`
//! fields, assigns countries to regions and produces two trend series: one
//! line per selected country and one regional mean line per region.
//!
//! The pipeline stages are plain functions over immutable records:
//!
//! ```no_run
//! use std::collections::BTreeSet;
//! use std::path::Path;
//! use pou_explorer::config::DashboardConfig;
//! use pou_explorer::data::{DataLoader, DataProcessor};
//!
//! let config = DashboardConfig::default();
//! let dataset = DataLoader::read_dataset(Path::new("faostat.csv"), &config.regions)?;
//! let selection: BTreeSet<String> = config.default_countries.iter().cloned().collect();
//! let view = DataProcessor::build_view(dataset.records(), &selection, &config.indicator);
//! println!("{} regional means", view.regional_means.len());
//! # Ok::<(), pou_explorer::data::LoaderError>(())
//! ```

pub mod charts;
pub mod config;
pub mod data;
pub mod export;
pub mod gui;
pub mod stats;

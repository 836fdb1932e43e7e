//! Data module - CSV loading, field cleaning and selection

mod loader;
mod model;
mod normalize;
mod processor;
mod region;

pub use loader::{DataLoader, Dataset, LoadSummary, LoaderError};
pub use model::{NormalizedRecord, Record};
pub use normalize::{
    parse_qualified_value, parse_value, parse_year, QualifiedValue, RawField, ValueQualifier,
};
pub use processor::{DashboardView, DataProcessor};
pub use region::RegionTable;

//! Data Processor Module
//! Selection filtering and assembly of the two dashboard series.

use super::model::NormalizedRecord;
use crate::charts::ChartData;
use crate::stats::{RegionalMean, StatsCalculator};
use std::collections::{BTreeSet, HashSet};
use tracing::{debug, warn};

/// Everything the charts need for one selection.
#[derive(Debug, Clone, Default)]
pub struct DashboardView {
    /// Selected rows in input order, gaps included.
    pub country_rows: Vec<NormalizedRecord>,
    /// One mean per (region, year).
    pub regional_means: Vec<RegionalMean>,
}

impl DashboardView {
    pub fn country_chart(&self) -> ChartData {
        ChartData::country_trends(&self.country_rows)
    }

    pub fn region_chart(&self) -> ChartData {
        ChartData::regional_trends(&self.regional_means)
    }

    /// (bound contributions, total contributions) across all regional means.
    pub fn qualified_contributions(&self) -> (usize, usize) {
        self.regional_means
            .iter()
            .fold((0, 0), |(q, n), m| (q + m.qualified, n + m.count))
    }

    pub fn is_empty(&self) -> bool {
        self.country_rows.is_empty()
    }
}

/// Handles selection and series preparation.
pub struct DataProcessor;

impl DataProcessor {
    /// Rows whose area is selected and whose item matches `indicator` exactly.
    ///
    /// Input order is preserved. An empty selection yields nothing.
    pub fn select_records<'a>(
        records: &'a [NormalizedRecord],
        countries: &BTreeSet<String>,
        indicator: &str,
    ) -> Vec<&'a NormalizedRecord> {
        if countries.is_empty() {
            return Vec::new();
        }

        records
            .iter()
            .filter(|r| r.item == indicator && countries.contains(&r.area))
            .collect()
    }

    /// Run filter and aggregation for one selection.
    pub fn build_view(
        records: &[NormalizedRecord],
        countries: &BTreeSet<String>,
        indicator: &str,
    ) -> DashboardView {
        let selected = Self::select_records(records, countries, indicator);
        let regional_means = StatsCalculator::regional_means(selected.iter().copied());

        let unmapped: HashSet<&str> = selected
            .iter()
            .filter(|r| r.region.is_none())
            .map(|r| r.area.as_str())
            .collect();
        if !unmapped.is_empty() {
            let mut names: Vec<_> = unmapped.into_iter().collect();
            names.sort_unstable();
            warn!(countries = ?names, "selected countries have no region; left out of regional means");
        }

        debug!(
            selected_countries = countries.len(),
            rows = selected.len(),
            regional_means = regional_means.len(),
            "view built"
        );

        DashboardView {
            country_rows: selected.into_iter().cloned().collect(),
            regional_means,
        }
    }
}

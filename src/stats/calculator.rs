//! Statistics Calculator Module
//! Regional mean aggregation over a filtered record set.

use crate::data::NormalizedRecord;
use serde::Serialize;
use std::collections::BTreeMap;

/// Mean value for one (region, year) group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionalMean {
    pub region: String,
    pub year: i64,
    pub mean: f64,
    /// Records that contributed to the mean.
    pub count: usize,
    /// Contributions that were reported as `<x` / `>x` bounds.
    pub qualified: usize,
}

#[derive(Default)]
struct GroupAccumulator {
    sum: f64,
    count: usize,
    qualified: usize,
}

/// Handles aggregate calculations for the regional chart.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Group by (region, year) and average `value`.
    ///
    /// Records missing a region, year or value are skipped, so a group that
    /// would only contain such records does not appear. Output is sorted by
    /// region, then year.
    pub fn regional_means<'a, I>(records: I) -> Vec<RegionalMean>
    where
        I: IntoIterator<Item = &'a NormalizedRecord>,
    {
        let mut groups: BTreeMap<(&'a str, i64), GroupAccumulator> = BTreeMap::new();

        for record in records {
            let (Some(region), Some(year), Some(value)) =
                (record.region.as_deref(), record.year, record.value)
            else {
                continue;
            };

            let group = groups.entry((region, year)).or_default();
            group.sum += value;
            group.count += 1;
            if record.qualifier.is_bound() {
                group.qualified += 1;
            }
        }

        groups
            .into_iter()
            .map(|((region, year), group)| RegionalMean {
                region: region.to_string(),
                year,
                mean: group.sum / group.count as f64,
                count: group.count,
                qualified: group.qualified,
            })
            .collect()
    }
}

//! Record types for the FAOSTAT table.

use super::normalize::{parse_qualified_value, parse_year, RawField, ValueQualifier};
use super::region::RegionTable;
use serde::Serialize;

/// One row as read from the CSV.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub area: String,
    pub item: String,
    pub year_raw: RawField,
    pub value_raw: RawField,
}

/// A cleaned row. Built once at load time and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedRecord {
    pub area: String,
    pub item: String,
    pub year: Option<i64>,
    pub value: Option<f64>,
    pub qualifier: ValueQualifier,
    pub region: Option<String>,
}

impl NormalizedRecord {
    /// Normalize year and value, then classify the area.
    pub fn from_record(record: Record, regions: &RegionTable) -> Self {
        let year = parse_year(&record.year_raw);
        let (value, qualifier) = match parse_qualified_value(&record.value_raw) {
            Some(parsed) => (Some(parsed.value), parsed.qualifier),
            None => (None, ValueQualifier::Exact),
        };
        let region = regions.classify(&record.area).map(str::to_owned);

        Self {
            area: record.area,
            item: record.item,
            year,
            value,
            qualifier,
            region,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(area: &str, year: RawField, value: RawField) -> Record {
        Record {
            area: area.to_string(),
            item: "PoU".to_string(),
            year_raw: year,
            value_raw: value,
        }
    }

    #[test]
    fn normalizes_all_fields() {
        let regions = RegionTable::builtin();
        let normalized =
            NormalizedRecord::from_record(record("Viet Nam", "2015-2017".into(), "<2.5".into()), &regions);

        assert_eq!(normalized.area, "Viet Nam");
        assert_eq!(normalized.item, "PoU");
        assert_eq!(normalized.year, Some(2016));
        assert_eq!(normalized.value, Some(2.5));
        assert_eq!(normalized.qualifier, ValueQualifier::LessThan);
        assert_eq!(normalized.region.as_deref(), Some("Southeast Asia"));
    }

    #[test]
    fn partial_data_survives() {
        let regions = RegionTable::builtin();
        let normalized =
            NormalizedRecord::from_record(record("France", "abc".into(), "n/a".into()), &regions);

        assert_eq!(normalized.area, "France");
        assert_eq!(normalized.year, None);
        assert_eq!(normalized.value, None);
        assert_eq!(normalized.qualifier, ValueQualifier::Exact);
        assert_eq!(normalized.region, None);
    }
}

//! Region Table
//! Fixed country-to-region lookup used for regional aggregation.

use std::collections::HashMap;

pub const SOUTHEAST_ASIA: &str = "Southeast Asia";
pub const EAST_ASIA: &str = "East Asia";
pub const SUB_SAHARAN_AFRICA: &str = "Sub-Saharan Africa";
pub const MENA: &str = "MENA";
pub const LATIN_AMERICA: &str = "Latin America";
pub const SOUTH_ASIA: &str = "South Asia";

/// Built-in entries. FAOSTAT spells some names differently from common
/// usage, so both spellings are listed where they matter.
const BUILTIN_REGIONS: [(&str, &str); 15] = [
    ("Indonesia", SOUTHEAST_ASIA),
    ("Malaysia", SOUTHEAST_ASIA),
    ("Thailand", SOUTHEAST_ASIA),
    ("Vietnam", SOUTHEAST_ASIA),
    ("Viet Nam", SOUTHEAST_ASIA),
    ("Philippines", SOUTHEAST_ASIA),
    ("China", EAST_ASIA),
    ("Japan", EAST_ASIA),
    ("South Korea", EAST_ASIA),
    ("Republic of Korea", EAST_ASIA),
    ("Nigeria", SUB_SAHARAN_AFRICA),
    ("Kenya", SUB_SAHARAN_AFRICA),
    ("Egypt", MENA),
    ("Brazil", LATIN_AMERICA),
    ("India", SOUTH_ASIA),
];

/// Immutable exact-match mapping from country name to region name.
///
/// Lookups are case-sensitive; there is no alias resolution beyond the
/// entries actually present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionTable {
    entries: HashMap<String, String>,
}

impl Default for RegionTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl RegionTable {
    /// The standard table covering the dashboard's comparison countries.
    pub fn builtin() -> Self {
        Self::from_entries(BUILTIN_REGIONS)
    }

    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(country, region)| (country.into(), region.into()))
                .collect(),
        }
    }

    /// Return a copy with extra entries; later entries win on conflict.
    pub fn with_entries<I, K, V>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.entries.extend(
            entries
                .into_iter()
                .map(|(country, region)| (country.into(), region.into())),
        );
        self
    }

    /// Region for a country, or `None` when the name is not listed verbatim.
    pub fn classify(&self, area: &str) -> Option<&str> {
        self.entries.get(area).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_vietnam_spellings_map_to_southeast_asia() {
        let table = RegionTable::builtin();
        assert_eq!(table.classify("Viet Nam"), Some(SOUTHEAST_ASIA));
        assert_eq!(table.classify("Vietnam"), Some(SOUTHEAST_ASIA));
    }

    #[test]
    fn unlisted_countries_are_unmapped() {
        let table = RegionTable::builtin();
        assert_eq!(table.classify("France"), None);
        assert_eq!(table.classify(""), None);
    }

    #[test]
    fn lookup_is_exact_and_case_sensitive() {
        let table = RegionTable::builtin();
        assert_eq!(table.classify("egypt"), None);
        assert_eq!(table.classify(" Egypt"), None);
        assert_eq!(table.classify("Korea"), None);
        assert_eq!(table.classify("Egypt"), Some(MENA));
    }

    #[test]
    fn builtin_covers_six_regions() {
        let table = RegionTable::builtin();
        assert_eq!(table.len(), 15);
        for region in [
            EAST_ASIA,
            LATIN_AMERICA,
            MENA,
            SOUTH_ASIA,
            SOUTHEAST_ASIA,
            SUB_SAHARAN_AFRICA,
        ] {
            assert!(table.entries.values().any(|r| r == region), "{region}");
        }
    }

    #[test]
    fn extra_entries_extend_and_override() {
        let table = RegionTable::builtin()
            .with_entries([("France", "Western Europe"), ("Egypt", "North Africa")]);
        assert_eq!(table.classify("France"), Some("Western Europe"));
        assert_eq!(table.classify("Egypt"), Some("North Africa"));
        assert_eq!(table.classify("India"), Some(SOUTH_ASIA));
        assert_eq!(table.len(), 16);
    }
}

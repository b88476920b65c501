use std::collections::BTreeSet;

use crate::codes;

const COUNTRY_NAMES: [(&str, &str); 6] = [
    ("ES", "Spain"),
    ("DE", "Germany"),
    ("FR", "France"),
    ("IT", "Italy"),
    ("PT", "Portugal"),
    ("NL", "Netherlands"),
];

fn country_name(code: &str) -> Option<&'static str> {
    COUNTRY_NAMES
        .iter()
        .find(|(candidate, _)| *candidate == code)
        .map(|(_, name)| *name)
}

/// The geographies highlighted across tables and views: an EU aggregate,
/// one national focus, and the comparators actually present in the data.
///
/// Detection is deterministic: the same set of geography codes always
/// yields the same configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusConfig {
    pub eu_code: Option<String>,
    pub country_code: Option<String>,
    /// EU aggregate first, then the focus country, then comparators, each
    /// only when present in the data.
    pub focus_geos: Vec<String>,
}

impl FocusConfig {
    /// Detect the focus set with the default national focus.
    pub fn detect(geos: &BTreeSet<String>) -> Self {
        Self::detect_with_country(geos, codes::FOCUS_COUNTRY)
    }

    /// Detect the focus set around `country` instead of the default.
    pub fn detect_with_country(geos: &BTreeSet<String>, country: &str) -> Self {
        let eu_code = codes::EU_CANDIDATES
            .iter()
            .find(|candidate| geos.contains(**candidate))
            .map(|candidate| (*candidate).to_string());
        let country_code = geos.contains(country).then(|| country.to_string());

        let mut focus_geos = Vec::new();
        if let Some(eu) = &eu_code {
            focus_geos.push(eu.clone());
        }
        if let Some(code) = &country_code {
            focus_geos.push(code.clone());
        }
        for candidate in codes::COMPARATOR_CANDIDATES {
            if geos.contains(candidate) && !focus_geos.iter().any(|geo| geo == candidate) {
                focus_geos.push(candidate.to_string());
            }
        }

        Self {
            eu_code,
            country_code,
            focus_geos,
        }
    }

    /// Readable label for a geography code: the EU aggregate and known
    /// focus countries get a name suffix, everything else stays a code.
    pub fn geo_label(&self, geo: &str) -> String {
        if self.eu_code.as_deref() == Some(geo) {
            return format!("{geo} (EU-27)");
        }
        match country_name(geo) {
            Some(name) if self.country_code.as_deref() == Some(geo) => format!("{geo} ({name})"),
            _ => geo.to_string(),
        }
    }
}

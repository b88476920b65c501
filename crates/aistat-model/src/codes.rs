//! Dataset codes and column names the pipeline filters on.

/// Indicator for enterprises using at least one AI technology.
pub const ADOPTION_INDICATOR: &str = "E_AI_TANY";

/// Activity-classification total covering all surveyed sectors.
pub const ACTIVITY_TOTAL: &str = "C10-S951_X_K";

/// Dimension column names expected in the cleaned dataset.
pub const GEO: &str = "geo";
pub const INDICATOR: &str = "indic_is";
pub const ACTIVITY: &str = "nace_r2";
pub const SIZE_CLASS: &str = "size_emp";
pub const YEAR: &str = "year";
pub const VALUE: &str = "value";

/// EU aggregate candidates, newest vintage first.
pub const EU_CANDIDATES: [&str; 3] = ["EU27_2020", "EU27", "EU"];

/// Default national focus.
pub const FOCUS_COUNTRY: &str = "ES";

/// Comparator candidates appended to the focus set when present.
pub const COMPARATOR_CANDIDATES: [&str; 5] = ["DE", "FR", "IT", "PT", "NL"];

/// Technology indicators charted in the cross-section, with display labels.
pub const TECH_INDICATORS: [(&str, &str); 8] = [
    ("E_AI_TTM", "Text mining"),
    ("E_AI_TSR", "Speech recognition"),
    ("E_AI_TNLG", "Natural language generation"),
    ("E_AI_TIR", "Image recognition"),
    ("E_AI_TML", "Machine learning"),
    ("E_AI_TPA", "Robots and physical automation"),
    ("E_AI_TAR", "AI process automation"),
    ("E_AI_TPVSG", "Image, video and audio generation"),
];

/// Display label for a technology indicator code, if one is defined.
pub fn tech_label(code: &str) -> Option<&'static str> {
    TECH_INDICATORS
        .iter()
        .find(|(candidate, _)| *candidate == code)
        .map(|(_, label)| *label)
}

use serde::{Deserialize, Serialize};

/// One observation of the adoption series: country, year, share of
/// enterprises in percent. Field order matches the CSV column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdoptionRow {
    pub geo: String,
    pub year: i32,
    pub value: f64,
}

/// Adoption observation with its within-year rank. Rows whose value could
/// not be ranked keep an empty rank field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankRow {
    pub geo: String,
    pub year: i32,
    pub value: f64,
    pub rank: Option<u32>,
}

/// Adoption share of one activity classification in the focus country.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorRow {
    pub nace_r2: String,
    pub value: f64,
}

/// Technology-indicator observation for one focus geography.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechRow {
    pub geo: String,
    pub indic_is: String,
    pub value: f64,
    pub indic_label: String,
}

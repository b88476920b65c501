use std::path::{Path, PathBuf};

/// Locations of every pipeline artifact, derived from one root directory.
///
/// Stages receive this by reference instead of reading path constants, so a
/// test or an alternate data directory only has to change the root.
#[derive(Debug, Clone)]
pub struct DataPaths {
    root: PathBuf,
}

impl DataPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn raw_dir(&self) -> PathBuf {
        self.root.join("data").join("raw")
    }

    /// Raw SDMX-CSV download, written byte-for-byte as received.
    pub fn raw_csv(&self) -> PathBuf {
        self.raw_dir().join("eurostat_ai.csv")
    }

    pub fn processed_dir(&self) -> PathBuf {
        self.root.join("data").join("processed")
    }

    pub fn clean_csv(&self) -> PathBuf {
        self.processed_dir().join("ai_clean.csv")
    }

    pub fn outputs_dir(&self) -> PathBuf {
        self.root.join("outputs")
    }

    pub fn charts_dir(&self) -> PathBuf {
        self.outputs_dir().join("charts")
    }

    pub fn embed_dir(&self) -> PathBuf {
        self.outputs_dir().join("embed")
    }

    pub fn clean_report(&self) -> PathBuf {
        self.outputs_dir().join("clean_report.txt")
    }

    pub fn profile_report(&self) -> PathBuf {
        self.outputs_dir().join("profile_report.txt")
    }

    pub fn profile_counts_csv(&self, column: &str) -> PathBuf {
        self.outputs_dir().join(format!("profile_{column}_counts.csv"))
    }

    pub fn tables_report(&self) -> PathBuf {
        self.outputs_dir().join("build_tables_report.txt")
    }

    pub fn adoption_series_csv(&self) -> PathBuf {
        self.outputs_dir().join("adoption_country_year.csv")
    }

    pub fn adoption_top15_csv(&self) -> PathBuf {
        self.outputs_dir().join("adoption_top15_last_year.csv")
    }

    pub fn adoption_rank_csv(&self) -> PathBuf {
        self.outputs_dir().join("adoption_country_year_rank.csv")
    }

    pub fn sectors_focus_csv(&self) -> PathBuf {
        self.outputs_dir().join("sectors_focus_top15_last_year.csv")
    }

    pub fn tech_focus_csv(&self) -> PathBuf {
        self.outputs_dir().join("ai_tech_focus_last_year.csv")
    }
}

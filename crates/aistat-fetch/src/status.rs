//! Typed view of the asynchronous-extraction lifecycle.

use std::fmt;

/// State of an asynchronous extraction as reported by the status endpoint.
///
/// The endpoint occasionally reports words outside the documented set;
/// those stay [`ExtractionStatus::Unknown`] and count as pending, so the
/// poll ceiling still bounds the wait.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionStatus {
    Submitted,
    Processing,
    Available,
    /// Terminal failure reported by the API, with the original word.
    Failed(String),
    /// Unrecognized or missing status word.
    Unknown(String),
}

impl ExtractionStatus {
    fn from_word(word: &str) -> Self {
        match word {
            "SUBMITTED" => Self::Submitted,
            "PROCESSING" => Self::Processing,
            "AVAILABLE" => Self::Available,
            "EXPIRED" | "UNKNOWN_REQUEST" | "ERROR" => Self::Failed(word.to_string()),
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Resolve the status words found in one polling response. The
    /// document repeats the status element at several nesting levels; the
    /// last recognized word wins, falling back to the last word seen.
    pub fn from_report(words: &[String]) -> Self {
        for word in words.iter().rev() {
            let status = Self::from_word(word);
            if !matches!(status, Self::Unknown(_)) {
                return status;
            }
        }
        match words.last() {
            Some(word) => Self::Unknown(word.clone()),
            None => Self::Unknown("MISSING".to_string()),
        }
    }

    /// Whether the extraction is still worth polling.
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Submitted | Self::Processing | Self::Unknown(_))
    }
}

impl fmt::Display for ExtractionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Submitted => f.write_str("SUBMITTED"),
            Self::Processing => f.write_str("PROCESSING"),
            Self::Available => f.write_str("AVAILABLE"),
            Self::Failed(word) | Self::Unknown(word) => f.write_str(word),
        }
    }
}

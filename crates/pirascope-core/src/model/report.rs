// ── External report domain types ──

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Processing state of a submitted link. The server sends a numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportStatus {
    Pending,
    Processed,
    Rejected,
    Unknown(i64),
}

impl From<i64> for ReportStatus {
    fn from(code: i64) -> Self {
        match code {
            0 => Self::Pending,
            1 => Self::Processed,
            2 => Self::Rejected,
            other => Self::Unknown(other),
        }
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => f.write_str("Pending"),
            Self::Processed => f.write_str("Processed"),
            Self::Rejected => f.write_str("Rejected"),
            Self::Unknown(code) => write!(f, "Unknown ({code})"),
        }
    }
}

/// A piracy link submitted for enforcement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalReport {
    pub id: u64,
    pub reporter_id: Option<u64>,
    pub link: String,
    pub status: ReportStatus,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_map() {
        assert_eq!(ReportStatus::from(0), ReportStatus::Pending);
        assert_eq!(ReportStatus::from(2), ReportStatus::Rejected);
        assert_eq!(ReportStatus::from(9).to_string(), "Unknown (9)");
    }
}

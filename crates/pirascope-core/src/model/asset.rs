// ── Asset domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::torrent::TorrentTelemetry;

/// A monitored piece of media content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub torrent_id: Option<u64>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub status: String,
    pub project_id: Option<u64>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Asset {
    pub fn is_active(&self) -> bool {
        self.status.eq_ignore_ascii_case("active")
    }
}

/// Pagination metadata echoed back by list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

impl Default for PageInfo {
    fn default() -> Self {
        Self {
            total: 0,
            page: 1,
            limit: 10,
            total_pages: 1,
        }
    }
}

impl PageInfo {
    /// 1-based inclusive row range shown on the current page, `None` when empty.
    pub fn showing_range(&self) -> Option<(u64, u64)> {
        if self.total == 0 {
            return None;
        }
        let limit = u64::from(self.limit.max(1));
        let start = u64::from(self.page.saturating_sub(1)) * limit + 1;
        let end = (start + limit - 1).min(self.total);
        (start <= end).then_some((start, end))
    }
}

/// Link count on one platform (YouTube, Telegram, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformCount {
    pub name: String,
    pub link_count: u64,
    pub color_code: Option<String>,
    pub icon: Option<String>,
}

/// Per-platform link counts for each enforcement stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkCounts {
    pub detected: Vec<PlatformCount>,
    pub enforced: Vec<PlatformCount>,
    pub removed: Vec<PlatformCount>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub detected: u64,
    pub enforced: u64,
    pub removed: u64,
}

impl Tally {
    pub fn total(&self) -> u64 {
        self.detected + self.enforced + self.removed
    }
}

/// Link tallies for the four reporting periods.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodStatistics {
    pub today: Tally,
    pub yesterday: Tally,
    pub this_week: Tally,
    pub last_week: Tally,
}

/// One bucket of a detection time series. `name` is the bucket label the
/// server uses (`2024-03-05`, `W10`, `2024-03`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityBucket {
    pub name: String,
    pub detected: u64,
    pub enforced: u64,
    pub removed: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub daily: Vec<ActivityBucket>,
    pub weekly: Vec<ActivityBucket>,
    pub monthly: Vec<ActivityBucket>,
}

/// Everything the asset detail view renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetDetail {
    pub asset: Asset,
    pub links: LinkCounts,
    pub statistics: PeriodStatistics,
    pub activity: Activity,
    pub torrent: Option<TorrentTelemetry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn showing_range_clamps_to_total() {
        let info = PageInfo {
            total: 23,
            page: 3,
            limit: 10,
            total_pages: 3,
        };
        assert_eq!(info.showing_range(), Some((21, 23)));
    }

    #[test]
    fn showing_range_empty_when_no_rows() {
        assert_eq!(PageInfo::default().showing_range(), None);
    }
}

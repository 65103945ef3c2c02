// ── Chart shaping ──
//
// Pure functions from an `AssetDetail` to the series each dashboard panel
// draws. No I/O, no store access: feed them a snapshot.

mod links;
mod timeline;
mod torrent;

pub use links::{
    PERIOD_COLORS, PeriodComparison, PlatformBar, PlatformRow, SeriesPoint, detection_series,
    period_comparison, period_slices, platform_breakdown, platform_distribution, platform_rows,
};
pub use timeline::timeline_progress;
pub use torrent::{
    ActivityPoint, BAR_PALETTE, CLIENT_PALETTE, CountryBar, PeerPoint, client_distribution,
    country_distribution, isp_distribution, latest_peers, peer_points, peers_geojson,
    top_clients, torrent_activity,
};

use serde::Serialize;

/// What a panel shows when it has nothing to draw.
pub const NO_DATA_MESSAGE: &str = "No data available";

/// A panel's content: either data to draw or the empty placeholder.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum Panel<T> {
    Ready(T),
    NoData,
}

impl<T> Panel<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(data) => Some(data),
            Self::NoData => None,
        }
    }
}

impl<T> Panel<Vec<T>> {
    /// `NoData` for an empty series.
    pub fn from_vec(items: Vec<T>) -> Self {
        if items.is_empty() {
            Self::NoData
        } else {
            Self::Ready(items)
        }
    }
}

/// One pie/donut wedge or colored bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slice {
    pub name: String,
    pub value: u64,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// Bucket granularity for the detection time series.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Timeframe {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

/// Pick `palette[index % len]`.
pub(crate) fn palette_color(palette: &[&str], index: usize) -> String {
    palette
        .get(index % palette.len().max(1))
        .copied()
        .unwrap_or("#8884d8")
        .to_owned()
}

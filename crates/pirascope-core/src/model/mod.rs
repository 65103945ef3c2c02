// ── Domain model ──
//
// Canonical shapes the stores hold and views render. Raw wire types from
// `pirascope_api::models` are converted into these in `crate::convert`.

pub mod asset;
pub mod employee;
pub mod report;
pub mod torrent;
pub mod user;

// ── Re-exports ──────────────────────────────────────────────────────

pub use asset::{
    Activity, ActivityBucket, Asset, AssetDetail, LinkCounts, PageInfo, PeriodStatistics,
    PlatformCount, Tally,
};
pub use employee::{Employee, EmployeeStatus};
pub use report::{ExternalReport, ReportStatus};
pub use torrent::{ClientStat, GeoPoint, Peer, PeerRole, SwarmStats, TorrentTelemetry};
pub use user::SessionUser;

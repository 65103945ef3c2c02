// Wire types for the Pirascope REST API.
//
// These mirror the server's JSON exactly. Dates stay as the raw strings
// the server sends; `pirascope-core` parses them into domain types.
// Nearly every field is `#[serde(default)]` because the server omits
// keys freely and the dashboard never validated shape beyond presence.

use serde::{Deserialize, Serialize};

// ── Error body ──────────────────────────────────────────────────────

/// Error responses carry a human-readable `message` (and sometimes `error`).
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: Option<String>,
    pub error: Option<String>,
}

// ── Auth ────────────────────────────────────────────────────────────

/// The authenticated company user as returned by login/session endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiUser {
    pub user_id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub profile: Option<String>,
    #[serde(default)]
    pub company_id: Option<u64>,
    #[serde(default)]
    pub user_type: Option<String>,
    #[serde(default)]
    pub logged_in: bool,
}

/// `POST auth/company_login` response.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub user: ApiUser,
    #[serde(default)]
    pub message: Option<String>,
}

/// `GET auth/check_session` response. `user` is absent when no session exists.
#[derive(Debug, Deserialize)]
pub struct SessionResponse {
    #[serde(default)]
    pub user: Option<ApiUser>,
}

// ── Assets ──────────────────────────────────────────────────────────

/// A monitored content item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiAsset {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub torrent_id: Option<u64>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub project_id: Option<u64>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// `GET company/get_assets` envelope.
#[derive(Debug, Deserialize)]
pub struct AssetPage {
    #[serde(default)]
    pub total: u64,
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
    #[serde(default = "first_page")]
    pub total_pages: u32,
    #[serde(default)]
    pub assets: Vec<ApiAsset>,
}

/// Links found on one platform, with the platform's brand color.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiPlatformCount {
    pub name: String,
    #[serde(default)]
    pub link_count: u64,
    #[serde(default)]
    pub color_code: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
}

/// Per-platform link counts grouped by enforcement stage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiLinkCounts {
    #[serde(default)]
    pub detected: Vec<ApiPlatformCount>,
    #[serde(default)]
    pub enforced: Vec<ApiPlatformCount>,
    #[serde(default)]
    pub removed: Vec<ApiPlatformCount>,
}

/// Detected / enforced / removed counts for one period.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ApiTally {
    #[serde(default)]
    pub detected: u64,
    #[serde(default)]
    pub enforced: u64,
    #[serde(default)]
    pub removed: u64,
}

/// Period statistics shown in the comparison charts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiStatistics {
    #[serde(default)]
    pub today: ApiTally,
    #[serde(default)]
    pub yesterday: ApiTally,
    #[serde(default)]
    pub this_week: ApiTally,
    #[serde(default)]
    pub last_week: ApiTally,
}

/// One time bucket of enforcement activity. `name` is the bucket label
/// (`2024-03-05` daily, `2024-W10` weekly, `2024-03` monthly).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiActivityBucket {
    pub name: String,
    #[serde(default)]
    pub detected: u64,
    #[serde(default)]
    pub enforced: u64,
    #[serde(default)]
    pub removed: u64,
}

/// Time-bucketed activity series.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiActivity {
    #[serde(default)]
    pub daily: Vec<ApiActivityBucket>,
    #[serde(default)]
    pub weekly: Vec<ApiActivityBucket>,
    #[serde(default)]
    pub monthly: Vec<ApiActivityBucket>,
}

/// Peer geolocation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ApiGeo {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// A swarm peer observed sharing the asset's torrent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiPeer {
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub isp: Option<String>,
    #[serde(default)]
    pub seeder: bool,
    #[serde(default)]
    pub last_seen: Option<String>,
    #[serde(default)]
    pub geo: Option<ApiGeo>,
}

/// Peer count for one BitTorrent client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiClientStat {
    pub client: String,
    #[serde(default)]
    pub count: u64,
}

/// Swarm totals.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ApiSwarmStats {
    #[serde(default)]
    pub seeder_count: u64,
    #[serde(default)]
    pub leecher_count: u64,
}

/// Torrent/peer telemetry. Only present for assets tracked on BitTorrent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiTorrent {
    #[serde(default)]
    pub stats: ApiSwarmStats,
    #[serde(default)]
    pub latest_peers: Vec<ApiPeer>,
    #[serde(default)]
    pub client_stats: Vec<ApiClientStat>,
}

/// `GET company/get_asset_detail/{id}` payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiAssetDetail {
    pub asset: ApiAsset,
    #[serde(default)]
    pub count: ApiLinkCounts,
    #[serde(default)]
    pub statistics: ApiStatistics,
    #[serde(default)]
    pub activity: ApiActivity,
    #[serde(default)]
    pub torrent: Option<ApiTorrent>,
}

// ── Employees ───────────────────────────────────────────────────────

/// A company employee account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEmployee {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub profile: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub company_id: Option<u64>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
}

/// `GET company/get_employees` envelope.
#[derive(Debug, Deserialize)]
pub struct EmployeePage {
    #[serde(default)]
    pub total: u64,
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
    #[serde(default = "first_page")]
    pub total_pages: u32,
    #[serde(default)]
    pub employees: Vec<ApiEmployee>,
}

/// `GET company/get_employee/{id}` envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct EmployeeEnvelope {
    pub employee: ApiEmployee,
}

/// `POST company/add_employee` body.
#[derive(Debug, Serialize)]
pub struct AddEmployeeBody<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<&'a str>,
}

/// `POST company/edit_employee/{id}` body.
#[derive(Debug, Serialize)]
pub struct EditEmployeeBody<'a> {
    pub name: &'a str,
    pub email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<&'a str>,
}

// ── External reports ────────────────────────────────────────────────

/// A piracy link submitted by a third party. `status` is a numeric code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiExternalReport {
    pub id: u64,
    #[serde(default)]
    pub reporter_id: Option<u64>,
    pub link: String,
    #[serde(default)]
    pub status: i64,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// `GET company/get_external_report` envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct ReportList {
    #[serde(default)]
    pub external_reports: Vec<ApiExternalReport>,
}

fn first_page() -> u32 {
    1
}

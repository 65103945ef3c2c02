// ── API-to-domain type conversions ──
//
// Bridges raw `pirascope_api` response types into `pirascope_core::model`
// domain types. Timestamps are parsed leniently: the backend mixes RFC 3339,
// MySQL-style datetimes, and bare dates depending on the column.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use pirascope_api::models::{
    ApiActivity, ApiActivityBucket, ApiAsset, ApiAssetDetail, ApiClientStat, ApiEmployee,
    ApiExternalReport, ApiLinkCounts, ApiPeer, ApiPlatformCount, ApiStatistics, ApiTally,
    ApiTorrent, ApiUser, AssetPage, EmployeePage,
};

use crate::model::{
    Activity, ActivityBucket, Asset, AssetDetail, ClientStat, Employee, EmployeeStatus,
    ExternalReport, GeoPoint, LinkCounts, PageInfo, Peer, PeerRole, PeriodStatistics,
    PlatformCount, SessionUser, SwarmStats, Tally, TorrentTelemetry,
};

// ── Helpers ────────────────────────────────────────────────────────

/// Parse a backend timestamp, silently dropping unparseable values.
pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn parse_opt(raw: Option<&String>) -> Option<DateTime<Utc>> {
    raw.and_then(|s| parse_timestamp(s))
}

fn page_info(total: u64, page: u32, limit: u32, total_pages: u32) -> PageInfo {
    PageInfo {
        total,
        page: page.max(1),
        limit,
        total_pages: total_pages.max(1),
    }
}

// ── Session ────────────────────────────────────────────────────────

impl From<ApiUser> for SessionUser {
    fn from(u: ApiUser) -> Self {
        Self {
            user_id: u.user_id,
            name: u.name,
            email: u.email,
            profile: u.profile,
            company_id: u.company_id,
            user_type: u.user_type,
            logged_in: u.logged_in,
        }
    }
}

// ── Assets ─────────────────────────────────────────────────────────

impl From<ApiAsset> for Asset {
    fn from(a: ApiAsset) -> Self {
        Self {
            start_date: parse_opt(a.start_date.as_ref()),
            end_date: parse_opt(a.end_date.as_ref()),
            created_at: parse_opt(a.created_at.as_ref()),
            updated_at: parse_opt(a.updated_at.as_ref()),
            id: a.id,
            name: a.name,
            description: a.description,
            image: a.image,
            torrent_id: a.torrent_id,
            status: a.status,
            project_id: a.project_id,
        }
    }
}

/// Split a list page into domain rows plus pagination metadata.
pub(crate) fn asset_page(page: AssetPage) -> (Vec<Asset>, PageInfo) {
    let info = page_info(page.total, page.page, page.limit, page.total_pages);
    (page.assets.into_iter().map(Asset::from).collect(), info)
}

impl From<ApiPlatformCount> for PlatformCount {
    fn from(p: ApiPlatformCount) -> Self {
        Self {
            name: p.name,
            link_count: p.link_count,
            color_code: p.color_code.filter(|c| !c.trim().is_empty()),
            icon: p.icon,
        }
    }
}

impl From<ApiLinkCounts> for LinkCounts {
    fn from(c: ApiLinkCounts) -> Self {
        let convert = |v: Vec<ApiPlatformCount>| v.into_iter().map(PlatformCount::from).collect();
        Self {
            detected: convert(c.detected),
            enforced: convert(c.enforced),
            removed: convert(c.removed),
        }
    }
}

impl From<ApiTally> for Tally {
    fn from(t: ApiTally) -> Self {
        Self {
            detected: t.detected,
            enforced: t.enforced,
            removed: t.removed,
        }
    }
}

impl From<ApiStatistics> for PeriodStatistics {
    fn from(s: ApiStatistics) -> Self {
        Self {
            today: s.today.into(),
            yesterday: s.yesterday.into(),
            this_week: s.this_week.into(),
            last_week: s.last_week.into(),
        }
    }
}

impl From<ApiActivityBucket> for ActivityBucket {
    fn from(b: ApiActivityBucket) -> Self {
        Self {
            name: b.name,
            detected: b.detected,
            enforced: b.enforced,
            removed: b.removed,
        }
    }
}

impl From<ApiActivity> for Activity {
    fn from(a: ApiActivity) -> Self {
        let convert = |v: Vec<ApiActivityBucket>| v.into_iter().map(ActivityBucket::from).collect();
        Self {
            daily: convert(a.daily),
            weekly: convert(a.weekly),
            monthly: convert(a.monthly),
        }
    }
}

// ── Torrent ────────────────────────────────────────────────────────

impl From<ApiPeer> for Peer {
    fn from(p: ApiPeer) -> Self {
        // Zero coordinates mean "not geolocated".
        let location = p.geo.and_then(|g| match (g.latitude, g.longitude) {
            (Some(latitude), Some(longitude)) if latitude != 0.0 && longitude != 0.0 => {
                Some(GeoPoint {
                    latitude,
                    longitude,
                })
            }
            _ => None,
        });
        Self {
            ip: p.ip.filter(|ip| !ip.is_empty()),
            city: p.city,
            country: p.country,
            country_code: p.country_code,
            isp: p.isp,
            role: if p.seeder {
                PeerRole::Seeder
            } else {
                PeerRole::Leecher
            },
            last_seen: parse_opt(p.last_seen.as_ref()),
            location,
        }
    }
}

impl From<ApiClientStat> for ClientStat {
    fn from(c: ApiClientStat) -> Self {
        Self {
            client: c.client,
            count: c.count,
        }
    }
}

impl From<ApiTorrent> for TorrentTelemetry {
    fn from(t: ApiTorrent) -> Self {
        Self {
            swarm: SwarmStats {
                seeders: t.stats.seeder_count,
                leechers: t.stats.leecher_count,
            },
            latest_peers: t.latest_peers.into_iter().map(Peer::from).collect(),
            client_stats: t.client_stats.into_iter().map(ClientStat::from).collect(),
        }
    }
}

impl From<ApiAssetDetail> for AssetDetail {
    fn from(d: ApiAssetDetail) -> Self {
        Self {
            asset: d.asset.into(),
            links: d.count.into(),
            statistics: d.statistics.into(),
            activity: d.activity.into(),
            torrent: d.torrent.map(TorrentTelemetry::from),
        }
    }
}

// ── Employees ──────────────────────────────────────────────────────

impl From<ApiEmployee> for Employee {
    fn from(e: ApiEmployee) -> Self {
        Self {
            status: EmployeeStatus::from_wire(&e.status),
            created_at: parse_opt(e.created_at.as_ref()),
            updated_at: parse_opt(e.updated_at.as_ref()),
            id: e.id,
            name: e.name,
            email: e.email,
            profile: e.profile,
            phone: e.phone,
            company_id: e.company_id,
            company_name: e.company_name,
        }
    }
}

pub(crate) fn employee_page(page: EmployeePage) -> (Vec<Employee>, PageInfo) {
    let info = page_info(page.total, page.page, page.limit, page.total_pages);
    (page.employees.into_iter().map(Employee::from).collect(), info)
}

// ── Reports ────────────────────────────────────────────────────────

impl From<ApiExternalReport> for ExternalReport {
    fn from(r: ApiExternalReport) -> Self {
        Self {
            id: r.id,
            reporter_id: r.reporter_id,
            link: r.link,
            status: r.status.into(),
            created_at: parse_opt(r.created_at.as_ref()),
            updated_at: parse_opt(r.updated_at.as_ref()),
        }
    }
}

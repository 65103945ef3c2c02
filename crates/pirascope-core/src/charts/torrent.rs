// ── Torrent panels ──
//
// Everything here needs swarm telemetry. Assets without it (or with an
// empty swarm) get `Panel::NoData` instead of an error.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::Serialize;
use serde_json::{Value, json};

use super::{Panel, Slice, palette_color};
use crate::model::{AssetDetail, Peer, TorrentTelemetry};

/// Wedge colors for the client pie.
pub const CLIENT_PALETTE: [&str; 8] = [
    "#0088FE", "#00C49F", "#FFBB28", "#FF8042", "#8884d8", "#82ca9d", "#ffc658", "#8dd1e1",
];

/// Bar colors, purple through coral.
pub const BAR_PALETTE: [&str; 8] = [
    "#8b5cf6", "#a855f7", "#d946ef", "#ec4899", "#f43f5e", "#fb7185", "#ff9580", "#ffb7a0",
];

const TOP_CLIENTS: usize = 8;
const TOP_COUNTRIES: usize = 10;
const TOP_ISPS: usize = 5;

fn telemetry(detail: &AssetDetail) -> Option<&TorrentTelemetry> {
    detail.torrent.as_ref()
}

fn peers(detail: &AssetDetail) -> &[Peer] {
    telemetry(detail).map_or(&[][..], |t| t.latest_peers.as_slice())
}

/// Group peers by a non-blank key, busiest group first (ties alphabetical).
fn group_peers<'a>(
    peers: &'a [Peer],
    key: impl Fn(&Peer) -> Option<&str>,
) -> Vec<(String, Vec<&'a Peer>)> {
    let mut groups: HashMap<String, Vec<&'a Peer>> = HashMap::new();
    for peer in peers {
        if let Some(k) = key(peer).map(str::trim).filter(|k| !k.is_empty()) {
            groups.entry(k.to_owned()).or_default().push(peer);
        }
    }
    let mut out: Vec<_> = groups.into_iter().collect();
    out.sort_by(|a, b| b.1.len().cmp(&a.1.len()).then_with(|| a.0.cmp(&b.0)));
    out
}

fn count(items: usize) -> u64 {
    u64::try_from(items).unwrap_or(u64::MAX)
}

// ── Client panels ───────────────────────────────────────────────────

/// Every reported client as a pie wedge, in server order.
pub fn client_distribution(detail: &AssetDetail) -> Panel<Vec<Slice>> {
    let stats = telemetry(detail).map_or(&[][..], |t| t.client_stats.as_slice());
    Panel::from_vec(
        stats
            .iter()
            .enumerate()
            .map(|(i, c)| Slice {
                name: c.client.clone(),
                value: c.count,
                color: palette_color(&CLIENT_PALETTE, i),
                icon: None,
            })
            .collect(),
    )
}

/// The eight most common clients, busiest first.
pub fn top_clients(detail: &AssetDetail) -> Panel<Vec<Slice>> {
    let mut stats: Vec<_> = telemetry(detail)
        .map(|t| t.client_stats.iter().collect())
        .unwrap_or_default();
    stats.sort_by(|a, b| b.count.cmp(&a.count));
    Panel::from_vec(
        stats
            .into_iter()
            .take(TOP_CLIENTS)
            .enumerate()
            .map(|(i, c)| Slice {
                name: c.client.clone(),
                value: c.count,
                color: palette_color(&BAR_PALETTE, i),
                icon: None,
            })
            .collect(),
    )
}

// ── Peer geography ──────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryBar {
    pub country: String,
    pub country_code: Option<String>,
    pub peers: u64,
    pub seeders: u64,
    pub leechers: u64,
}

/// Top ten countries by peer count, with the seeder/leecher split.
pub fn country_distribution(detail: &AssetDetail) -> Panel<Vec<CountryBar>> {
    Panel::from_vec(
        group_peers(peers(detail), |p| p.country.as_deref())
            .into_iter()
            .take(TOP_COUNTRIES)
            .map(|(country, members)| {
                let seeders = count(members.iter().filter(|p| p.is_seeder()).count());
                let peers = count(members.len());
                CountryBar {
                    country_code: members.iter().find_map(|p| p.country_code.clone()),
                    country,
                    peers,
                    seeders,
                    leechers: peers - seeders,
                }
            })
            .collect(),
    )
}

/// Top five ISPs by peer count.
pub fn isp_distribution(detail: &AssetDetail) -> Panel<Vec<Slice>> {
    Panel::from_vec(
        group_peers(peers(detail), |p| p.isp.as_deref())
            .into_iter()
            .take(TOP_ISPS)
            .enumerate()
            .map(|(i, (isp, members))| Slice {
                name: isp,
                value: count(members.len()),
                color: palette_color(&BAR_PALETTE[..TOP_ISPS], i),
                icon: None,
            })
            .collect(),
    )
}

/// A geolocated peer for the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeerPoint {
    pub longitude: f64,
    pub latitude: f64,
    pub ip: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub isp: Option<String>,
    pub is_seeder: bool,
}

pub fn peer_points(detail: &AssetDetail) -> Panel<Vec<PeerPoint>> {
    Panel::from_vec(
        peers(detail)
            .iter()
            .filter_map(|p| {
                let loc = p.location?;
                Some(PeerPoint {
                    longitude: loc.longitude,
                    latitude: loc.latitude,
                    ip: p.ip.clone(),
                    city: p.city.clone(),
                    country: p.country.clone(),
                    isp: p.isp.clone(),
                    is_seeder: p.is_seeder(),
                })
            })
            .collect(),
    )
}

/// GeoJSON `FeatureCollection` of peer points, ready for a map layer.
pub fn peers_geojson(points: &[PeerPoint]) -> Value {
    let features: Vec<Value> = points
        .iter()
        .map(|p| {
            json!({
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [p.longitude, p.latitude] },
                "properties": {
                    "ip": p.ip,
                    "city": p.city,
                    "country": p.country,
                    "isp": p.isp,
                    "isSeeder": p.is_seeder,
                }
            })
        })
        .collect();
    json!({ "type": "FeatureCollection", "features": features })
}

// ── Activity ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityPoint {
    /// UTC day, `YYYY-MM-DD`.
    pub date: String,
    pub unique_ips: u64,
}

/// Distinct peer IPs per UTC day, oldest first. Peers without an IP or a
/// last-seen time are skipped.
pub fn torrent_activity(detail: &AssetDetail) -> Panel<Vec<ActivityPoint>> {
    let mut days: BTreeMap<String, BTreeSet<&str>> = BTreeMap::new();
    for peer in peers(detail) {
        if let (Some(ip), Some(seen)) = (peer.ip.as_deref(), peer.last_seen) {
            days.entry(seen.format("%Y-%m-%d").to_string())
                .or_default()
                .insert(ip);
        }
    }
    Panel::from_vec(
        days.into_iter()
            .map(|(date, ips)| ActivityPoint {
                date,
                unique_ips: count(ips.len()),
            })
            .collect(),
    )
}

/// Most recent peers first.
pub fn latest_peers(detail: &AssetDetail) -> Panel<Vec<Peer>> {
    let mut list = peers(detail).to_vec();
    list.sort_by(|a, b| b.last_seen.cmp(&a.last_seen));
    Panel::from_vec(list)
}

// ── BitTorrent swarm telemetry ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeerRole {
    Seeder,
    Leecher,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// A peer observed in the swarm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Peer {
    pub ip: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub country_code: Option<String>,
    pub isp: Option<String>,
    pub role: PeerRole,
    pub last_seen: Option<DateTime<Utc>>,
    /// Only set when the server geolocated the peer to non-zero coordinates.
    pub location: Option<GeoPoint>,
}

impl Peer {
    pub fn is_seeder(&self) -> bool {
        self.role == PeerRole::Seeder
    }
}

/// Torrent client name with the number of peers running it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientStat {
    pub client: String,
    pub count: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwarmStats {
    pub seeders: u64,
    pub leechers: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TorrentTelemetry {
    pub swarm: SwarmStats,
    pub latest_peers: Vec<Peer>,
    pub client_stats: Vec<ClientStat>,
}

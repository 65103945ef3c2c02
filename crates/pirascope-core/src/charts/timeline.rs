use chrono::{DateTime, Utc};

use crate::model::Asset;

/// Percent of the monitoring window elapsed at `now`, clamped to 0..=100.
/// Assets without both dates report 0.
pub fn timeline_progress(asset: &Asset, now: DateTime<Utc>) -> u8 {
    let (Some(start), Some(end)) = (asset.start_date, asset.end_date) else {
        return 0;
    };
    if now <= start {
        return 0;
    }
    if now >= end {
        return 100;
    }
    let total = (end - start).num_seconds();
    let elapsed = (now - start).num_seconds();
    if total <= 0 {
        return 100;
    }
    let percent = (elapsed.saturating_mul(100) + total / 2) / total;
    u8::try_from(percent.clamp(0, 100)).unwrap_or(100)
}

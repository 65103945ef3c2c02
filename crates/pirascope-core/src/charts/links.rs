// ── Link-count panels ──

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;

use super::{Slice, Timeframe, palette_color};
use crate::model::{AssetDetail, PeriodStatistics, PlatformCount, Tally};

/// Detected, Enforced, Removed.
pub const PERIOD_COLORS: [&str; 3] = ["#0088FE", "#00C49F", "#FF8042"];

const PLATFORM_LIMIT: usize = 5;

/// Per-platform totals across the three stages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformBar {
    pub name: String,
    pub detected: u64,
    pub enforced: u64,
    pub removed: u64,
    pub color: Option<String>,
}

impl PlatformBar {
    pub fn total(&self) -> u64 {
        self.detected + self.enforced + self.removed
    }
}

/// Merge the three stage lists by platform name and keep the five busiest.
/// A platform's color is the first one seen (detected, then enforced, then removed).
pub fn platform_breakdown(detail: &AssetDetail) -> Vec<PlatformBar> {
    let mut bars: Vec<PlatformBar> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    let stages: [(&[PlatformCount], fn(&mut PlatformBar, u64)); 3] = [
        (&detail.links.detected, |b, n| b.detected += n),
        (&detail.links.enforced, |b, n| b.enforced += n),
        (&detail.links.removed, |b, n| b.removed += n),
    ];

    for (counts, add) in stages {
        for count in counts {
            let slot = *index.entry(count.name.clone()).or_insert_with(|| {
                bars.push(PlatformBar {
                    name: count.name.clone(),
                    detected: 0,
                    enforced: 0,
                    removed: 0,
                    color: None,
                });
                bars.len() - 1
            });
            if let Some(bar) = bars.get_mut(slot) {
                add(bar, count.link_count);
                if bar.color.is_none() {
                    bar.color.clone_from(&count.color_code);
                }
            }
        }
    }

    // Stable sort keeps first-seen order among equal totals.
    bars.sort_by(|a, b| b.total().cmp(&a.total()));
    bars.truncate(PLATFORM_LIMIT);
    bars
}

/// Detected links per platform, as wedges.
pub fn platform_distribution(detail: &AssetDetail) -> Vec<Slice> {
    detail
        .links
        .detected
        .iter()
        .enumerate()
        .map(|(i, p)| Slice {
            name: p.name.clone(),
            value: p.link_count,
            color: p
                .color_code
                .clone()
                .unwrap_or_else(|| palette_color(&super::CLIENT_PALETTE, i)),
            icon: p.icon.clone(),
        })
        .collect()
}

/// One row per (platform, stage) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformRow {
    pub platform: String,
    pub status: &'static str,
    pub link_count: u64,
    pub icon: Option<String>,
}

pub fn platform_rows(detail: &AssetDetail) -> Vec<PlatformRow> {
    let stages: [(&'static str, &[PlatformCount]); 3] = [
        ("Detected", &detail.links.detected),
        ("Enforced", &detail.links.enforced),
        ("Removed", &detail.links.removed),
    ];
    stages
        .into_iter()
        .flat_map(|(status, counts)| {
            counts.iter().map(move |c| PlatformRow {
                platform: c.name.clone(),
                status,
                link_count: c.link_count,
                icon: c.icon.clone(),
            })
        })
        .collect()
}

/// Stage wedges for one period, zero stages dropped. Empty means no data.
pub fn period_slices(tally: Tally) -> Vec<Slice> {
    [
        ("Detected", tally.detected),
        ("Enforced", tally.enforced),
        ("Removed", tally.removed),
    ]
    .into_iter()
    .zip(PERIOD_COLORS)
    .filter(|((_, value), _)| *value > 0)
    .map(|((name, value), color)| Slice {
        name: name.to_owned(),
        value,
        color: color.to_owned(),
        icon: None,
    })
    .collect()
}

/// Detected links in one period against the period before it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodComparison {
    pub label: &'static str,
    pub current_label: &'static str,
    pub previous_label: &'static str,
    pub current: u64,
    pub previous: u64,
}

impl PeriodComparison {
    /// Signed change from the previous period.
    pub fn delta(&self) -> i128 {
        i128::from(self.current) - i128::from(self.previous)
    }
}

pub fn period_comparison(statistics: &PeriodStatistics) -> [PeriodComparison; 2] {
    [
        PeriodComparison {
            label: "Daily",
            current_label: "Today",
            previous_label: "Yesterday",
            current: statistics.today.detected,
            previous: statistics.yesterday.detected,
        },
        PeriodComparison {
            label: "Weekly",
            current_label: "This Week",
            previous_label: "Last Week",
            current: statistics.this_week.detected,
            previous: statistics.last_week.detected,
        },
    ]
}

/// One x-axis point of the detection chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesPoint {
    pub label: String,
    pub detected: u64,
    pub enforced: u64,
    pub removed: u64,
}

pub fn detection_series(detail: &AssetDetail, timeframe: Timeframe) -> Vec<SeriesPoint> {
    let buckets = match timeframe {
        Timeframe::Daily => &detail.activity.daily,
        Timeframe::Weekly => &detail.activity.weekly,
        Timeframe::Monthly => &detail.activity.monthly,
    };
    buckets
        .iter()
        .map(|b| SeriesPoint {
            label: bucket_label(&b.name, timeframe),
            detected: b.detected,
            enforced: b.enforced,
            removed: b.removed,
        })
        .collect()
}

/// `2024-03-05` -> `Mar 5`, `2024-03` -> `Mar 24`; week labels pass through.
fn bucket_label(name: &str, timeframe: Timeframe) -> String {
    let parsed = match timeframe {
        Timeframe::Daily => NaiveDate::parse_from_str(name, "%Y-%m-%d")
            .ok()
            .map(|d| d.format("%b %-d").to_string()),
        Timeframe::Monthly => NaiveDate::parse_from_str(&format!("{name}-01"), "%Y-%m-%d")
            .ok()
            .map(|d| d.format("%b %y").to_string()),
        Timeframe::Weekly => None,
    };
    parsed.unwrap_or_else(|| name.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Activity, ActivityBucket, Asset, LinkCounts};
    use pretty_assertions::assert_eq;

    fn count(name: &str, n: u64, color: Option<&str>) -> PlatformCount {
        PlatformCount {
            name: name.into(),
            link_count: n,
            color_code: color.map(String::from),
            icon: None,
        }
    }

    fn detail(links: LinkCounts, activity: Activity) -> AssetDetail {
        AssetDetail {
            asset: Asset {
                id: 1,
                name: "Film".into(),
                description: None,
                image: None,
                torrent_id: None,
                start_date: None,
                end_date: None,
                status: "active".into(),
                project_id: None,
                created_at: None,
                updated_at: None,
            },
            links,
            statistics: PeriodStatistics::default(),
            activity,
            torrent: None,
        }
    }

    #[test]
    fn breakdown_merges_stages_and_keeps_first_color() {
        let d = detail(
            LinkCounts {
                detected: vec![count("YouTube", 4, Some("#f00")), count("Telegram", 1, None)],
                enforced: vec![count("Telegram", 6, Some("#08c")), count("YouTube", 1, Some("#000"))],
                removed: vec![count("YouTube", 2, None)],
            },
            Activity::default(),
        );

        let bars = platform_breakdown(&d);
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].name, "YouTube");
        assert_eq!((bars[0].detected, bars[0].enforced, bars[0].removed), (4, 1, 2));
        assert_eq!(bars[0].color.as_deref(), Some("#f00"));
        assert_eq!(bars[1].color.as_deref(), Some("#08c"));
    }

    #[test]
    fn breakdown_keeps_top_five() {
        let detected = (0..8).map(|i| count(&format!("P{i}"), i, None)).collect();
        let d = detail(
            LinkCounts {
                detected,
                ..LinkCounts::default()
            },
            Activity::default(),
        );
        let names: Vec<_> = platform_breakdown(&d).into_iter().map(|b| b.name).collect();
        assert_eq!(names, vec!["P7", "P6", "P5", "P4", "P3"]);
    }

    #[test]
    fn period_slices_drop_zero_stages() {
        let slices = period_slices(Tally {
            detected: 3,
            enforced: 0,
            removed: 1,
        });
        assert_eq!(slices.len(), 2);
        assert_eq!(slices[1].name, "Removed");
        assert_eq!(slices[1].color, "#FF8042");
        assert!(period_slices(Tally::default()).is_empty());
    }

    #[test]
    fn series_labels_per_timeframe() {
        let bucket = |name: &str| ActivityBucket {
            name: name.into(),
            detected: 1,
            enforced: 0,
            removed: 0,
        };
        let d = detail(
            LinkCounts::default(),
            Activity {
                daily: vec![bucket("2024-03-05")],
                weekly: vec![bucket("W12")],
                monthly: vec![bucket("2024-03"), bucket("odd")],
            },
        );
        assert_eq!(detection_series(&d, Timeframe::Daily)[0].label, "Mar 5");
        assert_eq!(detection_series(&d, Timeframe::Weekly)[0].label, "W12");
        let monthly = detection_series(&d, Timeframe::Monthly);
        assert_eq!(monthly[0].label, "Mar 24");
        assert_eq!(monthly[1].label, "odd");
    }

    #[test]
    fn comparison_delta() {
        let stats = PeriodStatistics {
            today: Tally {
                detected: 2,
                ..Tally::default()
            },
            yesterday: Tally {
                detected: 5,
                ..Tally::default()
            },
            ..PeriodStatistics::default()
        };
        let [daily, weekly] = period_comparison(&stats);
        assert_eq!(daily.delta(), -3);
        assert_eq!(weekly.delta(), 0);
    }
}

//! Asset command handlers: list, show, charts.

use std::fmt::Write as _;

use chrono::Utc;
use serde::Serialize;
use tabled::Tabled;

use pirascope_core::charts::{
    self, ActivityPoint, CountryBar, NO_DATA_MESSAGE, Panel, PeerPoint, PeriodComparison,
    PlatformBar, SeriesPoint, Slice, Timeframe,
};
use pirascope_core::model::{Peer, PeriodStatistics, Tally};
use pirascope_core::pagination::page_numbers;
use pirascope_core::{Asset, AssetDetail, Dashboard};

use crate::cli::{AssetsArgs, AssetsCommand, GlobalOpts, OutputFormat, TimeframeArg};
use crate::error::CliError;
use crate::output;

use super::util;

const BAR_WIDTH: usize = 20;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct AssetRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Start")]
    start: String,
    #[tabled(rename = "End")]
    end: String,
    #[tabled(rename = "Elapsed")]
    elapsed: String,
    #[tabled(rename = "Torrent")]
    torrent: String,
}

impl From<&Asset> for AssetRow {
    fn from(a: &Asset) -> Self {
        Self {
            id: a.id,
            name: a.name.clone(),
            status: a.status.clone(),
            start: output::date(a.start_date.as_ref()),
            end: output::date(a.end_date.as_ref()),
            elapsed: format!("{}%", charts::timeline_progress(a, Utc::now())),
            torrent: a.torrent_id.map(|t| t.to_string()).unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
struct PlatformRow {
    #[tabled(rename = "Platform")]
    platform: String,
    #[tabled(rename = "Detected")]
    detected: u64,
    #[tabled(rename = "Enforced")]
    enforced: u64,
    #[tabled(rename = "Removed")]
    removed: u64,
    #[tabled(rename = "Total")]
    total: u64,
}

impl From<&PlatformBar> for PlatformRow {
    fn from(b: &PlatformBar) -> Self {
        Self {
            platform: b.name.clone(),
            detected: b.detected,
            enforced: b.enforced,
            removed: b.removed,
            total: b.total(),
        }
    }
}

#[derive(Tabled)]
struct PeriodRow {
    #[tabled(rename = "Period")]
    period: &'static str,
    #[tabled(rename = "Detected")]
    detected: u64,
    #[tabled(rename = "Enforced")]
    enforced: u64,
    #[tabled(rename = "Removed")]
    removed: u64,
}

fn period_rows(stats: &PeriodStatistics) -> Vec<PeriodRow> {
    let row = |period, t: Tally| PeriodRow {
        period,
        detected: t.detected,
        enforced: t.enforced,
        removed: t.removed,
    };
    vec![
        row("Today", stats.today),
        row("Yesterday", stats.yesterday),
        row("This week", stats.this_week),
        row("Last week", stats.last_week),
    ]
}

#[derive(Tabled)]
struct ShareRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Count")]
    value: u64,
    #[tabled(rename = "")]
    bar: String,
}

fn share_rows(slices: &[Slice]) -> Vec<ShareRow> {
    let max = slices.iter().map(|s| s.value).max().unwrap_or(0);
    slices
        .iter()
        .map(|s| ShareRow {
            name: s.name.clone(),
            value: s.value,
            bar: output::bar(s.value, max, BAR_WIDTH),
        })
        .collect()
}

#[derive(Tabled)]
struct SeriesRow {
    #[tabled(rename = "Bucket")]
    label: String,
    #[tabled(rename = "Detected")]
    detected: u64,
    #[tabled(rename = "Enforced")]
    enforced: u64,
    #[tabled(rename = "Removed")]
    removed: u64,
    #[tabled(rename = "")]
    bar: String,
}

#[derive(Tabled)]
struct CountryRow {
    #[tabled(rename = "Country")]
    country: String,
    #[tabled(rename = "Peers")]
    peers: u64,
    #[tabled(rename = "Seeders")]
    seeders: u64,
    #[tabled(rename = "Leechers")]
    leechers: u64,
}

impl From<&CountryBar> for CountryRow {
    fn from(c: &CountryBar) -> Self {
        let country = match c.country_code.as_deref() {
            Some(code) => format!("{} ({code})", c.country),
            None => c.country.clone(),
        };
        Self {
            country,
            peers: c.peers,
            seeders: c.seeders,
            leechers: c.leechers,
        }
    }
}

#[derive(Tabled)]
struct PeerRow {
    #[tabled(rename = "IP")]
    ip: String,
    #[tabled(rename = "Role")]
    role: &'static str,
    #[tabled(rename = "Location")]
    location: String,
    #[tabled(rename = "ISP")]
    isp: String,
    #[tabled(rename = "Last seen")]
    last_seen: String,
}

impl From<&Peer> for PeerRow {
    fn from(p: &Peer) -> Self {
        let location = [p.city.as_deref(), p.country.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(", ");
        Self {
            ip: output::or_dash(p.ip.as_deref()),
            role: if p.is_seeder() { "seeder" } else { "leecher" },
            location: output::or_dash(Some(location.as_str())),
            isp: output::or_dash(p.isp.as_deref()),
            last_seen: p
                .last_seen
                .map_or_else(|| "-".into(), |t| t.format("%Y-%m-%d %H:%M").to_string()),
        }
    }
}

// ── Chart bundle ────────────────────────────────────────────────────

/// Every panel of the asset dashboard, computed from one detail snapshot.
#[derive(Serialize)]
struct ChartsView {
    asset_id: u64,
    asset_name: String,
    timeline_progress: u8,
    period_comparison: [PeriodComparison; 2],
    today: Panel<Vec<Slice>>,
    this_week: Panel<Vec<Slice>>,
    platform_breakdown: Panel<Vec<PlatformBar>>,
    platform_distribution: Panel<Vec<Slice>>,
    timeframe: Timeframe,
    detection_series: Panel<Vec<SeriesPoint>>,
    client_distribution: Panel<Vec<Slice>>,
    top_clients: Panel<Vec<Slice>>,
    country_distribution: Panel<Vec<CountryBar>>,
    isp_distribution: Panel<Vec<Slice>>,
    peer_points: Panel<Vec<PeerPoint>>,
    torrent_activity: Panel<Vec<ActivityPoint>>,
    latest_peers: Panel<Vec<Peer>>,
}

impl ChartsView {
    fn build(detail: &AssetDetail, timeframe: Timeframe) -> Self {
        Self {
            asset_id: detail.asset.id,
            asset_name: detail.asset.name.clone(),
            timeline_progress: charts::timeline_progress(&detail.asset, Utc::now()),
            period_comparison: charts::period_comparison(&detail.statistics),
            today: Panel::from_vec(charts::period_slices(detail.statistics.today)),
            this_week: Panel::from_vec(charts::period_slices(detail.statistics.this_week)),
            platform_breakdown: Panel::from_vec(charts::platform_breakdown(detail)),
            platform_distribution: Panel::from_vec(charts::platform_distribution(detail)),
            timeframe,
            detection_series: Panel::from_vec(charts::detection_series(detail, timeframe)),
            client_distribution: charts::client_distribution(detail),
            top_clients: charts::top_clients(detail),
            country_distribution: charts::country_distribution(detail),
            isp_distribution: charts::isp_distribution(detail),
            peer_points: charts::peer_points(detail),
            torrent_activity: charts::torrent_activity(detail),
            latest_peers: charts::latest_peers(detail),
        }
    }
}

impl From<TimeframeArg> for Timeframe {
    fn from(arg: TimeframeArg) -> Self {
        match arg {
            TimeframeArg::Daily => Self::Daily,
            TimeframeArg::Weekly => Self::Weekly,
            TimeframeArg::Monthly => Self::Monthly,
        }
    }
}

// ── Text rendering ──────────────────────────────────────────────────

fn heading(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n── {title} ──");
}

fn panel<T>(out: &mut String, title: &str, panel: &Panel<T>, render: impl Fn(&T) -> String) {
    heading(out, title);
    match panel {
        Panel::Ready(data) => {
            let _ = writeln!(out, "{}", render(data));
        }
        Panel::NoData => {
            let _ = writeln!(out, "{NO_DATA_MESSAGE}");
        }
    }
}

fn progress_line(percent: u8) -> String {
    let filled = output::bar(u64::from(percent), 100, BAR_WIDTH);
    let empty = "░".repeat(BAR_WIDTH - filled.chars().count());
    format!("Monitoring window: [{filled}{empty}] {percent}% elapsed")
}

fn comparison_lines(rows: &[PeriodComparison]) -> String {
    rows.iter()
        .map(|c| {
            format!(
                "{:<24} {:>6} vs {:<6} ({:+})",
                format!("{} vs {}", c.current_label, c.previous_label),
                c.current,
                c.previous,
                c.delta()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn series_table(points: &[SeriesPoint]) -> String {
    let max = points.iter().map(|p| p.detected).max().unwrap_or(0);
    let rows: Vec<SeriesRow> = points
        .iter()
        .map(|p| SeriesRow {
            label: p.label.clone(),
            detected: p.detected,
            enforced: p.enforced,
            removed: p.removed,
            bar: output::bar(p.detected, max, BAR_WIDTH),
        })
        .collect();
    output::render_table(&rows)
}

fn activity_table(points: &[ActivityPoint]) -> String {
    let max = points.iter().map(|p| p.unique_ips).max().unwrap_or(0);
    let rows: Vec<ShareRow> = points
        .iter()
        .map(|p| ShareRow {
            name: p.date.clone(),
            value: p.unique_ips,
            bar: output::bar(p.unique_ips, max, BAR_WIDTH),
        })
        .collect();
    output::render_table(&rows)
}

fn render_charts(view: &ChartsView) -> String {
    let mut out = format!("{} (#{})\n", view.asset_name, view.asset_id);
    out.push_str(&progress_line(view.timeline_progress));
    out.push('\n');

    heading(&mut out, "Period comparison");
    let _ = writeln!(out, "{}", comparison_lines(&view.period_comparison));

    panel(&mut out, "Today", &view.today, |s| output::render_table(&share_rows(s)));
    panel(&mut out, "This week", &view.this_week, |s| {
        output::render_table(&share_rows(s))
    });
    panel(&mut out, "Top platforms", &view.platform_breakdown, |bars| {
        let rows: Vec<PlatformRow> = bars.iter().map(PlatformRow::from).collect();
        output::render_table(&rows)
    });
    panel(&mut out, "Detected links by platform", &view.platform_distribution, |s| {
        output::render_table(&share_rows(s))
    });
    panel(
        &mut out,
        &format!("Detections ({})", view.timeframe),
        &view.detection_series,
        |p| series_table(p),
    );

    panel(&mut out, "Torrent clients", &view.client_distribution, |s| {
        output::render_table(&share_rows(s))
    });
    panel(&mut out, "Top clients", &view.top_clients, |s| {
        output::render_table(&share_rows(s))
    });
    panel(&mut out, "Top countries", &view.country_distribution, |c| {
        let rows: Vec<CountryRow> = c.iter().map(CountryRow::from).collect();
        output::render_table(&rows)
    });
    panel(&mut out, "Top ISPs", &view.isp_distribution, |s| {
        output::render_table(&share_rows(s))
    });
    panel(&mut out, "Unique peers per day", &view.torrent_activity, |p| {
        activity_table(p)
    });
    panel(&mut out, "Latest peers", &view.latest_peers, |peers| {
        let rows: Vec<PeerRow> = peers.iter().map(PeerRow::from).collect();
        output::render_table(&rows)
    });
    panel(&mut out, "Peer map", &view.peer_points, |points| {
        format!("{} located peers (export with --geojson)", points.len())
    });

    out.trim_end().to_owned()
}

fn render_detail(detail: &AssetDetail) -> String {
    let a = &detail.asset;
    let mut out = String::new();
    let _ = writeln!(out, "ID:          {}", a.id);
    let _ = writeln!(out, "Name:        {}", a.name);
    let _ = writeln!(out, "Status:      {}", a.status);
    let _ = writeln!(out, "Description: {}", output::or_dash(a.description.as_deref()));
    let _ = writeln!(
        out,
        "Window:      {} to {}",
        output::date(a.start_date.as_ref()),
        output::date(a.end_date.as_ref())
    );
    let _ = writeln!(out, "{}", progress_line(charts::timeline_progress(a, Utc::now())));
    let torrent = match &detail.torrent {
        Some(t) => format!("{} seeders, {} leechers", t.swarm.seeders, t.swarm.leechers),
        None => "not tracked".into(),
    };
    let _ = writeln!(out, "Torrent:     {torrent}");

    heading(&mut out, "Link statistics");
    let _ = writeln!(out, "{}", output::render_table(&period_rows(&detail.statistics)));

    let bars = charts::platform_breakdown(detail);
    heading(&mut out, "Platforms");
    if bars.is_empty() {
        let _ = writeln!(out, "{NO_DATA_MESSAGE}");
    } else {
        let rows: Vec<PlatformRow> = bars.iter().map(PlatformRow::from).collect();
        let _ = writeln!(out, "{}", output::render_table(&rows));
    }

    out.trim_end().to_owned()
}

// ── Handler ─────────────────────────────────────────────────────────

async fn load_detail(
    dashboard: &Dashboard,
    id: u64,
    global: &GlobalOpts,
) -> Result<AssetDetail, CliError> {
    let spinner = util::spinner(global, "Loading asset...");
    let result = dashboard.assets().select_asset_by_id(id).await;
    spinner.finish_and_clear();
    result.map_err(|e| CliError::from_action(e, "Failed to fetch asset details"))?;

    let state = dashboard.assets().state();
    state
        .selected_detail()
        .or(state.asset_detail.as_ref())
        .cloned()
        .ok_or_else(|| CliError::NotFound {
            resource_type: "asset".into(),
            identifier: id.to_string(),
            list_command: "assets list".into(),
        })
}

pub async fn handle(
    dashboard: &Dashboard,
    args: AssetsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    dashboard.require_session()?;

    match args.command {
        AssetsCommand::List(paging) => {
            let spinner = util::spinner(global, "Loading assets...");
            let result = dashboard.assets().get_assets(paging.page, paging.limit).await;
            spinner.finish_and_clear();
            result.map_err(|e| CliError::from_action(e, "Failed to fetch assets"))?;

            let state = dashboard.assets().state();
            let out = output::render_list(
                global.output,
                &state.assets,
                |a| AssetRow::from(a),
                |a| a.id.to_string(),
            );
            output::print_output(&out, global.quiet);

            if global.output == OutputFormat::Table && !global.quiet {
                eprintln!("{}", page_footer(state.page_info()));
            }
            Ok(())
        }

        AssetsCommand::Show { id } => {
            let detail = load_detail(dashboard, id, global).await?;
            let out = output::render_single(global.output, &detail, render_detail, |d| {
                d.asset.id.to_string()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AssetsCommand::Charts {
            id,
            timeframe,
            geojson,
        } => {
            let detail = load_detail(dashboard, id, global).await?;

            if geojson {
                let points = charts::peer_points(&detail);
                let collection =
                    charts::peers_geojson(points.ready().map_or(&[][..], Vec::as_slice));
                output::print_output(&output::render_json_pretty(&collection), global.quiet);
                return Ok(());
            }

            let view = ChartsView::build(&detail, timeframe.into());
            let out = output::render_single(global.output, &view, render_charts, |v| {
                v.asset_id.to_string()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}

/// `Showing 11-20 of 42 · page 2/5: 1 2 3 ... 5`
fn page_footer(info: pirascope_core::PageInfo) -> String {
    let strip = page_numbers(info.page, info.total_pages)
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ");
    match info.showing_range() {
        Some((start, end)) => format!(
            "Showing {start}-{end} of {} · page {}/{}: {strip}",
            info.total, info.page, info.total_pages
        ),
        None => "No assets".into(),
    }
}

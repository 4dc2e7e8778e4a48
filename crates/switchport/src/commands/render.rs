//! `render`: normalize a snapshot into card descriptors.

use serde::Serialize;
use tabled::Tabled;

use switchport_core::normalize::format_mbps;
use switchport_core::{
    BatchContext, CardConfig, ColorScheme, DisplayDescriptor, SwitchSnapshot, SystemInfo,
    TrafficMode, aggregate_bandwidth, normalize_batch_with,
};

use crate::cli::{GlobalOpts, RenderArgs};
use crate::config;
use crate::error::CliError;
use crate::output;

use super::util;

// ── Report ──────────────────────────────────────────────────────────

/// Everything a card needs for one refresh.
#[derive(Debug, Serialize)]
struct CardReport {
    color_scheme: ColorScheme,
    traffic_mode: TrafficMode,
    total_ports: u32,
    copper: Vec<DisplayDescriptor>,
    sfp: Vec<DisplayDescriptor>,
    gauge: Gauge,
    #[serde(skip_serializing_if = "SystemInfo::is_empty")]
    system: SystemInfo,
}

/// Aggregate bandwidth gauge.
#[derive(Debug, Serialize)]
struct Gauge {
    /// Sum of live rx+tx across up ports.
    total_mbps: f64,
    formatted: String,
    /// The switch's own bandwidth sensor, normalized to Mbps.
    #[serde(skip_serializing_if = "Option::is_none")]
    sensor_mbps: Option<f64>,
}

fn build_report(snapshot: &SwitchSnapshot, card: &CardConfig, now: i64) -> CardReport {
    let (drawn, skipped): (Vec<_>, Vec<_>) = snapshot
        .ports
        .iter()
        .cloned()
        .partition(|port| port.index <= card.total_ports);
    if !skipped.is_empty() {
        tracing::warn!(
            skipped = skipped.len(),
            total_ports = card.total_ports,
            "snapshot has ports beyond the card layout"
        );
    }

    let ctx = BatchContext::from_batch(&drawn).at(now);
    let (sfp, copper): (Vec<_>, Vec<_>) = normalize_batch_with(&drawn, card, &ctx)
        .into_iter()
        .partition(|desc| card.is_sfp(desc.index));

    let total_mbps = aggregate_bandwidth(&drawn).to_mbps();

    CardReport {
        color_scheme: card.color_scheme,
        traffic_mode: card.traffic_mode,
        total_ports: card.total_ports,
        copper,
        sfp,
        gauge: Gauge {
            total_mbps,
            formatted: format_mbps(total_mbps),
            sensor_mbps: snapshot.bandwidth.map(|bw| bw.to_mbps()),
        },
        system: snapshot.system.clone(),
    }
}

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct PortRow {
    #[tabled(rename = "Port")]
    index: u32,
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Link")]
    link: String,
    #[tabled(rename = "Speed")]
    speed: String,
    #[tabled(rename = "Class")]
    class: String,
    #[tabled(rename = "Dir")]
    direction: String,
    #[tabled(rename = "Top")]
    top: String,
    #[tabled(rename = "Bottom")]
    bottom: String,
}

impl PortRow {
    fn new(d: &DisplayDescriptor, color: bool) -> Self {
        let [top, bottom] = d.rows.clone();
        Self {
            index: d.index,
            label: d.label.clone(),
            link: output::link_state(d.is_up, color),
            speed: d.speed_tier.to_string(),
            class: d.style_class.clone(),
            direction: d.direction.glyph().to_owned(),
            top,
            bottom,
        }
    }
}

fn detail(report: &CardReport, with_tooltips: bool, color: bool) -> String {
    let mut sections = Vec::new();

    for (title, ports) in [("Copper", &report.copper), ("SFP", &report.sfp)] {
        if ports.is_empty() {
            continue;
        }
        let rows: Vec<PortRow> = ports.iter().map(|d| PortRow::new(d, color)).collect();
        sections.push(format!(
            "{}\n{}",
            output::heading(title, color),
            output::render_table(&rows)
        ));
    }

    if with_tooltips {
        let tips: Vec<String> = report
            .copper
            .iter()
            .chain(&report.sfp)
            .filter(|d| !d.tooltip_lines.is_empty())
            .map(|d| d.tooltip_lines.join("\n  "))
            .collect();
        if !tips.is_empty() {
            sections.push(tips.join("\n"));
        }
    }

    let mut gauge = format!("Bandwidth: {}", report.gauge.formatted);
    if let Some(sensor) = report.gauge.sensor_mbps {
        gauge.push_str(&format!(" (sensor {})", format_mbps(sensor)));
    }
    sections.push(gauge);

    if !report.system.is_empty() {
        let system = report
            .system
            .fields()
            .iter()
            .map(|(name, value)| format!("{name:<10}{value}"))
            .collect::<Vec<_>>()
            .join("\n");
        sections.push(system);
    }

    sections.join("\n\n")
}

fn plain(report: &CardReport) -> String {
    report
        .copper
        .iter()
        .chain(&report.sfp)
        .map(|d| format!("{}\t{}\t{}\t{}", d.index, d.style_class, d.rows[0], d.rows[1]))
        .collect::<Vec<_>>()
        .join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: &RenderArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load(global)?;
    let card = config::resolve_card(&cfg, args)?;

    let raw = util::read_input(&args.snapshot)?;
    let snapshot = SwitchSnapshot::from_json_str(&raw)?;

    let report = build_report(&snapshot, &card, util::now_epoch_secs());
    tracing::info!(
        copper = report.copper.len(),
        sfp = report.sfp.len(),
        scheme = %report.color_scheme,
        "card rendered"
    );

    let color = output::should_color(&global.color);
    let out = output::render_single(
        &global.output,
        &report,
        |r| detail(r, args.tooltips, color),
        plain,
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn snapshot() -> SwitchSnapshot {
        SwitchSnapshot::from_json_value(json!({
            "ports": [
                {"index": 1, "status": "on", "speed": 1_000_000_000, "rx": 12_000_000, "tx": 850_000},
                {"index": 2, "status": "off", "speed": 1_000_000_000},
                {"index": 9, "status": "on", "speed": 10_000_000_000_u64, "rx": 4_000_000, "tx": 0},
                {"index": 12, "status": "on", "speed": 100_000_000}
            ],
            "bandwidth": {"value": 40, "unit": "Mbit/s"}
        }))
        .expect("valid snapshot")
    }

    #[test]
    fn splits_copper_and_sfp() {
        let card = CardConfig {
            total_ports: 10,
            sfp_start_port: Some(9),
            ..CardConfig::default()
        };
        let report = build_report(&snapshot(), &card, 0);

        let copper: Vec<u32> = report.copper.iter().map(|d| d.index).collect();
        let sfp: Vec<u32> = report.sfp.iter().map(|d| d.index).collect();
        assert_eq!(copper, vec![1, 2]);
        assert_eq!(sfp, vec![9]);
        assert_eq!(report.sfp[0].style_class, "speed-10g");
    }

    #[test]
    fn gauge_sums_up_ports() {
        let card = CardConfig {
            total_ports: 12,
            ..CardConfig::default()
        };
        let report = build_report(&snapshot(), &card, 0);
        assert!((report.gauge.total_mbps - 16.85).abs() < 1e-9);
        assert_eq!(report.gauge.sensor_mbps, Some(40.0));
        assert!(report.sfp.is_empty());
    }

    #[test]
    fn plain_lines_per_port() {
        let card = CardConfig {
            total_ports: 2,
            ..CardConfig::default()
        };
        let text = plain(&build_report(&snapshot(), &card, 0));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "1\tspeed-1g\t1G\t↓12M ↑850K");
        assert!(lines[1].starts_with("2\toff\t"));
    }

    #[test]
    fn table_has_sections_and_gauge() {
        let card = CardConfig {
            total_ports: 10,
            sfp_start_port: Some(9),
            ..CardConfig::default()
        };
        let text = detail(&build_report(&snapshot(), &card, 0), true, false);
        assert!(text.contains("Copper"));
        assert!(text.contains("SFP"));
        assert!(text.contains("Bandwidth: 16.9 Mbps (sensor 40.0 Mbps)"));
        assert!(text.contains("Status: Down"));
    }
}

//! Assembling the full display descriptor for a port.

use std::time::Duration;

use chrono::DateTime;

use crate::config::{CardConfig, RowContent, TrafficMode};
use crate::model::{DisplayDescriptor, PLACEHOLDER, PortRecord, SpeedTier, TrafficText};

use super::direction::classify_direction;
use super::scheme::{classify_by_color_scheme, traffic_max};
use super::speed::classify_speed_tier;
use super::traffic::format_traffic_bps;

/// Values shared by every port in one refresh pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchContext {
    /// Busiest combined live throughput in the batch.
    pub traffic_max: u64,
    /// Reference time for "ago" text in tooltips. None leaves it out.
    pub now_epoch_secs: Option<i64>,
}

impl BatchContext {
    /// One read-only pass over the batch.
    pub fn from_batch(records: &[PortRecord]) -> Self {
        Self {
            traffic_max: traffic_max(records),
            now_epoch_secs: None,
        }
    }

    pub fn at(mut self, now_epoch_secs: i64) -> Self {
        self.now_epoch_secs = Some(now_epoch_secs);
        self
    }
}

/// Describe every port in a batch.
///
/// Output order follows input order. Records are independent apart from
/// the heatmap maximum, which is computed here for this batch only.
pub fn normalize_batch(records: &[PortRecord], config: &CardConfig) -> Vec<DisplayDescriptor> {
    let ctx = BatchContext::from_batch(records);
    normalize_batch_with(records, config, &ctx)
}

/// [`normalize_batch`] with an explicit context (e.g. to set a reference time).
pub fn normalize_batch_with(
    records: &[PortRecord],
    config: &CardConfig,
    ctx: &BatchContext,
) -> Vec<DisplayDescriptor> {
    let described: Vec<_> = records
        .iter()
        .map(|record| describe_port(record, config, ctx))
        .collect();
    tracing::debug!(
        ports = described.len(),
        traffic_max = ctx.traffic_max,
        scheme = %config.color_scheme,
        "normalized port batch"
    );
    described
}

/// Describe a single port.
pub fn describe_port(
    record: &PortRecord,
    config: &CardConfig,
    ctx: &BatchContext,
) -> DisplayDescriptor {
    let speed_tier = classify_speed_tier(record.speed_bps, record.is_up);
    let (rx_live, tx_live) = record.effective_live();
    let (rx_life, tx_life) = record.effective_lifetime();

    let formatted_traffic = TrafficText {
        rx: format_traffic_bps(rx_live),
        tx: format_traffic_bps(tx_live),
    };
    let formatted_lifetime = TrafficText {
        rx: format_traffic_bps(rx_life),
        tx: format_traffic_bps(tx_life),
    };

    let shown = match config.traffic_mode {
        TrafficMode::Live => &formatted_traffic,
        TrafficMode::Lifetime => &formatted_lifetime,
    };

    let top = row_text(config.top_row, record, speed_tier, shown);
    let bottom = if config.compact {
        PLACEHOLDER.to_owned()
    } else {
        row_text(config.bottom_row, record, speed_tier, shown)
    };

    let tooltip_lines = if config.show_tooltips {
        tooltip_lines(record, speed_tier, &formatted_traffic, &formatted_lifetime, ctx)
    } else {
        Vec::new()
    };

    DisplayDescriptor {
        index: record.index,
        label: record.display_label(),
        is_up: record.is_up,
        speed_tier,
        style_class: classify_by_color_scheme(record, config.color_scheme, ctx.traffic_max),
        direction: classify_direction(rx_live, tx_live, record.is_up),
        formatted_traffic,
        formatted_lifetime,
        rows: [top, bottom],
        tooltip_lines,
    }
}

fn row_text(
    content: RowContent,
    record: &PortRecord,
    tier: SpeedTier,
    traffic: &TrafficText,
) -> String {
    match content {
        RowContent::Speed if !tier.is_off() => tier.label(),
        RowContent::Traffic if record.is_up => traffic.to_string(),
        RowContent::Vlan => record
            .vlan_id
            .map_or_else(|| PLACEHOLDER.to_owned(), |id| format!("V{id}")),
        RowContent::Name => match record.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_owned(),
            _ => PLACEHOLDER.to_owned(),
        },
        RowContent::Poe if record.poe_enabled == Some(true) => "PoE".into(),
        RowContent::Direction => {
            classify_direction(record.rx_live_bps, record.tx_live_bps, record.is_up)
                .glyph()
                .to_owned()
        }
        RowContent::Speed | RowContent::Traffic | RowContent::Poe | RowContent::None => {
            PLACEHOLDER.to_owned()
        }
    }
}

fn tooltip_lines(
    record: &PortRecord,
    tier: SpeedTier,
    live: &TrafficText,
    lifetime: &TrafficText,
    ctx: &BatchContext,
) -> Vec<String> {
    let mut lines = Vec::with_capacity(8);

    lines.push(match record.name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => format!("Port {}: {name}", record.index),
        _ => format!("Port {}", record.index),
    });
    lines.push(format!(
        "Status: {}",
        if record.is_up { "Up" } else { "Down" }
    ));
    lines.push(format!("Speed: {tier}"));
    lines.push(format!("Live: {live}"));
    lines.push(format!("Lifetime: {lifetime}"));

    if let Some(vlan) = record.vlan_id {
        lines.push(format!("VLAN: {vlan}"));
    }

    if let Some(enabled) = record.poe_enabled {
        let state = if enabled { "On" } else { "Off" };
        match record.poe_power.as_deref().map(str::trim) {
            Some(power) if !power.is_empty() => lines.push(format!("PoE: {state} ({power})")),
            _ => lines.push(format!("PoE: {state}")),
        }
    }

    if let Some(line) = record
        .last_changed_epoch_secs
        .and_then(|ts| last_change_line(ts, ctx.now_epoch_secs))
    {
        lines.push(line);
    }

    lines
}

fn last_change_line(changed: i64, now: Option<i64>) -> Option<String> {
    let when = DateTime::from_timestamp(changed, 0)?;
    let stamp = when.format("%Y-%m-%d %H:%M:%S UTC");

    let ago = now
        .and_then(|now| u64::try_from(now.checked_sub(changed)?).ok())
        .map(|secs| humantime::format_duration(Duration::from_secs(secs)).to_string());

    Some(match ago {
        Some(ago) => format!("Last change: {stamp} ({ago} ago)"),
        None => format!("Last change: {stamp}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ColorScheme;
    use crate::model::Direction;
    use pretty_assertions::assert_eq;

    fn uplink() -> PortRecord {
        let mut port = PortRecord::new(1, true, 1_000_000_000)
            .with_live(12_000_000, 850_000)
            .with_lifetime(3_400_000, 1_200_000)
            .with_name("Uplink")
            .with_vlan(10)
            .with_poe(true);
        port.poe_power = Some("4.2 W".into());
        port.last_changed_epoch_secs = Some(1_700_000_000);
        port
    }

    #[test]
    fn describes_a_busy_uplink() {
        let desc = describe_port(&uplink(), &CardConfig::default(), &BatchContext::default());

        assert_eq!(desc.label, "Uplink");
        assert_eq!(desc.speed_tier, SpeedTier::OneG);
        assert_eq!(desc.style_class, "speed-1g");
        assert_eq!(desc.direction, Direction::Down);
        assert_eq!(desc.formatted_traffic.rx, "12M");
        assert_eq!(desc.formatted_traffic.tx, "850K");
        assert_eq!(desc.rows, ["1G".to_string(), "↓12M ↑850K".to_string()]);
    }

    #[test]
    fn tooltip_lines_are_ordered() {
        let ctx = BatchContext::default().at(1_700_003_600);
        let desc = describe_port(&uplink(), &CardConfig::default(), &ctx);
        insta::assert_snapshot!(desc.tooltip_lines.join("\n"), @r"
        Port 1: Uplink
        Status: Up
        Speed: 1G
        Live: ↓12M ↑850K
        Lifetime: ↓3M ↑1M
        VLAN: 10
        PoE: On (4.2 W)
        Last change: 2023-11-14 22:13:20 UTC (1h ago)
        ");
    }

    #[test]
    fn down_port_renders_placeholders() {
        let port = PortRecord::new(5, false, 1_000_000_000).with_live(9_000, 9_000);
        let desc = describe_port(&port, &CardConfig::default(), &BatchContext::default());

        assert_eq!(desc.speed_tier, SpeedTier::Off);
        assert_eq!(desc.style_class, "off");
        assert_eq!(desc.direction, Direction::None);
        assert_eq!(desc.formatted_traffic.rx, "0K");
        assert_eq!(desc.rows, [PLACEHOLDER.to_string(), PLACEHOLDER.to_string()]);
        assert_eq!(desc.tooltip_lines[1], "Status: Down");
    }

    #[test]
    fn row_selection_and_compact_mode() {
        let config = CardConfig {
            top_row: RowContent::Vlan,
            bottom_row: RowContent::Poe,
            ..CardConfig::default()
        };
        let desc = describe_port(&uplink(), &config, &BatchContext::default());
        assert_eq!(desc.rows, ["V10".to_string(), "PoE".to_string()]);

        let compact = CardConfig {
            compact: true,
            ..config
        };
        let desc = describe_port(&uplink(), &compact, &BatchContext::default());
        assert_eq!(desc.rows[1], PLACEHOLDER);
    }

    #[test]
    fn lifetime_mode_swaps_badge_traffic() {
        let config = CardConfig {
            traffic_mode: TrafficMode::Lifetime,
            ..CardConfig::default()
        };
        let desc = describe_port(&uplink(), &config, &BatchContext::default());
        assert_eq!(desc.rows[1], "↓3M ↑1M");
    }

    #[test]
    fn tooltips_can_be_disabled() {
        let config = CardConfig {
            show_tooltips: false,
            ..CardConfig::default()
        };
        let desc = describe_port(&uplink(), &config, &BatchContext::default());
        assert!(desc.tooltip_lines.is_empty());
    }

    #[test]
    fn describing_twice_is_identical() {
        let batch = vec![uplink(), PortRecord::new(2, true, 100_000_000).with_live(1, 2)];
        let config = CardConfig::default().with_scheme(ColorScheme::Heatmap);
        let first = normalize_batch(&batch, &config);
        let second = normalize_batch(&batch, &config);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).expect("serializable"),
            serde_json::to_string(&second).expect("serializable")
        );
    }

    #[test]
    fn heatmap_max_is_per_batch() {
        let config = CardConfig::default().with_scheme(ColorScheme::Heatmap);
        let quiet = PortRecord::new(2, true, 1_000_000_000).with_live(100, 0);

        let alone = normalize_batch(std::slice::from_ref(&quiet), &config);
        assert_eq!(alone[0].style_class, "heatmap-10");

        let crowded = normalize_batch(&[quiet, uplink()], &config);
        assert_eq!(crowded[0].style_class, "heatmap-1");
        assert_eq!(crowded[1].style_class, "heatmap-10");
    }

    #[test]
    fn future_change_time_omits_ago() {
        assert_eq!(
            last_change_line(100, Some(50)).as_deref(),
            Some("Last change: 1970-01-01 00:01:40 UTC")
        );
    }
}

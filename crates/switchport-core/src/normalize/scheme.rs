//! Per-scheme style classes.

use crate::config::ColorScheme;
use crate::model::PortRecord;

use super::speed::classify_speed_tier;

/// Style class for a down port under load-based schemes.
pub const OFF_CLASS: &str = "off";

/// Style class for a port without a VLAN under the vlan scheme.
pub const VLAN_NEUTRAL_CLASS: &str = "vlan-none";

/// Neutral color for ports without a VLAN.
pub const VLAN_NEUTRAL_COLOR: &str = "#9e9e9e";

/// Fixed VLAN palette; index is `vlan_id % VLAN_PALETTE.len()`.
pub const VLAN_PALETTE: [&str; 20] = [
    "#e53935", "#1e88e5", "#43a047", "#fdd835", "#8e24aa", "#fb8c00", "#00acc1", "#d81b60",
    "#7cb342", "#3949ab", "#f4511e", "#00897b", "#c0ca33", "#5e35b1", "#ffb300", "#039be5",
    "#6d4c41", "#546e7a", "#ec407a", "#26a69a",
];

/// Number of heatmap bands.
pub const HEATMAP_BANDS: u8 = 10;

/// Measured-throughput ladder for the actual-speed scheme, highest first.
const ACTUAL_SPEED_LADDER: [(u64, &str); 4] = [
    (100_000_000, "actual-100m"),
    (10_000_000, "actual-10m"),
    (1_000_000, "actual-1m"),
    (100_000, "actual-100k"),
];

const ACTUAL_SPEED_IDLE: &str = "actual-idle";

/// Largest combined live throughput in a batch.
///
/// The heatmap scheme needs this before any single port can be classified.
/// Compute it fresh for every batch.
pub fn traffic_max(records: &[PortRecord]) -> u64 {
    records
        .iter()
        .map(PortRecord::combined_live_bps)
        .max()
        .unwrap_or(0)
}

/// Style class for one port under the given scheme.
pub fn classify_by_color_scheme(record: &PortRecord, scheme: ColorScheme, traffic_max: u64) -> String {
    match scheme {
        ColorScheme::Speed => classify_speed_tier(record.speed_bps, record.is_up).style_class(),
        // a down port carries no live traffic, so it sits in the lowest band
        ColorScheme::Heatmap => {
            format!("heatmap-{}", heatmap_band(record.combined_live_bps(), traffic_max))
        }
        ColorScheme::Vlan => vlan_class(record.vlan_id),
        ColorScheme::ActualSpeed if record.is_up => {
            actual_speed_class(record.combined_live_bps()).to_owned()
        }
        ColorScheme::ActualSpeed => OFF_CLASS.to_owned(),
    }
}

/// Heatmap band 1..=10 for a port's share of the batch maximum.
///
/// Band `k` covers ratios above `(k - 1) / 10`, checked from the top, so
/// the busiest port always lands in band 10 and everything at or below
/// 0.1 lands in band 1.
#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
pub fn heatmap_band(combined_bps: u64, traffic_max: u64) -> u8 {
    let ratio = combined_bps as f64 / traffic_max.max(1) as f64;
    (2..=HEATMAP_BANDS)
        .rev()
        .find(|band| ratio > f64::from(band - 1) / f64::from(HEATMAP_BANDS))
        .unwrap_or(1)
}

/// Palette slot for a VLAN id.
#[allow(clippy::cast_possible_truncation, clippy::as_conversions)]
pub fn vlan_palette_index(vlan_id: u32) -> usize {
    (vlan_id % VLAN_PALETTE.len() as u32) as usize
}

pub fn vlan_class(vlan_id: Option<u32>) -> String {
    vlan_id.map_or_else(
        || VLAN_NEUTRAL_CLASS.to_owned(),
        |id| format!("vlan-{}", vlan_palette_index(id)),
    )
}

pub fn vlan_color(vlan_id: Option<u32>) -> &'static str {
    vlan_id
        .and_then(|id| VLAN_PALETTE.get(vlan_palette_index(id)).copied())
        .unwrap_or(VLAN_NEUTRAL_COLOR)
}

/// Class for measured throughput against the 100/10/1/0.1 Mbps ladder.
pub fn actual_speed_class(combined_bps: u64) -> &'static str {
    ACTUAL_SPEED_LADDER
        .iter()
        .find(|(threshold, _)| combined_bps >= *threshold)
        .map_or(ACTUAL_SPEED_IDLE, |(_, class)| *class)
}

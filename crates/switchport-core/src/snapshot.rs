// ── Host snapshot intake ──
//
// Turns the entity store's attribute bags into typed records. Attribute
// values arrive as whatever the host happened to store: numbers, numeric
// strings, "on"/"off", null. Every conversion here is lenient. A bad value
// is clamped or defaulted and logged; it never fails the snapshot.

use std::collections::BTreeSet;

use chrono::DateTime;
use serde::Deserialize;
use serde_json::Value;

use crate::error::CoreError;
use crate::model::{BandwidthReading, PortRecord, SystemInfo};

/// Typed view of one refresh from the entity store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SwitchSnapshot {
    /// Ports ordered by index, duplicates removed.
    pub ports: Vec<PortRecord>,
    /// Aggregate bandwidth sensor, if the host exposes one.
    pub bandwidth: Option<BandwidthReading>,
    pub system: SystemInfo,
}

impl SwitchSnapshot {
    pub fn from_json_str(raw: &str) -> Result<Self, CoreError> {
        let doc: RawSnapshot = serde_json::from_str(raw)?;
        Ok(doc.into())
    }

    pub fn from_json_value(raw: Value) -> Result<Self, CoreError> {
        let doc: RawSnapshot = serde_json::from_value(raw)?;
        Ok(doc.into())
    }

    pub fn is_empty(&self) -> bool {
        self.ports.is_empty()
    }
}

// ── Raw document shapes ─────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
struct RawSnapshot {
    #[serde(default)]
    ports: Vec<RawPort>,
    #[serde(default)]
    bandwidth: Option<RawBandwidth>,
    #[serde(default)]
    system: RawSystem,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawPort {
    #[serde(alias = "port")]
    index: Value,
    #[serde(alias = "state")]
    status: Value,
    speed: Value,
    #[serde(alias = "rx_live")]
    rx: Value,
    #[serde(alias = "tx_live")]
    tx: Value,
    rx_lifetime: Value,
    tx_lifetime: Value,
    name: Value,
    #[serde(alias = "vlan_id")]
    vlan: Value,
    #[serde(alias = "poe_enabled")]
    poe: Value,
    poe_power: Value,
    last_changed: Value,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawBandwidth {
    value: Value,
    unit: Value,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSystem {
    hostname: Value,
    firmware: Value,
    uptime: Value,
    cpu: Value,
    memory: Value,
    poe_total: Value,
}

// ── Conversions ─────────────────────────────────────────────────────

impl From<RawSnapshot> for SwitchSnapshot {
    fn from(raw: RawSnapshot) -> Self {
        let mut seen = BTreeSet::new();
        let mut ports: Vec<PortRecord> = raw
            .ports
            .iter()
            .enumerate()
            .filter_map(|(position, port)| port_record(position, port))
            .filter(|port| {
                let fresh = seen.insert(port.index);
                if !fresh {
                    tracing::warn!(index = port.index, "duplicate port in snapshot, keeping first");
                }
                fresh
            })
            .collect();
        ports.sort_by_key(|p| p.index);

        let bandwidth = raw.bandwidth.map(|bw| {
            let unit = text(&bw.unit).unwrap_or_default();
            BandwidthReading::from_label(number(&bw.value).unwrap_or(0.0), &unit)
        });

        Self {
            ports,
            bandwidth,
            system: SystemInfo {
                hostname: text(&raw.system.hostname),
                firmware: text(&raw.system.firmware),
                uptime: text(&raw.system.uptime),
                cpu: text(&raw.system.cpu),
                memory: text(&raw.system.memory),
                poe_total: text(&raw.system.poe_total),
            },
        }
    }
}

/// Build a record, or drop it if its index can't be displayed.
///
/// A missing index falls back to list position + 1.
fn port_record(position: usize, raw: &RawPort) -> Option<PortRecord> {
    let index = if raw.index.is_null() {
        u32::try_from(position + 1).ok()?
    } else {
        match number(&raw.index) {
            Some(n) if n >= 1.0 && n <= f64::from(u32::MAX) => clamp_u32(n),
            _ => {
                tracing::warn!(position, index = %raw.index, "dropping port with invalid index");
                return None;
            }
        }
    };

    Some(PortRecord {
        index,
        is_up: link_up(&raw.status),
        speed_bps: rate(&raw.speed, index, "speed"),
        rx_live_bps: rate(&raw.rx, index, "rx"),
        tx_live_bps: rate(&raw.tx, index, "tx"),
        rx_lifetime_bps: rate(&raw.rx_lifetime, index, "rx_lifetime"),
        tx_lifetime_bps: rate(&raw.tx_lifetime, index, "tx_lifetime"),
        name: text(&raw.name),
        vlan_id: number(&raw.vlan)
            .filter(|n| *n >= 0.0 && *n <= f64::from(u32::MAX))
            .map(clamp_u32),
        poe_enabled: flag(&raw.poe),
        poe_power: text(&raw.poe_power),
        last_changed_epoch_secs: timestamp(&raw.last_changed),
    })
}

/// Numeric view of an attribute: JSON numbers and numeric strings.
fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Non-negative bit rate; anything else becomes 0.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::as_conversions
)]
fn rate(value: &Value, index: u32, field: &str) -> u64 {
    if value.is_null() {
        return 0;
    }
    match number(value) {
        Some(n) if n.is_finite() && n > 0.0 => n.round() as u64,
        Some(n) if n == 0.0 => 0,
        _ => {
            tracing::debug!(index, field, value = %value, "clamping unusable rate to zero");
            0
        }
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::as_conversions
)]
fn clamp_u32(n: f64) -> u32 {
    n.round().clamp(0.0, f64::from(u32::MAX)) as u32
}

/// Link state from the shapes hosts use: bools, "on"/"off", "up"/"down",
/// and ifOperStatus codes (1 = up).
fn link_up(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_i64() == Some(1),
        Value::String(s) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "on" | "up" | "true" | "1" | "connected"
        ),
        _ => false,
    }
}

/// Optional boolean; unknown shapes are treated as absent.
fn flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_i64().map(|n| n != 0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "on" | "true" | "yes" | "enabled" | "1" => Some(true),
            "off" | "false" | "no" | "disabled" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Pass-through display text; numbers are stringified, blanks dropped.
fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_owned()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Epoch seconds from a number, a numeric string, or an RFC 3339 string.
#[allow(clippy::cast_possible_truncation, clippy::as_conversions)]
fn timestamp(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.timestamp()))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BandwidthUnit;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn lenient_attribute_shapes() {
        let snap = SwitchSnapshot::from_json_value(json!({
            "ports": [
                {"index": "2", "status": "on", "speed": "1000000000", "rx": 1500.4, "tx": "12",
                 "name": "  NAS ", "vlan": "20", "poe": "off", "last_changed": "2024-01-01T00:00:00Z"},
                {"index": 1, "state": 1, "speed": 100000000, "rx_live": -5, "tx_live": null,
                 "vlan_id": -3, "poe_enabled": true, "poe_power": 3.5}
            ]
        }))
        .expect("valid document");

        assert_eq!(snap.ports.len(), 2);
        let first = &snap.ports[0];
        assert_eq!(first.index, 1);
        assert!(first.is_up);
        assert_eq!(first.rx_live_bps, 0);
        assert_eq!(first.tx_live_bps, 0);
        assert_eq!(first.vlan_id, None);
        assert_eq!(first.poe_enabled, Some(true));
        assert_eq!(first.poe_power.as_deref(), Some("3.5"));

        let second = &snap.ports[1];
        assert_eq!(second.index, 2);
        assert_eq!(second.speed_bps, 1_000_000_000);
        assert_eq!(second.rx_live_bps, 1500);
        assert_eq!(second.tx_live_bps, 12);
        assert_eq!(second.name.as_deref(), Some("NAS"));
        assert_eq!(second.vlan_id, Some(20));
        assert_eq!(second.poe_enabled, Some(false));
        assert_eq!(second.last_changed_epoch_secs, Some(1_704_067_200));
    }

    #[test]
    fn status_shapes() {
        assert!(link_up(&json!(true)));
        assert!(link_up(&json!("UP")));
        assert!(link_up(&json!(1)));
        assert!(!link_up(&json!(2)));
        assert!(!link_up(&json!("off")));
        assert!(!link_up(&Value::Null));
    }

    #[test]
    fn invalid_index_is_dropped_missing_index_uses_position() {
        let snap = SwitchSnapshot::from_json_value(json!({
            "ports": [{"status": "on"}, {"index": 0}, {"index": -4}, {}]
        }))
        .expect("valid document");
        let indexes: Vec<u32> = snap.ports.iter().map(|p| p.index).collect();
        assert_eq!(indexes, vec![1, 4]);
    }

    #[test]
    fn duplicate_index_keeps_first() {
        let snap = SwitchSnapshot::from_json_value(json!({
            "ports": [{"index": 3, "name": "a"}, {"index": 3, "name": "b"}]
        }))
        .expect("valid document");
        assert_eq!(snap.ports.len(), 1);
        assert_eq!(snap.ports[0].name.as_deref(), Some("a"));
    }

    #[test]
    fn bandwidth_and_system() {
        let snap = SwitchSnapshot::from_json_value(json!({
            "bandwidth": {"value": "1500", "unit": "Mbit/s"},
            "system": {"hostname": "core-sw", "uptime": 123456, "cpu": ""}
        }))
        .expect("valid document");

        let bw = snap.bandwidth.expect("bandwidth present");
        assert_eq!(bw.unit, BandwidthUnit::Mbps);
        assert!((bw.to_mbps() - 1.5).abs() < 1e-9);
        assert_eq!(snap.system.hostname.as_deref(), Some("core-sw"));
        assert_eq!(snap.system.uptime.as_deref(), Some("123456"));
        assert_eq!(snap.system.cpu, None);
        assert!(snap.is_empty());
    }

    #[test]
    fn malformed_document_is_an_error() {
        assert!(SwitchSnapshot::from_json_str("{not json").is_err());
        assert!(SwitchSnapshot::from_json_str(r#"{"ports": 5}"#).is_err());
    }
}

// ── SNMP interface tables ──
//
// The polling integration walks the IF-MIB tables and hands back raw
// `{oid: value}` maps. This module turns those into port records: parse
// the ifIndex suffix, derive live rates from counter deltas (with
// wraparound), and derive the lifetime average from counters and uptime.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::model::PortRecord;

/// Well-known OIDs polled by default.
pub mod oids {
    /// ifInOctets (32-bit).
    pub const IF_IN_OCTETS: &str = "1.3.6.1.2.1.2.2.1.10";
    /// ifOutOctets (32-bit).
    pub const IF_OUT_OCTETS: &str = "1.3.6.1.2.1.2.2.1.16";
    /// ifOperStatus (1 = up, 2 = down).
    pub const IF_OPER_STATUS: &str = "1.3.6.1.2.1.2.2.1.8";
    /// ifSpeed, bits per second.
    pub const IF_SPEED: &str = "1.3.6.1.2.1.2.2.1.5";
    /// ifHighSpeed, Mbps.
    pub const IF_HIGH_SPEED: &str = "1.3.6.1.2.1.31.1.1.1.15";
    /// ifAlias.
    pub const IF_ALIAS: &str = "1.3.6.1.2.1.31.1.1.1.18";
    /// ifDescr.
    pub const IF_DESCR: &str = "1.3.6.1.2.1.2.2.1.2";
    /// ifType.
    pub const IF_TYPE: &str = "1.3.6.1.2.1.2.2.1.3";
    /// sysDescr.0
    pub const SYS_DESCR: &str = "1.3.6.1.2.1.1.1.0";
    /// sysName.0
    pub const SYS_NAME: &str = "1.3.6.1.2.1.1.5.0";
    /// sysUpTime.0
    pub const SYS_UPTIME: &str = "1.3.6.1.2.1.1.3.0";
}

/// ifOperStatus value meaning "up".
const OPER_STATUS_UP: i64 = 1;

/// Ports monitored when the user hasn't picked any.
pub fn default_ports() -> Vec<u32> {
    (1..=8).collect()
}

/// Width of an octet counter, for wraparound.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CounterWidth {
    #[default]
    Bits32,
    Bits64,
}

/// Octets counted between two samples of a monotonically increasing counter.
///
/// A smaller current value means the counter wrapped once. For a 32-bit
/// counter a previous value that doesn't fit in 32 bits can't be a wrap,
/// so it's treated as a reset and the current value is the delta.
pub fn counter_delta(previous: u64, current: u64, width: CounterWidth) -> u64 {
    if current >= previous {
        return current - previous;
    }
    match width {
        CounterWidth::Bits64 => current.wrapping_sub(previous),
        CounterWidth::Bits32 => (1_u64 << 32)
            .checked_sub(previous)
            .map_or(current, |rest| rest + current),
    }
}

/// Bits per second between two octet counter samples.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::as_conversions
)]
pub fn counter_rate_bps(
    previous: u64,
    current: u64,
    elapsed: Duration,
    width: CounterWidth,
) -> u64 {
    let secs = elapsed.as_secs_f64();
    if secs <= 0.0 {
        return 0;
    }
    let bits = counter_delta(previous, current, width).saturating_mul(8);
    (bits as f64 / secs).round() as u64
}

/// Long-run average rate: total octets over device uptime.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::as_conversions
)]
pub fn lifetime_rate_bps(octets: u64, uptime: Duration) -> u64 {
    let secs = uptime.as_secs_f64();
    if secs <= 0.0 {
        return 0;
    }
    (octets.saturating_mul(8) as f64 / secs).round() as u64
}

/// ifIndex → integer value, from the last OID component.
///
/// Rows whose suffix or value don't parse are skipped.
pub fn parse_index_table(raw: &BTreeMap<String, String>) -> BTreeMap<u32, i64> {
    raw.iter()
        .filter_map(|(oid, value)| {
            let index = if_index(oid)?;
            match value.trim().parse::<i64>() {
                Ok(v) => Some((index, v)),
                Err(_) => {
                    tracing::debug!(oid = %oid, value = %value, "skipping non-numeric table row");
                    None
                }
            }
        })
        .collect()
}

/// ifIndex → text value (ifAlias, ifDescr).
pub fn parse_text_table(raw: &BTreeMap<String, String>) -> BTreeMap<u32, String> {
    raw.iter()
        .filter_map(|(oid, value)| Some((if_index(oid)?, value.trim().trim_matches('"').to_owned())))
        .collect()
}

fn if_index(oid: &str) -> Option<u32> {
    oid.rsplit('.').next()?.parse().ok()
}

/// Raw walk results, keyed by table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterfaceWalks {
    pub rx_octets: BTreeMap<String, String>,
    pub tx_octets: BTreeMap<String, String>,
    pub oper_status: BTreeMap<String, String>,
    pub speed: BTreeMap<String, String>,
    pub high_speed: BTreeMap<String, String>,
    pub alias: BTreeMap<String, String>,
}

/// Parsed interface tables keyed by ifIndex.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterfaceTables {
    pub rx_octets: BTreeMap<u32, i64>,
    pub tx_octets: BTreeMap<u32, i64>,
    pub oper_status: BTreeMap<u32, i64>,
    pub speed: BTreeMap<u32, i64>,
    pub high_speed: BTreeMap<u32, i64>,
    pub alias: BTreeMap<u32, String>,
}

impl InterfaceTables {
    pub fn from_walks(walks: &InterfaceWalks) -> Self {
        Self {
            rx_octets: parse_index_table(&walks.rx_octets),
            tx_octets: parse_index_table(&walks.tx_octets),
            oper_status: parse_index_table(&walks.oper_status),
            speed: parse_index_table(&walks.speed),
            high_speed: parse_index_table(&walks.high_speed),
            alias: parse_text_table(&walks.alias),
        }
    }

    /// Counter values to keep for the next refresh.
    pub fn sample(&self) -> CounterSample {
        CounterSample {
            rx_octets: unsigned(&self.rx_octets),
            tx_octets: unsigned(&self.tx_octets),
        }
    }

    /// Link speed in bps; ifHighSpeed (Mbps) wins when present and nonzero.
    fn speed_bps(&self, index: u32) -> u64 {
        let high = self
            .high_speed
            .get(&index)
            .and_then(|mbps| u64::try_from(*mbps).ok())
            .filter(|mbps| *mbps > 0);
        match high {
            Some(mbps) => mbps.saturating_mul(1_000_000),
            None => self
                .speed
                .get(&index)
                .and_then(|bps| u64::try_from(*bps).ok())
                .unwrap_or(0),
        }
    }
}

fn unsigned(table: &BTreeMap<u32, i64>) -> BTreeMap<u32, u64> {
    table
        .iter()
        .map(|(index, value)| (*index, u64::try_from(*value).unwrap_or(0)))
        .collect()
}

/// Octet counters from the previous refresh.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterSample {
    pub rx_octets: BTreeMap<u32, u64>,
    pub tx_octets: BTreeMap<u32, u64>,
}

/// Options for [`build_port_records`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RateInputs<'a> {
    /// Previous counters and the time since they were taken.
    pub previous: Option<(&'a CounterSample, Duration)>,
    /// Device uptime, for the lifetime average.
    pub uptime: Option<Duration>,
    pub width: CounterWidth,
}

/// Port records for the monitored ports.
///
/// A port missing from the status table is down. Without a previous
/// sample there is no live rate yet, so live traffic is zero.
pub fn build_port_records(
    tables: &InterfaceTables,
    ports: &[u32],
    inputs: RateInputs<'_>,
) -> Vec<PortRecord> {
    let current = tables.sample();

    ports
        .iter()
        .filter(|index| **index >= 1)
        .map(|&index| {
            let is_up = tables.oper_status.get(&index) == Some(&OPER_STATUS_UP);
            let rx_now = current.rx_octets.get(&index).copied().unwrap_or(0);
            let tx_now = current.tx_octets.get(&index).copied().unwrap_or(0);

            let (rx_live, tx_live) = inputs.previous.map_or((0, 0), |(prev, elapsed)| {
                let live = |prev_table: &BTreeMap<u32, u64>, now: u64| {
                    prev_table
                        .get(&index)
                        .map_or(0, |before| counter_rate_bps(*before, now, elapsed, inputs.width))
                };
                (live(&prev.rx_octets, rx_now), live(&prev.tx_octets, tx_now))
            });

            let (rx_life, tx_life) = inputs.uptime.map_or((0, 0), |uptime| {
                (lifetime_rate_bps(rx_now, uptime), lifetime_rate_bps(tx_now, uptime))
            });

            let mut record = PortRecord::new(index, is_up, tables.speed_bps(index))
                .with_live(rx_live, tx_live)
                .with_lifetime(rx_life, tx_life);
            record.name = tables
                .alias
                .get(&index)
                .filter(|alias| !alias.is_empty())
                .cloned();
            record
        })
        .collect()
}

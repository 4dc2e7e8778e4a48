// ── Port domain types ──

use serde::{Deserialize, Serialize};

/// Raw state of one switch port, as handed over by the entity store.
///
/// Bit rates are unsigned: negative or non-numeric readings are clamped to
/// zero by the intake layer before a record is built. When the link is
/// down, the `effective_*` accessors report zero regardless of what the
/// poller last saw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortRecord {
    /// 1-based port number.
    pub index: u32,
    pub is_up: bool,
    /// Negotiated link speed in bits per second.
    pub speed_bps: u64,

    // Instantaneous throughput
    pub rx_live_bps: u64,
    pub tx_live_bps: u64,

    // Counter-derived long-run average
    pub rx_lifetime_bps: u64,
    pub tx_lifetime_bps: u64,

    pub name: Option<String>,
    pub vlan_id: Option<u32>,
    pub poe_enabled: Option<bool>,
    /// PoE draw as reported by the switch. Display only, never parsed.
    pub poe_power: Option<String>,
    pub last_changed_epoch_secs: Option<i64>,
}

impl PortRecord {
    /// A port that is up with no traffic and no optional metadata.
    ///
    /// `index` is raised to 1 if given as 0.
    pub fn new(index: u32, is_up: bool, speed_bps: u64) -> Self {
        Self {
            index: index.max(1),
            is_up,
            speed_bps,
            rx_live_bps: 0,
            tx_live_bps: 0,
            rx_lifetime_bps: 0,
            tx_lifetime_bps: 0,
            name: None,
            vlan_id: None,
            poe_enabled: None,
            poe_power: None,
            last_changed_epoch_secs: None,
        }
    }

    pub fn with_live(mut self, rx_bps: u64, tx_bps: u64) -> Self {
        self.rx_live_bps = rx_bps;
        self.tx_live_bps = tx_bps;
        self
    }

    pub fn with_lifetime(mut self, rx_bps: u64, tx_bps: u64) -> Self {
        self.rx_lifetime_bps = rx_bps;
        self.tx_lifetime_bps = tx_bps;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_vlan(mut self, vlan_id: u32) -> Self {
        self.vlan_id = Some(vlan_id);
        self
    }

    pub fn with_poe(mut self, enabled: bool) -> Self {
        self.poe_enabled = Some(enabled);
        self
    }

    pub fn effective_speed_bps(&self) -> u64 {
        if self.is_up { self.speed_bps } else { 0 }
    }

    /// Live `(rx, tx)`, zeroed for a down link.
    pub fn effective_live(&self) -> (u64, u64) {
        if self.is_up {
            (self.rx_live_bps, self.tx_live_bps)
        } else {
            (0, 0)
        }
    }

    /// Lifetime `(rx, tx)`, zeroed for a down link.
    pub fn effective_lifetime(&self) -> (u64, u64) {
        if self.is_up {
            (self.rx_lifetime_bps, self.tx_lifetime_bps)
        } else {
            (0, 0)
        }
    }

    /// Combined live throughput used by the heatmap scheme.
    pub fn combined_live_bps(&self) -> u64 {
        let (rx, tx) = self.effective_live();
        rx.saturating_add(tx)
    }

    /// Name if set and non-blank, otherwise "Port N".
    pub fn display_label(&self) -> String {
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_owned(),
            _ => format!("Port {}", self.index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn down_port_reports_zero_everywhere() {
        let port = PortRecord::new(3, false, 1_000_000_000)
            .with_live(5_000, 7_000)
            .with_lifetime(100, 200);
        assert_eq!(port.effective_speed_bps(), 0);
        assert_eq!(port.effective_live(), (0, 0));
        assert_eq!(port.effective_lifetime(), (0, 0));
        assert_eq!(port.combined_live_bps(), 0);
    }

    #[test]
    fn zero_index_is_raised_to_one() {
        assert_eq!(PortRecord::new(0, true, 0).index, 1);
    }

    #[test]
    fn label_falls_back_to_port_number() {
        assert_eq!(PortRecord::new(7, true, 0).display_label(), "Port 7");
        assert_eq!(
            PortRecord::new(7, true, 0).with_name("  ").display_label(),
            "Port 7"
        );
        assert_eq!(
            PortRecord::new(7, true, 0).with_name("Uplink").display_label(),
            "Uplink"
        );
    }

    #[test]
    fn combined_traffic_saturates() {
        let port = PortRecord::new(1, true, 0).with_live(u64::MAX, 10);
        assert_eq!(port.combined_live_bps(), u64::MAX);
    }
}

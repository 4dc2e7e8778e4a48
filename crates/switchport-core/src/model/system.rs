// ── Switch-level pass-through fields ──

use serde::{Deserialize, Serialize};

use super::display::PLACEHOLDER;

/// System values polled alongside the port tables.
///
/// Shown as-is. The core never parses or validates these; a missing value
/// renders as the placeholder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemInfo {
    pub hostname: Option<String>,
    pub firmware: Option<String>,
    pub uptime: Option<String>,
    pub cpu: Option<String>,
    pub memory: Option<String>,
    pub poe_total: Option<String>,
}

impl SystemInfo {
    pub fn is_empty(&self) -> bool {
        self.hostname.is_none()
            && self.firmware.is_none()
            && self.uptime.is_none()
            && self.cpu.is_none()
            && self.memory.is_none()
            && self.poe_total.is_none()
    }

    /// `(label, value)` pairs in display order.
    pub fn fields(&self) -> [(&'static str, &str); 6] {
        [
            ("Hostname", or_placeholder(self.hostname.as_deref())),
            ("Firmware", or_placeholder(self.firmware.as_deref())),
            ("Uptime", or_placeholder(self.uptime.as_deref())),
            ("CPU", or_placeholder(self.cpu.as_deref())),
            ("Memory", or_placeholder(self.memory.as_deref())),
            ("PoE total", or_placeholder(self.poe_total.as_deref())),
        ]
    }
}

fn or_placeholder(value: Option<&str>) -> &str {
    match value {
        Some(s) if !s.trim().is_empty() => s,
        _ => PLACEHOLDER,
    }
}

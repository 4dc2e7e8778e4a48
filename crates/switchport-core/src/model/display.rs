// ── Display descriptor types ──
//
// Everything a renderer needs to draw one port. Recomputed on every
// refresh; nothing here carries identity beyond the port index.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Placeholder for fields with no value (non-breaking space).
pub const PLACEHOLDER: &str = "\u{00a0}";

/// Discrete bucket summarizing negotiated link speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpeedTier {
    Off,
    /// Nonzero link below 10 Mbps, shown as literal text ("3M").
    Sub10M { mbps: u64 },
    TenM,
    HundredM,
    OneG,
    TwoPointFiveG,
    FiveG,
    TenG,
}

impl SpeedTier {
    /// Short label used in badges and tooltips.
    pub fn label(self) -> String {
        match self {
            Self::Off => "OFF".into(),
            Self::Sub10M { mbps } => format!("{mbps}M"),
            Self::TenM => "10M".into(),
            Self::HundredM => "100M".into(),
            Self::OneG => "1G".into(),
            Self::TwoPointFiveG => "2.5G".into(),
            Self::FiveG => "5G".into(),
            Self::TenG => "10G".into(),
        }
    }

    /// Style class for the speed color scheme.
    pub fn style_class(self) -> String {
        match self {
            Self::Off => "off".into(),
            Self::Sub10M { mbps } => format!("speed-{mbps}m"),
            Self::TenM => "speed-10m".into(),
            Self::HundredM => "speed-100m".into(),
            Self::OneG => "speed-1g".into(),
            Self::TwoPointFiveG => "speed-2_5g".into(),
            Self::FiveG => "speed-5g".into(),
            Self::TenG => "speed-10g".into(),
        }
    }

    pub fn is_off(self) -> bool {
        matches!(self, Self::Off)
    }
}

impl fmt::Display for SpeedTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Dominant traffic direction arrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Transmit dominates.
    Up,
    /// Receive dominates.
    Down,
    Balanced,
    /// Link is down.
    None,
}

impl Direction {
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Up => "↑",
            Self::Down => "↓",
            Self::Balanced => "↕",
            Self::None => PLACEHOLDER,
        }
    }
}

/// Human-readable receive/transmit pair ("12M", "850K").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrafficText {
    pub rx: String,
    pub tx: String,
}

impl fmt::Display for TrafficText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "↓{} ↑{}", self.rx, self.tx)
    }
}

/// Renderable state of one port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayDescriptor {
    pub index: u32,
    pub label: String,
    pub is_up: bool,
    pub speed_tier: SpeedTier,
    pub style_class: String,
    pub direction: Direction,
    pub formatted_traffic: TrafficText,
    pub formatted_lifetime: TrafficText,
    /// Top and bottom badge text chosen by the card's row settings.
    pub rows: [String; 2],
    pub tooltip_lines: Vec<String>,
}

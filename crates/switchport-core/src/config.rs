// ── Card display configuration ──
//
// These types describe *how* a card wants its ports presented. They are
// passed into the normalizer as immutable values; core never reads config
// files. The config crate loads and layers them, the CLI hands them in.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::error::CoreError;

/// Default number of ports drawn on a card.
pub const DEFAULT_TOTAL_PORTS: u32 = 8;

/// Which rule colors each port.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr, EnumString,
)]
#[serde(rename_all = "snake_case", from = "String")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ColorScheme {
    /// Nominal link speed tier.
    #[default]
    Speed,
    /// Relative load against the busiest port in the batch.
    Heatmap,
    /// Fixed palette keyed by VLAN id.
    Vlan,
    /// Measured throughput rather than link speed.
    #[strum(to_string = "actual_speed", serialize = "actual-speed")]
    ActualSpeed,
}

impl From<String> for ColorScheme {
    fn from(key: String) -> Self {
        key.parse().unwrap_or_else(|_| {
            tracing::warn!(key = %key, "unknown color scheme, falling back to speed");
            Self::default()
        })
    }
}

/// What a badge row on a port shows.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr, EnumString,
)]
#[serde(rename_all = "snake_case", from = "String")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum RowContent {
    Speed,
    Traffic,
    Vlan,
    Name,
    Poe,
    Direction,
    None,
}

impl From<String> for RowContent {
    fn from(key: String) -> Self {
        key.parse().unwrap_or_else(|_| {
            tracing::warn!(key = %key, "unknown row content, leaving row blank");
            Self::None
        })
    }
}

/// Whether badges show instantaneous or long-run traffic.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TrafficMode {
    #[default]
    Live,
    Lifetime,
}

/// Card-level display options threaded into the normalizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardConfig {
    pub color_scheme: ColorScheme,
    /// Ports drawn on the card, counting from 1.
    pub total_ports: u32,
    /// First SFP port; everything before it is copper. None = all copper.
    pub sfp_start_port: Option<u32>,
    /// Compact cards only show the top row.
    pub compact: bool,
    pub traffic_mode: TrafficMode,
    pub top_row: RowContent,
    pub bottom_row: RowContent,
    pub show_tooltips: bool,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            color_scheme: ColorScheme::default(),
            total_ports: DEFAULT_TOTAL_PORTS,
            sfp_start_port: None,
            compact: false,
            traffic_mode: TrafficMode::default(),
            top_row: RowContent::Speed,
            bottom_row: RowContent::Traffic,
            show_tooltips: true,
        }
    }
}

impl CardConfig {
    pub fn with_scheme(mut self, scheme: ColorScheme) -> Self {
        self.color_scheme = scheme;
        self
    }

    /// Check the port layout is drawable.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.total_ports == 0 {
            return Err(CoreError::InvalidConfig {
                field: "total_ports".into(),
                reason: "must be at least 1".into(),
            });
        }
        if let Some(sfp) = self.sfp_start_port {
            if sfp == 0 || sfp > self.total_ports {
                return Err(CoreError::InvalidConfig {
                    field: "sfp_start_port".into(),
                    reason: format!("must be between 1 and {}, got {sfp}", self.total_ports),
                });
            }
        }
        Ok(())
    }

    /// Whether a port index falls in the SFP block.
    pub fn is_sfp(&self, index: u32) -> bool {
        self.sfp_start_port.is_some_and(|start| index >= start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheme_keys_parse_leniently() {
        assert_eq!(ColorScheme::from("heatmap".to_string()), ColorScheme::Heatmap);
        assert_eq!(ColorScheme::from("VLAN".to_string()), ColorScheme::Vlan);
        assert_eq!(
            ColorScheme::from("actual-speed".to_string()),
            ColorScheme::ActualSpeed
        );
        assert_eq!(ColorScheme::from("rainbow".to_string()), ColorScheme::Speed);
    }

    #[test]
    fn unknown_row_key_is_blank() {
        assert_eq!(RowContent::from("sparkline".to_string()), RowContent::None);
        assert_eq!(RowContent::from("poe".to_string()), RowContent::Poe);
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let cfg: CardConfig =
            serde_json::from_str(r#"{"color_scheme": "mystery", "top_row": "vlan"}"#)
                .expect("valid json");
        assert_eq!(cfg.color_scheme, ColorScheme::Speed);
        assert_eq!(cfg.top_row, RowContent::Vlan);
        assert_eq!(cfg.bottom_row, RowContent::Traffic);
        assert_eq!(cfg.total_ports, DEFAULT_TOTAL_PORTS);
    }

    #[test]
    fn scheme_serializes_as_snake_case() {
        let json = serde_json::to_string(&ColorScheme::ActualSpeed).expect("serializable");
        assert_eq!(json, r#""actual_speed""#);
        assert_eq!(ColorScheme::ActualSpeed.to_string(), "actual_speed");
    }

    #[test]
    fn sfp_start_must_fit_layout() {
        let mut cfg = CardConfig {
            total_ports: 28,
            sfp_start_port: Some(25),
            ..CardConfig::default()
        };
        assert!(cfg.validate().is_ok());
        assert!(cfg.is_sfp(25));
        assert!(!cfg.is_sfp(24));

        cfg.sfp_start_port = Some(29);
        assert!(cfg.validate().is_err());

        cfg.sfp_start_port = None;
        cfg.total_ports = 0;
        assert!(cfg.validate().is_err());
    }
}

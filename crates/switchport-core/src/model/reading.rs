// ── Bandwidth readings ──

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

use crate::normalize::bandwidth::normalize_bandwidth_unit;

/// Unit a bandwidth sensor claims to report in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BandwidthUnit {
    Bps,
    Kbps,
    Mbps,
    Gbps,
    Unknown,
}

impl BandwidthUnit {
    /// Classify a free-text unit label such as `"Mbit/s"` or `"kbit/s"`.
    ///
    /// Matching is case-insensitive and checks the larger units first.
    pub fn from_label(label: &str) -> Self {
        let lower = label.to_ascii_lowercase();
        if lower.contains("gbit") {
            Self::Gbps
        } else if lower.contains("mbit") {
            Self::Mbps
        } else if lower.contains("kbit") {
            Self::Kbps
        } else if lower.contains("bit/s") {
            Self::Bps
        } else {
            Self::Unknown
        }
    }

    /// Canonical label fed back through [`normalize_bandwidth_unit`].
    pub fn label(self) -> &'static str {
        match self {
            Self::Bps => "bit/s",
            Self::Kbps => "kbit/s",
            Self::Mbps => "Mbit/s",
            Self::Gbps => "Gbit/s",
            Self::Unknown => "",
        }
    }
}

/// A scalar reading for the aggregate bandwidth gauge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandwidthReading {
    pub value: f64,
    pub unit: BandwidthUnit,
}

impl BandwidthReading {
    pub fn new(value: f64, unit: BandwidthUnit) -> Self {
        Self { value, unit }
    }

    pub fn from_label(value: f64, label: &str) -> Self {
        Self::new(value, BandwidthUnit::from_label(label))
    }

    /// Value in Mbps, including the mislabeled-Mbit workaround.
    pub fn to_mbps(&self) -> f64 {
        normalize_bandwidth_unit(self.value, self.unit.label())
    }
}

// switchport-core: Port classification, traffic formatting and port discovery
// for switch status cards. No I/O; consumers hand in snapshots and walks.

pub mod config;
pub mod counters;
pub mod discovery;
pub mod error;
pub mod model;
pub mod normalize;
pub mod snapshot;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{CardConfig, ColorScheme, DEFAULT_TOTAL_PORTS, RowContent, TrafficMode};
pub use error::CoreError;
pub use snapshot::SwitchSnapshot;

pub use counters::{
    CounterSample, CounterWidth, InterfaceTables, InterfaceWalks, RateInputs, build_port_records,
    default_ports,
};
pub use discovery::{DiscoveredPort, Discovery, SfpDetection, discover_from_dump};

pub use model::{
    BandwidthReading, BandwidthUnit, Direction, DisplayDescriptor, PLACEHOLDER, PortRecord,
    SpeedTier, SystemInfo, TrafficText,
};

pub use normalize::{
    BatchContext, aggregate_bandwidth, classify_by_color_scheme, classify_direction,
    classify_speed_tier, describe_port, format_traffic, normalize_bandwidth_unit, normalize_batch,
    normalize_batch_with,
};

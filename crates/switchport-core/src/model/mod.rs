// ── Domain model ──
//
// Typed inputs (port records, bandwidth readings, system fields) and the
// display descriptor produced for the renderer.

pub mod display;
pub mod port;
pub mod reading;
pub mod system;

pub use display::{DisplayDescriptor, Direction, PLACEHOLDER, SpeedTier, TrafficText};
pub use port::PortRecord;
pub use reading::{BandwidthReading, BandwidthUnit};
pub use system::SystemInfo;

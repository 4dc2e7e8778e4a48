//! Bandwidth unit normalization.
//!
//! Upstream sensors label their unit as free text, and one producer tags
//! Kbps values as "Mbit/s". This is a workaround for that data, not a
//! general unit converter: the rules apply in order and the first match
//! wins.

/// Values above this, labeled Mbit, are assumed to really be Kbps.
pub const MISLABELED_MBIT_THRESHOLD: f64 = 1000.0;

/// Convert a reading to Mbps based on its unit label.
///
/// 1. label contains "gbit": multiply by 1000
/// 2. label contains "mbit" and value > 1000: divide by 1000
/// 3. label contains "bit/s" but no "mbit"/"kbit"/"gbit": divide by 1,000,000
/// 4. label contains "kbit": divide by 1000
/// 5. otherwise the value is already Mbps
///
/// Negative and non-finite values come back as 0.
pub fn normalize_bandwidth_unit(value: f64, unit_label: &str) -> f64 {
    if !value.is_finite() || value <= 0.0 {
        return 0.0;
    }

    let label = unit_label.to_ascii_lowercase();
    let has_gbit = label.contains("gbit");
    let has_mbit = label.contains("mbit");
    let has_kbit = label.contains("kbit");

    if has_gbit {
        value * 1000.0
    } else if has_mbit && value > MISLABELED_MBIT_THRESHOLD {
        value / 1000.0
    } else if label.contains("bit/s") && !has_mbit && !has_kbit {
        value / 1_000_000.0
    } else if has_kbit {
        value / 1000.0
    } else {
        value
    }
}

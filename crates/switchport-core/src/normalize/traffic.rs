//! Compact traffic text ("12M", "850K", "3G").

/// Format a bit rate for a port badge.
///
/// Zero, negative and non-finite rates all read "0K". Rates of 1000 Mbps and above are
/// rounded to whole Gbps, 1 Mbps and above to whole Mbps, anything smaller
/// to whole Kbps. Halves round away from zero.
pub fn format_traffic(bits_per_second: f64) -> String {
    if !bits_per_second.is_finite() || bits_per_second <= 0.0 {
        return "0K".into();
    }

    let mbps = bits_per_second / 1_000_000.0;
    if mbps >= 1000.0 {
        format!("{:.0}G", (mbps / 1000.0).round())
    } else if mbps >= 1.0 {
        format!("{:.0}M", mbps.round())
    } else {
        format!("{:.0}K", (bits_per_second / 1000.0).round())
    }
}

/// [`format_traffic`] for integer counters.
#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
pub fn format_traffic_bps(bits_per_second: u64) -> String {
    format_traffic(bits_per_second as f64)
}

/// Format an Mbps gauge value with one decimal ("12.5 Mbps", "1.2 Gbps").
pub fn format_mbps(mbps: f64) -> String {
    if !mbps.is_finite() || mbps <= 0.0 {
        return "0.0 Mbps".into();
    }
    if mbps >= 1000.0 {
        format!("{:.1} Gbps", mbps / 1000.0)
    } else {
        format!("{mbps:.1} Mbps")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_and_non_finite() {
        assert_eq!(format_traffic(0.0), "0K");
        assert_eq!(format_traffic(f64::NAN), "0K");
        assert_eq!(format_traffic(f64::INFINITY), "0K");
        assert_eq!(format_traffic(f64::NEG_INFINITY), "0K");
        assert_eq!(format_traffic(-12.0), "0K");
    }

    #[test]
    fn documented_examples() {
        assert_eq!(format_traffic(1_500_000.0), "2M");
        assert_eq!(format_traffic(2_500_000_000.0), "3G");
    }

    #[test]
    fn gig_boundary() {
        assert_eq!(format_traffic(999_000_000.0), "999M");
        assert_eq!(format_traffic(999_499_999.0), "999M");
        // still below 1000 Mbps, so it rounds within the M branch
        assert_eq!(format_traffic(999_999_999.0), "1000M");
        assert_eq!(format_traffic(1_000_000_000.0), "1G");
        assert_eq!(format_traffic(1_499_999_999.0), "1G");
        assert_eq!(format_traffic(1_500_000_000.0), "2G");
    }

    #[test]
    fn meg_boundary() {
        assert_eq!(format_traffic(999_000.0), "999K");
        assert_eq!(format_traffic(999_999.0), "1000K");
        assert_eq!(format_traffic(1_000_000.0), "1M");
        assert_eq!(format_traffic(1_499_999.0), "1M");
    }

    #[test]
    fn small_rates_round_to_kilobits() {
        assert_eq!(format_traffic(1.0), "0K");
        assert_eq!(format_traffic(499.0), "0K");
        assert_eq!(format_traffic(500.0), "1K");
        assert_eq!(format_traffic(850_000.0), "850K");
    }

    #[test]
    fn integer_entry_point() {
        assert_eq!(format_traffic_bps(0), "0K");
        assert_eq!(format_traffic_bps(12_000_000), "12M");
    }

    #[test]
    fn gauge_text() {
        assert_eq!(format_mbps(12.54), "12.5 Mbps");
        assert_eq!(format_mbps(1234.0), "1.2 Gbps");
        assert_eq!(format_mbps(f64::NAN), "0.0 Mbps");
    }
}

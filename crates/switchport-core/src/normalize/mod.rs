// ── Port display normalizer ──
//
// Pure, deterministic mapping from port records to display descriptors.
// Every function here is total: out-of-range input is clamped or
// defaulted, never reported as an error, so one bad port can't take the
// rest of the card down with it.

pub mod bandwidth;
pub mod descriptor;
pub mod direction;
pub mod scheme;
pub mod speed;
pub mod traffic;

pub use bandwidth::normalize_bandwidth_unit;
pub use descriptor::{BatchContext, describe_port, normalize_batch, normalize_batch_with};
pub use direction::{DIRECTION_RATIO, classify_direction};
pub use scheme::{classify_by_color_scheme, heatmap_band, traffic_max, vlan_color};
pub use speed::classify_speed_tier;
pub use traffic::{format_mbps, format_traffic, format_traffic_bps};

use crate::model::{BandwidthReading, BandwidthUnit, PortRecord};

/// Total live throughput across a batch, for the aggregate gauge.
#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
pub fn aggregate_bandwidth(records: &[PortRecord]) -> BandwidthReading {
    let total = records
        .iter()
        .map(PortRecord::combined_live_bps)
        .fold(0_u64, u64::saturating_add);
    BandwidthReading::new(total as f64, BandwidthUnit::Bps)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregate_skips_down_ports() {
        let batch = [
            PortRecord::new(1, true, 1_000_000_000).with_live(2_000_000, 1_000_000),
            PortRecord::new(2, false, 1_000_000_000).with_live(50_000_000, 50_000_000),
            PortRecord::new(3, true, 100_000_000).with_live(500_000, 500_000),
        ];
        let reading = aggregate_bandwidth(&batch);
        assert_eq!(reading.unit, BandwidthUnit::Bps);
        assert!((reading.to_mbps() - 4.0).abs() < 1e-9);
    }

    #[test]
    fn one_bad_record_leaves_siblings_alone() {
        let good = PortRecord::new(1, true, 1_000_000_000).with_live(10_000_000, 1_000_000);
        let config = crate::CardConfig::default();

        let clean = normalize_batch(std::slice::from_ref(&good), &config);

        // Intake clamps a negative speed to zero before the record exists.
        let snapshot = crate::SwitchSnapshot::from_json_str(
            r#"{"ports": [{"index": 2, "status": "on", "speed": -100, "rx": "junk"}]}"#,
        )
        .expect("valid json");
        let mut batch = vec![good];
        batch.extend(snapshot.ports);

        let mixed = normalize_batch(&batch, &config);
        assert_eq!(mixed.len(), 2);
        assert_eq!(mixed[0], clean[0]);
        assert_eq!(mixed[1].speed_tier, crate::SpeedTier::Off);
        assert_eq!(mixed[1].formatted_traffic.rx, "0K");
    }
}

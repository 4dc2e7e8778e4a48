//! Link speed tiers.

use crate::model::SpeedTier;

const MBPS: u64 = 1_000_000;

/// Tier thresholds in Mbps, highest first.
const TIERS: [(u64, SpeedTier); 6] = [
    (10_000, SpeedTier::TenG),
    (5_000, SpeedTier::FiveG),
    (2_500, SpeedTier::TwoPointFiveG),
    (1_000, SpeedTier::OneG),
    (100, SpeedTier::HundredM),
    (10, SpeedTier::TenM),
];

/// Map a negotiated link speed onto its display tier.
///
/// A down link or a zero speed is `Off`. Anything nonzero below 10 Mbps
/// becomes a literal `Sub10M` tier: whole Mbps, at least 1.
pub fn classify_speed_tier(speed_bps: u64, is_up: bool) -> SpeedTier {
    if !is_up || speed_bps == 0 {
        return SpeedTier::Off;
    }

    TIERS
        .iter()
        .find(|(threshold_mbps, _)| speed_bps >= threshold_mbps * MBPS)
        .map_or_else(
            || SpeedTier::Sub10M {
                mbps: (speed_bps / MBPS).max(1),
            },
            |(_, tier)| *tier,
        )
}

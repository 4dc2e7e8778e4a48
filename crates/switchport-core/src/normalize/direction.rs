//! Traffic direction arrows.

use crate::model::Direction;

/// One side must exceed the other by this factor before an arrow flips
/// away from `Balanced`.
pub const DIRECTION_RATIO: f64 = 1.8;

/// Pick the direction arrow for a port's live traffic.
#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
pub fn classify_direction(rx_bps: u64, tx_bps: u64, is_up: bool) -> Direction {
    if !is_up {
        return Direction::None;
    }

    let (rx, tx) = (rx_bps as f64, tx_bps as f64);
    if rx > tx * DIRECTION_RATIO {
        Direction::Down
    } else if tx > rx * DIRECTION_RATIO {
        Direction::Up
    } else {
        Direction::Balanced
    }
}

//! `bandwidth`: normalize a sensor reading to Mbps.

use serde::Serialize;

use switchport_core::normalize::format_mbps;
use switchport_core::{BandwidthReading, BandwidthUnit};

use crate::cli::{BandwidthArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

#[derive(Debug, Serialize)]
struct Normalized {
    value: f64,
    unit: String,
    parsed_unit: BandwidthUnit,
    mbps: f64,
}

fn normalize(args: &BandwidthArgs) -> Normalized {
    let reading = BandwidthReading::from_label(args.value, &args.unit);
    Normalized {
        value: args.value,
        unit: args.unit.clone(),
        parsed_unit: reading.unit,
        mbps: reading.to_mbps(),
    }
}

pub fn handle(args: &BandwidthArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let normalized = normalize(args);
    if normalized.parsed_unit == BandwidthUnit::Unknown {
        tracing::warn!(unit = %args.unit, "unrecognized unit, value passed through");
    }

    let out = output::render_single(
        &global.output,
        &normalized,
        |n| format!("{} {} = {}", n.value, n.unit, format_mbps(n.mbps)),
        |n| n.mbps.to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

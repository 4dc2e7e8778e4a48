//! `discover`: physical ports and SFP cages from an SNMP walk dump.

use tabled::Tabled;

use switchport_core::{DiscoveredPort, Discovery, discover_from_dump};

use crate::cli::{DiscoverArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct DiscoveredRow {
    #[tabled(rename = "Port")]
    logical_port: u32,
    #[tabled(rename = "ifIndex")]
    if_index: u32,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Description")]
    descr: String,
    #[tabled(rename = "Type")]
    kind: &'static str,
    #[tabled(rename = "Detected by")]
    detection: String,
}

impl From<&DiscoveredPort> for DiscoveredRow {
    fn from(p: &DiscoveredPort) -> Self {
        Self {
            logical_port: p.logical_port,
            if_index: p.if_index,
            name: p.name.clone(),
            descr: p.if_descr.clone(),
            kind: if p.is_sfp { "SFP" } else { "Copper" },
            detection: p.detection.to_string(),
        }
    }
}

fn detail(d: &Discovery) -> String {
    let rows: Vec<DiscoveredRow> = d.ports.iter().map(DiscoveredRow::from).collect();
    let mut summary = format!(
        "Manufacturer: {}\nPorts:        {} copper, {} SFP",
        d.manufacturer,
        d.copper_count(),
        d.sfp_count()
    );
    if let Some(start) = d.sfp_start_port() {
        summary.push_str(&format!("\nSFP start:    {start}"));
    }
    format!("{}\n\n{summary}", output::render_table(&rows))
}

fn plain(d: &Discovery) -> String {
    d.ports
        .iter()
        .map(|p| {
            format!(
                "{}\t{}\t{}\t{}",
                p.logical_port,
                p.if_index,
                if p.is_sfp { "sfp" } else { "copper" },
                p.name
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: &DiscoverArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let raw = util::read_input(&args.dump)?;
    let discovery = discover_from_dump(&raw)?;

    tracing::info!(
        manufacturer = %discovery.manufacturer,
        ports = discovery.ports.len(),
        "discovery complete"
    );

    let out = output::render_single(&global.output, &discovery, detail, plain)?;
    output::print_output(&out, global.quiet);
    Ok(())
}

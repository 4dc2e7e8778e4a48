//! Clap derive structures for the `switchport` CLI.
//!
//! Also compiled by `build.rs` for man pages, so this file must only
//! depend on clap and clap_complete.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// switchport -- switch port status cards in the terminal
#[derive(Debug, Parser)]
#[command(
    name = "switchport",
    version,
    about = "Render switch port status cards and discover physical ports",
    long_about = "Normalizes SNMP-derived port snapshots into card descriptors:\n\
        speed tiers, traffic badges, direction arrows and color classes.\n\n\
        Also discovers physical ports and SFP cages from an SNMP walk dump.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config file (defaults to the platform config directory)
    #[arg(long, env = "SWITCHPORT_CONFIG", global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "SWITCHPORT_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one port per line (scripting)
    Plain,
}

#[derive(Debug, Clone, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Card option enums ────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SchemeArg {
    /// Nominal link speed
    Speed,
    /// Load relative to the busiest port
    Heatmap,
    /// Palette keyed by VLAN id
    Vlan,
    /// Measured throughput
    ActualSpeed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Current counter-delta rates
    Live,
    /// Average since boot
    Lifetime,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Normalize a port snapshot and print the card
    #[command(alias = "r")]
    Render(RenderArgs),

    /// Find physical ports and SFP cages in an SNMP walk dump
    #[command(alias = "disc")]
    Discover(DiscoverArgs),

    /// Normalize a bandwidth sensor reading to Mbps
    #[command(alias = "bw")]
    Bandwidth(BandwidthArgs),

    /// Manage CLI configuration and switch profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  RENDER
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Snapshot JSON file ("-" for stdin)
    #[arg(value_name = "SNAPSHOT")]
    pub snapshot: PathBuf,

    /// Switch profile whose card layout to use
    #[arg(long, short = 's', env = "SWITCHPORT_SWITCH")]
    pub switch: Option<String>,

    /// Color scheme (overrides config)
    #[arg(long)]
    pub scheme: Option<SchemeArg>,

    /// Traffic shown on badges (overrides config)
    #[arg(long, short = 'm')]
    pub mode: Option<ModeArg>,

    /// Only draw the top badge row
    #[arg(long)]
    pub compact: bool,

    /// Include tooltip lines in table output
    #[arg(long, short = 't')]
    pub tooltips: bool,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  DISCOVER
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct DiscoverArgs {
    /// snmpwalk output covering sysDescr, ifDescr and ifType ("-" for stdin)
    #[arg(value_name = "DUMP")]
    pub dump: PathBuf,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  BANDWIDTH
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct BandwidthArgs {
    /// Sensor value
    #[arg(allow_negative_numbers = true)]
    pub value: f64,

    /// Unit label as the sensor reports it (e.g. "Mbit/s", "kbit/s")
    #[arg(default_value = "Mbit/s")]
    pub unit: String,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Write a starter config file
    Init {
        /// Name of the first switch profile
        #[arg(long, default_value = "default")]
        name: String,

        /// Switch hostname or IP address
        #[arg(long, default_value = "192.168.1.1")]
        host: String,

        /// SNMP community string
        #[arg(long, default_value = "public")]
        community: String,

        /// Overwrite an existing file
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Display current resolved configuration
    Show,

    /// Print the config file path
    Path,

    /// List configured switch profiles
    #[command(alias = "ls")]
    Switches,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}

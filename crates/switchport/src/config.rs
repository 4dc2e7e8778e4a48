//! CLI configuration: thin wrapper around `switchport_config` shared types.
//!
//! Adds resolution that respects `GlobalOpts` (`--config`) and the
//! per-command card overrides (`--scheme`, `--mode`, `--compact`).

use std::path::PathBuf;

use switchport_core::{CardConfig, ColorScheme, TrafficMode};

use crate::cli::{GlobalOpts, ModeArg, RenderArgs, SchemeArg};
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use switchport_config::{Config, ConfigError, SwitchProfile};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Config file in effect: `--config` / `SWITCHPORT_CONFIG`, else the platform path.
pub fn active_path(global: &GlobalOpts) -> PathBuf {
    global
        .config
        .clone()
        .unwrap_or_else(switchport_config::config_path)
}

/// Load the active config file. A missing file yields defaults; a broken one is an error.
pub fn load(global: &GlobalOpts) -> Result<Config, CliError> {
    Ok(switchport_config::load_config_from(&active_path(global))?)
}

/// Card layout for a render: profile, then command-line overrides.
pub fn resolve_card(cfg: &Config, args: &RenderArgs) -> Result<CardConfig, CliError> {
    let mut card = switchport_config::resolve_card(cfg, args.switch.as_deref()).map_err(
        |err| match err {
            ConfigError::UnknownSwitch { name } => CliError::SwitchNotFound {
                name,
                available: available_switches(cfg),
            },
            other => other.into(),
        },
    )?;

    if let Some(scheme) = args.scheme {
        card.color_scheme = scheme.into();
    }
    if let Some(mode) = args.mode {
        card.traffic_mode = mode.into();
    }
    if args.compact {
        card.compact = true;
    }
    Ok(card)
}

fn available_switches(cfg: &Config) -> String {
    if cfg.switches.is_empty() {
        "(none)".into()
    } else {
        cfg.switches.keys().cloned().collect::<Vec<_>>().join(", ")
    }
}

// ── Flag → core conversions ─────────────────────────────────────────

impl From<SchemeArg> for ColorScheme {
    fn from(arg: SchemeArg) -> Self {
        match arg {
            SchemeArg::Speed => Self::Speed,
            SchemeArg::Heatmap => Self::Heatmap,
            SchemeArg::Vlan => Self::Vlan,
            SchemeArg::ActualSpeed => Self::ActualSpeed,
        }
    }
}

impl From<ModeArg> for TrafficMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Live => Self::Live,
            ModeArg::Lifetime => Self::Lifetime,
        }
    }
}

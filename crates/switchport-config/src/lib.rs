//! Configuration for the switchport CLI.
//!
//! One TOML file holds global output defaults, a card layout shared by
//! every switch, and named switch profiles that can override the layout.
//! Values are layered: built-in defaults, then the file, then
//! `SWITCHPORT_*` environment variables.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use switchport_core::{CardConfig, ColorScheme, CoreError, RowContent, TrafficMode, default_ports};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no switch named '{name}' in config")]
    UnknownSwitch { name: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

impl From<CoreError> for ConfigError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidConfig { field, reason } => Self::Validation { field, reason },
            other => Self::Validation {
                field: "card".into(),
                reason: other.to_string(),
            },
        }
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Switch used when `--switch` isn't given.
    pub default_switch: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    /// Card layout shared by every switch.
    #[serde(default)]
    pub card: CardConfig,

    /// Named switch profiles.
    #[serde(default)]
    pub switches: BTreeMap<String, SwitchProfile>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}

/// One monitored switch.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SwitchProfile {
    /// Hostname or IP address.
    pub host: String,

    /// SNMP community string.
    #[serde(default = "default_community")]
    pub community: String,

    /// Port indexes to monitor.
    #[serde(default = "default_ports")]
    pub ports: Vec<u32>,

    pub total_ports: Option<u32>,
    pub sfp_start_port: Option<u32>,

    // Per-switch card overrides
    pub color_scheme: Option<ColorScheme>,
    pub compact: Option<bool>,
    pub traffic_mode: Option<TrafficMode>,
    pub top_row: Option<RowContent>,
    pub bottom_row: Option<RowContent>,
    pub show_tooltips: Option<bool>,
}

fn default_community() -> String {
    "public".into()
}

impl SwitchProfile {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            community: default_community(),
            ports: default_ports(),
            total_ports: None,
            sfp_start_port: None,
            color_scheme: None,
            compact: None,
            traffic_mode: None,
            top_row: None,
            bottom_row: None,
            show_tooltips: None,
        }
    }

    /// Layer this profile's overrides onto a base card.
    pub fn apply(&self, base: &CardConfig) -> CardConfig {
        CardConfig {
            color_scheme: self.color_scheme.unwrap_or(base.color_scheme),
            total_ports: self.total_ports.unwrap_or(base.total_ports),
            sfp_start_port: self.sfp_start_port.or(base.sfp_start_port),
            compact: self.compact.unwrap_or(base.compact),
            traffic_mode: self.traffic_mode.unwrap_or(base.traffic_mode),
            top_row: self.top_row.unwrap_or(base.top_row),
            bottom_row: self.bottom_row.unwrap_or(base.bottom_row),
            show_tooltips: self.show_tooltips.unwrap_or(base.show_tooltips),
        }
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "switchport", "switchport").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("switchport");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the default file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit file, still layering environment variables.
///
/// Nested keys use a double underscore: `SWITCHPORT_CARD__COLOR_SCHEME=vlan`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("SWITCHPORT_").split("__"));

    let config: Config = figment.extract()?;
    config.card.validate()?;
    tracing::debug!(path = %path.display(), switches = config.switches.len(), "config loaded");
    Ok(config)
}

/// Load config, returning a default if the file is missing or broken.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_else(|err| {
        tracing::debug!(error = %err, "using default config");
        Config::default()
    })
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Card resolution ─────────────────────────────────────────────────

/// Effective card layout for a switch.
///
/// An explicit name must exist. Without one, `default_switch` is used if
/// set, otherwise the shared card as-is.
pub fn resolve_card(cfg: &Config, switch: Option<&str>) -> Result<CardConfig, ConfigError> {
    let name = switch.or(cfg.default_switch.as_deref());

    let card = match name {
        Some(name) => {
            let profile = cfg
                .switches
                .get(name)
                .ok_or_else(|| ConfigError::UnknownSwitch { name: name.into() })?;
            profile.apply(&cfg.card)
        }
        None => cfg.card.clone(),
    };

    card.validate()?;
    Ok(card)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r#"
default_switch = "core"

[defaults]
output = "json"

[card]
color_scheme = "heatmap"
total_ports = 28
sfp_start_port = 25

[switches.core]
host = "192.0.2.10"
ports = [1, 2, 3, 25, 26]
color_scheme = "vlan"

[switches.closet]
host = "192.0.2.20"
community = "secret"
total_ports = 8
sfp_start_port = 7
compact = true
"#;

    fn write_sample(dir: &tempfile::TempDir) -> PathBuf {
        let path = dir.path().join("config.toml");
        std::fs::write(&path, SAMPLE).expect("write sample");
        path
    }

    #[test]
    fn loads_layered_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg = load_config_from(&write_sample(&dir)).expect("valid config");

        assert_eq!(cfg.default_switch.as_deref(), Some("core"));
        assert_eq!(cfg.defaults.output, "json");
        assert_eq!(cfg.defaults.color, "auto");
        assert_eq!(cfg.card.color_scheme, ColorScheme::Heatmap);
        assert_eq!(cfg.switches.len(), 2);

        let closet = &cfg.switches["closet"];
        assert_eq!(closet.community, "secret");
        assert_eq!(closet.ports, default_ports());
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg = load_config_from(&dir.path().join("absent.toml")).expect("defaults");
        assert_eq!(cfg.card, CardConfig::default());
        assert!(cfg.switches.is_empty());
    }

    #[test]
    fn switch_overrides_layer_onto_shared_card() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg = load_config_from(&write_sample(&dir)).expect("valid config");

        let core = resolve_card(&cfg, None).expect("default switch");
        assert_eq!(core.color_scheme, ColorScheme::Vlan);
        assert_eq!(core.total_ports, 28);
        assert_eq!(core.sfp_start_port, Some(25));

        let closet = resolve_card(&cfg, Some("closet")).expect("closet");
        assert_eq!(closet.color_scheme, ColorScheme::Heatmap);
        assert_eq!(closet.total_ports, 8);
        assert!(closet.compact);
    }

    #[test]
    fn unknown_switch_is_an_error() {
        let cfg = Config::default();
        assert!(matches!(
            resolve_card(&cfg, Some("nope")),
            Err(ConfigError::UnknownSwitch { .. })
        ));
        assert_eq!(resolve_card(&cfg, None).expect("shared card"), CardConfig::default());
    }

    #[test]
    fn invalid_layout_is_rejected() {
        let mut cfg = Config::default();
        let mut profile = SwitchProfile::new("192.0.2.30");
        profile.sfp_start_port = Some(40);
        cfg.switches.insert("bad".into(), profile);

        let err = resolve_card(&cfg, Some("bad")).expect_err("sfp beyond total");
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "sfp_start_port"));
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config {
            default_switch: Some("lab".into()),
            ..Config::default()
        };
        cfg.switches.insert("lab".into(), SwitchProfile::new("192.0.2.40"));
        save_config_to(&cfg, &path).expect("saved");

        let loaded = load_config_from(&path).expect("reloaded");
        assert_eq!(loaded, cfg);
    }
}

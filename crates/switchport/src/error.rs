//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use switchport_config::ConfigError;
use switchport_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONFLICT: i32 = 6;
    pub const DATA: i32 = 65;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Input files ──────────────────────────────────────────────────

    #[error("Could not read {path}")]
    #[diagnostic(
        code(switchport::read_failed),
        help("Check the path exists and is readable. Use '-' to read from stdin.")
    )]
    ReadInput {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Snapshot could not be parsed: {0}")]
    #[diagnostic(
        code(switchport::snapshot),
        help(
            "Expected a JSON object like {{\"ports\": [{{\"index\": 1, \"status\": \"on\", ...}}]}}"
        )
    )]
    Snapshot(#[source] serde_json::Error),

    #[error("No interface descriptions found in SNMP dump")]
    #[diagnostic(
        code(switchport::no_interfaces),
        help(
            "Walk ifDescr and ifType, e.g.\n\
             snmpwalk -v2c -c public <host> 1.3.6.1.2.1.2.2.1.2 1.3.6.1.2.1.2.2.1.3"
        )
    )]
    NoInterfaces,

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(switchport::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Switch '{name}' not found in configuration")]
    #[diagnostic(
        code(switchport::switch_not_found),
        help(
            "Available switches: {available}\n\
             List them with: switchport config switches"
        )
    )]
    SwitchNotFound { name: String, available: String },

    #[error("Configuration file already exists at {path}")]
    #[diagnostic(
        code(switchport::config_exists),
        help("Use --force to overwrite it.")
    )]
    ConfigExists { path: String },

    #[error(transparent)]
    #[diagnostic(code(switchport::config))]
    Config(Box<figment::Error>),

    #[error("Failed to serialize config: {0}")]
    #[diagnostic(code(switchport::config_serialize))]
    ConfigSerialize(#[from] toml::ser::Error),

    // ── IO / Serialization ────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render output: {0}")]
    #[diagnostic(code(switchport::render))]
    Render(String),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ReadInput { .. } | Self::SwitchNotFound { .. } => exit_code::NOT_FOUND,
            Self::Snapshot(_) | Self::NoInterfaces => exit_code::DATA,
            Self::Validation { .. } => exit_code::USAGE,
            Self::ConfigExists { .. } => exit_code::CONFLICT,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Snapshot(source) => Self::Snapshot(source),
            CoreError::NoInterfaces => Self::NoInterfaces,
            CoreError::InvalidConfig { field, reason } => Self::Validation { field, reason },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::UnknownSwitch { name } => Self::SwitchNotFound {
                name,
                available: String::new(),
            },
            ConfigError::Serialization(e) => Self::ConfigSerialize(e),
            ConfigError::Figment(e) => Self::Config(e),
            ConfigError::Io(e) => Self::Io(e),
        }
    }
}

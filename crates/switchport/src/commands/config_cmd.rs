//! Config subcommand handlers.

use tabled::Tabled;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, SwitchProfile};
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct SwitchRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Host")]
    host: String,
    #[tabled(rename = "Ports")]
    ports: usize,
    #[tabled(rename = "Scheme")]
    scheme: String,
    #[tabled(rename = "Default")]
    default: &'static str,
}

#[derive(serde::Serialize)]
struct NamedSwitch<'a> {
    name: &'a str,
    #[serde(flatten)]
    profile: &'a SwitchProfile,
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init: write a starter file ──────────────────────────────
        ConfigCommand::Init {
            name,
            host,
            community,
            force,
        } => {
            let path = config::active_path(global);
            if path.exists() && !force {
                return Err(CliError::ConfigExists {
                    path: path.display().to_string(),
                });
            }

            let mut profile = SwitchProfile::new(host);
            profile.community = community;

            let mut cfg = Config {
                default_switch: Some(name.clone()),
                ..Config::default()
            };
            cfg.switches.insert(name.clone(), profile);

            switchport_config::save_config_to(&cfg, &path)?;
            tracing::info!(path = %path.display(), "config written");

            if !global.quiet {
                eprintln!("✓ Configuration written to {}", path.display());
                eprintln!("  Default switch: {name}");
            }
            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = config::load(global)?;
            let out = output::render_single(
                &global.output,
                &cfg,
                |c| toml::to_string_pretty(c).unwrap_or_else(|e| format!("{c:#?}\n# {e}")),
                |c| c.default_switch.clone().unwrap_or_default(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Path ────────────────────────────────────────────────────
        ConfigCommand::Path => {
            output::print_output(&config::active_path(global).display().to_string(), false);
            Ok(())
        }

        // ── Switches ────────────────────────────────────────────────
        ConfigCommand::Switches => {
            let cfg = config::load(global)?;
            let named: Vec<NamedSwitch<'_>> = cfg
                .switches
                .iter()
                .map(|(name, profile)| NamedSwitch { name, profile })
                .collect();

            let default = cfg.default_switch.as_deref();
            let out = output::render_list(
                &global.output,
                &named,
                |s| SwitchRow {
                    name: s.name.into(),
                    host: s.profile.host.clone(),
                    ports: s.profile.ports.len(),
                    scheme: s
                        .profile
                        .apply(&cfg.card)
                        .color_scheme
                        .to_string(),
                    default: if Some(s.name) == default { "*" } else { "" },
                },
                |s| s.name.to_owned(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}

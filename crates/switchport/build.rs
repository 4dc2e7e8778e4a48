use std::fs;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::Shell;

// Shares the command tree with the binary so packaged man pages and
// completions never drift from `--help`.
#[path = "src/cli.rs"]
mod cli;

const BIN: &str = "switchport";
const SHELLS: [Shell; 3] = [Shell::Bash, Shell::Zsh, Shell::Fish];

fn main() {
    println!("cargo::rerun-if-changed=src/cli.rs");

    let out_dir = PathBuf::from(std::env::var_os("OUT_DIR").expect("OUT_DIR is set by cargo"));
    let man_dir = ensure_dir(&out_dir.join("man"));
    let completion_dir = ensure_dir(&out_dir.join("completions"));

    let mut cmd = cli::Cli::command();

    let mut pages = Vec::new();
    collect_pages(&cmd, &mut pages);
    for (file_name, page) in pages {
        let mut buf = Vec::new();
        clap_mangen::Man::new(page)
            .render(&mut buf)
            .unwrap_or_else(|e| panic!("rendering {file_name}: {e}"));
        let path = man_dir.join(&file_name);
        fs::write(&path, buf).unwrap_or_else(|e| panic!("writing {}: {e}", path.display()));
    }

    for shell in SHELLS {
        clap_complete::generate_to(shell, &mut cmd, BIN, &completion_dir)
            .unwrap_or_else(|e| panic!("writing {shell} completions: {e}"));
    }
}

fn ensure_dir(dir: &Path) -> PathBuf {
    fs::create_dir_all(dir).unwrap_or_else(|e| panic!("creating {}: {e}", dir.display()));
    dir.to_path_buf()
}

/// `switchport.1`, `switchport-render.1`, `switchport-config-init.1`, ...
///
/// Hidden subcommands get no page.
fn collect_pages(cmd: &clap::Command, pages: &mut Vec<(String, clap::Command)>) {
    let name = cmd.get_name().to_owned();
    pages.push((format!("{name}.1"), cmd.clone()));

    for sub in cmd.get_subcommands().filter(|sub| !sub.is_hide_set()) {
        let renamed = sub.clone().name(format!("{name}-{}", sub.get_name()));
        collect_pages(&renamed, pages);
    }
}

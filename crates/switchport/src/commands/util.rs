//! Shared helpers for command handlers.

use std::io::Read;
use std::path::Path;

use crate::error::CliError;

/// Read an input file, or stdin when the path is `-`.
pub fn read_input(path: &Path) -> Result<String, CliError> {
    let read_err = |source| CliError::ReadInput {
        path: path.display().to_string(),
        source,
    };

    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf).map_err(read_err)?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).map_err(read_err)
}

/// Current time as epoch seconds, for "ago" text.
pub fn now_epoch_secs() -> i64 {
    chrono::Utc::now().timestamp()
}

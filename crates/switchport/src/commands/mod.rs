//! Command handlers: read input, call into core, format output.

pub mod bandwidth;
pub mod config_cmd;
pub mod discover;
pub mod render;
pub mod util;

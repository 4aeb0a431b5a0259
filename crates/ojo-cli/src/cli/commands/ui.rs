//! Interactive UI command.

use anyhow::Result;
use ojo_core::config::Config;

pub fn run(config: &Config, endpoint_override: Option<&str>) -> Result<()> {
    ojo_tui::run_interactive(config, endpoint_override)
}

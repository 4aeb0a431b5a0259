//! Full-screen terminal front-end for ojo.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stdout};

use anyhow::Result;
use ojo_core::analysis::{AnalysisClient, AnalysisConfig};
use ojo_core::config::Config;
pub use runtime::TuiRuntime;

/// Runs the interactive login/results UI until the user quits.
///
/// Must be called from within a tokio runtime.
///
/// # Errors
/// Returns an error if stdout is not a terminal, no endpoint is configured,
/// or the terminal fails.
pub fn run_interactive(config: &Config, endpoint_override: Option<&str>) -> Result<()> {
    if !stdout().is_terminal() {
        anyhow::bail!(
            "The interactive UI requires a terminal.\n\
             Use `ojo analyze --username <USER>` for non-interactive runs."
        );
    }

    let client = AnalysisClient::new(AnalysisConfig::from_config(config, endpoint_override)?)?;
    tracing::info!(endpoint = client.endpoint(), "starting interactive session");

    let mut runtime = TuiRuntime::new(client)?;
    runtime.run()
}

//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use ojo_core::config::{self, ENDPOINT_ENV};
use ojo_core::logging;

mod commands;

#[derive(Parser)]
#[command(name = "ojo")]
#[command(version)]
#[command(about = "Compare who you follow with who follows you back")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Analytics backend URL (overrides the config file)
    #[arg(long, global = true, env = ENDPOINT_ENV, value_name = "URL")]
    endpoint: Option<String>,

    /// Seconds to wait for the backend (overrides the config file)
    #[arg(long, global = true, value_name = "SECS")]
    timeout_secs: Option<u64>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Run one analysis without the interactive UI
    Analyze {
        /// Account username
        #[arg(short, long)]
        username: String,

        /// Read the password from the first line of stdin instead of OJO_PASSWORD
        #[arg(long)]
        password_stdin: bool,

        /// Two-factor code to send if the backend asks for one
        #[arg(long, value_name = "CODE")]
        two_factor_code: Option<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
    /// Store the analytics backend URL in the config file
    SetEndpoint {
        #[arg(value_name = "URL")]
        url: String,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let mut config = config::Config::load().context("load config")?;
    if let Some(secs) = cli.timeout_secs {
        config.timeout_secs = secs;
    }

    // Logging is best-effort; a read-only home must not block the app.
    let _log_guard = match logging::init(&config) {
        Ok(guard) => Some(guard),
        Err(err) => {
            eprintln!("Warning: logging disabled: {err:#}");
            None
        }
    };

    let Cli {
        command, endpoint, ..
    } = cli;

    // default to the interactive UI
    let Some(command) = command else {
        return commands::ui::run(&config, endpoint.as_deref());
    };

    match command {
        Commands::Analyze {
            username,
            password_stdin,
            two_factor_code,
            json,
        } => {
            commands::analyze::run(commands::analyze::AnalyzeOptions {
                config: &config,
                endpoint_override: endpoint.as_deref(),
                username: &username,
                password_stdin,
                two_factor_code: two_factor_code.as_deref(),
                json,
            })
            .await
        }

        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
            ConfigCommands::SetEndpoint { url } => commands::config::set_endpoint(&url),
        },
    }
}

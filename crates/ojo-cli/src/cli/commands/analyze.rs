//! Non-interactive analysis.
//!
//! Drives the same `Session` state machine as the TUI, one request at a
//! time, and prints the result to stdout.

use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::{Context, Result, bail};
use comfy_table::Table;
use ojo_core::analysis::{AnalysisClient, AnalysisConfig, AnalysisResult};
use ojo_core::session::{AuthState, Field, Session, TWO_FACTOR_PROMPT};

/// Environment variable holding the account password.
pub const PASSWORD_ENV: &str = "OJO_PASSWORD";

pub struct AnalyzeOptions<'a> {
    pub config: &'a ojo_core::config::Config,
    pub endpoint_override: Option<&'a str>,
    pub username: &'a str,
    pub password_stdin: bool,
    pub two_factor_code: Option<&'a str>,
    pub json: bool,
}

pub async fn run(opts: AnalyzeOptions<'_>) -> Result<()> {
    let password = read_password(opts.password_stdin)?;
    let client = AnalysisClient::new(AnalysisConfig::from_config(
        opts.config,
        opts.endpoint_override,
    )?)?;

    tracing::info!(username = opts.username, "running non-interactive analysis");

    let mut session = Session::new();
    session.set_field(Field::Username, opts.username);
    session.set_field(Field::Password, password);
    let mut preset_code = opts.two_factor_code.map(str::to_string);

    loop {
        let Some(credentials) = session.submit() else {
            bail!("A request is already in progress");
        };
        session.resolve(client.analyze(&credentials).await);

        match session.state() {
            AuthState::Succeeded(result) => {
                let output = if opts.json {
                    serde_json::to_string_pretty(result).context("serialize result")?
                } else {
                    format_report(result)
                };
                println!("{output}");
                return Ok(());
            }
            AuthState::AwaitingTwoFactor => {}
            AuthState::Failed(message) => bail!("{message}"),
            AuthState::AwaitingCredentials | AuthState::InFlight => {
                bail!("Analysis ended in an unexpected state")
            }
        }

        tracing::debug!(preset = preset_code.is_some(), "two-factor code needed");
        let code = match preset_code.take() {
            Some(code) => code,
            None => prompt_two_factor_code()?,
        };
        session.set_field(Field::TwoFactorCode, code);
    }
}

fn read_password(from_stdin: bool) -> Result<String> {
    if from_stdin {
        let mut line = String::new();
        io::stdin()
            .lock()
            .read_line(&mut line)
            .context("read password from stdin")?;
        let password = line.trim_end_matches(['\r', '\n']);
        if password.is_empty() {
            bail!("No password on stdin");
        }
        return Ok(password.to_string());
    }

    match std::env::var(PASSWORD_ENV) {
        Ok(password) if !password.is_empty() => Ok(password),
        _ => bail!("No password provided. Set {PASSWORD_ENV} or pass --password-stdin."),
    }
}

fn prompt_two_factor_code() -> Result<String> {
    let stdin = io::stdin();
    if !stdin.is_terminal() {
        bail!("{TWO_FACTOR_PROMPT} Pass it with --two-factor-code <CODE>.");
    }

    let mut err = io::stderr();
    writeln!(err, "{TWO_FACTOR_PROMPT}")?;
    write!(err, "Código 2FA: ")?;
    err.flush()?;

    let mut line = String::new();
    stdin
        .lock()
        .read_line(&mut line)
        .context("read two-factor code")?;
    let code = line.trim();
    if code.is_empty() {
        bail!("No two-factor code entered");
    }
    Ok(code.to_string())
}

/// Plain-text report: a counts table followed by both lists in backend
/// order.
fn format_report(result: &AnalysisResult) -> String {
    let mut table = Table::new();
    table.set_header(vec!["", "Total"]);
    table.add_row(vec![
        "Seguidores".to_string(),
        result.followers_count.to_string(),
    ]);
    table.add_row(vec![
        "Seguidos".to_string(),
        result.following_count.to_string(),
    ]);
    table.add_row(vec![
        "No te siguen".to_string(),
        result.not_following_back_count().to_string(),
    ]);
    table.add_row(vec![
        "No los sigues".to_string(),
        result.fans_count().to_string(),
    ]);

    let mut out = table.to_string();
    for (title, names) in [
        ("No te siguen", &result.not_following_back),
        ("No los sigues", &result.fans),
    ] {
        out.push_str(&format!("\n\n{title} ({}):", names.len()));
        for name in names {
            out.push_str("\n  ");
            out.push_str(name);
        }
    }
    out
}

//! HTTP client for the analytics backend.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use tokio_util::sync::CancellationToken;

use super::error::{ClientError, ClientResult, FailureKind, RequestFailure};
use super::model::{AnalysisResult, Credentials};
use crate::config::Config;

/// Standard User-Agent header for ojo requests.
pub const USER_AGENT: &str = concat!("ojo/", env!("CARGO_PKG_VERSION"));

/// Analysis client configuration.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub endpoint: String,
    pub timeout: Duration,
}

impl AnalysisConfig {
    /// Builds the client configuration from loaded config plus an optional
    /// endpoint override (`--endpoint` / `OJO_ENDPOINT`).
    ///
    /// # Errors
    /// Returns an error if no valid endpoint is available.
    pub fn from_config(config: &Config, endpoint_override: Option<&str>) -> Result<Self> {
        Ok(Self {
            endpoint: config.resolve_endpoint(endpoint_override)?,
            timeout: config.timeout(),
        })
    }
}

/// Issues the single analysis request.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct AnalysisClient {
    config: AnalysisConfig,
    http: reqwest::Client,
}

impl AnalysisClient {
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed (e.g. TLS
    /// backend initialization fails).
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { config, http })
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    /// Sends the credentials and decodes the analysis result.
    ///
    /// Every failure is classified: texts asking for a verification code
    /// become `TwoFactorRequired`, everything else `RequestFailed`.
    ///
    /// # Errors
    /// Returns `ClientError` on any network, timeout, decode or server
    /// failure.
    pub async fn analyze(&self, credentials: &Credentials) -> ClientResult<AnalysisResult> {
        tracing::info!(
            endpoint = %self.config.endpoint,
            username = %credentials.username,
            two_factor = credentials.two_factor_code.is_some(),
            "submitting analysis request"
        );

        let outcome = self.send(credentials).await.map_err(ClientError::classify);

        match &outcome {
            Ok(result) => tracing::info!(
                followers = result.followers_count,
                following = result.following_count,
                not_following_back = result.not_following_back.len(),
                fans = result.fans.len(),
                "analysis completed"
            ),
            Err(ClientError::TwoFactorRequired) => {
                tracing::info!("backend requested a two-factor code");
            }
            Err(ClientError::RequestFailed(failure)) => {
                tracing::warn!(kind = %failure.kind, message = %failure.message, "analysis failed");
            }
        }

        outcome
    }

    /// Like [`analyze`](Self::analyze), but gives up as soon as `cancel`
    /// fires. Returns `None` when cancelled.
    pub async fn analyze_until_cancelled(
        &self,
        credentials: &Credentials,
        cancel: &CancellationToken,
    ) -> Option<ClientResult<AnalysisResult>> {
        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                tracing::info!("analysis request cancelled");
                None
            }
            outcome = self.analyze(credentials) => Some(outcome),
        }
    }

    async fn send(&self, credentials: &Credentials) -> Result<AnalysisResult, RequestFailure> {
        let response = self
            .http
            .post(&self.config.endpoint)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .json(credentials)
            .send()
            .await
            .map_err(|err| self.transport_failure(&err))?;

        let status = response.status();
        tracing::debug!(status = status.as_u16(), "analysis response received");

        let body = response
            .text()
            .await
            .map_err(|err| self.transport_failure(&err))?;

        if !status.is_success() {
            return Err(RequestFailure::http_status(status.as_u16(), &body));
        }

        serde_json::from_str::<AnalysisResult>(&body).map_err(|err| {
            let mut failure = RequestFailure::new(
                FailureKind::Decode,
                format!("Failed to parse analysis response: {err}"),
            );
            failure.details = (!body.trim().is_empty()).then(|| body.clone());
            failure
        })
    }

    fn transport_failure(&self, err: &reqwest::Error) -> RequestFailure {
        if err.is_timeout() {
            RequestFailure::timeout(self.config.timeout.as_secs())
        } else {
            RequestFailure::new(FailureKind::Network, describe_reqwest_error(err))
        }
    }
}

/// Flattens a reqwest error and its sources into one line.
fn describe_reqwest_error(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(inner) = source {
        let text = inner.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = inner.source();
    }
    message
}

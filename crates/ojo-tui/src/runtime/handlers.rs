//! Async effect handlers. Each returns the event to feed back to the reducer.

use ojo_core::analysis::{AnalysisClient, Credentials};
use tokio_util::sync::CancellationToken;

use crate::events::UiEvent;

/// Sends the analysis request, racing it against `cancel`.
pub async fn analysis(
    client: AnalysisClient,
    credentials: Credentials,
    cancel: CancellationToken,
) -> UiEvent {
    client
        .analyze_until_cancelled(&credentials, &cancel)
        .await
        .map_or(UiEvent::AnalysisCancelled, UiEvent::AnalysisFinished)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use ojo_core::analysis::AnalysisConfig;

    use super::*;

    #[tokio::test]
    async fn test_cancelled_token_yields_cancelled_event() {
        let client = AnalysisClient::new(AnalysisConfig {
            endpoint: "http://127.0.0.1:9/analyze".to_string(),
            timeout: Duration::from_secs(5),
        })
        .unwrap();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let event = analysis(client, Credentials::new("alice", "p1"), cancel).await;

        assert!(matches!(event, UiEvent::AnalysisCancelled));
    }
}

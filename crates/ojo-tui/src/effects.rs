//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! The reducer decides when to start or cancel the analysis request; the
//! runtime does the spawning and calls `token.cancel()`.

use ojo_core::analysis::Credentials;
use tokio_util::sync::CancellationToken;

use crate::common::{TaskId, TaskKind};

#[derive(Debug)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Send the analysis request for `credentials`.
    StartAnalysis {
        task: TaskId,
        credentials: Credentials,
    },

    /// Cancel an in-progress task.
    CancelTask {
        kind: TaskKind,
        token: Option<CancellationToken>,
    },
}

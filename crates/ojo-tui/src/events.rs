//! UI events fed into the reducer.

use crossterm::event::Event;
use ojo_core::analysis::{AnalysisResult, ClientResult};

use crate::common::{TaskCompleted, TaskKind, TaskStarted};

#[derive(Debug)]
pub enum UiEvent {
    /// Frame cadence; advances the spinner and triggers a render.
    Tick,
    /// Raw terminal input.
    Terminal(Event),

    TaskStarted {
        kind: TaskKind,
        started: TaskStarted,
    },
    TaskCompleted {
        kind: TaskKind,
        completed: TaskCompleted<Box<UiEvent>>,
    },

    /// The analysis request came back.
    AnalysisFinished(ClientResult<AnalysisResult>),
    /// The analysis request was cancelled before it finished.
    AnalysisCancelled,
}

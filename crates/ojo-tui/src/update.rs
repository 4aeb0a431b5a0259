//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.

use crossterm::event::{Event, KeyEventKind};

use crate::common::TaskKind;
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::features::login::{self, LoginView};
use crate::features::results::{self, ResultsView};
use crate::state::{AppState, Screen};

/// The main reducer function.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            app.spinner_frame = app.spinner_frame.wrapping_add(1);
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::TaskStarted { kind, started } => {
            if app.tasks.state_mut(kind).on_started(&started) {
                vec![]
            } else {
                // Nobody is waiting for this task anymore.
                vec![UiEffect::CancelTask {
                    kind,
                    token: started.cancel,
                }]
            }
        }
        UiEvent::TaskCompleted { kind, completed } => {
            if app.tasks.state_mut(kind).finish_if_active(completed.id) {
                update(app, *completed.result)
            } else {
                tracing::debug!(?kind, id = completed.id.0, "dropping stale task result");
                vec![]
            }
        }
        UiEvent::AnalysisFinished(outcome) => login::handle_analysis_finished(app, outcome),
        UiEvent::AnalysisCancelled => vec![],
    }
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => match app.screen() {
            Screen::Login => login::handle_key(app, key),
            Screen::Results => results::handle_key(app, key),
        },
        Event::Paste(text) if app.screen() == Screen::Login => login::handle_paste(app, &text),
        _ => vec![],
    }
}

/// Submits the form if allowed and asks the runtime to send the request.
pub(crate) fn start_analysis(app: &mut AppState) -> Vec<UiEffect> {
    let Some(credentials) = app.session.submit() else {
        return vec![];
    };
    let task = app.task_seq.next_id();
    app.tasks.analysis.expect(task);
    vec![UiEffect::StartAnalysis { task, credentials }]
}

/// Clears the session and both views, cancelling any running request.
pub(crate) fn logout(app: &mut AppState) -> Vec<UiEffect> {
    app.session.logout();
    app.login = LoginView::default();
    app.results = ResultsView::default();
    cancel_analysis(app)
}

pub(crate) fn quit(app: &mut AppState) -> Vec<UiEffect> {
    let mut effects = cancel_analysis(app);
    effects.push(UiEffect::Quit);
    effects
}

fn cancel_analysis(app: &mut AppState) -> Vec<UiEffect> {
    if !app.tasks.analysis.is_running() {
        return vec![];
    }
    let token = app.tasks.analysis.clear();
    vec![UiEffect::CancelTask {
        kind: TaskKind::Analysis,
        token,
    }]
}

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ojo_core::analysis::{AnalysisResult, ClientResult};
use ojo_core::session::{AuthState, Field};

use crate::effects::UiEffect;
use crate::features::results::ResultsView;
use crate::state::AppState;
use crate::update;

pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    let focus = app.login.focus;

    match key.code {
        KeyCode::Esc => update::quit(app),
        KeyCode::Char('c') if ctrl => update::quit(app),
        KeyCode::Char('u') if ctrl => {
            app.session.clear_field(focus);
            vec![]
        }
        KeyCode::Tab | KeyCode::Down => {
            app.login.focus_next(app.session.visible_fields());
            vec![]
        }
        KeyCode::BackTab | KeyCode::Up => {
            app.login.focus_prev(app.session.visible_fields());
            vec![]
        }
        KeyCode::Enter => update::start_analysis(app),
        KeyCode::Backspace => {
            app.session.pop_char(focus);
            vec![]
        }
        KeyCode::Char(c) if !ctrl && !alt => {
            app.session.push_char(focus, c);
            vec![]
        }
        _ => vec![],
    }
}

/// Inserts pasted text into the focused field, dropping line breaks.
pub fn handle_paste(app: &mut AppState, text: &str) -> Vec<UiEffect> {
    let focus = app.login.focus;
    for c in text.chars().filter(|c| !matches!(c, '\n' | '\r')) {
        if !app.session.push_char(focus, c) {
            break;
        }
    }
    vec![]
}

pub fn handle_analysis_finished(
    app: &mut AppState,
    outcome: ClientResult<AnalysisResult>,
) -> Vec<UiEffect> {
    if !app.session.resolve(outcome) {
        tracing::debug!("dropping analysis outcome for an inactive session");
        return vec![];
    }

    match app.session.state() {
        AuthState::AwaitingTwoFactor => app.login.focus = Field::TwoFactorCode,
        AuthState::Succeeded(_) => {
            app.login.focus = Field::Username;
            app.results = ResultsView::default();
        }
        _ => app.login.ensure_visible(app.session.visible_fields()),
    }
    vec![]
}

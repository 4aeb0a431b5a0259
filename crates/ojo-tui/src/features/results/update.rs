use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::ResultList;
use crate::effects::UiEffect;
use crate::state::AppState;
use crate::update;

pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let Some(result) = app.session.result() else {
        return vec![];
    };
    let len = match app.results.focus {
        ResultList::NotFollowingBack => result.not_following_back.len(),
        ResultList::Fans => result.fans.len(),
    };
    let page = app.results.page_size() as isize;

    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => update::quit(app),
        KeyCode::Char('c') if ctrl => update::quit(app),
        KeyCode::Char('l') => update::logout(app),
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Left | KeyCode::Right => {
            app.results.toggle_focus();
            vec![]
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.results.scroll_by(len, -1);
            vec![]
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.results.scroll_by(len, 1);
            vec![]
        }
        KeyCode::PageUp => {
            app.results.scroll_by(len, -page);
            vec![]
        }
        KeyCode::PageDown => {
            app.results.scroll_by(len, page);
            vec![]
        }
        KeyCode::Home => {
            app.results.scroll_to_top();
            vec![]
        }
        KeyCode::End => {
            app.results.scroll_to_bottom(len);
            vec![]
        }
        _ => vec![],
    }
}

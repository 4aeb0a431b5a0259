//! Application state.

use ojo_core::session::Session;

use crate::common::{TaskSeq, Tasks};
use crate::features::login::LoginView;
use crate::features::results::ResultsView;

/// Which screen is shown. Derived from the session, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Results,
}

#[derive(Debug)]
pub struct AppState {
    pub should_quit: bool,
    pub session: Session,
    pub login: LoginView,
    pub results: ResultsView,
    pub task_seq: TaskSeq,
    pub tasks: Tasks,
    pub spinner_frame: usize,
    /// Backend URL, shown in the footer.
    pub endpoint: String,
}

impl AppState {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            should_quit: false,
            session: Session::new(),
            login: LoginView::default(),
            results: ResultsView::default(),
            task_seq: TaskSeq::default(),
            tasks: Tasks::default(),
            spinner_frame: 0,
            endpoint: endpoint.into(),
        }
    }

    pub fn screen(&self) -> Screen {
        if self.session.result().is_some() {
            Screen::Results
        } else {
            Screen::Login
        }
    }
}

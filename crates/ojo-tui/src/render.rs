//! Top-level view: picks the screen and draws the footer.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::common::truncate_with_ellipsis;
use crate::features::{login, results};
use crate::state::{AppState, Screen};

const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

/// Ticks per spinner frame.
pub const SPINNER_SPEED_DIVISOR: usize = 6;

pub fn spinner(frame: usize) -> &'static str {
    SPINNER_FRAMES[(frame / SPINNER_SPEED_DIVISOR) % SPINNER_FRAMES.len()]
}

/// Renders the whole UI. Reads state only.
pub fn render(app: &AppState, frame: &mut Frame) {
    let [body, footer] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());

    match app.screen() {
        Screen::Login => login::render_login(app, frame, body),
        Screen::Results => results::render_results(app, frame, body),
    }

    let text = format!("ojo · {}", app.endpoint);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            truncate_with_ellipsis(&text, footer.width as usize),
            Style::default().fg(Color::DarkGray),
        ))),
        footer,
    );
}

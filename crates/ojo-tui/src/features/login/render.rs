use ojo_core::session::Notice;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use crate::common::render_utils::{
    ACCENT, InputField, InputHint, centered_rect, render_button, render_hints, render_input_field,
};
use crate::common::mask_secret;
use crate::render::spinner;
use crate::state::AppState;

const FORM_WIDTH: u16 = 56;
const FIELD_HEIGHT: u16 = 3;
const NOTICE_HEIGHT: u16 = 2;

/// Renders the login form centered in `area`.
pub fn render_login(app: &AppState, frame: &mut Frame, area: Rect) {
    let session = &app.session;
    let fields = session.visible_fields();

    let mut constraints = vec![
        Constraint::Length(1), // heading
        Constraint::Length(1),
        Constraint::Length(1), // prompt
        Constraint::Length(1),
    ];
    constraints.extend(fields.iter().map(|_| Constraint::Length(FIELD_HEIGHT)));
    constraints.extend([
        Constraint::Length(1),
        Constraint::Length(1), // button
        Constraint::Length(1),
        Constraint::Length(NOTICE_HEIGHT),
        Constraint::Length(1), // hints
    ]);
    // Heading block, button block and hints around the fields.
    let height = 4 + FIELD_HEIGHT * fields.len() as u16 + 4 + NOTICE_HEIGHT;

    let form = centered_rect(FORM_WIDTH, height, area);
    let rows = Layout::vertical(constraints).split(form);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "Bienvenido",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center),
        rows[0],
    );
    frame.render_widget(
        Paragraph::new("Por favor, introduce tus credenciales:").alignment(Alignment::Center),
        rows[2],
    );

    for (i, field) in fields.iter().enumerate() {
        let value = session.form().value(*field);
        let display = if field.is_secret() {
            mask_secret(value)
        } else {
            value.to_string()
        };
        render_input_field(
            frame,
            rows[4 + i],
            &InputField {
                label: field.label(),
                display: &display,
                focused: app.login.focus == *field,
                enabled: session.result().is_none(),
            },
        );
    }

    let next = 4 + fields.len();
    if session.is_in_flight() {
        let line = Line::from(vec![
            Span::styled(spinner(app.spinner_frame), Style::default().fg(Color::Yellow)),
            Span::styled(" Analizando…", Style::default().fg(Color::Yellow)),
        ]);
        frame.render_widget(
            Paragraph::new(line).alignment(Alignment::Center),
            rows[next + 1],
        );
    } else {
        render_button(frame, rows[next + 1], "Analizar", session.can_submit());
    }

    if let Some(notice) = session.notice() {
        let color = match notice {
            Notice::TwoFactorPrompt => Color::Yellow,
            Notice::Error(_) => Color::Red,
        };
        frame.render_widget(
            Paragraph::new(notice.text().to_string())
                .style(Style::default().fg(color))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            rows[next + 3],
        );
    }

    render_hints(
        frame,
        rows[next + 4],
        &[
            InputHint::new("Enter", "analizar"),
            InputHint::new("Tab", "campo"),
            InputHint::new("Esc", "salir"),
        ],
    );
}

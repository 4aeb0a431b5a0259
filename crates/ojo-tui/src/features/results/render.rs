use ojo_core::analysis::AnalysisResult;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::{ResultList, ResultsView};
use crate::common::render_utils::{ACCENT, InputHint, card_block, render_button, render_hints};
use crate::common::truncate_with_ellipsis;
use crate::state::AppState;

/// Renders the four result cards and the logout action.
pub fn render_results(app: &AppState, frame: &mut Frame, area: Rect) {
    let Some(result) = app.session.result() else {
        return;
    };

    let [title, counts, lists, button, hints] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(3),
        Constraint::Min(3),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "Resultados del análisis",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center),
        title,
    );

    let [followers, following] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(counts);
    render_count_card(frame, followers, "Seguidores", result.followers_count);
    render_count_card(frame, following, "Seguidos", result.following_count);

    let [left, right] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(lists);
    render_list_card(frame, left, &app.results, result, ResultList::NotFollowingBack);
    render_list_card(frame, right, &app.results, result, ResultList::Fans);

    render_button(frame, button, "Cerrar sesión", true);
    render_hints(
        frame,
        hints,
        &[
            InputHint::new("l", "cerrar sesión"),
            InputHint::new("Tab", "lista"),
            InputHint::new("↑↓", "desplazar"),
            InputHint::new("q", "salir"),
        ],
    );
}

fn render_count_card(frame: &mut Frame, area: Rect, label: &str, count: u64) {
    let block = card_block(label.to_string(), false);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            count.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .block(block),
        area,
    );
}

fn render_list_card(
    frame: &mut Frame,
    area: Rect,
    view: &ResultsView,
    result: &AnalysisResult,
    list: ResultList,
) {
    let names = match list {
        ResultList::NotFollowingBack => &result.not_following_back,
        ResultList::Fans => &result.fans,
    };
    let block = card_block(format!("{} ({})", list.title(), names.len()), view.focus == list);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    view.set_list_height(inner.height);

    let width = inner.width as usize;
    let rows = inner.height as usize;
    // The stored offset may predate a resize; never leave trailing blank rows.
    let offset = view.offset(list).min(names.len().saturating_sub(rows));
    let lines: Vec<Line> = if names.is_empty() {
        vec![Line::from(Span::styled(
            "Nadie",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        names
            .iter()
            .skip(offset)
            .take(rows)
            .map(|name| Line::from(truncate_with_ellipsis(name, width)))
            .collect()
    };
    frame.render_widget(Paragraph::new(lines), inner);
}

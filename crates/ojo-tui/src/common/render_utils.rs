use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::truncate_start_with_ellipsis;

/// Accent used for focus and titles.
pub const ACCENT: Color = Color::Cyan;

/// Helper struct for keyboard hints.
pub struct InputHint<'a> {
    pub key: &'a str,
    pub action: &'a str,
}

impl<'a> InputHint<'a> {
    pub fn new(key: &'a str, action: &'a str) -> Self {
        Self { key, action }
    }
}

/// Renders a centered line of keyboard hints: "Enter analizar • Esc salir".
pub fn render_hints(frame: &mut Frame, area: Rect, hints: &[InputHint<'_>]) {
    let mut spans = Vec::new();
    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" • ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(hint.key, Style::default().fg(ACCENT)));
        spans.push(Span::styled(
            format!(" {}", hint.action),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let para = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(para, area);
}

/// A labeled single-line text field.
pub struct InputField<'a> {
    pub label: &'a str,
    /// Text as it should be displayed (already masked for secrets).
    pub display: &'a str,
    pub focused: bool,
    pub enabled: bool,
}

/// Renders a bordered input box titled with the field label, with a block
/// cursor after the text when focused.
pub fn render_input_field(frame: &mut Frame, area: Rect, field: &InputField<'_>) {
    let border_color = if field.focused {
        ACCENT
    } else {
        Color::DarkGray
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(format!(" {} ", field.label));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let text_color = if field.enabled {
        Color::White
    } else {
        Color::DarkGray
    };
    let max_text_width = inner.width.saturating_sub(1) as usize;
    let mut spans = vec![Span::styled(
        truncate_start_with_ellipsis(field.display, max_text_width),
        Style::default().fg(text_color),
    )];
    if field.focused && field.enabled {
        spans.push(Span::styled("█", Style::default().fg(ACCENT)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), inner);
}

/// Renders a centered button label like "[ Analizar ]".
pub fn render_button(frame: &mut Frame, area: Rect, label: &str, enabled: bool) {
    let style = if enabled {
        Style::default().fg(Color::Black).bg(ACCENT)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let para = Paragraph::new(Line::from(Span::styled(format!("[ {label} ]"), style)))
        .alignment(Alignment::Center);
    frame.render_widget(para, area);
}

/// Bordered block with a bold title, highlighted when focused.
pub fn card_block(title: String, focused: bool) -> Block<'static> {
    let color = if focused { ACCENT } else { Color::DarkGray };
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(Span::styled(
            format!(" {title} "),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
}

/// Returns a rectangle of at most `width` x `height` centered in `r`.
pub fn centered_rect(width: u16, height: u16, r: Rect) -> Rect {
    let width = width.min(r.width);
    let height = height.min(r.height);
    Rect::new(
        r.x + (r.width - width) / 2,
        r.y + (r.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_fits_inside() {
        let outer = Rect::new(0, 0, 80, 24);
        assert_eq!(centered_rect(40, 10, outer), Rect::new(20, 7, 40, 10));
        assert_eq!(centered_rect(100, 30, outer), outer);
    }
}

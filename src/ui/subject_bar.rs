use crate::models::Subject;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Row of mutually exclusive subject toggles, F1..F4 from left to right.
pub fn draw_subject_bar(f: &mut Frame<'_>, area: Rect, selected: Subject) {
    let mut spans = Vec::with_capacity(Subject::ALL.len() * 2);

    for (i, subject) in Subject::ALL.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        let style = if *subject == selected {
            Style::default()
                .fg(Color::Black)
                .bg(Color::LightMagenta)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(
            format!(" F{} {} ", i + 1, subject.label()),
            style,
        ));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

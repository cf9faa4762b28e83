use crate::app::App;
use crate::chat_message::render_message;
use crate::transcript::Transcript;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Flattens the transcript into display lines, one block per message.
pub fn transcript_lines(transcript: &Transcript, width: u16) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for message in transcript {
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        lines.extend(render_message(message, width));
    }
    lines
}

pub fn draw_transcript(f: &mut Frame<'_>, area: Rect, app: &mut App) {
    if app.conversation.transcript().is_empty() {
        app.step_scroll(0);
        draw_welcome(f, area);
        return;
    }

    let lines = transcript_lines(app.conversation.transcript(), area.width);
    let total_lines = lines.len().min(u16::MAX as usize) as u16;
    app.step_scroll(total_lines.saturating_sub(area.height));

    f.render_widget(Paragraph::new(lines).scroll((app.chat_scroll, 0)), area);
}

fn draw_welcome(f: &mut Frame<'_>, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Welcome to Atomia",
            Style::default()
                .fg(Color::LightMagenta)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Your AI doubt partner for Physics, Chemistry, Mathematics and Biology."),
        Line::from("Pick a subject with F1-F4 or Tab, type a question and press Enter."),
        Line::from(""),
        Line::from(Span::styled(
            "Answers come step by step, with the reasoning shown.",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let panel = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    f.render_widget(panel, area);
}

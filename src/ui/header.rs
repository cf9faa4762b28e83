use crate::app::{App, ServiceStatus};
use crate::constants::APP_TITLE;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn draw_header(f: &mut Frame<'_>, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let title = Paragraph::new(Span::styled(
        APP_TITLE,
        Style::default()
            .fg(Color::LightMagenta)
            .add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Left);
    f.render_widget(title, chunks[0]);

    f.render_widget(
        Paragraph::new(service_line(&app.service)).alignment(Alignment::Right),
        chunks[1],
    );
}

fn service_line(status: &ServiceStatus) -> Line<'static> {
    match status {
        ServiceStatus::Unknown => Line::from(Span::styled(
            "○ connecting...",
            Style::default().fg(Color::DarkGray),
        )),
        ServiceStatus::Offline => Line::from(Span::styled(
            "○ offline",
            Style::default().fg(Color::Red),
        )),
        ServiceStatus::Online(info) => {
            let mut spans = vec![Span::styled("● online", Style::default().fg(Color::Green))];
            if let Some(version) = &info.version {
                spans.push(Span::styled(
                    format!(" · v{}", version),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            if !info.llm_enabled {
                spans.push(Span::styled(
                    " · LLM offline",
                    Style::default().fg(Color::Yellow),
                ));
            }
            Line::from(spans)
        }
    }
}

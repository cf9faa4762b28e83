use crate::app::{App, AppState};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::{Paragraph, Wrap},
    Frame,
};

/// Draws the footer with dynamic instructions
pub fn draw_footer(f: &mut Frame<'_>, area: Rect, app: &App) {
    let instructions = match app.state {
        AppState::QuitConfirm => "Press 'y' to confirm quit or 'n' to cancel.",
        _ if app.conversation.is_busy() => {
            "Waiting for Atomia... · F1-F4/Tab subject · PgUp/PgDn scroll · Esc quit"
        }
        _ => "Enter send · F1-F4/Tab subject · PgUp/PgDn scroll · Ctrl+R recall · Esc quit",
    };

    let footer = Paragraph::new(instructions)
        .style(Style::default().fg(Color::LightCyan))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    f.render_widget(footer, area);
}

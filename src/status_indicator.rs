use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const SPINNER_FRAMES: [&str; 4] = ["◐", "◓", "◑", "◒"];

#[derive(Debug, Default)]
pub struct StatusIndicator {
    thinking: bool,
    status_text: String,
    spinner_idx: usize,
}

impl StatusIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_thinking(&self) -> bool {
        self.thinking
    }

    pub fn set_thinking(&mut self, thinking: bool) {
        self.thinking = thinking;
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status_text = status.into();
    }

    pub fn clear_status(&mut self) {
        self.status_text.clear();
    }

    pub fn update_spinner(&mut self) {
        if self.thinking {
            self.spinner_idx = self.spinner_idx.wrapping_add(1);
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let thinking_indicator = if self.thinking {
            SPINNER_FRAMES[self.spinner_idx % SPINNER_FRAMES.len()]
        } else {
            " "
        };

        let status_text = if !self.status_text.is_empty() {
            self.status_text.as_str()
        } else if self.thinking {
            "Processing..."
        } else {
            ""
        };

        let status_color = if self.thinking {
            Color::DarkGray
        } else {
            Color::Yellow
        };

        let status = Line::from(vec![
            Span::styled(thinking_indicator, Style::default().fg(Color::Gray)),
            Span::raw(" "),
            Span::styled(status_text.to_string(), Style::default().fg(status_color)),
        ]);

        frame.render_widget(
            Paragraph::new(status).alignment(Alignment::Left),
            Rect {
                x: area.x,
                y: area.y + area.height.saturating_sub(1),
                width: area.width,
                height: area.height.min(1),
            },
        );
    }
}

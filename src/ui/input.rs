use crate::constants::{INPUT_PREFIX, SEND_LABEL};
use crate::exchange::Conversation;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub fn draw_input(f: &mut Frame<'_>, area: Rect, conversation: &Conversation) {
    if area.height < 3 {
        return;
    }

    let separator = "─".repeat(area.width as usize);
    let separator_style = Style::default().fg(Color::DarkGray);
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(separator.clone(), separator_style))),
        Rect { height: 1, ..area },
    );
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(separator, separator_style))),
        Rect {
            y: area.y + area.height - 1,
            height: 1,
            ..area
        },
    );

    let send_width = SEND_LABEL.width() as u16;
    let prefix_width = INPUT_PREFIX.width() as u16;
    let field_width = area.width.saturating_sub(send_width + 1);

    let visible_width = field_width.saturating_sub(prefix_width + 1);
    let text_width = conversation.input().width();
    let scroll_offset = text_width.saturating_sub(visible_width as usize);

    let input = Line::from(vec![
        Span::styled(INPUT_PREFIX, Style::default().fg(Color::DarkGray)),
        Span::styled(
            visible_tail(conversation.input(), scroll_offset),
            Style::default().fg(Color::White),
        ),
    ]);
    f.render_widget(
        Paragraph::new(input),
        Rect {
            y: area.y + 1,
            width: field_width,
            height: 1,
            ..area
        },
    );

    let send_style = if conversation.is_busy() {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::DIM)
    } else {
        Style::default()
            .fg(Color::LightGreen)
            .add_modifier(Modifier::BOLD)
    };
    f.render_widget(
        Paragraph::new(Span::styled(SEND_LABEL, send_style)),
        Rect {
            x: area.x + area.width.saturating_sub(send_width),
            y: area.y + 1,
            width: send_width.min(area.width),
            height: 1,
        },
    );

    // Once scrolled, the cursor sits at the right edge of the visible text.
    let cursor_offset = (text_width - scroll_offset).min(visible_width as usize);
    let cursor_x = area.x + prefix_width + u16::try_from(cursor_offset).unwrap_or(visible_width);
    f.set_cursor_position((cursor_x, area.y + 1));
}

/// Drops leading characters until at least `skip` columns are gone.
fn visible_tail(text: &str, skip: usize) -> &str {
    let mut skipped = 0;
    for (idx, c) in text.char_indices() {
        if skipped >= skip {
            return &text[idx..];
        }
        skipped += c.width().unwrap_or(0);
    }
    if skipped >= skip {
        ""
    } else {
        text
    }
}

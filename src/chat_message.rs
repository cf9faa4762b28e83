use crate::models::{Message, Role};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use textwrap::wrap;

const USER_INDENT: &str = "  ";

fn base_style(role: Role) -> Style {
    match role {
        Role::User => Style::default().fg(Color::Rgb(255, 223, 128)),
        Role::Assistant => Style::default().fg(Color::Rgb(144, 238, 144)),
    }
}

fn indent(role: Role) -> &'static str {
    match role {
        Role::User => USER_INDENT,
        Role::Assistant => "",
    }
}

/// Renders one transcript entry as a bordered block of lines wrapped to `width`.
pub fn render_message(message: &Message, width: u16) -> Vec<Line<'static>> {
    let role = message.role();
    let style = base_style(role);
    let mut lines = Vec::new();

    render_header(&mut lines, message, style);
    render_content(&mut lines, message, width, style);
    lines.push(Line::from(vec![
        Span::styled(indent(role).to_string(), style),
        Span::styled("╰─".to_string(), style),
    ]));

    lines
}

fn render_header(lines: &mut Vec<Line<'static>>, message: &Message, style: Style) {
    let author = match message.role() {
        Role::User => "You",
        Role::Assistant => "Atomia",
    };
    let timestamp = message.timestamp().format("%H:%M").to_string();

    lines.push(Line::from(vec![
        Span::styled(indent(message.role()).to_string(), style),
        Span::styled("┌─ ".to_string(), style),
        Span::styled(author.to_string(), style.add_modifier(Modifier::BOLD)),
        Span::styled(" ".to_string(), style),
        Span::styled(timestamp, style.add_modifier(Modifier::DIM)),
    ]));
}

fn render_content(lines: &mut Vec<Line<'static>>, message: &Message, width: u16, style: Style) {
    let indent = indent(message.role());
    let mut in_code_block = false;
    let mut code_buffer = String::new();
    let mut text_buffer = String::new();

    for line in message.text().lines() {
        if line.trim().starts_with("```") {
            flush_text_buffer(lines, &text_buffer, width, style, indent);
            flush_code_buffer(lines, &code_buffer, width, style, indent);
            text_buffer.clear();
            code_buffer.clear();
            in_code_block = !in_code_block;
            continue;
        }

        let buffer = if in_code_block {
            &mut code_buffer
        } else {
            &mut text_buffer
        };
        buffer.push_str(line);
        buffer.push('\n');
    }

    flush_text_buffer(lines, &text_buffer, width, style, indent);
    flush_code_buffer(lines, &code_buffer, width, style, indent);
}

fn flush_text_buffer(
    lines: &mut Vec<Line<'static>>,
    buffer: &str,
    width: u16,
    style: Style,
    indent: &str,
) {
    if buffer.is_empty() {
        return;
    }

    // indent + "│ " gutter
    let wrap_width = (width as usize).saturating_sub(indent.len() + 2).max(1);

    for raw_line in buffer.lines() {
        // Keep blank lines so paragraphs stay separated.
        if raw_line.trim().is_empty() {
            lines.push(Line::from(vec![
                Span::styled(indent.to_string(), style),
                Span::styled("│".to_string(), style),
            ]));
            continue;
        }
        for wrapped_line in wrap(raw_line, wrap_width) {
            lines.push(Line::from(vec![
                Span::styled(indent.to_string(), style),
                Span::styled("│ ".to_string(), style),
                Span::styled(wrapped_line.to_string(), style),
            ]));
        }
    }
}

fn flush_code_buffer(
    lines: &mut Vec<Line<'static>>,
    buffer: &str,
    width: u16,
    style: Style,
    indent: &str,
) {
    if buffer.is_empty() {
        return;
    }

    let code_style = Style::default()
        .fg(Color::Rgb(209, 154, 102))
        .add_modifier(Modifier::BOLD);

    // indent + "│ " + "▎ " gutter
    let wrap_width = (width as usize).saturating_sub(indent.len() + 4).max(1);

    for code_line in buffer.lines() {
        for wrapped_line in wrap(code_line, wrap_width) {
            lines.push(Line::from(vec![
                Span::styled(indent.to_string(), style),
                Span::styled("│ ".to_string(), style),
                Span::styled("▎".to_string(), Style::default().fg(Color::DarkGray)),
                Span::styled(format!(" {}", wrapped_line), code_style),
            ]));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(lines: &[Line<'_>]) -> Vec<String> {
        lines
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn test_roles_render_differently() {
        let user = render_message(&Message::user("hello"), 40);
        let assistant = render_message(&Message::assistant("hello"), 40);

        let user_text = plain(&user);
        let assistant_text = plain(&assistant);
        assert!(user_text[0].starts_with("  ┌─ You"));
        assert!(assistant_text[0].starts_with("┌─ Atomia"));
        assert_ne!(user[1].spans[2].style, assistant[1].spans[2].style);
    }

    #[test]
    fn test_long_text_wraps_to_width() {
        let message = Message::assistant("word ".repeat(30));
        let lines = render_message(&message, 20);

        // header + several wrapped body lines + footer
        assert!(lines.len() > 4);
        for line in &plain(&lines)[1..lines.len() - 1] {
            assert!(line.chars().count() <= 20, "line too wide: {:?}", line);
        }
    }

    #[test]
    fn test_code_block_gets_gutter() {
        let message = Message::assistant("Try this:\n```\nv = u + at\n```\nDone.");
        let text = plain(&render_message(&message, 60));

        assert!(text.iter().any(|l| l.contains("▎ v = u + at")));
        assert!(!text.iter().any(|l| l.contains("```")));
        assert!(text.iter().any(|l| l.contains("Done.")));
    }

    #[test]
    fn test_long_code_line_wraps_with_gutter() {
        let code = format!("{}END", "x".repeat(120));
        let message = Message::assistant(format!("```\n{}\n```", code));
        let text = plain(&render_message(&message, 78));

        let body: Vec<&String> = text.iter().filter(|l| l.contains('▎')).collect();
        assert!(body.len() > 1);
        for line in &body {
            assert!(line.chars().count() <= 78, "line too wide: {:?}", line);
        }
        let joined: String = body
            .iter()
            .map(|l| l.trim_start_matches("│ ▎ "))
            .collect();
        assert_eq!(joined, code);
    }
}

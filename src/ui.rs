// src/ui.rs

pub mod chat;
pub mod footer;
pub mod header;
pub mod input;
pub mod quit_confirm;
pub mod subject_bar;

use crate::{
    api::AtomiaClient,
    app::{App, AppState},
    config::Config,
    constants::TICK_RATE_MS,
    errors::AtomiaResult,
    key_handlers::{handle_chat_input, handle_quit_confirm_input, ChatAction},
    models::{ChatResponse, ServiceInfo},
};
use crossterm::{
    event::{self, Event as CEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::{
    io,
    time::{Duration, Instant},
};
use tokio::sync::mpsc;

/// Everything the UI loop reacts to.
#[derive(Debug)]
pub enum Event {
    Input(CEvent),
    Tick,
    ExchangeFinished(AtomiaResult<ChatResponse>),
    ServiceProbed(AtomiaResult<ServiceInfo>),
}

/// Runs the terminal UI until the user quits.
pub async fn run_ui(config: Config) -> AtomiaResult<()> {
    let client = AtomiaClient::new(&config.api_base_url, config.request_timeout())?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let app = App::new(config.default_subject);
    let res = run_app(&mut terminal, app, client).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    client: AtomiaClient,
) -> AtomiaResult<()> {
    let (tx, mut rx) = mpsc::channel::<Event>(100);

    spawn_input_reader(tx.clone());
    spawn_service_probe(client.clone(), tx.clone());

    loop {
        terminal.draw(|f| draw(f, &mut app))?;

        let Some(event) = rx.recv().await else {
            break;
        };

        match event {
            Event::Input(CEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                match app.state {
                    AppState::Chat => {
                        if let Some(ChatAction::Submit) = handle_chat_input(key, &mut app) {
                            if let Some(request) = app.begin_exchange() {
                                let client = client.clone();
                                let tx = tx.clone();
                                tokio::spawn(async move {
                                    let result = client.send_chat(&request).await;
                                    let _ = tx.send(Event::ExchangeFinished(result)).await;
                                });
                            }
                        }
                    }
                    AppState::QuitConfirm => handle_quit_confirm_input(key, &mut app),
                    AppState::Quit => {}
                }
            }
            Event::Input(_) => {}
            Event::Tick => app.on_tick(),
            Event::ExchangeFinished(result) => app.complete_exchange(result),
            Event::ServiceProbed(result) => app.set_service_status(result),
        }

        if app.state == AppState::Quit {
            break;
        }
    }

    Ok(())
}

/// Reads terminal events on a blocking thread and emits ticks in between.
fn spawn_input_reader(tx: mpsc::Sender<Event>) {
    tokio::task::spawn_blocking(move || {
        pump_terminal_events(
            &tx,
            Duration::from_millis(TICK_RATE_MS),
            event::poll,
            event::read,
        )
    });
}

/// Forwards terminal events and ticks until the receiver goes away or the
/// terminal stops delivering events.
fn pump_terminal_events<P, R>(
    tx: &mpsc::Sender<Event>,
    tick_rate: Duration,
    mut poll: P,
    mut read: R,
) where
    P: FnMut(Duration) -> io::Result<bool>,
    R: FnMut() -> io::Result<CEvent>,
{
    let mut last_tick = Instant::now();
    loop {
        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        match poll(timeout) {
            Ok(true) => match read() {
                Ok(ev) => {
                    if tx.blocking_send(Event::Input(ev)).is_err() {
                        return;
                    }
                }
                Err(e) => {
                    log::error!("failed to read terminal event: {}", e);
                    return;
                }
            },
            Ok(false) => {}
            Err(e) => {
                log::error!("failed to poll terminal events: {}", e);
                return;
            }
        }

        if last_tick.elapsed() >= tick_rate {
            if tx.blocking_send(Event::Tick).is_err() {
                return;
            }
            last_tick = Instant::now();
        }
    }
}

fn spawn_service_probe(client: AtomiaClient, tx: mpsc::Sender<Event>) {
    tokio::spawn(async move {
        log::info!("probing backend at {}", client.base_url());
        let result = client.service_info().await;
        let _ = tx.send(Event::ServiceProbed(result)).await;
    });
}

/// Renders the whole screen.
pub fn draw(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Length(1), // Subjects
            Constraint::Min(1),    // Transcript
            Constraint::Length(1), // Status
            Constraint::Length(3), // Input
            Constraint::Length(1), // Footer
        ])
        .split(f.area());

    header::draw_header(f, chunks[0], app);
    subject_bar::draw_subject_bar(f, chunks[1], app.conversation.subject());
    chat::draw_transcript(f, chunks[2], app);
    app.status_indicator.render(f, chunks[3]);
    input::draw_input(f, chunks[4], &app.conversation);
    footer::draw_footer(f, chunks[5], app);

    if app.state == AppState::QuitConfirm {
        quit_confirm::draw_quit_confirm(f, f.area());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::FALLBACK_REPLY;
    use crate::errors::AtomiaError;
    use crate::models::Subject;
    use crossterm::event::{KeyCode, KeyEvent};
    use ratatui::{backend::TestBackend, buffer::Buffer, style::Modifier};

    fn render(app: &mut App, width: u16, height: u16) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        terminal.backend().buffer().clone()
    }

    fn screen_text(buffer: &Buffer) -> String {
        let area = buffer.area;
        let mut out = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn reply(text: &str) -> ChatResponse {
        ChatResponse {
            session_id: "abc".to_string(),
            text_response: text.to_string(),
            subject: None,
            confidence: None,
        }
    }

    #[test]
    fn test_empty_transcript_shows_welcome() {
        let mut app = App::new(Subject::Physics);
        let text = screen_text(&render(&mut app, 100, 30));
        assert!(text.contains("Welcome to Atomia"));
        assert!(text.contains("F1 Physics"));
        assert!(text.contains("F4 Biology"));
    }

    #[test]
    fn test_transcript_replaces_welcome() {
        let mut app = App::new(Subject::Physics);
        app.conversation.set_input("What is torque?");
        app.begin_exchange().unwrap();
        app.complete_exchange(Ok(reply("Torque is r x F.")));

        let text = screen_text(&render(&mut app, 100, 30));
        assert!(!text.contains("Welcome to Atomia"));
        assert!(text.contains("What is torque?"));
        assert!(text.contains("Torque is r x F."));
    }

    #[test]
    fn test_failure_shows_fallback() {
        let mut app = App::new(Subject::Physics);
        app.conversation.set_input("hello");
        app.begin_exchange().unwrap();
        app.complete_exchange(Err(AtomiaError::api_error("502")));

        let text = screen_text(&render(&mut app, 100, 30));
        assert!(text.contains("Unable to reach Atomia API"));
        assert_eq!(
            app.conversation.transcript().last().unwrap().text(),
            FALLBACK_REPLY
        );
    }

    #[test]
    fn test_send_control_dimmed_while_busy() {
        let mut app = App::new(Subject::Physics);
        let idle = render(&mut app, 80, 24);

        app.conversation.set_input("question");
        app.begin_exchange().unwrap();
        let busy = render(&mut app, 80, 24);

        // Input row sits above the bottom separator, footer and margin.
        let y = 24 - 4;
        let x = 80 - 2;
        assert!(!idle[(x, y)].modifier.contains(Modifier::DIM));
        assert!(busy[(x, y)].modifier.contains(Modifier::DIM));
    }

    #[test]
    fn test_follows_latest_message() {
        let mut app = App::new(Subject::Physics);
        for i in 0..12 {
            app.conversation.set_input(format!("question {}", i));
            app.begin_exchange().unwrap();
            app.complete_exchange(Ok(reply(&format!("answer {}", i))));
        }

        // Let the scroll animation settle.
        for _ in 0..11 {
            render(&mut app, 80, 24);
        }
        let text = screen_text(&render(&mut app, 80, 24));
        assert_eq!(app.chat_scroll, app.max_scroll);
        assert!(app.max_scroll > 0);
        assert!(text.contains("answer 11"));
        assert!(!text.contains("question 0"));
    }

    #[test]
    fn test_quit_confirm_overlay() {
        let mut app = App::new(Subject::Physics);
        app.state = AppState::QuitConfirm;
        let text = screen_text(&render(&mut app, 80, 24));
        assert!(text.contains("Confirm Quit"));
    }

    #[test]
    fn test_long_code_line_is_fully_visible() {
        let mut app = App::new(Subject::Physics);
        app.conversation.set_input("show me");
        app.begin_exchange().unwrap();
        let code = format!("{}END", "x".repeat(120));
        app.complete_exchange(Ok(reply(&format!("```\n{}\n```", code))));

        for _ in 0..8 {
            render(&mut app, 80, 24);
        }
        let text = screen_text(&render(&mut app, 80, 24));
        assert!(text.contains("xEND"));
    }

    #[test]
    fn test_huge_input_keeps_tail_and_cursor_in_field() {
        let mut app = App::new(Subject::Physics);
        app.conversation.set_input(format!("{}END", "a".repeat(70_000)));

        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| draw(f, &mut app)).unwrap();

        let text = screen_text(terminal.backend().buffer());
        assert!(text.contains("aEND"));

        // margin 1 + prefix 2 + visible field width 64
        let cursor = terminal.backend_mut().get_cursor_position().unwrap();
        assert_eq!(cursor.x, 67);
        assert_eq!(cursor.y, 20);
    }

    #[test]
    fn test_input_reader_stops_on_read_error() {
        let (tx, mut rx) = mpsc::channel::<Event>(8);
        let mut reads = 0;

        pump_terminal_events(
            &tx,
            Duration::from_secs(60),
            |_| Ok(true),
            || {
                reads += 1;
                Err(io::Error::new(io::ErrorKind::Other, "tty gone"))
            },
        );

        assert_eq!(reads, 1);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_input_reader_forwards_events_until_receiver_drops() {
        let (tx, mut rx) = mpsc::channel::<Event>(1);
        let mut polls = 0;

        // The first event fills the channel; close the receiver afterwards so
        // the second send fails and the loop ends.
        let key = CEvent::Key(KeyEvent::from(KeyCode::Enter));
        let mut sent = 0;
        pump_terminal_events(
            &tx,
            Duration::from_secs(60),
            |_| {
                polls += 1;
                Ok(true)
            },
            || {
                sent += 1;
                if sent == 2 {
                    rx.close();
                }
                Ok(key.clone())
            },
        );

        assert_eq!(polls, 2);
        assert!(matches!(rx.try_recv(), Ok(Event::Input(CEvent::Key(_)))));
    }
}

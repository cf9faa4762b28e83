use crate::app::{App, AppState};
use crate::models::Subject;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

const PAGE: u16 = 5;

/// Something the event loop has to do beyond mutating `App`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatAction {
    Submit,
}

pub fn handle_chat_input(key: KeyEvent, app: &mut App) -> Option<ChatAction> {
    match key.code {
        KeyCode::Esc => app.state = AppState::QuitConfirm,
        KeyCode::Enter => return Some(ChatAction::Submit),
        KeyCode::Tab => app.conversation.next_subject(),
        KeyCode::BackTab => app.conversation.previous_subject(),
        KeyCode::F(n @ 1..=4) => {
            if let Some(subject) = Subject::from_index(n as usize - 1) {
                app.conversation.select_subject(subject);
            }
        }
        KeyCode::PageUp => app.page_up(PAGE),
        KeyCode::PageDown => app.page_down(PAGE),
        KeyCode::End => app.scroll_to_latest(),
        KeyCode::Backspace => app.conversation.pop_char(),
        KeyCode::Char(c) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                match c {
                    'c' => app.state = AppState::QuitConfirm,
                    'u' => app.page_up(PAGE),
                    'd' => app.page_down(PAGE),
                    'r' => {
                        app.conversation.recall_last_message();
                    }
                    _ => {}
                }
            } else {
                app.conversation.push_char(c);
            }
        }
        _ => {}
    }
    None
}

pub fn handle_quit_confirm_input(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => {
            app.state = AppState::Quit;
        }
        KeyCode::Char('n') | KeyCode::Esc => {
            app.state = AppState::Chat;
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_typing_and_enter() {
        let mut app = App::new(Subject::Physics);
        for c in "hi!".chars() {
            assert_eq!(handle_chat_input(key(KeyCode::Char(c)), &mut app), None);
        }
        handle_chat_input(key(KeyCode::Backspace), &mut app);
        assert_eq!(app.conversation.input(), "hi");
        assert_eq!(
            handle_chat_input(key(KeyCode::Enter), &mut app),
            Some(ChatAction::Submit)
        );
    }

    #[test]
    fn test_subject_keys() {
        let mut app = App::new(Subject::Physics);
        handle_chat_input(key(KeyCode::F(3)), &mut app);
        assert_eq!(app.conversation.subject(), Subject::Mathematics);
        handle_chat_input(key(KeyCode::Tab), &mut app);
        assert_eq!(app.conversation.subject(), Subject::Biology);
        handle_chat_input(key(KeyCode::Tab), &mut app);
        assert_eq!(app.conversation.subject(), Subject::Physics);
        handle_chat_input(key(KeyCode::BackTab), &mut app);
        assert_eq!(app.conversation.subject(), Subject::Biology);
        handle_chat_input(key(KeyCode::F(9)), &mut app);
        assert_eq!(app.conversation.subject(), Subject::Biology);
    }

    #[test]
    fn test_ctrl_c_asks_before_quitting() {
        let mut app = App::new(Subject::Physics);
        handle_chat_input(ctrl('c'), &mut app);
        assert_eq!(app.state, AppState::QuitConfirm);
        assert_eq!(app.conversation.input(), "");

        handle_quit_confirm_input(key(KeyCode::Char('n')), &mut app);
        assert_eq!(app.state, AppState::Chat);

        handle_chat_input(key(KeyCode::Esc), &mut app);
        handle_quit_confirm_input(key(KeyCode::Char('y')), &mut app);
        assert_eq!(app.state, AppState::Quit);
    }
}

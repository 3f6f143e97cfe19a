use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers, MouseEventKind};
use log::warn;

/// Terminal input, already mapped to what the home screen understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TuiEvent {
    Quit,
    Refresh,
    ScrollUp,
    ScrollDown,
    ScrollPageUp,
    ScrollPageDown,
    Resize,
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(Duration::ZERO)
}

/// Wait up to `timeout` for the next event. Unmapped input is dropped.
pub fn poll_event_timeout(timeout: Duration) -> Option<TuiEvent> {
    match event::poll(timeout) {
        Ok(true) => {}
        Ok(false) => return None,
        Err(e) => {
            warn!("Failed to poll terminal events: {}", e);
            return None;
        }
    }
    match event::read() {
        Ok(event) => map_event(event),
        Err(e) => {
            warn!("Failed to read terminal event: {}", e);
            None
        }
    }
}

fn map_event(event: Event) -> Option<TuiEvent> {
    match event {
        // Release/repeat events arrive when the keyboard enhancement protocol is on
        Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
            match (key_event.modifiers, key_event.code) {
                (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::Quit),
                (_, KeyCode::Char('q')) | (_, KeyCode::Esc) => Some(TuiEvent::Quit),
                (_, KeyCode::Char('r')) | (_, KeyCode::F(5)) => Some(TuiEvent::Refresh),
                (_, KeyCode::Up) => Some(TuiEvent::ScrollUp),
                (_, KeyCode::Down) => Some(TuiEvent::ScrollDown),
                (_, KeyCode::PageUp) => Some(TuiEvent::ScrollPageUp),
                (_, KeyCode::PageDown) => Some(TuiEvent::ScrollPageDown),
                _ => None,
            }
        }
        Event::Mouse(mouse_event) => match mouse_event.kind {
            MouseEventKind::ScrollUp => Some(TuiEvent::ScrollUp),
            MouseEventKind::ScrollDown => Some(TuiEvent::ScrollDown),
            _ => None,
        },
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyEventState, MouseEvent};

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    fn mouse(kind: MouseEventKind) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(
            map_event(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(TuiEvent::Quit)
        );
        assert_eq!(
            map_event(key(KeyCode::Char('q'), KeyModifiers::NONE)),
            Some(TuiEvent::Quit)
        );
        assert_eq!(map_event(key(KeyCode::Esc, KeyModifiers::NONE)), Some(TuiEvent::Quit));
    }

    #[test]
    fn test_refresh_keys() {
        assert_eq!(
            map_event(key(KeyCode::Char('r'), KeyModifiers::NONE)),
            Some(TuiEvent::Refresh)
        );
        assert_eq!(map_event(key(KeyCode::F(5), KeyModifiers::NONE)), Some(TuiEvent::Refresh));
    }

    #[test]
    fn test_plain_c_is_ignored() {
        assert_eq!(map_event(key(KeyCode::Char('c'), KeyModifiers::NONE)), None);
    }

    #[test]
    fn test_key_release_is_ignored() {
        let release = Event::Key(KeyEvent::new_with_kind_and_state(
            KeyCode::Char('q'),
            KeyModifiers::NONE,
            KeyEventKind::Release,
            KeyEventState::NONE,
        ));
        assert_eq!(map_event(release), None);
    }

    #[test]
    fn test_scrolling() {
        assert_eq!(map_event(key(KeyCode::Up, KeyModifiers::NONE)), Some(TuiEvent::ScrollUp));
        assert_eq!(
            map_event(key(KeyCode::PageDown, KeyModifiers::NONE)),
            Some(TuiEvent::ScrollPageDown)
        );
        assert_eq!(map_event(mouse(MouseEventKind::ScrollUp)), Some(TuiEvent::ScrollUp));
        assert_eq!(map_event(mouse(MouseEventKind::ScrollDown)), Some(TuiEvent::ScrollDown));
        assert_eq!(map_event(mouse(MouseEventKind::Moved)), None);
    }

    #[test]
    fn test_resize() {
        assert_eq!(map_event(Event::Resize(80, 24)), Some(TuiEvent::Resize));
    }
}

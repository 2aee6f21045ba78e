use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::screens::ScreenInput;

/// TUI-specific input events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiEvent {
    // Host events (handled directly in the TUI loop)
    ForceQuit,
    NextTab,
    PrevTab,
    Resize,

    // Screen events (forwarded to the visible screen)
    Back,
    Select,
    Up,
    Down,
    InputChar(char),
    Backspace,
}

impl TuiEvent {
    /// The screen-level input this event stands for, if any.
    pub fn as_screen_input(&self) -> Option<ScreenInput> {
        match self {
            TuiEvent::Back => Some(ScreenInput::Back),
            TuiEvent::Select => Some(ScreenInput::Select),
            TuiEvent::Up => Some(ScreenInput::Up),
            TuiEvent::Down => Some(ScreenInput::Down),
            TuiEvent::InputChar(c) => Some(ScreenInput::Char(*c)),
            TuiEvent::Backspace => Some(ScreenInput::Backspace),
            TuiEvent::ForceQuit | TuiEvent::NextTab | TuiEvent::PrevTab | TuiEvent::Resize => None,
        }
    }
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(Duration::ZERO)
}

/// Poll for an event, blocking up to `timeout`. Terminal read errors are
/// logged and treated as "no event".
pub fn poll_event_timeout(timeout: Duration) -> Option<TuiEvent> {
    match event::poll(timeout) {
        Ok(true) => {}
        Ok(false) => return None,
        Err(e) => {
            log::warn!("Event poll failed: {}", e);
            return None;
        }
    }
    match event::read() {
        Ok(event) => translate(event),
        Err(e) => {
            log::warn!("Event read failed: {}", e);
            None
        }
    }
}

fn translate(event: Event) -> Option<TuiEvent> {
    match event {
        Event::Key(key_event) => translate_key(key_event),
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    }
}

fn translate_key(key_event: KeyEvent) -> Option<TuiEvent> {
    // Keyboard enhancement reports releases too
    if key_event.kind != KeyEventKind::Press {
        return None;
    }
    log::debug!("Key event: {:?} with modifiers {:?}", key_event.code, key_event.modifiers);
    match (key_event.modifiers, key_event.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::ForceQuit),
        (_, KeyCode::Tab) => Some(TuiEvent::NextTab),
        (_, KeyCode::BackTab) => Some(TuiEvent::PrevTab),
        (_, KeyCode::Esc) => Some(TuiEvent::Back),
        (_, KeyCode::Enter) => Some(TuiEvent::Select),
        (_, KeyCode::Up) => Some(TuiEvent::Up),
        (_, KeyCode::Down) => Some(TuiEvent::Down),
        (_, KeyCode::Backspace) => Some(TuiEvent::Backspace),
        (_, KeyCode::Char(c)) => Some(TuiEvent::InputChar(c)),
        _ => None,
    }
}

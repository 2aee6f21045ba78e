//! # TitleBar Component
//!
//! Single-line top bar. Shows the visible screen's title, and a back hint
//! when the innermost stack has something to pop:
//!
//! 1. **Can go back**: `"Zyna | Chat Bob Smith | ‹ Esc"`
//! 2. **Default**: `"Zyna | Chats"`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

pub struct TitleBar {
    pub screen_title: String,
    pub can_go_back: bool,
}

impl TitleBar {
    pub fn new(screen_title: String, can_go_back: bool) -> Self {
        Self {
            screen_title,
            can_go_back,
        }
    }

    fn text(&self) -> String {
        if self.can_go_back {
            format!("Zyna | {} | ‹ Esc", self.screen_title)
        } else {
            format!("Zyna | {}", self.screen_title)
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let line = Line::from(Span::styled(
            self.text(),
            Style::default().add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(line, area);
    }
}

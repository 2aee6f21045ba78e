//! Chat roster. Up/Down moves the selection, Enter opens the chat.

use std::cell::Cell;
use std::rc::Rc;

use crate::flows::{ChatsStep, NavStep};
use crate::nav::Stepper;

use super::data::Chat;
use super::{ListRow, ScreenContent, ScreenInput, ScreenView, step_selection};

pub struct ChatsListScreen {
    stepper: Stepper<NavStep>,
    chats: Rc<Vec<Chat>>,
    selected: Cell<usize>,
}

impl ChatsListScreen {
    pub fn new(chats: Rc<Vec<Chat>>) -> Self {
        Self {
            stepper: Stepper::new(),
            chats,
            selected: Cell::new(0),
        }
    }

    pub fn stepper(&self) -> Stepper<NavStep> {
        self.stepper.clone()
    }

    pub fn selected(&self) -> usize {
        self.selected.get()
    }

    /// Ask to open the currently selected chat.
    pub fn open_selected(&self) {
        if let Some(chat) = self.chats.get(self.selected.get()) {
            self.stepper.emit(NavStep::Chats(ChatsStep::Chat {
                chat_id: chat.id.clone(),
            }));
        }
    }
}

impl ScreenView for ChatsListScreen {
    fn title(&self) -> String {
        "Chats".to_string()
    }

    fn content(&self) -> ScreenContent {
        ScreenContent::List {
            rows: self
                .chats
                .iter()
                .map(|chat| ListRow {
                    title: format!("{}  {}", chat.initials, chat.name),
                    detail: chat.last_message.clone(),
                    trailing: chat.timestamp.clone(),
                    badge: (chat.unread > 0).then_some(chat.unread),
                    online: chat.online,
                })
                .collect(),
            selected: self.selected.get(),
        }
    }

    fn handle_input(&self, input: ScreenInput) {
        match input {
            ScreenInput::Select => self.open_selected(),
            other => self
                .selected
                .set(step_selection(self.selected.get(), self.chats.len(), other)),
        }
    }

    fn hints(&self) -> &'static str {
        " ↑↓ Select  Enter Open  Tab Switch tab "
    }
}

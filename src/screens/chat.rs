//! A single conversation. Esc goes back to the roster.

use crate::flows::{ChatsStep, NavStep};
use crate::nav::Stepper;

use super::data::{Chat, Message};
use super::{ScreenContent, ScreenInput, ScreenView};

pub struct ChatScreen {
    stepper: Stepper<NavStep>,
    chat: Chat,
    messages: Vec<Message>,
}

impl ChatScreen {
    pub fn new(chat: Chat) -> Self {
        let messages = chat.history();
        Self {
            stepper: Stepper::new(),
            chat,
            messages,
        }
    }

    pub fn stepper(&self) -> Stepper<NavStep> {
        self.stepper.clone()
    }

    pub fn chat_id(&self) -> &str {
        &self.chat.id
    }
}

impl ScreenView for ChatScreen {
    fn title(&self) -> String {
        format!("Chat {}", self.chat.name)
    }

    fn content(&self) -> ScreenContent {
        ScreenContent::Conversation {
            messages: self.messages.clone(),
        }
    }

    fn handle_input(&self, input: ScreenInput) {
        if input == ScreenInput::Back {
            self.stepper.emit(NavStep::Chats(ChatsStep::Back));
        }
    }

    fn hints(&self) -> &'static str {
        " Esc Back "
    }
}

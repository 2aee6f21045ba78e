//! # Screens
//!
//! The view collaborators the flows put into containers. Each screen owns a
//! `Stepper` and turns user input into steps; none of them knows which flow
//! (if any) is listening.
//!
//! Screens describe themselves as host-neutral `ScreenContent`. Drawing that
//! content is the host's job (see `tui`).
//!
//! ```text
//! screens/
//! ├── auth.rs        (sign-in form, emits App(Main))
//! ├── chats_list.rs  (chat roster, emits Chats(Chat { chat_id }))
//! ├── chat.rs        (conversation, emits Chats(Back))
//! ├── profile.rs     (read-only profile card)
//! ├── settings.rs    (settings list)
//! └── data.rs        (chat and message models, sample roster)
//! ```

pub mod auth;
pub mod chat;
pub mod chats_list;
pub mod data;
pub mod profile;
pub mod settings;

pub use auth::AuthScreen;
pub use chat::ChatScreen;
pub use chats_list::ChatsListScreen;
pub use data::{Chat, Message, sample_chats};
pub use profile::ProfileScreen;
pub use settings::SettingsScreen;

/// Input a host forwards to the visible screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenInput {
    Up,
    Down,
    Select,
    Back,
    Char(char),
    Backspace,
}

/// One row of a list screen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListRow {
    pub title: String,
    pub detail: String,
    pub trailing: String,
    pub badge: Option<u32>,
    pub online: bool,
}

/// What a screen wants shown, independent of how it is drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenContent {
    /// A single-line text form.
    Form { prompt: String, value: String },
    /// Selectable rows.
    List { rows: Vec<ListRow>, selected: usize },
    /// Chat history, oldest first.
    Conversation { messages: Vec<Message> },
    /// Label/value pairs.
    Card { fields: Vec<(String, String)> },
}

pub trait ScreenView {
    fn title(&self) -> String;

    fn content(&self) -> ScreenContent;

    /// React to input. Navigation happens only through the screen's stepper.
    fn handle_input(&self, input: ScreenInput);

    /// Key help shown by the host.
    fn hints(&self) -> &'static str {
        ""
    }
}

/// Move a list selection by one row, clamped to `len`.
pub(crate) fn step_selection(selected: usize, len: usize, input: ScreenInput) -> usize {
    match input {
        ScreenInput::Up => selected.saturating_sub(1),
        ScreenInput::Down if len > 0 => (selected + 1).min(len - 1),
        _ => selected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_selection_clamps_both_ends() {
        assert_eq!(step_selection(0, 3, ScreenInput::Up), 0);
        assert_eq!(step_selection(2, 3, ScreenInput::Down), 2);
        assert_eq!(step_selection(1, 3, ScreenInput::Down), 2);
        assert_eq!(step_selection(0, 0, ScreenInput::Down), 0);
        assert_eq!(step_selection(1, 3, ScreenInput::Select), 1);
    }
}

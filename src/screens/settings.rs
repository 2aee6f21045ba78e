use std::cell::Cell;

use crate::flows::NavStep;
use crate::nav::Stepper;

use super::{ListRow, ScreenContent, ScreenInput, ScreenView, step_selection};

const ENTRIES: [(&str, &str); 5] = [
    ("Notifications", "Sounds, badges, previews"),
    ("Privacy", "Last seen, read receipts"),
    ("Chats", "Wallpaper, text size"),
    ("Storage", "Media auto-download"),
    ("About", "Version and licenses"),
];

pub struct SettingsScreen {
    stepper: Stepper<NavStep>,
    selected: Cell<usize>,
}

impl SettingsScreen {
    pub fn new() -> Self {
        Self {
            stepper: Stepper::new(),
            selected: Cell::new(0),
        }
    }

    pub fn stepper(&self) -> Stepper<NavStep> {
        self.stepper.clone()
    }
}

impl Default for SettingsScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl ScreenView for SettingsScreen {
    fn title(&self) -> String {
        "Settings".to_string()
    }

    fn content(&self) -> ScreenContent {
        ScreenContent::List {
            rows: ENTRIES
                .iter()
                .map(|(title, detail)| ListRow {
                    title: (*title).to_string(),
                    detail: (*detail).to_string(),
                    ..ListRow::default()
                })
                .collect(),
            selected: self.selected.get(),
        }
    }

    fn handle_input(&self, input: ScreenInput) {
        self.selected
            .set(step_selection(self.selected.get(), ENTRIES.len(), input));
    }

    fn hints(&self) -> &'static str {
        " ↑↓ Select  Tab Switch tab "
    }
}

use chrono::{DateTime, Local, Utc};

use crate::core::session::Session;
use crate::flows::NavStep;
use crate::nav::Stepper;

use super::{ScreenContent, ScreenInput, ScreenView};

/// Read-only profile card for the signed-in user.
pub struct ProfileScreen {
    stepper: Stepper<NavStep>,
    display_name: String,
    signed_in_at: Option<i64>,
}

impl ProfileScreen {
    /// Prefer the session's name; fall back to `default_name` when nobody
    /// signed in on this device.
    pub fn new(session: Option<&Session>, default_name: &str) -> Self {
        Self {
            stepper: Stepper::new(),
            display_name: session
                .map(|s| s.display_name.clone())
                .unwrap_or_else(|| default_name.to_string()),
            signed_in_at: session.map(|s| s.signed_in_at),
        }
    }

    pub fn stepper(&self) -> Stepper<NavStep> {
        self.stepper.clone()
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}

impl ScreenView for ProfileScreen {
    fn title(&self) -> String {
        "Profile".to_string()
    }

    fn content(&self) -> ScreenContent {
        let since = self
            .signed_in_at
            .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0))
            .map(|dt| dt.with_timezone(&Local).format("%b %d, %H:%M").to_string())
            .unwrap_or_else(|| "not signed in".to_string());
        ScreenContent::Card {
            fields: vec![
                ("Name".to_string(), self.display_name.clone()),
                ("Signed in".to_string(), since),
            ],
        }
    }

    fn handle_input(&self, _input: ScreenInput) {}

    fn hints(&self) -> &'static str {
        " Tab Switch tab "
    }
}

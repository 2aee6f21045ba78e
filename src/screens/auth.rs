//! Sign-in form. Typing edits the display name, Enter signs in.

use std::cell::RefCell;

use log::{info, warn};

use crate::core::session::{Session, SessionStore};
use crate::flows::{AppStep, NavStep};
use crate::nav::Stepper;

use super::{ScreenContent, ScreenInput, ScreenView};

pub struct AuthScreen {
    stepper: Stepper<NavStep>,
    sessions: SessionStore,
    name: RefCell<String>,
}

impl AuthScreen {
    pub fn new(sessions: SessionStore, suggested_name: &str) -> Self {
        Self {
            stepper: Stepper::new(),
            sessions,
            name: RefCell::new(suggested_name.to_string()),
        }
    }

    pub fn stepper(&self) -> Stepper<NavStep> {
        self.stepper.clone()
    }

    pub fn name(&self) -> String {
        self.name.borrow().clone()
    }

    /// Persist a session for the entered name and move on to the main flow.
    ///
    /// A session that fails to save only costs the user a sign-in next launch,
    /// so navigation proceeds either way.
    pub fn sign_in(&self) {
        let name = self.name.borrow().trim().to_string();
        if name.is_empty() {
            return;
        }
        let session = Session::new(&name);
        match self.sessions.save(&session) {
            Ok(()) => info!("Signed in as {name} (session {})", session.id),
            Err(e) => warn!("Failed to persist session: {e}"),
        }
        self.stepper.emit(NavStep::App(AppStep::Main));
    }
}

impl ScreenView for AuthScreen {
    fn title(&self) -> String {
        "Welcome".to_string()
    }

    fn content(&self) -> ScreenContent {
        ScreenContent::Form {
            prompt: "Display name".to_string(),
            value: self.name(),
        }
    }

    fn handle_input(&self, input: ScreenInput) {
        match input {
            ScreenInput::Char(c) if !c.is_control() => self.name.borrow_mut().push(c),
            ScreenInput::Backspace => {
                self.name.borrow_mut().pop();
            }
            ScreenInput::Select => self.sign_in(),
            _ => {}
        }
    }

    fn hints(&self) -> &'static str {
        " type your name  Enter Sign in "
    }
}

//! # Application Flows
//!
//! Zyna's navigation vocabulary and the flows that speak it.
//!
//! ```text
//! AppFlow (NavigationStack)
//! ├── AuthScreen                         App(Auth)
//! └── MainFlow (TabBar)                  App(Main) → Main(TabBarRequired)
//!     ├── ProfileFlow (NavigationStack)  Profile(Profile)
//!     ├── ChatsFlow (NavigationStack)    Chats(List) / Chat { chat_id } / Back
//!     └── SettingsFlow (NavigationStack) Settings(Settings)
//! ```
//!
//! Every flow matches on its own scope of `NavStep` and falls through to
//! `FlowContributors::None` for anything else.

pub mod app;
pub mod chats;
pub mod main_flow;
pub mod profile;
pub mod settings;

use std::rc::Rc;

use crate::TabKind;
use crate::core::config::ResolvedConfig;
use crate::core::session::SessionStore;
use crate::nav::{Navigation, Presentable};
use crate::screens::{Chat, ScreenView, sample_chats};

pub use app::{AppFlow, initial_step};
pub use chats::ChatsFlow;
pub use main_flow::MainFlow;
pub use profile::ProfileFlow;
pub use settings::SettingsFlow;

/// Binds the navigation core to Zyna's steps and screens.
pub struct Zyna;

impl Navigation for Zyna {
    type Step = NavStep;
    type View = dyn ScreenView;
}

// ============================================================================
// Steps
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavStep {
    App(AppStep),
    Main(MainStep),
    Chats(ChatsStep),
    Profile(ProfileStep),
    Settings(SettingsStep),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppStep {
    Auth,
    Main,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MainStep {
    TabBarRequired,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatsStep {
    List,
    Chat { chat_id: String },
    Back,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileStep {
    Profile,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsStep {
    Settings,
}

// ============================================================================
// Shared context
// ============================================================================

/// What flows need to build their screens.
#[derive(Clone)]
pub struct AppContext {
    pub sessions: SessionStore,
    pub initial_tab: TabKind,
    pub display_name: String,
    pub chats: Rc<Vec<Chat>>,
}

impl AppContext {
    pub fn new(sessions: SessionStore, initial_tab: TabKind, display_name: &str) -> Self {
        Self {
            sessions,
            initial_tab,
            display_name: display_name.to_string(),
            chats: Rc::new(sample_chats()),
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self::new(
            SessionStore::new(config.session_path.clone()),
            config.initial_tab,
            &config.display_name,
        )
    }
}

/// Wrap a screen as a presentable. Takes the trait object so concrete screens
/// coerce at the call site.
pub(crate) fn present(view: Rc<dyn ScreenView>) -> Presentable<Zyna> {
    Presentable::screen(view)
}

//! Zyna library exports for testing

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub mod core;
pub mod flows;
pub mod nav;
pub mod screens;
pub mod tui;

#[cfg(test)]
pub mod test_support;

/// The tabs of the main tab root, in display order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabKind {
    Profile,
    #[default]
    Chats,
    Settings,
}

impl TabKind {
    pub const ALL: [TabKind; 3] = [TabKind::Profile, TabKind::Chats, TabKind::Settings];

    /// Position in the tab strip.
    pub fn index(self) -> usize {
        match self {
            TabKind::Profile => 0,
            TabKind::Chats => 1,
            TabKind::Settings => 2,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            TabKind::Profile => "Profile",
            TabKind::Chats => "Chats",
            TabKind::Settings => "Settings",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            TabKind::Profile => "👤",
            TabKind::Chats => "💬",
            TabKind::Settings => "⚙",
        }
    }
}

impl fmt::Display for TabKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TabKind::Profile => "profile",
            TabKind::Chats => "chats",
            TabKind::Settings => "settings",
        })
    }
}

impl FromStr for TabKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "profile" => Ok(TabKind::Profile),
            "chats" => Ok(TabKind::Chats),
            "settings" => Ok(TabKind::Settings),
            other => Err(format!("unknown tab: {other}")),
        }
    }
}

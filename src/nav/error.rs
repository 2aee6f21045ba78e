use std::fmt;

/// Errors raised by the navigation layer.
///
/// Only `AlreadyStarted` ever reaches a caller. The other variants come out of
/// `Flow::navigate` and are contained by the coordinator: logged, then treated
/// as "no contributors".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    /// `start` was called on a coordinator that is already running.
    AlreadyStarted,
    /// A flow could not build the presentable a step asked for.
    Build { flow: &'static str, reason: String },
    /// A flow panicked while navigating.
    Panicked { flow: &'static str, message: String },
}

impl NavigationError {
    pub fn build(flow: &'static str, reason: impl Into<String>) -> Self {
        NavigationError::Build {
            flow,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for NavigationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigationError::AlreadyStarted => write!(f, "coordinator already started"),
            NavigationError::Build { flow, reason } => {
                write!(f, "{flow} failed to build presentable: {reason}")
            }
            NavigationError::Panicked { flow, message } => {
                write!(f, "{flow} panicked while navigating: {message}")
            }
        }
    }
}

impl std::error::Error for NavigationError {}

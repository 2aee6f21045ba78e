//! # Flows
//!
//! A `Flow` owns one container and maps steps to contributors:
//!
//! ```text
//! navigate(step) ──▶ None                      step ignored (or only popped something)
//!                ──▶ One(contributor)          one new (presentable, stepper) to track
//!                ──▶ Multiple(contributors)    fan-out, e.g. filling a tab root
//! ```
//!
//! A contributor's presentable is either a plain `Presentable`, in which case
//! its stepper's steps come back to the flow that returned it, or a child
//! `Flow`, in which case they go to the child. The child's `root()` is what the
//! parent embeds in its own container, which is how flows nest.

use std::fmt;

use super::error::NavigationError;
use super::presentable::{Presentable, PresentableId};
use super::step::{Navigation, Stepper};

pub trait Flow<N: Navigation> {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// The container this flow drives. Same container for the flow's lifetime.
    fn root(&self) -> Presentable<N>;

    /// React to `step`. Steps outside this flow's vocabulary must return
    /// `Ok(FlowContributors::None)` without touching the container.
    ///
    /// Validate before mutating. If this returns `Err` or panics, the
    /// coordinator resets `root()` to its children from before the call, but
    /// anything changed deeper in the tree or outside it stays changed.
    fn navigate(&mut self, step: &N::Step) -> Result<FlowContributors<N>, NavigationError>;
}

/// What a contributor asks the coordinator to track.
pub enum NextPresentable<N: Navigation> {
    Presentable(Presentable<N>),
    Flow(Box<dyn Flow<N>>),
}

impl<N: Navigation> NextPresentable<N> {
    pub fn id(&self) -> PresentableId {
        match self {
            NextPresentable::Presentable(presentable) => presentable.id(),
            NextPresentable::Flow(flow) => flow.root().id(),
        }
    }
}

impl<N: Navigation> fmt::Debug for NextPresentable<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NextPresentable::Presentable(presentable) => write!(f, "{presentable:?}"),
            NextPresentable::Flow(flow) => write!(f, "Flow({}, {:?})", flow.name(), flow.root()),
        }
    }
}

pub struct FlowContributor<N: Navigation> {
    pub next: NextPresentable<N>,
    pub stepper: Stepper<N::Step>,
}

impl<N: Navigation> FlowContributor<N> {
    /// Track `presentable`; its stepper's steps route back to the calling flow.
    pub fn contribute(presentable: Presentable<N>, stepper: Stepper<N::Step>) -> Self {
        Self {
            next: NextPresentable::Presentable(presentable),
            stepper,
        }
    }

    /// Hand control of `flow` to the coordinator; `stepper` drives the child.
    pub fn child_flow(flow: impl Flow<N> + 'static, stepper: Stepper<N::Step>) -> Self {
        Self {
            next: NextPresentable::Flow(Box::new(flow)),
            stepper,
        }
    }
}

impl<N: Navigation> fmt::Debug for FlowContributor<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlowContributor")
            .field("next", &self.next)
            .field("stepper", &self.stepper.id())
            .finish()
    }
}

pub enum FlowContributors<N: Navigation> {
    None,
    One(FlowContributor<N>),
    Multiple(Vec<FlowContributor<N>>),
}

impl<N: Navigation> FlowContributors<N> {
    pub fn len(&self) -> usize {
        match self {
            FlowContributors::None => 0,
            FlowContributors::One(_) => 1,
            FlowContributors::Multiple(contributors) => contributors.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_vec(self) -> Vec<FlowContributor<N>> {
        match self {
            FlowContributors::None => Vec::new(),
            FlowContributors::One(contributor) => vec![contributor],
            FlowContributors::Multiple(contributors) => contributors,
        }
    }
}

impl<N: Navigation> fmt::Debug for FlowContributors<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowContributors::None => write!(f, "None"),
            FlowContributors::One(contributor) => f.debug_tuple("One").field(contributor).finish(),
            FlowContributors::Multiple(contributors) => {
                f.debug_tuple("Multiple").field(contributors).finish()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{Mock, mock_screen};

    #[test]
    fn test_into_vec_flattens_every_variant() {
        let none: FlowContributors<Mock> = FlowContributors::None;
        assert!(none.is_empty());
        assert!(none.into_vec().is_empty());

        let one: FlowContributors<Mock> = FlowContributors::One(FlowContributor::contribute(
            mock_screen("one"),
            Stepper::new(),
        ));
        assert_eq!(one.len(), 1);
        assert_eq!(one.into_vec().len(), 1);

        let many: FlowContributors<Mock> = FlowContributors::Multiple(
            (0..3)
                .map(|_| FlowContributor::contribute(mock_screen("tab"), Stepper::new()))
                .collect(),
        );
        assert_eq!(many.len(), 3);
        assert_eq!(many.into_vec().len(), 3);
    }

    #[test]
    fn test_next_presentable_id_matches_presentable() {
        let screen = mock_screen("screen");
        let contributor: FlowContributor<Mock> =
            FlowContributor::contribute(screen.clone(), Stepper::new());
        assert_eq!(contributor.next.id(), screen.id());
    }
}

//! # Navigation Core
//!
//! Decides which screen-producing unit becomes active in response to which
//! abstract event. Knows nothing about what a screen looks like.
//!
//! ```text
//!                 ┌──────────────────────────────┐
//!                 │        FlowCoordinator       │
//!                 │  registry: stepper → flow    │
//!                 └──────┬────────────────▲──────┘
//!              navigate  │                │ Emission{stepper, step}
//!                        ▼                │
//!                 ┌─────────────┐   ┌─────┴─────┐
//!                 │    Flow     │   │  Stepper  │◀── emit(step) ── Screen
//!                 │ owns a root │   └───────────┘
//!                 │  container  │
//!                 └──────┬──────┘
//!                        │ FlowContributors: None | One | Multiple
//!                        ▼
//!            (Presentable or child Flow, Stepper)
//! ```
//!
//! ## Modules
//!
//! - [`step`]: `Navigation` vocabulary binding, `Stepper`, `Emission`
//! - [`presentable`]: screens, `NavigationStack`, `TabBar`
//! - [`flow`]: the `Flow` trait and contributors
//! - [`coordinator`]: routing, registry, reachability sweep
//! - [`error`]: `NavigationError`

pub mod coordinator;
pub mod error;
pub mod flow;
pub mod presentable;
pub mod step;

pub use coordinator::{CoordinatorState, FlowCoordinator, FlowId};
pub use error::NavigationError;
pub use flow::{Flow, FlowContributor, FlowContributors, NextPresentable};
pub use presentable::{
    NavigationStack, Presentable, PresentableId, ScreenHandle, Tab, TabBar, TabItem,
};
pub use step::{Emission, Navigation, Stepper, StepperId, Subscription};

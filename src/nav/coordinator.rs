//! # Flow Coordinator
//!
//! Owns every live flow and the registry of tracked steppers, and is the only
//! thing that ever calls `Flow::navigate`.
//!
//! ```text
//!             ┌───────────── one merged channel ◀──────────────┐
//!             ▼                                                │
//!   dispatch(Emission{stepper, step})                          │
//!     ├─ registry[stepper] ─▶ owning flow ─▶ navigate(step)    │
//!     ├─ accept contributors ─▶ subscribe new steppers ────────┘
//!     └─ sweep: drop flows / registrations no longer reachable
//! ```
//!
//! Every stepper subscribes into the same unbounded channel, so steps from
//! one stepper are handled in the order they were emitted, and steps from
//! different steppers interleave in the order they hit the channel. All
//! container mutation happens inside `navigate`, one step at a time, which
//! also serializes two steppers racing for the same container.
//!
//! After each step the coordinator walks the presentation tree from the root
//! flow's container. Registrations whose presentable is no longer in the tree
//! are removed and their subscriptions dropped; flows whose root fell out of
//! the tree are released.

use std::any::Any;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::thread;

use log::{debug, error, info, warn};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

use super::error::NavigationError;
use super::flow::{Flow, FlowContributor, FlowContributors, NextPresentable};
use super::presentable::{Presentable, PresentableId};
use super::step::{Emission, Navigation, Stepper, StepperId, Subscription};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinatorState {
    /// Nothing registered yet.
    Idle,
    /// A root flow is registered and steps are being routed.
    Running,
}

/// Coordinator-local identity of a registered flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FlowId(u64);

impl fmt::Display for FlowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "flow#{}", self.0)
    }
}

struct FlowNode<N: Navigation> {
    flow: Box<dyn Flow<N>>,
    root: PresentableId,
}

struct Registration<N: Navigation> {
    flow: FlowId,
    presentable: PresentableId,
    _subscription: Subscription<N::Step>,
}

pub struct FlowCoordinator<N: Navigation> {
    state: CoordinatorState,
    root_flow: Option<FlowId>,
    flows: HashMap<FlowId, FlowNode<N>>,
    registry: HashMap<StepperId, Registration<N>>,
    next_flow_id: u64,
    sender: UnboundedSender<Emission<N::Step>>,
    receiver: UnboundedReceiver<Emission<N::Step>>,
}

impl<N: Navigation> Default for FlowCoordinator<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Navigation> FlowCoordinator<N> {
    pub fn new() -> Self {
        let (sender, receiver) = unbounded_channel();
        Self {
            state: CoordinatorState::Idle,
            root_flow: None,
            flows: HashMap::new(),
            registry: HashMap::new(),
            next_flow_id: 1,
            sender,
            receiver,
        }
    }

    pub fn state(&self) -> CoordinatorState {
        self.state
    }

    /// Register `flow` as the root and navigate it with `initial_step`.
    ///
    /// By the time this returns the root flow has handled the step and every
    /// contributor it produced (recursively, including kicked child flows) is
    /// subscribed.
    pub fn start(
        &mut self,
        flow: impl Flow<N> + 'static,
        initial_step: N::Step,
    ) -> Result<(), NavigationError> {
        self.start_with(flow, Stepper::one(initial_step))
    }

    /// Like `start`, but the root flow is driven by a caller-supplied stepper.
    pub fn start_with(
        &mut self,
        flow: impl Flow<N> + 'static,
        stepper: Stepper<N::Step>,
    ) -> Result<(), NavigationError> {
        if self.state == CoordinatorState::Running {
            return Err(NavigationError::AlreadyStarted);
        }
        let root = flow.root().id();
        info!("Coordinating root flow {} ({root})", flow.name());
        let flow_id = self.insert_flow(Box::new(flow));
        self.root_flow = Some(flow_id);
        self.state = CoordinatorState::Running;
        self.register(flow_id, root, &stepper);
        self.process_pending();
        Ok(())
    }

    /// Route every step already queued, without waiting for more.
    /// Returns how many emissions were handled.
    pub fn process_pending(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(emission) = self.receiver.try_recv() {
            self.dispatch(emission);
            handled += 1;
        }
        handled
    }

    /// Route steps as they arrive. The coordinator keeps its own sender, so
    /// this only returns if the future is dropped.
    pub async fn run(&mut self) {
        while let Some(emission) = self.receiver.recv().await {
            self.dispatch(emission);
        }
    }

    /// The root flow's container, i.e. the whole presentation tree.
    pub fn root(&self) -> Option<Presentable<N>> {
        self.root_flow
            .and_then(|id| self.flows.get(&id))
            .map(|node| node.flow.root())
    }

    pub fn registry_len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_registered(&self, stepper: StepperId) -> bool {
        self.registry.contains_key(&stepper)
    }

    /// Presentables currently tracked by at least one registration.
    pub fn tracked_presentables(&self) -> HashSet<PresentableId> {
        self.registry.values().map(|reg| reg.presentable).collect()
    }

    pub fn flow_count(&self) -> usize {
        self.flows.len()
    }

    /// Names of live flows, sorted. Mostly for tests and diagnostics.
    pub fn flow_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.flows.values().map(|node| node.flow.name()).collect();
        names.sort_unstable();
        names
    }

    fn insert_flow(&mut self, flow: Box<dyn Flow<N>>) -> FlowId {
        let id = FlowId(self.next_flow_id);
        self.next_flow_id += 1;
        let root = flow.root().id();
        self.flows.insert(id, FlowNode { flow, root });
        id
    }

    fn register(&mut self, flow: FlowId, presentable: PresentableId, stepper: &Stepper<N::Step>) {
        debug!("Registering {} for {presentable} on {flow}", stepper.id());
        let subscription = stepper.subscribe(self.sender.clone());
        self.registry.insert(
            stepper.id(),
            Registration {
                flow,
                presentable,
                _subscription: subscription,
            },
        );
    }

    fn dispatch(&mut self, emission: Emission<N::Step>) {
        let Some(flow_id) = self.registry.get(&emission.stepper).map(|reg| reg.flow) else {
            debug!(
                "Dropping {:?} from unregistered {}",
                emission.step, emission.stepper
            );
            return;
        };

        let contributors = self.navigate(flow_id, &emission.step);
        for contributor in contributors.into_vec() {
            self.accept(flow_id, contributor);
        }
        self.sweep();
    }

    /// Run one flow's `navigate`, turning errors and panics into `None`.
    ///
    /// On failure the flow's own container is put back as it was before the
    /// step, so nothing half-built stays on screen untracked.
    fn navigate(&mut self, flow_id: FlowId, step: &N::Step) -> FlowContributors<N> {
        let Some(node) = self.flows.get_mut(&flow_id) else {
            warn!("Registered {flow_id} is gone, ignoring {step:?}");
            return FlowContributors::None;
        };
        let name = node.flow.name();
        debug!("{name} <- {step:?}");
        let snapshot = node.flow.root().snapshot();

        match contain_panic(|| node.flow.navigate(step)) {
            Ok(Ok(contributors)) => {
                debug!("{name} -> {contributors:?}");
                contributors
            }
            Ok(Err(err)) => {
                warn!("Navigation failed, staying on current screen: {err}");
                snapshot.restore();
                FlowContributors::None
            }
            Err(payload) => {
                let err = NavigationError::Panicked {
                    flow: name,
                    message: panic_message(payload.as_ref()),
                };
                error!("{err}");
                snapshot.restore();
                FlowContributors::None
            }
        }
    }

    fn accept(&mut self, owner: FlowId, contributor: FlowContributor<N>) {
        let FlowContributor { next, stepper } = contributor;
        let presentable = next.id();

        if let Some(reg) = self.registry.get_mut(&stepper.id()) {
            match next {
                NextPresentable::Presentable(_) => {
                    debug!("Refreshing {} -> {presentable} on {owner}", stepper.id());
                    reg.flow = owner;
                    reg.presentable = presentable;
                }
                NextPresentable::Flow(flow) => {
                    debug!(
                        "{} already drives {}, dropping duplicate child flow {}",
                        stepper.id(),
                        reg.flow,
                        flow.name()
                    );
                }
            }
            return;
        }

        let target = match next {
            NextPresentable::Presentable(_) => owner,
            NextPresentable::Flow(flow) => {
                info!("{owner} hands off to child flow {}", flow.name());
                self.insert_flow(flow)
            }
        };
        self.register(target, presentable, &stepper);
    }

    fn sweep(&mut self) {
        let Some(root) = self.root() else {
            return;
        };
        let mut reachable = HashSet::new();
        root.collect_reachable(&mut reachable);

        let root_flow = self.root_flow;
        self.flows.retain(|id, node| {
            let live = Some(*id) == root_flow || reachable.contains(&node.root);
            if !live {
                info!("{} ({id}) dismissed, releasing it", node.flow.name());
            }
            live
        });

        let flows = &self.flows;
        self.registry.retain(|stepper, reg| {
            let live = flows.contains_key(&reg.flow) && reachable.contains(&reg.presentable);
            if !live {
                debug!("Deregistering {stepper}: {} unreachable", reg.presentable);
            }
            live
        });
    }
}

/// Serializes panic hook swaps across coordinators on different threads.
static HOOK_LOCK: Mutex<()> = Mutex::new(());

fn lock_hooks() -> MutexGuard<'static, ()> {
    HOOK_LOCK.lock().unwrap_or_else(PoisonError::into_inner)
}

/// `catch_unwind` with the process panic hook silenced for the duration.
///
/// The terminal host installs a hook that restores the terminal; a panic
/// the coordinator contains must not trigger it.
fn contain_panic<R>(f: impl FnOnce() -> R) -> thread::Result<R> {
    let _guard = lock_hooks();
    let previous = panic::take_hook();
    panic::set_hook(Box::new(|info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()))
            .unwrap_or_else(|| "unknown location".to_string());
        debug!("Flow panicked at {location}");
    }));
    let result = panic::catch_unwind(AssertUnwindSafe(f));
    panic::set_hook(previous);
    result
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

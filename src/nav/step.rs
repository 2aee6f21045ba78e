//! # Steps and Steppers
//!
//! A step is a plain value describing a navigation intent. A `Stepper` is the
//! thing a screen owns to announce those intents over time.
//!
//! ```text
//! Screen ──emit(step)──▶ Stepper ──Emission{stepper, step}──▶ subscriber channel(s)
//! ```
//!
//! Every subscriber gets its own copy of each step, in emission order. There
//! is no bound and no backpressure: steps are user-paced (taps, finished loads).
//! Emitting into a stepper nobody listens to anymore is a silent no-op, which
//! is what lets dying screens fire late steps without anyone caring.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use log::debug;
use tokio::sync::mpsc::UnboundedSender;

/// Ties together the two types an application plugs into the navigation core.
///
/// `Step` is the application's step vocabulary (usually one enum wrapping one
/// enum per flow scope). `View` is the screen trait object flows put into
/// containers, e.g. `dyn ScreenView`.
pub trait Navigation: 'static {
    type Step: Clone + fmt::Debug + Send + 'static;
    type View: ?Sized + 'static;
}

/// Process-unique identity of a stepper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StepperId(u64);

impl StepperId {
    fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    #[must_use]
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for StepperId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "stepper#{}", self.0)
    }
}

/// A step tagged with the stepper that emitted it.
#[derive(Debug, Clone, PartialEq)]
pub struct Emission<S> {
    pub stepper: StepperId,
    pub step: S,
}

struct Subscriber<S> {
    key: u64,
    sender: UnboundedSender<Emission<S>>,
}

struct StepperInner<S> {
    initial_step: Option<S>,
    subscribers: Vec<Subscriber<S>>,
    next_key: u64,
}

/// Event source of steps. Cheap to clone; clones share one channel identity.
pub struct Stepper<S> {
    id: StepperId,
    inner: Arc<Mutex<StepperInner<S>>>,
}

impl<S> Clone for Stepper<S> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S> fmt::Debug for Stepper<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Stepper").field(&self.id).finish()
    }
}

impl<S: Clone + Send + 'static> Default for Stepper<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Clone + Send + 'static> Stepper<S> {
    /// A stepper that only emits when its owner calls `emit`.
    pub fn new() -> Self {
        Self::with_initial_step(None)
    }

    /// A stepper that hands `step` to every subscriber the moment it
    /// subscribes. Used to kick a freshly created child flow.
    pub fn one(step: S) -> Self {
        Self::with_initial_step(Some(step))
    }

    fn with_initial_step(initial_step: Option<S>) -> Self {
        Self {
            id: StepperId::next(),
            inner: Arc::new(Mutex::new(StepperInner {
                initial_step,
                subscribers: Vec::new(),
                next_key: 0,
            })),
        }
    }

    pub fn id(&self) -> StepperId {
        self.id
    }

    pub fn initial_step(&self) -> Option<S> {
        self.lock().initial_step.clone()
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.lock().subscribers.len()
    }

    /// Queue `step` for every current subscriber.
    ///
    /// Subscribers whose receiving end is gone are pruned here.
    pub fn emit(&self, step: S) {
        let id = self.id;
        let mut inner = self.lock();
        if inner.subscribers.is_empty() {
            debug!("{id} emitted with no subscribers, dropping step");
            return;
        }
        inner.subscribers.retain(|sub| {
            sub.sender
                .send(Emission {
                    stepper: id,
                    step: step.clone(),
                })
                .is_ok()
        });
    }

    /// Start delivering this stepper's steps into `sender`.
    ///
    /// The initial step, if any, is sent before this returns. Dropping the
    /// returned `Subscription` stops delivery.
    pub fn subscribe(&self, sender: UnboundedSender<Emission<S>>) -> Subscription<S> {
        let mut inner = self.lock();
        if let Some(step) = inner.initial_step.clone() {
            let _ = sender.send(Emission {
                stepper: self.id,
                step,
            });
        }
        let key = inner.next_key;
        inner.next_key += 1;
        inner.subscribers.push(Subscriber { key, sender });
        Subscription {
            stepper: self.id,
            key,
            inner: Arc::downgrade(&self.inner),
        }
    }

    fn lock(&self) -> MutexGuard<'_, StepperInner<S>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Handle for one subscription. Unsubscribes on drop.
pub struct Subscription<S> {
    stepper: StepperId,
    key: u64,
    inner: Weak<Mutex<StepperInner<S>>>,
}

impl<S> Subscription<S> {
    pub fn stepper(&self) -> StepperId {
        self.stepper
    }
}

impl<S> fmt::Debug for Subscription<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("stepper", &self.stepper)
            .field("key", &self.key)
            .finish()
    }
}

impl<S> Drop for Subscription<S> {
    fn drop(&mut self) {
        // Stepper may already be gone together with its owner.
        if let Some(inner) = self.inner.upgrade() {
            let mut inner = inner.lock().unwrap_or_else(PoisonError::into_inner);
            inner.subscribers.retain(|sub| sub.key != self.key);
        }
    }
}

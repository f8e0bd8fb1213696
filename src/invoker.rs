//! Guarded invocation with an owned capture slot.

use crate::{
    error::Result,
    guard::{Direct, GuardStrategy},
    store::{CaptureSlot, RethrowSlot},
    thrown::Thrown,
};
use tracing::{debug, trace};

/// Calls user callbacks and stores what they threw instead of propagating it.
///
/// The invoker owns its capture slot. Because [`invoke`](Self::invoke) takes
/// `&mut self`, a second guarded call cannot start on the same invoker until
/// the first has returned, and the caller drains the slot in between.
///
/// ```
/// use saga_guard::{GuardedInvoker, Thrown};
///
/// let mut invoker = GuardedInvoker::new();
/// invoker.invoke("step", || Err(Thrown::msg("boom")));
/// assert!(invoker.has_error());
/// assert_eq!(invoker.clear_error().unwrap().to_string(), "boom");
/// assert!(!invoker.has_error());
/// ```
#[derive(Clone, Debug, Default)]
pub struct GuardedInvoker<S = Direct> {
    strategy: S,
    caught: CaptureSlot,
    rethrow: RethrowSlot,
}

impl GuardedInvoker {
    /// Create an invoker using the [`Direct`] strategy.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S> GuardedInvoker<S>
where
    S: GuardStrategy,
{
    /// Create an invoker using `strategy`.
    pub fn with_strategy(strategy: S) -> Self {
        Self {
            strategy,
            caught: CaptureSlot::new(),
            rethrow: RethrowSlot::new(),
        }
    }

    /// The strategy in use.
    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Call `f`, capturing what it throws.
    ///
    /// The capture slot is emptied first, so afterwards it reflects this
    /// call only. Query the outcome with [`has_error`](Self::has_error) and
    /// [`clear_error`](Self::clear_error).
    pub fn invoke<F>(&mut self, label: &str, f: F)
    where
        F: FnOnce() -> Result<(), Thrown>,
    {
        self.caught.reset();
        trace!(label, "invoking guarded callback");
        if let Some(error) = self.strategy.run(label, f) {
            debug!(label, %error, "guarded callback threw");
            self.caught.set(error);
        }
    }

    /// Like [`invoke`](Self::invoke), but moves a captured error into the
    /// rethrow slot, keeping only the first one until it is drained by
    /// [`rethrow_caught_error`](Self::rethrow_caught_error).
    pub fn invoke_and_catch_first_error<F>(&mut self, label: &str, f: F)
    where
        F: FnOnce() -> Result<(), Thrown>,
    {
        self.invoke(label, f);
        if let Some(error) = self.caught.take() {
            self.rethrow.capture(error);
        }
    }

    /// Whether the last guarded call threw.
    pub fn has_error(&self) -> bool {
        self.caught.has_error()
    }

    /// Return and clear the captured error.
    ///
    /// Returns [`Error::NothingCaptured`](crate::Error::NothingCaptured) if
    /// nothing was captured; callers must check
    /// [`has_error`](Self::has_error) first.
    pub fn clear_error(&mut self) -> Result<Thrown> {
        self.caught.clear()
    }

    /// Return and clear the captured error, if any.
    pub fn take_error(&mut self) -> Option<Thrown> {
        self.caught.take()
    }

    /// Whether an error is waiting in the rethrow slot.
    pub fn has_rethrow_error(&self) -> bool {
        self.rethrow.has_error()
    }

    /// Drain the rethrow slot, returning its error as an `Err`.
    pub fn rethrow_caught_error(&mut self) -> Result<(), Thrown> {
        self.rethrow.rethrow()
    }
}

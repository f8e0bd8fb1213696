//! Single-value slots holding errors captured by guarded calls.

use crate::{
    error::{Error, Result},
    thrown::Thrown,
};

/// Holds the error captured by the most recent guarded call.
///
/// A new capture replaces whatever was stored before.
#[derive(Clone, Debug, Default)]
pub struct CaptureSlot {
    error: Option<Thrown>,
}

impl CaptureSlot {
    /// Create an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `error`, replacing any previous value.
    pub fn set(&mut self, error: Thrown) {
        self.error = Some(error);
    }

    /// Whether an error is stored.
    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    /// Return the stored error and empty the slot.
    ///
    /// Returns [`Error::NothingCaptured`] if the slot is empty.
    pub fn clear(&mut self) -> Result<Thrown> {
        self.take().ok_or(Error::NothingCaptured)
    }

    /// Return the stored error, if any, and empty the slot.
    pub fn take(&mut self) -> Option<Thrown> {
        self.error.take()
    }

    /// Empty the slot, discarding any stored error.
    pub fn reset(&mut self) {
        self.error = None;
    }
}

/// Holds the first error captured since the slot was last drained.
#[derive(Clone, Debug, Default)]
pub struct RethrowSlot {
    error: Option<Thrown>,
}

impl RethrowSlot {
    /// Create an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `error` unless the slot is already occupied.
    ///
    /// Returns whether `error` was stored.
    pub fn capture(&mut self, error: Thrown) -> bool {
        if self.error.is_some() {
            return false;
        }
        self.error = Some(error);
        true
    }

    /// Whether an error is waiting to be rethrown.
    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    /// Return the stored error, if any, and empty the slot.
    pub fn drain(&mut self) -> Option<Thrown> {
        self.error.take()
    }

    /// Drain the slot, turning a stored error back into an `Err`.
    pub fn rethrow(&mut self) -> Result<(), Thrown> {
        match self.drain() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

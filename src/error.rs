//! Error handling for the `saga-guard` crate.
//!
//! [`Error`] only describes failures of this layer itself: a caller breaking
//! the capture protocol, a host that lost track of a failed callback, or a
//! formatter handed nothing to format. Errors raised by user callbacks are
//! never converted into [`Error`]; they travel as [`Thrown`](crate::Thrown).

/// Error type for this crate.
#[non_exhaustive]
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// [`clear_error`](crate::GuardedInvoker::clear_error) was called while
    /// the capture slot was empty.
    ///
    /// This is a protocol violation by the caller, who must check
    /// [`has_error`](crate::GuardedInvoker::has_error) first.
    #[error(
        "clear_error was called but no error was captured. This error is likely \
         caused by a bug in the caller of the guarded invoker"
    )]
    NothingCaptured,
    /// A dispatched callback failed, but the host never reported what it
    /// threw.
    #[error(
        "An error was thrown inside one of your sagas, but we don't know what it was. \
         The host dispatcher reported a failed callback without delivering the \
         error through its error channel. Try running without developer mode to \
         see the original error"
    )]
    UndeterminedFailure,
    /// [`format_stack`](crate::format_stack) was called with no frames.
    #[error("cannot format an empty saga stack")]
    EmptySagaStack,
}

/// Convenient alias used throughout the crate.
///
/// This corresponds to `core::result::Result<T, saga_guard::Error>`.
pub type Result<T, E = Error> = core::result::Result<T, E>;

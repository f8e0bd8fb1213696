//! Debugger-transparent guarding through a host's event delivery.

use crate::{
    error::Error,
    guard::{catch, GuardStrategy},
    thrown::Thrown,
};
use tracing::{trace, warn};

/// Interface to a host that can deliver a synthetic event synchronously.
///
/// The point of routing a callback through the host is that a failure inside
/// the handler looks *uncaught* to the host's own tooling (a "pause on
/// exceptions" debugger, a crash reporter), while the failure is still handed
/// back to the caller as data through `on_error`.
pub trait HostDispatch {
    /// Deliver an event of type `event_type` to `handler`, synchronously.
    ///
    /// Any failure of `handler` must be reported to `on_error`, which acts as
    /// the host's global error channel for the duration of this call only.
    /// The handler may be invoked more than once; only the first invocation
    /// runs the guarded callback.
    fn dispatch(
        &self,
        event_type: &str,
        handler: &mut dyn FnMut() -> Result<(), Thrown>,
        on_error: &mut dyn FnMut(Thrown),
    );
}

/// Placeholder host for configurations without a debugging facility.
#[derive(Clone, Copy, Debug)]
pub enum NoHost {}

impl HostDispatch for NoHost {
    fn dispatch(
        &self,
        _event_type: &str,
        _handler: &mut dyn FnMut() -> Result<(), Thrown>,
        _on_error: &mut dyn FnMut(Thrown),
    ) {
        match *self {}
    }
}

/// Strategy routing every guarded call through a [`HostDispatch`].
#[derive(Clone, Debug)]
pub struct Dispatched<H> {
    host: H,
}

impl<H> Dispatched<H> {
    /// Wrap `host`.
    pub fn new(host: H) -> Self {
        Self { host }
    }

    /// The underlying host.
    pub fn host(&self) -> &H {
        &self.host
    }
}

impl<H> GuardStrategy for Dispatched<H>
where
    H: HostDispatch,
{
    fn run<F>(&self, label: &str, f: F) -> Option<Thrown>
    where
        F: FnOnce() -> Result<(), Thrown>,
    {
        let event_type = format!(
            "saga-guard-{}",
            if label.is_empty() {
                "invokeguardedcallback"
            } else {
                label
            }
        );

        // Cleared only once the callback has returned normally, so a host
        // that never reports the failure cannot make it look like a success.
        let mut did_error = true;
        let mut reported: Option<Thrown> = None;
        let mut callback = Some(f);

        let escaped = catch(|| {
            let mut handler = || -> Result<(), Thrown> {
                // Consumed on first delivery so a re-delivered or nested event
                // cannot run the callback of an outer call.
                match callback.take() {
                    Some(f) => {
                        f()?;
                        did_error = false;
                        Ok(())
                    }
                    None => Ok(()),
                }
            };
            // Last report wins.
            let mut on_error = |error: Thrown| reported = Some(error);
            self.host.dispatch(&event_type, &mut handler, &mut on_error);
            Ok(())
        })
        .err();

        trace!(%event_type, did_error, "host dispatch returned");

        if !did_error {
            return None;
        }
        match reported.or(escaped) {
            Some(error) => Some(error),
            None => {
                warn!(%event_type, "guarded callback failed without reporting an error");
                Some(Thrown::new(Error::UndeterminedFailure))
            }
        }
    }
}

//! Strategies used by [`GuardedInvoker`](crate::GuardedInvoker) to run a
//! callback and observe whether it threw.
//!
//! Two strategies exist:
//! * [`Direct`]: ordinary structured error handling. The callback's `Err` is
//!   returned and, when the crate is built with `panic = "unwind"`, panics are
//!   caught as well.
//! * [`Dispatched`]: re-routes the call through a host's own event delivery
//!   ([`HostDispatch`]) so that host debugging tools see a failure as
//!   uncaught, while the invoker still ends up with the thrown value.
//!
//! [`Strategy`] picks one of them once, from [`Config`] and the presence of a
//! host, and is what [`TryCatch::from_config`](crate::TryCatch::from_config)
//! builds.

use crate::{config::Config, thrown::Thrown};
use cfg_if::cfg_if;
use tracing::debug;

mod dispatch;
pub use dispatch::{Dispatched, HostDispatch, NoHost};

/// Runs a guarded callback and reports what it threw.
pub trait GuardStrategy {
    /// Invoke `f` exactly once, returning the value it threw, if any.
    ///
    /// `label` names the guard for diagnostics only.
    fn run<F>(&self, label: &str, f: F) -> Option<Thrown>
    where
        F: FnOnce() -> Result<(), Thrown>;
}

cfg_if! {
    if #[cfg(panic = "unwind")] {
        mod unwind;

        pub(crate) use self::unwind::catch;
    } else {
        mod abort;

        pub(crate) use self::abort::catch;
    }
}

/// Plain try/catch strategy.
#[derive(Clone, Copy, Debug, Default)]
pub struct Direct;

impl GuardStrategy for Direct {
    #[inline]
    fn run<F>(&self, _label: &str, f: F) -> Option<Thrown>
    where
        F: FnOnce() -> Result<(), Thrown>,
    {
        catch(f).err()
    }
}

/// A strategy chosen at startup.
#[derive(Clone, Debug)]
pub enum Strategy<H = NoHost> {
    /// See [`Direct`].
    Direct(Direct),
    /// See [`Dispatched`].
    Dispatched(Dispatched<H>),
}

impl<H> Strategy<H>
where
    H: HostDispatch,
{
    /// Pick the dispatched strategy when a host is available and developer
    /// mode is enabled, the direct strategy otherwise.
    pub fn select(config: &Config, host: Option<H>) -> Self {
        match host {
            Some(host) if config.is_developer_mode() => {
                debug!("guarding callbacks through host dispatch");
                Strategy::Dispatched(Dispatched::new(host))
            }
            _ => Strategy::Direct(Direct),
        }
    }

    /// Whether the dispatched strategy was selected.
    pub fn is_dispatched(&self) -> bool {
        matches!(self, Strategy::Dispatched(_))
    }
}

impl<H> Default for Strategy<H> {
    fn default() -> Self {
        Strategy::Direct(Direct)
    }
}

impl<H> GuardStrategy for Strategy<H>
where
    H: HostDispatch,
{
    fn run<F>(&self, label: &str, f: F) -> Option<Thrown>
    where
        F: FnOnce() -> Result<(), Thrown>,
    {
        match self {
            Strategy::Direct(direct) => direct.run(label, f),
            Strategy::Dispatched(dispatched) => dispatched.run(label, f),
        }
    }
}

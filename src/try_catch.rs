//! Uniform "call and get the result or the error" adapter.

use crate::{
    config::Config,
    error::Error,
    guard::{catch, Direct, GuardStrategy, HostDispatch, Strategy},
    invoker::GuardedInvoker,
    thrown::Thrown,
};

/// Calls a callback and hands back what it returned or what it threw.
///
/// The mode is fixed when the adapter is built:
/// * `Native` calls the callback directly inside a catch.
/// * `Wrapped` goes through a [`GuardedInvoker`], which lets a debugger-aware
///   [`GuardStrategy`] take part.
///
/// Both modes produce the same `Result` for the same callback.
#[derive(Clone, Debug)]
pub enum TryCatch<S = Direct> {
    /// Plain catch around the call.
    Native,
    /// Delegation to an owned guarded invoker.
    Wrapped(GuardedInvoker<S>),
}

/// Build the default adapter.
///
/// Wrap only when the driver steps native coroutines: a polyfilled coroutine
/// runtime catches and re-raises internally, and guarding it again would
/// defeat pause-on-exception instead of preserving it.
///
/// ```
/// use saga_guard::{create_try_catch_call, Thrown};
///
/// let mut try_catch = create_try_catch_call(true);
/// assert_eq!(try_catch.call(|| Ok::<_, Thrown>(7)).unwrap(), 7);
/// let err = try_catch
///     .call(|| -> Result<(), Thrown> { Err(Thrown::msg("boom")) })
///     .unwrap_err();
/// assert_eq!(err.to_string(), "boom");
/// ```
pub fn create_try_catch_call(should_wrap: bool) -> TryCatch {
    if should_wrap {
        TryCatch::Wrapped(GuardedInvoker::new())
    } else {
        TryCatch::Native
    }
}

impl<H> TryCatch<Strategy<H>>
where
    H: HostDispatch,
{
    /// Build an adapter from `config`, selecting the guard strategy once.
    ///
    /// `host` is the probe result for a debugging facility; it is only used
    /// in wrapped mode with developer mode enabled.
    pub fn from_config(config: impl AsRef<Config>, host: Option<H>) -> Self {
        let config = config.as_ref();
        if config.should_wrap() {
            TryCatch::Wrapped(GuardedInvoker::with_strategy(Strategy::select(
                config, host,
            )))
        } else {
            TryCatch::Native
        }
    }
}

impl<S> TryCatch<S>
where
    S: GuardStrategy,
{
    /// Whether calls go through a guarded invoker.
    pub fn is_wrapped(&self) -> bool {
        matches!(self, TryCatch::Wrapped(_))
    }

    /// Call `f`, returning its value or what it threw.
    pub fn call<T, F>(&mut self, f: F) -> Result<T, Thrown>
    where
        F: FnOnce() -> Result<T, Thrown>,
    {
        match self {
            TryCatch::Native => catch(f),
            TryCatch::Wrapped(invoker) => {
                let mut result = None;
                invoker.invoke("", || {
                    result = Some(f()?);
                    Ok(())
                });
                if let Some(error) = invoker.take_error() {
                    return Err(error);
                }
                result.ok_or_else(|| Thrown::new(Error::UndeterminedFailure))
            }
        }
    }
}

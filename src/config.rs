//! Startup configuration for guarded invocation.
//!
//! [`Config`] is resolved once, when a [`TryCatch`](crate::TryCatch) or a
//! [`GuardedInvoker`](crate::GuardedInvoker) is built, and never consulted per
//! call. Unset options fall back to the defaults documented on each field.
//!
//! # Example
//!
//! ```
//! let config = saga_guard::Config::builder()
//!     .developer_mode(true)
//!     .native_coroutines(true)
//!     .build()
//!     .unwrap();
//! assert!(config.is_developer_mode());
//! assert!(config.should_wrap());
//! ```

use derive_builder::Builder;

/// Options controlling how guarded calls are made.
#[non_exhaustive]
#[derive(Clone, Builder, Debug, Default)]
#[builder(default)]
#[builder(setter(into, strip_option))]
pub struct Config {
    /// Whether developer tooling should be preserved, which allows the
    /// debugger-transparent strategy when a host is available.
    ///
    /// Defaults to `cfg!(debug_assertions)`.
    developer_mode: Option<bool>,
    /// Whether the driver steps native coroutines.
    ///
    /// Wrapped guarding is only worthwhile then: a polyfilled coroutine
    /// runtime already intercepts and re-raises errors internally, which
    /// defeats the host's pause-on-exception behaviour. Defaults to `false`.
    native_coroutines: Option<bool>,
}

impl Config {
    /// Return [`ConfigBuilder`].
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Set whether developer tooling should be preserved.
    pub fn set_developer_mode(&mut self, flag: bool) {
        self.developer_mode = Some(flag);
    }

    /// Set whether the driver steps native coroutines.
    pub fn set_native_coroutines(&mut self, flag: bool) {
        self.native_coroutines = Some(flag);
    }

    /// Resolved developer mode.
    pub fn is_developer_mode(&self) -> bool {
        self.developer_mode.unwrap_or(cfg!(debug_assertions))
    }

    /// Whether guarded calls should go through a
    /// [`GuardedInvoker`](crate::GuardedInvoker).
    pub fn should_wrap(&self) -> bool {
        self.native_coroutines.unwrap_or(false)
    }
}

impl AsRef<Config> for Config {
    fn as_ref(&self) -> &Config {
        self
    }
}

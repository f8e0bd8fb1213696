//! This crate offers the error-guarding layer of a cooperative task
//! ("saga") runtime.
//!
//! A coroutine driver steps user logic through a [`TryCatch`] adapter, which
//! turns whatever a step throws (a returned error or a panic) into data
//! instead of letting it propagate. As a failure travels from the failing
//! task up to the root of the task tree, each task attaches its
//! [`TaskFrame`], and the root renders the chain with [`format_stack`].
//!
//! # Usage
//!
//! Add this to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! saga-guard = "0.1"
//! ```
//!
//! # Examples
//!
//! ```
//! use saga_guard::{attach_frame, SourceLocation, TaskFrame, TaskMeta, Thrown, TryCatch};
//!
//! let mut try_catch: TryCatch = TryCatch::Native;
//! let err = try_catch
//!     .call(|| -> Result<(), Thrown> { Err(Thrown::msg("boom")) })
//!     .unwrap_err();
//!
//! let child = TaskMeta::new("child").with_location(SourceLocation::new("", "saga.js", 3));
//! let err = attach_frame(err, TaskFrame::new(child));
//! let err = attach_frame(err, TaskFrame::new(TaskMeta::new("root")));
//! assert_eq!(
//!     err.format_stack().unwrap(),
//!     "The above error occurred in task child  saga.js?3\n    created by root",
//! );
//! ```
//!
//! Guarded calls can be made through a debugger-aware host by implementing
//! [`HostDispatch`] and building the adapter with [`TryCatch::from_config`].

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod error;
pub use error::{Error, Result};

pub mod config;
pub use config::{Config, ConfigBuilder};

mod thrown;
pub use thrown::Thrown;

mod store;
pub use store::{CaptureSlot, RethrowSlot};

pub mod guard;
pub use guard::{Direct, Dispatched, GuardStrategy, HostDispatch, NoHost, Strategy};

mod invoker;
pub use invoker::GuardedInvoker;

mod try_catch;
pub use try_catch::{create_try_catch_call, TryCatch};

mod saga_stack;
pub use saga_stack::{
    attach_frame, format_stack, frame_header_to_string, location_to_string, EffectDescriptor,
    SagaError, SourceLocation, TaskFrame, TaskMeta,
};

//! Catching backend for builds that unwind on panic.

use crate::thrown::Thrown;
use std::panic::{self, AssertUnwindSafe};

/// Call `f`, turning a panic into a [`Thrown::Panic`].
///
/// The callback is only ever observed through its result, so any state it
/// leaves half-updated on panic is the caller's concern.
pub(crate) fn catch<T, F>(f: F) -> Result<T, Thrown>
where
    F: FnOnce() -> Result<T, Thrown>,
{
    panic::catch_unwind(AssertUnwindSafe(f))
        .unwrap_or_else(|payload| Err(Thrown::from_panic(payload)))
}

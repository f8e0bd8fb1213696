//! Catching backend for builds with `panic = "abort"`.
//!
//! A panic terminates the process before anything could observe it, so only
//! returned errors are captured.

use crate::thrown::Thrown;

#[inline]
pub(crate) fn catch<T, F>(f: F) -> Result<T, Thrown>
where
    F: FnOnce() -> Result<T, Thrown>,
{
    f()
}

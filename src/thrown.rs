//! Values thrown by guarded callbacks.
//!
//! A callback "throws" either by returning `Err(Thrown)` or by panicking.
//! Both end up as a [`Thrown`], which is cheap to clone so that the same value
//! can sit in a capture slot, be handed to the driver, and be wrapped into a
//! [`SagaError`](crate::SagaError) without losing identity.

use std::{any::Any, error::Error as StdError, fmt, sync::Arc};

/// A value thrown by user callback logic.
///
/// Any `std::error::Error + Send + Sync + 'static` converts into `Thrown`,
/// so callbacks can use `?` freely:
///
/// ```
/// use saga_guard::Thrown;
///
/// fn step() -> Result<u32, Thrown> {
///     let n: u32 = "42".parse()?;
///     Ok(n)
/// }
/// assert_eq!(step().unwrap(), 42);
/// ```
#[derive(Clone, Debug)]
pub enum Thrown {
    /// An error returned by the callback.
    Error(Arc<dyn StdError + Send + Sync + 'static>),
    /// A panic raised inside the callback, with its message.
    Panic(String),
}

impl Thrown {
    /// Wrap a concrete error.
    pub fn new<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Thrown::Error(Arc::new(error))
    }

    /// Build a thrown value from a plain message.
    pub fn msg(message: impl Into<String>) -> Self {
        Thrown::new(Message(message.into()))
    }

    #[cfg_attr(not(panic = "unwind"), allow(dead_code))]
    pub(crate) fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&'static str>() {
            (*s).to_owned()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "Box<dyn Any>".to_owned()
        };
        Thrown::Panic(message)
    }

    /// Whether the callback panicked rather than returning an error.
    pub fn is_panic(&self) -> bool {
        matches!(self, Thrown::Panic(_))
    }

    /// The underlying error, if the callback returned one.
    pub fn as_error(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        match self {
            Thrown::Error(e) => Some(&**e),
            Thrown::Panic(_) => None,
        }
    }

    /// Attempt to downcast the underlying error to a concrete type.
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: StdError + 'static,
    {
        self.as_error().and_then(|e| e.downcast_ref::<E>())
    }
}

impl fmt::Display for Thrown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Thrown::Error(e) => fmt::Display::fmt(e, f),
            Thrown::Panic(message) => f.write_str(message),
        }
    }
}

impl<E> From<E> for Thrown
where
    E: StdError + Send + Sync + 'static,
{
    fn from(error: E) -> Self {
        Thrown::new(error)
    }
}

/// Error built from a bare message by [`Thrown::msg`].
#[derive(Debug)]
struct Message(String);

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl StdError for Message {}

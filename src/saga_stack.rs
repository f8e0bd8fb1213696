//! Saga stack accumulation and formatting.
//!
//! As an error propagates from a failing task up to the root of the task
//! tree, every task on the way adds its [`TaskFrame`] with [`attach_frame`].
//! At the root the accumulated frames are rendered by [`format_stack`]:
//!
//! ```text
//! The above error occurred in task errorInPutSaga  src/sagas.js?12
//!  when executing effect put(...)  src/sagas.js?14
//!     created by fetchSaga  src/sagas.js?30
//!     created by rootSaga  src/sagas.js?41
//! Tasks cancelled due to error:
//! watchLogout
//! ```

use crate::{
    error::{Error, Result},
    thrown::Thrown,
};
use itertools::Itertools;
use std::{error::Error as StdError, fmt, iter};
use tracing::error;

/// Where an instrumented effect or task was written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceLocation {
    /// Source text of the instrumented expression.
    pub code: String,
    /// File containing the expression.
    pub file_name: String,
    /// Line of the expression.
    pub line_number: u32,
}

impl SourceLocation {
    /// Create a location.
    pub fn new(code: impl Into<String>, file_name: impl Into<String>, line_number: u32) -> Self {
        Self {
            code: code.into(),
            file_name: file_name.into(),
            line_number,
        }
    }
}

/// Identity of a task.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskMeta {
    /// Task name.
    pub name: String,
    /// Where the task was defined, if instrumented.
    pub location: Option<SourceLocation>,
}

impl TaskMeta {
    /// Create metadata without a location.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: None,
        }
    }

    /// Attach a location.
    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }
}

/// The operation a task was executing when it failed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EffectDescriptor {
    /// Where the effect was created, if instrumented.
    pub location: Option<SourceLocation>,
}

impl EffectDescriptor {
    /// An effect created at `location`.
    pub fn at(location: SourceLocation) -> Self {
        Self {
            location: Some(location),
        }
    }
}

/// One task in the chain from the failing task to the root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskFrame {
    /// Task owning this frame.
    pub meta: TaskMeta,
    /// The failing effect; only set on the innermost frame.
    pub effect: Option<EffectDescriptor>,
    /// Descriptions of tasks cancelled because of the failure.
    pub cancelled_tasks: Vec<String>,
}

impl TaskFrame {
    /// A frame for `meta` with no effect and no cancelled tasks.
    pub fn new(meta: TaskMeta) -> Self {
        Self {
            meta,
            effect: None,
            cancelled_tasks: Vec::new(),
        }
    }

    /// Set the failing effect.
    pub fn with_effect(mut self, effect: EffectDescriptor) -> Self {
        self.effect = Some(effect);
        self
    }

    /// Append cancelled task descriptions.
    pub fn with_cancelled_tasks<I>(mut self, tasks: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.cancelled_tasks.extend(tasks.into_iter().map(Into::into));
        self
    }
}

fn format_location(file_name: &str, line_number: u32) -> String {
    format!("{file_name}?{line_number}")
}

/// Render an effect location as `"<code>  <file>?<line>"`, or `""` if absent.
pub fn location_to_string(location: Option<&SourceLocation>) -> String {
    match location {
        Some(loc) => format!(
            "{}  {}",
            loc.code,
            format_location(&loc.file_name, loc.line_number)
        ),
        None => String::new(),
    }
}

/// Render a task as `"<name>  <file>?<line>"`, or just `<name>`.
pub fn frame_header_to_string(meta: &TaskMeta) -> String {
    match &meta.location {
        Some(loc) => format!(
            "{}  {}",
            meta.name,
            format_location(&loc.file_name, loc.line_number)
        ),
        None => meta.name.clone(),
    }
}

fn cancelled_tasks_lines(frames: &[TaskFrame]) -> Vec<String> {
    let tasks: Vec<String> = frames
        .iter()
        .flat_map(|frame| frame.cancelled_tasks.iter().cloned())
        .collect();
    if tasks.is_empty() {
        return tasks;
    }
    iter::once("Tasks cancelled due to error:".to_owned())
        .chain(tasks)
        .collect()
}

/// Render a saga stack, innermost frame first.
///
/// Returns [`Error::EmptySagaStack`] if `frames` is empty.
pub fn format_stack(frames: &[TaskFrame]) -> Result<String> {
    let (first, others) = frames.split_first().ok_or(Error::EmptySagaStack)?;

    let mut message = format!(
        "The above error occurred in task {}",
        frame_header_to_string(&first.meta)
    );
    let effect_location = first
        .effect
        .as_ref()
        .map(|effect| location_to_string(effect.location.as_ref()))
        .unwrap_or_default();
    if !effect_location.is_empty() {
        message.push_str(" \n when executing effect ");
        message.push_str(&effect_location);
    }

    let created_by = others
        .iter()
        .map(|frame| format!("    created by {}", frame_header_to_string(&frame.meta)));

    Ok(iter::once(message)
        .chain(created_by)
        .chain(cancelled_tasks_lines(frames))
        .join("\n"))
}

/// Append `frame` to the saga stack carried by `error`.
///
/// A [`Thrown`] that already wraps a [`SagaError`] continues that error's
/// stack.
pub fn attach_frame(error: impl Into<SagaError>, frame: TaskFrame) -> SagaError {
    error.into().with_frame(frame)
}

/// A thrown value together with the saga stack it propagated through.
#[derive(Clone, Debug)]
pub struct SagaError {
    thrown: Thrown,
    saga_stack: Vec<TaskFrame>,
}

impl SagaError {
    /// Wrap `thrown` with an empty stack.
    pub fn new(thrown: Thrown) -> Self {
        Self {
            thrown,
            saga_stack: Vec::new(),
        }
    }

    /// The original thrown value.
    pub fn thrown(&self) -> &Thrown {
        &self.thrown
    }

    /// Frames accumulated so far, innermost first.
    pub fn saga_stack(&self) -> &[TaskFrame] {
        &self.saga_stack
    }

    /// Append `frame` in place.
    pub fn attach_frame(&mut self, frame: TaskFrame) {
        self.saga_stack.push(frame);
    }

    /// Append `frame` and return the augmented error.
    pub fn with_frame(mut self, frame: TaskFrame) -> Self {
        self.attach_frame(frame);
        self
    }

    /// Render the accumulated stack with [`format_stack`].
    pub fn format_stack(&self) -> Result<String> {
        format_stack(&self.saga_stack)
    }

    /// Report the error and its saga stack as a single error event.
    pub fn log(&self) {
        match self.format_stack() {
            Ok(stack) => error!(error = %self.thrown, "{stack}"),
            Err(_) => error!(error = %self.thrown, "uncaught error outside of any task"),
        }
    }

    /// Discard the stack, returning the original thrown value.
    pub fn into_thrown(self) -> Thrown {
        self.thrown
    }
}

impl From<Thrown> for SagaError {
    fn from(thrown: Thrown) -> Self {
        match thrown.downcast_ref::<SagaError>() {
            Some(inner) => inner.clone(),
            None => SagaError::new(thrown),
        }
    }
}

impl fmt::Display for SagaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.thrown, f)
    }
}

impl StdError for SagaError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match &self.thrown {
            Thrown::Error(e) => Some(&**e),
            Thrown::Panic(_) => None,
        }
    }
}

//! Render context passed through every node.
//!
//! The renderer never looks inside the context. It exists so that
//! user-defined nodes can read request-scoped values or stop early when the
//! caller cancels.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use crate::error::RenderError;

/// Request-scoped data threaded through a render.
///
/// Cloning is cheap: values and the cancellation flag are shared.
#[derive(Clone, Default)]
pub struct Context {
    cancel: Option<CancelHandle>,
    deadline: Option<Instant>,
    values: HashMap<TypeId, Arc<dyn Any + Send + Sync>>,
}

impl Context {
    /// Create an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a cancellation handle.
    #[must_use]
    pub fn with_cancel(mut self, handle: CancelHandle) -> Self {
        self.cancel = Some(handle);
        self
    }

    /// Attach a deadline after which the context reports cancellation.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Store a value keyed by its type, replacing any previous value of that type.
    #[must_use]
    pub fn with_value<T: Any + Send + Sync>(mut self, value: T) -> Self {
        self.values.insert(TypeId::of::<T>(), Arc::new(value));
        self
    }

    /// Look up a value by type.
    pub fn value<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.values
            .get(&TypeId::of::<T>())
            .and_then(|v| v.downcast_ref::<T>())
    }

    /// Deadline, if one was set.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Whether the context was cancelled or its deadline has passed.
    pub fn is_cancelled(&self) -> bool {
        if self.cancel.as_ref().is_some_and(CancelHandle::is_cancelled) {
            return true;
        }
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Return [`RenderError::Cancelled`] if the context is no longer live.
    pub fn check(&self) -> Result<(), RenderError> {
        if self.is_cancelled() {
            return Err(RenderError::Cancelled);
        }
        Ok(())
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("cancelled", &self.is_cancelled())
            .field("deadline", &self.deadline)
            .field("values", &self.values.len())
            .finish()
    }
}

/// Shared cancellation flag.
#[derive(Clone, Debug, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    /// Create a live handle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel every context holding this handle.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Whether [`cancel`](Self::cancel) has been called.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

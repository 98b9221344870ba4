//! Cancellation of in-flight suspending commands.
//!
//! Cancelling never stops the underlying operation (a camera move that is already animating keeps
//! animating). It only guarantees that the scheduler will not observe the operation's result:
//! once cancelled, a resolution or rejection that arrives later is discarded.

use crate::playback::completion::{Completion, Settlement};
use std::cell::Cell;
use std::rc::Rc;

/// Shared cancel flag. Clones refer to the same flag; equality is identity.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle {
    flag: Rc<Cell<bool>>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.flag.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.get()
    }
}

impl PartialEq for CancelHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.flag, &other.flag)
    }
}

impl Eq for CancelHandle {}

/// What the scheduler sees when it polls a wrapped completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Pending,
    Resolved,
    Rejected(String),
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct Cancellable {
    inner: Completion,
    handle: CancelHandle,
}

impl Cancellable {
    pub fn new(inner: Completion) -> Self {
        Self {
            inner,
            handle: CancelHandle::default(),
        }
    }

    pub fn handle(&self) -> CancelHandle {
        self.handle.clone()
    }

    pub fn cancel(&self) {
        self.handle.cancel();
    }

    pub fn poll(&self) -> Outcome {
        if self.handle.is_cancelled() {
            return Outcome::Cancelled;
        }
        match self.inner.state() {
            Settlement::Pending => Outcome::Pending,
            Settlement::Resolved => Outcome::Resolved,
            Settlement::Rejected(reason) => Outcome::Rejected(reason),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/cancel.rs"]
mod tests;

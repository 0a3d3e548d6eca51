//! Cancellable deferred work: fixed delays and next-animation-frame tasks.
//!
//! Components never call `setTimeout` directly. They ask a [`Scheduler`] for
//! a task and keep the returned [`TaskHandle`]; dropping the handle cancels
//! the task if it has not run yet. A handle must not be dropped from inside
//! its own task, so components overwrite stored handles only when
//! scheduling the next transition.

#[cfg(test)]
#[path = "schedule_test.rs"]
mod schedule_test;

use std::cell::RefCell;

/// Source of deferred work on the UI thread.
pub trait Scheduler {
    /// Run `task` once after `delay_ms` milliseconds.
    fn after(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> TaskHandle;

    /// Run `task` once before the next repaint.
    fn next_frame(&self, task: Box<dyn FnOnce()>) -> TaskHandle;
}

/// Ownership of a scheduled task. Dropping it cancels the task.
#[must_use = "dropping a TaskHandle cancels the task"]
pub struct TaskHandle {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl TaskHandle {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self { cancel: Some(Box::new(cancel)) }
    }

    /// Let the task run without an owner.
    pub fn detach(mut self) {
        self.cancel.take();
    }
}

impl Drop for TaskHandle {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl std::fmt::Debug for TaskHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskHandle").field("armed", &self.cancel.is_some()).finish()
    }
}

/// Storage for a task that reschedules itself (frame loops).
///
/// The running task hands its successor's handle to [`ChainSlot::set`]; the
/// running task's own handle is parked for one more generation instead of
/// being dropped mid-run.
#[derive(Debug, Default)]
pub struct ChainSlot {
    current: RefCell<Option<TaskHandle>>,
    parked: RefCell<Option<TaskHandle>>,
}

impl ChainSlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, handle: TaskHandle) {
        let running = self.current.replace(Some(handle));
        let finished = self.parked.replace(running);
        drop(finished);
    }

    /// Cancel whatever is scheduled. Call from outside the chain only.
    #[cfg(test)]
    pub fn clear(&self) {
        self.current.borrow_mut().take();
        self.parked.borrow_mut().take();
    }

    #[cfg(test)]
    pub fn is_armed(&self) -> bool {
        self.current.borrow().is_some()
    }
}

#[cfg(test)]
pub(crate) use manual::ManualScheduler;

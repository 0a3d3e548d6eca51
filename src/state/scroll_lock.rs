//! Reference-counted background scroll suppression.
//!
//! Both the case-study modal and the mobile menu need the page behind them
//! to stop scrolling. Each holds a [`ScrollGuard`]; the body stays locked
//! while any guard is alive, so closing one overlay never unlocks scrolling
//! underneath the other.

#[cfg(test)]
#[path = "scroll_lock_test.rs"]
mod scroll_lock_test;

use std::cell::Cell;
use std::rc::Rc;

/// Where suppression becomes visible (`body.style.overflow`).
pub trait ScrollSurface {
    fn set_scroll_suppressed(&self, suppressed: bool);
}

struct LockState {
    holders: Cell<usize>,
    surface: Box<dyn ScrollSurface>,
}

#[derive(Clone)]
pub struct ScrollLock {
    state: Rc<LockState>,
}

impl ScrollLock {
    pub fn new(surface: Box<dyn ScrollSurface>) -> Self {
        Self { state: Rc::new(LockState { holders: Cell::new(0), surface }) }
    }

    /// Take a claim; the body is locked until every claim is dropped.
    #[must_use = "the lock is released when the guard is dropped"]
    pub fn acquire(&self) -> ScrollGuard {
        let holders = self.state.holders.get() + 1;
        self.state.holders.set(holders);
        if holders == 1 {
            self.state.surface.set_scroll_suppressed(true);
        }
        ScrollGuard { state: Rc::clone(&self.state) }
    }

    #[must_use]
    pub fn is_suppressed(&self) -> bool {
        self.state.holders.get() > 0
    }

    #[must_use]
    pub fn holders(&self) -> usize {
        self.state.holders.get()
    }
}

/// One outstanding claim on the scroll lock.
pub struct ScrollGuard {
    state: Rc<LockState>,
}

impl Drop for ScrollGuard {
    fn drop(&mut self) {
        let holders = self.state.holders.get().saturating_sub(1);
        self.state.holders.set(holders);
        if holders == 0 {
            self.state.surface.set_scroll_suppressed(false);
        }
    }
}

impl std::fmt::Debug for ScrollGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollGuard").field("holders", &self.state.holders.get()).finish()
    }
}

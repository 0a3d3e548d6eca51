//! [`Scheduler`] backed by `setTimeout` and `requestAnimationFrame`.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::{JsCast, closure::Closure};
use web_sys::Window;

use crate::util::schedule::{Scheduler, TaskHandle};

/// Delay used when the browser refuses an animation frame.
const FALLBACK_FRAME_MS: u32 = 16;

pub struct BrowserScheduler {
    window: Window,
}

impl BrowserScheduler {
    #[must_use]
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl Scheduler for BrowserScheduler {
    fn after(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> TaskHandle {
        let timeout = Timeout::new(delay_ms, task);
        TaskHandle::new(move || drop(timeout))
    }

    fn next_frame(&self, task: Box<dyn FnOnce()>) -> TaskHandle {
        let slot: Rc<RefCell<Option<Box<dyn FnOnce()>>>> = Rc::new(RefCell::new(Some(task)));
        let slot_for_cb = Rc::clone(&slot);
        let cb = Closure::<dyn FnMut(f64)>::new(move |_ts: f64| {
            let task = slot_for_cb.borrow_mut().take();
            if let Some(task) = task {
                task();
            }
        });

        match self.window.request_animation_frame(cb.as_ref().unchecked_ref()) {
            Ok(id) => {
                let window = self.window.clone();
                TaskHandle::new(move || {
                    if slot.borrow_mut().take().is_some() {
                        super::checked(window.cancel_animation_frame(id), "cancelAnimationFrame");
                    }
                    drop(cb);
                })
            }
            Err(err) => {
                log::warn!("requestAnimationFrame refused, using a timer: {err:?}");
                let task = slot.borrow_mut().take();
                drop(cb);
                match task {
                    Some(task) => self.after(FALLBACK_FRAME_MS, task),
                    None => TaskHandle::new(|| {}),
                }
            }
        }
    }
}

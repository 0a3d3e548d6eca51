//! Scroll-driven animation helpers.
//!
//! Stateless math (parallax offsets, reveal stagger, count parsing) plus the
//! small state holders the page wires to scroll and intersection events.
//! [`FrameThrottle`] coalesces scroll bursts into one update per frame and
//! [`CounterRun`] drives a [`CounterTween`] on the frame scheduler.

#[cfg(test)]
#[path = "animation_test.rs"]
mod animation_test;

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::util::schedule::{ChainSlot, Scheduler};

/// Coalesces bursts of events into at most one pending frame update.
#[derive(Debug, Default)]
pub struct FrameThrottle {
    ticking: Cell<bool>,
}

impl FrameThrottle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the caller should request a frame now.
    pub fn try_begin(&self) -> bool {
        !self.ticking.replace(true)
    }

    /// Call from inside the frame callback once the update ran.
    pub fn finish(&self) {
        self.ticking.set(false);
    }

    #[cfg(test)]
    pub fn is_ticking(&self) -> bool {
        self.ticking.get()
    }
}

/// Result of advancing a counter by one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterFrame {
    /// Display this value and request another frame.
    Running(u64),
    /// Display the exact target; the tween is over.
    Done(u64),
}

impl CounterFrame {
    #[must_use]
    pub fn value(self) -> u64 {
        match self {
            Self::Running(v) | Self::Done(v) => v,
        }
    }
}

/// Linear count-up from zero to a target at a fixed frame cadence.
#[derive(Debug, Clone, PartialEq)]
pub struct CounterTween {
    target: u64,
    increment: f64,
    current: f64,
}

impl CounterTween {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn new(target: u64, duration_ms: f64, frame_ms: f64) -> Self {
        let frames = (duration_ms / frame_ms).max(1.0);
        Self { target, increment: target as f64 / frames, current: 0.0 }
    }

    /// Advance one frame.
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn step(&mut self) -> CounterFrame {
        self.current += self.increment;
        if self.current < self.target as f64 {
            CounterFrame::Running(self.current.floor() as u64)
        } else {
            CounterFrame::Done(self.target)
        }
    }
}

/// Where a running counter shows its value.
pub trait CounterDisplay {
    fn show_count(&self, value: u64);
}

/// A counter tween driven one step per animation frame.
///
/// The caller keeps the returned `Rc` alive for as long as the animation
/// should run; dropping it stops the loop.
pub struct CounterRun {
    tween: RefCell<CounterTween>,
    display: Box<dyn CounterDisplay>,
    scheduler: Rc<dyn Scheduler>,
    frames: ChainSlot,
    finished: Cell<bool>,
}

impl CounterRun {
    /// Show the first step immediately and keep stepping every frame.
    pub fn start(tween: CounterTween, display: Box<dyn CounterDisplay>, scheduler: Rc<dyn Scheduler>) -> Rc<Self> {
        let run = Rc::new(Self {
            tween: RefCell::new(tween),
            display,
            scheduler,
            frames: ChainSlot::new(),
            finished: Cell::new(false),
        });
        Self::tick(&run);
        run
    }

    fn tick(this: &Rc<Self>) {
        let frame = this.tween.borrow_mut().step();
        this.display.show_count(frame.value());
        match frame {
            CounterFrame::Running(_) => {
                let weak: Weak<Self> = Rc::downgrade(this);
                let next = this.scheduler.next_frame(Box::new(move || {
                    if let Some(run) = weak.upgrade() {
                        Self::tick(&run);
                    }
                }));
                this.frames.set(next);
            }
            CounterFrame::Done(_) => this.finished.set(true),
        }
    }

    #[cfg(test)]
    pub fn is_finished(&self) -> bool {
        self.finished.get()
    }
}

/// Parse a `data-count` attribute the way the markup writes it: leading
/// digits, anything after them ignored (`"150+"` counts to 150).
#[must_use]
pub fn parse_count(raw: &str) -> Option<u64> {
    let trimmed = raw.trim_start();
    let digits_end = trimmed.find(|c: char| !c.is_ascii_digit()).unwrap_or(trimmed.len());
    match trimmed[..digits_end].parse() {
        Ok(count) => Some(count),
        Err(_) => None,
    }
}

/// Vertical offset for an element moving at `rate` times the scroll speed.
#[must_use]
pub fn parallax_offset(scroll_y: f64, rate: f64) -> f64 {
    scroll_y * rate
}

/// CSS transform value for a vertical translation.
#[must_use]
pub fn translate_y(px: f64) -> String {
    format!("translateY({px}px)")
}

/// Whether an uncaught error message points at the hero canvas animation.
#[must_use]
pub fn is_canvas_failure(message: &str) -> bool {
    message.contains("canvas")
}

/// Delay before the `index`-th element of a staggered reveal.
#[must_use]
pub fn stagger_delay_ms(index: usize, step_ms: u32) -> u32 {
    u32::try_from(index).map_or(u32::MAX, |i| i.saturating_mul(step_ms))
}

//! Contact form with a simulated send.
//!
//! There is no transport: a submit walks `Idle → Sending → Sent → Idle` on
//! fixed delays so the visitor sees the full feedback cycle.

#[cfg(test)]
#[path = "contact_test.rs"]
mod contact_test;

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::config::SiteConfig;
use crate::util::schedule::{Scheduler, TaskHandle};

pub const SENDING_LABEL: &str = "Sending...";
pub const SENT_LABEL: &str = "Message Sent!";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormPhase {
    #[default]
    Idle,
    Sending,
    Sent,
}

pub trait FormSurface {
    /// Submit control label, disabled flag, and the success cue.
    fn render_submit(&self, label: &str, disabled: bool, success: bool);
    /// Reset every input back to empty.
    fn clear_fields(&self);
    /// The "focused" flag on the container of field `index`.
    fn set_field_focused(&self, index: usize, focused: bool);
}

/// A field's value at submit time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldSnapshot {
    pub name: String,
    pub value: String,
    pub required: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Started,
    /// A previous submission is still cycling.
    Busy,
    /// Required fields left blank, by name.
    MissingFields(Vec<String>),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FormTiming {
    pub send_delay_ms: u32,
    pub sent_reset_ms: u32,
}

impl From<&SiteConfig> for FormTiming {
    fn from(config: &SiteConfig) -> Self {
        Self { send_delay_ms: config.send_delay_ms, sent_reset_ms: config.sent_reset_ms }
    }
}

struct FormInner {
    phase: Cell<FormPhase>,
    idle_label: String,
    surface: Box<dyn FormSurface>,
    scheduler: Rc<dyn Scheduler>,
    timing: FormTiming,
    send_task: RefCell<Option<TaskHandle>>,
    reset_task: RefCell<Option<TaskHandle>>,
}

impl FormInner {
    fn mark_sent(this: &Rc<Self>) {
        this.phase.set(FormPhase::Sent);
        this.surface.render_submit(SENT_LABEL, true, true);
        this.surface.clear_fields();

        let weak = Rc::downgrade(this);
        let task = this.scheduler.after(
            this.timing.sent_reset_ms,
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.reset();
                }
            }),
        );
        *this.reset_task.borrow_mut() = Some(task);
    }

    fn reset(&self) {
        self.phase.set(FormPhase::Idle);
        self.surface.render_submit(&self.idle_label, false, false);
    }
}

pub struct ContactForm {
    inner: Rc<FormInner>,
}

impl ContactForm {
    /// `idle_label` is the submit control's label as authored in the markup.
    pub fn new(
        idle_label: impl Into<String>,
        surface: Box<dyn FormSurface>,
        scheduler: Rc<dyn Scheduler>,
        timing: FormTiming,
    ) -> Self {
        let inner = FormInner {
            phase: Cell::new(FormPhase::Idle),
            idle_label: idle_label.into(),
            surface,
            scheduler,
            timing,
            send_task: RefCell::new(None),
            reset_task: RefCell::new(None),
        };
        Self { inner: Rc::new(inner) }
    }

    /// Start the simulated send if the form is idle and complete.
    pub fn submit(&self, fields: &[FieldSnapshot]) -> SubmitOutcome {
        if self.inner.phase.get() != FormPhase::Idle {
            return SubmitOutcome::Busy;
        }
        let missing: Vec<String> = fields
            .iter()
            .filter(|field| field.required && field.value.trim().is_empty())
            .map(|field| field.name.clone())
            .collect();
        if !missing.is_empty() {
            return SubmitOutcome::MissingFields(missing);
        }

        self.inner.phase.set(FormPhase::Sending);
        self.inner.surface.render_submit(SENDING_LABEL, true, false);

        let weak: Weak<FormInner> = Rc::downgrade(&self.inner);
        let task = self.inner.scheduler.after(
            self.inner.timing.send_delay_ms,
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    FormInner::mark_sent(&inner);
                }
            }),
        );
        *self.inner.send_task.borrow_mut() = Some(task);
        log::info!("contact form submitted (simulated)");
        SubmitOutcome::Started
    }

    #[must_use]
    pub fn phase(&self) -> FormPhase {
        self.inner.phase.get()
    }

    pub fn on_field_focus(&self, index: usize) {
        self.inner.surface.set_field_focused(index, true);
    }

    /// Filled fields keep the focused look after blur.
    pub fn on_field_blur(&self, index: usize, value: &str) {
        if value.is_empty() {
            self.inner.surface.set_field_focused(index, false);
        }
    }
}

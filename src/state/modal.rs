//! Case-study modal: open/close lifecycle and dismissal rules.
//!
//! STATE MACHINE
//! =============
//! `Closed` --open(known id)--> `Open(id)` --open(other known id)--> `Open(other)`
//! `Open(_)` --close / backdrop click / Escape--> `Closed`
//!
//! Unknown ids are ignored. The modal holds a scroll-lock claim exactly while
//! it is open.

#[cfg(test)]
#[path = "modal_test.rs"]
mod modal_test;

use std::cell::RefCell;
use std::rc::Rc;

use crate::content::{CaseStudy, CaseStudyRegistry};
use crate::state::scroll_lock::{ScrollGuard, ScrollLock};

/// A dismissible overlay that can present one case study.
pub trait ModalSurface {
    /// Render the study into the title/content slots and show the overlay.
    fn show_case_study(&self, study: &CaseStudy);
    fn hide(&self);
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModalState {
    active_case_study_id: Option<String>,
}

impl ModalState {
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.active_case_study_id.is_some()
    }

    #[must_use]
    pub fn active_case_study_id(&self) -> Option<&str> {
        self.active_case_study_id.as_deref()
    }
}

pub struct CaseStudyModal {
    registry: Rc<CaseStudyRegistry>,
    surface: Box<dyn ModalSurface>,
    lock: ScrollLock,
    state: RefCell<ModalState>,
    scroll_claim: RefCell<Option<ScrollGuard>>,
}

impl CaseStudyModal {
    pub fn new(registry: Rc<CaseStudyRegistry>, surface: Box<dyn ModalSurface>, lock: ScrollLock) -> Self {
        Self {
            registry,
            surface,
            lock,
            state: RefCell::new(ModalState::default()),
            scroll_claim: RefCell::new(None),
        }
    }

    /// Show the study for `project_id`. Returns `false` (and changes
    /// nothing) if the id is unknown.
    pub fn open(&self, project_id: &str) -> bool {
        let Some(study) = self.registry.get(project_id) else {
            log::debug!("no case study for project {project_id:?}");
            return false;
        };

        self.state.borrow_mut().active_case_study_id = Some(study.id.clone());
        self.surface.show_case_study(study);

        let mut claim = self.scroll_claim.borrow_mut();
        if claim.is_none() {
            *claim = Some(self.lock.acquire());
        }
        true
    }

    /// Close the modal. Safe to call in any state.
    pub fn close(&self) {
        let was_open = self.state.borrow_mut().active_case_study_id.take().is_some();
        if was_open {
            self.surface.hide();
        }
        self.scroll_claim.borrow_mut().take();
    }

    /// Click on the overlay. Only a click whose target is the modal root
    /// itself (the backdrop) dismisses; clicks inside the content do not.
    pub fn on_backdrop_click(&self, target_is_root: bool) -> bool {
        if target_is_root && self.is_open() {
            self.close();
            return true;
        }
        false
    }

    /// Keyboard dismissal. Returns `true` if the key closed the modal.
    pub fn on_key(&self, key: &str) -> bool {
        if key == "Escape" && self.is_open() {
            self.close();
            return true;
        }
        false
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state.borrow().is_open()
    }

    #[must_use]
    pub fn state(&self) -> ModalState {
        self.state.borrow().clone()
    }
}

//! Navigation bar: scrolled styling, active-section tracking, mobile menu.

#[cfg(test)]
#[path = "nav_test.rs"]
mod nav_test;

use std::cell::{Cell, RefCell};

use crate::config::SiteConfig;
use crate::state::scroll_lock::{ScrollGuard, ScrollLock};

pub trait NavSurface {
    fn set_scrolled(&self, scrolled: bool);
    /// Open/close the mobile menu and its hamburger.
    fn set_menu_open(&self, open: bool);
    /// Mark the link for `section_id` active, all others inactive.
    fn set_active_link(&self, section_id: Option<&str>);
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NavThresholds {
    pub scroll_threshold_px: f64,
    pub section_lookahead_px: f64,
}

impl From<&SiteConfig> for NavThresholds {
    fn from(config: &SiteConfig) -> Self {
        Self { scroll_threshold_px: config.scroll_threshold_px, section_lookahead_px: config.section_lookahead_px }
    }
}

/// A page section's id and its top offset in document coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct SectionOffset {
    pub id: String,
    pub top: f64,
}

impl SectionOffset {
    pub fn new(id: impl Into<String>, top: f64) -> Self {
        Self { id: id.into(), top }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NavState {
    pub is_menu_open: bool,
    pub active_section_id: Option<String>,
    pub scrolled: bool,
}

#[must_use]
pub fn is_scrolled(scroll_y: f64, threshold: f64) -> bool {
    scroll_y > threshold
}

/// The furthest-down section whose top, less the look-ahead, has been
/// scrolled past. Sections are given in document order; an id-less winner
/// means no link is active.
#[must_use]
pub fn active_section(sections: &[SectionOffset], scroll_y: f64, lookahead: f64) -> Option<&str> {
    sections
        .iter()
        .rev()
        .find(|section| scroll_y >= section.top - lookahead)
        .map(|section| section.id.as_str())
        .filter(|id| !id.is_empty())
}

pub struct NavController {
    surface: Box<dyn NavSurface>,
    lock: ScrollLock,
    thresholds: NavThresholds,
    state: RefCell<NavState>,
    menu_claim: RefCell<Option<ScrollGuard>>,
    scrolled_synced: Cell<bool>,
    links_synced: Cell<bool>,
}

impl NavController {
    pub fn new(surface: Box<dyn NavSurface>, lock: ScrollLock, thresholds: NavThresholds) -> Self {
        Self {
            surface,
            lock,
            thresholds,
            state: RefCell::new(NavState::default()),
            menu_claim: RefCell::new(None),
            scrolled_synced: Cell::new(false),
            links_synced: Cell::new(false),
        }
    }

    /// Frame-throttled part of the scroll handler.
    pub fn update_scrolled(&self, scroll_y: f64) {
        let scrolled = is_scrolled(scroll_y, self.thresholds.scroll_threshold_px);
        let first = !self.scrolled_synced.replace(true);
        let mut state = self.state.borrow_mut();
        if first || state.scrolled != scrolled {
            state.scrolled = scrolled;
            self.surface.set_scrolled(scrolled);
        }
    }

    /// Per-event part of the scroll handler.
    pub fn update_active_section(&self, scroll_y: f64, sections: &[SectionOffset]) {
        let current = active_section(sections, scroll_y, self.thresholds.section_lookahead_px);
        let first = !self.links_synced.replace(true);
        let mut state = self.state.borrow_mut();
        if first || state.active_section_id.as_deref() != current {
            state.active_section_id = current.map(str::to_owned);
            self.surface.set_active_link(current);
        }
    }

    /// Hamburger click.
    pub fn toggle_menu(&self) {
        let open = !self.state.borrow().is_menu_open;
        self.set_menu(open);
    }

    /// Any nav-link click closes an open menu; it never opens one.
    pub fn on_link_click(&self) {
        if self.state.borrow().is_menu_open {
            self.set_menu(false);
        }
    }

    fn set_menu(&self, open: bool) {
        self.state.borrow_mut().is_menu_open = open;
        self.surface.set_menu_open(open);
        let mut claim = self.menu_claim.borrow_mut();
        if open {
            if claim.is_none() {
                *claim = Some(self.lock.acquire());
            }
        } else {
            claim.take();
        }
    }

    #[must_use]
    pub fn state(&self) -> NavState {
        self.state.borrow().clone()
    }
}

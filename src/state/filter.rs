//! Portfolio category filter with staggered show/hide transitions.
//!
//! Each portfolio item moves through an explicit visibility state. Showing
//! puts the item back into layout immediately and fades it in after the show
//! delay; hiding fades it out immediately and removes it from layout after
//! the hide delay. Every item owns at most one outstanding transition task,
//! and starting a new transition cancels the old one, so rapid filter clicks
//! cannot leave a stale hide behind.

#[cfg(test)]
#[path = "filter_test.rs"]
mod filter_test;

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::config::SiteConfig;
use crate::util::schedule::{Scheduler, TaskHandle};

/// Filter value that matches every category.
pub const ALL_CATEGORIES: &str = "all";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visibility {
    /// In layout and (after the show delay) fully opaque.
    Visible,
    /// Faded out, still in layout until the hide delay elapses.
    Hiding,
    /// Removed from layout.
    Hidden,
}

/// A filterable collection of portfolio items plus its filter buttons.
pub trait FilterSurface {
    /// Mark the button for `category` active and every other button inactive.
    fn mark_active_filter(&self, category: &str);
    /// Whether the item takes part in layout (`display`).
    fn set_item_displayed(&self, index: usize, displayed: bool);
    /// Faded = opacity 0 and shifted down; unfaded = opacity 1, no shift.
    fn set_item_faded(&self, index: usize, faded: bool);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FilterTiming {
    pub show_delay_ms: u32,
    pub hide_delay_ms: u32,
}

impl From<&SiteConfig> for FilterTiming {
    fn from(config: &SiteConfig) -> Self {
        Self { show_delay_ms: config.filter_show_delay_ms, hide_delay_ms: config.filter_hide_delay_ms }
    }
}

/// Whether an item of `category` is shown under the `selected` filter.
#[must_use]
pub fn matches(selected: &str, category: &str) -> bool {
    selected == ALL_CATEGORIES || selected == category
}

/// Keys that activate a focused filter button.
#[must_use]
pub fn is_activation_key(key: &str) -> bool {
    matches!(key, "Enter" | " ")
}

struct PortfolioItem {
    category: String,
    visibility: Visibility,
    transition: Option<TaskHandle>,
}

struct FilterState {
    active: String,
    items: Vec<PortfolioItem>,
}

pub struct PortfolioFilter {
    state: Rc<RefCell<FilterState>>,
    surface: Rc<dyn FilterSurface>,
    scheduler: Rc<dyn Scheduler>,
    timing: FilterTiming,
}

impl PortfolioFilter {
    /// Items start visible under the `all` filter, as the markup renders them.
    pub fn new(
        categories: Vec<String>,
        surface: Rc<dyn FilterSurface>,
        scheduler: Rc<dyn Scheduler>,
        timing: FilterTiming,
    ) -> Self {
        let items = categories
            .into_iter()
            .map(|category| PortfolioItem { category, visibility: Visibility::Visible, transition: None })
            .collect();
        let state = FilterState { active: ALL_CATEGORIES.to_owned(), items };
        Self { state: Rc::new(RefCell::new(state)), surface, scheduler, timing }
    }

    /// Show exactly the items matching `selected`.
    pub fn apply_filter(&self, selected: &str) {
        self.surface.mark_active_filter(selected);

        let mut state = self.state.borrow_mut();
        state.active = selected.to_owned();
        for (index, item) in state.items.iter_mut().enumerate() {
            if matches(selected, &item.category) {
                self.show(index, item);
            } else {
                self.hide(index, item);
            }
        }
        log::debug!("portfolio filter -> {selected}");
    }

    fn show(&self, index: usize, item: &mut PortfolioItem) {
        item.transition = None;
        item.visibility = Visibility::Visible;
        self.surface.set_item_displayed(index, true);

        let surface = Rc::clone(&self.surface);
        let task = self.scheduler.after(
            self.timing.show_delay_ms,
            Box::new(move || surface.set_item_faded(index, false)),
        );
        item.transition = Some(task);
    }

    fn hide(&self, index: usize, item: &mut PortfolioItem) {
        // Already on its way out (or gone): the pending removal stands.
        if item.visibility != Visibility::Visible {
            return;
        }
        item.transition = None;
        item.visibility = Visibility::Hiding;
        self.surface.set_item_faded(index, true);

        let state: Weak<RefCell<FilterState>> = Rc::downgrade(&self.state);
        let surface = Rc::clone(&self.surface);
        let task = self.scheduler.after(
            self.timing.hide_delay_ms,
            Box::new(move || {
                let Some(state) = state.upgrade() else {
                    return;
                };
                let mut state = state.borrow_mut();
                if let Some(item) = state.items.get_mut(index)
                    && item.visibility == Visibility::Hiding
                {
                    item.visibility = Visibility::Hidden;
                    surface.set_item_displayed(index, false);
                }
            }),
        );
        item.transition = Some(task);
    }

    #[must_use]
    pub fn active_filter(&self) -> String {
        self.state.borrow().active.clone()
    }

    #[must_use]
    pub fn visibility(&self, index: usize) -> Option<Visibility> {
        self.state.borrow().items.get(index).map(|item| item.visibility)
    }

    /// Indices of items currently in the `Visible` state.
    #[must_use]
    pub fn visible_indices(&self) -> Vec<usize> {
        self.state
            .borrow()
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.visibility == Visibility::Visible)
            .map(|(index, _)| index)
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.state.borrow().items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

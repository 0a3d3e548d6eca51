use std::cell::RefCell;
use std::collections::HashMap;

use super::*;
use crate::util::schedule::ManualScheduler;

// =============================================================
// Helpers
// =============================================================

#[derive(Default)]
struct FakeGrid {
    active: RefCell<Option<String>>,
    displayed: RefCell<HashMap<usize, bool>>,
    faded: RefCell<HashMap<usize, bool>>,
}

impl FakeGrid {
    fn displayed(&self, index: usize) -> bool {
        self.displayed.borrow().get(&index).copied().unwrap_or(true)
    }

    fn faded(&self, index: usize) -> bool {
        self.faded.borrow().get(&index).copied().unwrap_or(false)
    }

    fn shown(&self, index: usize) -> bool {
        self.displayed(index) && !self.faded(index)
    }
}

impl FilterSurface for FakeGrid {
    fn mark_active_filter(&self, category: &str) {
        *self.active.borrow_mut() = Some(category.to_owned());
    }

    fn set_item_displayed(&self, index: usize, displayed: bool) {
        self.displayed.borrow_mut().insert(index, displayed);
    }

    fn set_item_faded(&self, index: usize, faded: bool) {
        self.faded.borrow_mut().insert(index, faded);
    }
}

fn setup(categories: &[&str]) -> (PortfolioFilter, Rc<FakeGrid>, Rc<ManualScheduler>) {
    let grid = Rc::new(FakeGrid::default());
    let scheduler = ManualScheduler::new();
    let filter = PortfolioFilter::new(
        categories.iter().map(|c| (*c).to_owned()).collect(),
        grid.clone(),
        scheduler.clone(),
        FilterTiming::from(&SiteConfig::default()),
    );
    (filter, grid, scheduler)
}

// =============================================================
// matches / keys
// =============================================================

#[test]
fn all_matches_every_category() {
    assert!(matches("all", "web"));
    assert!(matches("all", ""));
    assert!(matches("web", "web"));
    assert!(!matches("web", "mobile"));
}

#[test]
fn enter_and_space_activate_buttons() {
    assert!(is_activation_key("Enter"));
    assert!(is_activation_key(" "));
    assert!(!is_activation_key("Tab"));
}

// =============================================================
// apply_filter
// =============================================================

#[test]
fn items_start_visible_under_all() {
    let (filter, _, _) = setup(&["web", "mobile"]);
    assert_eq!(filter.active_filter(), "all");
    assert_eq!(filter.visible_indices(), vec![0, 1]);
    assert_eq!(filter.len(), 2);
    assert!(!filter.is_empty());
}

#[test]
fn web_filter_hides_mobile_after_delay() {
    let (filter, grid, scheduler) = setup(&["web", "mobile", "web"]);
    filter.apply_filter("web");

    assert_eq!(filter.visibility(1), Some(Visibility::Hiding));
    assert!(grid.faded(1));
    assert!(grid.displayed(1), "hiding items stay in layout until the delay");

    scheduler.advance(299);
    assert_eq!(filter.visibility(1), Some(Visibility::Hiding));
    scheduler.advance(1);

    assert_eq!(filter.visibility(0), Some(Visibility::Visible));
    assert_eq!(filter.visibility(1), Some(Visibility::Hidden));
    assert_eq!(filter.visibility(2), Some(Visibility::Visible));
    assert!(grid.shown(0));
    assert!(!grid.displayed(1));
    assert!(grid.shown(2));
    assert_eq!(grid.active.borrow().as_deref(), Some("web"));
}

#[test]
fn all_filter_restores_every_item() {
    let (filter, grid, scheduler) = setup(&["web", "mobile", "branding"]);
    filter.apply_filter("mobile");
    scheduler.advance(400);
    filter.apply_filter("all");

    assert!(grid.displayed(0));
    assert!(grid.faded(0), "fade-in waits for the show delay");
    scheduler.advance(100);

    for index in 0..3 {
        assert_eq!(filter.visibility(index), Some(Visibility::Visible));
        assert!(grid.shown(index));
    }
}

#[test]
fn concrete_filter_shows_exactly_that_category() {
    let categories = ["web", "mobile", "ai", "web", "design", "mobile"];
    let (filter, grid, scheduler) = setup(&categories);
    filter.apply_filter("mobile");
    scheduler.advance(1000);

    for (index, category) in categories.iter().enumerate() {
        assert_eq!(grid.shown(index), *category == "mobile", "item {index} ({category})");
    }
    assert_eq!(filter.visible_indices(), vec![1, 5]);
}

#[test]
fn unknown_category_hides_everything() {
    let (filter, _, scheduler) = setup(&["web", "mobile"]);
    filter.apply_filter("hardware");
    scheduler.advance(300);
    assert!(filter.visible_indices().is_empty());
}

#[test]
fn reapplying_same_filter_is_safe() {
    let (filter, grid, scheduler) = setup(&["web", "mobile"]);
    filter.apply_filter("web");
    scheduler.advance(500);
    filter.apply_filter("web");
    scheduler.advance(500);

    assert_eq!(filter.visible_indices(), vec![0]);
    assert!(grid.shown(0));
    assert!(!grid.displayed(1));
}

#[test]
fn hidden_items_schedule_no_new_work() {
    let (filter, _, scheduler) = setup(&["web", "mobile"]);
    filter.apply_filter("web");
    scheduler.advance(500);
    filter.apply_filter("web");
    // Only the fade-in for item 0.
    assert_eq!(scheduler.pending(), 1);
}

// =============================================================
// Rapid switching
// =============================================================

#[test]
fn switching_back_before_hide_completes_keeps_item() {
    let (filter, grid, scheduler) = setup(&["web", "mobile"]);
    filter.apply_filter("mobile");
    scheduler.advance(150);
    filter.apply_filter("web");
    scheduler.advance(1000);

    assert_eq!(filter.visibility(0), Some(Visibility::Visible));
    assert!(grid.shown(0), "stale hide must not remove a reselected item");
    assert_eq!(filter.visibility(1), Some(Visibility::Hidden));
    assert!(!grid.displayed(1));
}

#[test]
fn hiding_before_fade_in_completes_cancels_fade_in() {
    let (filter, grid, scheduler) = setup(&["web", "mobile"]);
    filter.apply_filter("mobile");
    scheduler.advance(400);
    filter.apply_filter("all");
    scheduler.advance(50);
    filter.apply_filter("mobile");
    scheduler.advance(1000);

    assert_eq!(filter.visibility(0), Some(Visibility::Hidden));
    assert!(grid.faded(0), "cancelled fade-in must not unfade a hidden item");
    assert!(!grid.displayed(0));
}

#[test]
fn final_state_matches_last_filter_after_burst() {
    let (filter, grid, scheduler) = setup(&["web", "mobile", "ai"]);
    for selected in ["web", "mobile", "all", "ai", "web"] {
        filter.apply_filter(selected);
        scheduler.advance(40);
    }
    scheduler.advance(1000);

    assert_eq!(filter.active_filter(), "web");
    assert_eq!(filter.visible_indices(), vec![0]);
    assert!(grid.shown(0));
    assert!(!grid.displayed(1));
    assert!(!grid.displayed(2));
}

use crate::state::scroll_lock::ScrollSurface;

use super::*;

// =============================================================
// Helpers
// =============================================================

#[derive(Clone, Debug, PartialEq, Eq)]
enum Call {
    Show { title: String },
    Hide,
}

#[derive(Clone, Default)]
struct FakeOverlay {
    calls: Rc<RefCell<Vec<Call>>>,
}

impl ModalSurface for FakeOverlay {
    fn show_case_study(&self, study: &CaseStudy) {
        self.calls.borrow_mut().push(Call::Show { title: study.title.clone() });
    }

    fn hide(&self) {
        self.calls.borrow_mut().push(Call::Hide);
    }
}

#[derive(Clone, Default)]
struct FakeBody {
    locked: Rc<RefCell<bool>>,
}

impl ScrollSurface for FakeBody {
    fn set_scroll_suppressed(&self, suppressed: bool) {
        *self.locked.borrow_mut() = suppressed;
    }
}

struct Fixture {
    modal: CaseStudyModal,
    overlay: FakeOverlay,
    body: FakeBody,
    lock: ScrollLock,
}

fn fixture() -> Fixture {
    let registry = Rc::new(CaseStudyRegistry::builtin().expect("builtin content should load"));
    let overlay = FakeOverlay::default();
    let body = FakeBody::default();
    let lock = ScrollLock::new(Box::new(body.clone()));
    let modal = CaseStudyModal::new(registry, Box::new(overlay.clone()), lock.clone());
    Fixture { modal, overlay, body, lock }
}

// =============================================================
// open
// =============================================================

#[test]
fn modal_starts_closed() {
    let f = fixture();
    assert!(!f.modal.is_open());
    assert_eq!(f.modal.state(), ModalState::default());
}

#[test]
fn open_known_id_renders_title_and_locks_scroll() {
    let f = fixture();
    assert!(f.modal.open("techstore"));

    let state = f.modal.state();
    assert!(state.is_open());
    assert_eq!(state.active_case_study_id(), Some("techstore"));
    assert_eq!(
        *f.overlay.calls.borrow(),
        vec![Call::Show { title: "TechStore Pro - E-Commerce Platform".to_owned() }]
    );
    assert!(*f.body.locked.borrow());
}

#[test]
fn unknown_id_leaves_closed_modal_untouched() {
    let f = fixture();
    assert!(!f.modal.open("vaporware"));
    assert_eq!(f.modal.state(), ModalState::default());
    assert!(f.overlay.calls.borrow().is_empty());
    assert!(!*f.body.locked.borrow());
}

#[test]
fn unknown_id_keeps_previous_study_showing() {
    let f = fixture();
    f.modal.open("fittrack");
    let before = f.modal.state();
    assert!(!f.modal.open(""));
    assert_eq!(f.modal.state(), before);
    assert_eq!(f.overlay.calls.borrow().len(), 1);
}

#[test]
fn reopening_switches_study_without_second_claim() {
    let f = fixture();
    f.modal.open("fittrack");
    f.modal.open("quickeats");
    assert_eq!(f.modal.state().active_case_study_id(), Some("quickeats"));
    assert_eq!(f.lock.holders(), 1);
}

// =============================================================
// close
// =============================================================

#[test]
fn open_open_close_ends_closed_and_unlocked() {
    let f = fixture();
    f.modal.open("techstore");
    f.modal.open("securebank");
    f.modal.close();

    let state = f.modal.state();
    assert!(!state.is_open());
    assert_eq!(state.active_case_study_id(), None);
    assert!(!*f.body.locked.borrow());
    assert_eq!(f.overlay.calls.borrow().last(), Some(&Call::Hide));
}

#[test]
fn close_when_closed_is_noop() {
    let f = fixture();
    f.modal.close();
    f.modal.close();
    assert_eq!(f.modal.state(), ModalState::default());
    assert!(f.overlay.calls.borrow().is_empty());
    assert_eq!(f.lock.holders(), 0);
}

#[test]
fn closing_modal_keeps_menu_scroll_lock() {
    let f = fixture();
    let menu_claim = f.lock.acquire();
    f.modal.open("propertyhub");
    f.modal.close();
    assert!(*f.body.locked.borrow(), "menu still open underneath");
    drop(menu_claim);
    assert!(!*f.body.locked.borrow());
}

// =============================================================
// Dismissal
// =============================================================

#[test]
fn backdrop_click_closes_only_on_root_target() {
    let f = fixture();
    f.modal.open("intellichat");
    assert!(!f.modal.on_backdrop_click(false));
    assert!(f.modal.is_open());
    assert!(f.modal.on_backdrop_click(true));
    assert!(!f.modal.is_open());
}

#[test]
fn escape_closes_open_modal() {
    let f = fixture();
    f.modal.open("intellichat");
    assert!(!f.modal.on_key("Enter"));
    assert!(f.modal.is_open());
    assert!(f.modal.on_key("Escape"));
    assert!(!f.modal.is_open());
}

#[test]
fn dismissal_while_closed_does_nothing() {
    let f = fixture();
    assert!(!f.modal.on_key("Escape"));
    assert!(!f.modal.on_backdrop_click(true));
    assert!(f.overlay.calls.borrow().is_empty());
}

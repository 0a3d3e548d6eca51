use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::error::SiteError;

// =============================================================
// Helpers
// =============================================================

#[derive(Clone, Default)]
struct RecordingTarget {
    applied: Rc<RefCell<Vec<ThemePreference>>>,
}

impl ThemeTarget for RecordingTarget {
    fn apply_theme(&self, theme: ThemePreference) {
        self.applied.borrow_mut().push(theme);
    }
}

#[derive(Clone, Default)]
struct SharedStore {
    inner: Rc<MemoryStore>,
}

impl PreferenceStore for SharedStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        self.inner.read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.inner.write(key, value)
    }
}

struct BrokenStore;

impl PreferenceStore for BrokenStore {
    fn read(&self, _key: &str) -> Result<Option<String>> {
        Err(SiteError::StorageUnavailable("denied".into()))
    }

    fn write(&self, _key: &str, _value: &str) -> Result<()> {
        Err(SiteError::StorageUnavailable("denied".into()))
    }
}

fn load_with(store: SharedStore) -> (ThemeStore, RecordingTarget) {
    let target = RecordingTarget::default();
    let theme = ThemeStore::load("theme", Box::new(store), Box::new(target.clone()));
    (theme, target)
}

// =============================================================
// ThemePreference
// =============================================================

#[test]
fn preference_round_trips_through_storage_strings() {
    assert_eq!(ThemePreference::parse(ThemePreference::Dark.as_str()), Some(ThemePreference::Dark));
    assert_eq!(ThemePreference::parse(ThemePreference::Light.as_str()), Some(ThemePreference::Light));
}

#[test]
fn unknown_stored_value_is_not_a_preference() {
    assert_eq!(ThemePreference::parse("solarized"), None);
    assert_eq!(ThemePreference::parse("Dark"), None);
}

#[test]
fn default_preference_is_light() {
    assert_eq!(ThemePreference::default(), ThemePreference::Light);
}

// =============================================================
// ThemeStore
// =============================================================

#[test]
fn load_without_stored_value_applies_light() {
    let (theme, target) = load_with(SharedStore::default());
    assert_eq!(theme.get(), ThemePreference::Light);
    assert_eq!(*target.applied.borrow(), vec![ThemePreference::Light]);
}

#[test]
fn load_reads_stored_dark() {
    let store = SharedStore::default();
    store.write("theme", "dark").expect("memory write");
    let (theme, target) = load_with(store);
    assert_eq!(theme.get(), ThemePreference::Dark);
    assert_eq!(*target.applied.borrow(), vec![ThemePreference::Dark]);
}

#[test]
fn load_ignores_garbage_value() {
    let store = SharedStore::default();
    store.write("theme", "neon").expect("memory write");
    let (theme, _) = load_with(store);
    assert_eq!(theme.get(), ThemePreference::Light);
}

#[test]
fn set_applies_and_persists() {
    let store = SharedStore::default();
    let (theme, target) = load_with(store.clone());
    theme.set(ThemePreference::Dark);

    assert_eq!(theme.get(), ThemePreference::Dark);
    assert_eq!(target.applied.borrow().last(), Some(&ThemePreference::Dark));
    assert_eq!(store.read("theme").expect("memory read").as_deref(), Some("dark"));
}

#[test]
fn toggle_twice_is_identity() {
    let store = SharedStore::default();
    let (theme, _) = load_with(store.clone());
    let original = theme.get();

    assert_eq!(theme.toggle(), original.toggled());
    assert_eq!(theme.toggle(), original);
    assert_eq!(store.read("theme").expect("memory read").as_deref(), Some(original.as_str()));
}

#[test]
fn toggled_preference_survives_reload() {
    let store = SharedStore::default();
    let (theme, _) = load_with(store.clone());
    theme.toggle();

    let (reloaded, _) = load_with(store);
    assert_eq!(reloaded.get(), ThemePreference::Dark);
}

#[test]
fn unavailable_storage_falls_back_to_session_value() {
    let target = RecordingTarget::default();
    let theme = ThemeStore::load("theme", Box::new(BrokenStore), Box::new(target.clone()));
    assert_eq!(theme.get(), ThemePreference::Light);

    assert_eq!(theme.toggle(), ThemePreference::Dark);
    assert_eq!(theme.get(), ThemePreference::Dark);
    assert_eq!(target.applied.borrow().last(), Some(&ThemePreference::Dark));
}

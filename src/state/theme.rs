//! Light/dark theme preference.
//!
//! The preference lives in one origin-scoped storage slot and is mirrored
//! onto the `data-theme` attribute of `<html>`. Storage is best-effort: if it
//! cannot be read or written the preference still applies for the session.

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use crate::error::Result;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ThemePreference {
    #[default]
    Light,
    Dark,
}

impl ThemePreference {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Parse a stored value. Anything unrecognised counts as absent.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Origin-scoped key-value persistence (`localStorage` in the browser).
pub trait PreferenceStore {
    fn read(&self, key: &str) -> Result<Option<String>>;
    fn write(&self, key: &str, value: &str) -> Result<()>;
}

/// Where the active theme becomes visible.
pub trait ThemeTarget {
    fn apply_theme(&self, theme: ThemePreference);
}

/// Session-only store, used when the browser refuses `localStorage`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
}

impl PreferenceStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.values.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

pub struct ThemeStore {
    current: Cell<ThemePreference>,
    key: String,
    store: Box<dyn PreferenceStore>,
    target: Box<dyn ThemeTarget>,
}

impl ThemeStore {
    /// Read the stored preference once and apply it.
    pub fn load(key: impl Into<String>, store: Box<dyn PreferenceStore>, target: Box<dyn ThemeTarget>) -> Self {
        let key = key.into();
        let current = match store.read(&key) {
            Ok(Some(raw)) => ThemePreference::parse(&raw).unwrap_or_else(|| {
                log::debug!("ignoring unknown stored theme {raw:?}");
                ThemePreference::default()
            }),
            Ok(None) => ThemePreference::default(),
            Err(err) => {
                log::warn!("theme preference unreadable, using default: {err}");
                ThemePreference::default()
            }
        };
        target.apply_theme(current);
        Self { current: Cell::new(current), key, store, target }
    }

    #[must_use]
    pub fn get(&self) -> ThemePreference {
        self.current.get()
    }

    /// Apply `theme` now and persist it.
    pub fn set(&self, theme: ThemePreference) {
        self.current.set(theme);
        self.target.apply_theme(theme);
        if let Err(err) = self.store.write(&self.key, theme.as_str()) {
            log::warn!("theme preference not persisted, keeping it for this session: {err}");
        }
    }

    /// Flip between light and dark; returns the new preference.
    pub fn toggle(&self) -> ThemePreference {
        let next = self.get().toggled();
        self.set(next);
        next
    }
}

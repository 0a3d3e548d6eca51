//! Component state machines.
//!
//! Each component owns its state and talks to the page only through a
//! capability trait (`*Surface`, `ThemeTarget`, `PreferenceStore`). The
//! browser implementations live in `crate::dom`; tests use recording fakes.

pub mod contact;
pub mod filter;
pub mod modal;
pub mod nav;
pub mod scroll_lock;
pub mod theme;

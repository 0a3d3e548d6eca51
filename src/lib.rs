//! # fusion-fronts
//!
//! WASM interactivity layer for the Fusion Fronts portfolio site. The page
//! markup is served as static HTML; this crate attaches behaviour to it:
//! navigation, theme toggle, portfolio filtering, the case-study modal, the
//! contact form, and scroll-driven animations.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`state`] | Component state machines behind capability traits |
//! | [`content`] | Static case-study and careers content |
//! | [`util`] | Scheduling and animation math |
//! | [`config`] | Timing and threshold configuration |
//! | [`error`] | Error taxonomy |
//! | `dom` | web-sys adapters for each capability trait (`browser` feature) |
//! | `app` | Page-ready bootstrap (`browser` feature) |
//!
//! Everything outside `dom` and `app` compiles natively so the state
//! machines can be tested without a browser.

pub mod config;
pub mod content;
pub mod error;
pub mod state;
pub mod util;

#[cfg(feature = "browser")]
pub mod app;
#[cfg(feature = "browser")]
pub mod dom;

pub use config::SiteConfig;
pub use error::{Result, SiteError};

/// WASM entry point, run once the module is instantiated.
#[cfg(feature = "browser")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    app::boot();
}

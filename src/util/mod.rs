//! Utility helpers shared across components.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate timing and animation math from the component
//! state machines so both can be tested without a browser.

pub mod animation;
pub mod schedule;

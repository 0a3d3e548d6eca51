//! Timing and threshold configuration.
//!
//! Defaults match the shipped site. A page may override any field with an
//! inline `<script type="application/json" id="site-config">` block; keys are
//! camelCase and missing keys keep their default.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

use crate::error::{Result, SiteError};

pub const DEFAULT_SCROLL_THRESHOLD_PX: f64 = 100.0;
pub const DEFAULT_SECTION_LOOKAHEAD_PX: f64 = 200.0;
pub const DEFAULT_FILTER_SHOW_DELAY_MS: u32 = 100;
pub const DEFAULT_FILTER_HIDE_DELAY_MS: u32 = 300;
pub const DEFAULT_HIDE_OFFSET_PX: f64 = 20.0;
pub const DEFAULT_SEND_DELAY_MS: u32 = 2000;
pub const DEFAULT_SENT_RESET_MS: u32 = 3000;
pub const DEFAULT_COUNTER_DURATION_MS: f64 = 2000.0;
pub const DEFAULT_FRAME_MS: f64 = 16.0;
pub const DEFAULT_PARALLAX_RATE: f64 = -0.5;
pub const DEFAULT_HERO_PARALLAX_RATE: f64 = 0.5;
pub const DEFAULT_REVEAL_THRESHOLD: f64 = 0.8;
pub const DEFAULT_REVEAL_ROOT_MARGIN: &str = "0px 0px -50px 0px";
pub const DEFAULT_COUNTER_THRESHOLD: f64 = 0.5;
pub const DEFAULT_HERO_STAGGER_MS: u32 = 200;
pub const DEFAULT_THEME_STORAGE_KEY: &str = "theme";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteConfig {
    /// Scroll offset past which the navbar gets its `scrolled` look.
    pub scroll_threshold_px: f64,
    /// How far ahead of a section's top it already counts as current.
    pub section_lookahead_px: f64,
    pub filter_show_delay_ms: u32,
    pub filter_hide_delay_ms: u32,
    pub hide_offset_px: f64,
    pub send_delay_ms: u32,
    pub sent_reset_ms: u32,
    pub counter_duration_ms: f64,
    pub frame_ms: f64,
    pub parallax_rate: f64,
    pub hero_parallax_rate: f64,
    pub reveal_threshold: f64,
    pub reveal_root_margin: String,
    pub counter_threshold: f64,
    pub hero_stagger_ms: u32,
    pub theme_storage_key: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            scroll_threshold_px: DEFAULT_SCROLL_THRESHOLD_PX,
            section_lookahead_px: DEFAULT_SECTION_LOOKAHEAD_PX,
            filter_show_delay_ms: DEFAULT_FILTER_SHOW_DELAY_MS,
            filter_hide_delay_ms: DEFAULT_FILTER_HIDE_DELAY_MS,
            hide_offset_px: DEFAULT_HIDE_OFFSET_PX,
            send_delay_ms: DEFAULT_SEND_DELAY_MS,
            sent_reset_ms: DEFAULT_SENT_RESET_MS,
            counter_duration_ms: DEFAULT_COUNTER_DURATION_MS,
            frame_ms: DEFAULT_FRAME_MS,
            parallax_rate: DEFAULT_PARALLAX_RATE,
            hero_parallax_rate: DEFAULT_HERO_PARALLAX_RATE,
            reveal_threshold: DEFAULT_REVEAL_THRESHOLD,
            reveal_root_margin: DEFAULT_REVEAL_ROOT_MARGIN.to_owned(),
            counter_threshold: DEFAULT_COUNTER_THRESHOLD,
            hero_stagger_ms: DEFAULT_HERO_STAGGER_MS,
            theme_storage_key: DEFAULT_THEME_STORAGE_KEY.to_owned(),
        }
    }
}

impl SiteConfig {
    /// Parse an override block and validate the merged result.
    pub fn from_json(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        non_negative("scrollThresholdPx", self.scroll_threshold_px)?;
        non_negative("sectionLookaheadPx", self.section_lookahead_px)?;
        non_negative("hideOffsetPx", self.hide_offset_px)?;
        non_negative("counterDurationMs", self.counter_duration_ms)?;
        finite("parallaxRate", self.parallax_rate)?;
        finite("heroParallaxRate", self.hero_parallax_rate)?;
        unit_interval("revealThreshold", self.reveal_threshold)?;
        unit_interval("counterThreshold", self.counter_threshold)?;

        if !(self.frame_ms.is_finite() && self.frame_ms > 0.0) {
            return Err(invalid("frameMs", format!("must be positive, got {}", self.frame_ms)));
        }
        if self.theme_storage_key.trim().is_empty() {
            return Err(invalid("themeStorageKey", "must not be empty".to_owned()));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: String) -> SiteError {
    SiteError::InvalidConfig { field, reason }
}

fn finite(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, format!("must be finite, got {value}")))
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<()> {
    finite(field, value)?;
    if value < 0.0 {
        return Err(invalid(field, format!("must not be negative, got {value}")));
    }
    Ok(())
}

fn unit_interval(field: &'static str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid(field, format!("must be within 0..=1, got {value}")))
    }
}

//! Page-ready bootstrap.
//!
//! Features are wired in a fixed order. A feature whose elements are not on
//! the page is skipped at debug level; any other failure is logged and the
//! remaining features still run.

use std::rc::Rc;

use crate::content::CaseStudyRegistry;
use crate::dom::bind::{self, Page};
use crate::error::Result;

pub fn boot() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Info) {
        log::debug!("logger already installed: {err}");
    }

    let page = match Page::new() {
        Ok(page) => page,
        Err(err) => {
            log::error!("page unavailable, nothing wired: {err}");
            return;
        }
    };

    let theme = report("theme", bind::theme(&page));
    report("navigation", bind::navigation(&page));
    report("hero canvas", bind::hero_canvas(&page));
    report("hero parallax", bind::hero_parallax(&page));
    if let Some(theme) = theme {
        report("theme toggle", bind::theme_toggle(&page, theme));
    }
    report("portfolio filter", bind::portfolio_filter(&page));
    report("contact form", bind::contact_form(&page));
    if let Some(registry) = report("case studies", CaseStudyRegistry::builtin()) {
        report("case study modal", bind::modal(&page, Rc::new(registry)));
    }
    report("counters", bind::counters(&page));
    report("parallax", bind::parallax(&page));
    report("text reveals", bind::text_reveals(&page));
    report("hero stagger", bind::hero_stagger(&page));
    report("careers", bind::careers(&page));
    report("touch marker", bind::touch_marker(&page));
    report("error fallback", bind::error_fallback(&page));

    log::info!("Fusion Fronts interactivity ready");
}

fn report<T>(feature: &str, result: Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) if err.is_missing_element() => {
            log::debug!("{feature} skipped: {err}");
            None
        }
        Err(err) => {
            log::warn!("{feature} failed: {err}");
            None
        }
    }
}

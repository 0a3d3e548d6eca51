//! Per-feature initialisers. Each finds its elements, builds the component
//! with its DOM adapters, and attaches listeners for the page lifetime.
//!
//! An initialiser whose elements are absent returns
//! [`SiteError::MissingElement`]; the bootstrap skips that feature.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, ErrorEvent, EventTarget, HtmlButtonElement, HtmlElement, HtmlFormElement, HtmlInputElement,
    HtmlTextAreaElement, KeyboardEvent, Window,
};

use super::observe::observe_once;
use super::scheduler::BrowserScheduler;
use super::surfaces::{
    DomCounterDisplay, DomFilterSurface, DomFormSurface, DomModalSurface, DomNavSurface, DomScrollSurface,
    DomThemeTarget,
};
use super::{by_id, document, js_error, listen, query, query_all, query_all_in, require_all, scroll_y, set_class, set_style};
use crate::config::SiteConfig;
use crate::content::CaseStudyRegistry;
use crate::content::careers::application_notice;
use crate::error::{Result, SiteError};
use crate::state::contact::{ContactForm, FieldSnapshot, FormTiming, SubmitOutcome};
use crate::state::filter::{FilterTiming, PortfolioFilter, is_activation_key};
use crate::state::modal::CaseStudyModal;
use crate::state::nav::{NavController, NavThresholds, SectionOffset};
use crate::state::scroll_lock::ScrollLock;
use crate::state::theme::ThemeStore;
use crate::util::animation::{
    CounterRun, CounterTween, FrameThrottle, is_canvas_failure, parallax_offset, parse_count, stagger_delay_ms,
    translate_y,
};
use crate::util::schedule::{Scheduler, TaskHandle};

const CONFIG_ELEMENT_ID: &str = "site-config";

/// Handles every initialiser needs.
pub struct Page {
    pub window: Window,
    pub document: Document,
    pub config: SiteConfig,
    pub scheduler: Rc<dyn Scheduler>,
    pub scroll_lock: ScrollLock,
}

impl Page {
    pub fn new() -> Result<Self> {
        let window = super::window()?;
        let document = document(&window)?;
        let body = document.body().ok_or_else(|| SiteError::missing("body"))?;
        let config = load_config(&document);
        let scheduler: Rc<dyn Scheduler> = Rc::new(BrowserScheduler::new(window.clone()));
        let scroll_lock = ScrollLock::new(Box::new(DomScrollSurface::new(body)));
        Ok(Self { window, document, config, scheduler, scroll_lock })
    }
}

/// Overrides from `<script type="application/json" id="site-config">`, or
/// defaults when the block is absent or invalid.
fn load_config(document: &Document) -> SiteConfig {
    let Some(block) = document.get_element_by_id(CONFIG_ELEMENT_ID) else {
        log::debug!("no #{CONFIG_ELEMENT_ID} block, using default timings");
        return SiteConfig::default();
    };
    let raw = block.text_content().unwrap_or_default();
    match SiteConfig::from_json(&raw) {
        Ok(config) => {
            log::debug!("loaded site config overrides");
            config
        }
        Err(err) => {
            log::warn!("ignoring #{CONFIG_ELEMENT_ID}: {err}");
            SiteConfig::default()
        }
    }
}

// =============================================================
// Theme
// =============================================================

pub fn theme(page: &Page) -> Result<Rc<ThemeStore>> {
    let root = page.document.document_element().ok_or_else(|| SiteError::missing("html"))?;
    let store = super::storage::preference_store(&page.window);
    let theme = ThemeStore::load(page.config.theme_storage_key.clone(), store, Box::new(DomThemeTarget::new(root)));
    log::debug!("theme applied: {}", theme.get().as_str());
    Ok(Rc::new(theme))
}

pub fn theme_toggle(page: &Page, theme: Rc<ThemeStore>) -> Result<()> {
    let toggle = by_id(&page.document, "theme-toggle")?;
    listen(&toggle, "click", move |_| {
        let next = theme.toggle();
        log::debug!("theme toggled to {}", next.as_str());
    })
}

// =============================================================
// Navigation
// =============================================================

pub fn navigation(page: &Page) -> Result<()> {
    let navbar = by_id(&page.document, "navbar")?;
    let mobile_menu = match (by_id(&page.document, "hamburger"), by_id(&page.document, "nav-menu")) {
        (Ok(hamburger), Ok(menu)) => Some((hamburger, menu)),
        _ => {
            log::debug!("no mobile menu on this page");
            None
        }
    };
    let links = query_all(&page.document, ".nav-link")?;
    let sections = query_all(&page.document, "section")?;

    let hamburger = mobile_menu.as_ref().map(|(hamburger, _)| hamburger.clone());
    let surface = DomNavSurface::new(navbar, mobile_menu, links.clone());
    let nav = Rc::new(NavController::new(
        Box::new(surface),
        page.scroll_lock.clone(),
        NavThresholds::from(&page.config),
    ));

    let initial_y = scroll_y(&page.window);
    nav.update_scrolled(initial_y);
    nav.update_active_section(initial_y, &section_offsets(&sections));

    let throttle = Rc::new(FrameThrottle::new());
    let pending_frame: Rc<RefCell<Option<TaskHandle>>> = Rc::new(RefCell::new(None));
    let scheduler = Rc::clone(&page.scheduler);
    let window = page.window.clone();
    let nav_scroll = Rc::clone(&nav);
    listen(&page.window, "scroll", move |_| {
        let y = scroll_y(&window);
        nav_scroll.update_active_section(y, &section_offsets(&sections));
        if !throttle.try_begin() {
            return;
        }
        let nav_frame = Rc::clone(&nav_scroll);
        let throttle_frame = Rc::clone(&throttle);
        let window_frame = window.clone();
        let handle = scheduler.next_frame(Box::new(move || {
            nav_frame.update_scrolled(scroll_y(&window_frame));
            throttle_frame.finish();
        }));
        *pending_frame.borrow_mut() = Some(handle);
    })?;

    if let Some(hamburger) = hamburger {
        let nav_toggle = Rc::clone(&nav);
        listen(&hamburger, "click", move |_| nav_toggle.toggle_menu())?;
    }

    for link in &links {
        let nav_link = Rc::clone(&nav);
        listen(link, "click", move |_| nav_link.on_link_click())?;
    }
    Ok(())
}

/// Every `<section>` in document order; id-less ones carry an empty id.
fn section_offsets(sections: &[HtmlElement]) -> Vec<SectionOffset> {
    sections.iter().map(|section| SectionOffset::new(section.id(), f64::from(section.offset_top()))).collect()
}

// =============================================================
// Scroll effects
// =============================================================

/// Hero content drifts with the scroll.
pub fn hero_parallax(page: &Page) -> Result<()> {
    let root = page.document.document_element().ok_or_else(|| SiteError::missing("html"))?;
    query(&root, ".hero")?;
    let content = query(&root, ".hero-content")?;
    let rate = page.config.hero_parallax_rate;
    let window = page.window.clone();
    listen(&page.window, "scroll", move |_| {
        set_style(&content, "transform", &translate_y(parallax_offset(scroll_y(&window), rate)));
    })
}

pub fn parallax(page: &Page) -> Result<()> {
    let elements = require_all(&page.document, ".parallax")?;
    let rate = page.config.parallax_rate;
    let window = page.window.clone();
    listen(&page.window, "scroll", move |_| {
        let transform = translate_y(parallax_offset(scroll_y(&window), rate));
        for element in &elements {
            set_style(element, "transform", &transform);
        }
    })
}

pub fn counters(page: &Page) -> Result<()> {
    let elements = require_all(&page.document, ".stat-number[data-count]")?;
    let duration_ms = page.config.counter_duration_ms;
    let frame_ms = page.config.frame_ms;
    let scheduler = Rc::clone(&page.scheduler);
    let runs: RefCell<Vec<Rc<CounterRun>>> = RefCell::new(Vec::new());
    let targets = elements.clone();

    observe_once(&elements, page.config.counter_threshold, None, move |index| {
        let Some(element) = targets.get(index) else {
            return;
        };
        let raw = element.get_attribute("data-count").unwrap_or_default();
        let Some(target) = parse_count(&raw) else {
            log::debug!("skipping counter with data-count {raw:?}");
            return;
        };
        let run = CounterRun::start(
            CounterTween::new(target, duration_ms, frame_ms),
            Box::new(DomCounterDisplay::new(element.clone())),
            Rc::clone(&scheduler),
        );
        runs.borrow_mut().push(run);
    })
}

pub fn text_reveals(page: &Page) -> Result<()> {
    let elements = require_all(&page.document, ".text-reveal")?;
    let targets = elements.clone();
    observe_once(
        &elements,
        page.config.reveal_threshold,
        Some(page.config.reveal_root_margin.as_str()),
        move |index| {
            if let Some(element) = targets.get(index) {
                set_class(element, "revealed", true);
            }
        },
    )
}

/// Reveal the hero lines one after another.
pub fn hero_stagger(page: &Page) -> Result<()> {
    let elements = require_all(&page.document, ".hero .text-reveal")?;
    for (index, element) in elements.into_iter().enumerate() {
        let delay = stagger_delay_ms(index, page.config.hero_stagger_ms);
        page.scheduler.after(delay, Box::new(move || set_class(&element, "revealed", true))).detach();
    }
    Ok(())
}

// =============================================================
// Portfolio filter
// =============================================================

pub fn portfolio_filter(page: &Page) -> Result<()> {
    let buttons = require_all(&page.document, ".filter-btn")?;
    let items = require_all(&page.document, ".portfolio-item")?;
    let categories = items.iter().map(|item| item.get_attribute("data-category").unwrap_or_default()).collect();

    let surface = Rc::new(DomFilterSurface::new(buttons.clone(), items, page.config.hide_offset_px));
    let filter = Rc::new(PortfolioFilter::new(
        categories,
        surface,
        Rc::clone(&page.scheduler),
        FilterTiming::from(&page.config),
    ));

    for button in &buttons {
        let category = button.get_attribute("data-filter").unwrap_or_default();

        let filter_click = Rc::clone(&filter);
        let category_click = category.clone();
        listen(button, "click", move |_| filter_click.apply_filter(&category_click))?;

        let filter_key = Rc::clone(&filter);
        listen(button, "keydown", move |event| {
            let Some(key_event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            if is_activation_key(&key_event.key()) {
                event.prevent_default();
                filter_key.apply_filter(&category);
            }
        })?;
    }
    log::debug!("portfolio filter wired: {} items", filter.len());
    Ok(())
}

// =============================================================
// Contact form
// =============================================================

pub fn contact_form(page: &Page) -> Result<()> {
    let form = by_id(&page.document, "contact-form")?
        .dyn_into::<HtmlFormElement>()
        .map_err(|_| SiteError::missing("form#contact-form"))?;
    let button = query(&form, ".submit-btn")?
        .dyn_into::<HtmlButtonElement>()
        .map_err(|_| SiteError::missing("button.submit-btn"))?;
    let label = query(&form, ".submit-btn span")?;
    let fields = query_all_in(&form, "input, textarea")?;

    let idle_label = label.text_content().unwrap_or_default();
    let surface = DomFormSurface::new(form.clone(), button, label, fields.clone());
    let contact = Rc::new(ContactForm::new(
        idle_label,
        Box::new(surface),
        Rc::clone(&page.scheduler),
        FormTiming::from(&page.config),
    ));

    let contact_submit = Rc::clone(&contact);
    let snapshot_fields = fields.clone();
    listen(&form, "submit", move |event| {
        event.prevent_default();
        let snapshot: Vec<FieldSnapshot> = snapshot_fields.iter().map(field_snapshot).collect();
        match contact_submit.submit(&snapshot) {
            SubmitOutcome::Started => log::info!("contact form submitted"),
            SubmitOutcome::Busy => log::debug!("contact form busy, submit ignored"),
            SubmitOutcome::MissingFields(names) => log::debug!("contact form incomplete: {}", names.join(", ")),
        }
    })?;

    for (index, field) in fields.iter().enumerate() {
        let contact_focus = Rc::clone(&contact);
        listen(field, "focus", move |_| contact_focus.on_field_focus(index))?;

        let contact_blur = Rc::clone(&contact);
        let blurred = field.clone();
        listen(field, "blur", move |_| contact_blur.on_field_blur(index, &field_value(&blurred)))?;
    }
    Ok(())
}

fn field_value(field: &HtmlElement) -> String {
    if let Some(input) = field.dyn_ref::<HtmlInputElement>() {
        input.value()
    } else if let Some(area) = field.dyn_ref::<HtmlTextAreaElement>() {
        area.value()
    } else {
        String::new()
    }
}

fn field_snapshot(field: &HtmlElement) -> FieldSnapshot {
    let name = field.get_attribute("name").unwrap_or_else(|| field.id());
    FieldSnapshot { name, value: field_value(field), required: field.has_attribute("required") }
}

// =============================================================
// Case-study modal
// =============================================================

pub fn modal(page: &Page, registry: Rc<CaseStudyRegistry>) -> Result<()> {
    let root = by_id(&page.document, "portfolio-modal")?;
    let title = by_id(&page.document, "modal-title")?;
    let content = by_id(&page.document, "modal-content")?;
    let openers = query_all(&page.document, ".portfolio-btn")?;
    let closers = query_all_in(&root, ".modal-close")?;

    let surface = DomModalSurface::new(root.clone(), title, content);
    let modal = Rc::new(CaseStudyModal::new(registry, Box::new(surface), page.scroll_lock.clone()));

    for opener in &openers {
        let modal_open = Rc::clone(&modal);
        let project = opener.get_attribute("data-project").unwrap_or_default();
        listen(opener, "click", move |event| {
            event.stop_propagation();
            modal_open.open(&project);
        })?;
    }

    for closer in &closers {
        let modal_close = Rc::clone(&modal);
        listen(closer, "click", move |_| modal_close.close())?;
    }

    let modal_backdrop = Rc::clone(&modal);
    let root_target: EventTarget = root.clone().unchecked_into();
    listen(&root, "click", move |event| {
        let target_is_root = event.target().is_some_and(|target| target == root_target);
        if modal_backdrop.on_backdrop_click(target_is_root) {
            log::debug!("modal dismissed from backdrop");
        }
    })?;

    let modal_key = Rc::clone(&modal);
    listen(&page.document, "keydown", move |event| {
        if let Some(key_event) = event.dyn_ref::<KeyboardEvent>()
            && modal_key.on_key(&key_event.key())
        {
            log::debug!("modal dismissed with Escape");
        }
    })
}

// =============================================================
// Careers, touch devices, runtime errors
// =============================================================

/// `.job-apply-btn` clicks show where to send an application.
pub fn careers(page: &Page) -> Result<()> {
    require_all(&page.document, ".job-apply-btn")?;
    let window = page.window.clone();
    listen(&page.document, "click", move |event| {
        let target = match event.target().map(|t| t.dyn_into::<Element>()) {
            Some(Ok(element)) => element,
            _ => return,
        };
        if !target.class_list().contains("job-apply-btn") {
            return;
        }
        event.prevent_default();
        let notice = application_notice(&job_title(&target));
        super::checked(window.alert_with_message(&notice), "alert");
    })
}

fn job_title(button: &Element) -> String {
    match button.closest(".job-card") {
        Ok(Some(card)) => match card.query_selector("h4") {
            Ok(Some(heading)) => heading.text_content().unwrap_or_default(),
            _ => String::new(),
        },
        _ => String::new(),
    }
}

pub fn touch_marker(page: &Page) -> Result<()> {
    let has_touch = js_sys::Reflect::has(&page.window, &JsValue::from_str("ontouchstart"))
        .map_err(|err| js_error("ontouchstart probe", &err))?;
    if has_touch {
        let body = page.document.body().ok_or_else(|| SiteError::missing("body"))?;
        set_class(&body, "touch-device", true);
        log::debug!("touch device detected");
    }
    Ok(())
}

/// The hero canvas animation is switched off; CSS carries the hero.
pub fn hero_canvas(page: &Page) -> Result<()> {
    let canvas = by_id(&page.document, "hero-canvas")?;
    set_style(&canvas, "display", "none");
    log::debug!("hero canvas hidden");
    Ok(())
}

/// Log uncaught errors; a canvas failure hides the hero canvas.
pub fn error_fallback(page: &Page) -> Result<()> {
    let document = page.document.clone();
    listen(&page.window, "error", move |event| {
        let Some(error) = event.dyn_ref::<ErrorEvent>() else {
            return;
        };
        let message = error.message();
        log::error!("uncaught error: {message}");
        if is_canvas_failure(&message) {
            log::warn!("canvas animation failed, hiding #hero-canvas");
            if let Ok(canvas) = by_id(&document, "hero-canvas") {
                set_style(&canvas, "display", "none");
            }
        }
    })
}

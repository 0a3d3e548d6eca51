//! Browser side: web-sys adapters for the capability traits in
//! [`crate::state`], the gloo-timers scheduler, and listener wiring.
//!
//! Listeners attached here live as long as the page, so their closures are
//! handed to JS with `Closure::forget`.

pub mod bind;
pub mod observe;
pub mod scheduler;
pub mod storage;
pub mod surfaces;

use wasm_bindgen::{JsCast, JsValue, closure::Closure};
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, NodeList, Window};

use crate::error::{Result, SiteError};

pub fn window() -> Result<Window> {
    web_sys::window().ok_or_else(|| SiteError::Js("no window".into()))
}

pub fn document(window: &Window) -> Result<Document> {
    window.document().ok_or_else(|| SiteError::Js("no document".into()))
}

pub fn js_error(what: &str, err: &JsValue) -> SiteError {
    SiteError::Js(format!("{what}: {err:?}"))
}

/// Log a failed browser call and carry on.
pub fn checked<T>(result: std::result::Result<T, JsValue>, what: &str) {
    if let Err(err) = result {
        log::warn!("{what} failed: {err:?}");
    }
}

/// `getElementById`, requiring an `HTMLElement`.
pub fn by_id(document: &Document, id: &str) -> Result<HtmlElement> {
    match document.get_element_by_id(id).map(|element| element.dyn_into::<HtmlElement>()) {
        Some(Ok(element)) => Ok(element),
        _ => Err(SiteError::missing(format!("#{id}"))),
    }
}

/// First match of `selector` under `root`.
pub fn query(root: &Element, selector: &str) -> Result<HtmlElement> {
    match root.query_selector(selector) {
        Ok(Some(found)) => found.dyn_into::<HtmlElement>().map_err(|_| SiteError::missing(selector)),
        Ok(None) => Err(SiteError::missing(selector)),
        Err(err) => Err(js_error(selector, &err)),
    }
}

/// Every match of `selector` in the document; empty when nothing matches.
pub fn query_all(document: &Document, selector: &str) -> Result<Vec<HtmlElement>> {
    let list = document.query_selector_all(selector).map_err(|err| js_error(selector, &err))?;
    Ok(html_elements(&list))
}

/// Like [`query_all`] but scoped to `root`.
pub fn query_all_in(root: &Element, selector: &str) -> Result<Vec<HtmlElement>> {
    let list = root.query_selector_all(selector).map_err(|err| js_error(selector, &err))?;
    Ok(html_elements(&list))
}

/// Like [`query_all`] but a feature with no matches is reported missing.
pub fn require_all(document: &Document, selector: &str) -> Result<Vec<HtmlElement>> {
    let found = query_all(document, selector)?;
    if found.is_empty() {
        return Err(SiteError::missing(selector));
    }
    Ok(found)
}

fn html_elements(list: &NodeList) -> Vec<HtmlElement> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| match node.dyn_into::<HtmlElement>() {
            Ok(element) => Some(element),
            Err(_) => None,
        })
        .collect()
}

/// Attach `handler` for the lifetime of the page.
pub fn listen(target: &EventTarget, event: &str, handler: impl FnMut(Event) + 'static) -> Result<()> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .map_err(|err| js_error(event, &err))?;
    closure.forget();
    Ok(())
}

pub fn set_class(element: &Element, class: &str, on: bool) {
    checked(element.class_list().toggle_with_force(class, on), class);
}

pub fn set_style(element: &HtmlElement, property: &str, value: &str) {
    checked(element.style().set_property(property, value), property);
}

pub fn clear_style(element: &HtmlElement, property: &str) {
    checked(element.style().remove_property(property), property);
}

/// Current vertical scroll position; 0 if the browser refuses to say.
pub fn scroll_y(window: &Window) -> f64 {
    match window.scroll_y() {
        Ok(y) => y,
        Err(err) => {
            log::debug!("scrollY unavailable: {err:?}");
            0.0
        }
    }
}

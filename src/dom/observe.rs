//! IntersectionObserver wiring for reveal-once animations.

use js_sys::Array;
use wasm_bindgen::{JsCast, JsValue, closure::Closure};
use web_sys::{Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use super::js_error;
use crate::error::Result;

/// Observe `elements`, calling `on_enter` with the index of each element
/// that becomes visible. Entered elements stop being observed, so each
/// index is reported once.
pub fn observe_once(
    elements: &[HtmlElement],
    threshold: f64,
    root_margin: Option<&str>,
    mut on_enter: impl FnMut(usize) + 'static,
) -> Result<()> {
    let watched: Vec<Element> = elements.iter().map(|el| el.clone().unchecked_into::<Element>()).collect();
    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if !entry.is_intersecting() {
                    continue;
                }
                let target = entry.target();
                observer.unobserve(&target);
                if let Some(index) = watched.iter().position(|el| *el == target) {
                    on_enter(index);
                }
            }
        },
    );

    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(threshold));
    if let Some(margin) = root_margin {
        init.set_root_margin(margin);
    }
    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
        .map_err(|err| js_error("IntersectionObserver", &err))?;
    callback.forget();

    for element in elements {
        observer.observe(element);
    }
    Ok(())
}

//! web-sys implementations of the component capability traits.

use web_sys::{Element, HtmlButtonElement, HtmlElement, HtmlFormElement};

use super::{clear_style, set_class, set_style};
use crate::content::CaseStudy;
use crate::state::contact::FormSurface;
use crate::state::filter::FilterSurface;
use crate::state::modal::ModalSurface;
use crate::state::nav::NavSurface;
use crate::state::scroll_lock::ScrollSurface;
use crate::state::theme::{ThemePreference, ThemeTarget};
use crate::util::animation::{CounterDisplay, translate_y};

const SUCCESS_BACKGROUND: &str = "linear-gradient(135deg, #4CAF50 0%, #45a049 100%)";
const DEFAULT_BACKGROUND: &str = "var(--primary-gradient)";

/// `data-theme` on the `<html>` element.
pub struct DomThemeTarget {
    root: Element,
}

impl DomThemeTarget {
    #[must_use]
    pub fn new(root: Element) -> Self {
        Self { root }
    }
}

impl ThemeTarget for DomThemeTarget {
    fn apply_theme(&self, theme: ThemePreference) {
        super::checked(self.root.set_attribute("data-theme", theme.as_str()), "set data-theme");
    }
}

/// `overflow: hidden` on `<body>` while any holder suppresses scroll.
pub struct DomScrollSurface {
    body: HtmlElement,
}

impl DomScrollSurface {
    #[must_use]
    pub fn new(body: HtmlElement) -> Self {
        Self { body }
    }
}

impl ScrollSurface for DomScrollSurface {
    fn set_scroll_suppressed(&self, suppressed: bool) {
        if suppressed {
            set_style(&self.body, "overflow", "hidden");
        } else {
            clear_style(&self.body, "overflow");
        }
    }
}

pub struct DomFilterSurface {
    buttons: Vec<HtmlElement>,
    items: Vec<HtmlElement>,
    hide_offset_px: f64,
}

impl DomFilterSurface {
    #[must_use]
    pub fn new(buttons: Vec<HtmlElement>, items: Vec<HtmlElement>, hide_offset_px: f64) -> Self {
        Self { buttons, items, hide_offset_px }
    }
}

impl FilterSurface for DomFilterSurface {
    fn mark_active_filter(&self, category: &str) {
        for button in &self.buttons {
            let selected = button.get_attribute("data-filter").as_deref() == Some(category);
            set_class(button, "active", selected);
        }
    }

    fn set_item_displayed(&self, index: usize, displayed: bool) {
        if let Some(item) = self.items.get(index) {
            set_style(item, "display", if displayed { "block" } else { "none" });
        }
    }

    fn set_item_faded(&self, index: usize, faded: bool) {
        let Some(item) = self.items.get(index) else {
            return;
        };
        if faded {
            set_style(item, "opacity", "0");
            set_style(item, "transform", &translate_y(self.hide_offset_px));
        } else {
            set_style(item, "opacity", "1");
            set_style(item, "transform", &translate_y(0.0));
        }
    }
}

pub struct DomModalSurface {
    root: HtmlElement,
    title: HtmlElement,
    content: HtmlElement,
}

impl DomModalSurface {
    #[must_use]
    pub fn new(root: HtmlElement, title: HtmlElement, content: HtmlElement) -> Self {
        Self { root, title, content }
    }
}

impl ModalSurface for DomModalSurface {
    fn show_case_study(&self, study: &CaseStudy) {
        self.title.set_text_content(Some(&study.title));
        self.content.set_inner_html(&study.content_html);
        set_class(&self.root, "active", true);
    }

    fn hide(&self) {
        set_class(&self.root, "active", false);
    }
}

/// The mobile menu pair is optional; pages without one still get the
/// scrolled look and active links.
pub struct DomNavSurface {
    navbar: HtmlElement,
    mobile_menu: Option<(HtmlElement, HtmlElement)>,
    links: Vec<HtmlElement>,
}

impl DomNavSurface {
    #[must_use]
    pub fn new(navbar: HtmlElement, mobile_menu: Option<(HtmlElement, HtmlElement)>, links: Vec<HtmlElement>) -> Self {
        Self { navbar, mobile_menu, links }
    }
}

impl NavSurface for DomNavSurface {
    fn set_scrolled(&self, scrolled: bool) {
        set_class(&self.navbar, "scrolled", scrolled);
    }

    fn set_menu_open(&self, open: bool) {
        if let Some((hamburger, menu)) = &self.mobile_menu {
            set_class(hamburger, "active", open);
            set_class(menu, "active", open);
        }
    }

    fn set_active_link(&self, section_id: Option<&str>) {
        let wanted = section_id.map(|id| format!("#{id}"));
        for link in &self.links {
            let active = wanted.is_some() && link.get_attribute("href") == wanted;
            set_class(link, "active", active);
        }
    }
}

pub struct DomFormSurface {
    form: HtmlFormElement,
    button: HtmlButtonElement,
    label: HtmlElement,
    fields: Vec<HtmlElement>,
}

impl DomFormSurface {
    #[must_use]
    pub fn new(form: HtmlFormElement, button: HtmlButtonElement, label: HtmlElement, fields: Vec<HtmlElement>) -> Self {
        Self { form, button, label, fields }
    }
}

impl FormSurface for DomFormSurface {
    fn render_submit(&self, label: &str, disabled: bool, success: bool) {
        self.label.set_text_content(Some(label));
        self.button.set_disabled(disabled);
        set_style(&self.button, "background", if success { SUCCESS_BACKGROUND } else { DEFAULT_BACKGROUND });
        set_class(&self.button, "sent", success);
    }

    fn clear_fields(&self) {
        self.form.reset();
    }

    fn set_field_focused(&self, index: usize, focused: bool) {
        if let Some(container) = self.fields.get(index).and_then(|field| field.parent_element()) {
            set_class(&container, "focused", focused);
        }
    }
}

/// Writes a counter's running value as the element's text.
pub struct DomCounterDisplay {
    element: HtmlElement,
}

impl DomCounterDisplay {
    #[must_use]
    pub fn new(element: HtmlElement) -> Self {
        Self { element }
    }
}

impl CounterDisplay for DomCounterDisplay {
    fn show_count(&self, value: u64) {
        self.element.set_text_content(Some(&value.to_string()));
    }
}

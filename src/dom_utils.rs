//! Thin helpers for repetitive DOM operations so `set_attribute("style", …)`
//! calls do not spread across the code base.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};

pub fn show(el: &Element) {
    let _ = el.class_list().remove_1("hidden");
}

pub fn hide(el: &Element) {
    let _ = el.class_list().add_1("hidden");
}

/// Mark a tab button as the active one.
pub fn set_active(btn: &Element) {
    btn.set_class_name("tab-button active");
}

pub fn set_inactive(btn: &Element) {
    btn.set_class_name("tab-button");
}

/// Current value of an `<input>` by id; empty string when missing.
pub fn input_value(document: &Document, id: &str) -> String {
    document
        .get_element_by_id(id)
        .and_then(|e| e.dyn_into::<HtmlInputElement>().ok())
        .map(|i| i.value())
        .unwrap_or_default()
}

pub fn textarea_value(document: &Document, id: &str) -> String {
    document
        .get_element_by_id(id)
        .and_then(|e| e.dyn_into::<HtmlTextAreaElement>().ok())
        .map(|t| t.value())
        .unwrap_or_default()
}

pub fn set_input_value(document: &Document, id: &str, value: &str) {
    if let Some(input) = document
        .get_element_by_id(id)
        .and_then(|e| e.dyn_into::<HtmlInputElement>().ok())
    {
        input.set_value(value);
    }
}

pub fn set_textarea_value(document: &Document, id: &str, value: &str) {
    if let Some(area) = document
        .get_element_by_id(id)
        .and_then(|e| e.dyn_into::<HtmlTextAreaElement>().ok())
    {
        area.set_value(value);
    }
}

pub fn select_value(document: &Document, id: &str) -> String {
    document
        .get_element_by_id(id)
        .and_then(|e| e.dyn_into::<HtmlSelectElement>().ok())
        .map(|s| s.value())
        .unwrap_or_default()
}

/// Show an inline error next to a form field. The holder element is expected
/// to exist in the form markup with class `field-error`.
pub fn set_field_error(document: &Document, holder_id: &str, message: Option<&str>) {
    if let Some(el) = document.get_element_by_id(holder_id) {
        match message {
            Some(text) => {
                el.set_text_content(Some(text));
                show(&el);
            }
            None => {
                el.set_text_content(None);
                hide(&el);
            }
        }
    }
}

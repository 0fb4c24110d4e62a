//! Shared modal helper. Keeps creation / show / hide logic in one place so
//! feature modals don't duplicate the same boilerplate.

use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use crate::dom_utils;

/// Ensure a `<div id="{id}" class="modal">` backdrop with a
/// `.modal-content` child exists and return `(backdrop, content)`. The
/// content element is cleared so callers can rebuild their inner markup.
pub fn ensure_modal(document: &Document, id: &str) -> Result<(Element, Element), JsValue> {
    let backdrop = if let Some(el) = document.get_element_by_id(id) {
        el
    } else {
        let el = document.create_element("div")?;
        el.set_id(id);
        el.set_class_name("modal");
        dom_utils::hide(&el);
        document
            .body()
            .ok_or_else(|| JsValue::from_str("document has no body"))?
            .append_child(&el)?;
        el
    };

    let content = if let Some(el) = backdrop.query_selector(".modal-content")? {
        el
    } else {
        let el = document.create_element("div")?;
        el.set_class_name("modal-content");
        backdrop.append_child(&el)?;
        el
    };
    content.set_inner_html("");

    Ok((backdrop, content))
}

pub fn show(backdrop: &Element) {
    dom_utils::show(backdrop);
}

pub fn hide(backdrop: &Element) {
    dom_utils::hide(backdrop);
}

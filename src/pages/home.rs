//! Landing page after login: shortcuts to the content screens.

use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

pub fn build(document: &Document) -> Result<Element, JsValue> {
    let section = document.create_element("section")?;
    section.set_class_name("home-page");

    let title = document.create_element("h1")?;
    title.set_text_content(Some("Dashboard"));
    section.append_child(&title)?;

    let hint = document.create_element("p")?;
    hint.set_class_name("muted");
    hint.set_text_content(Some(
        "Manage workflows, articles, videos, banners and the homepage from the navigation above.",
    ));
    section.append_child(&hint)?;

    Ok(section)
}

//! Page dispatcher: rebuilds the `#app-root` contents for the active page.

use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use crate::components::{modal, navbar};
use crate::pages;
use crate::state::{Page, APP_STATE};

pub fn render_active_page() -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let root = ensure_app_root(&document)?;
    root.set_inner_html("");

    // The node modal lives outside the root; hide it before rebuilding so a
    // closed editor never leaves a stale modal behind.
    if let Some(stale) = document.get_element_by_id("node-editor-modal") {
        modal::hide(&stale);
    }

    let page = APP_STATE.with(|state| state.borrow().active_page);

    if page != Page::Login {
        root.append_child(&navbar::build(&document, page)?.into())?;
    }

    let content = match page {
        Page::Login => pages::login::build(&document)?,
        Page::Home => pages::home::build(&document)?,
        Page::Articles => pages::articles::build(&document)?,
        Page::Videos => pages::videos::build(&document)?,
        Page::Banners => pages::banners::build(&document)?,
        Page::HomeContent => pages::home_content::build(&document)?,
        Page::Workflows => pages::workflows::build(&document)?,
    };
    root.append_child(&content)?;

    Ok(())
}

fn ensure_app_root(document: &Document) -> Result<Element, JsValue> {
    if let Some(el) = document.get_element_by_id("app-root") {
        return Ok(el);
    }
    let root = document.create_element("div")?;
    root.set_id("app-root");
    document
        .body()
        .ok_or_else(|| JsValue::from_str("document has no body"))?
        .append_child(&root)?;
    Ok(root)
}

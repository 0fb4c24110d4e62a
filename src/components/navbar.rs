//! Top navigation bar shown on every authenticated page.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, MouseEvent};

use crate::messages::Message;
use crate::state::{dispatch_global_message, Page};

const LINKS: [(Page, &str); 6] = [
    (Page::Home, "Home"),
    (Page::Workflows, "Workflows"),
    (Page::Articles, "Articles"),
    (Page::Videos, "Videos"),
    (Page::Banners, "Banners"),
    (Page::HomeContent, "Homepage"),
];

pub fn build(document: &Document, active: Page) -> Result<Element, JsValue> {
    let nav = document.create_element("nav")?;
    nav.set_class_name("navbar");

    for (page, label) in LINKS {
        let link = document.create_element("button")?;
        link.set_class_name(if page == active {
            "nav-link active"
        } else {
            "nav-link"
        });
        link.set_text_content(Some(label));
        let cb = Closure::wrap(Box::new(move |_e: MouseEvent| {
            dispatch_global_message(Message::NavigateTo(page));
        }) as Box<dyn FnMut(_)>);
        link.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
        cb.forget();
        nav.append_child(&link)?;
    }

    let logout = document.create_element("button")?;
    logout.set_class_name("nav-link logout");
    logout.set_text_content(Some("Log out"));
    let cb = Closure::wrap(Box::new(move |_e: MouseEvent| {
        dispatch_global_message(Message::Logout);
    }) as Box<dyn FnMut(_)>);
    logout.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
    cb.forget();
    nav.append_child(&logout)?;

    Ok(nav)
}

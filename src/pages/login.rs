//! Login screen: exchanges credentials for a bearer token.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlInputElement, MouseEvent};

use wasm_bindgen_futures::spawn_local;

use crate::dom_utils;
use crate::messages::Message;
use crate::network::api_client::{describe_error, ApiClient};
use crate::state::dispatch_global_message;

pub fn build(document: &Document) -> Result<Element, JsValue> {
    let section = document.create_element("section")?;
    section.set_class_name("login-page");

    let title = document.create_element("h1")?;
    title.set_text_content(Some("CMS Admin"));
    section.append_child(&title)?;

    let form = document.create_element("div")?;
    form.set_class_name("login-form");

    let user_label = document.create_element("label")?;
    user_label.set_text_content(Some("Username"));
    form.append_child(&user_label)?;
    let username = document.create_element("input")?;
    username.set_id("login-username");
    form.append_child(&username)?;

    let pass_label = document.create_element("label")?;
    pass_label.set_text_content(Some("Password"));
    form.append_child(&pass_label)?;
    let password: HtmlInputElement = document
        .create_element("input")?
        .dyn_into()
        .map_err(|_| JsValue::from_str("not an input"))?;
    password.set_id("login-password");
    password.set_type("password");
    form.append_child(&password)?;

    let error = document.create_element("div")?;
    error.set_id("login-error");
    error.set_class_name("field-error");
    dom_utils::hide(&error);
    form.append_child(&error)?;

    let submit = document.create_element("button")?;
    submit.set_class_name("primary");
    submit.set_text_content(Some("Log in"));
    let cb = Closure::wrap(Box::new(move |_e: MouseEvent| {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let username = dom_utils::input_value(&document, "login-username");
        let password = dom_utils::input_value(&document, "login-password");
        if username.trim().is_empty() || password.is_empty() {
            dom_utils::set_field_error(
                &document,
                "login-error",
                Some("Username and password are required"),
            );
            return;
        }
        dom_utils::set_field_error(&document, "login-error", None);

        spawn_local(async move {
            match ApiClient::login(&username, &password).await {
                Ok(token) => dispatch_global_message(Message::LoggedIn { token }),
                Err(e) => {
                    if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                        dom_utils::set_field_error(
                            &document,
                            "login-error",
                            Some(&format!("Login failed: {}", describe_error(&e))),
                        );
                    }
                }
            }
        });
    }) as Box<dyn FnMut(_)>);
    submit.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
    cb.forget();
    form.append_child(&submit)?;

    section.append_child(&form)?;
    Ok(section)
}

//! Banner screen: title plus an image upload. Editing loads the record into
//! the form; the next submit becomes a PUT and a new image is optional.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, FormData, HtmlInputElement, MouseEvent};

use crate::dom_utils;
use crate::models::Banner;
use crate::network::api_client::{describe_error, ApiClient};
use crate::toast;

pub fn build(document: &Document) -> Result<Element, JsValue> {
    let section = document.create_element("section")?;
    section.set_class_name("banners-page");

    let title = document.create_element("h2")?;
    title.set_text_content(Some("Banners"));
    section.append_child(&title)?;

    section.append_child(&build_form(document)?.into())?;

    let list = document.create_element("div")?;
    list.set_id("banners-list");
    list.set_text_content(Some("Loading…"));
    section.append_child(&list)?;

    load_banners();
    Ok(section)
}

fn build_form(document: &Document) -> Result<Element, JsValue> {
    let form = document.create_element("div")?;
    form.set_class_name("create-form");

    let title_label = document.create_element("label")?;
    title_label.set_text_content(Some("Title"));
    form.append_child(&title_label)?;
    let title = document.create_element("input")?;
    title.set_id("banner-title");
    form.append_child(&title)?;

    let file_label = document.create_element("label")?;
    file_label.set_text_content(Some("Image"));
    form.append_child(&file_label)?;
    let file: HtmlInputElement = document
        .create_element("input")?
        .dyn_into()
        .map_err(|_| JsValue::from_str("not an input"))?;
    file.set_id("banner-image");
    file.set_type("file");
    file.set_attribute("accept", "image/*")?;
    form.append_child(&file)?;

    let error = document.create_element("div")?;
    error.set_id("banner-error");
    error.set_class_name("field-error");
    dom_utils::hide(&error);
    form.append_child(&error)?;

    let editing: HtmlInputElement = document
        .create_element("input")?
        .dyn_into()
        .map_err(|_| JsValue::from_str("not an input"))?;
    editing.set_id("banner-editing-id");
    editing.set_type("hidden");
    form.append_child(&editing)?;

    let submit = document.create_element("button")?;
    submit.set_class_name("primary");
    submit.set_id("banner-submit");
    submit.set_text_content(Some("Create Banner"));
    let cb = Closure::wrap(Box::new(move |_e: MouseEvent| {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let title = dom_utils::input_value(&document, "banner-title");
        let editing_id = dom_utils::input_value(&document, "banner-editing-id");
        let file = document
            .get_element_by_id("banner-image")
            .and_then(|e| e.dyn_into::<HtmlInputElement>().ok())
            .and_then(|i| i.files())
            .and_then(|files| files.get(0));

        if title.trim().is_empty() {
            dom_utils::set_field_error(&document, "banner-error", Some("Title is required"));
            return;
        }
        // An update without a new file keeps the stored image.
        if editing_id.is_empty() && file.is_none() {
            dom_utils::set_field_error(&document, "banner-error", Some("An image is required"));
            return;
        }
        dom_utils::set_field_error(&document, "banner-error", None);

        let form = match FormData::new() {
            Ok(f) => f,
            Err(_) => return,
        };
        let _ = form.append_with_str("title", &title);
        if let Some(file) = file {
            let _ = form.append_with_blob("image", &file);
        }

        spawn_local(async move {
            let result = if editing_id.is_empty() {
                ApiClient::create_banner(&form).await
            } else {
                ApiClient::update_banner(&editing_id, &form).await
            };
            match result {
                Ok(_) => {
                    toast::success("Banner saved");
                    reset_form();
                    load_banners();
                }
                Err(e) => toast::error(&format!("Failed to save banner: {}", describe_error(&e))),
            }
        });
    }) as Box<dyn FnMut(_)>);
    submit.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
    cb.forget();
    form.append_child(&submit)?;

    Ok(form)
}

/// Load an existing banner into the form so the next submit updates it.
pub fn begin_edit(document: &Document, banner: &Banner) {
    dom_utils::set_input_value(
        document,
        "banner-editing-id",
        banner.id.as_deref().unwrap_or(""),
    );
    dom_utils::set_input_value(document, "banner-title", &banner.title);
    if let Some(btn) = document.get_element_by_id("banner-submit") {
        btn.set_text_content(Some("Update Banner"));
    }
}

fn reset_form() {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    for id in ["banner-editing-id", "banner-title"] {
        dom_utils::set_input_value(&document, id, "");
    }
    if let Some(btn) = document.get_element_by_id("banner-submit") {
        btn.set_text_content(Some("Create Banner"));
    }
}

fn load_banners() {
    spawn_local(async {
        let outcome = ApiClient::get_banners().await.and_then(|body| {
            serde_json::from_str::<Vec<Banner>>(&body)
                .map_err(|e| JsValue::from_str(&e.to_string()))
        });
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let Some(list) = document.get_element_by_id("banners-list") else {
            return;
        };
        match outcome {
            Ok(banners) => {
                if let Err(e) = render_list(&document, &list, &banners) {
                    web_sys::console::error_1(&format!("Failed to render banners: {:?}", e).into());
                }
            }
            Err(e) => list.set_text_content(Some(&format!(
                "Failed to load banners: {}",
                describe_error(&e)
            ))),
        }
    });
}

fn render_list(document: &Document, list: &Element, banners: &[Banner]) -> Result<(), JsValue> {
    list.set_inner_html("");
    if banners.is_empty() {
        list.set_text_content(Some("No banners yet."));
        return Ok(());
    }

    let table = document.create_element("table")?;
    table.set_class_name("data-table");
    let head = document.create_element("tr")?;
    for col in ["Title", "Image", ""] {
        let th = document.create_element("th")?;
        th.set_text_content(Some(col));
        head.append_child(&th)?;
    }
    table.append_child(&head)?;

    for banner in banners {
        let row = document.create_element("tr")?;
        for text in [banner.title.as_str(), banner.image_url.as_str()] {
            let td = document.create_element("td")?;
            td.set_text_content(Some(text));
            row.append_child(&td)?;
        }
        let actions = document.create_element("td")?;
        if let Some(id) = banner.id.clone() {
            let edit = document.create_element("button")?;
            edit.set_text_content(Some("Edit"));
            let record = banner.clone();
            let cb = Closure::wrap(Box::new(move |_e: MouseEvent| {
                if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                    begin_edit(&document, &record);
                }
            }) as Box<dyn FnMut(_)>);
            edit.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
            cb.forget();
            actions.append_child(&edit)?;

            let delete = document.create_element("button")?;
            delete.set_class_name("danger");
            delete.set_text_content(Some("Delete"));
            let cb = Closure::wrap(Box::new(move |_e: MouseEvent| {
                let id = id.clone();
                spawn_local(async move {
                    match ApiClient::delete_banner(&id).await {
                        Ok(()) => {
                            toast::success("Banner deleted");
                            load_banners();
                        }
                        Err(e) => toast::error(&format!(
                            "Failed to delete banner: {}",
                            describe_error(&e)
                        )),
                    }
                });
            }) as Box<dyn FnMut(_)>);
            delete.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
            cb.forget();
            actions.append_child(&delete)?;
        }
        row.append_child(&actions)?;
        table.append_child(&row)?;
    }

    list.append_child(&table)?;
    Ok(())
}

//! Homepage sections screen. Key-value sections are edited as typed rows;
//! the JSON encoding only exists at the persistence boundary.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, HtmlInputElement, HtmlTextAreaElement, MouseEvent};

use crate::dom_utils;
use crate::models::{HomeSection, SectionContent};
use crate::network::api_client::{describe_error, ApiClient};
use crate::toast;

pub fn build(document: &Document) -> Result<Element, JsValue> {
    let section = document.create_element("section")?;
    section.set_class_name("home-content-page");

    let title = document.create_element("h2")?;
    title.set_text_content(Some("Homepage Sections"));
    section.append_child(&title)?;

    let list = document.create_element("div")?;
    list.set_id("home-sections");
    list.set_text_content(Some("Loading…"));
    section.append_child(&list)?;

    load_sections();
    Ok(section)
}

fn load_sections() {
    spawn_local(async {
        let outcome = ApiClient::get_home_sections().await.and_then(|body| {
            serde_json::from_str::<Vec<HomeSection>>(&body)
                .map_err(|e| JsValue::from_str(&e.to_string()))
        });
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let Some(list) = document.get_element_by_id("home-sections") else {
            return;
        };
        match outcome {
            Ok(sections) => {
                list.set_inner_html("");
                for section in &sections {
                    match build_card(&document, section) {
                        Ok(card) => {
                            let _ = list.append_child(&card);
                        }
                        Err(e) => web_sys::console::error_1(
                            &format!("Failed to render section: {:?}", e).into(),
                        ),
                    }
                }
                if sections.is_empty() {
                    list.set_text_content(Some("No sections configured."));
                }
            }
            Err(e) => list.set_text_content(Some(&format!(
                "Failed to load sections: {}",
                describe_error(&e)
            ))),
        }
    });
}

fn build_card(document: &Document, section: &HomeSection) -> Result<Element, JsValue> {
    let Some(section_id) = section.id.clone() else {
        return Err(JsValue::from_str("section without id"));
    };

    let card = document.create_element("div")?;
    card.set_class_name("section-card");

    let heading = document.create_element("h3")?;
    heading.set_text_content(Some(if section.key.is_empty() {
        "(unnamed section)"
    } else {
        &section.key
    }));
    card.append_child(&heading)?;

    let title_label = document.create_element("label")?;
    title_label.set_text_content(Some("Title"));
    card.append_child(&title_label)?;
    let title: HtmlInputElement = document
        .create_element("input")?
        .dyn_into()
        .map_err(|_| JsValue::from_str("not an input"))?;
    title.set_id(&format!("section-{}-title", section_id));
    title.set_value(&section.title);
    card.append_child(&title)?;

    // A section whose content parses as a flat string map gets the typed
    // row editor; anything else stays a plain text block.
    let parsed = SectionContent::from_json(&section.content);
    let key_value = section.kind == "keyValue" || parsed.is_ok();
    if key_value {
        let entries = document.create_element("div")?;
        entries.set_id(&format!("section-{}-entries", section_id));
        entries.set_class_name("kv-entries");
        let content = parsed.unwrap_or_default();
        for (key, value) in content.entries() {
            entries.append_child(&build_entry_row(document, key, value)?.into())?;
        }
        card.append_child(&entries)?;

        let add = document.create_element("button")?;
        add.set_text_content(Some("Add entry"));
        let entries_id = format!("section-{}-entries", section_id);
        let cb = Closure::wrap(Box::new(move |_e: MouseEvent| {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            if let Some(entries) = document.get_element_by_id(&entries_id) {
                if let Ok(row) = build_entry_row(&document, "", "") {
                    let _ = entries.append_child(&row);
                }
            }
        }) as Box<dyn FnMut(_)>);
        add.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
        cb.forget();
        card.append_child(&add)?;
    } else {
        let content_label = document.create_element("label")?;
        content_label.set_text_content(Some("Content"));
        card.append_child(&content_label)?;
        let content: HtmlTextAreaElement = document
            .create_element("textarea")?
            .dyn_into()
            .map_err(|_| JsValue::from_str("not a textarea"))?;
        content.set_id(&format!("section-{}-content", section_id));
        content.set_value(&section.content);
        card.append_child(&content)?;
    }

    let error = document.create_element("div")?;
    error.set_id(&format!("section-{}-error", section_id));
    error.set_class_name("field-error");
    dom_utils::hide(&error);
    card.append_child(&error)?;

    let save = document.create_element("button")?;
    save.set_class_name("primary");
    save.set_text_content(Some("Save section"));
    let cb = Closure::wrap(Box::new(move |_e: MouseEvent| {
        save_section(section_id.clone(), key_value);
    }) as Box<dyn FnMut(_)>);
    save.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
    cb.forget();
    card.append_child(&save)?;

    Ok(card)
}

fn build_entry_row(document: &Document, key: &str, value: &str) -> Result<Element, JsValue> {
    let row = document.create_element("div")?;
    row.set_class_name("kv-row");

    let key_input: HtmlInputElement = document
        .create_element("input")?
        .dyn_into()
        .map_err(|_| JsValue::from_str("not an input"))?;
    key_input.set_class_name("kv-key");
    key_input.set_placeholder("key");
    key_input.set_value(key);
    row.append_child(&key_input)?;

    let value_input: HtmlInputElement = document
        .create_element("input")?
        .dyn_into()
        .map_err(|_| JsValue::from_str("not an input"))?;
    value_input.set_class_name("kv-value");
    value_input.set_placeholder("value");
    value_input.set_value(value);
    row.append_child(&value_input)?;

    let remove = document.create_element("button")?;
    remove.set_text_content(Some("✕"));
    let row_el = row.clone();
    let cb = Closure::wrap(Box::new(move |_e: MouseEvent| {
        row_el.remove();
    }) as Box<dyn FnMut(_)>);
    remove.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
    cb.forget();
    row.append_child(&remove)?;

    Ok(row)
}

fn save_section(section_id: String, key_value: bool) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };

    let title = dom_utils::input_value(&document, &format!("section-{}-title", section_id));
    let content = if key_value {
        match collect_entries(&document, &section_id) {
            Ok(content) => content.to_json(),
            Err(message) => {
                dom_utils::set_field_error(
                    &document,
                    &format!("section-{}-error", section_id),
                    Some(&message),
                );
                return;
            }
        }
    } else {
        dom_utils::textarea_value(&document, &format!("section-{}-content", section_id))
    };
    dom_utils::set_field_error(&document, &format!("section-{}-error", section_id), None);

    let payload = serde_json::json!({ "title": title, "content": content }).to_string();
    spawn_local(async move {
        match ApiClient::update_home_section(&section_id, &payload).await {
            Ok(_) => toast::success("Section saved"),
            Err(e) => toast::error(&format!("Failed to save section: {}", describe_error(&e))),
        }
    });
}

/// Read the key-value rows back into a typed `SectionContent`. Empty keys
/// are rejected; duplicate keys collapse last-one-wins.
fn collect_entries(document: &Document, section_id: &str) -> Result<SectionContent, String> {
    let Some(entries) = document.get_element_by_id(&format!("section-{}-entries", section_id))
    else {
        return Ok(SectionContent::new());
    };
    let rows = entries
        .query_selector_all(".kv-row")
        .map_err(|_| "failed to read entries".to_string())?;

    let mut content = SectionContent::new();
    for i in 0..rows.length() {
        let Some(row) = rows.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
            continue;
        };
        let key = row
            .query_selector(".kv-key")
            .ok()
            .flatten()
            .and_then(|e| e.dyn_into::<HtmlInputElement>().ok())
            .map(|i| i.value())
            .unwrap_or_default();
        let value = row
            .query_selector(".kv-value")
            .ok()
            .flatten()
            .and_then(|e| e.dyn_into::<HtmlInputElement>().ok())
            .map(|i| i.value())
            .unwrap_or_default();
        if key.trim().is_empty() {
            return Err("Every entry needs a key".to_string());
        }
        content.set(key.trim(), &value);
    }
    Ok(content)
}

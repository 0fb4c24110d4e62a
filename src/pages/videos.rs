//! Videos screen: a video is either an external URL or an uploaded file.
//! Editing loads the record into the form; the next submit becomes a PUT.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, FormData, HtmlInputElement, MouseEvent};

use crate::dom_utils;
use crate::models::Video;
use crate::network::api_client::{describe_error, ApiClient};
use crate::toast;

pub fn build(document: &Document) -> Result<Element, JsValue> {
    let section = document.create_element("section")?;
    section.set_class_name("videos-page");

    let title = document.create_element("h2")?;
    title.set_text_content(Some("Videos"));
    section.append_child(&title)?;

    section.append_child(&build_form(document)?.into())?;

    let list = document.create_element("div")?;
    list.set_id("videos-list");
    list.set_text_content(Some("Loading…"));
    section.append_child(&list)?;

    load_videos();
    Ok(section)
}

fn build_form(document: &Document) -> Result<Element, JsValue> {
    let form = document.create_element("div")?;
    form.set_class_name("create-form");

    for (id, label) in [
        ("video-title", "Title"),
        ("video-url", "Video URL (leave empty when uploading a file)"),
    ] {
        let l = document.create_element("label")?;
        l.set_text_content(Some(label));
        form.append_child(&l)?;
        let input = document.create_element("input")?;
        input.set_id(id);
        form.append_child(&input)?;
    }

    let file_label = document.create_element("label")?;
    file_label.set_text_content(Some("Local video file"));
    form.append_child(&file_label)?;
    let file: HtmlInputElement = document
        .create_element("input")?
        .dyn_into()
        .map_err(|_| JsValue::from_str("not an input"))?;
    file.set_id("video-file");
    file.set_type("file");
    file.set_attribute("accept", "video/*")?;
    form.append_child(&file)?;

    let error = document.create_element("div")?;
    error.set_id("video-error");
    error.set_class_name("field-error");
    dom_utils::hide(&error);
    form.append_child(&error)?;

    let editing: HtmlInputElement = document
        .create_element("input")?
        .dyn_into()
        .map_err(|_| JsValue::from_str("not an input"))?;
    editing.set_id("video-editing-id");
    editing.set_type("hidden");
    form.append_child(&editing)?;

    let submit = document.create_element("button")?;
    submit.set_class_name("primary");
    submit.set_id("video-submit");
    submit.set_text_content(Some("Create Video"));
    let cb = Closure::wrap(Box::new(move |_e: MouseEvent| {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let title = dom_utils::input_value(&document, "video-title");
        let url = dom_utils::input_value(&document, "video-url");
        let editing_id = dom_utils::input_value(&document, "video-editing-id");
        let file = document
            .get_element_by_id("video-file")
            .and_then(|e| e.dyn_into::<HtmlInputElement>().ok())
            .and_then(|i| i.files())
            .and_then(|files| files.get(0));

        if title.trim().is_empty() {
            dom_utils::set_field_error(&document, "video-error", Some("Title is required"));
            return;
        }
        // An update without a new URL or file keeps the stored video.
        if editing_id.is_empty() && url.trim().is_empty() && file.is_none() {
            dom_utils::set_field_error(
                &document,
                "video-error",
                Some("Provide a URL or upload a file"),
            );
            return;
        }
        dom_utils::set_field_error(&document, "video-error", None);

        let form = match FormData::new() {
            Ok(f) => f,
            Err(_) => return,
        };
        let _ = form.append_with_str("title", &title);
        let _ = form.append_with_str("videoUrl", &url);
        if let Some(file) = file {
            let _ = form.append_with_blob("localVideo", &file);
        }

        spawn_local(async move {
            let result = if editing_id.is_empty() {
                ApiClient::create_video(&form).await
            } else {
                ApiClient::update_video(&editing_id, &form).await
            };
            match result {
                Ok(_) => {
                    toast::success("Video saved");
                    reset_form();
                    load_videos();
                }
                Err(e) => toast::error(&format!("Failed to save video: {}", describe_error(&e))),
            }
        });
    }) as Box<dyn FnMut(_)>);
    submit.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
    cb.forget();
    form.append_child(&submit)?;

    Ok(form)
}

/// Load an existing video into the form so the next submit updates it.
pub fn begin_edit(document: &Document, video: &Video) {
    dom_utils::set_input_value(
        document,
        "video-editing-id",
        video.id.as_deref().unwrap_or(""),
    );
    dom_utils::set_input_value(document, "video-title", &video.title);
    dom_utils::set_input_value(document, "video-url", &video.video_url);
    if let Some(btn) = document.get_element_by_id("video-submit") {
        btn.set_text_content(Some("Update Video"));
    }
}

fn reset_form() {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    for id in ["video-editing-id", "video-title", "video-url"] {
        dom_utils::set_input_value(&document, id, "");
    }
    if let Some(btn) = document.get_element_by_id("video-submit") {
        btn.set_text_content(Some("Create Video"));
    }
}

fn load_videos() {
    spawn_local(async {
        let outcome = ApiClient::get_videos().await.and_then(|body| {
            serde_json::from_str::<Vec<Video>>(&body).map_err(|e| JsValue::from_str(&e.to_string()))
        });
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let Some(list) = document.get_element_by_id("videos-list") else {
            return;
        };
        match outcome {
            Ok(videos) => {
                if let Err(e) = render_list(&document, &list, &videos) {
                    web_sys::console::error_1(&format!("Failed to render videos: {:?}", e).into());
                }
            }
            Err(e) => list.set_text_content(Some(&format!(
                "Failed to load videos: {}",
                describe_error(&e)
            ))),
        }
    });
}

fn render_list(document: &Document, list: &Element, videos: &[Video]) -> Result<(), JsValue> {
    list.set_inner_html("");
    if videos.is_empty() {
        list.set_text_content(Some("No videos yet."));
        return Ok(());
    }

    let table = document.create_element("table")?;
    table.set_class_name("data-table");
    let head = document.create_element("tr")?;
    for col in ["Title", "URL", ""] {
        let th = document.create_element("th")?;
        th.set_text_content(Some(col));
        head.append_child(&th)?;
    }
    table.append_child(&head)?;

    for video in videos {
        let row = document.create_element("tr")?;
        for text in [video.title.as_str(), video.video_url.as_str()] {
            let td = document.create_element("td")?;
            td.set_text_content(Some(text));
            row.append_child(&td)?;
        }
        let actions = document.create_element("td")?;
        if let Some(id) = video.id.clone() {
            let edit = document.create_element("button")?;
            edit.set_text_content(Some("Edit"));
            let record = video.clone();
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
                    match ApiClient::delete_video(&id).await {
                        Ok(()) => {
                            toast::success("Video deleted");
                            load_videos();
                        }
                        Err(e) => toast::error(&format!(
                            "Failed to delete video: {}",
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

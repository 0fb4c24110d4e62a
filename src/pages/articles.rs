//! Articles screen: list, create/update (with optional attachment) and
//! delete. Editing loads the record into the form; the next submit becomes
//! a PUT against the record's id.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, FormData, HtmlInputElement, MouseEvent};

use crate::dom_utils;
use crate::models::Article;
use crate::network::api_client::{describe_error, ApiClient};
use crate::toast;

pub fn build(document: &Document) -> Result<Element, JsValue> {
    let section = document.create_element("section")?;
    section.set_class_name("articles-page");

    let title = document.create_element("h2")?;
    title.set_text_content(Some("Articles"));
    section.append_child(&title)?;

    section.append_child(&build_form(document)?.into())?;

    let list = document.create_element("div")?;
    list.set_id("articles-list");
    list.set_text_content(Some("Loading…"));
    section.append_child(&list)?;

    load_articles();
    Ok(section)
}

fn build_form(document: &Document) -> Result<Element, JsValue> {
    let form = document.create_element("div")?;
    form.set_class_name("create-form");

    for (id, label) in [("article-title", "Title"), ("article-summary", "Summary")] {
        let l = document.create_element("label")?;
        l.set_text_content(Some(label));
        form.append_child(&l)?;
        let input = document.create_element("input")?;
        input.set_id(id);
        form.append_child(&input)?;
    }

    let content_label = document.create_element("label")?;
    content_label.set_text_content(Some("Content"));
    form.append_child(&content_label)?;
    let content = document.create_element("textarea")?;
    content.set_id("article-content");
    form.append_child(&content)?;

    let file_label = document.create_element("label")?;
    file_label.set_text_content(Some("Attachment (optional)"));
    form.append_child(&file_label)?;
    let file: HtmlInputElement = document
        .create_element("input")?
        .dyn_into()
        .map_err(|_| JsValue::from_str("not an input"))?;
    file.set_id("article-file");
    file.set_type("file");
    form.append_child(&file)?;

    let error = document.create_element("div")?;
    error.set_id("article-error");
    error.set_class_name("field-error");
    dom_utils::hide(&error);
    form.append_child(&error)?;

    // Holds the id of the article being edited; empty means a new one.
    let editing: HtmlInputElement = document
        .create_element("input")?
        .dyn_into()
        .map_err(|_| JsValue::from_str("not an input"))?;
    editing.set_id("article-editing-id");
    editing.set_type("hidden");
    form.append_child(&editing)?;

    let submit = document.create_element("button")?;
    submit.set_class_name("primary");
    submit.set_id("article-submit");
    submit.set_text_content(Some("Create Article"));
    let cb = Closure::wrap(Box::new(move |_e: MouseEvent| {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let title = dom_utils::input_value(&document, "article-title");
        if title.trim().is_empty() {
            dom_utils::set_field_error(&document, "article-error", Some("Title is required"));
            return;
        }
        dom_utils::set_field_error(&document, "article-error", None);

        let form = match FormData::new() {
            Ok(f) => f,
            Err(_) => return,
        };
        let _ = form.append_with_str("title", &title);
        let _ = form.append_with_str(
            "summary",
            &dom_utils::input_value(&document, "article-summary"),
        );
        let _ = form.append_with_str(
            "content",
            &dom_utils::textarea_value(&document, "article-content"),
        );
        if let Some(file) = document
            .get_element_by_id("article-file")
            .and_then(|e| e.dyn_into::<HtmlInputElement>().ok())
            .and_then(|i| i.files())
            .and_then(|files| files.get(0))
        {
            let _ = form.append_with_blob("file", &file);
        }

        let editing_id = dom_utils::input_value(&document, "article-editing-id");
        spawn_local(async move {
            let result = if editing_id.is_empty() {
                ApiClient::create_article(&form).await
            } else {
                ApiClient::update_article(&editing_id, &form).await
            };
            match result {
                Ok(_) => {
                    toast::success("Article saved");
                    reset_form();
                    load_articles();
                }
                Err(e) => toast::error(&format!("Failed to save article: {}", describe_error(&e))),
            }
        });
    }) as Box<dyn FnMut(_)>);
    submit.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
    cb.forget();
    form.append_child(&submit)?;

    Ok(form)
}

/// Load an existing article into the create form so the next submit updates
/// it in place.
pub fn begin_edit(document: &Document, article: &Article) {
    dom_utils::set_input_value(
        document,
        "article-editing-id",
        article.id.as_deref().unwrap_or(""),
    );
    dom_utils::set_input_value(document, "article-title", &article.title);
    dom_utils::set_input_value(document, "article-summary", &article.summary);
    dom_utils::set_textarea_value(document, "article-content", &article.content);
    if let Some(btn) = document.get_element_by_id("article-submit") {
        btn.set_text_content(Some("Update Article"));
    }
}

fn reset_form() {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    for id in ["article-editing-id", "article-title", "article-summary"] {
        dom_utils::set_input_value(&document, id, "");
    }
    dom_utils::set_textarea_value(&document, "article-content", "");
    if let Some(btn) = document.get_element_by_id("article-submit") {
        btn.set_text_content(Some("Create Article"));
    }
}

fn load_articles() {
    spawn_local(async {
        let outcome = ApiClient::get_articles().await.and_then(|body| {
            serde_json::from_str::<Vec<Article>>(&body)
                .map_err(|e| JsValue::from_str(&e.to_string()))
        });
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let Some(list) = document.get_element_by_id("articles-list") else {
            return;
        };
        match outcome {
            Ok(articles) => {
                if let Err(e) = render_list(&document, &list, &articles) {
                    web_sys::console::error_1(&format!("Failed to render articles: {:?}", e).into());
                }
            }
            Err(e) => list.set_text_content(Some(&format!(
                "Failed to load articles: {}",
                describe_error(&e)
            ))),
        }
    });
}

fn render_list(document: &Document, list: &Element, articles: &[Article]) -> Result<(), JsValue> {
    list.set_inner_html("");
    if articles.is_empty() {
        list.set_text_content(Some("No articles yet."));
        return Ok(());
    }

    let table = document.create_element("table")?;
    table.set_class_name("data-table");
    let head = document.create_element("tr")?;
    for col in ["Title", "Summary", ""] {
        let th = document.create_element("th")?;
        th.set_text_content(Some(col));
        head.append_child(&th)?;
    }
    table.append_child(&head)?;

    for article in articles {
        let row = document.create_element("tr")?;
        for text in [article.title.as_str(), article.summary.as_str()] {
            let td = document.create_element("td")?;
            td.set_text_content(Some(text));
            row.append_child(&td)?;
        }
        let actions = document.create_element("td")?;
        if let Some(id) = article.id.clone() {
            let edit = document.create_element("button")?;
            edit.set_text_content(Some("Edit"));
            let record = article.clone();
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
                    match ApiClient::delete_article(&id).await {
                        Ok(()) => {
                            toast::success("Article deleted");
                            load_articles();
                        }
                        Err(e) => toast::error(&format!(
                            "Failed to delete article: {}",
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

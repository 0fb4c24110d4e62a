//! Browser-only smoke tests for the DOM helpers.

#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;

use cms_admin_frontend::components::modal;
use cms_admin_frontend::dom_utils;
use cms_admin_frontend::models::{Article, Banner};
use cms_admin_frontend::pages;

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> web_sys::Document {
    web_sys::window().unwrap().document().unwrap()
}

#[wasm_bindgen_test]
fn modal_is_created_once_and_reused() {
    let document = document();
    let (first, _) = modal::ensure_modal(&document, "smoke-modal").unwrap();
    let (second, content) = modal::ensure_modal(&document, "smoke-modal").unwrap();
    assert_eq!(first, second);

    content.set_inner_html("<p>hi</p>");
    let (_, cleared) = modal::ensure_modal(&document, "smoke-modal").unwrap();
    assert_eq!(cleared.inner_html(), "");
}

#[wasm_bindgen_test]
fn field_errors_toggle_visibility() {
    let document = document();
    let holder = document.create_element("div").unwrap();
    holder.set_id("smoke-error");
    holder.set_class_name("field-error");
    document.body().unwrap().append_child(&holder).unwrap();

    dom_utils::set_field_error(&document, "smoke-error", Some("nope"));
    assert_eq!(holder.text_content().unwrap(), "nope");
    assert!(!holder.class_list().contains("hidden"));

    dom_utils::set_field_error(&document, "smoke-error", None);
    assert!(holder.class_list().contains("hidden"));
}

#[wasm_bindgen_test]
fn editing_an_article_loads_the_form_for_an_update() {
    let document = document();
    let page = pages::articles::build(&document).unwrap();
    document.body().unwrap().append_child(&page).unwrap();

    let article = Article {
        id: Some("a1".to_string()),
        title: "Launch notes".to_string(),
        summary: "Short".to_string(),
        content: "Long form".to_string(),
        file_url: String::new(),
    };
    pages::articles::begin_edit(&document, &article);

    assert_eq!(dom_utils::input_value(&document, "article-editing-id"), "a1");
    assert_eq!(
        dom_utils::input_value(&document, "article-title"),
        "Launch notes"
    );
    assert_eq!(
        dom_utils::textarea_value(&document, "article-content"),
        "Long form"
    );
    let submit = document.get_element_by_id("article-submit").unwrap();
    assert_eq!(submit.text_content().unwrap(), "Update Article");

    document.body().unwrap().remove_child(&page).unwrap();
}

#[wasm_bindgen_test]
fn editing_a_banner_loads_the_form_for_an_update() {
    let document = document();
    let page = pages::banners::build(&document).unwrap();
    document.body().unwrap().append_child(&page).unwrap();

    let banner = Banner {
        id: Some("b1".to_string()),
        title: "Spring sale".to_string(),
        image_url: "/uploads/spring.png".to_string(),
    };
    pages::banners::begin_edit(&document, &banner);

    assert_eq!(dom_utils::input_value(&document, "banner-editing-id"), "b1");
    assert_eq!(
        dom_utils::input_value(&document, "banner-title"),
        "Spring sale"
    );
    let submit = document.get_element_by_id("banner-submit").unwrap();
    assert_eq!(submit.text_content().unwrap(), "Update Banner");

    document.body().unwrap().remove_child(&page).unwrap();
}

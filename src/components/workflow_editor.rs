//! The workflow editor form: basic fields, node / connection / position tabs
//! and the live canvas preview underneath.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue, UnwrapThrowExt};
use web_sys::{
    Document, Element, Event, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement, MouseEvent,
};

use crate::components::{canvas_preview, connection_editor, node_editor, positions_editor};
use crate::constants::WORKFLOW_STATUS_OPTIONS;
use crate::dom_utils;
use crate::messages::Message;
use crate::state::{dispatch_global_message, EditorMode, EditorTab, WorkflowEditorState};

pub fn build(document: &Document, editor: &WorkflowEditorState) -> Result<Element, JsValue> {
    let section = document.create_element("section")?;
    section.set_class_name("workflow-editor");

    let header = document.create_element("div")?;
    header.set_class_name("editor-header");
    let title = document.create_element("h2")?;
    title.set_text_content(Some(if editor.workflow.id.is_some() {
        "Edit Workflow"
    } else {
        "New Workflow"
    }));
    header.append_child(&title)?;
    section.append_child(&header)?;

    section.append_child(&build_tab_bar(document, editor.active_tab)?.into())?;

    let body = match editor.active_tab {
        EditorTab::Basic => build_basic_tab(document, editor)?,
        EditorTab::Nodes => node_editor::build_node_table(document, editor)?,
        EditorTab::Connections => connection_editor::build(document, editor)?,
        EditorTab::Positions => positions_editor::build(document, editor)?,
    };
    section.append_child(&body)?;

    section.append_child(&canvas_preview::build(document)?.into())?;
    section.append_child(&build_footer(document, editor)?.into())?;

    // The node modal sits outside the form flow; it only shows in
    // `EditingNode` mode.
    if let EditorMode::EditingNode(node_id) = &editor.mode {
        node_editor::open_modal(document, editor, node_id)?;
    }

    Ok(section)
}

fn build_tab_bar(document: &Document, active: EditorTab) -> Result<Element, JsValue> {
    let bar = document.create_element("div")?;
    bar.set_class_name("tab-bar");
    let tabs = [
        (EditorTab::Basic, "Basic"),
        (EditorTab::Nodes, "Nodes"),
        (EditorTab::Connections, "Connections"),
        (EditorTab::Positions, "Positions"),
    ];
    for (tab, label) in tabs {
        let btn = document.create_element("button")?;
        if tab == active {
            dom_utils::set_active(&btn);
        } else {
            dom_utils::set_inactive(&btn);
        }
        btn.set_text_content(Some(label));
        let cb = Closure::wrap(Box::new(move |_e: MouseEvent| {
            dispatch_global_message(Message::SetEditorTab(tab));
        }) as Box<dyn FnMut(_)>);
        btn.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
        cb.forget();
        bar.append_child(&btn)?;
    }
    Ok(bar)
}

fn build_basic_tab(document: &Document, editor: &WorkflowEditorState) -> Result<Element, JsValue> {
    let panel = document.create_element("div")?;
    panel.set_class_name("tab-panel");

    // Name ---------------------------------------------------------------
    let name_label = document.create_element("label")?;
    name_label.set_text_content(Some("Name"));
    panel.append_child(&name_label)?;

    let name_input: HtmlInputElement = document.create_element("input")?.dyn_into().unwrap_throw();
    name_input.set_id("workflow-name");
    name_input.set_value(&editor.workflow.name);
    let cb = Closure::wrap(Box::new(move |e: Event| {
        if let Some(input) = e
            .target()
            .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
        {
            dispatch_global_message(Message::SetWorkflowName(input.value()));
        }
    }) as Box<dyn FnMut(_)>);
    name_input.add_event_listener_with_callback("input", cb.as_ref().unchecked_ref())?;
    cb.forget();
    panel.append_child(&name_input)?;

    let name_error = document.create_element("div")?;
    name_error.set_id("workflow-name-error");
    name_error.set_class_name("field-error");
    dom_utils::hide(&name_error);
    panel.append_child(&name_error)?;

    // Status --------------------------------------------------------------
    let status_label = document.create_element("label")?;
    status_label.set_text_content(Some("Status"));
    panel.append_child(&status_label)?;

    let status: HtmlSelectElement = document.create_element("select")?.dyn_into().unwrap_throw();
    status.set_id("workflow-status");
    for option in WORKFLOW_STATUS_OPTIONS {
        append_option(document, &status, option, option)?;
    }
    // Unknown stored values round-trip untouched: surface them as an extra
    // option instead of silently rewriting the field.
    if !WORKFLOW_STATUS_OPTIONS.contains(&editor.workflow.status.as_str()) {
        append_option(document, &status, &editor.workflow.status, &editor.workflow.status)?;
    }
    status.set_value(&editor.workflow.status);
    let cb = Closure::wrap(Box::new(move |e: Event| {
        if let Some(select) = e
            .target()
            .and_then(|t| t.dyn_into::<HtmlSelectElement>().ok())
        {
            dispatch_global_message(Message::SetWorkflowStatus(select.value()));
        }
    }) as Box<dyn FnMut(_)>);
    status.add_event_listener_with_callback("change", cb.as_ref().unchecked_ref())?;
    cb.forget();
    panel.append_child(&status)?;

    // Description ----------------------------------------------------------
    let desc_label = document.create_element("label")?;
    desc_label.set_text_content(Some("Description"));
    panel.append_child(&desc_label)?;

    let desc: HtmlTextAreaElement = document
        .create_element("textarea")?
        .dyn_into()
        .unwrap_throw();
    desc.set_id("workflow-description");
    desc.set_value(&editor.workflow.description);
    let cb = Closure::wrap(Box::new(move |e: Event| {
        if let Some(area) = e
            .target()
            .and_then(|t| t.dyn_into::<HtmlTextAreaElement>().ok())
        {
            dispatch_global_message(Message::SetWorkflowDescription(area.value()));
        }
    }) as Box<dyn FnMut(_)>);
    desc.add_event_listener_with_callback("input", cb.as_ref().unchecked_ref())?;
    cb.forget();
    panel.append_child(&desc)?;

    Ok(panel)
}

fn build_footer(document: &Document, editor: &WorkflowEditorState) -> Result<Element, JsValue> {
    let footer = document.create_element("div")?;
    footer.set_class_name("editor-footer");

    let save = document.create_element("button")?;
    save.set_class_name("primary");
    save.set_id("workflow-save");
    if editor.saving {
        save.set_text_content(Some("Saving…"));
        save.set_attribute("disabled", "disabled")?;
    } else {
        save.set_text_content(Some("Save"));
    }
    let cb = Closure::wrap(Box::new(move |_e: MouseEvent| {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        // Inline validation: an empty name never reaches the network.
        let name = dom_utils::input_value(&document, "workflow-name");
        if name.trim().is_empty() {
            dom_utils::set_field_error(
                &document,
                "workflow-name-error",
                Some("Name is required"),
            );
            return;
        }
        dom_utils::set_field_error(&document, "workflow-name-error", None);
        dispatch_global_message(Message::RequestWorkflowSave);
    }) as Box<dyn FnMut(_)>);
    save.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
    cb.forget();
    footer.append_child(&save)?;

    let cancel = document.create_element("button")?;
    cancel.set_text_content(Some("Cancel"));
    let cb = Closure::wrap(Box::new(move |_e: MouseEvent| {
        dispatch_global_message(Message::CloseEditor);
    }) as Box<dyn FnMut(_)>);
    cancel.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
    cb.forget();
    footer.append_child(&cancel)?;

    Ok(footer)
}

pub(crate) fn append_option(
    document: &Document,
    select: &HtmlSelectElement,
    value: &str,
    label: &str,
) -> Result<(), JsValue> {
    let option = document.create_element("option")?;
    option.set_attribute("value", value)?;
    option.set_text_content(Some(label));
    select.append_child(&option)?;
    Ok(())
}

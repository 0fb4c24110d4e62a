//! Node table plus the per-node modal editor.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue, UnwrapThrowExt};
use web_sys::{
    Document, Element, Event, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement, MouseEvent,
};

use crate::components::modal;
use crate::components::workflow_editor::append_option;
use crate::dom_utils;
use crate::messages::Message;
use crate::models::{NodeKind, WorkflowNode};
use crate::state::{dispatch_global_message, WorkflowEditorState};

pub fn build_node_table(
    document: &Document,
    editor: &WorkflowEditorState,
) -> Result<Element, JsValue> {
    let panel = document.create_element("div")?;
    panel.set_class_name("tab-panel");

    let add = document.create_element("button")?;
    add.set_class_name("primary");
    add.set_text_content(Some("Add Node"));
    let cb = Closure::wrap(Box::new(move |_e: MouseEvent| {
        dispatch_global_message(Message::AddNode);
    }) as Box<dyn FnMut(_)>);
    add.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
    cb.forget();
    panel.append_child(&add)?;

    if editor.workflow.nodes.is_empty() {
        let note = document.create_element("p")?;
        note.set_class_name("muted");
        note.set_text_content(Some("No nodes yet."));
        panel.append_child(&note)?;
        return Ok(panel);
    }

    let table = document.create_element("table")?;
    table.set_class_name("data-table");
    let head = document.create_element("tr")?;
    for col in ["Id", "Label", "Type", "Detail", ""] {
        let th = document.create_element("th")?;
        th.set_text_content(Some(col));
        head.append_child(&th)?;
    }
    table.append_child(&head)?;

    for (index, node) in editor.workflow.nodes.iter().enumerate() {
        let row = document.create_element("tr")?;
        for text in [
            node.id.as_str(),
            node.label.as_str(),
            node.kind.as_str(),
            node.detail.as_str(),
        ] {
            let td = document.create_element("td")?;
            td.set_text_content(Some(text));
            row.append_child(&td)?;
        }

        let actions = document.create_element("td")?;
        actions.set_class_name("row-actions");

        let edit = document.create_element("button")?;
        edit.set_text_content(Some("Edit"));
        let node_id = node.id.clone();
        let cb = Closure::wrap(Box::new(move |_e: MouseEvent| {
            dispatch_global_message(Message::OpenNodeEditor {
                node_id: node_id.clone(),
            });
        }) as Box<dyn FnMut(_)>);
        edit.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
        cb.forget();
        actions.append_child(&edit)?;

        let remove = document.create_element("button")?;
        remove.set_class_name("danger");
        remove.set_text_content(Some("Remove"));
        let cb = Closure::wrap(Box::new(move |_e: MouseEvent| {
            dispatch_global_message(Message::RemoveNode { index });
        }) as Box<dyn FnMut(_)>);
        remove.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
        cb.forget();
        actions.append_child(&remove)?;

        row.append_child(&actions)?;
        table.append_child(&row)?;
    }
    panel.append_child(&table)?;

    Ok(panel)
}

/// Build and show the modal for the node currently being edited.
pub fn open_modal(
    document: &Document,
    editor: &WorkflowEditorState,
    node_id: &str,
) -> Result<(), JsValue> {
    let Some(index) = editor.workflow.nodes.iter().position(|n| n.id == node_id) else {
        return Ok(());
    };
    let node = &editor.workflow.nodes[index];

    let (backdrop, content) = modal::ensure_modal(document, "node-editor-modal")?;

    let title = document.create_element("h3")?;
    title.set_text_content(Some("Edit Node"));
    content.append_child(&title)?;

    // Id -------------------------------------------------------------------
    content.append_child(&field_label(document, "Id")?.into())?;
    let id_input: HtmlInputElement = document.create_element("input")?.dyn_into().unwrap_throw();
    id_input.set_id("node-id-input");
    id_input.set_value(&node.id);
    content.append_child(&id_input)?;

    let id_warning = document.create_element("div")?;
    id_warning.set_id("node-id-warning");
    id_warning.set_class_name("field-error");
    dom_utils::hide(&id_warning);
    content.append_child(&id_warning)?;

    // Label ----------------------------------------------------------------
    content.append_child(&field_label(document, "Label")?.into())?;
    let label_input: HtmlInputElement = document.create_element("input")?.dyn_into().unwrap_throw();
    label_input.set_id("node-label-input");
    label_input.set_value(&node.label);
    content.append_child(&label_input)?;

    // Type -----------------------------------------------------------------
    content.append_child(&field_label(document, "Type")?.into())?;
    let kind_select: HtmlSelectElement =
        document.create_element("select")?.dyn_into().unwrap_throw();
    kind_select.set_id("node-type-select");
    append_option(document, &kind_select, "iconNode", "Icon")?;
    append_option(document, &kind_select, "backgroundImage", "Background image")?;
    kind_select.set_value(node.kind.as_str());
    content.append_child(&kind_select)?;

    // Detail ---------------------------------------------------------------
    content.append_child(&field_label(document, "Detail")?.into())?;
    let detail_input: HtmlTextAreaElement = document
        .create_element("textarea")?
        .dyn_into()
        .unwrap_throw();
    detail_input.set_id("node-detail-input");
    detail_input.set_value(&node.detail);
    content.append_child(&detail_input)?;

    // Selectable ------------------------------------------------------------
    let selectable_wrap = document.create_element("label")?;
    selectable_wrap.set_class_name("checkbox-label");
    let selectable: HtmlInputElement = document.create_element("input")?.dyn_into().unwrap_throw();
    selectable.set_id("node-selectable-input");
    selectable.set_type("checkbox");
    selectable.set_checked(node.selectable);
    selectable_wrap.append_child(&selectable)?;
    let selectable_text = document.create_element("span")?;
    selectable_text.set_text_content(Some("Selectable on the public site"));
    selectable_wrap.append_child(&selectable_text)?;
    content.append_child(&selectable_wrap)?;

    // Icon ------------------------------------------------------------------
    content.append_child(&field_label(document, "Icon")?.into())?;
    let icon_value: HtmlInputElement = document.create_element("input")?.dyn_into().unwrap_throw();
    icon_value.set_id("node-icon-value");
    icon_value.set_type("hidden");
    icon_value.set_value(&node.icon);
    content.append_child(&icon_value)?;

    let icon_note = document.create_element("div")?;
    icon_note.set_class_name("muted");
    if editor.uploading_icon_for.as_deref() == Some(node_id) {
        icon_note.set_text_content(Some("Uploading…"));
    } else if node.icon.is_empty() {
        icon_note.set_text_content(Some("No icon uploaded"));
    } else {
        icon_note.set_text_content(Some(&node.icon));
    }
    content.append_child(&icon_note)?;

    let icon_file: HtmlInputElement = document.create_element("input")?.dyn_into().unwrap_throw();
    icon_file.set_type("file");
    icon_file.set_attribute("accept", "image/*")?;
    let upload_node_id = node.id.clone();
    let cb = Closure::wrap(Box::new(move |e: Event| {
        let Some(input) = e
            .target()
            .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
        else {
            return;
        };
        if let Some(file) = input.files().and_then(|files| files.get(0)) {
            dispatch_global_message(Message::RequestIconUpload {
                node_id: upload_node_id.clone(),
                file,
            });
        }
    }) as Box<dyn FnMut(_)>);
    icon_file.add_event_listener_with_callback("change", cb.as_ref().unchecked_ref())?;
    cb.forget();
    content.append_child(&icon_file)?;

    // Field edits rebuild the whole node value and dispatch one message.
    for field_id in [
        "node-id-input",
        "node-label-input",
        "node-detail-input",
        "node-selectable-input",
    ] {
        attach_sync(document, field_id, "input", index)?;
    }
    attach_sync(document, "node-type-select", "change", index)?;

    // Footer -----------------------------------------------------------------
    let close = document.create_element("button")?;
    close.set_text_content(Some("Close"));
    let cb = Closure::wrap(Box::new(move |_e: MouseEvent| {
        dispatch_global_message(Message::CloseNodeEditor);
    }) as Box<dyn FnMut(_)>);
    close.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
    cb.forget();
    content.append_child(&close)?;

    modal::show(&backdrop);
    Ok(())
}

fn field_label(document: &Document, text: &str) -> Result<Element, JsValue> {
    let label = document.create_element("label")?;
    label.set_text_content(Some(text));
    Ok(label)
}

fn attach_sync(
    document: &Document,
    field_id: &str,
    event: &str,
    index: usize,
) -> Result<(), JsValue> {
    let Some(el) = document.get_element_by_id(field_id) else {
        return Ok(());
    };
    let cb = Closure::wrap(Box::new(move |_e: Event| {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let node = collect_node(&document);
        warn_on_duplicate_id(&document, index, &node.id);
        dispatch_global_message(Message::UpdateNode { index, node });
    }) as Box<dyn FnMut(_)>);
    el.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref())?;
    cb.forget();
    Ok(())
}

/// Rebuild the node value from the modal fields.
fn collect_node(document: &Document) -> WorkflowNode {
    let checked = document
        .get_element_by_id("node-selectable-input")
        .and_then(|e| e.dyn_into::<HtmlInputElement>().ok())
        .map(|i| i.checked())
        .unwrap_or(false);

    WorkflowNode {
        id: dom_utils::input_value(document, "node-id-input"),
        label: dom_utils::input_value(document, "node-label-input"),
        icon: dom_utils::input_value(document, "node-icon-value"),
        kind: NodeKind::from_value(&dom_utils::select_value(document, "node-type-select")),
        detail: dom_utils::textarea_value(document, "node-detail-input"),
        selectable: checked,
    }
}

/// Duplicate ids are tolerated (last one wins everywhere they are joined),
/// but the collision is surfaced inline.
fn warn_on_duplicate_id(document: &Document, index: usize, id: &str) {
    let duplicate = crate::state::APP_STATE.with(|state| {
        state
            .borrow()
            .editor
            .as_ref()
            .map(|e| {
                e.workflow
                    .nodes
                    .iter()
                    .enumerate()
                    .any(|(i, n)| i != index && n.id == id)
            })
            .unwrap_or(false)
    });
    dom_utils::set_field_error(
        document,
        "node-id-warning",
        duplicate.then_some("Another node already uses this id"),
    );
}

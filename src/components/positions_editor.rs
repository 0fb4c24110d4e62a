//! Manual position editing plus the one-click batch layouts.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue, UnwrapThrowExt};
use web_sys::{Document, Element, HtmlInputElement, MouseEvent};

use crate::dom_utils;
use crate::layout::LayoutKind;
use crate::messages::Message;
use crate::state::{dispatch_global_message, WorkflowEditorState};

pub fn build(document: &Document, editor: &WorkflowEditorState) -> Result<Element, JsValue> {
    let panel = document.create_element("div")?;
    panel.set_class_name("tab-panel");

    let layouts = document.create_element("div")?;
    layouts.set_class_name("layout-buttons");
    for (kind, label) in [
        (LayoutKind::Grid, "Grid layout"),
        (LayoutKind::Line, "Line layout"),
        (LayoutKind::Circle, "Circle layout"),
    ] {
        let btn = document.create_element("button")?;
        btn.set_text_content(Some(label));
        let cb = Closure::wrap(Box::new(move |_e: MouseEvent| {
            dispatch_global_message(Message::ApplyLayout(kind));
        }) as Box<dyn FnMut(_)>);
        btn.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
        cb.forget();
        layouts.append_child(&btn)?;
    }
    panel.append_child(&layouts)?;

    if editor.workflow.nodes.is_empty() {
        let note = document.create_element("p")?;
        note.set_class_name("muted");
        note.set_text_content(Some("Add nodes first."));
        panel.append_child(&note)?;
        return Ok(panel);
    }

    let table = document.create_element("table")?;
    table.set_class_name("data-table");
    let head = document.create_element("tr")?;
    for col in ["Node", "X", "Y", ""] {
        let th = document.create_element("th")?;
        th.set_text_content(Some(col));
        head.append_child(&th)?;
    }
    table.append_child(&head)?;

    for (index, node) in editor.workflow.nodes.iter().enumerate() {
        table.append_child(&build_row(document, editor, index, &node.id)?.into())?;
    }

    // Stored positions whose node id no longer exists: still removable so
    // the document can be cleaned up.
    let known: Vec<&String> = editor.workflow.nodes.iter().map(|n| &n.id).collect();
    for node_id in editor.workflow.node_positions.keys() {
        if !known.contains(&node_id) {
            table.append_child(&build_orphan_row(document, node_id)?.into())?;
        }
    }

    panel.append_child(&table)?;
    Ok(panel)
}

fn build_row(
    document: &Document,
    editor: &WorkflowEditorState,
    index: usize,
    node_id: &str,
) -> Result<Element, JsValue> {
    let row = document.create_element("tr")?;

    let name = document.create_element("td")?;
    name.set_text_content(Some(node_id));
    row.append_child(&name)?;

    let position = editor.workflow.node_positions.get(node_id);
    let x_id = format!("pos-{}-x", index);
    let y_id = format!("pos-{}-y", index);
    let error_id = format!("pos-{}-error", index);

    for (field_id, value) in [
        (&x_id, position.map(|p| p.x)),
        (&y_id, position.map(|p| p.y)),
    ] {
        let td = document.create_element("td")?;
        let input: HtmlInputElement = document.create_element("input")?.dyn_into().unwrap_throw();
        input.set_id(field_id);
        input.set_class_name("position-input");
        if let Some(v) = value {
            input.set_value(&v.to_string());
        }
        td.append_child(&input)?;
        row.append_child(&td)?;
    }

    let actions = document.create_element("td")?;
    actions.set_class_name("row-actions");

    let set = document.create_element("button")?;
    set.set_text_content(Some("Set"));
    let set_node_id = node_id.to_string();
    let cb = Closure::wrap(Box::new(move |_e: MouseEvent| {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let x_raw = dom_utils::input_value(&document, &format!("pos-{}-x", index));
        let y_raw = dom_utils::input_value(&document, &format!("pos-{}-y", index));
        // Non-numeric input never reaches the document model.
        match (parse_coordinate(&x_raw), parse_coordinate(&y_raw)) {
            (Some(x), Some(y)) => {
                dom_utils::set_field_error(&document, &format!("pos-{}-error", index), None);
                dispatch_global_message(Message::SetNodePosition {
                    node_id: set_node_id.clone(),
                    x,
                    y,
                });
            }
            _ => {
                dom_utils::set_field_error(
                    &document,
                    &format!("pos-{}-error", index),
                    Some("Both coordinates must be numbers"),
                );
            }
        }
    }) as Box<dyn FnMut(_)>);
    set.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
    cb.forget();
    actions.append_child(&set)?;

    if position.is_some() {
        let clear = document.create_element("button")?;
        clear.set_text_content(Some("Clear"));
        let clear_node_id = node_id.to_string();
        let cb = Closure::wrap(Box::new(move |_e: MouseEvent| {
            dispatch_global_message(Message::RemoveNodePosition {
                node_id: clear_node_id.clone(),
            });
        }) as Box<dyn FnMut(_)>);
        clear.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
        cb.forget();
        actions.append_child(&clear)?;
    }

    let error = document.create_element("div")?;
    error.set_id(&error_id);
    error.set_class_name("field-error");
    dom_utils::hide(&error);
    actions.append_child(&error)?;

    row.append_child(&actions)?;
    Ok(row)
}

fn build_orphan_row(document: &Document, node_id: &str) -> Result<Element, JsValue> {
    let row = document.create_element("tr")?;
    row.set_class_name("orphan-position");

    let name = document.create_element("td")?;
    name.set_text_content(Some(&format!("{} (no such node)", node_id)));
    row.append_child(&name)?;
    row.append_child(&document.create_element("td")?.into())?;
    row.append_child(&document.create_element("td")?.into())?;

    let actions = document.create_element("td")?;
    let clear = document.create_element("button")?;
    clear.set_class_name("danger");
    clear.set_text_content(Some("Clear"));
    let clear_node_id = node_id.to_string();
    let cb = Closure::wrap(Box::new(move |_e: MouseEvent| {
        dispatch_global_message(Message::RemoveNodePosition {
            node_id: clear_node_id.clone(),
        });
    }) as Box<dyn FnMut(_)>);
    clear.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
    cb.forget();
    actions.append_child(&clear)?;
    row.append_child(&actions)?;
    Ok(row)
}

fn parse_coordinate(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

//! Connection table: six selects per row, rebuilt from the live node-id
//! list and the fixed handle / style / type vocabularies.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue, UnwrapThrowExt};
use web_sys::{Document, Element, Event, HtmlSelectElement, MouseEvent};

use crate::components::workflow_editor::append_option;
use crate::dom_utils;
use crate::messages::Message;
use crate::models::{Connection, EdgeStyle, EdgeType, HandlePosition};
use crate::state::{dispatch_global_message, WorkflowEditorState};

pub fn build(document: &Document, editor: &WorkflowEditorState) -> Result<Element, JsValue> {
    let panel = document.create_element("div")?;
    panel.set_class_name("tab-panel");

    let add = document.create_element("button")?;
    add.set_class_name("primary");
    add.set_text_content(Some("Add Connection"));
    let cb = Closure::wrap(Box::new(move |_e: MouseEvent| {
        dispatch_global_message(Message::AddConnection);
    }) as Box<dyn FnMut(_)>);
    add.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
    cb.forget();
    panel.append_child(&add)?;

    if editor.workflow.connections.is_empty() {
        let note = document.create_element("p")?;
        note.set_class_name("muted");
        note.set_text_content(Some("No connections yet."));
        panel.append_child(&note)?;
        return Ok(panel);
    }

    let node_ids = editor.workflow.node_ids();
    let table = document.create_element("table")?;
    table.set_class_name("data-table");
    let head = document.create_element("tr")?;
    for col in ["From", "To", "Source handle", "Target handle", "Style", "Type", ""] {
        let th = document.create_element("th")?;
        th.set_text_content(Some(col));
        head.append_child(&th)?;
    }
    table.append_child(&head)?;

    for (index, connection) in editor.workflow.connections.iter().enumerate() {
        table.append_child(&build_row(document, index, connection, &node_ids)?.into())?;
    }
    panel.append_child(&table)?;

    Ok(panel)
}

fn build_row(
    document: &Document,
    index: usize,
    connection: &Connection,
    node_ids: &[String],
) -> Result<Element, JsValue> {
    let row = document.create_element("tr")?;

    // Endpoints may dangle (renamed or deleted nodes); the current value is
    // kept selectable so the row stays editable.
    row.append_child(&endpoint_cell(
        document,
        &endpoint_id(index, "from"),
        &connection.from,
        node_ids,
        index,
    )?.into())?;
    row.append_child(&endpoint_cell(
        document,
        &endpoint_id(index, "to"),
        &connection.to,
        node_ids,
        index,
    )?.into())?;

    row.append_child(&enum_cell(
        document,
        &endpoint_id(index, "source-handle"),
        connection.source_handle.as_str(),
        &HandlePosition::OPTIONS.map(|(v, l)| (v.as_str(), l)),
        index,
    )?.into())?;
    row.append_child(&enum_cell(
        document,
        &endpoint_id(index, "target-handle"),
        connection.target_handle.as_str(),
        &HandlePosition::OPTIONS.map(|(v, l)| (v.as_str(), l)),
        index,
    )?.into())?;
    row.append_child(&enum_cell(
        document,
        &endpoint_id(index, "style"),
        connection.edge_style.as_str(),
        &EdgeStyle::OPTIONS.map(|(v, l)| (v.as_str(), l)),
        index,
    )?.into())?;
    row.append_child(&enum_cell(
        document,
        &endpoint_id(index, "type"),
        connection.edge_type.as_str(),
        &EdgeType::OPTIONS.map(|(v, l)| (v.as_str(), l)),
        index,
    )?.into())?;

    let actions = document.create_element("td")?;
    actions.set_class_name("row-actions");
    let remove = document.create_element("button")?;
    remove.set_class_name("danger");
    remove.set_text_content(Some("Remove"));
    let cb = Closure::wrap(Box::new(move |_e: MouseEvent| {
        dispatch_global_message(Message::RemoveConnection { index });
    }) as Box<dyn FnMut(_)>);
    remove.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
    cb.forget();
    actions.append_child(&remove)?;
    row.append_child(&actions)?;

    Ok(row)
}

fn endpoint_id(index: usize, field: &str) -> String {
    format!("conn-{}-{}", index, field)
}

fn endpoint_cell(
    document: &Document,
    select_id: &str,
    current: &str,
    node_ids: &[String],
    index: usize,
) -> Result<Element, JsValue> {
    let td = document.create_element("td")?;
    let select: HtmlSelectElement = document.create_element("select")?.dyn_into().unwrap_throw();
    select.set_id(select_id);
    append_option(document, &select, "", "(none)")?;
    for id in node_ids {
        append_option(document, &select, id, id)?;
    }
    if !current.is_empty() && !node_ids.iter().any(|id| id == current) {
        append_option(document, &select, current, &format!("{} (missing)", current))?;
    }
    select.set_value(current);
    attach_sync(&select, index)?;
    td.append_child(&select)?;
    Ok(td)
}

fn enum_cell(
    document: &Document,
    select_id: &str,
    current: &str,
    options: &[(&str, &str)],
    index: usize,
) -> Result<Element, JsValue> {
    let td = document.create_element("td")?;
    let select: HtmlSelectElement = document.create_element("select")?.dyn_into().unwrap_throw();
    select.set_id(select_id);
    for (value, label) in options {
        append_option(document, &select, value, label)?;
    }
    select.set_value(current);
    attach_sync(&select, index)?;
    td.append_child(&select)?;
    Ok(td)
}

fn attach_sync(select: &HtmlSelectElement, index: usize) -> Result<(), JsValue> {
    let cb = Closure::wrap(Box::new(move |_e: Event| {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let connection = Connection {
            from: dom_utils::select_value(&document, &endpoint_id(index, "from")),
            to: dom_utils::select_value(&document, &endpoint_id(index, "to")),
            source_handle: HandlePosition::from_value(&dom_utils::select_value(
                &document,
                &endpoint_id(index, "source-handle"),
            )),
            target_handle: HandlePosition::from_value(&dom_utils::select_value(
                &document,
                &endpoint_id(index, "target-handle"),
            )),
            edge_style: EdgeStyle::from_value(&dom_utils::select_value(
                &document,
                &endpoint_id(index, "style"),
            )),
            edge_type: EdgeType::from_value(&dom_utils::select_value(
                &document,
                &endpoint_id(index, "type"),
            )),
        };
        dispatch_global_message(Message::UpdateConnection { index, connection });
    }) as Box<dyn FnMut(_)>);
    select.add_event_listener_with_callback("change", cb.as_ref().unchecked_ref())?;
    cb.forget();
    Ok(())
}

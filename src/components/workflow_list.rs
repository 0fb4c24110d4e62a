//! Workflow list table with open / delete actions.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, MouseEvent};

use crate::messages::Message;
use crate::models::Workflow;
use crate::state::dispatch_global_message;

pub fn build(document: &Document, workflows: &[Workflow], loading: bool) -> Result<Element, JsValue> {
    let section = document.create_element("section")?;
    section.set_class_name("workflow-list");

    let header = document.create_element("div")?;
    header.set_class_name("list-header");
    let title = document.create_element("h2")?;
    title.set_text_content(Some("Workflows"));
    header.append_child(&title)?;

    let create = document.create_element("button")?;
    create.set_class_name("primary");
    create.set_text_content(Some("New Workflow"));
    let cb = Closure::wrap(Box::new(move |_e: MouseEvent| {
        dispatch_global_message(Message::CreateWorkflow);
    }) as Box<dyn FnMut(_)>);
    create.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
    cb.forget();
    header.append_child(&create)?;
    section.append_child(&header)?;

    if loading {
        let note = document.create_element("p")?;
        note.set_class_name("muted");
        note.set_text_content(Some("Loading workflows…"));
        section.append_child(&note)?;
        return Ok(section);
    }

    if workflows.is_empty() {
        let note = document.create_element("p")?;
        note.set_class_name("muted");
        note.set_text_content(Some("No workflows yet."));
        section.append_child(&note)?;
        return Ok(section);
    }

    let table = document.create_element("table")?;
    table.set_class_name("data-table");
    let head = document.create_element("tr")?;
    for col in ["Name", "Status", "Nodes", ""] {
        let th = document.create_element("th")?;
        th.set_text_content(Some(col));
        head.append_child(&th)?;
    }
    table.append_child(&head)?;

    for workflow in workflows {
        table.append_child(&build_row(document, workflow)?.into())?;
    }
    section.append_child(&table)?;

    Ok(section)
}

fn build_row(document: &Document, workflow: &Workflow) -> Result<Element, JsValue> {
    let row = document.create_element("tr")?;

    let name = document.create_element("td")?;
    name.set_text_content(Some(&workflow.name));
    row.append_child(&name)?;

    let status = document.create_element("td")?;
    status.set_text_content(Some(&workflow.status));
    row.append_child(&status)?;

    let nodes = document.create_element("td")?;
    nodes.set_text_content(Some(&workflow.nodes.len().to_string()));
    row.append_child(&nodes)?;

    let actions = document.create_element("td")?;
    actions.set_class_name("row-actions");

    let edit = document.create_element("button")?;
    edit.set_text_content(Some("Edit"));
    let open_copy = workflow.clone();
    let cb = Closure::wrap(Box::new(move |_e: MouseEvent| {
        dispatch_global_message(Message::OpenWorkflow(open_copy.clone()));
    }) as Box<dyn FnMut(_)>);
    edit.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
    cb.forget();
    actions.append_child(&edit)?;

    if let Some(id) = workflow.id.clone() {
        let delete = document.create_element("button")?;
        delete.set_class_name("danger");
        delete.set_text_content(Some("Delete"));
        let name_copy = workflow.name.clone();
        let cb = Closure::wrap(Box::new(move |_e: MouseEvent| {
            let confirmed = web_sys::window()
                .and_then(|w| {
                    w.confirm_with_message(&format!("Delete workflow \"{}\"?", name_copy))
                        .ok()
                })
                .unwrap_or(false);
            if confirmed {
                dispatch_global_message(Message::RequestWorkflowDeletion {
                    workflow_id: id.clone(),
                });
            }
        }) as Box<dyn FnMut(_)>);
        delete.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
        cb.forget();
        actions.append_child(&delete)?;
    }

    row.append_child(&actions)?;
    Ok(row)
}

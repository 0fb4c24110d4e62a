//! Command executors for workflow persistence. Each spawns an async fetch
//! and feeds the outcome back into the dispatch loop as a `Message`.

use wasm_bindgen_futures::spawn_local;

use crate::messages::Message;
use crate::models::Workflow;
use crate::network::api_client::{describe_error, ApiClient};
use crate::state::dispatch_global_message;

pub fn fetch_workflows() {
    spawn_local(async move {
        match ApiClient::get_workflows().await {
            Ok(body) => match serde_json::from_str::<Vec<Workflow>>(&body) {
                Ok(list) => dispatch_global_message(Message::WorkflowsLoaded(list)),
                Err(e) => dispatch_global_message(Message::WorkflowsLoadFailed(format!(
                    "unexpected response: {}",
                    e
                ))),
            },
            Err(e) => {
                dispatch_global_message(Message::WorkflowsLoadFailed(describe_error(&e)))
            }
        }
    });
}

pub fn save_workflow(workflow: Workflow) {
    spawn_local(async move {
        let payload = match serde_json::to_string(&workflow.save_payload()) {
            Ok(p) => p,
            Err(e) => {
                dispatch_global_message(Message::WorkflowSaveFailed(e.to_string()));
                return;
            }
        };

        let result = match &workflow.id {
            Some(id) => ApiClient::update_workflow(id, &payload).await,
            None => ApiClient::create_workflow(&payload).await,
        };

        match result {
            Ok(body) => match serde_json::from_str::<Workflow>(&body) {
                Ok(saved) => dispatch_global_message(Message::WorkflowSaved(saved)),
                Err(e) => dispatch_global_message(Message::WorkflowSaveFailed(format!(
                    "unexpected response: {}",
                    e
                ))),
            },
            Err(e) => dispatch_global_message(Message::WorkflowSaveFailed(describe_error(&e))),
        }
    });
}

pub fn delete_workflow(workflow_id: String) {
    spawn_local(async move {
        match ApiClient::delete_workflow(&workflow_id).await {
            Ok(()) => dispatch_global_message(Message::WorkflowDeleted { workflow_id }),
            Err(e) => {
                dispatch_global_message(Message::WorkflowDeleteFailed(describe_error(&e)))
            }
        }
    });
}

pub fn upload_node_icon(node_id: String, file: web_sys::File) {
    spawn_local(async move {
        match ApiClient::upload_icon(&file).await {
            Ok(url) => dispatch_global_message(Message::NodeIconUploaded { node_id, url }),
            Err(e) => dispatch_global_message(Message::NodeIconUploadFailed {
                node_id,
                error: describe_error(&e),
            }),
        }
    });
}

//! Workflows page: the list, or the editor when one is open.

use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use crate::components::{workflow_editor, workflow_list};
use crate::state::APP_STATE;

pub fn build(document: &Document) -> Result<Element, JsValue> {
    // Snapshot what we need, then release the borrow: the editor component
    // re-enters the state to register its canvas element.
    let (editor, workflows, loading) = APP_STATE.with(|state| {
        let state = state.borrow();
        (
            state.editor.clone(),
            state.workflows.clone(),
            state.workflows_loading,
        )
    });

    match editor {
        Some(editor) => workflow_editor::build(document, &editor),
        None => workflow_list::build(document, &workflows, loading),
    }
}

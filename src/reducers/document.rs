//! Workflow document reducer: node/connection/position edits inside the
//! editor, including the cascading node delete.

use crate::layout;
use crate::messages::{Command, Message};
use crate::models::{Connection, WorkflowNode};
use crate::state::{AppState, EditorMode};
use crate::toast::ToastKind;

pub fn update(state: &mut AppState, msg: &Message, commands: &mut Vec<Command>) -> bool {
    let Some(editor) = state.editor.as_mut() else {
        // Document messages without an open editor are stale events from a
        // torn-down page; swallow them.
        return matches!(
            msg,
            Message::SetWorkflowName(_)
                | Message::SetWorkflowStatus(_)
                | Message::SetWorkflowDescription(_)
                | Message::SetEditorTab(_)
                | Message::AddNode
                | Message::UpdateNode { .. }
                | Message::RemoveNode { .. }
                | Message::OpenNodeEditor { .. }
                | Message::CloseNodeEditor
                | Message::RequestIconUpload { .. }
                | Message::NodeIconUploaded { .. }
                | Message::NodeIconUploadFailed { .. }
                | Message::AddConnection
                | Message::UpdateConnection { .. }
                | Message::RemoveConnection { .. }
                | Message::SetNodePosition { .. }
                | Message::RemoveNodePosition { .. }
                | Message::ApplyLayout(_)
        );
    };

    match msg {
        Message::SetWorkflowName(name) => {
            editor.workflow.name = name.clone();
            true
        }
        Message::SetWorkflowStatus(status) => {
            editor.workflow.status = status.clone();
            true
        }
        Message::SetWorkflowDescription(description) => {
            editor.workflow.description = description.clone();
            true
        }

        Message::SetEditorTab(tab) => {
            editor.active_tab = *tab;
            commands.push(Command::RenderPage);
            true
        }

        Message::AddNode => {
            let id = fresh_node_id(&editor.workflow.nodes);
            editor.workflow.nodes.push(WorkflowNode::new(id, String::new()));
            commands.push(Command::RenderPage);
            true
        }

        Message::UpdateNode { index, node } => {
            if let Some(slot) = editor.workflow.nodes.get_mut(*index) {
                // Renaming the node being edited keeps the modal attached to it.
                if editor.mode == EditorMode::EditingNode(slot.id.clone()) && slot.id != node.id {
                    editor.mode = EditorMode::EditingNode(node.id.clone());
                }
                *slot = node.clone();
                commands.push(Command::Repaint);
            }
            true
        }

        Message::RemoveNode { index } => {
            if let Some(removed_id) = editor.workflow.remove_node_at(*index) {
                if editor.mode == EditorMode::EditingNode(removed_id.clone()) {
                    editor.mode = EditorMode::Idle;
                }
                if editor.canvas.selected_node_id.as_deref() == Some(removed_id.as_str()) {
                    editor.canvas.selected_node_id = None;
                }
                commands.push(Command::RenderPage);
            }
            true
        }

        Message::OpenNodeEditor { node_id } => {
            if editor.workflow.find_node(node_id).is_some() {
                editor.mode = EditorMode::EditingNode(node_id.clone());
                commands.push(Command::RenderPage);
            }
            true
        }

        Message::CloseNodeEditor => {
            editor.mode = EditorMode::Idle;
            commands.push(Command::RenderPage);
            true
        }

        Message::RequestIconUpload { node_id, file } => {
            editor.uploading_icon_for = Some(node_id.clone());
            commands.push(Command::UploadIcon {
                node_id: node_id.clone(),
                file: file.clone(),
            });
            commands.push(Command::RenderPage);
            true
        }

        Message::NodeIconUploaded { node_id, url } => {
            if let Some(node) = editor
                .workflow
                .nodes
                .iter_mut()
                .find(|n| n.id == *node_id)
            {
                node.icon = url.clone();
            }
            if editor.uploading_icon_for.as_deref() == Some(node_id.as_str()) {
                editor.uploading_icon_for = None;
            }
            commands.push(Command::RenderPage);
            true
        }

        Message::NodeIconUploadFailed { node_id, error } => {
            if editor.uploading_icon_for.as_deref() == Some(node_id.as_str()) {
                editor.uploading_icon_for = None;
            }
            commands.push(Command::ShowToast {
                kind: ToastKind::Error,
                message: format!("Icon upload failed: {}", error),
            });
            commands.push(Command::RenderPage);
            true
        }

        Message::AddConnection => {
            let ids = editor.workflow.node_ids();
            editor
                .workflow
                .connections
                .push(Connection::with_endpoints(ids.first(), ids.get(1)));
            commands.push(Command::RenderPage);
            true
        }

        Message::UpdateConnection { index, connection } => {
            if let Some(slot) = editor.workflow.connections.get_mut(*index) {
                *slot = connection.clone();
                commands.push(Command::Repaint);
            }
            true
        }

        Message::RemoveConnection { index } => {
            if *index < editor.workflow.connections.len() {
                editor.workflow.connections.remove(*index);
                commands.push(Command::RenderPage);
            }
            true
        }

        Message::SetNodePosition { node_id, x, y } => {
            editor
                .workflow
                .node_positions
                .insert(node_id.clone(), crate::models::Position::new(*x, *y));
            commands.push(Command::RenderPage);
            true
        }

        Message::RemoveNodePosition { node_id } => {
            editor.workflow.node_positions.remove(node_id);
            commands.push(Command::RenderPage);
            true
        }

        Message::ApplyLayout(kind) => {
            // Whole-map replacement: nodes absent from the current list lose
            // their stored positions.
            editor.workflow.node_positions =
                layout::apply_layout(*kind, &editor.workflow.node_ids());
            commands.push(Command::RenderPage);
            true
        }

        _ => false,
    }
}

fn fresh_node_id(nodes: &[WorkflowNode]) -> String {
    let mut n = nodes.len() + 1;
    loop {
        let candidate = format!("node-{}", n);
        if !nodes.iter().any(|node| node.id == candidate) {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutKind;
    use crate::models::{Position, Workflow};
    use crate::state::WorkflowEditorState;

    fn editor_with_nodes(ids: &[&str]) -> AppState {
        let mut wf = Workflow::new();
        for id in ids {
            wf.nodes
                .push(WorkflowNode::new(id.to_string(), String::new()));
        }
        let mut state = AppState::new();
        state.editor = Some(WorkflowEditorState::for_workflow(wf));
        state
    }

    fn workflow(state: &AppState) -> &Workflow {
        &state.editor.as_ref().unwrap().workflow
    }

    #[test]
    fn remove_node_clears_editing_mode_and_selection() {
        let mut state = editor_with_nodes(&["a", "b"]);
        {
            let editor = state.editor.as_mut().unwrap();
            editor.mode = EditorMode::EditingNode("a".to_string());
            editor.canvas.selected_node_id = Some("a".to_string());
            editor.workflow.connections.push(Connection::with_endpoints(
                Some(&"a".to_string()),
                Some(&"b".to_string()),
            ));
            editor
                .workflow
                .node_positions
                .insert("a".to_string(), Position::new(1.0, 2.0));
        }

        let mut commands = Vec::new();
        update(&mut state, &Message::RemoveNode { index: 0 }, &mut commands);

        let editor = state.editor.as_ref().unwrap();
        assert_eq!(editor.mode, EditorMode::Idle);
        assert!(editor.canvas.selected_node_id.is_none());
        assert!(editor.workflow.connections.is_empty());
        assert!(!editor.workflow.node_positions.contains_key("a"));
    }

    #[test]
    fn remove_node_keeps_unrelated_state() {
        let mut state = editor_with_nodes(&["a", "b"]);
        {
            let editor = state.editor.as_mut().unwrap();
            editor.canvas.selected_node_id = Some("b".to_string());
            editor
                .workflow
                .node_positions
                .insert("b".to_string(), Position::new(9.0, 9.0));
        }
        let mut commands = Vec::new();
        update(&mut state, &Message::RemoveNode { index: 0 }, &mut commands);

        let editor = state.editor.as_ref().unwrap();
        assert_eq!(editor.canvas.selected_node_id.as_deref(), Some("b"));
        assert!(editor.workflow.node_positions.contains_key("b"));
    }

    #[test]
    fn apply_layout_replaces_the_whole_position_map() {
        let mut state = editor_with_nodes(&["a", "b"]);
        state
            .editor
            .as_mut()
            .unwrap()
            .workflow
            .node_positions
            .insert("ghost".to_string(), Position::new(500.0, 500.0));

        let mut commands = Vec::new();
        update(
            &mut state,
            &Message::ApplyLayout(LayoutKind::Line),
            &mut commands,
        );

        let positions = &workflow(&state).node_positions;
        assert_eq!(positions.len(), 2);
        assert!(!positions.contains_key("ghost"));
        assert_eq!(positions["a"], Position::new(20.0, 50.0));
        assert_eq!(positions["b"], Position::new(160.0, 50.0));
    }

    #[test]
    fn add_node_generates_an_unused_id() {
        let mut state = editor_with_nodes(&["node-1", "node-2"]);
        let mut commands = Vec::new();
        update(&mut state, &Message::AddNode, &mut commands);
        let wf = workflow(&state);
        assert_eq!(wf.nodes.len(), 3);
        assert_eq!(wf.nodes[2].id, "node-3");

        // A manual id squatting on the next candidate is skipped over.
        let mut state = editor_with_nodes(&["node-2"]);
        update(&mut state, &Message::AddNode, &mut Vec::new());
        assert_eq!(workflow(&state).nodes[1].id, "node-3");
    }

    #[test]
    fn open_node_editor_ignores_unknown_ids() {
        let mut state = editor_with_nodes(&["a"]);
        let mut commands = Vec::new();
        update(
            &mut state,
            &Message::OpenNodeEditor {
                node_id: "nope".to_string(),
            },
            &mut commands,
        );
        assert_eq!(state.editor.as_ref().unwrap().mode, EditorMode::Idle);
    }

    #[test]
    fn icon_upload_success_targets_the_node_by_id() {
        let mut state = editor_with_nodes(&["a", "b"]);
        state.editor.as_mut().unwrap().uploading_icon_for = Some("b".to_string());
        let mut commands = Vec::new();
        update(
            &mut state,
            &Message::NodeIconUploaded {
                node_id: "b".to_string(),
                url: "/uploads/x.png".to_string(),
            },
            &mut commands,
        );
        let editor = state.editor.as_ref().unwrap();
        assert_eq!(editor.workflow.nodes[1].icon, "/uploads/x.png");
        assert!(editor.workflow.nodes[0].icon.is_empty());
        assert!(editor.uploading_icon_for.is_none());
    }

    #[test]
    fn icon_upload_failure_leaves_the_icon_untouched() {
        let mut state = editor_with_nodes(&["a"]);
        {
            let editor = state.editor.as_mut().unwrap();
            editor.workflow.nodes[0].icon = "/old.png".to_string();
            editor.uploading_icon_for = Some("a".to_string());
        }
        let mut commands = Vec::new();
        update(
            &mut state,
            &Message::NodeIconUploadFailed {
                node_id: "a".to_string(),
                error: "413".to_string(),
            },
            &mut commands,
        );
        let editor = state.editor.as_ref().unwrap();
        assert_eq!(editor.workflow.nodes[0].icon, "/old.png");
        assert!(editor.uploading_icon_for.is_none());
    }
}

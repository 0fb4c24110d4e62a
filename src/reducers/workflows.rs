//! Workflow list and persistence reducer: load, open, create, save, delete.

use crate::messages::{Command, Message};
use crate::state::{AppState, WorkflowEditorState};
use crate::toast::ToastKind;

pub fn update(state: &mut AppState, msg: &Message, commands: &mut Vec<Command>) -> bool {
    match msg {
        Message::WorkflowsLoaded(list) => {
            state.workflows = list.clone();
            state.workflows_loading = false;
            commands.push(Command::RenderPage);
            true
        }

        Message::WorkflowsLoadFailed(error) => {
            state.workflows_loading = false;
            commands.push(Command::ShowToast {
                kind: ToastKind::Error,
                message: format!("Failed to load workflows: {}", error),
            });
            commands.push(Command::RenderPage);
            true
        }

        Message::OpenWorkflow(workflow) => {
            state.editor = Some(WorkflowEditorState::for_workflow(workflow.clone()));
            commands.push(Command::RenderPage);
            true
        }

        Message::CreateWorkflow => {
            state.editor = Some(WorkflowEditorState::for_workflow(
                crate::models::Workflow::new(),
            ));
            commands.push(Command::RenderPage);
            true
        }

        Message::CloseEditor => {
            state.editor = None;
            commands.push(Command::RenderPage);
            true
        }

        Message::RequestWorkflowDeletion { workflow_id } => {
            commands.push(Command::DeleteWorkflow {
                workflow_id: workflow_id.clone(),
            });
            true
        }

        Message::WorkflowDeleted { workflow_id } => {
            state
                .workflows
                .retain(|w| w.id.as_deref() != Some(workflow_id.as_str()));
            commands.push(Command::ShowToast {
                kind: ToastKind::Success,
                message: "Workflow deleted".to_string(),
            });
            commands.push(Command::RenderPage);
            true
        }

        Message::WorkflowDeleteFailed(error) => {
            commands.push(Command::ShowToast {
                kind: ToastKind::Error,
                message: format!("Failed to delete workflow: {}", error),
            });
            true
        }

        Message::RequestWorkflowSave => {
            let Some(editor) = state.editor.as_mut() else {
                return true;
            };
            // The form validates inline before dispatching; this guard keeps
            // an empty name from ever reaching the network.
            if editor.workflow.name.trim().is_empty() || editor.saving {
                return true;
            }
            editor.saving = true;
            commands.push(Command::SaveWorkflow(editor.workflow.clone()));
            commands.push(Command::RenderPage);
            true
        }

        Message::WorkflowSaved(saved) => {
            if let Some(editor) = state.editor.as_mut() {
                editor.saving = false;
            }
            match state
                .workflows
                .iter_mut()
                .find(|w| w.id.is_some() && w.id == saved.id)
            {
                Some(existing) => *existing = saved.clone(),
                None => state.workflows.push(saved.clone()),
            }
            state.editor = None;
            commands.push(Command::ShowToast {
                kind: ToastKind::Success,
                message: "Workflow saved".to_string(),
            });
            commands.push(Command::RenderPage);
            true
        }

        Message::WorkflowSaveFailed(error) => {
            if let Some(editor) = state.editor.as_mut() {
                editor.saving = false;
            }
            commands.push(Command::ShowToast {
                kind: ToastKind::Error,
                message: format!("Failed to save workflow: {}", error),
            });
            commands.push(Command::RenderPage);
            true
        }

        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Workflow;

    fn editor_state(name: &str) -> AppState {
        let mut state = AppState::new();
        let mut wf = Workflow::new();
        wf.name = name.to_string();
        state.editor = Some(WorkflowEditorState::for_workflow(wf));
        state
    }

    #[test]
    fn save_is_refused_for_an_empty_name() {
        let mut state = editor_state("   ");
        let mut commands = Vec::new();
        update(&mut state, &Message::RequestWorkflowSave, &mut commands);
        assert!(!state.editor.as_ref().unwrap().saving);
        assert!(!commands
            .iter()
            .any(|c| matches!(c, Command::SaveWorkflow(_))));
    }

    #[test]
    fn save_in_flight_is_not_reissued() {
        let mut state = editor_state("Pipeline");
        let mut commands = Vec::new();
        update(&mut state, &Message::RequestWorkflowSave, &mut commands);
        assert!(state.editor.as_ref().unwrap().saving);
        assert_eq!(
            commands
                .iter()
                .filter(|c| matches!(c, Command::SaveWorkflow(_)))
                .count(),
            1
        );

        let mut again = Vec::new();
        update(&mut state, &Message::RequestWorkflowSave, &mut again);
        assert!(!again.iter().any(|c| matches!(c, Command::SaveWorkflow(_))));
    }

    #[test]
    fn successful_save_replaces_the_cached_copy_and_closes_the_editor() {
        let mut state = editor_state("Pipeline");
        let mut stale = Workflow::new();
        stale.id = Some("w1".to_string());
        stale.name = "Old name".to_string();
        state.workflows.push(stale);

        let mut saved = Workflow::new();
        saved.id = Some("w1".to_string());
        saved.name = "New name".to_string();

        let mut commands = Vec::new();
        update(&mut state, &Message::WorkflowSaved(saved), &mut commands);
        assert!(state.editor.is_none());
        assert_eq!(state.workflows.len(), 1);
        assert_eq!(state.workflows[0].name, "New name");
    }

    #[test]
    fn failed_save_leaves_the_editor_open() {
        let mut state = editor_state("Pipeline");
        state.editor.as_mut().unwrap().saving = true;
        let mut commands = Vec::new();
        update(
            &mut state,
            &Message::WorkflowSaveFailed("500".to_string()),
            &mut commands,
        );
        let editor = state.editor.as_ref().unwrap();
        assert!(!editor.saving);
        assert_eq!(editor.workflow.name, "Pipeline");
    }

    #[test]
    fn delete_removes_only_the_matching_workflow() {
        let mut state = AppState::new();
        for id in ["w1", "w2"] {
            let mut wf = Workflow::new();
            wf.id = Some(id.to_string());
            state.workflows.push(wf);
        }
        let mut commands = Vec::new();
        update(
            &mut state,
            &Message::WorkflowDeleted {
                workflow_id: "w1".to_string(),
            },
            &mut commands,
        );
        assert_eq!(state.workflows.len(), 1);
        assert_eq!(state.workflows[0].id.as_deref(), Some("w2"));
    }
}

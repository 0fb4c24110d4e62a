//! End-to-end reducer flow: a whole editing session driven through
//! `AppState::dispatch`, no DOM involved.

use cms_admin_frontend::messages::{Command, Message};
use cms_admin_frontend::models::Position;
use cms_admin_frontend::session::Session;
use cms_admin_frontend::state::{AppState, EditorMode, Page};

fn logged_in() -> AppState {
    let mut state = AppState::new();
    state.session = Session::with_token("tok".to_string());
    state
}

#[test]
fn create_edit_drag_and_save() {
    let mut state = logged_in();
    state.dispatch(Message::NavigateTo(Page::Workflows));
    state.dispatch(Message::CreateWorkflow);

    state.dispatch(Message::SetWorkflowName("Onboarding".to_string()));
    for _ in 0..4 {
        state.dispatch(Message::AddNode);
    }
    state.dispatch(Message::ApplyLayout(
        cms_admin_frontend::layout::LayoutKind::Grid,
    ));

    {
        let editor = state.editor.as_ref().expect("editor open");
        assert_eq!(editor.workflow.nodes.len(), 4);
        assert_eq!(editor.workflow.node_positions.len(), 4);
        assert_eq!(
            editor.workflow.node_positions["node-1"],
            Position::new(20.0, 20.0)
        );
    }

    // Drag the first node: press inside its box, move, release far away.
    state.dispatch(Message::CanvasPressed { x: 30.0, y: 30.0 });
    state.dispatch(Message::CanvasMoved { x: 300.0, y: 200.0 });
    state.dispatch(Message::CanvasReleased { x: 300.0, y: 200.0 });

    {
        let editor = state.editor.as_ref().expect("editor open");
        assert_eq!(
            editor.workflow.node_positions["node-1"],
            Position::new(240.0, 180.0)
        );
        // A long drag is not a click, so no modal opened.
        assert_eq!(editor.mode, EditorMode::Idle);
    }

    let commands = state.dispatch(Message::RequestWorkflowSave);
    assert!(commands
        .iter()
        .any(|c| matches!(c, Command::SaveWorkflow(w) if w.name == "Onboarding")));
    assert!(state.editor.as_ref().expect("editor open").saving);
}

#[test]
fn short_press_opens_the_node_editor_and_delete_cascades() {
    let mut state = logged_in();
    state.dispatch(Message::NavigateTo(Page::Workflows));
    state.dispatch(Message::CreateWorkflow);
    state.dispatch(Message::AddNode);
    state.dispatch(Message::AddNode);
    state.dispatch(Message::AddConnection);
    state.dispatch(Message::ApplyLayout(
        cms_admin_frontend::layout::LayoutKind::Line,
    ));

    // Click node-1 (at 20,50 after the line layout).
    state.dispatch(Message::CanvasPressed { x: 25.0, y: 55.0 });
    let commands = state.dispatch(Message::CanvasReleased { x: 25.0, y: 55.0 });
    let chained: Vec<&Message> = commands
        .iter()
        .filter_map(|c| match c {
            Command::SendMessage(m) => Some(m),
            _ => None,
        })
        .collect();
    assert!(matches!(
        chained.as_slice(),
        [Message::OpenNodeEditor { node_id }] if node_id == "node-1"
    ));
    state.dispatch(Message::OpenNodeEditor {
        node_id: "node-1".to_string(),
    });
    assert_eq!(
        state.editor.as_ref().expect("editor open").mode,
        EditorMode::EditingNode("node-1".to_string())
    );

    // Deleting the node clears the modal, the connection and the position.
    state.dispatch(Message::RemoveNode { index: 0 });
    let editor = state.editor.as_ref().expect("editor open");
    assert_eq!(editor.mode, EditorMode::Idle);
    assert!(editor.workflow.connections.is_empty());
    assert!(!editor.workflow.node_positions.contains_key("node-1"));
    assert!(editor.workflow.node_positions.contains_key("node-2"));
}

#[test]
fn logout_from_the_editor_drops_everything() {
    let mut state = logged_in();
    state.dispatch(Message::NavigateTo(Page::Workflows));
    state.dispatch(Message::CreateWorkflow);
    state.dispatch(Message::AddNode);

    let commands = state.dispatch(Message::Logout);
    assert!(state.editor.is_none());
    assert!(!state.session.is_authenticated());
    assert!(commands.iter().any(|c| matches!(c, Command::ClearToken)));
}

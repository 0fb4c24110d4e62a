//! Canvas interaction reducer: pan, zoom, node selection and dragging.
//! Coordinates arrive in screen space; everything stored on the document is
//! in document space via the inverse view transform.

use crate::constants::{
    CLICK_DISTANCE_SQ, DEFAULT_ZOOM, NODE_HEIGHT, NODE_WIDTH, ZOOM_MAX, ZOOM_MIN, ZOOM_STEP,
};
use crate::messages::{Command, Message};
use crate::models::Position;
use crate::state::{AppState, DragState};

pub fn update(state: &mut AppState, msg: &Message, commands: &mut Vec<Command>) -> bool {
    let Some(editor) = state.editor.as_mut() else {
        return matches!(
            msg,
            Message::CanvasPressed { .. }
                | Message::CanvasMoved { .. }
                | Message::CanvasReleased { .. }
                | Message::ZoomIn
                | Message::ZoomOut
                | Message::ResetView
        );
    };

    match msg {
        Message::CanvasPressed { x, y } => {
            let (dx, dy) = editor.canvas.screen_to_document(*x, *y);
            match hit_test(&editor.workflow, dx, dy) {
                Some(node_id) => {
                    editor.canvas.selected_node_id = Some(node_id.clone());
                    editor.canvas.drag = DragState::DraggingNode {
                        node_id,
                        press_x: *x,
                        press_y: *y,
                        moved_sq: 0.0,
                    };
                }
                None => {
                    editor.canvas.selected_node_id = None;
                    editor.canvas.drag = DragState::Panning {
                        last_x: *x,
                        last_y: *y,
                    };
                }
            }
            commands.push(Command::Repaint);
            true
        }

        Message::CanvasMoved { x, y } => {
            match editor.canvas.drag.clone() {
                DragState::Panning { last_x, last_y } => {
                    editor.canvas.pan_x += *x - last_x;
                    editor.canvas.pan_y += *y - last_y;
                    editor.canvas.drag = DragState::Panning {
                        last_x: *x,
                        last_y: *y,
                    };
                    commands.push(Command::Repaint);
                }
                DragState::DraggingNode {
                    node_id,
                    press_x,
                    press_y,
                    moved_sq,
                } => {
                    let travel = (*x - press_x) * (*x - press_x) + (*y - press_y) * (*y - press_y);
                    let (dx, dy) = editor.canvas.screen_to_document(*x, *y);
                    // Center the node box under the cursor, snapped to whole
                    // document pixels.
                    editor.workflow.node_positions.insert(
                        node_id.clone(),
                        Position::new(
                            (dx - NODE_WIDTH / 2.0).round(),
                            (dy - NODE_HEIGHT / 2.0).round(),
                        ),
                    );
                    editor.canvas.drag = DragState::DraggingNode {
                        node_id,
                        press_x,
                        press_y,
                        moved_sq: moved_sq.max(travel),
                    };
                    commands.push(Command::Repaint);
                }
                DragState::Idle => {}
            }
            true
        }

        Message::CanvasReleased { .. } => {
            if let DragState::DraggingNode {
                node_id, moved_sq, ..
            } = &editor.canvas.drag
            {
                // A press that barely moved is a click: open the node editor.
                if *moved_sq < CLICK_DISTANCE_SQ {
                    commands.push(Command::SendMessage(Message::OpenNodeEditor {
                        node_id: node_id.clone(),
                    }));
                }
            }
            editor.canvas.drag = DragState::Idle;
            commands.push(Command::Repaint);
            true
        }

        Message::ZoomIn => {
            editor.canvas.zoom = (editor.canvas.zoom * ZOOM_STEP).clamp(ZOOM_MIN, ZOOM_MAX);
            push_view_commands(commands);
            true
        }

        Message::ZoomOut => {
            editor.canvas.zoom = (editor.canvas.zoom / ZOOM_STEP).clamp(ZOOM_MIN, ZOOM_MAX);
            push_view_commands(commands);
            true
        }

        Message::ResetView => {
            editor.canvas.zoom = DEFAULT_ZOOM;
            editor.canvas.pan_x = 0.0;
            editor.canvas.pan_y = 0.0;
            push_view_commands(commands);
            true
        }

        _ => false,
    }
}

fn push_view_commands(commands: &mut Vec<Command>) {
    commands.push(Command::Repaint);
    commands.push(Command::UpdateUI(Box::new(
        crate::components::canvas_preview::update_zoom_label,
    )));
}

/// Topmost node under a document-space point. Nodes are drawn in vector
/// order, so the last hit wins; a node without a stored position sits at the
/// origin, same as the renderer draws it.
fn hit_test(workflow: &crate::models::Workflow, dx: f64, dy: f64) -> Option<String> {
    workflow.nodes.iter().rev().find_map(|node| {
        let pos = workflow
            .node_positions
            .get(&node.id)
            .copied()
            .unwrap_or(Position::new(0.0, 0.0));
        let hit = dx >= pos.x && dx <= pos.x + NODE_WIDTH && dy >= pos.y && dy <= pos.y + NODE_HEIGHT;
        hit.then(|| node.id.clone())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Workflow, WorkflowNode};
    use crate::state::WorkflowEditorState;

    fn editor_state() -> AppState {
        let mut wf = Workflow::new();
        wf.nodes
            .push(WorkflowNode::new("a".to_string(), String::new()));
        wf.node_positions
            .insert("a".to_string(), Position::new(100.0, 100.0));
        let mut state = AppState::new();
        state.editor = Some(WorkflowEditorState::for_workflow(wf));
        state
    }

    fn canvas(state: &AppState) -> &crate::state::CanvasState {
        &state.editor.as_ref().unwrap().canvas
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn two_zoom_steps_multiply_and_clamp_holds() {
        let mut state = editor_state();
        update(&mut state, &Message::ZoomIn, &mut Vec::new());
        update(&mut state, &Message::ZoomIn, &mut Vec::new());
        assert!(approx(canvas(&state).zoom, 1.44));

        for _ in 0..20 {
            update(&mut state, &Message::ZoomIn, &mut Vec::new());
        }
        assert!(approx(canvas(&state).zoom, 3.0));

        for _ in 0..40 {
            update(&mut state, &Message::ZoomOut, &mut Vec::new());
        }
        assert!(approx(canvas(&state).zoom, 0.3));
    }

    #[test]
    fn reset_view_restores_defaults_only() {
        let mut state = editor_state();
        update(
            &mut state,
            &Message::CanvasPressed { x: 500.0, y: 500.0 },
            &mut Vec::new(),
        );
        update(
            &mut state,
            &Message::CanvasMoved { x: 530.0, y: 470.0 },
            &mut Vec::new(),
        );
        update(&mut state, &Message::ZoomIn, &mut Vec::new());
        update(&mut state, &Message::ResetView, &mut Vec::new());

        let c = canvas(&state);
        assert!(approx(c.zoom, 1.0));
        assert!(approx(c.pan_x, 0.0));
        assert!(approx(c.pan_y, 0.0));
        // The node's stored position is untouched by view changes.
        assert_eq!(
            state.editor.as_ref().unwrap().workflow.node_positions["a"],
            Position::new(100.0, 100.0)
        );
    }

    #[test]
    fn press_on_empty_canvas_pans_without_touching_positions() {
        let mut state = editor_state();
        update(
            &mut state,
            &Message::CanvasPressed { x: 600.0, y: 600.0 },
            &mut Vec::new(),
        );
        assert!(matches!(canvas(&state).drag, DragState::Panning { .. }));
        assert!(canvas(&state).selected_node_id.is_none());

        update(
            &mut state,
            &Message::CanvasMoved { x: 610.0, y: 590.0 },
            &mut Vec::new(),
        );
        let c = canvas(&state);
        assert!(approx(c.pan_x, 10.0));
        assert!(approx(c.pan_y, -10.0));
        assert_eq!(
            state.editor.as_ref().unwrap().workflow.node_positions["a"],
            Position::new(100.0, 100.0)
        );
    }

    #[test]
    fn press_on_a_node_selects_and_drag_centers_it_under_the_cursor() {
        let mut state = editor_state();
        update(
            &mut state,
            &Message::CanvasPressed { x: 110.0, y: 110.0 },
            &mut Vec::new(),
        );
        assert_eq!(canvas(&state).selected_node_id.as_deref(), Some("a"));
        assert!(matches!(
            canvas(&state).drag,
            DragState::DraggingNode { .. }
        ));

        update(
            &mut state,
            &Message::CanvasMoved { x: 200.0, y: 150.0 },
            &mut Vec::new(),
        );
        let c = canvas(&state);
        // Pan unchanged by a node drag.
        assert!(approx(c.pan_x, 0.0) && approx(c.pan_y, 0.0));
        assert_eq!(
            state.editor.as_ref().unwrap().workflow.node_positions["a"],
            Position::new(200.0 - 60.0, 150.0 - 20.0)
        );
    }

    #[test]
    fn drag_respects_the_view_transform() {
        let mut state = editor_state();
        {
            let c = &mut state.editor.as_mut().unwrap().canvas;
            c.zoom = 2.0;
            c.pan_x = 50.0;
            c.pan_y = 10.0;
        }
        // Screen (250, 210) → document (100, 100): inside the node.
        update(
            &mut state,
            &Message::CanvasPressed { x: 250.0, y: 210.0 },
            &mut Vec::new(),
        );
        assert!(matches!(
            canvas(&state).drag,
            DragState::DraggingNode { .. }
        ));

        update(
            &mut state,
            &Message::CanvasMoved { x: 290.0, y: 250.0 },
            &mut Vec::new(),
        );
        // Document cursor (120, 120) minus half the 120x40 box.
        assert_eq!(
            state.editor.as_ref().unwrap().workflow.node_positions["a"],
            Position::new(60.0, 100.0)
        );
    }

    #[test]
    fn short_press_opens_the_node_editor_long_drag_does_not() {
        let mut state = editor_state();
        update(
            &mut state,
            &Message::CanvasPressed { x: 110.0, y: 110.0 },
            &mut Vec::new(),
        );
        update(
            &mut state,
            &Message::CanvasMoved { x: 112.0, y: 111.0 },
            &mut Vec::new(),
        );
        let mut commands = Vec::new();
        update(
            &mut state,
            &Message::CanvasReleased { x: 112.0, y: 111.0 },
            &mut commands,
        );
        assert!(commands.iter().any(|c| matches!(
            c,
            Command::SendMessage(Message::OpenNodeEditor { node_id }) if node_id == "a"
        )));

        // Now a real drag: far past the click threshold.
        update(
            &mut state,
            &Message::CanvasPressed { x: 110.0, y: 110.0 },
            &mut Vec::new(),
        );
        update(
            &mut state,
            &Message::CanvasMoved { x: 180.0, y: 180.0 },
            &mut Vec::new(),
        );
        let mut commands = Vec::new();
        update(
            &mut state,
            &Message::CanvasReleased { x: 180.0, y: 180.0 },
            &mut commands,
        );
        assert!(!commands
            .iter()
            .any(|c| matches!(c, Command::SendMessage(_))));
        assert_eq!(canvas(&state).drag, DragState::Idle);
    }

    #[test]
    fn node_without_a_position_is_hit_at_the_origin() {
        let mut state = editor_state();
        state
            .editor
            .as_mut()
            .unwrap()
            .workflow
            .node_positions
            .clear();
        update(
            &mut state,
            &Message::CanvasPressed { x: 5.0, y: 5.0 },
            &mut Vec::new(),
        );
        assert_eq!(canvas(&state).selected_node_id.as_deref(), Some("a"));
    }
}

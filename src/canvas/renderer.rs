//! 2-D canvas renderer for the workflow preview. Connections draw first so
//! node boxes sit on top; both layers share one pan/zoom transform.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::shapes;
use crate::constants::*;
use crate::models::{Connection, EdgeStyle, NodeKind, Position, Workflow, WorkflowNode};
use crate::state::{CanvasState, WorkflowEditorState};
use crate::utils::truncate_graphemes;

pub fn draw(editor: &WorkflowEditorState) -> Result<(), JsValue> {
    let Some(canvas) = &editor.canvas.canvas else {
        return Ok(());
    };
    let context = context_of(canvas)?;

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;

    context.save();
    let _ = context.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
    context.set_fill_style_str(CANVAS_BACKGROUND_COLOR);
    context.fill_rect(0.0, 0.0, width, height);

    // View transform: translate by the pan, then scale. Its inverse is
    // (screen - pan) / zoom, which the interaction layer relies on.
    let _ = context.translate(editor.canvas.pan_x, editor.canvas.pan_y);
    let _ = context.scale(editor.canvas.zoom, editor.canvas.zoom);

    for connection in &editor.workflow.connections {
        draw_connection(&context, &editor.workflow, connection)?;
    }
    for node in &editor.workflow.nodes {
        draw_node(&context, &editor.workflow, &editor.canvas, node);
    }

    context.restore();
    Ok(())
}

fn context_of(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
    canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| JsValue::from_str("unexpected context type"))
}

fn node_position(workflow: &Workflow, node_id: &str) -> Position {
    workflow
        .node_positions
        .get(node_id)
        .copied()
        .unwrap_or(Position::new(0.0, 0.0))
}

/// Connection anchor: a third of the way across the box, vertically centered.
fn anchor(pos: Position) -> (f64, f64) {
    (pos.x + NODE_WIDTH / 3.0, pos.y + NODE_HEIGHT / 2.0)
}

fn draw_connection(
    context: &CanvasRenderingContext2d,
    workflow: &Workflow,
    connection: &Connection,
) -> Result<(), JsValue> {
    // A dangling endpoint renders nothing; the document stays editable.
    if workflow.find_node(&connection.from).is_none()
        || workflow.find_node(&connection.to).is_none()
    {
        return Ok(());
    }

    let (sx, sy) = anchor(node_position(workflow, &connection.from));
    let (tx, ty) = anchor(node_position(workflow, &connection.to));

    let (color, width, dash): (&str, f64, &[f64]) = match connection.edge_style {
        EdgeStyle::Unset | EdgeStyle::Default => (ARROWHEAD_COLOR, 1.5, &[]),
        EdgeStyle::RedDashed => ("#dc2626", 1.5, &[6.0, 4.0]),
        EdgeStyle::RedSolid => ("#dc2626", 1.5, &[]),
        EdgeStyle::GrayDashed => (ARROWHEAD_COLOR, 1.5, &[6.0, 4.0]),
        EdgeStyle::BlueBold => ("#2563eb", 3.0, &[]),
    };

    let dash_array = js_sys::Array::new();
    for step in dash {
        dash_array.push(&JsValue::from_f64(*step));
    }

    context.save();
    context.begin_path();
    context.set_stroke_style_str(color);
    context.set_line_width(width);
    context.set_line_dash(&dash_array)?;
    context.move_to(sx, sy);
    context.line_to(tx, ty);
    context.stroke();
    context.restore();

    shapes::draw_arrowhead(context, tx, ty, tx - sx, ty - sy, color);
    Ok(())
}

fn draw_node(
    context: &CanvasRenderingContext2d,
    workflow: &Workflow,
    canvas: &CanvasState,
    node: &WorkflowNode,
) {
    let pos = node_position(workflow, &node.id);
    let selected = canvas.selected_node_id.as_deref() == Some(node.id.as_str());

    context.set_fill_style_str(match node.kind {
        NodeKind::IconNode => NODE_FILL_COLOR,
        NodeKind::BackgroundImage => NODE_FILL_BACKGROUND_IMAGE,
    });
    context.fill_rect(pos.x, pos.y, NODE_WIDTH, NODE_HEIGHT);

    if selected {
        context.set_stroke_style_str(NODE_SELECTED_BORDER_COLOR);
        context.set_line_width(2.0);
    } else {
        context.set_stroke_style_str(NODE_BORDER_COLOR);
        context.set_line_width(1.0);
    }
    context.stroke_rect(pos.x, pos.y, NODE_WIDTH, NODE_HEIGHT);

    context.set_text_align("center");
    context.set_fill_style_str(NODE_LABEL_COLOR);
    context.set_font("12px sans-serif");
    let _ = context.fill_text(
        node.display_label(),
        pos.x + NODE_WIDTH / 2.0,
        pos.y + 17.0,
    );

    if !node.detail.is_empty() {
        context.set_fill_style_str(NODE_DETAIL_COLOR);
        context.set_font("10px sans-serif");
        let detail = truncate_graphemes(&node.detail, NODE_DETAIL_MAX_GRAPHEMES);
        let _ = context.fill_text(&detail, pos.x + NODE_WIDTH / 2.0, pos.y + 31.0);
    }
}

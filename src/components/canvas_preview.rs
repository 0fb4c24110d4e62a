//! Interactive workflow preview: a `<canvas>` with pan/zoom controls wired
//! into the dispatch loop. The actual painting lives in `canvas::renderer`.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlCanvasElement, MouseEvent};

use crate::canvas::renderer;
use crate::messages::Message;
use crate::state::{dispatch_global_message, APP_STATE};

const CANVAS_WIDTH: u32 = 800;
const CANVAS_HEIGHT: u32 = 500;

pub fn build(document: &Document) -> Result<Element, JsValue> {
    let wrapper = document.create_element("div")?;
    wrapper.set_class_name("canvas-preview");

    let toolbar = document.create_element("div")?;
    toolbar.set_class_name("canvas-toolbar");

    add_button(document, &toolbar, "−", Message::ZoomOut)?;
    let label = document.create_element("span")?;
    label.set_id("zoom-label");
    label.set_class_name("zoom-label");
    toolbar.append_child(&label)?;
    add_button(document, &toolbar, "+", Message::ZoomIn)?;
    add_button(document, &toolbar, "Reset View", Message::ResetView)?;
    wrapper.append_child(&toolbar)?;

    let canvas: HtmlCanvasElement = document
        .create_element("canvas")?
        .dyn_into()
        .map_err(|_| JsValue::from_str("not a canvas element"))?;
    canvas.set_id("workflow-canvas");
    canvas.set_width(CANVAS_WIDTH);
    canvas.set_height(CANVAS_HEIGHT);
    attach_mouse_listeners(&canvas)?;
    wrapper.append_child(&canvas)?;

    // Hand the element to the canvas state so repaints can reach it, then
    // paint the first frame.
    APP_STATE.with(|state| {
        if let Some(editor) = state.borrow_mut().editor.as_mut() {
            editor.canvas.canvas = Some(canvas.clone());
        }
    });
    update_zoom_label();
    repaint()?;

    Ok(wrapper)
}

fn add_button(
    document: &Document,
    toolbar: &Element,
    label: &str,
    msg: Message,
) -> Result<(), JsValue> {
    let btn = document.create_element("button")?;
    btn.set_class_name("canvas-button");
    btn.set_text_content(Some(label));
    let cb = Closure::wrap(Box::new(move |_e: MouseEvent| {
        dispatch_global_message(msg.clone());
    }) as Box<dyn FnMut(_)>);
    btn.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
    cb.forget();
    toolbar.append_child(&btn)?;
    Ok(())
}

fn attach_mouse_listeners(canvas: &HtmlCanvasElement) -> Result<(), JsValue> {
    let down = Closure::wrap(Box::new(move |e: MouseEvent| {
        dispatch_global_message(Message::CanvasPressed {
            x: e.offset_x() as f64,
            y: e.offset_y() as f64,
        });
    }) as Box<dyn FnMut(_)>);
    canvas.add_event_listener_with_callback("mousedown", down.as_ref().unchecked_ref())?;
    down.forget();

    let moved = Closure::wrap(Box::new(move |e: MouseEvent| {
        dispatch_global_message(Message::CanvasMoved {
            x: e.offset_x() as f64,
            y: e.offset_y() as f64,
        });
    }) as Box<dyn FnMut(_)>);
    canvas.add_event_listener_with_callback("mousemove", moved.as_ref().unchecked_ref())?;
    moved.forget();

    let up = Closure::wrap(Box::new(move |e: MouseEvent| {
        dispatch_global_message(Message::CanvasReleased {
            x: e.offset_x() as f64,
            y: e.offset_y() as f64,
        });
    }) as Box<dyn FnMut(_)>);
    canvas.add_event_listener_with_callback("mouseup", up.as_ref().unchecked_ref())?;
    // Releasing outside the canvas must still end the drag.
    canvas.add_event_listener_with_callback("mouseleave", up.as_ref().unchecked_ref())?;
    up.forget();

    Ok(())
}

/// Redraw the preview from the current state. Cheap enough to run on every
/// mousemove during a drag.
pub fn repaint() -> Result<(), JsValue> {
    APP_STATE.with(|state| {
        let state = state.borrow();
        match &state.editor {
            Some(editor) => renderer::draw(editor),
            None => Ok(()),
        }
    })
}

pub fn update_zoom_label() {
    let percent = APP_STATE.with(|state| {
        state
            .borrow()
            .editor
            .as_ref()
            .map(|e| e.canvas.zoom_percent())
    });
    let (Some(percent), Some(document)) =
        (percent, web_sys::window().and_then(|w| w.document()))
    else {
        return;
    };
    if let Some(label) = document.get_element_by_id("zoom-label") {
        label.set_text_content(Some(&format!("{}%", percent)));
    }
}

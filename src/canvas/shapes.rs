//! Primitive drawing helpers shared by the renderer.

use web_sys::CanvasRenderingContext2d;

/// Filled triangular arrowhead at `(x, y)` pointing along `(dir_x, dir_y)`.
/// The direction does not need to be normalized.
pub fn draw_arrowhead(
    context: &CanvasRenderingContext2d,
    x: f64,
    y: f64,
    dir_x: f64,
    dir_y: f64,
    color: &str,
) {
    let len = (dir_x * dir_x + dir_y * dir_y).sqrt();
    if len == 0.0 {
        return;
    }
    let (ux, uy) = (dir_x / len, dir_y / len);
    let size = 8.0;

    // Two back corners, perpendicular to the direction.
    let bx = x - ux * size;
    let by = y - uy * size;
    let (px, py) = (-uy, ux);

    context.begin_path();
    context.move_to(x, y);
    context.line_to(bx + px * size * 0.5, by + py * size * 0.5);
    context.line_to(bx - px * size * 0.5, by - py * size * 0.5);
    context.close_path();
    context.set_fill_style_str(color);
    context.fill();
}

// Single source of truth for editor defaults and canvas geometry.

// Node box as drawn on the preview canvas
pub const NODE_WIDTH: f64 = 120.0;
pub const NODE_HEIGHT: f64 = 40.0;

// Zoom behaviour (discrete steps, hard clamp)
pub const ZOOM_MIN: f64 = 0.3;
pub const ZOOM_MAX: f64 = 3.0;
pub const ZOOM_STEP: f64 = 1.2;
pub const DEFAULT_ZOOM: f64 = 1.0;

// Batch layout geometry
pub const GRID_CELL_WIDTH: f64 = 120.0;
pub const GRID_CELL_HEIGHT: f64 = 100.0;
pub const GRID_MARGIN: f64 = 20.0;
pub const LINE_SPACING: f64 = 140.0;
pub const LINE_Y: f64 = 50.0;
pub const CIRCLE_CENTER_X: f64 = 200.0;
pub const CIRCLE_CENTER_Y: f64 = 150.0;
pub const CIRCLE_RADIUS: f64 = 120.0;
pub const CIRCLE_OFFSET_X: f64 = -40.0;
pub const CIRCLE_OFFSET_Y: f64 = -20.0;

// A press that travels less than this (squared px) counts as a click.
pub const CLICK_DISTANCE_SQ: f64 = 25.0;

// Canvas colors
pub const CANVAS_BACKGROUND_COLOR: &str = "#f8fafc";
pub const NODE_FILL_COLOR: &str = "#ffffff";
pub const NODE_FILL_BACKGROUND_IMAGE: &str = "#eef2ff";
pub const NODE_BORDER_COLOR: &str = "#cbd5e1";
pub const NODE_SELECTED_BORDER_COLOR: &str = "#3b82f6";
pub const NODE_LABEL_COLOR: &str = "#1e293b";
pub const NODE_DETAIL_COLOR: &str = "#64748b";
pub const ARROWHEAD_COLOR: &str = "#94a3b8";

// Detail text shown inside a node box is truncated to this many graphemes.
pub const NODE_DETAIL_MAX_GRAPHEMES: usize = 20;

// Session token key used by the browser token store
pub const TOKEN_STORAGE_KEY: &str = "token";

// Workflow status options offered in the editor (field stays free text)
pub const WORKFLOW_STATUS_OPTIONS: [&str; 3] = ["Verified", "Researching", "Out of Scope"];
pub const DEFAULT_WORKFLOW_STATUS: &str = "Verified";

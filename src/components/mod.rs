pub mod canvas_preview;
pub mod connection_editor;
pub mod modal;
pub mod navbar;
pub mod node_editor;
pub mod positions_editor;
pub mod workflow_editor;
pub mod workflow_list;

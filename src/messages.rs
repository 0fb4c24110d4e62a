//! The events that can occur in the UI (`Message`) and the side effects the
//! reducers request in response (`Command`). Reducers never touch the DOM or
//! the network directly; everything observable travels as a `Command`.

use web_sys::File;

use crate::layout::LayoutKind;
use crate::models::{Connection, Workflow, WorkflowNode};
use crate::state::{EditorTab, Page};
use crate::toast::ToastKind;

#[derive(Debug, Clone)]
pub enum Message {
    // Navigation / session
    NavigateTo(Page),
    LoggedIn { token: String },
    Logout,
    SessionExpired,

    // Workflow list
    WorkflowsLoaded(Vec<Workflow>),
    WorkflowsLoadFailed(String),
    OpenWorkflow(Workflow),
    CreateWorkflow,
    RequestWorkflowDeletion { workflow_id: String },
    WorkflowDeleted { workflow_id: String },
    WorkflowDeleteFailed(String),

    // Editor document fields
    SetWorkflowName(String),
    SetWorkflowStatus(String),
    SetWorkflowDescription(String),
    SetEditorTab(EditorTab),

    // Nodes
    AddNode,
    UpdateNode { index: usize, node: WorkflowNode },
    RemoveNode { index: usize },
    OpenNodeEditor { node_id: String },
    CloseNodeEditor,

    // Node icon upload
    RequestIconUpload { node_id: String, file: File },
    NodeIconUploaded { node_id: String, url: String },
    NodeIconUploadFailed { node_id: String, error: String },

    // Connections
    AddConnection,
    UpdateConnection { index: usize, connection: Connection },
    RemoveConnection { index: usize },

    // Positions
    SetNodePosition { node_id: String, x: f64, y: f64 },
    RemoveNodePosition { node_id: String },
    ApplyLayout(LayoutKind),

    // Canvas interaction (screen-space coordinates)
    CanvasPressed { x: f64, y: f64 },
    CanvasMoved { x: f64, y: f64 },
    CanvasReleased { x: f64, y: f64 },
    ZoomIn,
    ZoomOut,
    ResetView,

    // Persistence
    RequestWorkflowSave,
    WorkflowSaved(Workflow),
    WorkflowSaveFailed(String),
    CloseEditor,
}

/// Side effects requested by the reducers, executed by `state.rs` after the
/// state borrow has been released.
pub enum Command {
    /// Chain another message through the dispatch loop.
    SendMessage(Message),

    /// Arbitrary UI work that must run outside the state borrow.
    UpdateUI(Box<dyn FnOnce() + 'static>),

    FetchWorkflows,
    SaveWorkflow(Workflow),
    DeleteWorkflow { workflow_id: String },
    UploadIcon { node_id: String, file: File },

    PersistToken(String),
    ClearToken,

    ShowToast { kind: ToastKind, message: String },

    /// Rebuild the DOM for the active page.
    RenderPage,
    /// Redraw only the canvas preview (drag/pan/zoom hot path).
    Repaint,
}

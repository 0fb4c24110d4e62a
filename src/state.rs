//! Global application state and the dispatch loop. State mutation happens
//! inside `AppState::dispatch` (pure, testable); the commands it returns are
//! executed afterwards, once the `RefCell` borrow has been released.

use std::cell::RefCell;

use web_sys::HtmlCanvasElement;

use crate::constants::DEFAULT_ZOOM;
use crate::messages::{Command, Message};
use crate::models::Workflow;
use crate::session::{BrowserTokenStore, Session, TokenStore};
use crate::update;

/// Top-level screens. Unauthenticated sessions always render `Login`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Login,
    Home,
    Articles,
    Videos,
    Banners,
    HomeContent,
    Workflows,
}

/// Tabs inside the workflow editor form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorTab {
    Basic,
    Nodes,
    Connections,
    Positions,
}

/// Whether a node editor modal is open, and for which node. Selection on the
/// canvas is a separate concern and never implies an open modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMode {
    Idle,
    EditingNode(String),
}

/// Mouse interaction in progress on the preview canvas. Panning and node
/// dragging are mutually exclusive by construction.
#[derive(Debug, Clone, PartialEq)]
pub enum DragState {
    Idle,
    Panning {
        last_x: f64,
        last_y: f64,
    },
    DraggingNode {
        node_id: String,
        press_x: f64,
        press_y: f64,
        moved_sq: f64,
    },
}

#[derive(Clone)]
pub struct CanvasState {
    pub zoom: f64,
    pub pan_x: f64,
    pub pan_y: f64,
    pub selected_node_id: Option<String>,
    pub drag: DragState,
    pub canvas: Option<HtmlCanvasElement>,
}

impl CanvasState {
    pub fn new() -> Self {
        Self {
            zoom: DEFAULT_ZOOM,
            pan_x: 0.0,
            pan_y: 0.0,
            selected_node_id: None,
            drag: DragState::Idle,
            canvas: None,
        }
    }

    /// Inverse of the render transform: screen point → document point.
    pub fn screen_to_document(&self, sx: f64, sy: f64) -> (f64, f64) {
        ((sx - self.pan_x) / self.zoom, (sy - self.pan_y) / self.zoom)
    }

    pub fn zoom_percent(&self) -> i32 {
        (self.zoom * 100.0).round() as i32
    }
}

#[derive(Clone)]
pub struct WorkflowEditorState {
    pub workflow: Workflow,
    pub mode: EditorMode,
    pub active_tab: EditorTab,
    pub canvas: CanvasState,
    pub saving: bool,
    /// Node id with an icon upload in flight (no concurrency guard — the
    /// last response wins).
    pub uploading_icon_for: Option<String>,
}

impl WorkflowEditorState {
    pub fn for_workflow(workflow: Workflow) -> Self {
        Self {
            workflow,
            mode: EditorMode::Idle,
            active_tab: EditorTab::Basic,
            canvas: CanvasState::new(),
            saving: false,
            uploading_icon_for: None,
        }
    }
}

pub struct AppState {
    pub session: Session,
    pub active_page: Page,
    pub workflows: Vec<Workflow>,
    pub workflows_loading: bool,
    pub editor: Option<WorkflowEditorState>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            session: Session::anonymous(),
            active_page: Page::Login,
            workflows: Vec::new(),
            workflows_loading: false,
            editor: None,
        }
    }

    pub fn dispatch(&mut self, msg: Message) -> Vec<Command> {
        update::update(self, msg)
    }
}

thread_local! {
    pub static APP_STATE: RefCell<AppState> = RefCell::new(AppState::new());
}

/// Dispatch a message into the global state, then execute the commands the
/// reducers produced. Safe to call from event closures: the mutable borrow
/// ends before any side effect runs.
pub fn dispatch_global_message(msg: Message) {
    let commands = APP_STATE.with(|state| state.borrow_mut().dispatch(msg));
    execute_commands(commands);
}

fn execute_commands(commands: Vec<Command>) {
    for command in commands {
        match command {
            Command::SendMessage(msg) => dispatch_global_message(msg),
            Command::UpdateUI(f) => f(),
            Command::FetchWorkflows => crate::network::workflows::fetch_workflows(),
            Command::SaveWorkflow(workflow) => crate::network::workflows::save_workflow(workflow),
            Command::DeleteWorkflow { workflow_id } => {
                crate::network::workflows::delete_workflow(workflow_id)
            }
            Command::UploadIcon { node_id, file } => {
                crate::network::workflows::upload_node_icon(node_id, file)
            }
            Command::PersistToken(token) => BrowserTokenStore.save(&token),
            Command::ClearToken => BrowserTokenStore.clear(),
            Command::ShowToast { kind, message } => crate::toast::show(&message, kind),
            Command::RenderPage => {
                if let Err(e) = crate::views::render_active_page() {
                    web_sys::console::error_1(
                        &format!("Failed to render page: {:?}", e).into(),
                    );
                }
            }
            Command::Repaint => {
                if let Err(e) = crate::components::canvas_preview::repaint() {
                    web_sys::console::error_1(
                        &format!("Failed to repaint canvas: {:?}", e).into(),
                    );
                }
            }
        }
    }
}

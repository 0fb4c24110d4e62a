use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::constants::DEFAULT_WORKFLOW_STATUS;

/// Visual role of a workflow node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    #[serde(rename = "iconNode")]
    IconNode,
    #[serde(rename = "backgroundImage")]
    BackgroundImage,
}

impl Default for NodeKind {
    fn default() -> Self {
        NodeKind::IconNode
    }
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::IconNode => "iconNode",
            NodeKind::BackgroundImage => "backgroundImage",
        }
    }

    pub fn from_value(value: &str) -> Self {
        match value {
            "backgroundImage" => NodeKind::BackgroundImage,
            _ => NodeKind::IconNode,
        }
    }
}

/// A vertex in the workflow diagram. `id` is the join key for connections and
/// positions; `label` falls back to `id` for display.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorkflowNode {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub icon: String,
    #[serde(rename = "type", default)]
    pub kind: NodeKind,
    #[serde(default)]
    pub detail: String,
    #[serde(default)]
    pub selectable: bool,
}

impl WorkflowNode {
    pub fn new(id: String, label: String) -> Self {
        Self {
            id,
            label,
            icon: String::new(),
            kind: NodeKind::IconNode,
            detail: String::new(),
            selectable: false,
        }
    }

    /// Display string shown on the canvas and in tables.
    pub fn display_label(&self) -> &str {
        if self.label.is_empty() {
            &self.id
        } else {
            &self.label
        }
    }
}

/// Side of a node a connection visually attaches to. `Auto` ("" on the wire)
/// leaves the choice to the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandlePosition {
    #[serde(rename = "")]
    Auto,
    #[serde(rename = "left")]
    Left,
    #[serde(rename = "right")]
    Right,
    #[serde(rename = "top")]
    Top,
    #[serde(rename = "bottom")]
    Bottom,
}

impl Default for HandlePosition {
    fn default() -> Self {
        HandlePosition::Auto
    }
}

impl HandlePosition {
    pub const OPTIONS: [(HandlePosition, &'static str); 5] = [
        (HandlePosition::Auto, "Auto"),
        (HandlePosition::Left, "Left"),
        (HandlePosition::Right, "Right"),
        (HandlePosition::Top, "Top"),
        (HandlePosition::Bottom, "Bottom"),
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HandlePosition::Auto => "",
            HandlePosition::Left => "left",
            HandlePosition::Right => "right",
            HandlePosition::Top => "top",
            HandlePosition::Bottom => "bottom",
        }
    }

    pub fn from_value(value: &str) -> Self {
        match value {
            "left" => HandlePosition::Left,
            "right" => HandlePosition::Right,
            "top" => HandlePosition::Top,
            "bottom" => HandlePosition::Bottom,
            _ => HandlePosition::Auto,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeStyle {
    #[serde(rename = "")]
    Unset,
    #[serde(rename = "default")]
    Default,
    #[serde(rename = "redDashed")]
    RedDashed,
    #[serde(rename = "redSolid")]
    RedSolid,
    #[serde(rename = "grayDashed")]
    GrayDashed,
    #[serde(rename = "blueBold")]
    BlueBold,
}

impl Default for EdgeStyle {
    fn default() -> Self {
        EdgeStyle::Unset
    }
}

impl EdgeStyle {
    pub const OPTIONS: [(EdgeStyle, &'static str); 6] = [
        (EdgeStyle::Unset, "(auto)"),
        (EdgeStyle::Default, "Default"),
        (EdgeStyle::RedDashed, "Red Dashed"),
        (EdgeStyle::RedSolid, "Red Solid"),
        (EdgeStyle::GrayDashed, "Gray Dashed"),
        (EdgeStyle::BlueBold, "Blue Bold"),
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeStyle::Unset => "",
            EdgeStyle::Default => "default",
            EdgeStyle::RedDashed => "redDashed",
            EdgeStyle::RedSolid => "redSolid",
            EdgeStyle::GrayDashed => "grayDashed",
            EdgeStyle::BlueBold => "blueBold",
        }
    }

    pub fn from_value(value: &str) -> Self {
        match value {
            "default" => EdgeStyle::Default,
            "redDashed" => EdgeStyle::RedDashed,
            "redSolid" => EdgeStyle::RedSolid,
            "grayDashed" => EdgeStyle::GrayDashed,
            "blueBold" => EdgeStyle::BlueBold,
            _ => EdgeStyle::Unset,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeType {
    #[serde(rename = "")]
    Unset,
    #[serde(rename = "step")]
    Step,
    #[serde(rename = "default")]
    Curve,
    #[serde(rename = "customPolyline")]
    CustomPolyline,
}

impl Default for EdgeType {
    fn default() -> Self {
        EdgeType::Unset
    }
}

impl EdgeType {
    pub const OPTIONS: [(EdgeType, &'static str); 4] = [
        (EdgeType::Unset, "(auto)"),
        (EdgeType::Step, "Step"),
        (EdgeType::Curve, "Curve"),
        (EdgeType::CustomPolyline, "Custom Polyline"),
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeType::Unset => "",
            EdgeType::Step => "step",
            EdgeType::Curve => "default",
            EdgeType::CustomPolyline => "customPolyline",
        }
    }

    pub fn from_value(value: &str) -> Self {
        match value {
            "step" => EdgeType::Step,
            "default" => EdgeType::Curve,
            "customPolyline" => EdgeType::CustomPolyline,
            _ => EdgeType::Unset,
        }
    }
}

/// Directed edge between two node ids with rendering metadata. `from`/`to`
/// may transiently be empty (or dangle after a rename) — the renderer treats
/// that as "draw nothing", never as an error.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub to: String,
    #[serde(rename = "sourceHandle", default)]
    pub source_handle: HandlePosition,
    #[serde(rename = "targetHandle", default)]
    pub target_handle: HandlePosition,
    #[serde(rename = "edgeStyle", default)]
    pub edge_style: EdgeStyle,
    #[serde(rename = "edgeType", default)]
    pub edge_type: EdgeType,
}

impl Connection {
    /// A fresh connection pre-wired to the first two known node ids.
    pub fn with_endpoints(from: Option<&String>, to: Option<&String>) -> Self {
        Self {
            from: from.cloned().unwrap_or_default(),
            to: to.cloned().unwrap_or_default(),
            source_handle: HandlePosition::Auto,
            target_handle: HandlePosition::Auto,
            edge_style: EdgeStyle::Default,
            edge_type: EdgeType::Curve,
        }
    }

    pub fn references(&self, node_id: &str) -> bool {
        self.from == node_id || self.to == node_id
    }
}

/// 2-D canvas coordinate assigned to a node.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Entries failing this check are dropped from the save payload.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// The persisted unit: nodes, connections, and node positions describing one
/// visual process diagram. `id` is `None` until the backend assigns one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Workflow {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub nodes: Vec<WorkflowNode>,
    #[serde(default)]
    pub connections: Vec<Connection>,
    #[serde(rename = "nodePositions", default)]
    pub node_positions: HashMap<String, Position>,
}

/// Request body for POST/PUT `/workflow` — the document minus its identity.
#[derive(Debug, Serialize)]
pub struct WorkflowPayload {
    pub name: String,
    pub status: String,
    pub description: String,
    pub nodes: Vec<WorkflowNode>,
    pub connections: Vec<Connection>,
    #[serde(rename = "nodePositions")]
    pub node_positions: HashMap<String, Position>,
}

impl Workflow {
    pub fn new() -> Self {
        Self {
            id: None,
            name: String::new(),
            status: DEFAULT_WORKFLOW_STATUS.to_string(),
            description: String::new(),
            nodes: Vec::new(),
            connections: Vec::new(),
            node_positions: HashMap::new(),
        }
    }

    pub fn node_ids(&self) -> Vec<String> {
        self.nodes
            .iter()
            .map(|n| n.id.clone())
            .filter(|id| !id.is_empty())
            .collect()
    }

    pub fn find_node(&self, node_id: &str) -> Option<&WorkflowNode> {
        self.nodes.iter().find(|n| n.id == node_id)
    }

    /// Removes the node at `idx` together with every connection referencing
    /// it (either endpoint) and its position entry, in one update.
    pub fn remove_node_at(&mut self, idx: usize) -> Option<String> {
        if idx >= self.nodes.len() {
            return None;
        }
        let removed = self.nodes.remove(idx);
        self.connections.retain(|c| !c.references(&removed.id));
        self.node_positions.remove(&removed.id);
        Some(removed.id)
    }

    /// Build the save body, silently filtering position entries with a
    /// non-finite coordinate. Valid entries pass through unchanged.
    pub fn save_payload(&self) -> WorkflowPayload {
        let node_positions = self
            .node_positions
            .iter()
            .filter(|(id, pos)| !id.is_empty() && pos.is_finite())
            .map(|(id, pos)| (id.clone(), *pos))
            .collect();
        WorkflowPayload {
            name: self.name.clone(),
            status: self.status.clone(),
            description: self.description.clone(),
            nodes: self.nodes.clone(),
            connections: self.connections.clone(),
            node_positions,
        }
    }
}

// ---------------------------------------------------------------------------
// Content families (articles / videos / banners / homepage sections)
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Article {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub content: String,
    #[serde(rename = "fileUrl", default)]
    pub file_url: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Video {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "videoUrl", default)]
    pub video_url: String,
    #[serde(rename = "thumbnailUrl", default)]
    pub thumbnail_url: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Banner {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "imageUrl", default)]
    pub image_url: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HomeSection {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub content: String,
}

/// Typed replacement for the free-form key-value JSON blocks used by
/// homepage sections: an ordered key → string mapping, serialized to JSON
/// only at the persistence boundary and validated at construction.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SectionContent {
    entries: Vec<(String, String)>,
}

impl SectionContent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a stored content block. Accepts only a flat JSON object whose
    /// values are all strings; key order follows the document order.
    pub fn from_json(raw: &str) -> Result<Self, String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(Self::new());
        }
        let value: serde_json::Value =
            serde_json::from_str(trimmed).map_err(|e| format!("invalid JSON: {}", e))?;
        let map = value
            .as_object()
            .ok_or_else(|| "content must be a JSON object".to_string())?;
        let mut entries = Vec::with_capacity(map.len());
        for (key, val) in map {
            let text = val
                .as_str()
                .ok_or_else(|| format!("value for \"{}\" must be a string", key))?;
            entries.push((key.clone(), text.to_string()));
        }
        Ok(Self { entries })
    }

    pub fn to_json(&self) -> String {
        let mut map = serde_json::Map::new();
        for (key, value) in &self.entries {
            map.insert(key.clone(), serde_json::Value::String(value.clone()));
        }
        serde_json::Value::Object(map).to_string()
    }

    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert or overwrite (last-one-wins on key collision).
    pub fn set(&mut self, key: &str, value: &str) {
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| k == key) {
            entry.1 = value.to_string();
        } else {
            self.entries.push((key.to_string(), value.to_string()));
        }
    }

    pub fn remove(&mut self, key: &str) {
        self.entries.retain(|(k, _)| k != key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with_nodes(ids: &[&str]) -> Workflow {
        let mut wf = Workflow::new();
        for id in ids {
            wf.nodes
                .push(WorkflowNode::new(id.to_string(), String::new()));
        }
        wf
    }

    #[test]
    fn remove_node_cascades_connections_and_positions() {
        let mut wf = doc_with_nodes(&["a", "b", "c"]);
        wf.connections.push(Connection::with_endpoints(
            Some(&"a".to_string()),
            Some(&"b".to_string()),
        ));
        wf.connections.push(Connection::with_endpoints(
            Some(&"c".to_string()),
            Some(&"a".to_string()),
        ));
        wf.connections.push(Connection::with_endpoints(
            Some(&"b".to_string()),
            Some(&"c".to_string()),
        ));
        wf.node_positions
            .insert("a".to_string(), Position::new(10.0, 10.0));
        wf.node_positions
            .insert("b".to_string(), Position::new(20.0, 20.0));

        let removed = wf.remove_node_at(0);
        assert_eq!(removed.as_deref(), Some("a"));
        assert_eq!(wf.nodes.len(), 2);
        assert_eq!(wf.connections.len(), 1);
        assert!(wf.connections.iter().all(|c| !c.references("a")));
        assert!(!wf.node_positions.contains_key("a"));
        assert!(wf.node_positions.contains_key("b"));
    }

    #[test]
    fn save_payload_filters_non_finite_positions() {
        let mut wf = doc_with_nodes(&["a", "b", "c"]);
        wf.node_positions
            .insert("a".to_string(), Position::new(20.0, 20.0));
        wf.node_positions
            .insert("b".to_string(), Position::new(f64::NAN, 5.0));
        wf.node_positions
            .insert("c".to_string(), Position::new(1.0, f64::INFINITY));

        let payload = wf.save_payload();
        assert_eq!(payload.node_positions.len(), 1);
        assert_eq!(
            payload.node_positions.get("a"),
            Some(&Position::new(20.0, 20.0))
        );
        // The in-memory document is untouched — filtering happens only at
        // the persistence boundary.
        assert_eq!(wf.node_positions.len(), 3);
    }

    #[test]
    fn connection_wire_format_uses_camel_case_and_empty_auto() {
        let conn = Connection {
            from: "a".to_string(),
            to: "b".to_string(),
            source_handle: HandlePosition::Auto,
            target_handle: HandlePosition::Bottom,
            edge_style: EdgeStyle::RedDashed,
            edge_type: EdgeType::Curve,
        };
        let json = serde_json::to_value(&conn).unwrap();
        assert_eq!(json["sourceHandle"], "");
        assert_eq!(json["targetHandle"], "bottom");
        assert_eq!(json["edgeStyle"], "redDashed");
        assert_eq!(json["edgeType"], "default");
    }

    #[test]
    fn workflow_wire_format_round_trips() {
        let mut wf = doc_with_nodes(&["a"]);
        wf.id = Some("abc123".to_string());
        wf.name = "Pipeline".to_string();
        wf.node_positions
            .insert("a".to_string(), Position::new(3.0, 4.0));

        let json = serde_json::to_string(&wf).unwrap();
        assert!(json.contains("\"_id\":\"abc123\""));
        assert!(json.contains("\"nodePositions\""));
        assert!(json.contains("\"type\":\"iconNode\""));

        let back: Workflow = serde_json::from_str(&json).unwrap();
        assert_eq!(back, wf);
    }

    #[test]
    fn unsaved_workflow_omits_id() {
        let wf = Workflow::new();
        let json = serde_json::to_string(&wf).unwrap();
        assert!(!json.contains("_id"));
    }

    #[test]
    fn section_content_accepts_only_flat_string_objects() {
        let ok = SectionContent::from_json(r#"{"headline":"Hi","body":"There"}"#).unwrap();
        assert_eq!(ok.entries().len(), 2);
        assert_eq!(ok.to_json(), r#"{"headline":"Hi","body":"There"}"#);

        assert!(SectionContent::from_json("[1,2]").is_err());
        assert!(SectionContent::from_json(r#"{"n":3}"#).is_err());
        assert!(SectionContent::from_json("not json").is_err());
        assert!(SectionContent::from_json("").unwrap().is_empty());
    }

    #[test]
    fn section_content_set_is_last_one_wins() {
        let mut content = SectionContent::new();
        content.set("title", "one");
        content.set("title", "two");
        content.set("body", "x");
        content.remove("body");
        assert_eq!(content.entries(), &[("title".to_string(), "two".to_string())]);
    }
}

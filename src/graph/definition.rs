use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::spec::InputDef;

/// Node id and kind of the injected start decoration node, which carries the
/// workflow's declared inputs on the canvas.
pub const START_NODE_ID: &str = "start";
/// Node id and kind of the injected output decoration node, which carries the
/// workflow's output expression.
pub const OUTPUT_NODE_ID: &str = "output";

/// The editor-facing view over a [`crate::spec::WorkflowSpec`].
///
/// Not independently authoritative: the spec is the source of truth, and edges
/// are derived from the reference relationships between nodes. Node positions
/// are the one graph-only attribute with no spec equivalent; they live only in
/// the session that produced them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VisualGraph {
    /// Schema version of the spec this graph was derived from.
    pub version: String,
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    /// The node's renderer discriminator: a spec node `type`, or one of
    /// [`START_NODE_ID`] / [`OUTPUT_NODE_ID`] for the decoration nodes.
    /// Unknown kinds get a default renderer downstream rather than failing.
    #[serde(rename = "type")]
    pub kind: String,
    pub position: Position,
    pub data: NodeData,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    pub config: NodeConfig,
}

/// Editor-facing node configuration. All reference expressions here use the
/// `{{...}}` editor syntax; the normalizer translates to and from the stored
/// `${...}` form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Parameter name → reference expression, editor syntax.
    #[serde(default, skip_serializing_if = "map_is_empty")]
    pub params: AHashMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_mode: Option<String>,
    /// The variable this node's result is bound to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out: Option<String>,
    /// Declared workflow inputs; present only on the start decoration node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inputs: Option<AHashMap<String, InputDef>>,
    /// The workflow output expression (editor syntax); present only on the
    /// output decoration node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_ref: Option<String>,
    /// Fields of unrecognized node kinds, carried through untranslated.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// serde calls skip_serializing_if as a plain function path; AHashMap only
// reaches is_empty through Deref, so give it a direct one.
fn map_is_empty<K, V>(map: &AHashMap<K, V>) -> bool {
    map.is_empty()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub id: String,
    pub source: String,
    pub target: String,
}

impl GraphEdge {
    pub fn between(source: &str, target: &str) -> Self {
        Self {
            id: format!("e-{source}-{target}"),
            source: source.to_string(),
            target: target.to_string(),
        }
    }
}

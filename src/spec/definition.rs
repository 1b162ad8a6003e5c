use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// The canonical, persisted definition of a workflow: typed inputs, an ordered
/// node list, and a single output expression.
///
/// The node list is a topologically valid DAG expressed as a flat ordered
/// sequence: a node may only reference the outputs of nodes that precede it.
/// That invariant is *not* enforced here (deserialization is lossless and
/// total); [`crate::spec::validate`] checks it on demand.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowSpec {
    pub version: String,
    #[serde(default)]
    pub inputs: AHashMap<String, InputDef>,
    #[serde(default)]
    pub nodes: Vec<SpecNode>,
    #[serde(default)]
    pub output: String,
}

/// Declares a single workflow input parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputDef {
    #[serde(rename = "type")]
    pub input_type: InputType,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// The closed set of input parameter types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    String,
    Integer,
    Number,
    Boolean,
    Array,
    Object,
}

/// A single computation node in the spec, discriminated by its `type` field.
///
/// Unrecognized node types deserialize into the `Other` variant with all of
/// their fields preserved, so a spec written by a newer producer round-trips
/// losslessly instead of being rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SpecNode {
    Tool(ToolNode),
    Llm(LlmNode),
    #[serde(untagged)]
    Other(OtherNode),
}

/// A tool-call node: invokes `tool` with the bound parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolNode {
    pub id: String,
    pub tool: String,
    /// Parameter name → reference-expression string, in stored `${...}` syntax.
    #[serde(rename = "in_", alias = "in", default)]
    pub bindings: AHashMap<String, String>,
    pub out: String,
}

/// An LLM-call node: renders `prompt` against the bound inputs and invokes `model`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmNode {
    pub id: String,
    pub model: String,
    pub prompt: String,
    #[serde(rename = "in_", alias = "in", default)]
    pub bindings: AHashMap<String, String>,
    /// Output mode requested from the model (e.g. "text", "json").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    pub out: String,
}

/// A node of a type this crate does not know about, carried through verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OtherNode {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "in_", alias = "in", default)]
    pub bindings: AHashMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out: Option<String>,
    #[serde(flatten)]
    pub rest: serde_json::Map<String, serde_json::Value>,
}

impl SpecNode {
    pub fn id(&self) -> &str {
        match self {
            SpecNode::Tool(n) => &n.id,
            SpecNode::Llm(n) => &n.id,
            SpecNode::Other(n) => &n.id,
        }
    }

    /// The node's `type` discriminator as it appears on the wire.
    pub fn kind(&self) -> &str {
        match self {
            SpecNode::Tool(_) => "tool",
            SpecNode::Llm(_) => "llm",
            SpecNode::Other(n) => &n.kind,
        }
    }

    /// The variable name this node's result is bound to, if any.
    pub fn out(&self) -> Option<&str> {
        match self {
            SpecNode::Tool(n) => Some(&n.out),
            SpecNode::Llm(n) => Some(&n.out),
            SpecNode::Other(n) => n.out.as_deref(),
        }
    }

    /// The node's input-binding map (parameter name → reference expression).
    pub fn bindings(&self) -> &AHashMap<String, String> {
        match self {
            SpecNode::Tool(n) => &n.bindings,
            SpecNode::Llm(n) => &n.bindings,
            SpecNode::Other(n) => &n.bindings,
        }
    }
}

impl WorkflowSpec {
    /// An empty spec at the given schema version, as created for a new workflow.
    pub fn empty(version: &str) -> Self {
        Self {
            version: version.to_string(),
            ..Default::default()
        }
    }

    /// All variable names visible to a node appended at the end of the current
    /// node list: `inputs.<name>` for every declared input, plus every node's
    /// `out` binding, inputs first and then outputs in node order.
    pub fn available_variables(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .inputs
            .keys()
            .map(|name| format!("inputs.{name}"))
            .collect();
        names.sort();
        names.extend(
            self.nodes
                .iter()
                .filter_map(|node| node.out().map(str::to_string)),
        );
        names
    }
}

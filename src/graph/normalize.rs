//! Spec↔Graph normalization.
//!
//! Both directions are pure and total: they never fail, never mutate their
//! input, and pass malformed or unknown content through unchanged. A spec with
//! duplicate node ids produces a graph with duplicate node ids (behavior
//! downstream of that is the renderer's problem). Reference correctness is not
//! checked here; see [`crate::spec::validate`].

use ahash::AHashMap;
use itertools::Itertools;

use crate::reference::{RefSyntax, Template, translate};
use crate::spec::{LlmNode, OtherNode, SpecNode, ToolNode, WorkflowSpec};

use super::definition::{
    GraphEdge, GraphNode, NodeConfig, NodeData, OUTPUT_NODE_ID, Position, START_NODE_ID,
    VisualGraph,
};

/// Horizontal distance between consecutive nodes in the generated layout.
const COLUMN_SPACING: f64 = 260.0;

/// Derives the editor graph for a spec: one graph node per spec node plus the
/// start and output decoration nodes, and edges for every resolvable reference
/// relationship. Node count is therefore `spec.nodes.len() + 2`.
pub fn spec_to_graph(spec: &WorkflowSpec) -> VisualGraph {
    let mut nodes = Vec::with_capacity(spec.nodes.len() + 2);

    nodes.push(GraphNode {
        id: START_NODE_ID.to_string(),
        kind: START_NODE_ID.to_string(),
        position: Position { x: 0.0, y: 0.0 },
        data: NodeData {
            config: NodeConfig {
                inputs: Some(spec.inputs.clone()),
                ..Default::default()
            },
        },
    });

    for (index, node) in spec.nodes.iter().enumerate() {
        nodes.push(GraphNode {
            id: node.id().to_string(),
            kind: node.kind().to_string(),
            position: Position {
                x: (index as f64 + 1.0) * COLUMN_SPACING,
                y: 0.0,
            },
            data: NodeData {
                config: node_config(node),
            },
        });
    }

    nodes.push(GraphNode {
        id: OUTPUT_NODE_ID.to_string(),
        kind: OUTPUT_NODE_ID.to_string(),
        position: Position {
            x: (spec.nodes.len() as f64 + 1.0) * COLUMN_SPACING,
            y: 0.0,
        },
        data: NodeData {
            config: NodeConfig {
                output_ref: Some(translate(&spec.output, RefSyntax::Dollar, RefSyntax::Brace)),
                ..Default::default()
            },
        },
    });

    VisualGraph {
        version: spec.version.clone(),
        nodes,
        edges: derive_edges(spec),
    }
}

/// Reconstructs the canonical spec from a graph. The exact inverse of
/// [`spec_to_graph`] for every spec field; positions are dropped and edges are
/// ignored (they are a derived view, not authoritative).
pub fn graph_to_spec(graph: &VisualGraph) -> WorkflowSpec {
    let mut inputs = AHashMap::new();
    let mut output = String::new();
    let mut nodes = Vec::new();

    for node in &graph.nodes {
        match node.kind.as_str() {
            START_NODE_ID => {
                if let Some(declared) = &node.data.config.inputs {
                    inputs = declared.clone();
                }
            }
            OUTPUT_NODE_ID => {
                if let Some(reference) = &node.data.config.output_ref {
                    output = translate(reference, RefSyntax::Brace, RefSyntax::Dollar);
                }
            }
            _ => nodes.push(spec_node(node)),
        }
    }

    WorkflowSpec {
        version: graph.version.clone(),
        inputs,
        nodes,
        output,
    }
}

fn node_config(node: &SpecNode) -> NodeConfig {
    let params = node
        .bindings()
        .iter()
        .map(|(name, expr)| {
            (
                name.clone(),
                translate(expr, RefSyntax::Dollar, RefSyntax::Brace),
            )
        })
        .collect();

    match node {
        SpecNode::Tool(n) => NodeConfig {
            params,
            tool: Some(n.tool.clone()),
            out: Some(n.out.clone()),
            ..Default::default()
        },
        SpecNode::Llm(n) => NodeConfig {
            params,
            model: Some(n.model.clone()),
            prompt: Some(n.prompt.clone()),
            output_mode: n.output.clone(),
            out: Some(n.out.clone()),
            ..Default::default()
        },
        SpecNode::Other(n) => NodeConfig {
            params,
            out: n.out.clone(),
            extra: n.rest.clone(),
            ..Default::default()
        },
    }
}

fn spec_node(node: &GraphNode) -> SpecNode {
    let config = &node.data.config;
    let bindings: AHashMap<String, String> = config
        .params
        .iter()
        .map(|(name, expr)| {
            (
                name.clone(),
                translate(expr, RefSyntax::Brace, RefSyntax::Dollar),
            )
        })
        .collect();

    match node.kind.as_str() {
        "tool" => SpecNode::Tool(ToolNode {
            id: node.id.clone(),
            tool: config.tool.clone().unwrap_or_default(),
            bindings,
            out: config.out.clone().unwrap_or_default(),
        }),
        "llm" => SpecNode::Llm(LlmNode {
            id: node.id.clone(),
            model: config.model.clone().unwrap_or_default(),
            prompt: config.prompt.clone().unwrap_or_default(),
            bindings,
            output: config.output_mode.clone(),
            out: config.out.clone().unwrap_or_default(),
        }),
        kind => SpecNode::Other(OtherNode {
            id: node.id.clone(),
            kind: kind.to_string(),
            bindings,
            out: config.out.clone(),
            rest: config.extra.clone(),
        }),
    }
}

/// Walks binding expressions in node order and draws an edge for every
/// reference that resolves to a declared input (from the start node) or an
/// upstream node's output. Dangling references draw nothing.
fn derive_edges(spec: &WorkflowSpec) -> Vec<GraphEdge> {
    // out-variable name -> producing node id, first producer wins
    let mut producers: AHashMap<&str, &str> = AHashMap::new();
    let mut pairs: Vec<(String, String)> = Vec::new();

    for node in &spec.nodes {
        for expression in node.bindings().values() {
            for source in reference_sources(expression, spec, &producers) {
                pairs.push((source, node.id().to_string()));
            }
        }
        if let Some(out) = node.out() {
            producers.entry(out).or_insert(node.id());
        }
    }

    for source in reference_sources(&spec.output, spec, &producers) {
        pairs.push((source, OUTPUT_NODE_ID.to_string()));
    }

    pairs
        .into_iter()
        .unique()
        .map(|(source, target)| GraphEdge::between(&source, &target))
        .collect()
}

fn reference_sources(
    expression: &str,
    spec: &WorkflowSpec,
    producers: &AHashMap<&str, &str>,
) -> Vec<String> {
    let template = Template::parse(expression, RefSyntax::Dollar);
    let mut sources = Vec::new();
    for reference in template.references() {
        match reference.strip_prefix("inputs.") {
            Some(input_name) if spec.inputs.contains_key(input_name) => {
                sources.push(START_NODE_ID.to_string());
            }
            Some(_) => {}
            None => {
                if let Some(producer) = producers.get(reference) {
                    sources.push((*producer).to_string());
                }
            }
        }
    }
    sources
}

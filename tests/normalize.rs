//! Tests for Spec↔Graph normalization and the reference-resolution pass.
mod common;
use common::*;
use seerflow::error::SpecError;
use seerflow::graph::{OUTPUT_NODE_ID, START_NODE_ID};
use seerflow::prelude::*;
use seerflow::spec::OtherNode;

#[test]
fn test_spec_to_graph_injects_decorations() {
    let spec = create_sample_spec();
    let graph = spec_to_graph(&spec);

    assert_eq!(graph.nodes.len(), spec.nodes.len() + 2);
    assert_eq!(graph.nodes[0].id, START_NODE_ID);
    assert_eq!(graph.nodes.last().map(|n| n.id.as_str()), Some(OUTPUT_NODE_ID));

    let start = &graph.nodes[0];
    let declared = start.data.config.inputs.as_ref().expect("start holds inputs");
    assert!(declared.contains_key("topic"));

    let output = graph.nodes.last().expect("output node present");
    assert_eq!(
        output.data.config.output_ref.as_deref(),
        Some("{{summary}}")
    );
}

#[test]
fn test_spec_to_graph_translates_bindings_to_editor_syntax() {
    let graph = spec_to_graph(&create_sample_spec());
    let search = graph
        .nodes
        .iter()
        .find(|n| n.id == "search")
        .expect("search node present");
    assert_eq!(
        search.data.config.params.get("query").map(String::as_str),
        Some("{{inputs.topic}}")
    );
    // Prompts are plain node fields, not bindings; they are not rewritten.
    let summarize = graph
        .nodes
        .iter()
        .find(|n| n.id == "summarize")
        .expect("summarize node present");
    assert_eq!(
        summarize.data.config.prompt.as_deref(),
        Some("Summarize these articles about ${inputs.topic}")
    );
}

#[test]
fn test_spec_to_graph_edges_follow_references() {
    let graph = spec_to_graph(&create_sample_spec());
    let has_edge = |source: &str, target: &str| {
        graph
            .edges
            .iter()
            .any(|e| e.source == source && e.target == target)
    };

    assert!(has_edge(START_NODE_ID, "search"));
    assert!(has_edge("search", "summarize"));
    assert!(has_edge("summarize", OUTPUT_NODE_ID));
    // Two inputs feed `search`; the edge is drawn once.
    let start_to_search = graph
        .edges
        .iter()
        .filter(|e| e.source == START_NODE_ID && e.target == "search")
        .count();
    assert_eq!(start_to_search, 1);
}

#[test]
fn test_dangling_reference_draws_no_edge_and_does_not_fail() {
    let mut spec = create_sample_spec();
    if let SpecNode::Llm(node) = &mut spec.nodes[1] {
        node.bindings
            .insert("extra".to_string(), "${does_not_exist}".to_string());
    }
    let graph = spec_to_graph(&spec);
    assert!(graph.edges.iter().all(|e| e.source != "does_not_exist"));
}

#[test]
fn test_round_trip_preserves_spec() {
    let spec = create_sample_spec();
    let round_tripped = graph_to_spec(&spec_to_graph(&spec));
    assert_eq!(round_tripped, spec);
}

#[test]
fn test_round_trip_preserves_unknown_node_kinds() {
    let mut spec = create_sample_spec();
    let mut rest = serde_json::Map::new();
    rest.insert("branches".to_string(), serde_json::json!(["a", "b"]));
    spec.nodes.push(SpecNode::Other(OtherNode {
        id: "branch".to_string(),
        kind: "condition".to_string(),
        bindings: [("value".to_string(), "${summary}".to_string())]
            .into_iter()
            .collect(),
        out: Some("decision".to_string()),
        rest,
    }));
    spec.output = "${decision}".to_string();

    let graph = spec_to_graph(&spec);
    let branch = graph
        .nodes
        .iter()
        .find(|n| n.id == "branch")
        .expect("unknown node carried into graph");
    assert_eq!(branch.kind, "condition");

    assert_eq!(graph_to_spec(&graph), spec);
}

#[test]
fn test_empty_spec_round_trips() {
    let spec = WorkflowSpec::empty("1");
    let graph = spec_to_graph(&spec);
    assert_eq!(graph.nodes.len(), 2);
    assert!(graph.edges.is_empty());
    assert_eq!(graph_to_spec(&graph), spec);
}

#[test]
fn test_graph_json_round_trip_omits_empty_config_fields() {
    let graph = spec_to_graph(&create_sample_spec());
    let json = serde_json::to_value(&graph).expect("graph serializes");

    // Decoration nodes have no params; the key is skipped entirely.
    let start = &json["nodes"][0]["data"]["config"];
    assert!(start.get("params").is_none());
    assert!(start.get("tool").is_none());

    let parsed: VisualGraph = serde_json::from_value(json).expect("graph deserializes");
    assert_eq!(parsed, graph);
}

#[test]
fn test_validate_accepts_sample_spec() {
    assert_eq!(seerflow::spec::validate(&create_sample_spec()), Ok(()));
}

#[test]
fn test_validate_rejects_unresolved_reference() {
    let mut spec = create_sample_spec();
    if let SpecNode::Tool(node) = &mut spec.nodes[0] {
        node.bindings
            .insert("query".to_string(), "${inputs.missing}".to_string());
    }
    match seerflow::spec::validate(&spec) {
        Err(SpecError::UnresolvedReference { node_id, expression }) => {
            assert_eq!(node_id, "search");
            assert_eq!(expression, "inputs.missing");
        }
        other => panic!("Expected UnresolvedReference, got {:?}", other),
    }
}

#[test]
fn test_validate_rejects_forward_reference() {
    let mut spec = create_sample_spec();
    // `search` now consumes the output of the node that follows it.
    if let SpecNode::Tool(node) = &mut spec.nodes[0] {
        node.bindings
            .insert("query".to_string(), "${summary}".to_string());
    }
    assert!(matches!(
        seerflow::spec::validate(&spec),
        Err(SpecError::UnresolvedReference { .. })
    ));
}

#[test]
fn test_validate_rejects_duplicate_node_id() {
    let mut spec = create_sample_spec();
    if let SpecNode::Llm(node) = &mut spec.nodes[1] {
        node.id = "search".to_string();
    }
    assert_eq!(
        seerflow::spec::validate(&spec),
        Err(SpecError::DuplicateNodeId {
            node_id: "search".to_string()
        })
    );
}

#[test]
fn test_validate_rejects_duplicate_binding() {
    let mut spec = create_sample_spec();
    if let SpecNode::Llm(node) = &mut spec.nodes[1] {
        node.out = "results".to_string();
        node.bindings.clear();
    }
    spec.output = "${results}".to_string();
    match seerflow::spec::validate(&spec) {
        Err(SpecError::DuplicateBinding {
            name,
            node_id,
            first_node_id,
        }) => {
            assert_eq!(name, "results");
            assert_eq!(node_id, "summarize");
            assert_eq!(first_node_id, "search");
        }
        other => panic!("Expected DuplicateBinding, got {:?}", other),
    }
}

#[test]
fn test_duplicate_ids_pass_through_the_normalizer() {
    // The normalizer is total: duplicates are the validate pass's concern.
    let mut spec = create_sample_spec();
    if let SpecNode::Llm(node) = &mut spec.nodes[1] {
        node.id = "search".to_string();
    }
    let graph = spec_to_graph(&spec);
    let dupes = graph.nodes.iter().filter(|n| n.id == "search").count();
    assert_eq!(dupes, 2);
}

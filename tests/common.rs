//! Common test utilities for building workflow specs and export bundles.
use ahash::AHashMap;
use seerflow::prelude::*;

/// Creates a two-node spec used across the test suite.
///
/// `inputs.topic` feeds a tool node (`results`), which feeds an LLM node
/// (`summary`), which is the workflow output.
#[allow(dead_code)]
pub fn create_sample_spec() -> WorkflowSpec {
    let mut inputs = AHashMap::new();
    inputs.insert(
        "topic".to_string(),
        InputDef {
            input_type: InputType::String,
            required: true,
            description: Some("What to research".to_string()),
        },
    );
    inputs.insert(
        "limit".to_string(),
        InputDef {
            input_type: InputType::Integer,
            required: false,
            description: None,
        },
    );

    WorkflowSpec {
        version: "1".to_string(),
        inputs,
        nodes: vec![
            SpecNode::Tool(ToolNode {
                id: "search".to_string(),
                tool: "web_search".to_string(),
                bindings: [
                    ("query".to_string(), "${inputs.topic}".to_string()),
                    ("max_results".to_string(), "${inputs.limit}".to_string()),
                ]
                .into_iter()
                .collect(),
                out: "results".to_string(),
            }),
            SpecNode::Llm(LlmNode {
                id: "summarize".to_string(),
                model: "gpt-4o".to_string(),
                prompt: "Summarize these articles about ${inputs.topic}".to_string(),
                bindings: [("articles".to_string(), "${results}".to_string())]
                    .into_iter()
                    .collect(),
                output: Some("text".to_string()),
                out: "summary".to_string(),
            }),
        ],
        output: "${summary}".to_string(),
    }
}

/// Creates a trigger subscription, enabled or not.
#[allow(dead_code)]
pub fn create_trigger(id: &str, enabled: bool) -> TriggerSubscription {
    let mut config = serde_json::Map::new();
    config.insert(
        "channel".to_string(),
        serde_json::Value::String("#alerts".to_string()),
    );
    TriggerSubscription {
        id: id.to_string(),
        trigger_type: "slack_message".to_string(),
        config,
        enabled,
    }
}

/// Serializes a complete, valid bundle for the sample spec.
#[allow(dead_code)]
pub fn create_bundle_json() -> String {
    let bundle = export_bundle(
        "Research digest",
        Some("Searches and summarizes a topic"),
        &create_sample_spec(),
        vec![create_trigger("t-1", true)],
    );
    bundle.to_json().expect("bundle should serialize")
}

//! Prelude module for convenient imports
//!
//! Re-exports the most commonly used types and functions from the seerflow
//! crate so callers can bring the core API in with a single `use`.

// Canonical spec model
pub use crate::spec::{InputDef, InputType, LlmNode, SpecNode, ToolNode, WorkflowSpec};

// Graph view and normalization
pub use crate::graph::{
    GraphEdge, GraphNode, NodeConfig, VisualGraph, graph_to_spec, spec_to_graph,
};

// Reference-expression templates
pub use crate::reference::{RefSyntax, Segment, Template, translate};

// Import/export bundles
pub use crate::bundle::{
    ExportBundle, ImportPreview, TriggerSubscription, export_bundle, parse_bundle,
    validate_file_name,
};

// Editor state
pub use crate::store::{SaveOutcome, SaveTicket, WorkflowStore};

// Error types
pub use crate::error::{ExportError, ImportError, SpecError};

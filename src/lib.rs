//! # Seerflow - Workflow Spec/Graph Normalization
//!
//! **Seerflow** is the data layer behind a visual workflow builder: it owns the
//! canonical `WorkflowSpec` JSON model, derives the editor-facing `VisualGraph`
//! view from it (and back), translates reference expressions between their
//! stored `${...}` and editor `{{...}}` syntaxes, and validates/produces the
//! `.seer.json` export bundles used for file interchange.
//!
//! ## Core Workflow
//!
//! The spec is always the source of truth; the graph is a derived view:
//!
//! 1.  **Load**: deserialize a `WorkflowSpec` from the backend of record, or
//!     parse a `.seer.json` bundle into an import preview.
//! 2.  **Normalize**: `spec_to_graph` produces the canvas view; edits come back
//!     through `graph_to_spec`.
//! 3.  **Validate**: the opt-in resolution pass reports dangling references,
//!     duplicate ids, and duplicate output bindings as typed errors.
//! 4.  **Persist**: a `WorkflowStore` sequences autosaves and builds export
//!     bundles.
//!
//! ## Quick Start
//!
//! ```rust
//! use seerflow::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let spec: WorkflowSpec = serde_json::from_str(
//!         r#"{
//!             "version": "1",
//!             "inputs": {
//!                 "topic": { "type": "string", "required": true }
//!             },
//!             "nodes": [
//!                 {
//!                     "type": "llm",
//!                     "id": "summarize",
//!                     "model": "gpt-4o",
//!                     "prompt": "Summarize ${inputs.topic}",
//!                     "in_": { "topic": "${inputs.topic}" },
//!                     "out": "summary"
//!                 }
//!             ],
//!             "output": "${summary}"
//!         }"#,
//!     )?;
//!
//!     // Check every reference resolves before rendering anything.
//!     seerflow::spec::validate(&spec)?;
//!
//!     // Derive the canvas view: one node per spec node plus the start and
//!     // output decorations, edges following the reference relationships.
//!     let graph = spec_to_graph(&spec);
//!     assert_eq!(graph.nodes.len(), spec.nodes.len() + 2);
//!
//!     // Edits round-trip losslessly back into the canonical form.
//!     let round_tripped = graph_to_spec(&graph);
//!     assert_eq!(round_tripped, spec);
//!     Ok(())
//! }
//! ```

pub mod bundle;
pub mod error;
pub mod graph;
pub mod prelude;
pub mod reference;
pub mod spec;
pub mod store;

//! Client-side editor state.
//!
//! One explicit [`WorkflowStore`] owned by the embedding session replaces the
//! ambient per-concern singletons of a typical SPA: every mutation goes
//! through it, and it is handed down to whatever needs it. The store keeps the
//! spec and its derived graph in sync through the normalizer, tracks
//! selection, and sequences save completions so a stale response can never
//! clobber newer edits.

mod debounce;

pub use debounce::Debouncer;

use tracing::debug;

use crate::bundle::{ExportBundle, ImportPreview, TriggerSubscription, export_bundle};
use crate::graph::{VisualGraph, graph_to_spec, spec_to_graph};
use crate::spec::WorkflowSpec;

/// A monotonic revision counter; bumped on every spec-affecting edit.
pub type Revision = u64;

/// Issued by [`WorkflowStore::begin_save`]; pass it back to
/// [`WorkflowStore::complete_save`] when the backend round trip finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveTicket {
    revision: Revision,
}

/// Outcome of completing a save request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The saved revision is the newest issued; the store is now clean.
    Saved,
    /// A newer save was started after this one; the completion is discarded.
    Stale,
}

#[derive(Debug, Clone)]
pub struct WorkflowStore {
    name: String,
    description: Option<String>,
    spec: WorkflowSpec,
    graph: VisualGraph,
    triggers: Vec<TriggerSubscription>,
    selected_node: Option<String>,
    revision: Revision,
    saved_revision: Revision,
    latest_ticket: Revision,
}

impl WorkflowStore {
    /// A store over a fresh, empty workflow.
    pub fn new(name: &str, spec_version: &str) -> Self {
        Self::load(name, None, WorkflowSpec::empty(spec_version), Vec::new())
    }

    /// A store over a workflow loaded from the backend of record.
    pub fn load(
        name: &str,
        description: Option<String>,
        spec: WorkflowSpec,
        triggers: Vec<TriggerSubscription>,
    ) -> Self {
        let graph = spec_to_graph(&spec);
        Self {
            name: name.to_string(),
            description,
            spec,
            graph,
            triggers,
            selected_node: None,
            revision: 0,
            saved_revision: 0,
            latest_ticket: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn spec(&self) -> &WorkflowSpec {
        &self.spec
    }

    pub fn graph(&self) -> &VisualGraph {
        &self.graph
    }

    pub fn triggers(&self) -> &[TriggerSubscription] {
        &self.triggers
    }

    pub fn revision(&self) -> Revision {
        self.revision
    }

    /// Whether there are edits the backend has not acknowledged yet.
    pub fn is_dirty(&self) -> bool {
        self.revision != self.saved_revision
    }

    pub fn selected_node(&self) -> Option<&str> {
        self.selected_node.as_deref()
    }

    /// Selects a node by id, or clears the selection. Selection is view state;
    /// it does not bump the revision.
    pub fn select_node(&mut self, node_id: Option<&str>) {
        self.selected_node = node_id.map(str::to_string);
    }

    /// Applies an edited graph from the canvas: the spec is re-derived through
    /// the normalizer (the spec stays the source of truth) and the graph is
    /// re-normalized from it, so edges and decorations always match.
    pub fn apply_graph(&mut self, graph: &VisualGraph) {
        self.spec = graph_to_spec(graph);
        self.graph = spec_to_graph(&self.spec);
        self.bump();
    }

    /// Replaces the spec directly (e.g. accepting a chat-proposed patch).
    pub fn apply_spec(&mut self, spec: WorkflowSpec) {
        self.graph = spec_to_graph(&spec);
        self.spec = spec;
        self.bump();
    }

    pub fn set_metadata(&mut self, name: &str, description: Option<&str>) {
        self.name = name.to_string();
        self.description = description.map(str::to_string);
        self.bump();
    }

    /// Commits a parsed import: the previewed workflow and its (force-disabled)
    /// triggers replace the current state in one step. Nothing here can fail;
    /// all validation happened while producing the preview.
    pub fn import(&mut self, preview: ImportPreview) {
        let (name, description, spec, triggers) = preview.into_parts();
        debug!(workflow = %name, nodes = spec.nodes.len(), "importing workflow bundle");
        self.name = name;
        self.description = description;
        self.graph = spec_to_graph(&spec);
        self.spec = spec;
        self.triggers = triggers;
        self.selected_node = None;
        self.bump();
    }

    /// Builds an export bundle from the current state.
    pub fn export(&self) -> ExportBundle {
        export_bundle(
            &self.name,
            self.description.as_deref(),
            &self.spec,
            self.triggers.clone(),
        )
    }

    /// Starts a save round trip for the current revision. Tickets are
    /// monotonic: starting a newer save invalidates every earlier ticket.
    pub fn begin_save(&mut self) -> SaveTicket {
        self.latest_ticket = self.revision;
        SaveTicket {
            revision: self.revision,
        }
    }

    /// Completes a save round trip. A completion whose ticket is older than
    /// the newest issued one is reported [`SaveOutcome::Stale`] and ignored,
    /// so out-of-order backend responses cannot mark newer edits as saved.
    pub fn complete_save(&mut self, ticket: SaveTicket) -> SaveOutcome {
        if ticket.revision < self.latest_ticket {
            debug!(
                ticket = ticket.revision,
                latest = self.latest_ticket,
                "discarding stale save completion"
            );
            return SaveOutcome::Stale;
        }
        self.saved_revision = ticket.revision;
        SaveOutcome::Saved
    }

    fn bump(&mut self) {
        self.revision += 1;
    }
}

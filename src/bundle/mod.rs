//! The file-interchange form of a workflow: a JSON bundle wrapping the spec,
//! optional trigger subscriptions, and export metadata.

pub mod export;
pub mod import;

use serde::{Deserialize, Serialize};

pub use export::export_bundle;
pub use import::{ImportPreview, parse_bundle, parse_bundle_file, validate_file_name};

/// Schema version written into bundles produced by this crate.
pub const BUNDLE_VERSION: &str = "1";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportBundle {
    pub version: String,
    pub workflow: WorkflowExport,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub triggers: Vec<TriggerSubscription>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<BundleMetadata>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowExport {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub spec: crate::spec::WorkflowSpec,
}

/// A record binding an external event source to a workflow invocation.
///
/// The execution side of triggers is out of scope here; the bundle only
/// carries them across export/import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerSubscription {
    pub id: String,
    pub trigger_type: String,
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub config: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleMetadata {
    /// ISO-8601 UTC timestamp of when the bundle was written.
    pub exported_at: chrono::DateTime<chrono::Utc>,
}

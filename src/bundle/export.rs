use std::fs;
use std::path::Path;

use chrono::Utc;
use tracing::debug;

use crate::error::ExportError;
use crate::spec::WorkflowSpec;

use super::{BUNDLE_VERSION, BundleMetadata, ExportBundle, TriggerSubscription, WorkflowExport};

/// Builds a bundle for the current workflow, stamped with the export time.
///
/// The bundle is derived and disposable: it carries whatever trigger state the
/// workflow currently has (the disabling policy is applied on *import*, where
/// credentials may no longer be valid).
pub fn export_bundle(
    name: &str,
    description: Option<&str>,
    spec: &WorkflowSpec,
    triggers: Vec<TriggerSubscription>,
) -> ExportBundle {
    ExportBundle {
        version: BUNDLE_VERSION.to_string(),
        workflow: WorkflowExport {
            name: name.to_string(),
            description: description.map(str::to_string),
            spec: spec.clone(),
        },
        triggers,
        metadata: Some(BundleMetadata {
            exported_at: Utc::now(),
        }),
    }
}

impl ExportBundle {
    /// Serializes the bundle as pretty-printed UTF-8 JSON.
    pub fn to_json(&self) -> Result<String, ExportError> {
        serde_json::to_string_pretty(self).map_err(|e| ExportError::Serialize(e.to_string()))
    }

    /// Writes the bundle to a file.
    pub fn save(&self, path: &Path) -> Result<(), ExportError> {
        let json = self.to_json()?;
        fs::write(path, json).map_err(|e| ExportError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        debug!(path = %path.display(), "wrote workflow bundle");
        Ok(())
    }
}

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::ImportError;
use crate::spec::WorkflowSpec;

use super::{ExportBundle, TriggerSubscription};

/// Cheap pre-filter on the selected file's name, before any content is read:
/// only `.json` and `.seer.json` files are accepted. Content validation is
/// [`parse_bundle`]'s job.
pub fn validate_file_name(file_name: &str) -> Result<(), ImportError> {
    let lower = file_name.to_lowercase();
    if lower.ends_with(".seer.json") || lower.ends_with(".json") {
        Ok(())
    } else {
        Err(ImportError::UnsupportedExtension {
            file_name: file_name.to_string(),
        })
    }
}

/// What an import would do, surfaced to the user before anything is committed.
///
/// Parsing populates only this preview; applying it is a separate, explicit
/// step ([`ImportPreview::into_parts`]), so a failed or abandoned import never
/// touches existing state.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportPreview {
    pub name: String,
    pub description: Option<String>,
    pub node_count: usize,
    pub trigger_count: usize,
    bundle: ExportBundle,
}

impl ImportPreview {
    /// Consumes the preview into the workflow spec and its triggers.
    ///
    /// Every trigger comes back with `enabled: false` regardless of its state
    /// in the source bundle: imported triggers must never silently activate
    /// with stale or absent credentials, so the user has to reconnect and
    /// re-enable each one by hand.
    pub fn into_parts(self) -> (String, Option<String>, WorkflowSpec, Vec<TriggerSubscription>) {
        let disabled = self
            .bundle
            .triggers
            .into_iter()
            .map(|trigger| {
                if trigger.enabled {
                    warn!(trigger_id = %trigger.id, "imported trigger forced to disabled");
                }
                TriggerSubscription {
                    enabled: false,
                    ..trigger
                }
            })
            .collect();
        (
            self.bundle.workflow.name,
            self.bundle.workflow.description,
            self.bundle.workflow.spec,
            disabled,
        )
    }

    pub fn bundle(&self) -> &ExportBundle {
        &self.bundle
    }
}

/// Parses bundle text into an [`ImportPreview`] without mutating anything.
///
/// Two phases: JSON-parse, then a structural gate requiring truthy `version`,
/// `workflow`, and `workflow.spec` fields before the typed deserialization.
/// A bundle failing the gate is rejected with the single user-facing message
/// `"Invalid workflow export format"`.
pub fn parse_bundle(text: &str) -> Result<ImportPreview, ImportError> {
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|e| ImportError::JsonParse(e.to_string()))?;

    let version_present = match &value["version"] {
        serde_json::Value::Null => false,
        serde_json::Value::String(s) => !s.is_empty(),
        _ => true,
    };
    let has_shape = version_present
        && value["workflow"].is_object()
        && value["workflow"]["spec"].is_object();
    if !has_shape {
        return Err(ImportError::InvalidFormat);
    }

    let bundle: ExportBundle =
        serde_json::from_value(value).map_err(|_| ImportError::InvalidFormat)?;

    debug!(
        workflow = %bundle.workflow.name,
        nodes = bundle.workflow.spec.nodes.len(),
        triggers = bundle.triggers.len(),
        "parsed workflow bundle"
    );

    Ok(ImportPreview {
        name: bundle.workflow.name.clone(),
        description: bundle.workflow.description.clone(),
        node_count: bundle.workflow.spec.nodes.len(),
        trigger_count: bundle.triggers.len(),
        bundle,
    })
}

/// Convenience for CLI and test use: name check, read, parse.
pub fn parse_bundle_file(path: &Path) -> Result<ImportPreview, ImportError> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    validate_file_name(&file_name)?;
    let text = fs::read_to_string(path).map_err(|e| ImportError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    parse_bundle(&text)
}

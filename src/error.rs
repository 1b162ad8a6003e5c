use thiserror::Error;

/// Errors reported by the opt-in reference-resolution pass over a `WorkflowSpec`.
///
/// The Spec→Graph normalizer itself never raises these: malformed or dangling
/// references pass through it unchanged. Run [`crate::spec::validate`] to surface them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpecError {
    #[error(
        "Node '{node_id}' references '{expression}', which is not a declared input or an upstream node output"
    )]
    UnresolvedReference { node_id: String, expression: String },

    #[error("Duplicate node id '{node_id}'")]
    DuplicateNodeId { node_id: String },

    #[error(
        "Node '{node_id}' binds output variable '{name}', which is already bound by node '{first_node_id}'"
    )]
    DuplicateBinding {
        name: String,
        node_id: String,
        first_node_id: String,
    },
}

/// Errors that can occur while validating or parsing an import bundle.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    #[error("'{file_name}' is not a workflow export: expected a .json or .seer.json file")]
    UnsupportedExtension { file_name: String },

    #[error("Failed to parse workflow file: {0}")]
    JsonParse(String),

    #[error("Invalid workflow export format")]
    InvalidFormat,

    #[error("Could not read '{path}': {message}")]
    Io { path: String, message: String },
}

/// Errors that can occur while producing or writing an export bundle.
#[derive(Error, Debug, Clone)]
pub enum ExportError {
    #[error("Failed to serialize workflow export: {0}")]
    Serialize(String),

    #[error("Could not write '{path}': {message}")]
    Io { path: String, message: String },
}

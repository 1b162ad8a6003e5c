use ahash::AHashMap;
use std::collections::HashSet;

use crate::error::SpecError;
use crate::reference::{RefSyntax, Template};
use crate::spec::WorkflowSpec;

/// Checks the reference-resolution invariant over a spec: every `${...}`
/// placeholder in a node's bindings or in the top-level `output` must name a
/// declared input (`inputs.<name>`) or the `out` variable of a node that
/// textually precedes it. Forward references and cycles both fail this rule,
/// since scope grows strictly in node order.
///
/// Also rejects duplicate node ids and duplicate `out` bindings. Returns the
/// first violation found, walking nodes in order.
pub fn validate(spec: &WorkflowSpec) -> Result<(), SpecError> {
    let mut seen_ids: HashSet<&str> = HashSet::new();
    // out-variable name -> id of the node that bound it
    let mut scope: AHashMap<String, String> = AHashMap::new();

    for node in &spec.nodes {
        if !seen_ids.insert(node.id()) {
            return Err(SpecError::DuplicateNodeId {
                node_id: node.id().to_string(),
            });
        }

        for expression in node.bindings().values() {
            resolve(expression, node.id(), spec, &scope)?;
        }

        if let Some(out) = node.out() {
            if let Some(first_node_id) = scope.get(out) {
                return Err(SpecError::DuplicateBinding {
                    name: out.to_string(),
                    node_id: node.id().to_string(),
                    first_node_id: first_node_id.clone(),
                });
            }
            scope.insert(out.to_string(), node.id().to_string());
        }
    }

    resolve(&spec.output, "output", spec, &scope)
}

/// Resolves every reference in one expression against the current scope.
fn resolve(
    expression: &str,
    node_id: &str,
    spec: &WorkflowSpec,
    scope: &AHashMap<String, String>,
) -> Result<(), SpecError> {
    let template = Template::parse(expression, RefSyntax::Dollar);
    for reference in template.references() {
        let resolved = match reference.strip_prefix("inputs.") {
            Some(input_name) => spec.inputs.contains_key(input_name),
            None => scope.contains_key(reference),
        };
        if !resolved {
            return Err(SpecError::UnresolvedReference {
                node_id: node_id.to_string(),
                expression: reference.to_string(),
            });
        }
    }
    Ok(())
}

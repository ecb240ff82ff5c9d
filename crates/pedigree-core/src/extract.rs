//! Envelope detection and document loading.

use crate::{PedigreeError, PedigreeNode, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::debug;

/// The JSON envelope a node array was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Envelope {
    /// `{"original_json": {"json": [...]}}`
    OriginalJson,
    /// `[...]`
    BareArray,
    /// `{"json": [...]}`
    Json,
}

/// Locate the node array inside a parsed document.
///
/// Shapes are tried in priority order: `original_json.json`, a bare array,
/// then a top-level `json`. The array is returned verbatim.
pub fn extract_node_values(document: &Value) -> Result<(Envelope, &[Value])> {
    if let Some(inner) = document.get("original_json").and_then(|o| o.get("json")) {
        return as_node_array(inner, "original_json.json").map(|a| (Envelope::OriginalJson, a));
    }
    if let Value::Array(items) = document {
        return Ok((Envelope::BareArray, items.as_slice()));
    }
    if let Some(inner) = document.get("json") {
        return as_node_array(inner, "json").map(|a| (Envelope::Json, a));
    }
    Err(PedigreeError::MalformedInput(
        "unable to extract pedigree nodes from JSON structure".to_string(),
    ))
}

fn as_node_array<'a>(value: &'a Value, path: &str) -> Result<&'a [Value]> {
    value.as_array().map(Vec::as_slice).ok_or_else(|| {
        PedigreeError::MalformedInput(format!("`{}` is present but is not an array", path))
    })
}

/// Extract and decode the nodes of a document.
pub fn extract_nodes(document: &Value) -> Result<Vec<PedigreeNode>> {
    let (envelope, values) = extract_node_values(document)?;
    debug!(?envelope, nodes = values.len(), "extracted pedigree nodes");
    Ok(values.iter().map(PedigreeNode::from_value).collect())
}

/// Read and parse one JSON document.
pub fn load_document<P: AsRef<Path>>(path: P) -> Result<Value> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)?;
    let document = serde_json::from_str(&raw)?;
    debug!(path = %path.display(), bytes = raw.len(), "loaded pedigree document");
    Ok(document)
}

/// Read a document and extract its nodes.
pub fn load_nodes<P: AsRef<Path>>(path: P) -> Result<Vec<PedigreeNode>> {
    extract_nodes(&load_document(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_original_json_envelope() {
        let doc = json!({"original_json": {"json": [{"name": "A"}]}, "json": []});
        let (envelope, nodes) = extract_node_values(&doc).unwrap();
        assert_eq!(envelope, Envelope::OriginalJson);
        assert_eq!(nodes.len(), 1);
    }

    #[test]
    fn accepts_bare_array() {
        let doc = json!([{"name": "A"}, {"name": "B"}]);
        let (envelope, nodes) = extract_node_values(&doc).unwrap();
        assert_eq!(envelope, Envelope::BareArray);
        assert_eq!(nodes.len(), 2);
    }

    #[test]
    fn falls_back_to_top_level_json() {
        let doc = json!({"original_json": {"image": "x.png"}, "json": [{"name": "A"}]});
        let (envelope, nodes) = extract_node_values(&doc).unwrap();
        assert_eq!(envelope, Envelope::Json);
        assert_eq!(nodes[0]["name"], "A");
    }

    #[test]
    fn rejects_unknown_shapes() {
        for doc in [json!({"nodes": []}), json!("text"), json!(42), json!({"json": {"a": 1}})] {
            assert!(matches!(
                extract_node_values(&doc),
                Err(PedigreeError::MalformedInput(_))
            ));
        }
    }

    #[test]
    fn decodes_extracted_nodes() {
        let doc = json!({"json": [{"name": "A", "sex": "M"}, {"name": "B"}]});
        let nodes = extract_nodes(&doc).unwrap();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].name(), Some("A"));
    }
}

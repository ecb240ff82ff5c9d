use pedigree_core::{load_document, load_nodes, PedigreeError, Sex};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_load_nodes_from_each_envelope() {
    let dir = TempDir::new().unwrap();
    let docs = [
        ("wrapped.json", r#"{"original_json": {"json": [{"name": "A", "sex": "F"}]}}"#),
        ("bare.json", r#"[{"name": "A", "sex": "F"}]"#),
        ("json.json", r#"{"json": [{"name": "A", "sex": "F"}]}"#),
    ];
    for (file, body) in docs {
        let path = dir.path().join(file);
        fs::write(&path, body).unwrap();
        let nodes = load_nodes(&path).unwrap();
        assert_eq!(nodes.len(), 1, "{file}");
        assert_eq!(nodes[0].sex, Sex::Female);
    }
}

#[test]
fn test_malformed_and_unreadable_documents() {
    let dir = TempDir::new().unwrap();

    let wrong_shape = dir.path().join("wrong.json");
    fs::write(&wrong_shape, r#"{"nodes": []}"#).unwrap();
    assert!(matches!(load_nodes(&wrong_shape), Err(PedigreeError::MalformedInput(_))));

    let not_json = dir.path().join("broken.json");
    fs::write(&not_json, "{ nope").unwrap();
    assert!(matches!(load_document(&not_json), Err(PedigreeError::Serialization(_))));

    let missing = dir.path().join("missing.json");
    assert!(matches!(load_nodes(&missing), Err(PedigreeError::Io(_))));
}

#[test]
fn test_tolerant_node_decoding_from_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("loose.json");
    fs::write(
        &path,
        r#"[{"name": 7, "level": "2", "partners": "B", "noparents": "yes", "status": 1.0,
             "coordinates": [0, 0, 1], "center": [1, 2]}]"#,
    )
    .unwrap();
    let nodes = load_nodes(&path).unwrap();
    let node = &nodes[0];
    assert_eq!(node.name(), Some("7"));
    assert_eq!(node.level, None);
    assert!(node.partners.is_empty());
    assert!(node.noparents);
    assert!(node.is_deceased());
    assert!(node.coordinates.is_none());
    assert!(node.center.is_some());
}

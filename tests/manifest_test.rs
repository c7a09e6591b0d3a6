use glfast::error::Error;
use glfast::manifest::{Action, CommitAction, Encoding, ManifestBuilder, MaterializedFile};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_builder_rejects_duplicates() {
    let mut builder = ManifestBuilder::new();
    builder
        .insert(MaterializedFile::text("README.md", "one"))
        .unwrap();

    let result = builder.insert(MaterializedFile::text("README.md", "two"));

    assert!(matches!(
        result,
        Err(Error::PathCollision { path }) if path == "README.md"
    ));
}

#[test]
fn test_commit_actions_are_sorted() {
    let mut builder = ManifestBuilder::new();
    builder
        .insert(MaterializedFile::text("src/main.go", "package main"))
        .unwrap();
    builder
        .insert(MaterializedFile::base64("logo.png", &[0x89, 0x50, 0x4e, 0x47]))
        .unwrap();
    builder
        .insert(MaterializedFile::text("Dockerfile", "FROM scratch"))
        .unwrap();

    let actions = builder.finish().into_commit_actions();

    let paths: Vec<&str> = actions.iter().map(|a| a.file_path.as_str()).collect();
    assert_eq!(paths, vec!["Dockerfile", "logo.png", "src/main.go"]);
    assert_eq!(
        actions[1],
        CommitAction {
            action: Action::Create,
            file_path: "logo.png".to_string(),
            content: "iVBORw==".to_string(),
            encoding: Encoding::Base64,
        }
    );
}

#[test]
fn test_commit_action_wire_format() {
    let action = CommitAction {
        action: Action::Create,
        file_path: "README.md".to_string(),
        content: "hi".to_string(),
        encoding: Encoding::Text,
    };

    let json = serde_json::to_value(&action).unwrap();

    assert_eq!(
        json,
        serde_json::json!({
            "action": "create",
            "file_path": "README.md",
            "content": "hi",
            "encoding": "text"
        })
    );
}

#[test]
fn test_commit_request() {
    let mut builder = ManifestBuilder::new();
    builder
        .insert(MaterializedFile::text("a.txt", "a"))
        .unwrap();

    let request = builder
        .finish()
        .into_commit_request("master", "Initial commit");

    assert_eq!(request.branch, "master");
    assert_eq!(request.commit_message, "Initial commit");
    assert_eq!(request.actions.len(), 1);
}

#[test]
fn test_write_to_decodes_base64() {
    let mut builder = ManifestBuilder::new();
    builder
        .insert(MaterializedFile::base64("bin/blob", &[0, 1, 2, 255]))
        .unwrap();
    builder
        .insert(MaterializedFile::text("docs/readme.txt", "text"))
        .unwrap();
    let manifest = builder.finish();
    let temp_dir = TempDir::new().unwrap();

    manifest.write_to(temp_dir.path()).unwrap();

    assert_eq!(
        fs::read(temp_dir.path().join("bin/blob")).unwrap(),
        vec![0, 1, 2, 255]
    );
    assert_eq!(
        fs::read_to_string(temp_dir.path().join("docs/readme.txt")).unwrap(),
        "text"
    );
}

#[test]
fn test_manifest_iterates_in_path_order() {
    let mut builder = ManifestBuilder::new();
    builder.insert(MaterializedFile::text("b", "")).unwrap();
    builder.insert(MaterializedFile::text("a", "")).unwrap();

    let files: Vec<MaterializedFile> = builder.finish().into_iter().collect();

    assert_eq!(files[0].repository_path, "a");
    assert_eq!(files[1].repository_path, "b");
}

#[test]
fn test_decoded_rejects_invalid_base64() {
    let file = MaterializedFile {
        repository_path: "assets/logo.png".to_string(),
        content: "not base64!".to_string(),
        encoding: Encoding::Base64,
    };

    match file.decoded() {
        Err(Error::DecodeError { path, .. }) => assert_eq!(path, "assets/logo.png"),
        other => panic!("Expected DecodeError, got {other:?}"),
    }
}

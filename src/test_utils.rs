//! Shared test utilities for comyaml.
//!
//! Only compiled for test builds.

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use crate::config::Settings;

/// Settings pointing at the default registry location. Named to make test
/// call sites read well.
pub fn registry_settings() -> Settings {
    Settings::default()
}

/// Creates a temporary workspace with a registry file and component
/// modules, laid out the way a real project is:
///
/// ```text
/// root/
/// └── src/rooms/schema/
///     ├── LoadClasses.ts        <- `registry_text`
///     └── components/…          <- `modules`, paths relative to schema/
/// ```
///
/// Returns (TempDir, workspace root). Keep the TempDir alive for the test
/// duration or the files disappear underneath the build.
pub fn write_project(registry_text: &str, modules: &[(&str, &str)]) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let root = temp_dir.path().to_path_buf();

    let schema_dir = root.join("src/rooms/schema");
    fs::create_dir_all(&schema_dir).expect("Failed to create schema directory");
    fs::write(schema_dir.join("LoadClasses.ts"), registry_text)
        .expect("Failed to write registry file");

    for (rel_path, text) in modules {
        let path = schema_dir.join(rel_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create module directory");
        }
        fs::write(&path, text).expect("Failed to write module file");
    }

    (temp_dir, root)
}

/// Splits a document into owned lines, the shape the classifier and the
/// query facade consume.
pub fn doc_lines(text: &str) -> Vec<String> {
    text.lines().map(String::from).collect()
}

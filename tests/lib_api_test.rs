//! Integration tests for the comyaml library public API.
//!
//! Exercises the whole pipeline the way the binary does: write a project to
//! disk, build the index, then run every query surface against it.

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use tower_lsp::lsp_types::{
    CompletionParams, CompletionResponse, HoverContents, HoverParams, PartialResultParams,
    Position, TextDocumentIdentifier, TextDocumentPositionParams, Url, WorkDoneProgressParams,
};

use comyaml::completion::get_completions;
use comyaml::config::Settings;
use comyaml::gotodef::goto_definition;
use comyaml::hover::hover;
use comyaml::registry::ComponentIndex;

/// Helper: write a project with the default registry layout.
///
/// Returns (TempDir, workspace root) - keep TempDir alive for test duration.
fn create_test_project() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let root = temp_dir.path().to_path_buf();
    let schema_dir = root.join("src/rooms/schema");
    fs::create_dir_all(schema_dir.join("components")).expect("Failed to create project layout");

    fs::write(
        schema_dir.join("LoadClasses.ts"),
        concat!(
            "import Health = require(\"./components/health\");\n",
            "import Velocity = require(\"./components/velocity\");\n",
        ),
    )
    .unwrap();
    fs::write(
        schema_dir.join("components/health.ts"),
        concat!(
            "@Register(\"Health\")\n",
            "/** Tracks hit points for an entity. */\n",
            "export class Health {\n",
            "    @type(\"number\")\n",
            "    hp: number = 100;\n",
            "}\n",
        ),
    )
    .unwrap();
    fs::write(
        schema_dir.join("components/velocity.ts"),
        "@Register(\"Velocity\")\nexport class Velocity {}\n",
    )
    .unwrap();

    (temp_dir, root)
}

fn doc_lines(text: &str) -> Vec<String> {
    text.lines().map(String::from).collect()
}

fn position_params(line: u32, character: u32) -> TextDocumentPositionParams {
    TextDocumentPositionParams {
        text_document: TextDocumentIdentifier {
            uri: Url::parse("file:///scene.yaml").unwrap(),
        },
        position: Position { line, character },
    }
}

#[tokio::test]
async fn test_full_pipeline_from_external_crate() {
    let (_temp_dir, root) = create_test_project();
    let settings = Settings::default();

    let index = ComponentIndex::build(&settings, &root)
        .await
        .expect("Index build should succeed");
    assert_eq!(index.len(), 2);

    let scene = doc_lines("components:\n  - type: Health\n    hp: 50\n  - type: \n");

    // Completion on the open item line offers both components.
    let completion_params = CompletionParams {
        text_document_position: position_params(3, 10),
        work_done_progress_params: WorkDoneProgressParams::default(),
        partial_result_params: PartialResultParams::default(),
        context: None,
    };
    let response = get_completions(&index, &completion_params, &scene, &settings)
        .expect("Should offer completions inside the components block");
    let count = match response {
        CompletionResponse::List(list) => list.items.len(),
        CompletionResponse::Array(items) => items.len(),
    };
    assert_eq!(count, 2);

    // Hover on the Health item shows its doc block.
    let hover_params = HoverParams {
        text_document_position_params: position_params(1, 12),
        work_done_progress_params: WorkDoneProgressParams::default(),
    };
    let hover_result =
        hover(&index, &hover_params, &scene, &settings).expect("Should hover on the item line");
    match hover_result.contents {
        HoverContents::Markup(markup) => {
            assert_eq!(markup.value, "Tracks hit points for an entity.")
        }
        other => panic!("Expected markup hover contents, got {other:?}"),
    }

    // Definition on the same line lands at the top of health.ts.
    let location = goto_definition(
        &index,
        Position {
            line: 1,
            character: 12,
        },
        &scene,
    )
    .expect("Should locate the declaring module");
    let expected =
        Url::from_file_path(root.join("src/rooms/schema/components/health.ts")).unwrap();
    assert_eq!(location.uri, expected);
    assert_eq!(location.range.start, Position { line: 0, character: 0 });
}

/// Rebuilding after the registry file disappears must not preserve the old
/// snapshot: the build errors out and the caller installs an empty index.
#[tokio::test]
async fn test_rebuild_after_registry_removal_is_lossy() {
    let (_temp_dir, root) = create_test_project();
    let settings = Settings::default();

    let first = ComponentIndex::build(&settings, &root).await.unwrap();
    assert!(!first.is_empty());

    fs::remove_file(settings.registry_path(&root)).unwrap();

    let second = ComponentIndex::build(&settings, &root).await;
    assert!(second.is_err(), "Missing registry must fail the build");
}

#[test]
fn test_settings_struct_accessible() {
    let settings = Settings::default();

    assert_eq!(settings.load_classes_path, "./src/rooms/schema/LoadClasses.ts");
    assert!(settings.hover);
    assert!(settings.field_completions);
}

#[test]
fn test_classifier_module_accessible() {
    use comyaml::classifier::{governing_component_name, is_within_components_block};

    let lines = doc_lines("components:\n  - type: Foo\n    hp: 1\n");
    assert!(is_within_components_block(&lines, 1));
    assert_eq!(
        governing_component_name(&lines, 2),
        Some("Foo".to_string())
    );
}

use std::io::Write;
use tokens_core::export::{self, Platform};
use tokens_core::{
    build_token_tree, AliasMode, ExportOptions, JsonFileSource, SnapshotSource, StyleDictionary, TokenError,
    TokenTree, TokenValue,
};
use tokens_data::model::VariableSnapshot;

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../tokens-data/tests/design_system.json");

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

fn snapshot() -> VariableSnapshot {
    let text = std::fs::read_to_string(FIXTURE).expect("fixture");
    serde_json::from_str(&text).expect("valid snapshot")
}

fn full_tree() -> TokenTree {
    build_token_tree(&snapshot(), &ExportOptions::default())
}

#[test]
fn tree_roots_follow_snapshot_order() {
    init_tracing();
    let tree = full_tree();
    let roots: Vec<&str> = tree.roots().map(|(k, _)| k.as_str()).collect();
    assert_eq!(
        roots,
        ["Primitives/Default", "Semantic/Light", "Semantic/Dark", "Spacing/Base", "Overlay", "Heading"]
    );
}

#[test]
fn literals_and_aliases_resolve() {
    let tree = full_tree();
    let red = tree.token(&["Primitives/Default", "Palette", "Red", "500"]).unwrap();
    assert_eq!(red.value.to_string(), "#ff0000");
    assert_eq!(red.description.as_deref(), Some("Base red"));

    let overlay = tree.token(&["Primitives/Default", "Palette", "Black", "Overlay"]).unwrap();
    assert_eq!(overlay.value.to_string(), "#00000080");

    let large = tree.token(&["Spacing/Base", "Spacing", "Large"]).unwrap();
    assert_eq!(large.value, TokenValue::Number(8.0));

    let dark = tree.token(&["Semantic/Dark", "Surface", "Background"]).unwrap();
    assert_eq!(dark.value.to_string(), "#121212");
}

#[test]
fn cross_collection_aliases_become_placeholders() {
    // Semantic modes have no counterpart in Primitives.
    let tree = full_tree();
    let light = tree.token(&["Semantic/Light", "Brand", "Primary"]).unwrap();
    assert_eq!(light.value, TokenValue::Alias("Palette.Red.500".into()));
    assert_eq!(light.description.as_deref(), Some("Primary brand color"));
    let dark = tree.token(&["Semantic/Dark", "Brand", "Primary"]).unwrap();
    assert_eq!(dark.value.to_string(), "{Palette.Blue.500}");
}

#[test]
fn reference_mode_keeps_every_alias() {
    let options = ExportOptions {
        alias_mode: AliasMode::Reference,
        ..Default::default()
    };
    let tree = build_token_tree(&snapshot(), &options);
    let large = tree.token(&["Spacing/Base", "Spacing", "Large"]).unwrap();
    assert_eq!(large.value, TokenValue::Alias("Spacing.Base".into()));
}

#[test]
fn styles_are_merged_below_variables() {
    let tree = full_tree();
    assert!(tree.get(&["Brand"]).is_none());
    assert!(tree.get(&["Gradient"]).is_none());
    assert!(tree.get(&["Body"]).is_none());
    assert_eq!(tree.token(&["Overlay", "Scrim"]).unwrap().value.to_string(), "#00000080");
    assert_eq!(tree.token(&["Heading", "H1"]).unwrap().value, TokenValue::Number(32.0));
    assert_eq!(
        tree.token(&["Heading", "H1 line-height"]).unwrap().value,
        TokenValue::Number(40.0)
    );
}

#[test]
fn export_is_idempotent() {
    let first = full_tree().to_json_pretty().unwrap();
    let second = full_tree().to_json_pretty().unwrap();
    assert_eq!(first, second);
}

#[test]
fn flat_table_and_formatters_agree() {
    let tree = full_tree();
    let table = StyleDictionary::from_tree(&tree);
    let base = table.get("spacing-base", "spacing-base").unwrap();
    assert_eq!(base.sd_type(), "dimension");

    let css = export::render(Platform::Css, &tree).unwrap();
    assert!(css.contains("  --spacing-base-spacing-large: 8px;\n"));
    assert!(css.contains("  --semantic-light-brand-primary: {Palette.Red.500};\n"));

    let kotlin = export::render(Platform::Android, &tree).unwrap();
    assert!(kotlin.contains("val primitivesDefaultPaletteRed500 = Color(0xFFFF0000)"));
    assert!(kotlin.contains("semanticLightBrandPrimary = \"{Palette.Red.500}\" // unresolved"));

    let tailwind = export::render(Platform::Tailwind, &tree).unwrap();
    assert!(tailwind.contains("'spacing-base-font-family': ['Inter'],"));
}

#[test]
fn single_segment_style_names_reach_every_formatter() {
    let snapshot: VariableSnapshot = serde_json::from_value(serde_json::json!({
        "paintStyles": [{ "id": "s", "name": "Primary",
                          "paints": [{ "type": "SOLID", "color": { "r": 1, "g": 0, "b": 0 } }] }]
    }))
    .unwrap();
    let tree = build_token_tree(&snapshot, &ExportOptions::default());
    assert_eq!(tree.token(&["Primary"]).unwrap().value.to_string(), "#ff0000");

    let css = export::render(Platform::Css, &tree).unwrap();
    assert_eq!(css, ":root {\n  --styles-primary: #ff0000;\n}\n");

    let js = export::render(Platform::Js, &tree).unwrap();
    assert!(js.contains("  'styles': {\n    'primary': '#ff0000',\n  },\n"));

    let tailwind = export::render(Platform::Tailwind, &tree).unwrap();
    assert!(tailwind.contains("'primary': '#ff0000',"));
}

#[test]
fn dtcg_output_re_imports_to_the_same_tree() {
    let tree = full_tree();
    let json: serde_json::Value = serde_json::from_str(&export::render(Platform::Dtcg, &tree).unwrap()).unwrap();
    let reimported = TokenTree::from_json(&json).unwrap();
    assert_eq!(reimported.to_json_pretty().unwrap(), tree.to_json_pretty().unwrap());
}

#[tokio::test]
async fn file_source_reads_a_snapshot() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(std::fs::read(FIXTURE).unwrap().as_slice()).unwrap();

    let snapshot = JsonFileSource::new(file.path()).fetch().await.unwrap();
    assert_eq!(snapshot.variables.len(), 9);
    assert_eq!(snapshot.collections.len(), 3);
}

#[tokio::test]
async fn file_source_reports_missing_files_as_transport_errors() {
    let dir = tempfile::tempdir().unwrap();
    let result = JsonFileSource::new(dir.path().join("missing.json")).fetch().await;
    assert!(matches!(result, Err(TokenError::Transport(_))));
}

#[tokio::test]
async fn file_source_rejects_malformed_json() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"{ not json").unwrap();
    let result = JsonFileSource::new(file.path()).fetch().await;
    assert!(matches!(result, Err(TokenError::Serialization(_))));
}

use std::fs;

use bodymap::commands::{
    generate_command, inspect_blocks, load_generator_config, lookup_command, near_matches,
    names_command,
};
use bodymap_core::config::GeneratorConfig;
use bodymap_core::labeling::Side;
use tempfile::tempdir;

const ASSETS: &str = include_str!("../../core/tests/fixtures/temp_Assets.ts");

#[test]
fn near_matches_ignore_side_letters() {
    let ids = ["upper_back_r", "upper_back_l", "lower_back_l", "back_upper", "head"];
    assert_eq!(
        near_matches(ids, "upper_back_x"),
        vec!["back_upper".to_string(), "upper_back_l".to_string(), "upper_back_r".to_string()]
    );
    assert!(near_matches(ids, "l").is_empty());
    assert!(!near_matches(ids, "upper_back_l").contains(&"upper_back_l".to_string()));
}

#[test]
fn inspect_blocks_reports_sides_and_errors() {
    let src = ASSETS.replace("'44 34 49 34 49 50 44 50'", "'44 34 x 34'");
    let blocks = inspect_blocks(&src, &GeneratorConfig::default());
    assert_eq!(blocks.len(), 2);

    let head = &blocks[0].entries[0];
    assert_eq!(head.key, "head");
    assert_eq!(head.polygons[0].side, Some(Side::Central));
    assert_eq!(blocks[1].entries[0].polygons[0].side, Some(Side::CentralBack));

    let abs = blocks[0].entries.iter().find(|e| e.key == "abs").unwrap();
    assert!(abs.polygons[0].error.as_deref().unwrap().contains("`x`"));
    assert_eq!(abs.polygons[1].side, Some(Side::Left));
}

#[test]
fn inspect_blocks_marks_missing_block() {
    let blocks = inspect_blocks("const anteriorData = [];", &GeneratorConfig::default());
    assert!(blocks[0].error.is_none());
    assert!(blocks[0].entries.is_empty());
    assert!(blocks[1].error.as_deref().unwrap().contains("posteriorData"));
}

#[test]
fn generate_command_rejects_unknown_format() {
    let temp = tempdir().unwrap();
    let root = temp.path().to_string_lossy().to_string();
    fs::write(temp.path().join("temp_Assets.ts"), ASSETS).unwrap();
    let err =
        generate_command(&root, "temp_Assets.ts", "out.ts", None, "xml", false, false).unwrap_err();
    assert!(err.to_string().contains("Invalid format 'xml'"), "unexpected error: {err}");
    assert!(!temp.path().join("out.ts").exists());
}

#[test]
fn generate_command_then_lookup() {
    let temp = tempdir().unwrap();
    let root = temp.path().to_string_lossy().to_string();
    fs::write(temp.path().join("temp_Assets.ts"), ASSETS).unwrap();
    generate_command(&root, "temp_Assets.ts", "table.ts", None, "ts", false, false).unwrap();

    lookup_command(&root, "table.ts", "BODY_PATHS", "head", false).unwrap();
    let err = lookup_command(&root, "table.ts", "BODY_PATHS", "upper_back_l", true).unwrap_err();
    assert!(err.to_string().contains("Id 'upper_back_l' not found"));
    let err = lookup_command(&root, "table.ts", "PATHS", "head", false).unwrap_err();
    assert!(err.to_string().contains("Block `PATHS` not found"));
}

#[test]
fn config_errors_surface_from_commands() {
    let temp = tempdir().unwrap();
    let root = temp.path().to_string_lossy().to_string();
    fs::write(temp.path().join("cfg.json"), "not-json").unwrap();
    let err = names_command(&root, Some("cfg.json"), false).unwrap_err();
    assert!(format!("{err:#}").contains("Failed to parse config JSON"));

    let missing = load_generator_config(temp.path(), Some("absent.yaml")).unwrap_err();
    assert!(missing.to_string().contains("Failed to read config"));
}

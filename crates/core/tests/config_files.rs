use std::fs;

use bodymap_core::config::{load_config, BlockConfig, GeneratorConfig};
use bodymap_core::model::View;
use bodymap_core::pipeline::generate;
use tempfile::tempdir;

#[test]
fn json_config_round_trips_through_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bodymap.json");
    let mut config = GeneratorConfig::default();
    config.names.insert("newmuscle".into(), "新肌群".into());
    fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();

    let loaded = load_config(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn yaml_config_drives_the_pipeline() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bodymap.yaml");
    fs::write(
        &path,
        "blocks:\n  - name: front\n    view: front\nfields:\n  key: region\n  polygons: outline\nnames:\n  knees: Knee\nleft_marker: 'Left '\nright_marker: 'Right '\n",
    )
    .unwrap();
    let config = load_config(&path).unwrap();
    assert_eq!(config.blocks, vec![BlockConfig::new("front", View::Front)]);

    let src = "const front = [ { region: 'KNEES', outline: ['30 0 32 0', '70 0 72 0'] } ];";
    let generation = generate(src, &config).unwrap();
    let names: Vec<_> = generation.records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Right Knee", "Left Knee"]);
}

#[test]
fn invalid_config_names_the_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.yml");
    fs::write(&path, "blocks: 7\n").unwrap();
    let err = load_config(&path).unwrap_err();
    assert!(format!("{err:#}").contains("broken.yml"));
}

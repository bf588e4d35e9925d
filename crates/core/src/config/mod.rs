//! Generator configuration.
//!
//! Every field has a default matching the authored asset file and the table
//! the frontend imports, so an absent config file means "the usual run".
//! Config files may be JSON or YAML.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use crate::extract::EntryFields;
use crate::labeling::names::{NameTable, DEFAULT_LEFT_MARKER, DEFAULT_RIGHT_MARKER};
use crate::model::View;

/// A named source block and the view its entries belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockConfig {
    pub name: String,
    pub view: View,
}

impl BlockConfig {
    pub fn new(name: impl Into<String>, view: View) -> Self {
        Self { name: name.into(), view }
    }
}

/// Field names read from each authored entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldsConfig {
    pub key: String,
    pub polygons: String,
}

impl Default for FieldsConfig {
    fn default() -> Self {
        let fields = EntryFields::default();
        Self { key: fields.key, polygons: fields.polygons }
    }
}

/// Names used in the emitted TypeScript module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub interface_name: String,
    pub const_name: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { interface_name: "BodyPartPath".to_string(), const_name: "BODY_PATHS".to_string() }
    }
}

/// Serializable configuration for one generator run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Config format version, not the tool version.
    pub config_version: String,
    /// Blocks to extract, in output order.
    pub blocks: Vec<BlockConfig>,
    pub fields: FieldsConfig,
    /// Extra or replacement localized names, layered over the built-in table.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub names: BTreeMap<String, String>,
    pub left_marker: String,
    pub right_marker: String,
    pub output: OutputConfig,
    /// Keep colliding ids instead of failing the run.
    pub allow_duplicate_ids: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            config_version: "0.1.0".to_string(),
            blocks: vec![
                BlockConfig::new("anteriorData", View::Front),
                BlockConfig::new("posteriorData", View::Back),
            ],
            fields: FieldsConfig::default(),
            names: BTreeMap::new(),
            left_marker: DEFAULT_LEFT_MARKER.to_string(),
            right_marker: DEFAULT_RIGHT_MARKER.to_string(),
            output: OutputConfig::default(),
            allow_duplicate_ids: false,
        }
    }
}

impl GeneratorConfig {
    /// Built-in names with this config's overrides and markers applied.
    ///
    /// Override keys are normalized the way entry keys are (trimmed,
    /// lowercased), so `Chest` overrides `chest`.
    pub fn name_table(&self) -> NameTable {
        let defaults = NameTable::default();
        let base = defaults.iter().map(|(k, v)| (k.to_string(), v.to_string()));
        let overrides = self.names.iter().map(|(k, v)| (k.trim().to_lowercase(), v.clone()));
        NameTable::new(&self.left_marker, &self.right_marker)
            .with_overrides(base)
            .with_overrides(overrides)
    }

    pub fn entry_fields(&self) -> EntryFields {
        EntryFields { key: self.fields.key.clone(), polygons: self.fields.polygons.clone() }
    }

    /// Parse a config body; `format` is a file extension (`json`, `yaml`, `yml`).
    pub fn from_str_with_format(body: &str, format: &str) -> Result<Self> {
        let config: GeneratorConfig = match format {
            "json" => serde_json::from_str(body).context("Failed to parse config JSON")?,
            "yaml" | "yml" => serde_yaml::from_str(body).context("Failed to parse config YAML")?,
            other => {
                return Err(anyhow!(
                    "Unsupported config format '{}'. Allowed: json, yaml, yml",
                    other
                ))
            }
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject configs the pipeline cannot run meaningfully.
    pub fn validate(&self) -> Result<()> {
        if self.blocks.is_empty() {
            return Err(anyhow!("Config must name at least one block"));
        }
        for block in &self.blocks {
            if block.name.trim().is_empty() {
                return Err(anyhow!("Block names are required"));
            }
        }
        if self.fields.key.is_empty() || self.fields.polygons.is_empty() {
            return Err(anyhow!("Entry field names are required"));
        }
        if self.output.const_name.is_empty() || self.output.interface_name.is_empty() {
            return Err(anyhow!("Output interface and const names are required"));
        }
        Ok(())
    }
}

/// Load a generator config from disk, picking the format from the extension.
pub fn load_config(path: &Path) -> Result<GeneratorConfig> {
    let body = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config at {}", path.display()))?;
    let format = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
    GeneratorConfig::from_str_with_format(&body, format)
        .with_context(|| format!("Invalid config at {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_is_the_default_config() {
        let config = GeneratorConfig::from_str_with_format("{}", "json").unwrap();
        assert_eq!(config, GeneratorConfig::default());
        assert_eq!(config.blocks[0], BlockConfig::new("anteriorData", View::Front));
    }

    #[test]
    fn yaml_overrides_selected_fields() {
        let body = "
blocks:
  - name: backData
    view: back
names:
  chest: Chest
left_marker: 'L-'
";
        let config = GeneratorConfig::from_str_with_format(body, "yaml").unwrap();
        assert_eq!(config.blocks, vec![BlockConfig::new("backData", View::Back)]);
        assert_eq!(config.right_marker, "右");
        let table = config.name_table();
        assert_eq!(table.resolve("chest"), "Chest");
        assert_eq!(table.resolve("neck"), "頸部");
        assert_eq!(table.left_marker(), "L-");
    }

    #[test]
    fn override_keys_match_lowercased_entry_keys() {
        let body = r#"{"names": {"Chest": "Pecs", " NEWMUSCLE ": "New"}}"#;
        let table = GeneratorConfig::from_str_with_format(body, "json").unwrap().name_table();
        assert_eq!(table.get("chest"), Some("Pecs"));
        assert_eq!(table.get("newmuscle"), Some("New"));
        assert_eq!(table.get("Chest"), None);
    }

    #[test]
    fn rejects_unknown_format_and_empty_blocks() {
        let err = GeneratorConfig::from_str_with_format("{}", "toml").unwrap_err();
        assert!(err.to_string().contains("Unsupported config format"));
        let err = GeneratorConfig::from_str_with_format(r#"{"blocks": []}"#, "json").unwrap_err();
        assert!(err.to_string().contains("at least one block"));
    }

    #[test]
    fn rejects_unknown_view() {
        let err =
            GeneratorConfig::from_str_with_format(r#"{"blocks": [{"name": "a", "view": "side"}]}"#, "json")
                .unwrap_err();
        assert!(err.to_string().contains("Failed to parse config JSON"));
    }

    #[test]
    fn load_config_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(&dir.path().join("bodymap.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config"));
    }
}

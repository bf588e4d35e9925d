use anyhow::{Context, Result};
use serde::Serialize;

use crate::canonicalize_or_current;
use crate::commands::load_generator_config;

#[derive(Debug, Serialize)]
pub struct NameEntry {
    pub key: String,
    pub name: String,
}

/// Print the effective localized name table (built-in plus config overrides).
pub fn names_command(root: &str, config: Option<&str>, json: bool) -> Result<()> {
    let root_path = canonicalize_or_current(root)?;
    let config = load_generator_config(&root_path, config)?;
    let table = config.name_table();

    let entries: Vec<NameEntry> = table
        .iter()
        .map(|(key, name)| NameEntry { key: key.to_string(), name: name.to_string() })
        .collect();

    if json {
        let serialized = serde_json::to_string_pretty(&entries)
            .context("Failed to serialize names to JSON")?;
        println!("{}", serialized);
        return Ok(());
    }

    println!("Names ({}):", entries.len());
    println!("  Left marker: {}", table.left_marker());
    println!("  Right marker: {}", table.right_marker());
    for entry in entries {
        println!("  - {}: {}", entry.key, entry.name);
    }

    Ok(())
}

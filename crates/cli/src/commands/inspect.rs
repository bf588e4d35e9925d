use anyhow::{Context, Result};
use bodymap_core::config::GeneratorConfig;
use bodymap_core::extract::{Document, SkippedEntry};
use bodymap_core::labeling::{centroid_x, side_for, Side};
use bodymap_core::model::View;
use serde::Serialize;

use crate::commands::{load_generator_config, read_text};
use crate::{canonicalize_or_current, resolve_under};

#[derive(Debug, Serialize)]
pub struct InspectBlock {
    pub name: String,
    pub view: View,
    /// Set when the block was missing or could not be delimited.
    pub error: Option<String>,
    pub entries: Vec<InspectEntry>,
    pub skipped: Vec<SkippedEntry>,
}

#[derive(Debug, Serialize)]
pub struct InspectEntry {
    pub key: String,
    pub polygons: Vec<InspectPolygon>,
}

#[derive(Debug, Serialize)]
pub struct InspectPolygon {
    pub centroid_x: Option<f64>,
    pub side: Option<Side>,
    pub error: Option<String>,
}

/// Extract every configured block and compute centroids/sides without
/// producing a table. Malformed polygons are shown, not fatal.
pub fn inspect_blocks(source: &str, config: &GeneratorConfig) -> Vec<InspectBlock> {
    let document = Document::parse(source);
    let fields = config.entry_fields();
    config
        .blocks
        .iter()
        .map(|block| match document.extract_block(&block.name, block.view, &fields) {
            Ok(extraction) => InspectBlock {
                name: block.name.clone(),
                view: block.view,
                error: None,
                entries: extraction
                    .block
                    .entries
                    .iter()
                    .map(|entry| {
                        let single = entry.polygons.len() == 1;
                        let polygons = entry
                            .polygons
                            .iter()
                            .map(|points| match centroid_x(points) {
                                Ok(x) => InspectPolygon {
                                    centroid_x: Some(x),
                                    side: Some(side_for(&entry.key, block.view, x, single)),
                                    error: None,
                                },
                                Err(err) => InspectPolygon {
                                    centroid_x: None,
                                    side: None,
                                    error: Some(err.to_string()),
                                },
                            })
                            .collect();
                        InspectEntry { key: entry.key.clone(), polygons }
                    })
                    .collect(),
                skipped: extraction.skipped,
            },
            Err(err) => InspectBlock {
                name: block.name.clone(),
                view: block.view,
                error: Some(err.to_string()),
                entries: Vec::new(),
                skipped: Vec::new(),
            },
        })
        .collect()
}

/// Print what the extractor sees in the input file.
pub fn inspect_command(root: &str, input: &str, config: Option<&str>, json: bool) -> Result<()> {
    let root_path = canonicalize_or_current(root)?;
    let config = load_generator_config(&root_path, config)?;
    let input_path = resolve_under(&root_path, input);
    let source = read_text(&input_path, "input")?;

    let blocks = inspect_blocks(&source, &config);

    if json {
        let serialized = serde_json::to_string_pretty(&blocks)
            .context("Failed to serialize inspection to JSON")?;
        println!("{}", serialized);
        return Ok(());
    }

    for block in blocks {
        println!("Block {} ({}):", block.name, block.view);
        if let Some(err) = block.error {
            println!("  (error) {}", err);
            continue;
        }
        if block.entries.is_empty() {
            println!("  (none)");
        }
        for entry in &block.entries {
            println!("  - {} [{} polygons]", entry.key, entry.polygons.len());
            for (i, polygon) in entry.polygons.iter().enumerate() {
                match (&polygon.centroid_x, &polygon.side, &polygon.error) {
                    (Some(x), Some(side), _) => {
                        println!("      #{}: x={:.2} side='{}'", i, x, side.suffix())
                    }
                    (_, _, Some(err)) => println!("      #{}: {}", i, err),
                    _ => println!("      #{}: -", i),
                }
            }
        }
        for skipped in &block.skipped {
            println!("  skipped #{} at {}: {}", skipped.index, skipped.location, skipped.reason);
        }
    }

    Ok(())
}

use anyhow::{anyhow, Context, Result};
use bodymap_core::emit::{render, TableFormat};
use bodymap_core::pipeline::{generate, BlockStatus, BuildReport};
use serde::Serialize;

use crate::commands::{load_generator_config, read_text};
use crate::{canonicalize_or_current, resolve_under, sha256_bytes, write_atomic};

/// What `generate --json` prints.
#[derive(Debug, Serialize)]
pub struct GenerateSummary {
    pub input: String,
    pub output: String,
    pub format: TableFormat,
    pub sha256: String,
    pub report: BuildReport,
}

/// Convert the authored asset file into the path table.
///
/// The whole table is rendered in memory first; nothing is written when
/// extraction or labeling fails.
pub fn generate_command(
    root: &str,
    input: &str,
    output: &str,
    config: Option<&str>,
    format: &str,
    allow_duplicate_ids: bool,
    json: bool,
) -> Result<()> {
    let root_path = canonicalize_or_current(root)?;
    let mut config = load_generator_config(&root_path, config)?;
    if allow_duplicate_ids {
        config.allow_duplicate_ids = true;
    }
    let format: TableFormat = format.parse().map_err(|e: String| anyhow!(e))?;

    let input_path = resolve_under(&root_path, input);
    let output_path = resolve_under(&root_path, output);
    let source = read_text(&input_path, "input")?;

    let generation = generate(&source, &config)
        .with_context(|| format!("Failed to generate paths from {}", input_path.display()))?;
    let body = render(&generation.records, format, &config.output)
        .context("Failed to serialize records to JSON")?;
    write_atomic(&output_path, body.as_bytes())?;
    let sha256 = sha256_bytes(body.as_bytes());

    if json {
        let summary = GenerateSummary {
            input: input_path.display().to_string(),
            output: output_path.display().to_string(),
            format,
            sha256,
            report: generation.report,
        };
        let serialized = serde_json::to_string_pretty(&summary)
            .context("Failed to serialize generate summary to JSON")?;
        println!("{}", serialized);
        return Ok(());
    }

    for block in &generation.report.blocks {
        match block.status {
            BlockStatus::Found => println!(
                "  {} ({}): {} entries, {} records, {} skipped",
                block.name,
                block.view,
                block.entries,
                block.records,
                block.skipped.len()
            ),
            BlockStatus::Missing => println!("  {} ({}): not found", block.name, block.view),
            BlockStatus::Undelimited => {
                println!("  {} ({}): could not be delimited", block.name, block.view)
            }
        }
    }
    if !generation.report.duplicate_ids.is_empty() {
        println!("  Duplicate ids: {}", generation.report.duplicate_ids.join(", "));
    }
    println!("  Output: {}", output_path.display());
    println!("  SHA-256: {}", sha256);
    println!("Generated {} paths.", generation.report.total_records);

    Ok(())
}

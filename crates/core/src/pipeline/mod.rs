//! End-to-end conversion from authored source text to ordered records.
//!
//! Blocks are processed in configured order, entries in source order and
//! polygons in entry order; the output sequence keeps exactly that order.
//! Missing blocks and skipped entries are reported, never fatal. Malformed
//! polygons and (unless allowed) duplicate ids abort the whole run before
//! anything is returned, so callers never hold a partial table.

use std::collections::HashMap;
use std::fmt;

use log::{info, warn};
use serde::Serialize;
use thiserror::Error;

use crate::config::GeneratorConfig;
use crate::extract::{Document, ExtractError, SkippedEntry};
use crate::labeling::{LabelError, Labeler};
use crate::model::{OutputRecord, View};

/// Where a record came from, for collision messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordOrigin {
    pub block: String,
    pub key: String,
    /// Zero-based position among the block's extracted entries.
    pub entry: usize,
    pub polygon: usize,
}

impl fmt::Display for RecordOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "block `{}` entry #{} (`{}`) polygon #{}",
            self.block, self.entry, self.key, self.polygon
        )
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum PipelineError {
    #[error(transparent)]
    Label(#[from] LabelError),

    #[error(
        "Duplicate id `{id}`: produced by {first} and {second} \
         (set allow_duplicate_ids or pass --allow-duplicate-ids to keep both)"
    )]
    DuplicateId { id: String, first: RecordOrigin, second: RecordOrigin },
}

/// How a configured block fared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockStatus {
    Found,
    Missing,
    Undelimited,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockReport {
    pub name: String,
    pub view: View,
    pub status: BlockStatus,
    pub entries: usize,
    pub records: usize,
    pub skipped: Vec<SkippedEntry>,
}

/// Summary of a run, suitable for printing or JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    pub blocks: Vec<BlockReport>,
    pub total_records: usize,
    /// Ids emitted more than once (only non-empty when duplicates are allowed).
    pub duplicate_ids: Vec<String>,
}

/// Records in canonical order plus the run report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    pub records: Vec<OutputRecord>,
    pub report: BuildReport,
}

/// Run extraction and labeling over `source` as configured.
pub fn generate(source: &str, config: &GeneratorConfig) -> Result<Generation, PipelineError> {
    let document = Document::parse(source);
    let names = config.name_table();
    let labeler = Labeler::new(&names);
    let fields = config.entry_fields();

    let mut records = Vec::new();
    let mut origins = Vec::new();
    let mut blocks = Vec::new();

    for block in &config.blocks {
        let extraction = match document.extract_block(&block.name, block.view, &fields) {
            Ok(extraction) => extraction,
            Err(err) => {
                warn!("{}; no {} records from it", err, block.view);
                let status = match err {
                    ExtractError::BlockNotFound { .. } => BlockStatus::Missing,
                    ExtractError::UndelimitedBlock { .. } => BlockStatus::Undelimited,
                };
                blocks.push(BlockReport {
                    name: block.name.clone(),
                    view: block.view,
                    status,
                    entries: 0,
                    records: 0,
                    skipped: Vec::new(),
                });
                continue;
            }
        };

        for skipped in &extraction.skipped {
            warn!(
                "Skipping element #{} of `{}` at {}: {}",
                skipped.index, block.name, skipped.location, skipped.reason
            );
        }

        let before = records.len();
        for (entry_index, entry) in extraction.block.entries.iter().enumerate() {
            let labeled = labeler.label_entry(entry, block.view)?;
            origins.extend((0..labeled.len()).map(|polygon| RecordOrigin {
                block: block.name.clone(),
                key: entry.key.clone(),
                entry: entry_index,
                polygon,
            }));
            records.extend(labeled);
        }

        blocks.push(BlockReport {
            name: block.name.clone(),
            view: block.view,
            status: BlockStatus::Found,
            entries: extraction.block.entries.len(),
            records: records.len() - before,
            skipped: extraction.skipped,
        });
    }

    let duplicate_ids = check_unique_ids(&records, &origins, config.allow_duplicate_ids)?;
    info!("Labeled {} records from {} blocks", records.len(), blocks.len());

    let report = BuildReport { blocks, total_records: records.len(), duplicate_ids };
    Ok(Generation { records, report })
}

/// Verify every id is unique. With `allow` set, collisions are logged and
/// returned instead of failing.
fn check_unique_ids(
    records: &[OutputRecord],
    origins: &[RecordOrigin],
    allow: bool,
) -> Result<Vec<String>, PipelineError> {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    let mut duplicates = Vec::new();
    for (i, record) in records.iter().enumerate() {
        let Some(&first) = seen.get(record.id.as_str()) else {
            seen.insert(&record.id, i);
            continue;
        };
        if !allow {
            return Err(PipelineError::DuplicateId {
                id: record.id.clone(),
                first: origins[first].clone(),
                second: origins[i].clone(),
            });
        }
        warn!("Duplicate id `{}` from {} (first from {})", record.id, origins[i], origins[first]);
        if !duplicates.contains(&record.id) {
            duplicates.push(record.id.clone());
        }
    }
    Ok(duplicates)
}

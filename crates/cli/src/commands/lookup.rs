use anyhow::{anyhow, Result};
use bodymap_core::extract::Document;
use bodymap_core::model::OutputRecord;
use serde::Serialize;

use crate::commands::read_text;
use crate::{canonicalize_or_current, resolve_under};

#[derive(Debug, Serialize)]
pub struct LookupResult {
    pub table: String,
    pub total_ids: usize,
    pub record: Option<OutputRecord>,
    pub near_matches: Vec<String>,
}

/// Ids that contain every multi-letter `_`-separated word of `target`.
///
/// Single letters (the `l`/`r` side suffixes) are ignored so that
/// `upper_back_l` still finds `upper_back_r`.
pub fn near_matches<'a>(ids: impl IntoIterator<Item = &'a str>, target: &str) -> Vec<String> {
    let words: Vec<&str> = target.split('_').filter(|w| w.len() > 1).collect();
    if words.is_empty() {
        return Vec::new();
    }
    let mut matches: Vec<String> = ids
        .into_iter()
        .filter(|id| *id != target && words.iter().all(|w| id.contains(w)))
        .map(str::to_string)
        .collect();
    matches.sort();
    matches.dedup();
    matches
}

/// Check whether `id` exists in a generated table and show its record.
///
/// Fails when the id is missing, after listing similar ids.
pub fn lookup_command(root: &str, table: &str, const_name: &str, id: &str, json: bool) -> Result<()> {
    let root_path = canonicalize_or_current(root)?;
    let table_path = resolve_under(&root_path, table);
    let source = read_text(&table_path, "table")?;

    let read = Document::parse(&source).read_table(const_name)?;
    let record = read.records.iter().find(|r| r.id == id).cloned();
    let near = if record.is_none() {
        near_matches(read.records.iter().map(|r| r.id.as_str()), id)
    } else {
        Vec::new()
    };

    let found = record.is_some();
    if json {
        let result = LookupResult {
            table: table_path.display().to_string(),
            total_ids: read.records.len(),
            record,
            near_matches: near,
        };
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("Ids in {}: {}", table_path.display(), read.records.len());
        match &record {
            Some(r) => println!("Found: id='{}', name='{}', view='{}'", r.id, r.name, r.view),
            None => {
                println!("Id '{}' not found.", id);
                if near.is_empty() {
                    println!("Near matches: (none)");
                } else {
                    println!("Near matches: {}", near.join(", "));
                }
            }
        }
    }

    if found {
        Ok(())
    } else {
        Err(anyhow!("Id '{}' not found in {}", id, table_path.display()))
    }
}

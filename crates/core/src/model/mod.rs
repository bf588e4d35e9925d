//! Core data model for body-map extraction and labeling.
//!
//! - `View`: which diagram perspective a block belongs to.
//! - `SourceBlock` / `MuscleEntry`: what the extractor produces.
//! - `OutputRecord`: the flattened unit the renderer consumes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Rendering perspective of a diagram block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    /// Anterior view. The subject's right side is drawn on the viewer's left.
    Front,
    /// Posterior view. Left and right match the viewer's.
    Back,
}

impl View {
    pub fn as_str(&self) -> &'static str {
        match self {
            View::Front => "front",
            View::Back => "back",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for View {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "front" => Ok(View::Front),
            "back" => Ok(View::Back),
            other => Err(format!("Invalid view '{}'. Allowed: front, back", other)),
        }
    }
}

/// One anatomical region as authored: a canonical key and its polygon outlines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MuscleEntry {
    /// Lowercase canonical key (e.g. `chest`, `biceps`).
    pub key: String,
    /// Raw polygon strings in source order, text untouched.
    pub polygons: Vec<String>,
}

impl MuscleEntry {
    pub fn new(key: impl Into<String>, polygons: Vec<String>) -> Self {
        Self { key: key.into(), polygons }
    }
}

/// A named top-level array of entries for one view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceBlock {
    pub name: String,
    pub view: View,
    pub entries: Vec<MuscleEntry>,
}

/// Flattened, labeled polygon record.
///
/// Field order matters: it is the order written to the generated table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRecord {
    pub id: String,
    pub name: String,
    pub view: View,
    pub points: String,
}

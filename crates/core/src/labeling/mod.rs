//! Side labeling and name projection for extracted polygons.
//!
//! Each polygon is labeled on its own: its centroid-x picks a side, the view
//! decides which side that is, and the region key plus side suffix becomes
//! the record id. The only cross-polygon input is whether the entry is a
//! single-polygon `head`.

pub mod geometry;
pub mod names;

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{MuscleEntry, OutputRecord, View};
pub use geometry::{centroid_x, PolygonError};
pub use names::NameTable;

/// Region that may be drawn as one centered polygon instead of a left/right pair.
pub const CENTRAL_REGION: &str = "head";

/// Centroids below this x are on the viewer's left.
pub const MIDLINE_X: f64 = 50.0;

/// Open x interval in which a single `head` polygon counts as centered.
pub const CENTRAL_BAND: (f64, f64) = (40.0, 60.0);

/// Suffix keeping the back-view head id apart from the front-view one.
pub const BACK_SUFFIX: &str = "_back";

/// Side assigned to one polygon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// Subject's right (`_r`).
    Right,
    /// Subject's left (`_l`).
    Left,
    /// Centered, front view (no suffix).
    Central,
    /// Centered, back view (`_back`).
    CentralBack,
}

impl Side {
    pub fn suffix(&self) -> &'static str {
        match self {
            Side::Right => "_r",
            Side::Left => "_l",
            Side::Central => "",
            Side::CentralBack => BACK_SUFFIX,
        }
    }

    /// Side implied by a centroid in the given view.
    ///
    /// The front view mirrors the subject, so the viewer's left half is the
    /// subject's right; the back view does not.
    pub fn from_centroid(view: View, x: f64) -> Self {
        let viewer_left = x < MIDLINE_X;
        match (view, viewer_left) {
            (View::Front, true) | (View::Back, false) => Side::Right,
            (View::Front, false) | (View::Back, true) => Side::Left,
        }
    }

    fn centered(view: View) -> Self {
        match view {
            View::Front => Side::Central,
            View::Back => Side::CentralBack,
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum LabelError {
    #[error("Malformed polygon #{index} of `{key}` ({view} view): {source}")]
    MalformedPolygon { key: String, view: View, index: usize, source: PolygonError },
}

/// Applies side rules and the name table to muscle entries.
#[derive(Debug, Clone, Copy)]
pub struct Labeler<'a> {
    names: &'a NameTable,
}

impl<'a> Labeler<'a> {
    pub fn new(names: &'a NameTable) -> Self {
        Self { names }
    }

    /// One record per polygon of `entry`, in polygon order.
    pub fn label_entry(
        &self,
        entry: &MuscleEntry,
        view: View,
    ) -> Result<Vec<OutputRecord>, LabelError> {
        let single = entry.polygons.len() == 1;
        entry
            .polygons
            .iter()
            .enumerate()
            .map(|(index, points)| {
                let x = centroid_x(points).map_err(|source| LabelError::MalformedPolygon {
                    key: entry.key.clone(),
                    view,
                    index,
                    source,
                })?;
                let side = side_for(&entry.key, view, x, single);
                let record = self.record(&entry.key, view, side, points);
                debug!("{} polygon #{} centroid {:.2} -> {}", view, index, x, record.id);
                Ok(record)
            })
            .collect()
    }

    /// Build the record for one already-sided polygon.
    pub fn record(&self, key: &str, view: View, side: Side, points: &str) -> OutputRecord {
        let mut id = format!("{}{}", key, side.suffix());
        if view == View::Back && key == CENTRAL_REGION && !id.ends_with(BACK_SUFFIX) {
            id.push_str(BACK_SUFFIX);
        }

        let base = match self.names.get(key) {
            Some(name) => name,
            None => {
                debug!("No localized name for `{}`; using the key", key);
                key
            }
        };
        let name = match side {
            Side::Left => format!("{}{}", self.names.left_marker(), base),
            Side::Right => format!("{}{}", self.names.right_marker(), base),
            Side::Central | Side::CentralBack => base.to_string(),
        };

        OutputRecord { id, name, view, points: points.to_string() }
    }
}

/// Side for one polygon of region `key`.
///
/// A lone `head` polygon inside the central band is centered; everything else
/// takes the centroid side.
pub fn side_for(key: &str, view: View, x: f64, single_polygon: bool) -> Side {
    let (low, high) = CENTRAL_BAND;
    if key == CENTRAL_REGION && single_polygon && low < x && x < high {
        Side::centered(view)
    } else {
        Side::from_centroid(view, x)
    }
}

//! bodymap-core
//!
//! Core library for turning authored muscle-region polygons into the
//! side-labeled, localized path table used by the body-map overlays.
//!
//! This crate holds the data model, the source extractor, the side labeling
//! rules, the end-to-end pipeline, and the table emitter. It performs no file
//! I/O beyond loading an explicitly requested config, so frontends decide
//! where text comes from and where it goes.

pub mod model;
pub mod extract;
pub mod labeling;
pub mod config;
pub mod pipeline;
pub mod emit;

/// Returns the library version as encoded at compile time.
///
/// Useful for tests and for frontends to report consistent version info.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

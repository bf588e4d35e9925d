use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use bodymap_core::config::{load_config, GeneratorConfig};

use crate::resolve_under;

/// Default authored asset file, relative to the project root.
pub const DEFAULT_INPUT: &str = "temp_Assets.ts";

/// Default generated table, relative to the project root.
pub const DEFAULT_OUTPUT: &str = "src/components/player/BodyMapPaths.ts";

/// Load the generator config named on the command line, or the defaults.
pub fn load_generator_config(root: &Path, config: Option<&str>) -> Result<GeneratorConfig> {
    match config {
        Some(path) => load_config(&resolve_under(root, path)),
        None => Ok(GeneratorConfig::default()),
    }
}

/// Read a UTF-8 text file, naming `what` in the error.
pub fn read_text(path: &Path, what: &str) -> Result<String> {
    fs::read_to_string(path)
        .with_context(|| format!("Failed to read {} at {}", what, path.display()))
}

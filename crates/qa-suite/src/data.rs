//! Declarative scenario data.
//!
//! Fixture categories and their file lists are data, not code: scenarios
//! enumerate `resources/data.json` rather than hardcoding file names. The
//! expected bundle member for a conversion is the fixture's stem with the
//! platform-specific suffix, which is what `with_suffix` computes.

use crate::error::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Fixture file names grouped by scenario category.
///
/// Each category maps to one expected outcome: valid inputs produce a
/// success toast and a downloadable bundle, each invalid category produces
/// a specific error toast.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioData {
    /// Textures the bundler converts successfully.
    pub valid_textures: Vec<String>,

    /// Textures exceeding the width limit.
    pub large_texture_width: Vec<String>,

    /// Textures exceeding the height limit.
    pub large_texture_height: Vec<String>,

    /// Textures exceeding both dimension limits.
    pub large_texture_both: Vec<String>,

    /// Files that are not textures at all.
    pub invalid_textures: Vec<String>,

    /// Fonts the bundler converts successfully.
    pub valid_fonts: Vec<String>,

    /// Files that are not fonts.
    pub invalid_fonts: Vec<String>,

    /// Content archives missing their configuration file.
    pub missing_configs: Vec<String>,

    /// Complete content archives that bundle for every platform.
    pub valid_content_bundles: Vec<String>,
}

impl ScenarioData {
    /// Parses the scenario data bundled with the crate.
    pub fn embedded() -> Result<Self> {
        let data = serde_json::from_str(include_str!("../resources/data.json"))?;
        Ok(data)
    }

    /// Parses scenario data from an external file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

/// Replaces a fixture file name's extension with `suffix`.
///
/// `suffix` may carry a leading dot. Names without an extension get the
/// suffix appended.
///
/// ```
/// use qa_suite::data::with_suffix;
/// assert_eq!(with_suffix("grass.png", ".t3x"), "grass.t3x");
/// ```
pub fn with_suffix(filename: &str, suffix: &str) -> String {
    PathBuf::from(filename)
        .with_extension(suffix.trim_start_matches('.'))
        .display()
        .to_string()
}

/// List form of [`with_suffix`].
pub fn with_suffixes(filenames: &[String], suffix: &str) -> Vec<String> {
    filenames
        .iter()
        .map(|name| with_suffix(name, suffix))
        .collect()
}

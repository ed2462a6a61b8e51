//! Suite configuration and filesystem layout.
//!
//! Configuration priority: environment variables (`QA_*`) > `qa.toml` at
//! the crate root > built-in defaults, layered with figment. The directory
//! layout (downloads, screenshots, fixtures) is fixed relative to the
//! crate root and not configurable.

use crate::error::Result;
use figment::{
    Figment,
    providers::{Env, Format as _, Serialized, Toml},
};
use qa_browser::BrowserKind;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Runtime configuration for a suite run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteConfig {
    /// Which browser back-end to drive.
    pub browser: BrowserKind,

    /// Run the browser headless (disable to watch scenarios execute).
    pub headless: bool,

    /// Base URL of the web client under test.
    pub base_url: String,

    /// URL of the backend data server's health endpoint.
    pub data_url: String,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            browser: BrowserKind::Chrome,
            headless: true,
            base_url: "http://localhost:5173".to_string(),
            data_url: "http://localhost:8000".to_string(),
        }
    }
}

impl SuiteConfig {
    /// Loads configuration from defaults, `qa.toml`, and `QA_*` env vars.
    pub fn load() -> Result<Self> {
        Self::load_from(SuitePaths::crate_root().join("qa.toml"))
    }

    /// Loads configuration with an explicit config file path.
    pub fn load_from(config_file: impl AsRef<Path>) -> Result<Self> {
        let config = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(config_file.as_ref()))
            .merge(Env::prefixed("QA_"))
            .extract()?;

        Ok(config)
    }
}

/// The fixed directory layout of the suite.
///
/// Everything resolves against the crate root so runs behave the same
/// regardless of the working directory cargo invokes tests from.
#[derive(Debug, Clone)]
pub struct SuitePaths {
    /// Where the browser drops produced bundle archives.
    pub downloads: PathBuf,

    /// Where failure screenshots are written.
    pub screenshots: PathBuf,

    /// Where upload fixtures live.
    pub fixtures: PathBuf,
}

impl SuitePaths {
    /// The crate root, baked in at compile time.
    pub fn crate_root() -> &'static Path {
        Path::new(env!("CARGO_MANIFEST_DIR"))
    }

    /// Resolves the standard layout under the crate root.
    pub fn resolve() -> Self {
        let root = Self::crate_root();
        Self {
            downloads: root.join("downloads"),
            screenshots: root.join("screenshots"),
            fixtures: root.join("resources/files"),
        }
    }

    /// Creates the writable directories (downloads, screenshots).
    pub fn ensure_writable_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.downloads)?;
        std::fs::create_dir_all(&self.screenshots)?;
        Ok(())
    }

    /// Resolves a fixture file name to its absolute path.
    pub fn fixture(&self, filename: &str) -> PathBuf {
        self.fixtures.join(filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_sensible() {
        let config = SuiteConfig::default();
        assert_eq!(config.browser, BrowserKind::Chrome);
        assert!(config.headless);
        assert!(config.base_url.starts_with("http://"));
    }

    #[test]
    fn missing_config_file_falls_back_to_defaults() {
        let config = SuiteConfig::load_from("/nonexistent/qa.toml").expect("load should succeed");
        assert_eq!(config.base_url, SuiteConfig::default().base_url);
    }

    #[test]
    fn config_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::with_suffix(".toml").expect("temp file");
        writeln!(
            file,
            "browser = \"chromium\"\nbase_url = \"http://localhost:9999\""
        )
        .expect("write config");

        let config = SuiteConfig::load_from(file.path()).expect("load should succeed");
        assert_eq!(config.browser, BrowserKind::Chromium);
        assert_eq!(config.base_url, "http://localhost:9999");
        // Unset keys keep their defaults.
        assert_eq!(config.data_url, SuiteConfig::default().data_url);
        assert!(config.headless);
    }

    #[test]
    fn paths_resolve_under_crate_root() {
        let paths = SuitePaths::resolve();
        assert!(paths.downloads.starts_with(SuitePaths::crate_root()));
        assert!(paths.fixtures.ends_with("resources/files"));
        assert_eq!(
            paths.fixture("grass.png"),
            paths.fixtures.join("grass.png")
        );
    }
}

//! Browser session lifecycle management and process control.
//!
//! This module provides `Session`, the entry point for a QA run. It handles
//! launching the configured browser kind, routing downloads into the suite's
//! download directory, and creating pages for navigation.
//!
//! # Resource Safety
//!
//! `Session` implements Drop to ensure the browser process is killed even if
//! a scenario panics. Explicit cleanup via `close()` is preferred for
//! graceful shutdown.

use crate::error::{BrowserError, Result};
use crate::page::Page;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::browser::{
    SetDownloadBehaviorBehavior, SetDownloadBehaviorParams,
};
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// The browser back-end driven by a session.
///
/// Both kinds speak CDP; the kind only affects which executable is located
/// when no explicit path is configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrowserKind {
    /// Google Chrome.
    Chrome,
    /// Chromium (or a distro-packaged build of it).
    Chromium,
}

impl BrowserKind {
    /// Executable names to try, in order, when auto-detecting.
    fn candidates(self) -> &'static [&'static str] {
        match self {
            BrowserKind::Chrome => &["google-chrome", "google-chrome-stable", "chrome"],
            BrowserKind::Chromium => &["chromium", "chromium-browser"],
        }
    }

    /// Searches `PATH` for the first matching executable of this kind.
    pub fn locate(self) -> Option<PathBuf> {
        let path_var = std::env::var_os("PATH")?;

        for dir in std::env::split_paths(&path_var) {
            for name in self.candidates() {
                let candidate = dir.join(name);
                if candidate.is_file() {
                    return Some(candidate);
                }
            }
        }

        None
    }
}

impl FromStr for BrowserKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "chrome" => Ok(BrowserKind::Chrome),
            "chromium" => Ok(BrowserKind::Chromium),
            other => Err(format!(
                "invalid browser kind '{other}' (expected 'chrome' or 'chromium')"
            )),
        }
    }
}

/// Configuration for launching a browser session.
///
/// Provides sensible defaults for headless testing with options to
/// customize for debugging or CI environments.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Which browser back-end to drive (default: Chrome).
    pub kind: BrowserKind,

    /// Run in headless mode (default: true).
    pub headless: bool,

    /// Browser window size (default: 1920x1080).
    pub window_size: (u32, u32),

    /// Additional browser arguments.
    pub args: Vec<String>,

    /// Browser executable path (None = auto-detect for the kind).
    pub executable: Option<PathBuf>,

    /// Directory downloads are routed into (None = browser default).
    pub download_dir: Option<PathBuf>,
}

impl SessionConfig {
    /// Creates a new config with defaults for headless testing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects the browser back-end.
    #[must_use]
    pub fn with_kind(mut self, kind: BrowserKind) -> Self {
        self.kind = kind;
        self
    }

    /// Enables visible mode for debugging.
    ///
    /// When headless is false, you can watch the browser execute scenarios.
    #[must_use]
    pub fn visible(mut self) -> Self {
        self.headless = false;
        self
    }

    /// Sets a custom window size.
    #[must_use]
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_size = (width, height);
        self
    }

    /// Routes downloads into the given directory.
    ///
    /// The QA suite points this at its `downloads/` directory so produced
    /// bundle archives are inspectable from the filesystem.
    #[must_use]
    pub fn with_download_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.download_dir = Some(dir.into());
        self
    }

    /// Uses an explicit browser executable instead of auto-detection.
    #[must_use]
    pub fn with_executable(mut self, path: impl Into<PathBuf>) -> Self {
        self.executable = Some(path.into());
        self
    }

    /// Adds additional browser arguments.
    #[must_use]
    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args.extend(args);
        self
    }

    /// Converts to chromiumoxide `BrowserConfig`.
    #[allow(clippy::result_large_err)]
    fn to_browser_config(&self) -> Result<BrowserConfig> {
        let mut config = BrowserConfig::builder();

        if self.headless {
            config = config.arg("--headless");
        }

        config = config.arg(format!(
            "--window-size={},{}",
            self.window_size.0, self.window_size.1
        ));

        // Unique user data directory so parallel sessions don't trip over
        // Chrome's ProcessSingleton lock.
        let temp_dir = std::env::temp_dir();
        let unique_id = uuid::Uuid::new_v4();
        let user_data_dir = temp_dir.join(format!("qa-browser-{unique_id}"));
        config = config.arg(format!("--user-data-dir={}", user_data_dir.display()));

        for arg in &self.args {
            config = config.arg(arg.clone());
        }

        // Explicit executable wins; otherwise try locating one for the
        // configured kind and fall back to chromiumoxide's own detection.
        if let Some(path) = self
            .executable
            .clone()
            .or_else(|| self.kind.locate())
        {
            config = config.chrome_executable(path);
        }

        config.build().map_err(|e| BrowserError::LaunchFailed {
            reason: format!("invalid browser configuration: {e}"),
            source: None,
        })
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            kind: BrowserKind::Chrome,
            headless: true,
            window_size: (1920, 1080),
            args: vec![
                // Required when user namespaces are unavailable (common in
                // containers). Only safe against trusted content.
                "--no-sandbox".to_string(),
                // Prevents /dev/shm exhaustion in containerized environments
                "--disable-dev-shm-usage".to_string(),
            ],
            executable: None,
            download_dir: None,
        }
    }
}

/// A managed browser session.
///
/// One session serves an entire suite run: pages are created from it,
/// scenarios execute sequentially against those pages, and the session is
/// torn down once at the end.
///
/// # Example
///
/// ```ignore
/// let session = Session::launch(SessionConfig::default()).await?;
/// let page = session.new_page().await?;
/// page.navigate("http://localhost:5173").await?;
/// // Scenarios run...
/// session.close().await?;
/// ```
pub struct Session {
    inner: Arc<Mutex<Option<Browser>>>,
    download_dir: Option<PathBuf>,
}

impl Session {
    /// Launches a new browser session with the given configuration.
    ///
    /// Spawns the browser process and establishes a CDP connection.
    ///
    /// # Errors
    ///
    /// Returns `LaunchFailed` if the browser is not installed, not
    /// executable, or fails to start.
    pub async fn launch(config: SessionConfig) -> Result<Self> {
        debug!("Launching browser with config: {:?}", config);

        let download_dir = config.download_dir.clone();
        let browser_config = config.to_browser_config()?;

        let (browser, mut handler) =
            Browser::launch(browser_config)
                .await
                .map_err(|e| BrowserError::LaunchFailed {
                    reason: "failed to launch browser process".to_string(),
                    source: Some(Box::new(e)),
                })?;

        // Drive the CDP handler on a background task; chromiumoxide needs
        // this running to process protocol events.
        tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    warn!("Browser handler error: {}", e);
                }
            }
        });

        debug!("Browser launched successfully");

        Ok(Self {
            inner: Arc::new(Mutex::new(Some(browser))),
            download_dir,
        })
    }

    /// Creates a new browser page (tab).
    ///
    /// If the session has a download directory configured, the page's
    /// download behavior is overridden so archives land there without a
    /// save-file prompt.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyClosed` if the session has been closed.
    pub async fn new_page(&self) -> Result<Page> {
        let browser = self.inner.lock().await;

        let browser = browser.as_ref().ok_or(BrowserError::AlreadyClosed)?;

        let chrome_page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| BrowserError::ConnectionFailed(e.to_string()))?;

        if let Some(dir) = &self.download_dir {
            Self::allow_downloads(&chrome_page, dir).await?;
        }

        Ok(Page::new(chrome_page))
    }

    /// Points the browser's download behavior at `dir`.
    async fn allow_downloads(page: &chromiumoxide::page::Page, dir: &Path) -> Result<()> {
        let params = SetDownloadBehaviorParams::builder()
            .behavior(SetDownloadBehaviorBehavior::Allow)
            .download_path(dir.display().to_string())
            .build()
            .map_err(|e| BrowserError::ConnectionFailed(format!(
                "invalid download behavior params: {e}"
            )))?;

        page.execute(params).await?;

        debug!(dir = %dir.display(), "download behavior set");
        Ok(())
    }

    /// Closes the session and kills the browser process.
    ///
    /// Should be called explicitly at the end of a suite run for graceful
    /// shutdown. If not called, Drop will kill the process forcefully.
    /// Safe to call when the session is already gone.
    ///
    /// # Errors
    ///
    /// Returns an error if the browser fails to close gracefully.
    pub async fn close(&self) -> Result<()> {
        let mut browser_guard = self.inner.lock().await;

        if let Some(mut browser) = browser_guard.take() {
            debug!("Closing browser gracefully");
            browser
                .close()
                .await
                .map_err(|e| BrowserError::ConnectionFailed(e.to_string()))?;
        }

        Ok(())
    }

    /// Returns true if the session has been closed.
    pub async fn is_closed(&self) -> bool {
        self.inner.lock().await.is_none()
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        // Drop can't await close(); chromiumoxide's Browser Drop kills the
        // process if it was never taken out via close(). No leaked Chrome
        // even when a scenario panics.
        warn!("Session dropped without explicit close() - forcing shutdown via Drop");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn browser_kind_parses_from_config_strings() {
        assert_eq!("chrome".parse::<BrowserKind>().unwrap(), BrowserKind::Chrome);
        assert_eq!(
            "chromium".parse::<BrowserKind>().unwrap(),
            BrowserKind::Chromium
        );
        assert!("firefox".parse::<BrowserKind>().is_err());
    }

    #[test]
    fn session_config_builder_accumulates() {
        let config = SessionConfig::new()
            .with_kind(BrowserKind::Chromium)
            .with_window_size(800, 600)
            .with_download_dir("/tmp/qa-downloads")
            .with_args(vec!["--lang=en-US".to_string()]);

        assert_eq!(config.kind, BrowserKind::Chromium);
        assert_eq!(config.window_size, (800, 600));
        assert_eq!(
            config.download_dir.as_deref(),
            Some(Path::new("/tmp/qa-downloads"))
        );
        assert!(config.args.iter().any(|a| a == "--lang=en-US"));
        // Defaults are preserved alongside additions.
        assert!(config.args.iter().any(|a| a == "--no-sandbox"));
        assert!(config.headless);
    }

    #[tokio::test]
    #[ignore] // Requires a browser to be installed
    async fn session_launch_and_close() {
        let session = Session::launch(SessionConfig::default())
            .await
            .expect("failed to launch browser");

        assert!(!session.is_closed().await);

        session.close().await.expect("failed to close browser");
        assert!(session.is_closed().await);

        // close() is idempotent once the session is gone.
        session.close().await.expect("second close should be a no-op");
    }
}

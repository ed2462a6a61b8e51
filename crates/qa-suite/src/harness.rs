//! Suite harness: session lifecycle, preflight checks, failure capture.
//!
//! One `Harness` serves an entire suite run: it loads configuration,
//! launches the browser session with downloads routed into the suite's
//! download directory, probes both application endpoints before any
//! scenario runs, and captures a screenshot when a scenario fails.

use crate::bundle;
use crate::config::{SuiteConfig, SuitePaths};
use crate::error::{Result, SuiteError};
use crate::webpage::WebPage;
use qa_browser::{AppEndpoint, Page, Session, SessionConfig, StaticEndpoint};
use std::future::Future;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Initializes tracing once per process; later calls are no-ops.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Where a failed scenario's screenshot lands.
fn failure_shot_path(screenshots: &Path, name: &str) -> PathBuf {
    screenshots.join(format!("failure_{name}.png"))
}

/// A live browser session plus everything a scenario needs around it.
///
/// Scenarios are strictly sequential: one session, one page, one in-flight
/// upload at a time. Tear down with [`Harness::close`] when the run ends.
pub struct Harness {
    session: Session,
    page: Page,
    config: SuiteConfig,
    paths: SuitePaths,
}

impl Harness {
    /// Starts a harness: config, browser, preflight probes, cleanup.
    ///
    /// Fails fast with `EndpointDown` if the web client or the data server
    /// is not answering; there is no point launching scenarios against a
    /// dead application. Also purges stale archives from the download
    /// directory so "most recent zip" selection starts from a clean slate.
    pub async fn start() -> Result<Self> {
        Self::start_with(SuiteConfig::load()?).await
    }

    /// Starts a harness with an explicit configuration.
    pub async fn start_with(config: SuiteConfig) -> Result<Self> {
        init_tracing();

        let paths = SuitePaths::resolve();
        paths.ensure_writable_dirs()?;

        bundle::clear_zips(&paths.downloads)?;

        let client = reqwest::Client::new();
        for url in [&config.base_url, &config.data_url] {
            let endpoint = StaticEndpoint::new(url.clone());
            if !endpoint.probe(&client).await {
                error!(url = url.as_str(), "endpoint preflight failed");
                return Err(SuiteError::EndpointDown { url: url.clone() });
            }
        }

        let mut session_config = SessionConfig::new()
            .with_kind(config.browser)
            .with_download_dir(&paths.downloads);
        if !config.headless {
            session_config = session_config.visible();
        }

        let session = Session::launch(session_config).await?;
        let page = session.new_page().await?;

        info!(browser = ?config.browser, base_url = config.base_url.as_str(), "harness ready");

        Ok(Self {
            session,
            page,
            config,
            paths,
        })
    }

    /// Navigates to the web client's landing page.
    ///
    /// Every scenario starts here; nothing persists between scenarios.
    pub async fn home(&self) -> Result<()> {
        self.page.navigate(&self.config.base_url).await?;
        Ok(())
    }

    /// The underlying browser page.
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// The suite configuration in effect.
    pub fn config(&self) -> &SuiteConfig {
        &self.config
    }

    /// The suite's directory layout.
    pub fn paths(&self) -> &SuitePaths {
        &self.paths
    }

    /// A page object over the current page.
    pub fn webpage(&self) -> WebPage<'_> {
        WebPage::new(&self.page, &self.paths)
    }

    /// Runs a scenario with failure capture.
    ///
    /// If the scenario fails, a screenshot named `failure_<name>.png` is
    /// written to the screenshots directory before the error propagates.
    /// Capture is best-effort: a screenshot failure is logged, never
    /// allowed to mask the scenario's own error.
    pub async fn run(
        &self,
        name: &str,
        scenario: impl Future<Output = Result<()>>,
    ) -> Result<()> {
        match scenario.await {
            Ok(()) => Ok(()),
            Err(err) => {
                let shot = failure_shot_path(&self.paths.screenshots, name);
                if let Err(capture) = self.page.save_screenshot(&shot).await {
                    warn!(scenario = name, error = %capture, "failure screenshot could not be captured");
                } else {
                    info!(scenario = name, path = %shot.display(), "failure screenshot captured");
                }
                Err(err)
            }
        }
    }

    /// Gracefully tears down the browser session.
    pub async fn close(&self) -> Result<()> {
        self.session.close().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_shots_are_named_after_the_scenario() {
        let path = failure_shot_path(Path::new("/tmp/shots"), "valid_texture_grass");
        assert_eq!(path, Path::new("/tmp/shots/failure_valid_texture_grass.png"));
    }

    #[tokio::test]
    async fn start_fails_fast_when_endpoints_are_down() {
        // Point the harness at a port nothing listens on; the preflight
        // probe must fail before any browser is launched.
        let config = SuiteConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            data_url: "http://127.0.0.1:1".to_string(),
            ..SuiteConfig::default()
        };

        let result = Harness::start_with(config).await;

        assert!(matches!(result, Err(SuiteError::EndpointDown { .. })));
    }
}

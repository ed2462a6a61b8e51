//! The page interaction layer for the bundler web client.
//!
//! `WebPage` wraps a browser page with the three operations a scenario
//! composes: upload a fixture, validate the resulting toast, validate the
//! downloaded bundle. Operations are fluent (each returns the same
//! interaction object) so a scenario reads as a pipeline:
//!
//! ```ignore
//! page.upload_file("grass.png").await?
//!     .validate_toast(true, "Downloaded").await?
//!     .validate_latest_bundle(&["grass.t3x".into()]).await?;
//! ```
//!
//! The object itself is stateless aside from holding references; every
//! scenario starts from a fresh navigation.

use crate::bundle;
use crate::config::SuitePaths;
use crate::error::{Result, SuiteError};
use qa_browser::{Page, WaitConfig};
use tracing::info;

/// Success toasts carry this style marker in their class list.
const SUCCESS_TOAST: &str = "[class*='bg-green-600']";

/// Error toasts carry this style marker in their class list.
const ERROR_TOAST: &str = "[class*='bg-red-600']";

/// The upload entry point of the web client.
const UPLOAD_INPUT: &str = "input[type='file']";

/// The marker file the bundler's download is delivered as.
const BUNDLE_MARKER: &str = "bundle.zip";

/// Page object for the bundler web client's upload page.
pub struct WebPage<'a> {
    page: &'a Page,
    paths: &'a SuitePaths,
}

impl<'a> WebPage<'a> {
    /// Creates a page object over a navigated browser page.
    pub fn new(page: &'a Page, paths: &'a SuitePaths) -> Self {
        Self { page, paths }
    }

    /// Uploads a fixture file through the client's file input.
    ///
    /// Resolves `filename` against the fixtures directory, waits (bounded)
    /// for the file input to be present, then submits the absolute path.
    ///
    /// # Errors
    ///
    /// `MissingFixture` if the fixture is absent on disk, `WaitTimeout` if
    /// the input never appears.
    pub async fn upload_file(&self, filename: &str) -> Result<&Self> {
        let fixture = self.paths.fixture(filename);
        if !fixture.is_file() {
            return Err(SuiteError::MissingFixture {
                path: fixture.display().to_string(),
            });
        }

        self.page
            .wait_for_selector(UPLOAD_INPUT, WaitConfig::default())
            .await?;
        self.page.set_file_input(UPLOAD_INPUT, &fixture).await?;

        info!(filename, "uploaded fixture");
        Ok(self)
    }

    /// Asserts that the expected kind of toast appears with the right text.
    ///
    /// The kind is an input, not detected: success and error toasts use
    /// different locators, so the caller states which one it expects and
    /// this waits (bounded) for *that* toast to become visible. Fails with
    /// an assertion error if the toast's text does not contain `message`.
    pub async fn validate_toast(&self, success: bool, message: &str) -> Result<&Self> {
        let toast = if success { SUCCESS_TOAST } else { ERROR_TOAST };

        self.page
            .wait_for_visible(toast, WaitConfig::default())
            .await?;

        let text = self.page.text_of(toast).await?;
        if !text.contains(message) {
            return Err(SuiteError::assertion(
                "toast message",
                format!("text containing '{message}'"),
                format!("'{text}'"),
            ));
        }

        info!(toast = text.as_str(), "toast validated");
        Ok(self)
    }

    /// Asserts that the most recent downloaded bundle contains `files`.
    ///
    /// Waits (bounded) for the `bundle.zip` marker to exist in the download
    /// directory, then inspects the most-recently-modified zip there -- the
    /// browser may have renamed or timestamped the actual archive. The
    /// validated archive is deleted afterward so it cannot be mistaken for
    /// a later scenario's output.
    ///
    /// # Errors
    ///
    /// `WaitTimeout` if no archive ever appears; an assertion error listing
    /// expected and actual member sets if any name is missing.
    pub async fn validate_latest_bundle(&self, files: &[String]) -> Result<&Self> {
        let marker = self.paths.downloads.join(BUNDLE_MARKER);

        qa_browser::wait::wait_for(
            || {
                let marker = marker.clone();
                async move { marker.is_file() }
            },
            WaitConfig::default(),
            "bundle.zip in download directory",
        )
        .await?;

        let latest = bundle::latest_zip(&self.paths.downloads)?.ok_or_else(|| {
            SuiteError::assertion("downloaded bundle", "a zip archive", "none")
        })?;
        info!(bundle = %latest.display(), "found latest bundle");

        let names = bundle::member_names(&latest)?;
        if !files.iter().all(|file| names.contains(file)) {
            return Err(SuiteError::assertion(
                "bundle members",
                format!("{files:?}"),
                format!("{names:?}"),
            ));
        }

        // Cleanup so this archive can't shadow the next scenario's output.
        std::fs::remove_file(&latest)?;
        Ok(self)
    }
}

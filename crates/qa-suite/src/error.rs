//! Error types for the QA suite.
//!
//! Three failure kinds matter to a scenario: a bounded wait expiring
//! (surfaced from the browser layer as `WaitTimeout`), an observed value
//! not matching expectation (`Assertion`, reporting both sides), and a
//! dependency of the run being absent (`EndpointDown`, `MissingFixture`).
//! Probe failures are not errors at all; they are booleans at the browser
//! layer.

use qa_browser::BrowserError;
use thiserror::Error;

/// The main error type for suite operations.
#[derive(Debug, Error)]
pub enum SuiteError {
    /// An error surfaced from the browser session layer.
    ///
    /// Wait timeouts arrive through this variant.
    #[error(transparent)]
    Browser(#[from] BrowserError),

    /// An observed value did not match the expectation.
    ///
    /// Carries both sides so a red test is diagnosable from its message
    /// alone.
    #[error("{what}: expected {expected}, got {actual}")]
    Assertion {
        /// What was being checked (e.g. "toast message", "bundle members")
        what: String,
        /// The expected value or set
        expected: String,
        /// The observed value or set
        actual: String,
    },

    /// A required endpoint did not answer its liveness probe.
    ///
    /// Raised before any browser work so a dead application under test
    /// fails the run immediately with a clear message.
    #[error("endpoint '{url}' is not running")]
    EndpointDown {
        /// The probed URL
        url: String,
    },

    /// An upload fixture named by the scenario data does not exist.
    #[error("fixture '{path}' does not exist")]
    MissingFixture {
        /// The resolved fixture path
        path: String,
    },

    /// Configuration could not be loaded or extracted.
    #[error("configuration error: {0}")]
    Config(#[from] figment::Error),

    /// A downloaded archive could not be opened or read.
    #[error("archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Scenario data could not be parsed.
    #[error("scenario data error: {0}")]
    Data(#[from] serde_json::Error),

    /// Generic I/O errors (download directory access, fixture reads).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SuiteError {
    /// Builds an assertion error from its three parts.
    pub fn assertion(
        what: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::Assertion {
            what: what.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

/// A specialized Result type for suite operations.
pub type Result<T> = std::result::Result<T, SuiteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assertion_reports_both_sides() {
        let err = SuiteError::assertion("toast message", "'Downloaded'", "'Invalid file type.'");
        let message = err.to_string();

        assert!(message.contains("toast message"));
        assert!(message.contains("Downloaded"));
        assert!(message.contains("Invalid file type."));
    }

    #[test]
    fn wait_timeout_passes_through_transparently() {
        let err: SuiteError = BrowserError::WaitTimeout {
            condition: "visible element".into(),
            timeout: std::time::Duration::from_secs(10),
        }
        .into();

        assert!(err.to_string().contains("timed out"));
    }
}

//! Error types for browser session operations.
//!
//! The error hierarchy distinguishes the failure modes a QA run can hit:
//! browser launch failures, navigation errors, missing elements, and wait
//! timeouts. Each variant carries enough context to triage a red test
//! without re-running it.

use std::time::Duration;
use thiserror::Error;

/// The main error type for all browser session operations.
///
/// Uses thiserror for Display implementations and error source chaining.
#[derive(Debug, Error)]
pub enum BrowserError {
    /// Failed to launch the browser process.
    ///
    /// Typically means Chrome/Chromium is not installed or the configured
    /// executable is not runnable.
    #[error("failed to launch browser: {reason}")]
    LaunchFailed {
        /// Human-readable reason for the launch failure
        reason: String,
        /// Optional underlying error that caused the failure
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Failed to establish the Chrome DevTools Protocol connection.
    #[error("CDP connection failed: {0}")]
    ConnectionFailed(String),

    /// Navigation to a URL failed.
    #[error("navigation to '{url}' failed: {reason}")]
    NavigationFailed {
        /// The URL that failed to load
        url: String,
        /// Reason for the navigation failure
        reason: String,
    },

    /// A wait condition was not satisfied within the timeout.
    ///
    /// This is the hard-failure surface for every bounded wait: element
    /// presence, toast visibility, download appearance. Never retried.
    #[error("wait condition '{condition}' timed out after {timeout:?}")]
    WaitTimeout {
        /// Description of the condition that timed out
        condition: String,
        /// How long we waited before timing out
        timeout: Duration,
    },

    /// No element matched the selector at lookup time.
    ///
    /// `Page::find` has no implicit wait; callers that expect the element
    /// to appear later must use an explicit wait first.
    #[error("no element matched selector '{selector}'")]
    ElementNotFound {
        /// The CSS selector that matched nothing
        selector: String,
    },

    /// JavaScript execution in the page context failed.
    #[error("JavaScript execution failed: {0}")]
    ScriptFailed(String),

    /// An operation was attempted on a closed browser session.
    #[error("browser session is already closed")]
    AlreadyClosed,

    /// Wraps errors from the chromiumoxide library.
    #[error("chromiumoxide error: {0}")]
    ChromiumOxide(#[from] chromiumoxide::error::CdpError),

    /// Generic I/O errors (screenshot writes, download directory access).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for browser operations.
pub type Result<T> = std::result::Result<T, BrowserError>;

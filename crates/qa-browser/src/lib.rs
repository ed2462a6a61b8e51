//! # qa-browser
//!
//! The browser session layer for browser-driven QA suites, built on
//! chromiumoxide.
//!
//! This crate provides the primitives an end-to-end suite composes:
//! launching a headless browser, navigating pages, wait-free element
//! lookup with explicit bounded waits, file-input submission, screenshot
//! capture, and HTTP liveness probes against the application under test.
//!
//! ## Architecture
//!
//! - **Session**: owns the browser process lifecycle for a suite run
//! - **Page**: a browser tab with navigation, lookup, and wait helpers
//! - **AppEndpoint**: liveness probing for the endpoints a run depends on
//! - **WaitConfig**: bounded polling with a fixed timeout
//!
//! ## Design Principles
//!
//! 1. **Application-agnostic**: no assumptions about the page under test
//! 2. **Explicit waiting**: `find` never waits; waits are named and bounded
//! 3. **Resource-safe**: Drop kills the browser process, no leaks on panic
//! 4. **Probes never throw**: liveness checks answer with a boolean
//!
//! ## Example Usage
//!
//! ```ignore
//! use qa_browser::{Session, SessionConfig, WaitConfig};
//!
//! #[tokio::test]
//! async fn test_landing_page() -> qa_browser::Result<()> {
//!     let session = Session::launch(SessionConfig::default()).await?;
//!     let page = session.new_page().await?;
//!
//!     page.navigate("http://localhost:5173").await?;
//!     page.wait_for_selector("input[type=file]", WaitConfig::default()).await?;
//!
//!     session.close().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Testing Strategy
//!
//! Two levels: unit tests for browser-free logic (waits, probes, config),
//! and integration tests that drive a real browser (`#[ignore]`, require
//! Chrome or Chromium installed). Run the latter with
//! `cargo test -p qa-browser -- --ignored`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod browser;
pub mod error;
pub mod page;
pub mod probe;
pub mod wait;

// Re-export main types for convenience
pub use browser::{BrowserKind, Session, SessionConfig};
pub use error::{BrowserError, Result};
pub use page::Page;
pub use probe::{AppEndpoint, StaticEndpoint};
pub use wait::{DEFAULT_POLL_INTERVAL, DEFAULT_TIMEOUT, WaitConfig};

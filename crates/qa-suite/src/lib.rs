//! # qa-suite
//!
//! End-to-end browser QA suite for the bundler web client: fixture files
//! are uploaded through a real browser, the client's toast notifications
//! are asserted on, and downloaded bundle archives are inspected.
//!
//! ## Architecture
//!
//! - **Harness**: one browser session per run, endpoint preflight, failure
//!   screenshots, teardown
//! - **WebPage**: the page interaction layer (upload, toast validation,
//!   bundle validation) as a fluent pipeline
//! - **ScenarioData**: fixture categories and expected outcomes as data,
//!   loaded from `resources/data.json`
//! - **bundle**: zip inspection and download-directory hygiene
//!
//! The actual scenarios live in `tests/webclient.rs` and require both the
//! browser and the application under test, so they are `#[ignore]` by
//! default:
//!
//! ```text
//! cargo test -p qa-suite -- --ignored
//! ```

#![warn(clippy::all)]

pub mod bundle;
pub mod config;
pub mod data;
pub mod error;
pub mod harness;
pub mod webpage;

pub use config::{SuiteConfig, SuitePaths};
pub use data::{ScenarioData, with_suffix, with_suffixes};
pub use error::{Result, SuiteError};
pub use harness::Harness;
pub use webpage::WebPage;

//! Liveness probes for the endpoints a QA run depends on.
//!
//! Browser scenarios are meaningless when the application under test is not
//! running, so the harness probes its HTTP endpoints before driving the
//! browser. A probe is a liveness check, not a correctness check: it
//! returns a boolean and never surfaces network errors.

use async_trait::async_trait;
use std::fmt;
use tracing::debug;

/// An HTTP endpoint the suite depends on (web client UI, data server).
///
/// Implementors provide a base URL; the trait supplies URL joining and a
/// default GET-based liveness probe. The trait is object-safe so harnesses
/// can hold a heterogeneous endpoint list.
#[async_trait]
pub trait AppEndpoint: Send + Sync {
    /// Returns the base URL of the endpoint (e.g. `http://localhost:5173`).
    ///
    /// Should NOT include a trailing slash; paths are joined textually.
    fn base_url(&self) -> &str;

    /// Issues an HTTP GET to the base URL and reports liveness.
    ///
    /// Returns true iff the response status is 200. Any network failure
    /// (refused connection, DNS error, timeout) yields false, never an
    /// error: a dead endpoint is an answer, not an exception.
    async fn probe(&self, client: &reqwest::Client) -> bool {
        match client.get(self.base_url()).send().await {
            Ok(response) => {
                let live = response.status() == reqwest::StatusCode::OK;
                debug!(url = self.base_url(), status = %response.status(), live, "probed endpoint");
                live
            }
            Err(err) => {
                debug!(url = self.base_url(), error = %err, "endpoint probe failed");
                false
            }
        }
    }

    /// Returns a full URL by joining a path to the base URL.
    ///
    /// ```ignore
    /// endpoint.url("/upload") // "http://localhost:5173/upload"
    /// ```
    fn url(&self, path: &str) -> String {
        let base = self.base_url().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }
}

impl fmt::Debug for dyn AppEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppEndpoint")
            .field("base_url", &self.base_url())
            .finish()
    }
}

/// An endpoint at a fixed, externally-managed URL.
///
/// The suite does not start or stop the application under test; it only
/// needs somewhere to point the browser and the probe.
#[derive(Debug, Clone)]
pub struct StaticEndpoint {
    base_url: String,
}

impl StaticEndpoint {
    /// Creates an endpoint from a base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl AppEndpoint for StaticEndpoint {
    fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_url_joining() {
        let endpoint = StaticEndpoint::new("http://localhost:5173");
        assert_eq!(endpoint.url("/upload"), "http://localhost:5173/upload");
        assert_eq!(endpoint.url("upload"), "http://localhost:5173/upload");

        let with_slash = StaticEndpoint::new("http://localhost:5173/");
        assert_eq!(with_slash.url("/upload"), "http://localhost:5173/upload");
    }

    #[tokio::test]
    async fn probe_returns_false_when_unreachable() {
        // Nothing listens on this port; the probe must swallow the
        // connection error and answer false.
        let endpoint = StaticEndpoint::new("http://127.0.0.1:1");
        let client = reqwest::Client::new();

        assert!(!endpoint.probe(&client).await);
    }
}

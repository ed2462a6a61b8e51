//! Page-level browser operations: navigation, element lookup, waits.
//!
//! This module provides the `Page` type, which represents a browser tab and
//! exposes the primitives the interaction layer builds on. Lookups are
//! deliberately wait-free; waiting is explicit, named, and bounded.

use crate::error::{BrowserError, Result};
use crate::probe::AppEndpoint;
use crate::wait::{WaitConfig, wait_for_result};
use chromiumoxide::cdp::browser_protocol::dom::SetFileInputFilesParams;
use chromiumoxide::Element;
use chromiumoxide::page::Page as ChromePage;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Represents a browser page (tab) with QA capabilities.
///
/// Wraps `chromiumoxide::page::Page` and adds type-safe navigation, bounded
/// waits, file-input submission, and screenshot capture.
#[derive(Debug)]
pub struct Page {
    inner: Arc<ChromePage>,
}

impl Page {
    /// Creates a new Page wrapper.
    ///
    /// Called internally by `Session`; users don't construct Pages directly.
    pub(crate) fn new(page: ChromePage) -> Self {
        Self {
            inner: Arc::new(page),
        }
    }

    /// Navigates to an absolute URL and waits for the document to load.
    ///
    /// # Errors
    ///
    /// Returns `NavigationFailed` if the page fails to load, or
    /// `WaitTimeout` if the document never reaches `readyState == complete`.
    pub async fn navigate(&self, url: &str) -> Result<()> {
        info!(url, "navigating");

        self.inner
            .goto(url)
            .await
            .map_err(|e| BrowserError::NavigationFailed {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        self.wait_for_load(WaitConfig::default()).await?;
        Ok(())
    }

    /// Navigates to a path relative to an endpoint's base URL.
    pub async fn navigate_to(&self, endpoint: &dyn AppEndpoint, path: &str) -> Result<()> {
        let url = endpoint.url(path);
        self.navigate(&url).await
    }

    /// Waits for `document.readyState` to become "complete".
    ///
    /// Called automatically by `navigate()`, but can be invoked manually
    /// when navigation is triggered from inside the page.
    ///
    /// # Errors
    ///
    /// Returns `WaitTimeout` if the document never finishes loading.
    pub async fn wait_for_load(&self, config: WaitConfig) -> Result<()> {
        wait_for_result(
            || {
                let page = self.inner.clone();
                async move {
                    let result = page
                        .evaluate("document.readyState")
                        .await
                        .map_err(|e| BrowserError::ScriptFailed(e.to_string()))?;

                    let ready = result
                        .value()
                        .and_then(|v| v.as_str())
                        .is_some_and(|s| s == "complete");

                    Ok(ready)
                }
            },
            config,
            "document ready",
        )
        .await
    }

    /// Executes JavaScript in the page context and returns the result.
    ///
    /// # Security
    ///
    /// Do not interpolate unsanitized input into the script. Selectors
    /// passed through this crate are JSON-escaped before injection.
    ///
    /// # Errors
    ///
    /// Returns `ScriptFailed` if execution fails or the result cannot be
    /// deserialized.
    pub async fn evaluate<T>(&self, script: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let result = self
            .inner
            .evaluate(script)
            .await
            .map_err(|e| BrowserError::ScriptFailed(e.to_string()))?;

        result
            .into_value()
            .map_err(|e| BrowserError::ScriptFailed(e.to_string()))
    }

    /// Finds the first element matching a CSS selector.
    ///
    /// No implicit wait: the element must exist at call time. Pair with
    /// `wait_for_selector` or `wait_for_visible` when the element is
    /// expected to appear later.
    ///
    /// # Errors
    ///
    /// Returns `ElementNotFound` if no match exists.
    pub async fn find(&self, selector: &str) -> Result<Element> {
        self.inner
            .find_element(selector)
            .await
            .map_err(|_| BrowserError::ElementNotFound {
                selector: selector.to_string(),
            })
    }

    /// Returns the rendered text of the first element matching `selector`.
    ///
    /// # Errors
    ///
    /// Returns `ElementNotFound` if no match exists.
    pub async fn text_of(&self, selector: &str) -> Result<String> {
        let element = self.find(selector).await?;

        let text = element
            .inner_text()
            .await
            .map_err(|e| BrowserError::ScriptFailed(e.to_string()))?;

        Ok(text.unwrap_or_default())
    }

    /// Waits for a CSS selector to be present in the DOM.
    ///
    /// Presence does not imply visibility; use `wait_for_visible` for
    /// elements that must actually be rendered.
    ///
    /// # Errors
    ///
    /// Returns `WaitTimeout` if the element never appears.
    pub async fn wait_for_selector(&self, selector: &str, config: WaitConfig) -> Result<()> {
        let selector_owned = selector.to_string();

        wait_for_result(
            || {
                let page = self.inner.clone();
                let sel = selector_owned.clone();
                async move {
                    // JSON encoding gives safe JavaScript string escaping;
                    // prevents injection via backticks and quotes.
                    let escaped = serde_json::to_string(&sel)
                        .map_err(|e| BrowserError::ScriptFailed(e.to_string()))?;
                    let script = format!("!!document.querySelector({escaped})");
                    let result = page
                        .evaluate(script.as_str())
                        .await
                        .map_err(|e| BrowserError::ScriptFailed(e.to_string()))?;

                    let exists = result
                        .value()
                        .and_then(serde_json::Value::as_bool)
                        .unwrap_or(false);

                    Ok(exists)
                }
            },
            config,
            &format!("selector '{selector}'"),
        )
        .await
    }

    /// Waits for a CSS selector to be present *and rendered visible*.
    ///
    /// Visible means: a non-zero layout box, not `display: none`, and not
    /// `visibility: hidden`. Transient notifications (toasts) must pass
    /// this stronger check before their text is asserted on.
    ///
    /// # Errors
    ///
    /// Returns `WaitTimeout` if the element never becomes visible.
    pub async fn wait_for_visible(&self, selector: &str, config: WaitConfig) -> Result<()> {
        let selector_owned = selector.to_string();

        wait_for_result(
            || {
                let page = self.inner.clone();
                let sel = selector_owned.clone();
                async move {
                    let escaped = serde_json::to_string(&sel)
                        .map_err(|e| BrowserError::ScriptFailed(e.to_string()))?;
                    let script = format!(
                        "(() => {{ \
                             const el = document.querySelector({escaped}); \
                             if (!el) return false; \
                             const style = getComputedStyle(el); \
                             if (style.display === 'none' || style.visibility === 'hidden') return false; \
                             const rect = el.getBoundingClientRect(); \
                             return rect.width > 0 && rect.height > 0; \
                         }})()"
                    );
                    let result = page
                        .evaluate(script.as_str())
                        .await
                        .map_err(|e| BrowserError::ScriptFailed(e.to_string()))?;

                    let visible = result
                        .value()
                        .and_then(serde_json::Value::as_bool)
                        .unwrap_or(false);

                    Ok(visible)
                }
            },
            config,
            &format!("visible element '{selector}'"),
        )
        .await
    }

    /// Submits a file path to a file `<input>` element.
    ///
    /// Uses the CDP `DOM.setFileInputFiles` command against the element's
    /// backend node, which is how automation attaches files without a
    /// native file chooser. `path` should be absolute.
    ///
    /// # Errors
    ///
    /// Returns `ElementNotFound` if the input does not exist at call time.
    pub async fn set_file_input(&self, selector: &str, path: &Path) -> Result<()> {
        let element = self.find(selector).await?;

        let params = SetFileInputFilesParams {
            files: vec![path.display().to_string()],
            node_id: None,
            backend_node_id: Some(element.backend_node_id),
            object_id: None,
        };

        self.inner.execute(params).await?;

        debug!(selector, file = %path.display(), "file attached to input");
        Ok(())
    }

    /// Returns the current page URL.
    pub async fn url(&self) -> Result<String> {
        self.evaluate("window.location.href").await
    }

    /// Returns the page title.
    pub async fn title(&self) -> Result<String> {
        self.evaluate("document.title").await
    }

    /// Takes a screenshot of the page and returns PNG bytes.
    pub async fn screenshot(&self) -> Result<Vec<u8>> {
        self.inner
            .screenshot(chromiumoxide::page::ScreenshotParams::default())
            .await
            .map_err(|e| BrowserError::ScriptFailed(e.to_string()))
    }

    /// Takes a screenshot and writes it to `path` as PNG.
    ///
    /// Creates parent directories as needed. Intended for failure capture,
    /// where the caller treats errors as best-effort diagnostics.
    pub async fn save_screenshot(&self, path: &Path) -> Result<()> {
        let bytes = self.screenshot().await?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, bytes).await?;

        info!(path = %path.display(), "screenshot saved");
        Ok(())
    }

    /// Closes the page.
    ///
    /// If wait closures still hold Arc clones of the underlying page, the
    /// close is deferred to the browser teardown; that is acceptable for a
    /// QA harness where the session is torn down at suite end anyway.
    pub async fn close(self) -> Result<()> {
        match Arc::try_unwrap(self.inner) {
            Ok(page) => {
                page.close().await.map_err(BrowserError::ChromiumOxide)?;
                Ok(())
            }
            Err(_arc) => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    // Browser-backed tests live in tests/integration.rs; these cover logic
    // that doesn't require a browser.

    #[test]
    fn selector_escaping_with_json() {
        let test_cases = vec![
            (r#"div"#, r#""div""#),
            (r#"'injected'"#, r#""'injected'""#),
            (r#"`injected`"#, r#""`injected`""#),
        ];

        for (input, expected) in test_cases {
            let escaped = serde_json::to_string(&input).unwrap();
            assert_eq!(
                escaped, expected,
                "Selector '{}' should escape to {}",
                input, expected
            );
        }
    }

    #[test]
    fn json_escaping_handles_special_chars() {
        let dangerous = r#"'); alert('xss');//"#;
        let escaped = serde_json::to_string(&dangerous).unwrap();

        assert!(
            escaped.starts_with('"') && escaped.ends_with('"'),
            "Should be wrapped in double quotes"
        );
        assert!(
            escaped.len() > dangerous.len(),
            "Escaped version should include quote wrappers"
        );
    }
}

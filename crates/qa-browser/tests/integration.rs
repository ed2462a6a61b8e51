//! Integration tests for qa-browser
//!
//! These tests require Chrome/Chromium to be installed and are marked
//! #[ignore] by default. Run with: cargo test --package qa-browser -- --ignored

use qa_browser::{Session, SessionConfig, WaitConfig};
use std::io::Write;
use std::time::Duration;

/// A small page shaped like the bundler web client: a file input plus a
/// toast container that becomes visible after a delay.
fn test_html_page() -> String {
    r#"
    <!DOCTYPE html>
    <html>
    <head>
        <title>Test Page</title>
        <style>
            #toast { display: none; }
            #toast.shown { display: block; }
        </style>
    </head>
    <body>
        <h1 id="heading">Test Heading</h1>
        <input type="file" id="upload" />
        <div id="toast" class="bg-green-600">Downloaded bundle.zip</div>
        <script>
            setTimeout(() => {
                document.getElementById('toast').classList.add('shown');
            }, 300);
        </script>
    </body>
    </html>
    "#
    .to_string()
}

fn data_url(html: &str) -> String {
    format!("data:text/html,{}", urlencoding::encode(html))
}

#[tokio::test]
#[ignore] // Requires Chrome to be installed
async fn session_launch_and_close() {
    let session = Session::launch(SessionConfig::default())
        .await
        .expect("failed to launch browser");

    assert!(!session.is_closed().await, "Session should not be closed");

    session
        .close()
        .await
        .expect("failed to close browser gracefully");
}

#[tokio::test]
#[ignore]
async fn page_navigation_and_title() {
    let session = Session::launch(SessionConfig::default())
        .await
        .expect("failed to launch");

    let page = session.new_page().await.expect("failed to create page");

    page.navigate(&data_url(&test_html_page()))
        .await
        .expect("failed to navigate");

    let title = page.title().await.expect("failed to get title");
    assert_eq!(title, "Test Page");

    session.close().await.expect("failed to close");
}

#[tokio::test]
#[ignore]
async fn find_without_wait_fails_for_missing_element() {
    let session = Session::launch(SessionConfig::default())
        .await
        .expect("failed to launch");

    let page = session.new_page().await.expect("failed to create page");
    page.navigate(&data_url(&test_html_page()))
        .await
        .expect("failed to navigate");

    assert!(page.find("#heading").await.is_ok());
    assert!(
        page.find("#does-not-exist").await.is_err(),
        "find has no implicit wait; missing element must fail immediately"
    );

    session.close().await.expect("failed to close");
}

#[tokio::test]
#[ignore]
async fn wait_for_visible_distinguishes_presence_from_visibility() {
    let session = Session::launch(SessionConfig::default())
        .await
        .expect("failed to launch");

    let page = session.new_page().await.expect("failed to create page");
    page.navigate(&data_url(&test_html_page()))
        .await
        .expect("failed to navigate");

    // The toast is present from the start...
    page.wait_for_selector("#toast", WaitConfig::default())
        .await
        .expect("toast should be present");

    // ...but only becomes visible after the page's timer fires.
    page.wait_for_visible("#toast", WaitConfig::default())
        .await
        .expect("toast should become visible");

    let text = page.text_of("#toast").await.expect("failed to read toast");
    assert!(text.contains("Downloaded"), "toast text was '{text}'");

    session.close().await.expect("failed to close");
}

#[tokio::test]
#[ignore]
async fn wait_for_selector_times_out() {
    let session = Session::launch(SessionConfig::default())
        .await
        .expect("failed to launch");

    let page = session.new_page().await.expect("failed to create page");
    page.navigate(&data_url(&test_html_page()))
        .await
        .expect("failed to navigate");

    let config = WaitConfig::new(Duration::from_millis(500), Duration::from_millis(50));
    let result = page.wait_for_selector("#non-existent", config).await;

    assert!(
        result.is_err(),
        "Should timeout waiting for non-existent element"
    );

    session.close().await.expect("failed to close");
}

#[tokio::test]
#[ignore]
async fn file_input_accepts_fixture_path() {
    let session = Session::launch(SessionConfig::default())
        .await
        .expect("failed to launch");

    let page = session.new_page().await.expect("failed to create page");
    page.navigate(&data_url(&test_html_page()))
        .await
        .expect("failed to navigate");

    let mut fixture = tempfile::NamedTempFile::new().expect("failed to create fixture");
    fixture.write_all(b"fixture bytes").expect("failed to write");

    page.set_file_input("input[type=file]", fixture.path())
        .await
        .expect("failed to attach file");

    let attached: i64 = page
        .evaluate("document.querySelector('input[type=file]').files.length")
        .await
        .expect("failed to count files");
    assert_eq!(attached, 1, "input should hold exactly the attached file");

    session.close().await.expect("failed to close");
}

#[tokio::test]
#[ignore]
async fn screenshot_produces_png() {
    let session = Session::launch(SessionConfig::default())
        .await
        .expect("failed to launch");

    let page = session.new_page().await.expect("failed to create page");
    page.navigate(&data_url(&test_html_page()))
        .await
        .expect("failed to navigate");

    let screenshot = page.screenshot().await.expect("failed to take screenshot");

    assert!(!screenshot.is_empty(), "Screenshot should not be empty");
    // PNG files start with magic bytes: 89 50 4E 47
    assert_eq!(
        &screenshot[0..4],
        &[0x89, 0x50, 0x4E, 0x47],
        "Screenshot should be PNG format"
    );

    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join("shots/failure_example.png");
    page.save_screenshot(&path)
        .await
        .expect("failed to save screenshot");
    assert!(path.is_file(), "screenshot file should exist");

    session.close().await.expect("failed to close");
}

#[tokio::test]
#[ignore]
async fn operations_on_closed_session_fail() {
    let session = Session::launch(SessionConfig::default())
        .await
        .expect("failed to launch");

    session.close().await.expect("failed to close");

    assert!(
        session.new_page().await.is_err(),
        "new_page on a closed session must fail"
    );
}

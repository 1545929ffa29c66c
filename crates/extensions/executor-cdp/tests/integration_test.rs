//! Integration tests against a live browser.
//!
//! These tests require Chrome running with remote debugging on port 9222.
//! Run with: cargo test -p embedbridge-executor-cdp --test integration_test -- --ignored --nocapture

use std::time::Duration;

use embedbridge_core::{
    AddressingStrategy, BridgeError, ExecutionError, PrimitiveResult, ScriptBridge, ScriptExecutor,
    HOST_IDENTITY_SCRIPT,
};
use embedbridge_executor_cdp::{list_pages, CdpExecutorConfig, CdpScriptExecutor};

/// A page hosting a fake plugin object with the Silverlight object model.
const PLUGIN_PAGE: &str = "data:text/html,<script>\
document['panel1'] = {\
isLoaded: true, source: 'app.xap',\
isVersionSupported: function (v) { return v === '4.0'; },\
settings: { maxFrameRate: 60, windowless: false },\
content: { actualWidth: 640, findName: function (n) { return 'found:' + n; },\
Page: { Title: 'start' } }\
};\
</script>";

fn connect() -> CdpScriptExecutor {
    let config = CdpExecutorConfig {
        url: Some(PLUGIN_PAGE.to_string()),
        ..Default::default()
    };
    CdpScriptExecutor::connect(&config).expect("Chrome should be reachable on port 9222")
}

#[test]
#[ignore = "requires Chrome with --remote-debugging-port=9222"]
fn test_host_detection_on_chrome() {
    let bridge = ScriptBridge::create(connect(), "panel1", Some("Page")).unwrap();
    assert_eq!(bridge.strategy(), Some(AddressingStrategy::ViaDocument));
    assert!(bridge.is_loaded().unwrap());
    assert_eq!(bridge.source().unwrap(), "app.xap");
    let _ = bridge.into_executor().close();
}

#[test]
#[ignore = "requires Chrome with --remote-debugging-port=9222"]
fn test_namespaces_on_chrome() {
    let bridge = ScriptBridge::create(connect(), "panel1", Some("Page")).unwrap();

    assert!(bridge.is_version_supported("4.0").unwrap());
    assert_eq!(bridge.actual_width().unwrap(), 640);
    assert_eq!(bridge.max_frame_rate().unwrap(), 60);
    assert!(!bridge.is_windowless().unwrap());
    assert_eq!(bridge.find_name("Button1").unwrap(), "found:Button1");

    assert_eq!(bridge.set_scoped_content_property("Title", "next").unwrap(), "next");
    assert_eq!(bridge.get_scoped_content_property("Title").unwrap(), "next");
    let _ = bridge.into_executor().close();
}

#[test]
#[ignore = "requires Chrome with --remote-debugging-port=9222"]
fn test_missing_object_on_chrome() {
    let bridge = ScriptBridge::create(connect(), "nothere", None).unwrap();
    let err = bridge.get_direct_property("isLoaded").unwrap_err();
    assert!(matches!(err, BridgeError::ExecutionFailure { .. }));

    let missing = bridge.get_content_property("doesNotExist");
    assert!(missing.is_err());
    let _ = bridge.into_executor().close();
}

#[test]
#[ignore = "requires Chrome with --remote-debugging-port=9222"]
fn test_executor_reports_user_agent() {
    let executor = connect();
    let identity = executor.execute("navigator.userAgent;").unwrap();
    assert!(identity.as_str().unwrap_or_default().contains("Mozilla"));
    let _ = executor.close();
}

/// Executor whose host identity query throws, as a page without `navigator` would.
#[derive(Debug)]
struct BrokenIdentity(CdpScriptExecutor);

impl ScriptExecutor for BrokenIdentity {
    fn execute(&self, script: &str) -> Result<PrimitiveResult, ExecutionError> {
        if script == HOST_IDENTITY_SCRIPT {
            return Err(ExecutionError::Script("ReferenceError: navigator is not defined".into()));
        }
        self.0.execute(script)
    }
}

fn page_is_open(target_id: &str) -> bool {
    list_pages("http://localhost:9222", Duration::from_secs(5))
        .unwrap()
        .iter()
        .any(|page| page.id == target_id)
}

#[test]
#[ignore = "requires Chrome with --remote-debugging-port=9222"]
fn test_failed_bridge_construction_closes_page() {
    let executor = connect();
    assert!(executor.owns_target());
    let target_id = executor.target_id().to_string();
    assert!(page_is_open(&target_id));

    let err = ScriptBridge::create(BrokenIdentity(executor), "panel1", None).unwrap_err();
    assert!(matches!(err, BridgeError::ExecutionFailure { .. }));
    assert!(!page_is_open(&target_id));
}

#[test]
#[ignore = "requires Chrome with --remote-debugging-port=9222"]
fn test_dropping_executor_keeps_attached_page() {
    let owner = connect();
    let target_id = owner.target_id().to_string();

    let attached = CdpScriptExecutor::connect(&CdpExecutorConfig {
        target_id: Some(target_id.clone()),
        ..Default::default()
    })
    .unwrap();
    assert!(!attached.owns_target());
    drop(attached);
    assert!(page_is_open(&target_id));

    drop(owner);
    assert!(!page_is_open(&target_id));
}

#[test]
#[ignore = "requires Chrome with --remote-debugging-port=9222"]
fn test_new_page_lands_on_requested_url() {
    let executor = CdpScriptExecutor::connect(&CdpExecutorConfig {
        url: Some("data:text/html,<title>a&b</title>#x".to_string()),
        ..Default::default()
    })
    .unwrap();
    assert!(executor.url().unwrap().starts_with("data:text/html"));
    assert_eq!(executor.execute("document.title;").unwrap(), "a&b");
}

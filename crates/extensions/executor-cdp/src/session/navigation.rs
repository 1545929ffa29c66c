//! Navigation operations for CDP page session.

use std::time::{Duration, Instant};

use serde_json::{json, Value};
use tracing::debug;

use crate::error::CdpError;

use super::core::PageSession;

impl PageSession {
    /// Navigate to URL and wait until the new document has loaded.
    ///
    /// Waits at most the channel's request timeout.
    pub async fn navigate(&self, url: &str) -> Result<String, CdpError> {
        let result = self
            .call("Page.navigate", Some(json!({"url": url})))
            .await?;

        if let Some(error) = result.get("errorText") {
            return Err(CdpError::NavigationFailed(
                error.as_str().unwrap_or("Unknown error").to_string(),
            ));
        }

        let frame_id = result["frameId"]
            .as_str()
            .unwrap_or("main")
            .to_string();

        // Same-document navigations (fragment changes) carry no loader.
        if let Some(loader_id) = result["loaderId"].as_str() {
            self.wait_for_loader(loader_id, self.channel.timeout()).await?;
        }
        self.wait_for_load(self.channel.timeout()).await?;

        debug!("Navigated to {}", url);
        Ok(frame_id)
    }

    /// Poll the frame tree until the main frame runs the given loader.
    ///
    /// Until then `document` still belongs to the previous page.
    async fn wait_for_loader(&self, loader_id: &str, timeout: Duration) -> Result<(), CdpError> {
        let start = Instant::now();

        loop {
            let tree = self.call("Page.getFrameTree", None).await?;
            if main_frame_loader(&tree) == Some(loader_id) {
                return Ok(());
            }

            if start.elapsed() > timeout {
                return Err(CdpError::Timeout(format!(
                    "Navigation did not commit within {:?}",
                    timeout
                )));
            }

            tokio::time::sleep(Duration::from_millis(50)).await;
        }
    }

    /// Poll `document.readyState` until the page is usable.
    pub async fn wait_for_load(&self, timeout: Duration) -> Result<(), CdpError> {
        let start = Instant::now();

        loop {
            let result = self.evaluate("document.readyState").await?;

            if let Some(state) = result.as_str() {
                if state == "complete" || state == "interactive" {
                    return Ok(());
                }
            }

            if start.elapsed() > timeout {
                return Err(CdpError::Timeout("Page load timeout".to_string()));
            }

            tokio::time::sleep(Duration::from_millis(100)).await;
        }
    }

    /// Get current URL.
    pub async fn get_url(&self) -> Result<String, CdpError> {
        let result = self.evaluate("window.location.href").await?;
        Ok(result.as_str().unwrap_or("").to_string())
    }
}

/// Loader id of the main frame in a `Page.getFrameTree` result.
pub(super) fn main_frame_loader(tree: &Value) -> Option<&str> {
    tree["frameTree"]["frame"]["loaderId"].as_str()
}

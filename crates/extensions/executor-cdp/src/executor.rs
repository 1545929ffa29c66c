//! Blocking script executor over a CDP page session.

use std::time::Duration;

use tokio::runtime::Runtime;
use tracing::{debug, info, warn};

use embedbridge_core::{ExecutionError, PrimitiveResult, ScriptExecutor};

use crate::client::{CdpClient, DEFAULT_TIMEOUT};
use crate::error::CdpError;
use crate::protocol::PageInfo;
use crate::session::PageSession;

/// Where the executor evaluates scripts.
#[derive(Debug, Clone)]
pub struct CdpExecutorConfig {
    /// Remote debugging endpoint, e.g. `http://localhost:9222`.
    pub endpoint: String,
    /// Attach to this target instead of opening a new page.
    pub target_id: Option<String>,
    /// Page to load before the first script runs.
    pub url: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for CdpExecutorConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:9222".to_string(),
            target_id: None,
            url: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// [`ScriptExecutor`] that evaluates statements in a Chrome page.
///
/// Owns a private Tokio runtime and blocks the calling thread for every
/// statement. Must not be used from inside another Tokio runtime.
///
/// A page opened by [`connect`](Self::connect) is closed when the executor is
/// dropped; a page attached by target id is left open.
pub struct CdpScriptExecutor {
    // Drop order: session and client before the runtime they run on.
    session: PageSession,
    client: CdpClient,
    runtime: Runtime,
    owns_target: bool,
}

impl CdpScriptExecutor {
    /// Connect to the browser and attach to (or open) the page.
    pub fn connect(config: &CdpExecutorConfig) -> Result<Self, CdpError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("embedbridge-cdp")
            .enable_all()
            .build()
            .map_err(|e| CdpError::Runtime(e.to_string()))?;

        let (client, session) = runtime.block_on(async {
            let client = CdpClient::connect_with_timeout(&config.endpoint, config.timeout).await?;

            let session = match &config.target_id {
                Some(target_id) => {
                    let session = client.attach_page(target_id).await?;
                    if let Some(url) = &config.url {
                        session.navigate(url).await?;
                    }
                    session
                }
                None => client.new_page(config.url.as_deref()).await?,
            };
            Ok::<_, CdpError>((client, session))
        })?;

        info!(
            "Script executor attached to target {} via {}",
            session.target_id(),
            config.endpoint
        );

        Ok(Self {
            session,
            client,
            runtime,
            owns_target: config.target_id.is_none(),
        })
    }

    /// Target the executor is attached to.
    pub fn target_id(&self) -> &str {
        self.session.target_id()
    }

    /// Browser user agent reported by the endpoint.
    pub fn browser_user_agent(&self) -> &str {
        self.client.user_agent()
    }

    /// Navigate the attached page.
    pub fn navigate(&self, url: &str) -> Result<(), CdpError> {
        self.runtime.block_on(self.session.navigate(url))?;
        Ok(())
    }

    /// Current page URL.
    pub fn url(&self) -> Result<String, CdpError> {
        self.runtime.block_on(self.session.get_url())
    }

    /// List the pages open in the browser.
    pub fn list_pages(&self) -> Result<Vec<PageInfo>, CdpError> {
        self.runtime.block_on(self.client.list_pages())
    }

    /// Whether the page was opened by this executor and closes with it.
    pub fn owns_target(&self) -> bool {
        self.owns_target
    }

    /// Close the attached page now, whether or not this executor opened it.
    pub fn close(mut self) -> Result<(), CdpError> {
        self.owns_target = false;
        let target_id = self.session.target_id().to_string();
        self.runtime.block_on(self.client.close_page(&target_id))?;
        debug!("Closed target {}", target_id);
        Ok(())
    }
}

impl Drop for CdpScriptExecutor {
    fn drop(&mut self) {
        if !self.owns_target {
            return;
        }
        let target_id = self.session.target_id().to_string();
        match self.runtime.block_on(self.client.close_page(&target_id)) {
            Ok(()) => debug!("Closed target {} on drop", target_id),
            Err(e) => warn!("Failed to close target {}: {}", target_id, e),
        }
    }
}

impl std::fmt::Debug for CdpScriptExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CdpScriptExecutor")
            .field("target_id", &self.session.target_id())
            .field("user_agent", &self.client.user_agent())
            .field("owns_target", &self.owns_target)
            .finish()
    }
}

impl ScriptExecutor for CdpScriptExecutor {
    fn execute(&self, script: &str) -> Result<PrimitiveResult, ExecutionError> {
        self.runtime
            .block_on(self.session.evaluate(script))
            .map_err(ExecutionError::from)
    }
}

/// List the pages of a browser without attaching to any of them.
pub fn list_pages(endpoint: &str, timeout: Duration) -> Result<Vec<PageInfo>, CdpError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| CdpError::Runtime(e.to_string()))?;

    runtime.block_on(async {
        let client = CdpClient::connect_with_timeout(endpoint, timeout).await?;
        client.list_pages().await
    })
}

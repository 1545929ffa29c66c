//! Chrome DevTools Protocol script executor for embedbridge.
//!
//! Evaluates bridge statements in a Chrome/Chromium page through
//! `Runtime.evaluate`, behind the blocking [`ScriptExecutor`] contract.
//!
//! ```text
//! ┌──────────────┐  execute()  ┌───────────────────┐  WebSocket/CDP  ┌──────────┐
//! │ ScriptBridge │ ──────────► │ CdpScriptExecutor │ ──────────────► │  Chrome  │
//! └──────────────┘             └───────────────────┘                 └──────────┘
//! ```
//!
//! ## Setup
//!
//! ```bash
//! google-chrome --remote-debugging-port=9222
//! ```
//!
//! ```rust,ignore
//! let executor = CdpScriptExecutor::connect(&CdpExecutorConfig {
//!     url: Some("http://localhost:8000/app.html".into()),
//!     ..Default::default()
//! })?;
//! let bridge = ScriptBridge::create(executor, "silverlightControl", None)?;
//! ```
//!
//! [`ScriptExecutor`]: embedbridge_core::ScriptExecutor

mod client;
mod error;
mod executor;
mod protocol;
mod session;

#[cfg(test)]
mod testing;

pub use client::{CdpClient, DEFAULT_TIMEOUT};
pub use error::CdpError;
pub use executor::{list_pages, CdpExecutorConfig, CdpScriptExecutor};
pub use protocol::*;
pub use session::PageSession;

//! # Embedbridge Core
//!
//! Drive an object embedded in a rendered page (a browser plugin instance
//! such as a Silverlight control) when the only channel into the page is
//! "evaluate this script, give me back a primitive".
//!
//! ## Flow
//!
//! ```text
//! ScriptBridge::create ──► navigator.userAgent ──► resolve() ──► root path
//!        │
//!        └─► accessor ──► StatementBuilder ──► ScriptExecutor::execute ──► Decode
//! ```
//!
//! ## Namespaces
//!
//! - direct: `<root><member>`
//! - content: `<root>content.<member>`
//! - scoped content: `<root>content.<scope key>.<member>`
//! - settings: `<root>settings.<member>`
//!
//! ## Example
//!
//! ```rust,ignore
//! let bridge = ScriptBridge::create(executor, "silverlightControl", Some("Page"))?;
//! if bridge.is_loaded()? {
//!     bridge.set_scoped_content_property("UserName", "admin")?;
//!     bridge.call_scoped_content_method("Login", &[])?;
//! }
//! ```

mod accessors;
mod bridge;
mod decode;
mod error;
mod executor;
mod resolver;
mod statement;

#[cfg(test)]
mod testing;

pub use bridge::{BridgeOptions, ScriptBridge};
pub use decode::{decode_from_str, Decode};
pub use error::{BridgeError, ExecutionError, Result};
pub use executor::{primitive_to_text, PrimitiveResult, ScriptExecutor};
pub use resolver::{resolve, AddressingStrategy, ObjectIdentifier, HOST_IDENTITY_SCRIPT};
pub use statement::{ArgumentEncoding, Invocation, Namespace, ScriptStatement, StatementBuilder};

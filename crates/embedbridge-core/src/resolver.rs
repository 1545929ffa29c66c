//! Host environment detection.
//!
//! Older plugin hosts only expose embedded objects through `window.document`,
//! everything else resolves them through `document` directly.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Script that reports the host identity.
pub const HOST_IDENTITY_SCRIPT: &str = "navigator.userAgent;";

/// Root path template used to reach the embedded object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressingStrategy {
    /// `window.document['<id>'].`
    ViaGlobalDocument,
    /// `document['<id>'].`
    ViaDocument,
}

impl AddressingStrategy {
    /// Build the root path for an object.
    pub fn root_path(self, object_id: &ObjectIdentifier) -> String {
        match self {
            AddressingStrategy::ViaGlobalDocument => {
                format!("window.document['{}'].", object_id.as_str())
            }
            AddressingStrategy::ViaDocument => format!("document['{}'].", object_id.as_str()),
        }
    }
}

impl fmt::Display for AddressingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressingStrategy::ViaGlobalDocument => write!(f, "window.document"),
            AddressingStrategy::ViaDocument => write!(f, "document"),
        }
    }
}

/// Name of the embedded object in the page's global object graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectIdentifier(String);

impl ObjectIdentifier {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ObjectIdentifier {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ObjectIdentifier {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for ObjectIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Legacy host markers, checked in order.
const HOST_MARKERS: &[(&str, AddressingStrategy)] = &[
    // Firefox 3.x
    ("Firefox/3.", AddressingStrategy::ViaGlobalDocument),
    // Internet Explorer
    ("MSIE", AddressingStrategy::ViaGlobalDocument),
];

/// Pick the addressing strategy for a reported host identity.
pub fn resolve(host_identity: &str) -> AddressingStrategy {
    HOST_MARKERS
        .iter()
        .find(|(marker, _)| host_identity.contains(marker))
        .map(|(_, strategy)| *strategy)
        .unwrap_or(AddressingStrategy::ViaDocument)
}

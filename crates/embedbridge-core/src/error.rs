//! Bridge error types.

use thiserror::Error;

/// Failure reported by a [`ScriptExecutor`](crate::ScriptExecutor).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecutionError {
    /// The page's script engine threw while evaluating the statement.
    #[error("Script error: {0}")]
    Script(String),

    /// The channel to the page failed (connection lost, protocol error).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The executor gave up waiting for the page.
    #[error("Timeout: {0}")]
    Timeout(String),
}

/// Script bridge errors.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The executor cannot run scripts at all.
    #[error("Executor does not support script execution")]
    UnsupportedCapability,

    /// The statement was rejected by the host script engine.
    #[error("Execution of `{statement}` failed: {source}")]
    ExecutionFailure {
        statement: String,
        #[source]
        source: ExecutionError,
    },

    /// The statement ran but produced no value.
    #[error("Script `{statement}` returned no value")]
    ScriptResultMissing { statement: String },

    /// A typed accessor could not parse the raw result.
    #[error("Malformed primitive: expected {expected}, got {raw:?}")]
    DecodeFailure { expected: &'static str, raw: String },

    /// Statement text could not be parsed back into its parts.
    #[error("Malformed statement: {0}")]
    MalformedStatement(String),
}

impl BridgeError {
    /// Whether this is a decode failure.
    pub fn is_decode_failure(&self) -> bool {
        matches!(self, BridgeError::DecodeFailure { .. })
    }
}

/// Result type for bridge operations.
pub type Result<T> = std::result::Result<T, BridgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execution_failure_display() {
        let err = BridgeError::ExecutionFailure {
            statement: "document['p'].isLoaded;".to_string(),
            source: ExecutionError::Script("p is undefined".to_string()),
        };
        let display = err.to_string();
        assert!(display.contains("document['p'].isLoaded;"));
        assert!(display.contains("p is undefined"));
    }

    #[test]
    fn test_decode_failure_includes_raw_value() {
        let err = BridgeError::DecodeFailure {
            expected: "boolean",
            raw: "notabool".to_string(),
        };
        assert!(err.to_string().contains("notabool"));
        assert!(err.to_string().contains("boolean"));
        assert!(err.is_decode_failure());
    }

    #[test]
    fn test_result_missing_display() {
        let err = BridgeError::ScriptResultMissing {
            statement: "document['p'].root;".to_string(),
        };
        assert!(err.to_string().contains("no value"));
        assert!(!err.is_decode_failure());
    }

    #[test]
    fn test_execution_error_source_is_exposed() {
        use std::error::Error as _;

        let err = BridgeError::ExecutionFailure {
            statement: "x;".to_string(),
            source: ExecutionError::Timeout("30s".to_string()),
        };
        let source = err.source().map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("Timeout: 30s"));
    }
}

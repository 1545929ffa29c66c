//! Script execution capability.

use std::rc::Rc;
use std::sync::Arc;

use serde_json::Value;

use crate::error::ExecutionError;

/// Primitive value returned by the page's script engine.
pub type PrimitiveResult = Value;

/// Submits a single script statement to the hosting page.
///
/// This is the only channel the bridge uses to reach the page. Timeouts and
/// retries, if any, are the implementation's business.
#[cfg_attr(test, mockall::automock)]
pub trait ScriptExecutor {
    /// Whether this executor can run scripts at all.
    fn supports_scripts(&self) -> bool {
        true
    }

    /// Evaluate `script` and return its value.
    fn execute(&self, script: &str) -> Result<PrimitiveResult, ExecutionError>;
}

impl<E: ScriptExecutor + ?Sized> ScriptExecutor for &E {
    fn supports_scripts(&self) -> bool {
        (**self).supports_scripts()
    }

    fn execute(&self, script: &str) -> Result<PrimitiveResult, ExecutionError> {
        (**self).execute(script)
    }
}

impl<E: ScriptExecutor + ?Sized> ScriptExecutor for Box<E> {
    fn supports_scripts(&self) -> bool {
        (**self).supports_scripts()
    }

    fn execute(&self, script: &str) -> Result<PrimitiveResult, ExecutionError> {
        (**self).execute(script)
    }
}

impl<E: ScriptExecutor + ?Sized> ScriptExecutor for Rc<E> {
    fn supports_scripts(&self) -> bool {
        (**self).supports_scripts()
    }

    fn execute(&self, script: &str) -> Result<PrimitiveResult, ExecutionError> {
        (**self).execute(script)
    }
}

impl<E: ScriptExecutor + ?Sized> ScriptExecutor for Arc<E> {
    fn supports_scripts(&self) -> bool {
        (**self).supports_scripts()
    }

    fn execute(&self, script: &str) -> Result<PrimitiveResult, ExecutionError> {
        (**self).execute(script)
    }
}

/// Render a primitive as text, or `None` when the engine produced no value.
pub fn primitive_to_text(value: &PrimitiveResult) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

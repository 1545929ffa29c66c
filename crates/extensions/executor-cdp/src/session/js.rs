//! JavaScript evaluation for CDP page session.

use serde_json::{json, Value};
use tracing::trace;

use crate::error::CdpError;
use crate::protocol::EvaluateResult;

use super::core::PageSession;

impl PageSession {
    /// Evaluate a script and return its value.
    ///
    /// `undefined` and `null` both come back as [`Value::Null`].
    pub async fn evaluate(&self, expression: &str) -> Result<Value, CdpError> {
        let result = self
            .call(
                "Runtime.evaluate",
                Some(json!({
                    "expression": expression,
                    "returnByValue": true,
                    "awaitPromise": true,
                })),
            )
            .await?;

        let value = Self::evaluation_value(result)?;
        trace!("evaluate {} => {}", expression, value);
        Ok(value)
    }

    /// Extract the value of a `Runtime.evaluate` response.
    pub(crate) fn evaluation_value(result: Value) -> Result<Value, CdpError> {
        let evaluated: EvaluateResult = serde_json::from_value(result)?;

        if let Some(exception) = evaluated.exception_details {
            return Err(CdpError::JavaScript(exception.message()));
        }

        let remote = evaluated.result;
        if let Some(value) = remote.value {
            return Ok(value);
        }
        // NaN, Infinity, -0 and bigints have no JSON form.
        if let Some(unserializable) = remote.unserializable_value {
            return Ok(Value::String(unserializable));
        }
        Ok(Value::Null)
    }
}

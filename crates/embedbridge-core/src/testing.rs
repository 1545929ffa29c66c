//! Test executor that replays canned results and records scripts.

use std::cell::RefCell;
use std::collections::VecDeque;

use serde_json::Value;

use crate::error::ExecutionError;
use crate::executor::{PrimitiveResult, ScriptExecutor};

#[derive(Debug)]
pub(crate) struct ScriptedExecutor {
    responses: RefCell<VecDeque<Result<Value, ExecutionError>>>,
    scripts: RefCell<Vec<String>>,
    supports_scripts: bool,
}

impl ScriptedExecutor {
    pub(crate) fn new(responses: Vec<Value>) -> Self {
        Self::with_results(responses.into_iter().map(Ok).collect())
    }

    pub(crate) fn with_results(results: Vec<Result<Value, ExecutionError>>) -> Self {
        Self {
            responses: RefCell::new(results.into()),
            scripts: RefCell::new(Vec::new()),
            supports_scripts: true,
        }
    }

    pub(crate) fn incapable() -> Self {
        Self {
            supports_scripts: false,
            ..Self::new(Vec::new())
        }
    }

    pub(crate) fn scripts(&self) -> Vec<String> {
        self.scripts.borrow().clone()
    }
}

impl ScriptExecutor for ScriptedExecutor {
    fn supports_scripts(&self) -> bool {
        self.supports_scripts
    }

    fn execute(&self, script: &str) -> Result<PrimitiveResult, ExecutionError> {
        self.scripts.borrow_mut().push(script.to_string());
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ExecutionError::Script(format!("no response scripted for {script}"))))
    }
}

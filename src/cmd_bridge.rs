//! Bridge subcommand handlers: get, set, call and status against a live page.

use std::fmt::Display;

use tracing::{info, warn};

use embedbridge_config::{Config, ConfigValidator};
use embedbridge_core::{Namespace, Result as BridgeResult, ScriptBridge, ScriptStatement, StatementBuilder};
use embedbridge_executor_cdp::CdpScriptExecutor;

use crate::cli::{Operation, ValueKind};
use crate::executor_config;

/// Render the statement for an operation.
pub(crate) fn statement_for(statements: &StatementBuilder, operation: &Operation) -> ScriptStatement {
    match operation {
        Operation::Get { namespace, name, .. } => statements.read((*namespace).into(), name),
        Operation::Set { name, value } => statements.assign(Namespace::ScopedContent, name, value),
        Operation::Call { namespace, name, args } => statements.call((*namespace).into(), name, args),
    }
}

/// Validate the configuration, connect to the browser and build the bridge.
///
/// A page opened here closes when the executor is dropped, including when
/// bridge construction fails.
fn open_bridge(config: &Config) -> Result<ScriptBridge<CdpScriptExecutor>, Box<dyn std::error::Error>> {
    let validation = ConfigValidator::validate(config);
    for warning in &validation.warnings {
        warn!("{}", warning);
    }
    if let Some(error) = validation.errors.first() {
        return Err(error.to_string().into());
    }

    let options = config.bridge.to_options()?;
    let executor = CdpScriptExecutor::connect(&executor_config(config))?;
    info!("Attached to target {}", executor.target_id());

    Ok(ScriptBridge::from_options(executor, options)?)
}

/// Run one get/set/call operation and print its result.
pub(crate) fn handle_operation(config: &Config, operation: Operation) -> Result<(), Box<dyn std::error::Error>> {
    let bridge = open_bridge(config)?;
    let statement = statement_for(bridge.statements(), &operation);

    let output = match operation {
        Operation::Get { kind: ValueKind::Bool, .. } => bridge.evaluate_as::<bool>(&statement).map(|v| v.to_string()),
        Operation::Get { kind: ValueKind::Int, .. } => bridge.evaluate_as::<i64>(&statement).map(|v| v.to_string()),
        _ => bridge.evaluate(&statement),
    };
    println!("{}", output?);
    Ok(())
}

/// Print the plugin object's standard properties.
pub(crate) fn handle_status(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let bridge = open_bridge(config)?;

    println!("Browser:       {}", bridge.executor().browser_user_agent());
    println!("Target:        {}", bridge.executor().target_id());
    match bridge.strategy() {
        Some(strategy) => println!("Addressing:    {}", strategy),
        None => println!("Addressing:    explicit root"),
    }
    println!("Root:          {}", bridge.root_prefix());
    println!();

    show("isLoaded", bridge.is_loaded());
    show("source", bridge.source());
    show("actualWidth", bridge.actual_width());
    show("actualHeight", bridge.actual_height());
    show("fullScreen", bridge.is_full_screen());
    show("maxFrameRate", bridge.max_frame_rate());
    show("windowless", bridge.is_windowless());
    show("enableHtmlAccess", bridge.is_html_access_enabled());
    Ok(())
}

fn show<T: Display>(label: &str, value: BridgeResult<T>) {
    match value {
        Ok(v) => println!("  {:<18} {}", label, v),
        Err(e) => println!("  {:<18} <{}>", label, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::NamespaceArg;
    use embedbridge_core::ArgumentEncoding;

    fn builder() -> StatementBuilder {
        StatementBuilder::new("document['panel1'].").with_scope_key(Some("Page"))
    }

    #[test]
    fn test_statement_for_get() {
        let op = Operation::Get {
            namespace: NamespaceArg::Settings,
            name: "maxFrameRate".to_string(),
            kind: ValueKind::Int,
        };
        assert_eq!(
            statement_for(&builder(), &op).as_str(),
            "document['panel1'].settings.maxFrameRate;"
        );
    }

    #[test]
    fn test_statement_for_set_is_scoped() {
        let op = Operation::Set {
            name: "Title".to_string(),
            value: "next".to_string(),
        };
        assert_eq!(
            statement_for(&builder(), &op).as_str(),
            "document['panel1'].content.Page.Title='next';"
        );
    }

    #[test]
    fn test_statement_for_call_with_escaping() {
        let statements = builder().with_encoding(ArgumentEncoding::Escaped);
        let op = Operation::Call {
            namespace: NamespaceArg::Scoped,
            name: "Say".to_string(),
            args: vec!["it's".to_string(), "b".to_string()],
        };
        assert_eq!(
            statement_for(&statements, &op).as_str(),
            r"document['panel1'].content.Page.Say('it\'s','b');"
        );
    }

    #[test]
    fn test_open_bridge_rejects_missing_object() {
        let err = open_bridge(&Config::default()).unwrap_err();
        assert!(err.to_string().contains("object_id"));
    }
}

//! Offline and discovery subcommands: resolve, render and pages.

use std::time::Duration;

use embedbridge_config::Config;
use embedbridge_core::{resolve, AddressingStrategy, ObjectIdentifier, StatementBuilder};
use embedbridge_executor_cdp::list_pages;

use crate::cli::{Operation, StrategyArg};
use crate::cmd_bridge::statement_for;

/// Show which addressing strategy a host identity selects, and the root path it yields.
pub(crate) fn handle_resolve(config: &Config, identity: &str) -> Result<(), Box<dyn std::error::Error>> {
    let strategy = resolve(identity);
    println!("{:?}", strategy);

    let object_id = config
        .bridge
        .object_id
        .as_deref()
        .filter(|id| !id.is_empty())
        .unwrap_or("<id>");
    println!("{}", strategy.root_path(&ObjectIdentifier::new(object_id)));
    Ok(())
}

/// Build the statement builder a bridge would use, without a browser.
///
/// An explicit root prefix wins over the requested strategy.
pub(crate) fn offline_statements(
    config: &Config,
    strategy: AddressingStrategy,
) -> Result<StatementBuilder, Box<dyn std::error::Error>> {
    let options = config.bridge.to_options()?;
    let root = match &options.root_prefix {
        Some(prefix) => prefix.clone(),
        None => strategy.root_path(&options.object_id),
    };
    Ok(StatementBuilder::new(root)
        .with_scope_key(options.scope_key.as_deref())
        .with_encoding(options.encoding))
}

/// Print the statement an operation would execute.
pub(crate) fn handle_render(
    config: &Config,
    strategy: StrategyArg,
    operation: Operation,
) -> Result<(), Box<dyn std::error::Error>> {
    let statements = offline_statements(config, strategy.into())?;
    println!("{}", statement_for(&statements, &operation));
    Ok(())
}

/// List the pages open in the browser.
pub(crate) fn handle_pages(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let timeout = Duration::from_secs(config.browser.timeout_secs);
    let pages = list_pages(&config.browser.endpoint, timeout)?;

    if pages.is_empty() {
        println!("No pages open.");
        return Ok(());
    }

    println!("{:<34} {:<10} {}", "ID", "TYPE", "URL");
    for page in pages {
        println!("{:<34} {:<10} {}", page.id, page.page_type, page.url);
        if !page.title.is_empty() {
            println!("{:<34} {:<10} {}", "", "", page.title);
        }
    }
    Ok(())
}

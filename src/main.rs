//! embedbridge - drive objects embedded in a web page through its script engine.
//!
//! Main entry point for the embedbridge CLI.

mod cli;
mod cmd_bridge;
mod cmd_inspect;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing::{debug, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use embedbridge_config::{Config, ConfigLoader, LoggingConfig};
use embedbridge_core::ArgumentEncoding;
use embedbridge_executor_cdp::CdpExecutorConfig;

use cli::{Cli, Commands};
use cmd_bridge::handle_operation;
use cmd_inspect::{handle_pages, handle_render, handle_resolve};

/// Get the .embedbridge directory path.
fn embedbridge_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".embedbridge"))
        .unwrap_or_else(|| PathBuf::from(".embedbridge"))
}

/// Initialize tracing with console and optional file output.
///
/// Log files go to `logging.dir` (default ~/.embedbridge/logs/) with daily rotation.
/// The console layer writes to stderr so command output on stdout stays clean.
fn init_tracing(logging: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let console = fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr)
        .boxed();

    let file = if logging.file {
        let log_dir = match &logging.dir {
            Some(dir) => PathBuf::from(ConfigLoader::expand_path(dir)),
            None => embedbridge_dir().join("logs"),
        };
        std::fs::create_dir_all(&log_dir)?;

        let file_appender = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix("embedbridge")
            .filename_suffix("log")
            .max_log_files(30)
            .build(&log_dir)?;
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        // Keep the writer alive for the program duration.
        static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
            std::sync::OnceLock::new();
        let _ = GUARD.set(guard);

        Some(fmt::layer().with_writer(non_blocking).with_ansi(false).boxed())
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console)
        .with(file)
        .init();

    Ok(())
}

/// Load the configuration file and apply command-line overrides.
///
/// An explicit `--config` must exist; the default location is optional.
fn load_config(cli: &Cli) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => ConfigLoader::load(path)?,
        None => ConfigLoader::load_or_default(&ConfigLoader::default_path())?,
    };
    apply_overrides(cli, &mut config);
    Ok(config)
}

fn apply_overrides(cli: &Cli, config: &mut Config) {
    if let Some(endpoint) = &cli.endpoint {
        config.browser.endpoint = endpoint.clone();
    }
    if let Some(target) = &cli.target {
        config.browser.target_id = Some(target.clone());
    }
    if let Some(url) = &cli.url {
        config.browser.url = Some(url.clone());
    }
    if let Some(object) = &cli.object {
        config.bridge.object_id = Some(object.clone());
    }
    if let Some(scope_key) = &cli.scope_key {
        config.bridge.scope_key = Some(scope_key.clone());
    }
    if let Some(prefix) = &cli.root_prefix {
        config.bridge.root_prefix = Some(prefix.clone());
    }
    if cli.escape_arguments {
        config.bridge.argument_encoding = ArgumentEncoding::Escaped;
    }
}

/// Executor settings derived from the `[browser]` section.
pub(crate) fn executor_config(config: &Config) -> CdpExecutorConfig {
    CdpExecutorConfig {
        endpoint: config.browser.endpoint.clone(),
        target_id: config.browser.target_id.clone(),
        url: config.browser.url.clone(),
        timeout: Duration::from_secs(config.browser.timeout_secs),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    if let Err(e) = init_tracing(&config.logging) {
        eprintln!("Failed to initialize file logging: {}", e);
    }
    debug!("Effective configuration: {:?}", config);

    match cli.command {
        Commands::Resolve { identity } => handle_resolve(&config, &identity),
        Commands::Render { strategy, operation } => handle_render(&config, strategy, operation),
        Commands::Run(operation) => handle_operation(&config, operation),
        Commands::Status => cmd_bridge::handle_status(&config),
        Commands::Pages => handle_pages(&config),
    }
    .inspect_err(|e| warn!("Command failed: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_replace_config_values() {
        let cli = Cli::try_parse_from([
            "embedbridge", "--endpoint", "http://127.0.0.1:9333", "-o", "panel2", "--escape-arguments",
            "status",
        ])
        .unwrap();
        let mut config = ConfigLoader::load_str(
            r#"
[bridge]
object_id = "panel1"
scope_key = "Page"
"#,
        )
        .unwrap();

        apply_overrides(&cli, &mut config);

        assert_eq!(config.browser.endpoint, "http://127.0.0.1:9333");
        assert_eq!(config.bridge.object_id.as_deref(), Some("panel2"));
        assert_eq!(config.bridge.scope_key.as_deref(), Some("Page"));
        assert_eq!(config.bridge.argument_encoding, ArgumentEncoding::Escaped);
    }

    #[test]
    fn test_executor_config_from_browser_section() {
        let config = ConfigLoader::load_str(
            r#"
[browser]
endpoint = "http://localhost:9223"
target_id = "ABC"
timeout_secs = 5
"#,
        )
        .unwrap();

        let exec = executor_config(&config);
        assert_eq!(exec.endpoint, "http://localhost:9223");
        assert_eq!(exec.target_id.as_deref(), Some("ABC"));
        assert!(exec.url.is_none());
        assert_eq!(exec.timeout, Duration::from_secs(5));
    }
}

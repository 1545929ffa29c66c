//! CLI definitions for embedbridge.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use embedbridge_core::{AddressingStrategy, Namespace};

/// embedbridge CLI.
#[derive(Parser)]
#[command(name = "embedbridge")]
#[command(about = "Drive objects embedded in a web page through its script engine")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path (default: ~/.embedbridge/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Chrome remote debugging endpoint
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Attach to an existing page instead of opening a new one
    #[arg(long, global = true)]
    pub target: Option<String>,

    /// Load this URL before talking to the object
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Id of the embedded object
    #[arg(short, long, global = true)]
    pub object: Option<String>,

    /// Scope key under the content namespace
    #[arg(long, global = true)]
    pub scope_key: Option<String>,

    /// Explicit root path, e.g. "document['panel1']." (skips host detection)
    #[arg(long, global = true)]
    pub root_prefix: Option<String>,

    /// Escape quotes and backslashes inside argument values
    #[arg(long, global = true)]
    pub escape_arguments: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Show the addressing strategy chosen for a host identity
    Resolve {
        /// User agent string
        identity: String,
    },

    /// Print the statement an operation would run, without a browser
    Render {
        /// Addressing strategy to render with
        #[arg(long, value_enum, default_value_t = StrategyArg::Document)]
        strategy: StrategyArg,

        #[command(subcommand)]
        operation: Operation,
    },

    #[command(flatten)]
    Run(Operation),

    /// Print the plugin object's standard properties
    Status,

    /// List the pages open in the browser
    Pages,
}

#[derive(Subcommand, Clone)]
pub(crate) enum Operation {
    /// Read a property
    Get {
        #[arg(value_enum)]
        namespace: NamespaceArg,

        /// Property name
        name: String,

        /// Decode the value as
        #[arg(long = "as", value_enum, default_value_t = ValueKind::Text)]
        kind: ValueKind,
    },

    /// Assign a property under the scoped content namespace
    Set {
        /// Property name
        name: String,

        /// Value (single-quoted in the statement)
        value: String,
    },

    /// Call a method
    Call {
        #[arg(value_enum)]
        namespace: NamespaceArg,

        /// Method name
        name: String,

        /// Arguments, each passed as a string
        args: Vec<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum NamespaceArg {
    Direct,
    Content,
    Scoped,
    Settings,
}

impl From<NamespaceArg> for Namespace {
    fn from(arg: NamespaceArg) -> Self {
        match arg {
            NamespaceArg::Direct => Namespace::Direct,
            NamespaceArg::Content => Namespace::Content,
            NamespaceArg::Scoped => Namespace::ScopedContent,
            NamespaceArg::Settings => Namespace::Settings,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum StrategyArg {
    /// document['<id>'].
    Document,
    /// window.document['<id>'].
    WindowDocument,
}

impl From<StrategyArg> for AddressingStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Document => AddressingStrategy::ViaDocument,
            StrategyArg::WindowDocument => AddressingStrategy::ViaGlobalDocument,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ValueKind {
    Text,
    Bool,
    Int,
}

// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Command-line arguments for `layerdag`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "layerdag",
    version,
    about = "Query a dependency manifest and print it in parallel-friendly layers.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the dependency manifest (TOML).
    ///
    /// Default: `Layerdag.toml` in the current working directory.
    #[arg(long, value_name = "PATH", default_value = "Layerdag.toml")]
    pub manifest: PathBuf,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `LAYERDAG_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print nodes grouped into layers; every layer only depends on earlier ones.
    Layers {
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Append each node's description (text format only).
        #[arg(long)]
        describe: bool,
    },

    /// Print a flat topological order, one node per line.
    Order,

    /// Print everything NODE depends on.
    Deps {
        node: String,

        /// Only direct dependencies.
        #[arg(long)]
        direct: bool,
    },

    /// Print everything that depends on NODE.
    Dependents {
        node: String,

        /// Only direct dependents.
        #[arg(long)]
        direct: bool,
    },

    /// Print nodes that depend on nothing.
    Leaves,

    /// Validate the manifest and print a short summary.
    Check,

    /// Render the graph in Graphviz DOT format.
    Dot,
}

/// Output format for `layers`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

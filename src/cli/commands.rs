//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - list: list tools in the catalog
//! - show: show one tool definition
//! - export: export all definitions as JSON
//! - resolve: resolve an annotated type expression
//! - classify: print the value schema of a type expression

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// toolwire - tool definition catalog and wire schema inspector
#[derive(Parser, Debug)]
#[command(name = "toolwire")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Catalog file (overrides catalog.path from config)
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List tools in the catalog
    List {
        /// Show only tools in this toolkit
        #[arg(short, long)]
        toolkit: Option<String>,
    },

    /// Show a tool definition
    Show {
        /// Fully qualified or short tool name
        name: String,
    },

    /// Export all tool definitions as JSON
    Export {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Export LLM tool schemas instead of full definitions
        #[arg(long)]
        llm: bool,
    },

    /// Resolve a type expression to its effective type and description
    Resolve {
        /// Type expression, e.g. 'Annotated[str, "desc"]'
        expr: String,
    },

    /// Classify a type expression and print its value schema
    Classify {
        /// Type expression, e.g. 'list[int]'
        expr: String,
    },
}

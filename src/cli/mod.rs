//! CLI module for toolwire - command-line interface and subcommands.
//!
//! Provides the main entry point with subcommands for inspecting a tool
//! catalog and resolving individual type expressions.

pub mod commands;

pub use commands::Cli;

//! Command-line interface for Noether
//!
//! This module handles parsing command-line arguments and provides
//! utilities for the different execution modes.

use clap::Parser;

/// Command-line arguments for Noether
#[derive(Parser, Debug)]
#[command(name = "noether")]
#[command(about = "An arithmetic expression REPL and evaluator", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Evaluate expressions and exit (semicolon-separated)
    #[arg(short = 'e', long = "execute", conflicts_with = "script")]
    pub execute: Option<String>,

    /// Evaluate a script file and exit (one expression per line)
    #[arg(short = 's', long = "script", conflicts_with = "execute")]
    pub script: Option<String>,

    /// Suppress the banner (REPL only)
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,

    /// Disable color output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Trigonometric functions take radians instead of degrees
    #[arg(long = "radians")]
    pub radians: bool,
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct Config {
    pub use_degrees: bool,
}

/// Splits a command string by semicolons into individual expressions
///
/// Handles trimming whitespace and filtering empty entries
pub fn split_commands(input: &str) -> Vec<&str> {
    input
        .split(';')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Execution mode for the binary
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExecutionMode {
    Interactive,
    Execute,
    Script,
}

/// Determines whether to show the banner based on execution mode
pub fn should_show_banner(mode: ExecutionMode) -> bool {
    matches!(mode, ExecutionMode::Interactive)
}

impl Cli {
    /// Converts CLI arguments into a Config
    pub fn to_config(&self) -> Config {
        Config {
            use_degrees: !self.radians,
        }
    }

    /// Determines the execution mode from CLI arguments
    pub fn execution_mode(&self) -> ExecutionMode {
        if self.execute.is_some() {
            ExecutionMode::Execute
        } else if self.script.is_some() {
            ExecutionMode::Script
        } else {
            ExecutionMode::Interactive
        }
    }
}

//! Command-line interface definition for kiln.
//!
//! # Command Structure
//!
//! - `kiln resolve` - Resolve the manifest and emit the build plan as JSON
//! - `kiln check` - Resolve the manifest and report a summary

mod commands;

use clap::Parser;

pub use commands::{CheckArgs, Command, ManifestArgs, ResolveArgs};

/// Kiln - build-manifest resolver for asset bundlers
#[derive(Parser, Debug)]
#[command(
    name = "kiln",
    version,
    about = "Resolve asset bundler manifests into build plans",
    long_about = "Kiln reads a declarative bundler manifest (entries, output, rules, plugins),\n\
                  resolves the build mode, expands entry globs deterministically, and emits\n\
                  an immutable build plan for an external bundler."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

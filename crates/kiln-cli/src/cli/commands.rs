use clap::{Args, Subcommand};
use std::path::PathBuf;

/// Available kiln subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve the manifest and print the build plan as JSON
    ///
    /// Expands entry globs, compiles rule patterns and applies the profile
    /// for the resolved mode. Fails without output if any stage fails.
    Resolve(ResolveArgs),

    /// Validate the manifest by resolving it
    ///
    /// Runs the full resolution and prints a short summary instead of the
    /// plan itself.
    Check(CheckArgs),
}

/// Options shared by every command that reads a manifest
#[derive(Args, Debug, Clone, Default)]
pub struct ManifestArgs {
    /// Path to the manifest file (kiln.toml, kiln.json or package.json)
    ///
    /// The manifest's directory becomes the resolution root.
    #[arg(short, long, value_name = "FILE", conflicts_with = "root")]
    pub config: Option<PathBuf>,

    /// Directory to search for a manifest and resolve paths against
    ///
    /// Defaults to the current directory.
    #[arg(short, long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Build mode (development or production)
    ///
    /// Overrides KILN_MODE and the manifest's own `mode`.
    #[arg(short, long, value_name = "MODE")]
    pub mode: Option<String>,
}

/// Arguments for the resolve command
#[derive(Args, Debug)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub manifest: ManifestArgs,

    /// Write the plan to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub out: Option<PathBuf>,
}

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub manifest: ManifestArgs,
}

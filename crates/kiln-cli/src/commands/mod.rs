//! Command implementations.

pub mod check;
pub mod resolve;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use kiln_config::{BuildPlan, ManifestDiscovery, ResolveContext};

use crate::cli::ManifestArgs;
use crate::error::{CliError, Result};
use crate::settings::Settings;

pub use check::execute as check_execute;
pub use resolve::execute as resolve_execute;

/// Locate, load and resolve the manifest described by `args`.
pub(crate) fn load_plan(args: &ManifestArgs) -> Result<BuildPlan> {
    let settings = Settings::load(args)?;

    let (raw, root) = match &settings.config {
        Some(path) => {
            if !path.is_file() {
                return Err(CliError::ManifestNotFound(path.clone()));
            }
            (kiln_config::load_file(path)?, manifest_dir(path))
        }
        None => {
            let root = settings.root.clone().unwrap_or_else(|| PathBuf::from("."));
            (ManifestDiscovery::new(&root).load_value()?, root)
        }
    };

    // Non-UTF-8 variables can never be mode flags
    let env: HashMap<String, String> = std::env::vars_os()
        .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
        .collect();
    let mut ctx = ResolveContext::new(&root).with_env(env);
    if let Some(mode) = settings.mode {
        ctx = ctx.with_mode(mode);
    }

    tracing::debug!(root = %root.display(), "resolving manifest");
    Ok(kiln_config::resolve(raw, &ctx)?)
}

fn manifest_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

//! One-shot resolution pipeline: manifest → mode → entries → rules → plan.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde_json::Value;

use crate::entries::EntryResolver;
use crate::error::Result;
use crate::manifest::Manifest;
use crate::mode::{resolve_mode, ModeFlags};
use crate::plan::{BuildPlan, OutputSpec};
use crate::rules::RuleTable;

/// Inputs that live outside the manifest.
#[derive(Debug, Clone, Default)]
pub struct ResolveContext {
    /// Directory globs, explicit entries and the output path are relative to
    pub root: PathBuf,

    /// Environment flags consulted by the mode resolver
    pub env: HashMap<String, String>,

    /// Caller-supplied mode; beats the manifest's own `mode` key
    pub explicit_mode: Option<String>,
}

impl ResolveContext {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    pub fn with_env(mut self, env: HashMap<String, String>) -> Self {
        self.env = env;
        self
    }

    pub fn with_mode(mut self, mode: impl Into<String>) -> Self {
        self.explicit_mode = Some(mode.into());
        self
    }
}

/// Resolve a raw manifest into a build plan.
///
/// The first failing stage ends resolution and its error is returned as is.
///
/// # Example
///
/// ```no_run
/// use kiln_config::{resolve, ResolveContext};
/// use serde_json::json;
///
/// let manifest = json!({
///     "entry": { "app": ["./vendor/**/*.js", "./js/app.js"] },
///     "output": { "path": "../priv/static/js", "publicPath": "/js/" }
/// });
///
/// let plan = resolve(manifest, &ResolveContext::new("assets")).unwrap();
/// println!("{}", plan.to_json().unwrap());
/// ```
pub fn resolve(raw: Value, ctx: &ResolveContext) -> Result<BuildPlan> {
    let manifest = Manifest::from_value(raw)?;
    resolve_manifest(manifest, ctx)
}

/// Resolve an already loaded manifest.
pub fn resolve_manifest(manifest: Manifest, ctx: &ResolveContext) -> Result<BuildPlan> {
    let root = if ctx.root.as_os_str().is_empty() {
        std::path::absolute(".")?
    } else {
        std::path::absolute(&ctx.root)?
    };
    let span = tracing::debug_span!("resolve", root = %root.display());
    let _guard = span.enter();

    let requested = ctx.explicit_mode.as_deref().or(manifest.mode.as_deref());
    let mode = resolve_mode(&ctx.env, requested)?;
    tracing::debug!(%mode, requested, "resolved build mode");

    let manifest = manifest.materialize_profile(mode)?;
    let flags = ModeFlags::resolve(
        mode,
        manifest.devtool.as_deref(),
        manifest.optimization.minimize,
    );

    let resolver = EntryResolver::new(&root);
    let mut entries = IndexMap::with_capacity(manifest.entry.len());
    for (name, spec) in &manifest.entry {
        let (globs, files) = spec.partition();
        let set = resolver.resolve(name, &globs, &files)?;
        tracing::debug!(entry = %name, count = set.len(), "resolved entry set");
        entries.insert(name.clone(), set);
    }

    let rules = RuleTable::build(&manifest.rules)?;
    let output = OutputSpec::resolve(&manifest.output, &root)?;

    BuildPlan::builder()
        .mode(mode)
        .flags(flags)
        .entries(entries)
        .rules(rules)
        .output(output)
        .plugins(manifest.plugins)
        .minimizers(manifest.optimization.minimizer)
        .build()
}

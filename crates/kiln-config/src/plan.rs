//! The assembled build plan.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Serialize;

use crate::entries::EntrySet;
use crate::error::{ConfigError, Result};
use crate::manifest::{OutputOptions, PluginInvocation};
use crate::mode::{BuildMode, ModeFlags};
use crate::rules::RuleTable;

/// Where and how emitted files are written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputSpec {
    pub filename_template: String,

    /// Absolute, lexically cleaned output directory
    pub directory: PathBuf,

    pub public_path_prefix: String,
}

impl OutputSpec {
    /// Resolve `options` against `root`, which must itself be absolute.
    pub fn resolve(options: &OutputOptions, root: &Path) -> Result<Self> {
        let joined = root.join(&options.path);
        if !joined.is_absolute() {
            return Err(ConfigError::malformed(
                "output.path",
                format!("cannot resolve {} to an absolute path", joined.display()),
            ));
        }

        Ok(Self {
            filename_template: options.filename.clone(),
            directory: path_clean::clean(&joined),
            public_path_prefix: options.public_path.clone(),
        })
    }
}

/// Fully resolved description of a build, ready for an external bundler.
///
/// Fields are private: a plan is not changed after assembly. Two plans built
/// from the same manifest and filesystem serialize to identical JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildPlan {
    mode: BuildMode,
    flags: ModeFlags,
    entries: IndexMap<String, EntrySet>,
    rules: RuleTable,
    output: OutputSpec,
    plugins: Vec<PluginInvocation>,
    minimizers: Vec<PluginInvocation>,
}

impl BuildPlan {
    pub fn builder() -> PlanBuilder {
        PlanBuilder::default()
    }

    pub fn mode(&self) -> BuildMode {
        self.mode
    }

    pub fn flags(&self) -> &ModeFlags {
        &self.flags
    }

    /// Named entry sets, in manifest declaration order
    pub fn entries(&self) -> &IndexMap<String, EntrySet> {
        &self.entries
    }

    pub fn entry(&self, name: &str) -> Option<&EntrySet> {
        self.entries.get(name)
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    pub fn output(&self) -> &OutputSpec {
        &self.output
    }

    /// Enabled plugins, in application order
    pub fn plugins(&self) -> &[PluginInvocation] {
        &self.plugins
    }

    /// Enabled minimizers; empty when minification is off
    pub fn minimizers(&self) -> &[PluginInvocation] {
        &self.minimizers
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Collects the output of every resolution stage.
///
/// `build` refuses to produce a plan while any required part is absent.
#[derive(Debug, Default)]
pub struct PlanBuilder {
    mode: Option<BuildMode>,
    flags: Option<ModeFlags>,
    entries: Option<IndexMap<String, EntrySet>>,
    rules: Option<RuleTable>,
    output: Option<OutputSpec>,
    plugins: Vec<PluginInvocation>,
    minimizers: Vec<PluginInvocation>,
}

impl PlanBuilder {
    pub fn mode(mut self, mode: BuildMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn flags(mut self, flags: ModeFlags) -> Self {
        self.flags = Some(flags);
        self
    }

    pub fn entries(mut self, entries: IndexMap<String, EntrySet>) -> Self {
        self.entries = Some(entries);
        self
    }

    pub fn rules(mut self, rules: RuleTable) -> Self {
        self.rules = Some(rules);
        self
    }

    pub fn output(mut self, output: OutputSpec) -> Self {
        self.output = Some(output);
        self
    }

    pub fn plugins(mut self, plugins: impl IntoIterator<Item = PluginInvocation>) -> Self {
        self.plugins.extend(plugins);
        self
    }

    pub fn minimizers(mut self, minimizers: impl IntoIterator<Item = PluginInvocation>) -> Self {
        self.minimizers.extend(minimizers);
        self
    }

    pub fn build(self) -> Result<BuildPlan> {
        let mode = self.mode.ok_or(missing("mode"))?;
        let flags = self.flags.ok_or(missing("mode flags"))?;
        let entries = self
            .entries
            .filter(|entries| !entries.is_empty() && entries.values().all(|set| !set.is_empty()))
            .ok_or(missing("entries"))?;
        let rules = self.rules.ok_or(missing("rules"))?;
        let output = self.output.ok_or(missing("output"))?;

        let plugins = enabled(self.plugins);
        let minimizers = if flags.minify {
            enabled(self.minimizers)
        } else {
            Vec::new()
        };

        tracing::info!(
            %mode,
            entries = entries.values().map(EntrySet::len).sum::<usize>(),
            rules = rules.len(),
            plugins = plugins.len(),
            "assembled build plan"
        );

        Ok(BuildPlan {
            mode,
            flags,
            entries,
            rules,
            output,
            plugins,
            minimizers,
        })
    }
}

fn missing(part: &'static str) -> ConfigError {
    ConfigError::IncompleteConfiguration { part }
}

fn enabled(plugins: Vec<PluginInvocation>) -> Vec<PluginInvocation> {
    plugins.into_iter().filter(|plugin| plugin.enabled).collect()
}

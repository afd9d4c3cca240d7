use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;

use crate::manifest::helpers::{default_filename, default_public_path, default_true, is_glob};

/// Entry list for one named chunk.
///
/// Written either as a single path, a mixed list (items containing glob
/// metacharacters are globs, everything else is an explicit file), or an
/// object that separates the two.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntrySpec {
    Single(String),
    List(Vec<String>),
    Split(EntryFiles),
}

/// Object form of an entry list: `{ globs = [...], files = [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EntryFiles {
    #[serde(default)]
    pub globs: Vec<String>,
    #[serde(default)]
    pub files: Vec<String>,
}

impl EntrySpec {
    /// Split into `(glob patterns, explicit files)`, each in declared order.
    pub fn partition(&self) -> (Vec<&str>, Vec<&str>) {
        match self {
            Self::Single(spec) if is_glob(spec) => (vec![spec.as_str()], vec![]),
            Self::Single(spec) => (vec![], vec![spec.as_str()]),
            Self::List(specs) => specs
                .iter()
                .map(String::as_str)
                .partition(|spec| is_glob(spec)),
            Self::Split(EntryFiles { globs, files }) => (
                globs.iter().map(String::as_str).collect(),
                files.iter().map(String::as_str).collect(),
            ),
        }
    }

    /// True when the entry names no paths at all.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Single(_) => false,
            Self::List(specs) => specs.is_empty(),
            Self::Split(split) => split.globs.is_empty() && split.files.is_empty(),
        }
    }
}

/// Raw `output` block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputOptions {
    /// Filename template, e.g. `[name].js`
    #[serde(default = "default_filename")]
    pub filename: String,

    /// Output directory, relative to the manifest root unless absolute
    pub path: PathBuf,

    /// Prefix under which emitted files are served
    #[serde(default = "default_public_path")]
    pub public_path: String,
}

/// One declared module rule (`test` / `exclude` / `use`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSpec {
    /// Regular expression a file path must match
    pub test: String,

    /// Regular expression that removes otherwise matching paths
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<String>,

    /// Transform chain, applied in order
    #[serde(rename = "use")]
    pub chain: UseSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UseSpec {
    One(StepSpec),
    Many(Vec<StepSpec>),
}

impl UseSpec {
    pub fn steps(&self) -> &[StepSpec] {
        match self {
            Self::One(step) => std::slice::from_ref(step),
            Self::Many(steps) => steps,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StepSpec {
    Loader(String),
    Full {
        loader: String,
        #[serde(default, skip_serializing_if = "Value::is_null")]
        options: Value,
    },
}

impl StepSpec {
    pub fn loader(&self) -> &str {
        match self {
            Self::Loader(loader) | Self::Full { loader, .. } => loader,
        }
    }
}

/// An opaque plugin descriptor, applied in list order by the bundler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginInvocation {
    pub name: String,

    /// Plugin-specific options forwarded verbatim
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub options: Value,

    /// Disabled invocations are dropped from the plan
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl PluginInvocation {
    pub fn new(name: impl Into<String>, options: Value) -> Self {
        Self {
            name: name.into(),
            options,
            enabled: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OptimizationOptions {
    /// Overrides the mode's minify default when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimize: Option<bool>,

    /// Minimizers, run in order when minification is on
    #[serde(default)]
    pub minimizer: Vec<PluginInvocation>,
}

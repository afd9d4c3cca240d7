//! Transform rule table.
//!
//! Rules keep declaration order. At build time the first rule whose `test`
//! matches a path (and whose `exclude`, if any, does not) owns that file.

use std::fmt;

use regex::Regex;
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::error::{ConfigError, Result};
use crate::manifest::{RuleSpec, StepSpec};

/// Compiled regular expression that compares and serializes as its source.
#[derive(Clone)]
pub struct MatchPattern(Regex);

impl MatchPattern {
    pub fn new(source: &str) -> Result<Self> {
        if source.is_empty() {
            return Err(ConfigError::invalid_pattern(source, "pattern cannot be empty"));
        }
        Regex::new(source)
            .map(Self)
            .map_err(|e| ConfigError::invalid_pattern(source, e))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn is_match(&self, path: &str) -> bool {
        self.0.is_match(path)
    }
}

impl fmt::Debug for MatchPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MatchPattern").field(&self.as_str()).finish()
    }
}

impl PartialEq for MatchPattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for MatchPattern {}

impl Serialize for MatchPattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One step of a transform chain.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransformStep {
    pub loader: String,

    #[serde(skip_serializing_if = "Value::is_null")]
    pub options: Value,
}

impl From<&StepSpec> for TransformStep {
    fn from(spec: &StepSpec) -> Self {
        match spec {
            StepSpec::Loader(loader) => Self {
                loader: loader.clone(),
                options: Value::Null,
            },
            StepSpec::Full { loader, options } => Self {
                loader: loader.clone(),
                options: options.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformRule {
    pub match_pattern: MatchPattern,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_pattern: Option<MatchPattern>,

    pub transform_chain: Vec<TransformStep>,
}

impl TransformRule {
    /// Whether this rule claims `path` (separators normalized to `/`).
    pub fn matches(&self, path: &str) -> bool {
        let path = path.replace('\\', "/");
        self.match_pattern.is_match(&path)
            && !self
                .exclude_pattern
                .as_ref()
                .is_some_and(|exclude| exclude.is_match(&path))
    }
}

/// Ordered rule sequence, exactly as declared.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RuleTable(Vec<TransformRule>);

impl RuleTable {
    /// Compile declared rules without reordering them.
    pub fn build(specs: &[RuleSpec]) -> Result<Self> {
        let rules = specs
            .iter()
            .map(|spec| {
                Ok(TransformRule {
                    match_pattern: MatchPattern::new(&spec.test)?,
                    exclude_pattern: spec.exclude.as_deref().map(MatchPattern::new).transpose()?,
                    transform_chain: spec.chain.steps().iter().map(TransformStep::from).collect(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(count = rules.len(), "built rule table");
        Ok(Self(rules))
    }

    pub fn rules(&self) -> &[TransformRule] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First rule that claims `path`, if any.
    pub fn first_match(&self, path: &str) -> Option<&TransformRule> {
        self.0.iter().find(|rule| rule.matches(path))
    }
}

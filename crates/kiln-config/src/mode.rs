//! Build mode resolution.
//!
//! The environment is consulted exactly once, here. Everything downstream
//! reads the resulting [`BuildMode`] and [`ModeFlags`].

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Source-map style used in development when the manifest names none.
pub const DEFAULT_DEV_DEVTOOL: &str = "eval-cheap-module-source-map";

/// `devtool` value that turns source maps off in every mode.
const DEVTOOL_DISABLED: &str = "none";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    Development,
    #[default]
    Production,
}

impl BuildMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }

    pub fn is_development(self) -> bool {
        self == Self::Development
    }
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuildMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "development" => Ok(Self::Development),
            "production" => Ok(Self::Production),
            other => Err(ConfigError::InvalidMode {
                value: other.to_string(),
            }),
        }
    }
}

/// Resolve the effective build mode.
///
/// Precedence:
/// 1. `explicit`, which must name a known mode
/// 2. an environment flag marking development (`development=<truthy>` or
///    `NODE_ENV=development`)
/// 3. production
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use kiln_config::{resolve_mode, BuildMode};
///
/// let env = HashMap::from([("NODE_ENV".to_string(), "development".to_string())]);
/// assert_eq!(resolve_mode(&env, None).unwrap(), BuildMode::Development);
/// assert_eq!(resolve_mode(&env, Some("production")).unwrap(), BuildMode::Production);
/// assert!(resolve_mode(&env, Some("staging")).is_err());
/// ```
pub fn resolve_mode(env: &HashMap<String, String>, explicit: Option<&str>) -> Result<BuildMode> {
    if let Some(mode) = explicit {
        return mode.parse();
    }

    if marks_development(env) {
        Ok(BuildMode::Development)
    } else {
        Ok(BuildMode::Production)
    }
}

fn marks_development(env: &HashMap<String, String>) -> bool {
    let flag = env.get("development").is_some_and(|value| is_truthy(value));
    let node_env = env
        .get("NODE_ENV")
        .is_some_and(|value| value.trim() == "development");
    flag || node_env
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Effective per-mode switches, derived once from the mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeFlags {
    /// Source-map style, `None` when source maps are off
    pub devtool: Option<String>,

    /// Whether the minimizer list runs
    pub minify: bool,
}

impl ModeFlags {
    /// Derive flags from the mode plus any manifest-level overrides.
    ///
    /// An explicit `devtool` applies in every mode (`"none"` disables it);
    /// without one, development uses [`DEFAULT_DEV_DEVTOOL`] and production
    /// emits no source maps. `minimize` overrides the mode's minify default.
    pub fn resolve(mode: BuildMode, devtool: Option<&str>, minimize: Option<bool>) -> Self {
        let devtool = match devtool {
            Some(DEVTOOL_DISABLED) => None,
            Some(style) => Some(style.to_string()),
            None if mode.is_development() => Some(DEFAULT_DEV_DEVTOOL.to_string()),
            None => None,
        };

        Self {
            devtool,
            minify: minimize.unwrap_or(!mode.is_development()),
        }
    }
}

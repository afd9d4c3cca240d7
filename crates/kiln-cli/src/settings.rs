//! Layered CLI settings.
//!
//! Priority: command-line flags > `KILN_*` environment variables > defaults.

use std::path::PathBuf;

use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};

use crate::cli::ManifestArgs;
use crate::error::Result;

const ENV_PREFIX: &str = "KILN_";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Explicit manifest file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<PathBuf>,

    /// Search and resolution root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,

    /// Explicit build mode handed to the mode resolver
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
}

impl Settings {
    /// Load settings, letting `args` override `KILN_CONFIG`, `KILN_ROOT` and
    /// `KILN_MODE`.
    pub fn load(args: &ManifestArgs) -> Result<Self> {
        Ok(Self::figment(args).extract()?)
    }

    fn figment(args: &ManifestArgs) -> Figment {
        let flags = Settings {
            config: args.config.clone(),
            root: args.root.clone(),
            mode: args.mode.clone(),
        };

        Figment::new()
            .merge(Serialized::defaults(Settings::default()))
            .merge(Env::prefixed(ENV_PREFIX).only(&["config", "root", "mode"]))
            .merge(Serialized::defaults(flags))
    }
}

//! Declarative build manifest and its loader.

mod helpers;
mod types;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ConfigError, Result};

pub use types::{
    EntryFiles, EntrySpec, OptimizationOptions, OutputOptions, PluginInvocation, RuleSpec, StepSpec, UseSpec,
};

/// Keys a manifest cannot be resolved without.
const REQUIRED_KEYS: [&str; 2] = ["entry", "output"];

/// Parsed, shape-checked manifest.
///
/// Nothing here touches the filesystem; globs are still unexpanded and
/// patterns uncompiled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    /// Named entry chunks, in declaration order
    pub entry: IndexMap<String, EntrySpec>,

    pub output: OutputOptions,

    /// Module rules, first match wins
    #[serde(default)]
    pub rules: Vec<RuleSpec>,

    #[serde(default)]
    pub plugins: Vec<PluginInvocation>,

    #[serde(default)]
    pub optimization: OptimizationOptions,

    /// Source-map style; `"none"` disables it in every mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub devtool: Option<String>,

    /// Mode requested by the manifest itself (callers may override)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,

    /// Partial manifests merged over the base for a given mode
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub profiles: IndexMap<String, Value>,
}

impl Manifest {
    /// Parse and validate a raw manifest.
    ///
    /// # Example
    ///
    /// ```
    /// use kiln_config::Manifest;
    /// use serde_json::json;
    ///
    /// let manifest = Manifest::from_value(json!({
    ///     "entry": { "app": ["./js/app.js"] },
    ///     "output": { "path": "../priv/static/js", "publicPath": "/js/" }
    /// }))
    /// .unwrap();
    ///
    /// assert_eq!(manifest.output.filename, "[name].js");
    /// ```
    pub fn from_value(value: Value) -> Result<Self> {
        let Some(map) = value.as_object() else {
            return Err(ConfigError::malformed(
                "manifest",
                "expected a mapping of keys to values",
            ));
        };

        for key in REQUIRED_KEYS {
            match map.get(key) {
                None | Some(Value::Null) => {
                    return Err(ConfigError::malformed(key, "required key is missing"));
                }
                Some(Value::Object(_)) => {}
                Some(_) => return Err(ConfigError::malformed(key, "expected a mapping")),
            }
        }

        let manifest: Manifest = serde_json::from_value(value)
            .map_err(|e| ConfigError::malformed("manifest", e.to_string()))?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Convert back to a raw value
    pub fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(|e| ConfigError::malformed("manifest", e.to_string()))
    }

    fn validate(&self) -> Result<()> {
        if self.entry.is_empty() {
            return Err(ConfigError::malformed(
                "entry",
                "at least one named entry is required",
            ));
        }

        for (name, spec) in &self.entry {
            if name.trim().is_empty() {
                return Err(ConfigError::malformed("entry", "entry names cannot be empty"));
            }
            if spec.is_blank() {
                return Err(ConfigError::malformed(
                    format!("entry.{name}"),
                    "expected at least one glob or file",
                ));
            }
        }

        if self.output.filename.trim().is_empty() {
            return Err(ConfigError::malformed(
                "output.filename",
                "filename template cannot be empty",
            ));
        }

        if self.output.path.as_os_str().is_empty() {
            return Err(ConfigError::malformed(
                "output.path",
                "output directory cannot be empty",
            ));
        }

        for (index, rule) in self.rules.iter().enumerate() {
            let steps = rule.chain.steps();
            if steps.is_empty() {
                return Err(ConfigError::malformed(
                    format!("rules[{index}].use"),
                    "transform chain cannot be empty",
                ));
            }
            if steps.iter().any(|step| step.loader().trim().is_empty()) {
                return Err(ConfigError::malformed(
                    format!("rules[{index}].use"),
                    "loader names cannot be empty",
                ));
            }
        }

        let plugins = self.plugins.iter().chain(&self.optimization.minimizer);
        for plugin in plugins {
            if plugin.name.trim().is_empty() {
                return Err(ConfigError::malformed("plugins", "plugin name cannot be empty"));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::path::PathBuf;

    fn minimal() -> Value {
        json!({
            "entry": { "app": ["./vendor/**/*.js", "./js/app.js"] },
            "output": { "path": "../priv/static/js", "publicPath": "/js/" }
        })
    }

    #[test]
    fn from_value_applies_defaults() {
        let manifest = Manifest::from_value(minimal()).unwrap();
        assert_eq!(manifest.output.filename, "[name].js");
        assert_eq!(manifest.output.path, PathBuf::from("../priv/static/js"));
        assert_eq!(manifest.output.public_path, "/js/");
        assert!(manifest.rules.is_empty());
        assert!(manifest.plugins.is_empty());
        assert_eq!(manifest.mode, None);
    }

    #[test]
    fn missing_entry_is_malformed() {
        let err = Manifest::from_value(json!({ "output": { "path": "dist" } })).unwrap_err();
        match err {
            ConfigError::MalformedManifest { field, .. } => assert_eq!(field, "entry"),
            other => panic!("expected MalformedManifest, got {other:?}"),
        }
    }

    #[test]
    fn missing_output_is_malformed() {
        let err = Manifest::from_value(json!({ "entry": { "app": "a.js" } })).unwrap_err();
        match err {
            ConfigError::MalformedManifest { field, .. } => assert_eq!(field, "output"),
            other => panic!("expected MalformedManifest, got {other:?}"),
        }
    }

    #[test]
    fn wrong_shape_is_malformed() {
        let err = Manifest::from_value(json!({
            "entry": ["a.js"],
            "output": { "path": "dist" }
        }))
        .unwrap_err();
        assert!(matches!(err, ConfigError::MalformedManifest { .. }));

        let err = Manifest::from_value(json!("kiln.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::MalformedManifest { .. }));
    }

    #[test]
    fn empty_transform_chain_is_malformed() {
        let mut value = minimal();
        value["rules"] = json!([{ "test": "\\.js$", "use": [] }]);
        let err = Manifest::from_value(value).unwrap_err();
        match err {
            ConfigError::MalformedManifest { field, .. } => assert_eq!(field, "rules[0].use"),
            other => panic!("expected MalformedManifest, got {other:?}"),
        }
    }

    #[test]
    fn use_accepts_single_step_and_lists() {
        let mut value = minimal();
        value["rules"] = json!([
            { "test": "\\.js$", "exclude": "node_modules", "use": { "loader": "esbuild-loader" } },
            { "test": "\\.[s]?css$", "use": [
                "mini-css-extract",
                "css-loader",
                { "loader": "sass-loader", "options": { "implementation": "sass" } }
            ] }
        ]);

        let manifest = Manifest::from_value(value).unwrap();
        assert_eq!(manifest.rules[0].chain.steps().len(), 1);
        assert_eq!(manifest.rules[0].chain.steps()[0].loader(), "esbuild-loader");
        let loaders: Vec<_> = manifest.rules[1]
            .chain
            .steps()
            .iter()
            .map(StepSpec::loader)
            .collect();
        assert_eq!(loaders, ["mini-css-extract", "css-loader", "sass-loader"]);
    }

    #[test]
    fn entry_spec_partitions_globs_from_files() {
        let spec = EntrySpec::List(vec![
            "./js/app.js".into(),
            "./vendor/**/*.js".into(),
            "./js/admin.js".into(),
        ]);
        let (globs, files) = spec.partition();
        assert_eq!(globs, ["./vendor/**/*.js"]);
        assert_eq!(files, ["./js/app.js", "./js/admin.js"]);

        let single = EntrySpec::Single("src/*.ts".into());
        let (globs, files) = single.partition();
        assert_eq!(globs, ["src/*.ts"]);
        assert!(files.is_empty());
    }

    #[test]
    fn entry_spec_accepts_split_form() {
        let mut value = minimal();
        value["entry"] = json!({ "app": { "globs": ["vendor/*.js"], "files": ["js/app.js"] } });
        let manifest = Manifest::from_value(value).unwrap();
        let (globs, files) = manifest.entry["app"].partition();
        assert_eq!(globs, ["vendor/*.js"]);
        assert_eq!(files, ["js/app.js"]);
    }

    #[test]
    fn unknown_entry_object_is_malformed() {
        let mut value = minimal();
        value["entry"] = json!({ "app": { "import": "./js/app.js" } });
        let err = Manifest::from_value(value).unwrap_err();
        assert!(matches!(err, ConfigError::MalformedManifest { .. }));
    }

    #[test]
    fn blank_entry_is_malformed() {
        for blank in [json!({}), json!([]), json!({ "globs": [], "files": [] })] {
            let mut value = minimal();
            value["entry"] = json!({ "app": blank });
            let err = Manifest::from_value(value).unwrap_err();
            match err {
                ConfigError::MalformedManifest { field, .. } => assert_eq!(field, "entry.app"),
                other => panic!("expected MalformedManifest, got {other:?}"),
            }
        }
    }

    #[test]
    fn plugins_default_to_enabled() {
        let mut value = minimal();
        value["plugins"] = json!([
            { "name": "mini-css-extract", "options": { "filename": "../css/app.css" } },
            { "name": "copy", "enabled": false }
        ]);
        let manifest = Manifest::from_value(value).unwrap();
        assert!(manifest.plugins[0].enabled);
        assert!(!manifest.plugins[1].enabled);
        assert_eq!(manifest.plugins[1].options, Value::Null);
    }

    #[test]
    fn to_value_round_trips_entry_order() {
        let mut value = minimal();
        value["entry"] = json!({ "zeta": "z.js", "alpha": "a.js" });
        let manifest = Manifest::from_value(value).unwrap();
        let back = Manifest::from_value(manifest.to_value().unwrap()).unwrap();
        let names: Vec<_> = back.entry.keys().cloned().collect();
        assert_eq!(names, ["zeta", "alpha"]);
    }
}

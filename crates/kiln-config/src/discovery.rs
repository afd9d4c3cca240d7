//! File-based manifest discovery for CLI use
//!
//! Handles finding and loading kiln manifests from the filesystem.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{ConfigError, Result};
use crate::manifest::Manifest;

const TOML_NAME: &str = "kiln.toml";
const JSON_NAME: &str = "kiln.json";
const PACKAGE_JSON: &str = "package.json";
const PACKAGE_FIELD: &str = "kiln";

/// File-based manifest discovery
///
/// Library users with an in-memory manifest should call
/// [`Manifest::from_value`] or [`crate::resolve()`] directly.
///
/// # Example
///
/// ```no_run
/// use kiln_config::ManifestDiscovery;
///
/// let discovery = ManifestDiscovery::new("assets");
/// let manifest = discovery.load().unwrap();
/// ```
pub struct ManifestDiscovery {
    root: PathBuf,
}

impl ManifestDiscovery {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Find a manifest in the root directory
    ///
    /// Searches in this order:
    /// 1. kiln.toml
    /// 2. kiln.json
    /// 3. package.json (kiln field)
    pub fn find(&self) -> Option<PathBuf> {
        for name in [TOML_NAME, JSON_NAME] {
            let path = self.root.join(name);
            if path.is_file() {
                return Some(path);
            }
        }

        let pkg_path = self.root.join(PACKAGE_JSON);
        let content = fs::read_to_string(&pkg_path).ok()?;
        let parsed: Value = serde_json::from_str(&content).ok()?;
        parsed
            .get(PACKAGE_FIELD)
            .is_some_and(|field| !field.is_null())
            .then_some(pkg_path)
    }

    /// Load the discovered manifest as a raw value
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if no manifest is found.
    pub fn load_value(&self) -> Result<Value> {
        let path = self.find().ok_or_else(|| ConfigError::NotFound {
            root: self.root.clone(),
        })?;
        load_file(&path)
    }

    /// Load and validate the discovered manifest
    pub fn load(&self) -> Result<Manifest> {
        Manifest::from_value(self.load_value()?)
    }
}

/// Read a manifest file into a raw value, picking the format from its name.
pub fn load_file(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)?;
    tracing::debug!(path = %path.display(), "loading manifest");

    if path.file_name() == Some(std::ffi::OsStr::new(PACKAGE_JSON)) {
        return from_package_json(&content);
    }

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => {
            let toml_val: toml::Value = toml::from_str(&content).map_err(|e| {
                ConfigError::malformed("toml", format!("invalid TOML syntax: {e}"))
            })?;
            serde_json::to_value(toml_val).map_err(|e| {
                ConfigError::malformed("toml", format!("TOML to JSON conversion failed: {e}"))
            })
        }
        _ => serde_json::from_str(&content)
            .map_err(|e| ConfigError::malformed("json", format!("invalid JSON: {e}"))),
    }
}

fn from_package_json(content: &str) -> Result<Value> {
    let mut parsed: Value = serde_json::from_str(content)
        .map_err(|e| ConfigError::malformed(PACKAGE_JSON, format!("invalid JSON: {e}")))?;

    match parsed.get_mut(PACKAGE_FIELD).map(Value::take) {
        Some(Value::Null) | None => Err(ConfigError::malformed(
            PACKAGE_FIELD,
            "add a 'kiln' field to your package.json",
        )),
        Some(value) => Ok(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const TOML_MANIFEST: &str = r#"
[entry]
app = ["./js/app.js"]

[output]
path = "../priv/static/js"
publicPath = "/js/"
"#;

    #[test]
    fn find_returns_none_when_no_manifest() {
        let dir = TempDir::new().unwrap();
        assert!(ManifestDiscovery::new(dir.path()).find().is_none());
    }

    #[test]
    fn toml_takes_precedence_over_json() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(TOML_NAME), TOML_MANIFEST).unwrap();
        fs::write(dir.path().join(JSON_NAME), "{}").unwrap();

        let found = ManifestDiscovery::new(dir.path()).find().unwrap();
        assert_eq!(found, dir.path().join(TOML_NAME));
    }

    #[test]
    fn load_parses_toml_manifest() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(TOML_NAME), TOML_MANIFEST).unwrap();

        let manifest = ManifestDiscovery::new(dir.path()).load().unwrap();
        assert_eq!(manifest.output.public_path, "/js/");
        assert!(manifest.entry.contains_key("app"));
    }

    #[test]
    fn package_json_without_field_is_ignored() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(PACKAGE_JSON), r#"{ "name": "app" }"#).unwrap();
        assert!(ManifestDiscovery::new(dir.path()).find().is_none());
    }

    #[test]
    fn load_returns_not_found() {
        let dir = TempDir::new().unwrap();
        let err = ManifestDiscovery::new(dir.path()).load().unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { .. }));
    }

    #[test]
    fn invalid_toml_is_malformed() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(TOML_NAME), "[entry\napp = 1").unwrap();
        let err = ManifestDiscovery::new(dir.path()).load().unwrap_err();
        assert!(matches!(err, ConfigError::MalformedManifest { .. }));
    }
}

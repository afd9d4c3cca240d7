//! Per-mode profile overrides.
//!
//! A profile is a partial manifest stored under `profiles.<mode>`. Once the
//! build mode is known, the matching profile is deep-merged over the base.

use serde_json::Value;

use crate::error::{ConfigError, Result};
use crate::manifest::Manifest;
use crate::mode::BuildMode;

impl Manifest {
    /// Merge the profile for `mode` over the base manifest.
    ///
    /// Objects merge key by key; arrays and scalars replace. A manifest without
    /// a matching profile is returned unchanged.
    pub fn materialize_profile(mut self, mode: BuildMode) -> Result<Self> {
        let Some(overrides) = self.profiles.get(mode.as_str()).cloned() else {
            return Ok(self);
        };

        if overrides.is_null() {
            return Ok(self);
        }

        if !overrides.is_object() {
            return Err(ConfigError::malformed(
                format!("profiles.{mode}"),
                "expected a mapping",
            ));
        }

        tracing::debug!(%mode, "applying profile overrides");

        let profiles = std::mem::take(&mut self.profiles);
        let mut merged = self.to_value()?;
        merge_values(&mut merged, &overrides);

        let mut updated = Manifest::from_value(merged).map_err(|err| match err {
            ConfigError::MalformedManifest { field, message } => ConfigError::MalformedManifest {
                field: format!("profiles.{mode}.{field}"),
                message,
            },
            other => other,
        })?;
        updated.profiles = profiles;
        Ok(updated)
    }
}

pub(crate) fn merge_values(target: &mut Value, update: &Value) {
    match (target, update) {
        (Value::Object(target_map), Value::Object(update_map)) => {
            for (key, value) in update_map {
                merge_values(target_map.entry(key.clone()).or_insert(Value::Null), value);
            }
        }
        (target_slot, _) => {
            *target_slot = update.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn merge_values_is_deep_for_objects() {
        let mut base = json!({ "output": { "path": "dist", "publicPath": "/" } });
        merge_values(&mut base, &json!({ "output": { "publicPath": "/js/" } }));
        assert_eq!(base, json!({ "output": { "path": "dist", "publicPath": "/js/" } }));
    }

    #[test]
    fn merge_values_replaces_arrays() {
        let mut base = json!({ "plugins": [{ "name": "a" }, { "name": "b" }] });
        merge_values(&mut base, &json!({ "plugins": [{ "name": "c" }] }));
        assert_eq!(base, json!({ "plugins": [{ "name": "c" }] }));
    }

    fn manifest_with_profiles() -> Manifest {
        Manifest::from_value(json!({
            "entry": { "app": "./js/app.js" },
            "output": { "path": "dist" },
            "profiles": {
                "development": { "devtool": "source-map", "output": { "publicPath": "/dev/" } },
                "production": { "optimization": { "minimize": false } }
            }
        }))
        .unwrap()
    }

    #[test]
    fn development_profile_applies() {
        let manifest = manifest_with_profiles()
            .materialize_profile(BuildMode::Development)
            .unwrap();
        assert_eq!(manifest.devtool.as_deref(), Some("source-map"));
        assert_eq!(manifest.output.public_path, "/dev/");
        assert_eq!(manifest.output.path, std::path::PathBuf::from("dist"));
        assert_eq!(manifest.optimization.minimize, None);
        assert_eq!(manifest.profiles.len(), 2);
    }

    #[test]
    fn production_profile_applies() {
        let manifest = manifest_with_profiles()
            .materialize_profile(BuildMode::Production)
            .unwrap();
        assert_eq!(manifest.optimization.minimize, Some(false));
        assert_eq!(manifest.devtool, None);
    }

    #[test]
    fn profile_breaking_shape_is_reported_under_profile() {
        let manifest = Manifest::from_value(json!({
            "entry": { "app": "./js/app.js" },
            "output": { "path": "dist" },
            "profiles": { "production": { "output": { "path": 42 } } }
        }))
        .unwrap();

        let err = manifest.materialize_profile(BuildMode::Production).unwrap_err();
        match err {
            ConfigError::MalformedManifest { field, .. } => {
                assert!(field.starts_with("profiles.production"), "{field}");
            }
            other => panic!("expected MalformedManifest, got {other:?}"),
        }
    }
}

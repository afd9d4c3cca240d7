// Helper defaults
pub(crate) fn default_true() -> bool {
    true
}

pub(crate) fn default_filename() -> String {
    "[name].js".to_string()
}

pub(crate) fn default_public_path() -> String {
    "/".to_string()
}

/// Glob metacharacters understood by the entry resolver.
const GLOB_META: [char; 3] = ['*', '?', '['];

pub(crate) fn is_glob(spec: &str) -> bool {
    spec.contains(GLOB_META)
}

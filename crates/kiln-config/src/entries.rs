//! Entry point resolution.
//!
//! Glob patterns expand first, in declared order, each pattern's matches
//! sorted lexicographically. Explicit files follow in the order given.
//! Duplicates collapse to their first occurrence.

use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use glob::{MatchOptions, Pattern};
use serde::Serialize;

use crate::error::{ConfigError, Result};

/// Ordered, non-empty list of entry files for one chunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EntrySet(Vec<PathBuf>);

impl EntrySet {
    pub(crate) fn from_paths(paths: Vec<PathBuf>) -> Self {
        Self(paths)
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PathBuf> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a EntrySet {
    type Item = &'a PathBuf;
    type IntoIter = std::slice::Iter<'a, PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Expands entry lists against one filesystem root.
///
/// # Example
///
/// ```no_run
/// use kiln_config::EntryResolver;
///
/// let entries = EntryResolver::new("assets")
///     .resolve("app", &["./vendor/**/*.js"], &["./js/app.js"])
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct EntryResolver {
    root: PathBuf,
}

impl EntryResolver {
    /// An empty root means the current directory.
    pub fn new(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        let root = if root.as_os_str().is_empty() {
            Path::new(".")
        } else {
            root
        };
        Self {
            root: root.to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve the entries of chunk `name`.
    ///
    /// Glob matches are reported relative to the root; explicit entries keep
    /// their written form. Paths are compared after lexical normalization, so
    /// `./js/app.js` and `js/app.js` are the same entry.
    pub fn resolve(&self, name: &str, globs: &[&str], explicit: &[&str]) -> Result<EntrySet> {
        let mut seen = HashSet::new();
        let mut paths = Vec::new();

        for pattern in globs {
            let matches = self.expand(pattern)?;
            tracing::debug!(entry = name, pattern, count = matches.len(), "expanded glob");
            for path in matches {
                if seen.insert(normalize(&path)) {
                    paths.push(path);
                }
            }
        }

        for file in explicit {
            let path = PathBuf::from(file);
            let on_disk = self.root.join(&path);
            if !on_disk.is_file() {
                return Err(ConfigError::EntryNotFound { path: on_disk });
            }
            if seen.insert(normalize(&path)) {
                paths.push(path);
            } else {
                tracing::debug!(entry = name, file, "dropped duplicate entry");
            }
        }

        if paths.is_empty() {
            return Err(ConfigError::NoEntriesFound {
                name: name.to_string(),
            });
        }

        Ok(EntrySet::from_paths(paths))
    }

    /// Expand one pattern into root-relative files, sorted lexicographically.
    fn expand(&self, pattern: &str) -> Result<Vec<PathBuf>> {
        Pattern::new(pattern).map_err(|e| ConfigError::invalid_pattern(pattern, e.msg))?;

        let full = if Path::new(pattern).is_absolute() {
            pattern.to_string()
        } else {
            let root = Pattern::escape(&self.root.to_string_lossy());
            let relative = pattern.trim_start_matches("./");
            format!("{}/{relative}", root.trim_end_matches('/'))
        };

        let options = MatchOptions {
            case_sensitive: true,
            require_literal_separator: true,
            require_literal_leading_dot: true,
        };
        let walker = glob::glob_with(&full, options)
            .map_err(|e| ConfigError::invalid_pattern(pattern, e.msg))?;

        let mut matches = Vec::new();
        for entry in walker {
            let path = entry.map_err(|e| ConfigError::Io(e.into_error()))?;
            if !path.is_file() {
                continue;
            }
            let relative = path
                .strip_prefix(&self.root)
                .map(Path::to_path_buf)
                .unwrap_or(path);
            matches.push(relative);
        }

        matches.sort_by_cached_key(|path| sort_key(path));
        Ok(matches)
    }
}

/// Lexical normalization used for duplicate detection.
fn normalize(path: &Path) -> PathBuf {
    path_clean::clean(path)
}

/// Separator-independent ordering key.
fn sort_key(path: &Path) -> String {
    let parts: Vec<_> = path
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .map(|c| c.as_os_str().to_string_lossy())
        .collect();
    parts.join("/")
}

//! Build-manifest resolution for asset bundling.
//!
//! Turns a declarative manifest (entry globs, output rules, transform rules,
//! plugins) plus a build mode into an immutable [`BuildPlan`] for an external
//! bundler. Resolution is synchronous and keeps no state between calls.

pub mod discovery;
pub mod entries;
pub mod error;
pub mod manifest;
pub mod mode;
pub mod plan;
mod profile;
pub mod resolve;
pub mod rules;

// Re-export main types
pub use entries::{EntryResolver, EntrySet};
pub use error::*;
pub use manifest::*;
pub use mode::{resolve_mode, BuildMode, ModeFlags, DEFAULT_DEV_DEVTOOL};
pub use plan::{BuildPlan, OutputSpec, PlanBuilder};
pub use resolve::{resolve, resolve_manifest, ResolveContext};
pub use rules::{MatchPattern, RuleTable, TransformRule, TransformStep};

pub use discovery::{load_file, ManifestDiscovery};

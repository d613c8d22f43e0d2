//! Search configuration.
//!
//! Holds the build-output layout convention used to find compiled artifacts
//! and the policy applied when one source symbol matches several compiled
//! declarations. Every field has a default, so an empty TOML document is a
//! valid configuration:
//!
//! ```toml
//! on_multiple_matches = "require_unique"
//!
//! [layout]
//! output_dir = "out/classes"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from loading a configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level settings for translated usage searches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SearchConfig {
    #[serde(default)]
    pub layout: BuildLayout,

    /// What to do when the compiled artifact holds more than one match.
    #[serde(default)]
    pub on_multiple_matches: MatchPolicy,
}

impl SearchConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}

/// Where the build puts compiled classes relative to a source root.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BuildLayout {
    /// Output directory below the source root's parent.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Source-root name that maps to the default source set.
    #[serde(default = "default_source_marker")]
    pub source_marker: String,

    #[serde(default = "default_source_set")]
    pub default_source_set: String,

    #[serde(default = "default_source_extension")]
    pub source_extension: String,

    #[serde(default = "default_compiled_extension")]
    pub compiled_extension: String,
}

fn default_output_dir() -> String {
    "build/classes/java".to_string()
}

fn default_source_marker() -> String {
    "src".to_string()
}

fn default_source_set() -> String {
    "main".to_string()
}

fn default_source_extension() -> String {
    "java".to_string()
}

fn default_compiled_extension() -> String {
    "class".to_string()
}

impl Default for BuildLayout {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            source_marker: default_source_marker(),
            default_source_set: default_source_set(),
            source_extension: default_source_extension(),
            compiled_extension: default_compiled_extension(),
        }
    }
}

impl BuildLayout {
    /// The source-set label for a source root named `root_name`.
    ///
    /// The generic marker (`src`) maps to the default set (`main`); any other
    /// root is its own source set (`test`, `integrationTest`, ...).
    pub fn source_set<'a>(&'a self, root_name: &'a str) -> &'a str {
        if root_name == self.source_marker {
            &self.default_source_set
        } else {
            root_name
        }
    }

    /// Expected compiled-artifact path.
    ///
    /// `root_parent` is the canonical path of the source root's parent and
    /// `relative` the `/`-separated path of the source file inside the root.
    /// Only a trailing source extension is swapped.
    pub fn compiled_path(&self, root_parent: &Path, root_name: &str, relative: &str) -> PathBuf {
        let source_suffix = format!(".{}", self.source_extension);
        let relative = match relative.strip_suffix(&source_suffix) {
            Some(stem) => format!("{stem}.{}", self.compiled_extension),
            None => relative.to_string(),
        };

        let mut path = root_parent.join(&self.output_dir);
        path.push(self.source_set(root_name));
        for segment in relative.split('/').filter(|s| !s.is_empty()) {
            path.push(segment);
        }
        path
    }
}

/// Policy for a Match Set with more than one element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPolicy {
    /// Search every match, logging a warning.
    #[default]
    DispatchAll,
    /// Treat duplicates as an error and search nothing.
    RequireUnique,
}

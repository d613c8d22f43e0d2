//! Compiled-artifact lookup.
//!
//! Maps a source file to the class file the build produced for it and loads
//! that file's structural tree:
//!
//! ```text
//! /repo/src/com/acme/Foo.java
//!   root = /repo/src, source set = main, relative = com/acme/Foo.java
//!   → /repo/build/classes/java/main/com/acme/Foo.class
//! ```

use std::path::PathBuf;

use thiserror::Error;

use crate::base::FileId;
use crate::config::BuildLayout;
use crate::hir::{ElementId, FileForm, ModelManager, Symbol};
use crate::project::{FileSystem, ProjectIndex};

/// Why no compiled artifact could be produced for a source file.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocateError {
    #[error("file is not under a source root")]
    NoSourceRoot,

    #[error("source root has no parent directory")]
    NoRootParent,

    #[error("source root parent has no canonical path")]
    NoCanonicalPath,

    #[error("file has no path relative to its source root")]
    NoRelativePath,

    #[error("no compiled file at {}", .0.display())]
    ArtifactMissing(PathBuf),

    #[error("compiled file {0} could not be loaded")]
    LoadFailed(FileId),

    #[error("{0} is not a compiled class file")]
    NotCompiled(FileId),
}

/// A loaded compiled artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledArtifact {
    pub file: FileId,
    pub path: PathBuf,
    /// Top-level declarations of the artifact.
    pub roots: Vec<ElementId>,
}

/// Finds and loads the compiled counterpart of a source file.
pub struct CompiledArtifactLocator<'a> {
    project: &'a dyn ProjectIndex,
    fs: &'a dyn FileSystem,
    models: &'a dyn ModelManager,
    layout: &'a BuildLayout,
}

impl<'a> CompiledArtifactLocator<'a> {
    pub fn new(
        project: &'a dyn ProjectIndex,
        fs: &'a dyn FileSystem,
        models: &'a dyn ModelManager,
        layout: &'a BuildLayout,
    ) -> Self {
        Self {
            project,
            fs,
            models,
            layout,
        }
    }

    /// Locate and load the artifact for the file containing `symbol`.
    pub fn locate(&self, symbol: &dyn Symbol) -> Result<CompiledArtifact, LocateError> {
        let path = self.compiled_path(symbol.containing_file())?;
        tracing::debug!(path = %path.display(), "looking up compiled artifact");

        let file = self
            .fs
            .find_file_by_path(&path)
            .ok_or_else(|| LocateError::ArtifactMissing(path.clone()))?;
        let root = self.models.load(file).ok_or(LocateError::LoadFailed(file))?;
        if root.form != FileForm::Compiled {
            return Err(LocateError::NotCompiled(file));
        }

        tracing::debug!(%file, roots = root.roots.len(), "loaded compiled artifact");
        Ok(CompiledArtifact {
            file,
            path,
            roots: root.roots,
        })
    }

    /// The path the build output for `file` is expected at.
    pub fn compiled_path(&self, file: FileId) -> Result<PathBuf, LocateError> {
        let root = self
            .project
            .source_root_for_file(file)
            .ok_or(LocateError::NoSourceRoot)?;
        let parent = self.fs.parent(root).ok_or(LocateError::NoRootParent)?;
        let parent_path = self
            .fs
            .canonical_path(parent)
            .ok_or(LocateError::NoCanonicalPath)?;
        let root_name = self.fs.name(root).ok_or(LocateError::NoRootParent)?;
        let relative = self
            .fs
            .relative_path(file, root)
            .ok_or(LocateError::NoRelativePath)?;

        Ok(self.layout.compiled_path(&parent_path, &root_name, &relative))
    }
}

//! Root-based project index.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexSet;

use crate::base::FileId;
use super::{FileSet, ProjectIndex};

/// A [`ProjectIndex`] computed from registered root directories.
///
/// Membership is decided by path prefix: a file belongs to a root when the
/// root's path is one of its ancestors (or the file itself).
#[derive(Debug)]
pub struct ProjectLayout {
    files: Arc<FileSet>,
    content_roots: IndexSet<PathBuf>,
    source_roots: IndexSet<PathBuf>,
    library_roots: IndexSet<PathBuf>,
    excluded_roots: IndexSet<PathBuf>,
}

impl ProjectLayout {
    pub fn new(files: Arc<FileSet>) -> Self {
        Self {
            files,
            content_roots: IndexSet::new(),
            source_roots: IndexSet::new(),
            library_roots: IndexSet::new(),
            excluded_roots: IndexSet::new(),
        }
    }

    pub fn add_content_root(&mut self, path: impl Into<PathBuf>) -> FileId {
        let path = path.into();
        let id = self.files.file_id(&path);
        self.content_roots.insert(path);
        id
    }

    /// Register a source root. Source roots count as content.
    pub fn add_source_root(&mut self, path: impl Into<PathBuf>) -> FileId {
        let path = path.into();
        let id = self.files.file_id(&path);
        self.content_roots.insert(path.clone());
        self.source_roots.insert(path);
        id
    }

    pub fn add_library_root(&mut self, path: impl Into<PathBuf>) -> FileId {
        let path = path.into();
        let id = self.files.file_id(&path);
        self.library_roots.insert(path);
        id
    }

    /// Exclude a directory (typically build output) from indexing.
    pub fn add_excluded_root(&mut self, path: impl Into<PathBuf>) -> FileId {
        let path = path.into();
        let id = self.files.file_id(&path);
        self.excluded_roots.insert(path);
        id
    }

    pub fn files(&self) -> &Arc<FileSet> {
        &self.files
    }

    fn under_any(roots: &IndexSet<PathBuf>, path: &Path) -> bool {
        roots.iter().any(|root| path.starts_with(root))
    }
}

impl ProjectIndex for ProjectLayout {
    fn is_in_content(&self, file: FileId) -> bool {
        self.files.path(file).is_some_and(|path| {
            Self::under_any(&self.content_roots, &path)
                && !Self::under_any(&self.excluded_roots, &path)
        })
    }

    fn source_root_for_file(&self, file: FileId) -> Option<FileId> {
        let path = self.files.path(file)?;
        if Self::under_any(&self.excluded_roots, &path) {
            return None;
        }
        // Nested source roots: the innermost one wins.
        let root = self
            .source_roots
            .iter()
            .filter(|root| path.starts_with(root))
            .max_by_key(|root| root.components().count())?;
        Some(self.files.file_id(root))
    }

    fn is_in_library_classes(&self, file: FileId) -> bool {
        self.files
            .path(file)
            .is_some_and(|path| Self::under_any(&self.library_roots, &path))
    }

    fn is_in_source(&self, file: FileId) -> bool {
        self.source_root_for_file(file).is_some() && self.is_in_content(file)
    }

    fn is_excluded_file(&self, file: FileId) -> bool {
        self.files
            .path(file)
            .is_some_and(|path| Self::under_any(&self.excluded_roots, &path))
    }
}

//! Project collaborators: the host services the search depends on.
//!
//! The IDE owns the real project index and virtual file system. This module
//! states what the search needs from them as traits and ships in-memory
//! implementations ([`FileSet`], [`ProjectLayout`]) so the pipeline runs
//! without a host.

use std::path::{Path, PathBuf};

use smol_str::SmolStr;

use crate::base::FileId;

mod file_set;
mod layout;

pub use file_set::FileSet;
pub use layout::ProjectLayout;

/// Membership queries against the project's content, source, library and
/// excluded trees.
pub trait ProjectIndex {
    /// Whether `file` belongs to project content (and is not excluded).
    fn is_in_content(&self, file: FileId) -> bool;

    /// The source root directory containing `file`.
    fn source_root_for_file(&self, file: FileId) -> Option<FileId>;

    fn is_in_library_classes(&self, file: FileId) -> bool;

    fn is_in_source(&self, file: FileId) -> bool;

    /// Whether `file` lies under an excluded directory such as build output.
    fn is_excluded_file(&self, file: FileId) -> bool;
}

/// Path-level access to virtual files.
pub trait FileSystem {
    /// Find an existing file by absolute path.
    fn find_file_by_path(&self, path: &Path) -> Option<FileId>;

    /// `file`'s path below `root`, with `/` separators. `None` if `file` is
    /// not under `root`.
    fn relative_path(&self, file: FileId, root: FileId) -> Option<String>;

    /// Last path component.
    fn name(&self, file: FileId) -> Option<SmolStr>;

    fn parent(&self, file: FileId) -> Option<FileId>;

    fn canonical_path(&self, file: FileId) -> Option<PathBuf>;
}

//! In-memory virtual file system.

use std::path::{Component, Path, PathBuf};

use indexmap::IndexMap;
use parking_lot::RwLock;
use rustc_hash::FxHashSet;
use smol_str::SmolStr;

use crate::base::FileId;
use super::FileSystem;

/// Assigns stable [`FileId`]s to paths and tracks which of them exist.
///
/// Any path can be interned (directories, files not yet built); only paths
/// added with [`FileSet::add_file`] are found by
/// [`FileSystem::find_file_by_path`]. A set created with
/// [`FileSet::with_disk_lookup`] additionally falls back to the real disk
/// and registers what it finds there.
#[derive(Debug, Default)]
pub struct FileSet {
    inner: RwLock<FileSetInner>,
    disk_lookup: bool,
}

#[derive(Debug, Default)]
struct FileSetInner {
    /// Path → FileId mapping
    path_to_id: IndexMap<PathBuf, FileId>,
    /// FileId → Path mapping (reverse lookup)
    id_to_path: IndexMap<FileId, PathBuf>,
    /// Files known to exist
    present: FxHashSet<FileId>,
    /// Next FileId to assign
    next_id: u32,
}

impl FileSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// A file set whose lookups fall through to the local disk.
    pub fn with_disk_lookup() -> Self {
        Self {
            inner: RwLock::default(),
            disk_lookup: true,
        }
    }

    /// Get or create a FileId for a path.
    ///
    /// The path is normalized lexically first, so `a/./b` and `a/c/../b`
    /// share one id.
    pub fn file_id(&self, path: &Path) -> FileId {
        let path = normalize(path);

        // Fast path: read lock
        {
            let inner = self.inner.read();
            if let Some(&id) = inner.path_to_id.get(&path) {
                return id;
            }
        }

        // Slow path: write lock
        let mut inner = self.inner.write();

        // Double-check
        if let Some(&id) = inner.path_to_id.get(&path) {
            return id;
        }

        let id = FileId::new(inner.next_id);
        inner.next_id += 1;
        inner.path_to_id.insert(path.clone(), id);
        inner.id_to_path.insert(id, path);
        id
    }

    /// Register an existing file.
    pub fn add_file(&self, path: &Path) -> FileId {
        let id = self.file_id(path);
        self.inner.write().present.insert(id);
        id
    }

    /// Look up a path without assigning an id.
    pub fn lookup(&self, path: &Path) -> Option<FileId> {
        self.inner.read().path_to_id.get(&normalize(path)).copied()
    }

    /// Get the path for a FileId.
    pub fn path(&self, file: FileId) -> Option<PathBuf> {
        self.inner.read().id_to_path.get(&file).cloned()
    }

    pub fn exists(&self, file: FileId) -> bool {
        self.inner.read().present.contains(&file)
    }

    /// Mark a file as deleted. Its id stays reserved for the path.
    pub fn remove(&self, file: FileId) {
        self.inner.write().present.remove(&file);
    }

    /// Get the number of interned paths.
    pub fn len(&self) -> usize {
        self.inner.read().path_to_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FileSystem for FileSet {
    fn find_file_by_path(&self, path: &Path) -> Option<FileId> {
        if let Some(id) = self.lookup(path) {
            if self.exists(id) {
                return Some(id);
            }
        }
        if self.disk_lookup && path.exists() {
            tracing::trace!(path = %path.display(), "registering file found on disk");
            return Some(self.add_file(path));
        }
        None
    }

    fn relative_path(&self, file: FileId, root: FileId) -> Option<String> {
        let file_path = self.path(file)?;
        let root_path = self.path(root)?;
        let relative = file_path.strip_prefix(&root_path).ok()?;

        let segments: Vec<_> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect();
        Some(segments.join("/"))
    }

    fn name(&self, file: FileId) -> Option<SmolStr> {
        let path = self.path(file)?;
        path.file_name().map(|n| SmolStr::new(n.to_string_lossy()))
    }

    fn parent(&self, file: FileId) -> Option<FileId> {
        let path = self.path(file)?;
        path.parent().map(|parent| self.file_id(parent))
    }

    fn canonical_path(&self, file: FileId) -> Option<PathBuf> {
        self.path(file).filter(|path| path.is_absolute())
    }
}

/// Resolve `.` and `..` components without touching the disk.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}

//! Symbol database: the host's cache of structural trees.
//!
//! Trees of source files and of compiled artifacts live side by side, keyed
//! by [`FileId`]. The database is the only owner of element data; everything
//! else holds [`ElementId`]s or cheap `Arc` clones for the length of one
//! search.

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::{FxHashMap, FxHashSet};
use smol_str::SmolStr;

use crate::base::FileId;
use super::builder::{FileForm, FileTree};
use super::element::{ElementData, SymbolKind};
use super::ids::ElementId;

/// One registered file.
#[derive(Debug)]
struct FileEntry {
    name: SmolStr,
    form: FileForm,
    copy_of: Option<FileId>,
    elements: Vec<Arc<ElementData>>,
    roots: Vec<ElementId>,
    /// Cleared when the host reparses or unloads the file.
    valid: bool,
}

/// Thread-safe store of structural trees.
#[derive(Debug, Default)]
pub struct SymbolDb {
    inner: RwLock<FxHashMap<FileId, FileEntry>>,
}

impl SymbolDb {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the tree of one file.
    pub fn insert_file(&self, tree: FileTree) {
        let entry = FileEntry {
            name: tree.name,
            form: tree.form,
            copy_of: tree.copy_of,
            elements: tree.elements.into_iter().map(Arc::new).collect(),
            roots: tree.roots,
            valid: true,
        };
        self.inner.write().insert(tree.file, entry);
    }

    /// Forget a file entirely. Handles into it stop resolving.
    pub fn remove_file(&self, file: FileId) {
        self.inner.write().remove(&file);
    }

    /// Mark every element of `file` invalid while keeping it readable.
    pub fn invalidate_file(&self, file: FileId) {
        if let Some(entry) = self.inner.write().get_mut(&file) {
            entry.valid = false;
        }
    }

    pub fn contains_file(&self, file: FileId) -> bool {
        self.inner.read().contains_key(&file)
    }

    /// Look up an element's data.
    pub fn element(&self, id: ElementId) -> Option<Arc<ElementData>> {
        let inner = self.inner.read();
        inner
            .get(&id.file)?
            .elements
            .get(id.local.index() as usize)
            .cloned()
    }

    pub fn kind(&self, id: ElementId) -> Option<SymbolKind> {
        self.element(id).map(|data| data.kind())
    }

    /// Whether `id` resolves and its file has not been invalidated.
    pub fn is_valid(&self, id: ElementId) -> bool {
        let inner = self.inner.read();
        inner
            .get(&id.file)
            .is_some_and(|entry| entry.valid && (id.local.index() as usize) < entry.elements.len())
    }

    pub fn file_name(&self, file: FileId) -> Option<SmolStr> {
        self.inner.read().get(&file).map(|entry| entry.name.clone())
    }

    pub fn file_form(&self, file: FileId) -> Option<FileForm> {
        self.inner.read().get(&file).map(|entry| entry.form)
    }

    pub fn is_file_valid(&self, file: FileId) -> bool {
        self.inner.read().get(&file).is_some_and(|entry| entry.valid)
    }

    /// The file `file` is an in-memory light copy of, if any.
    pub fn copy_of(&self, file: FileId) -> Option<FileId> {
        self.inner.read().get(&file).and_then(|entry| entry.copy_of)
    }

    /// The file `file` was copied from, or `file` itself.
    pub fn original_file(&self, file: FileId) -> FileId {
        self.copy_of(file).unwrap_or(file)
    }

    /// The element `id` mirrors, or `id` itself.
    pub fn original_element(&self, id: ElementId) -> ElementId {
        self.element(id)
            .and_then(|data| data.original)
            .unwrap_or(id)
    }

    /// Top-level declarations of a file.
    pub fn roots(&self, file: FileId) -> Vec<ElementId> {
        self.inner
            .read()
            .get(&file)
            .map(|entry| entry.roots.clone())
            .unwrap_or_default()
    }

    /// Nearest enclosing class of `id`, not counting `id` itself.
    pub fn containing_class(&self, id: ElementId) -> Option<ElementId> {
        let mut seen = FxHashSet::default();
        let mut current = self.element(id)?.parent;
        while let Some(parent) = current {
            // A corrupted parent chain has no containing class.
            if !seen.insert(parent) {
                return None;
            }
            let data = self.element(parent)?;
            if data.kind() == SymbolKind::Class && data.type_param().is_none() {
                return Some(parent);
            }
            current = data.parent;
        }
        None
    }

    /// Number of registered files.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

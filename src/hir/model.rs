//! Structural-model loading.

use crate::base::FileId;
use super::builder::FileForm;
use super::db::SymbolDb;
use super::ids::ElementId;

/// A loaded file's structural representation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StructuralRoot {
    pub file: FileId,
    pub form: FileForm,
    /// Top-level declarations; one file may declare several classes.
    pub roots: Vec<ElementId>,
}

/// Parses or loads a virtual file into its structural tree.
pub trait ModelManager {
    fn load(&self, file: FileId) -> Option<StructuralRoot>;
}

/// Serves the trees registered with the database. Invalidated files do not load.
impl ModelManager for SymbolDb {
    fn load(&self, file: FileId) -> Option<StructuralRoot> {
        if !self.is_file_valid(file) {
            return None;
        }
        Some(StructuralRoot {
            file,
            form: self.file_form(file)?,
            roots: self.roots(file),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hir::TreeBuilder;

    #[test]
    fn test_load_registered_tree() {
        let db = SymbolDb::new();
        let mut b = TreeBuilder::compiled(FileId::new(4), "Pair.class");
        let first = b.class(None, "Pair", Some("Pair"));
        let second = b.class(None, "PairHelper", Some("PairHelper"));
        db.insert_file(b.finish());

        let root = db.load(FileId::new(4)).unwrap();
        assert_eq!(root.form, FileForm::Compiled);
        assert_eq!(root.roots, vec![first, second]);
    }

    #[test]
    fn test_unknown_or_stale_files_do_not_load() {
        let db = SymbolDb::new();
        assert_eq!(db.load(FileId::new(4)), None);

        db.insert_file(TreeBuilder::compiled(FileId::new(4), "Pair.class").finish());
        db.invalidate_file(FileId::new(4));
        assert_eq!(db.load(FileId::new(4)), None);
    }
}

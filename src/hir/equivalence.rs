//! Structural equivalence: "is this the same declaration?"
//!
//! A declaration parsed from project source and the same declaration read
//! back from its compiled artifact are different tree nodes in different
//! files. This module decides whether two such nodes denote one logical
//! declaration.
//!
//! # Rules
//!
//! - **Classes** match on the implicit-wrapper flag, simple name and
//!   qualified name. When the two live in unrelated files, file
//!   classification decides: source/library on both sides, or an excluded
//!   file (build output) against a source file.
//! - **Type parameters** (classes without a qualified name) match on
//!   declaration index and then on their owners.
//! - **Fields** match on name and containing class.
//! - **Methods** match on name, containing class, and per-position
//!   parameter types.
//!
//! Every check is total: invalid elements, missing names, unresolved types
//! and dangling ids all answer `false`.
//!
//! # Recursion guards
//!
//! Two explicit guards keep cyclic models finite:
//!
//! - `PairGuard` holds the type-parameter pairs whose owners are being
//!   compared. Re-entering a pair answers "equivalent" (not yet disproven).
//! - `TypeTexts` holds the canonical texts of types already seen while
//!   comparing one parameter pair. A bound whose text was seen answers
//!   "not equivalent".

use std::hash::BuildHasher;

use rustc_hash::{FxBuildHasher, FxHashSet};
use smol_str::SmolStr;

use crate::project::ProjectIndex;
use super::db::SymbolDb;
use super::element::{ElementData, SymbolKind, TypeParamDetail};
use super::ids::ElementId;
use super::symbol::ElementRef;
use super::ty::Ty;

type PairGuard = FxHashSet<(ElementId, ElementId)>;
type TypeTexts = FxHashSet<SmolStr>;

/// The equivalence evaluator.
///
/// Cheap to copy; holds only the database and the project index used to
/// classify files.
#[derive(Clone, Copy)]
pub struct Equivalence<'a> {
    db: &'a SymbolDb,
    project: &'a dyn ProjectIndex,
}

impl<'a> Equivalence<'a> {
    pub fn new(db: &'a SymbolDb, project: &'a dyn ProjectIndex) -> Self {
        Self { db, project }
    }

    pub fn db(&self) -> &'a SymbolDb {
        self.db
    }

    pub fn project(&self) -> &'a dyn ProjectIndex {
        self.project
    }

    /// A database-backed symbol for `id`, if it resolves.
    pub fn symbol(&self, id: ElementId) -> Option<ElementRef<'a>> {
        let data = self.db.element(id)?;
        Some(ElementRef::new(*self, id, data))
    }

    pub fn classes_equivalent(&self, a: ElementId, b: ElementId) -> bool {
        self.class_eq(a, b, &mut PairGuard::default())
    }

    pub fn fields_equivalent(&self, a: ElementId, b: ElementId) -> bool {
        self.field_eq(a, b, &mut PairGuard::default())
    }

    pub fn methods_equivalent(&self, a: ElementId, b: ElementId) -> bool {
        self.method_eq(a, b, &mut PairGuard::default())
    }

    /// Equivalence dispatched on `a`'s kind. `Other` elements are only
    /// equivalent to themselves.
    pub fn elements_equivalent(&self, a: ElementId, b: ElementId) -> bool {
        self.element_eq(a, b, &mut PairGuard::default())
    }

    /// Whether the tree node `node` is the counterpart of `source`.
    ///
    /// Dispatches on the node's kind. Nodes of a kind the search does not
    /// distinguish defer to the source symbol's own identity check.
    pub fn matches(&self, node: ElementId, source: ElementId) -> bool {
        let mut guard = PairGuard::default();
        match self.db.kind(node) {
            Some(SymbolKind::Class) => self.class_eq(node, source, &mut guard),
            Some(SymbolKind::Field) => self.field_eq(node, source, &mut guard),
            Some(SymbolKind::Method) => self.method_eq(node, source, &mut guard),
            Some(SymbolKind::Other) => self.element_eq(source, node, &mut guard),
            None => false,
        }
    }

    fn element_eq(&self, a: ElementId, b: ElementId, guard: &mut PairGuard) -> bool {
        match self.db.kind(a) {
            Some(SymbolKind::Class) => self.class_eq(a, b, guard),
            Some(SymbolKind::Field) => self.field_eq(a, b, guard),
            Some(SymbolKind::Method) => self.method_eq(a, b, guard),
            Some(SymbolKind::Other) => a == b && self.db.is_valid(a),
            None => false,
        }
    }

    /// Both valid, and both resolve to data.
    fn load_pair(
        &self,
        a: ElementId,
        b: ElementId,
    ) -> Option<(std::sync::Arc<ElementData>, std::sync::Arc<ElementData>)> {
        if !self.db.is_valid(a) || !self.db.is_valid(b) {
            return None;
        }
        Some((self.db.element(a)?, self.db.element(b)?))
    }

    // ========================================================================
    // CLASSES
    // ========================================================================

    fn class_eq(&self, a: ElementId, b: ElementId, guard: &mut PairGuard) -> bool {
        let Some((da, db)) = self.load_pair(a, b) else {
            return false;
        };
        if a == b {
            return true;
        }
        let (Some(ca), Some(cb)) = (da.as_class(), db.as_class()) else {
            return false;
        };
        if ca.implicit != cb.implicit {
            return false;
        }

        if !ca.implicit {
            let (Some(n1), Some(n2)) = (&da.name, &db.name) else {
                return false;
            };
            if FxBuildHasher.hash_one(n1) != FxBuildHasher.hash_one(n2) || n1 != n2 {
                return false;
            }
        }

        match (&da.qualified_name, &db.qualified_name) {
            (Some(q1), Some(q2)) => {
                if q1 != q2 {
                    false
                } else if self.db.original_element(a) == self.db.original_element(b) {
                    true
                } else {
                    self.files_correspond(a, b)
                }
            }
            (None, None) => self.type_params_eq(a, da.type_param(), b, db.type_param(), guard),
            _ => false,
        }
    }

    /// Decide whether equally named classes from two files are the same class.
    ///
    /// Files related by light copying always correspond. Unrelated files are
    /// classified through the project index; build output is excluded from
    /// indexing, so an excluded file corresponds to a source file.
    fn files_correspond(&self, a: ElementId, b: ElementId) -> bool {
        let file1 = self.db.original_file(a.file);
        let file2 = self.db.original_file(b.file);
        let copy1 = self.db.copy_of(file1);
        let copy2 = self.db.copy_of(file2);

        let unrelated = (copy1 != copy2 || copy1.is_none())
            && copy1 != Some(file2)
            && copy2 != Some(file1)
            && file1 != file2;
        if !unrelated {
            return true;
        }

        let lib1 = self.project.is_in_library_classes(file1);
        let lib2 = self.project.is_in_library_classes(file2);
        let in_source1 = self.project.is_in_source(file1);
        let in_source2 = self.project.is_in_source(file2);
        let excluded1 = self.project.is_excluded_file(file1);
        let excluded2 = self.project.is_excluded_file(file2);

        tracing::trace!(
            ?file1, ?file2, lib1, lib2, in_source1, in_source2, excluded1, excluded2,
            "classifying class files"
        );

        ((in_source1 || lib1) && (in_source2 || lib2))
            || (excluded1 && in_source2)
            || (excluded2 && in_source1)
    }

    fn type_params_eq(
        &self,
        a: ElementId,
        p1: Option<&TypeParamDetail>,
        b: ElementId,
        p2: Option<&TypeParamDetail>,
        guard: &mut PairGuard,
    ) -> bool {
        let (Some(p1), Some(p2)) = (p1, p2) else {
            return false;
        };
        if p1.index != p2.index {
            return false;
        }
        if p1.fresh.is_some() && p1.fresh == p2.fresh {
            return true;
        }

        // Owners may refer back to these parameters.
        if !guard.insert((a, b)) {
            return true;
        }
        let owners_eq = self.element_eq(p1.owner, p2.owner, guard);
        guard.remove(&(a, b));
        owners_eq
    }

    // ========================================================================
    // FIELDS & METHODS
    // ========================================================================

    fn field_eq(&self, a: ElementId, b: ElementId, guard: &mut PairGuard) -> bool {
        let Some((da, db)) = self.load_pair(a, b) else {
            return false;
        };
        if da.as_field().is_none() || db.as_field().is_none() {
            return false;
        }
        if !same_name(&da, &db) {
            return false;
        }
        match (self.db.containing_class(a), self.db.containing_class(b)) {
            (Some(c1), Some(c2)) => self.class_eq(c1, c2, guard),
            _ => false,
        }
    }

    fn method_eq(&self, a: ElementId, b: ElementId, guard: &mut PairGuard) -> bool {
        let Some((da, db)) = self.load_pair(a, b) else {
            return false;
        };
        if a == b {
            return true;
        }
        let (Some(m1), Some(m2)) = (da.as_method(), db.as_method()) else {
            return false;
        };
        if !same_name(&da, &db) {
            return false;
        }
        let classes_eq = match (self.db.containing_class(a), self.db.containing_class(b)) {
            (Some(c1), Some(c2)) => self.class_eq(c1, c2, guard),
            _ => false,
        };
        if !classes_eq || m1.params.len() != m2.params.len() {
            return false;
        }

        m1.params.iter().zip(&m2.params).all(|(p1, p2)| {
            let mut visited = TypeTexts::default();
            self.param_type_eq(&p1.ty, &p2.ty, &mut visited, guard)
        })
    }

    /// Parameter types are compared by declaration, not by text: a source
    /// `Foo` and a compiled `Foo` resolve to different but equivalent classes.
    fn param_type_eq(
        &self,
        t1: &Ty,
        t2: &Ty,
        visited: &mut TypeTexts,
        guard: &mut PairGuard,
    ) -> bool {
        match (t1, t2) {
            (Ty::Array(c1), Ty::Array(c2)) => self.param_type_eq(c1, c2, visited, guard),
            (Ty::Array(_), _) => false,
            (
                Ty::Class { text: text1, resolved: r1 },
                Ty::Class { text: text2, resolved: r2 },
            ) => {
                visited.insert(text1.clone());
                visited.insert(text2.clone());
                let (Some(r1), Some(r2)) = (*r1, *r2) else {
                    return false;
                };
                let (Some(d1), Some(d2)) = (self.db.element(r1), self.db.element(r2)) else {
                    return false;
                };
                match (d1.type_param(), d2.type_param()) {
                    (Some(p1), Some(p2)) => {
                        if d1.name != d2.name || p1.index != p2.index {
                            return false;
                        }
                        self.bounds_eq(&p1.bounds, &p2.bounds, visited, guard)
                    }
                    _ => self.class_eq(r1, r2, guard),
                }
            }
            _ => t1 == t2,
        }
    }

    fn bounds_eq(
        &self,
        bounds1: &[Ty],
        bounds2: &[Ty],
        visited: &mut TypeTexts,
        guard: &mut PairGuard,
    ) -> bool {
        if bounds1.len() != bounds2.len() {
            return false;
        }
        for (b1, b2) in bounds1.iter().zip(bounds2) {
            // Seen before: a self-referential bound chain.
            if visited.contains(&b1.canonical_text()) || visited.contains(&b2.canonical_text()) {
                return false;
            }
            if !self.param_type_eq(b1, b2, visited, guard) {
                return false;
            }
        }
        true
    }
}

fn same_name(a: &ElementData, b: &ElementData) -> bool {
    matches!((&a.name, &b.name), (Some(n1), Some(n2)) if n1 == n2)
}

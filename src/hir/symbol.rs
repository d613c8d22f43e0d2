//! The symbol capability interface.

use std::sync::Arc;

use crate::base::{FileId, TextRange};
use super::element::{ElementData, ElementDetail, SymbolKind};
use super::equivalence::Equivalence;
use super::ids::ElementId;

/// Everything the host search engine may ask of a search target.
///
/// Implemented by plain database-backed elements ([`ElementRef`]) and by the
/// delegating proxies the search builds around compiled elements.
pub trait Symbol {
    /// The element answering structural queries.
    fn id(&self) -> ElementId;

    fn kind(&self) -> SymbolKind;

    fn name(&self) -> Option<&str>;

    fn qualified_name(&self) -> Option<&str>;

    /// Kind-specific data: field type, method parameters, class flags.
    fn detail(&self) -> &ElementDetail;

    fn containing_class(&self) -> Option<ElementId>;

    fn containing_file(&self) -> FileId {
        self.id().file
    }

    /// Declaration text.
    fn text(&self) -> &str;

    /// Where navigation lands inside the containing file.
    fn text_range(&self) -> TextRange;

    fn is_valid(&self) -> bool;

    /// Whether `other` denotes the same declaration as this symbol.
    fn is_equivalent_to(&self, other: ElementId) -> bool;

    /// Short `Kind:name` form used in messages.
    fn describe(&self) -> String {
        format!("{}:{}", self.kind(), self.name().unwrap_or("<anonymous>"))
    }
}

/// A symbol read straight from the [`SymbolDb`](super::SymbolDb).
///
/// Its identity check is the structural equivalence of its own kind.
#[derive(Clone)]
pub struct ElementRef<'a> {
    eq: Equivalence<'a>,
    id: ElementId,
    data: Arc<ElementData>,
}

impl<'a> ElementRef<'a> {
    pub(super) fn new(eq: Equivalence<'a>, id: ElementId, data: Arc<ElementData>) -> Self {
        Self { eq, id, data }
    }

    pub fn data(&self) -> &ElementData {
        &self.data
    }
}

impl std::fmt::Debug for ElementRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElementRef")
            .field("id", &self.id)
            .field("kind", &self.data.kind())
            .field("name", &self.data.name)
            .finish()
    }
}

impl Symbol for ElementRef<'_> {
    fn id(&self) -> ElementId {
        self.id
    }

    fn kind(&self) -> SymbolKind {
        self.data.kind()
    }

    fn name(&self) -> Option<&str> {
        self.data.name.as_deref()
    }

    fn qualified_name(&self) -> Option<&str> {
        self.data.qualified_name.as_deref()
    }

    fn detail(&self) -> &ElementDetail {
        &self.data.detail
    }

    fn containing_class(&self) -> Option<ElementId> {
        self.eq.db().containing_class(self.id)
    }

    fn text(&self) -> &str {
        &self.data.text
    }

    fn text_range(&self) -> TextRange {
        self.data.range
    }

    fn is_valid(&self) -> bool {
        self.eq.db().is_valid(self.id)
    }

    fn is_equivalent_to(&self, other: ElementId) -> bool {
        match self.kind() {
            SymbolKind::Class => self.eq.classes_equivalent(self.id, other),
            SymbolKind::Field => self.eq.fields_equivalent(self.id, other),
            SymbolKind::Method => self.eq.methods_equivalent(self.id, other),
            SymbolKind::Other => self.id == other && self.is_valid(),
        }
    }
}

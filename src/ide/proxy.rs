//! Delegating proxies around compiled declarations.
//!
//! The search engine walks compiled references when it is handed a compiled
//! element, but decides whether a reference hits by asking the target's
//! identity check. A [`DelegatingProxy`] answers every structural query from
//! the compiled element and forwards only the identity check to the source
//! symbol, so source and compiled usages are reported as one declaration.

use thiserror::Error;

use crate::base::{FileId, TextRange};
use crate::hir::{ElementDetail, ElementId, ElementRef, Symbol, SymbolKind};

/// Misuse of the proxy factory. Never recovered.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProxyError {
    #[error("cannot wrap a {target} so that it answers identity as a {identity}")]
    KindMismatch {
        target: SymbolKind,
        identity: SymbolKind,
    },

    #[error("compiled {kind} {id:?} has no containing class")]
    MissingContainingClass { kind: SymbolKind, id: ElementId },
}

/// A compiled element whose identity check answers as another symbol.
#[derive(Debug, Clone)]
pub struct DelegatingProxy<'a> {
    target: ElementRef<'a>,
    identity: ElementRef<'a>,
    containing_class: Option<ElementId>,
}

impl<'a> DelegatingProxy<'a> {
    /// Wrap `target`, delegating identity to `identity`.
    ///
    /// Both must be of the same kind, one of class, field, or method. Field
    /// and method targets must have a containing class.
    pub fn new(target: ElementRef<'a>, identity: ElementRef<'a>) -> Result<Self, ProxyError> {
        let kind = target.kind();
        if kind != identity.kind() || kind == SymbolKind::Other {
            return Err(ProxyError::KindMismatch {
                target: kind,
                identity: identity.kind(),
            });
        }

        let containing_class = target.containing_class();
        if matches!(kind, SymbolKind::Field | SymbolKind::Method) && containing_class.is_none() {
            return Err(ProxyError::MissingContainingClass {
                kind,
                id: target.id(),
            });
        }

        Ok(Self {
            target,
            identity,
            containing_class,
        })
    }

    /// The wrapped compiled element.
    pub fn target(&self) -> &ElementRef<'a> {
        &self.target
    }

    /// The symbol whose identity check this proxy answers with.
    pub fn identity(&self) -> &ElementRef<'a> {
        &self.identity
    }
}

impl Symbol for DelegatingProxy<'_> {
    fn id(&self) -> ElementId {
        self.target.id()
    }

    fn kind(&self) -> SymbolKind {
        self.target.kind()
    }

    fn name(&self) -> Option<&str> {
        self.target.name()
    }

    fn qualified_name(&self) -> Option<&str> {
        self.target.qualified_name()
    }

    fn detail(&self) -> &ElementDetail {
        self.target.detail()
    }

    fn containing_class(&self) -> Option<ElementId> {
        self.containing_class
    }

    fn containing_file(&self) -> FileId {
        self.target.containing_file()
    }

    fn text(&self) -> &str {
        self.target.text()
    }

    fn text_range(&self) -> TextRange {
        self.target.text_range()
    }

    fn is_valid(&self) -> bool {
        self.target.is_valid()
    }

    fn is_equivalent_to(&self, other: ElementId) -> bool {
        self.identity.is_equivalent_to(other)
    }
}

/// What the search engine is handed for one match.
#[derive(Debug, Clone)]
pub enum SearchTarget<'a> {
    Proxy(DelegatingProxy<'a>),
    /// Kinds the factory does not wrap are searched as themselves.
    Plain(ElementRef<'a>),
}

impl<'a> SearchTarget<'a> {
    /// Build the search target for a compiled match of `source`.
    pub fn for_match(matched: ElementRef<'a>, source: ElementRef<'a>) -> Result<Self, ProxyError> {
        match (matched.kind(), source.kind()) {
            (SymbolKind::Other, SymbolKind::Other) => Ok(SearchTarget::Plain(matched)),
            _ => DelegatingProxy::new(matched, source).map(SearchTarget::Proxy),
        }
    }

    pub fn as_symbol(&self) -> &dyn Symbol {
        match self {
            SearchTarget::Proxy(proxy) => proxy,
            SearchTarget::Plain(element) => element,
        }
    }

    pub fn id(&self) -> ElementId {
        self.as_symbol().id()
    }
}

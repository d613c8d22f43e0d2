//! Structural elements: the nodes of a parsed or decompiled file.

use std::fmt;
use std::sync::Arc;

use smol_str::SmolStr;

use crate::base::TextRange;
use super::ids::ElementId;
use super::ty::Ty;

// ============================================================================
// KINDS
// ============================================================================

/// The closed set of element kinds the search cares about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Class,
    Field,
    Method,
    Other,
}

impl SymbolKind {
    /// Display name used in messages.
    pub fn display(&self) -> &'static str {
        match self {
            SymbolKind::Class => "Class",
            SymbolKind::Field => "Field",
            SymbolKind::Method => "Method",
            SymbolKind::Other => "Element",
        }
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display())
    }
}

// ============================================================================
// DETAILS
// ============================================================================

/// Kind-specific data. The variant is the element's kind tag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ElementDetail {
    Class(ClassDetail),
    Field(FieldDetail),
    Method(MethodDetail),
    Other,
}

impl ElementDetail {
    pub fn kind(&self) -> SymbolKind {
        match self {
            ElementDetail::Class(_) => SymbolKind::Class,
            ElementDetail::Field(_) => SymbolKind::Field,
            ElementDetail::Method(_) => SymbolKind::Method,
            ElementDetail::Other => SymbolKind::Other,
        }
    }
}

/// Class-like declarations, including type parameters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassDetail {
    /// Synthesized top-level wrapper of a compilation unit without an explicit class.
    pub implicit: bool,
    /// Present when this "class" is a type parameter.
    pub type_param: Option<TypeParamDetail>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeParamDetail {
    /// Position in the owner's type parameter list.
    pub index: u32,
    /// The declaring class or method.
    pub owner: ElementId,
    /// Upper bounds in declaration order.
    pub bounds: Vec<Ty>,
    /// Identity of a fresh (capture) variable; equal ids denote the same variable.
    pub fresh: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldDetail {
    pub ty: Ty,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MethodDetail {
    pub params: Vec<Param>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Param {
    pub name: SmolStr,
    pub ty: Ty,
}

impl Param {
    pub fn new(name: &str, ty: Ty) -> Self {
        Self {
            name: SmolStr::new(name),
            ty,
        }
    }
}

// ============================================================================
// ELEMENT DATA
// ============================================================================

/// One node of a structural tree.
///
/// Never mutated once the file is registered with the
/// [`SymbolDb`](super::SymbolDb).
#[derive(Clone, Debug)]
pub struct ElementData {
    pub name: Option<SmolStr>,
    pub qualified_name: Option<SmolStr>,
    pub detail: ElementDetail,
    pub parent: Option<ElementId>,
    /// Children in declaration order.
    pub children: Vec<ElementId>,
    /// The element this one mirrors, e.g. the source declaration behind a
    /// decompiled class. `None` means the element is its own original.
    pub original: Option<ElementId>,
    /// Declaration text.
    pub text: Arc<str>,
    /// Navigation range inside the containing file.
    pub range: TextRange,
}

impl ElementData {
    pub fn kind(&self) -> SymbolKind {
        self.detail.kind()
    }

    pub fn as_class(&self) -> Option<&ClassDetail> {
        match &self.detail {
            ElementDetail::Class(class) => Some(class),
            _ => None,
        }
    }

    pub fn as_method(&self) -> Option<&MethodDetail> {
        match &self.detail {
            ElementDetail::Method(method) => Some(method),
            _ => None,
        }
    }

    pub fn as_field(&self) -> Option<&FieldDetail> {
        match &self.detail {
            ElementDetail::Field(field) => Some(field),
            _ => None,
        }
    }

    pub fn type_param(&self) -> Option<&TypeParamDetail> {
        self.as_class().and_then(|class| class.type_param.as_ref())
    }
}

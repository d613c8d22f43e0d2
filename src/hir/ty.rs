//! Declared types of fields and parameters.

use smol_str::SmolStr;

use super::ids::ElementId;

/// A type as written in a declaration.
///
/// Class types carry the declaration the host resolved them to. Resolution is
/// done by the host before the element reaches this crate; `resolved: None`
/// means the reference did not resolve.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Ty {
    /// `int`, `boolean`, `void`, ...
    Primitive(SmolStr),
    /// `T[]`
    Array(Box<Ty>),
    /// A class or type-parameter reference.
    Class {
        /// Canonical text, e.g. `java.util.List<T>`.
        text: SmolStr,
        resolved: Option<ElementId>,
    },
}

impl Ty {
    pub fn primitive(name: &str) -> Self {
        Ty::Primitive(SmolStr::new(name))
    }

    pub fn array(component: Ty) -> Self {
        Ty::Array(Box::new(component))
    }

    pub fn class(text: &str, resolved: ElementId) -> Self {
        Ty::Class {
            text: SmolStr::new(text),
            resolved: Some(resolved),
        }
    }

    pub fn unresolved(text: &str) -> Self {
        Ty::Class {
            text: SmolStr::new(text),
            resolved: None,
        }
    }

    /// The canonical text of this type.
    pub fn canonical_text(&self) -> SmolStr {
        match self {
            Ty::Primitive(name) => name.clone(),
            Ty::Array(component) => SmolStr::new(format!("{}[]", component.canonical_text())),
            Ty::Class { text, .. } => text.clone(),
        }
    }

    /// Number of array dimensions wrapped around the innermost component.
    pub fn array_depth(&self) -> usize {
        match self {
            Ty::Array(component) => 1 + component.array_depth(),
            _ => 0,
        }
    }
}

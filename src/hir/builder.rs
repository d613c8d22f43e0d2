//! Tree construction for one file.
//!
//! Hosts that own a real parser or decompiler translate its output through
//! [`TreeBuilder`]; tests use it to describe source and compiled files
//! side by side.

use std::sync::Arc;

use smol_str::SmolStr;

use crate::base::{FileId, TextRange, range};
use super::element::{
    ClassDetail, ElementData, ElementDetail, FieldDetail, MethodDetail, Param, TypeParamDetail,
};
use super::ids::{ElementId, LocalDefId};
use super::ty::Ty;

/// Whether a file is editable source or the structural view of a build artifact.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FileForm {
    Source,
    Compiled,
}

/// The finished structural tree of one file.
#[derive(Clone, Debug)]
pub struct FileTree {
    pub file: FileId,
    pub name: SmolStr,
    pub form: FileForm,
    /// The file this one is an in-memory light copy of.
    pub copy_of: Option<FileId>,
    /// Arena indexed by [`LocalDefId`].
    pub elements: Vec<ElementData>,
    /// Top-level declarations in declaration order.
    pub roots: Vec<ElementId>,
}

/// Builds a [`FileTree`], assigning local ids in declaration order.
#[derive(Debug)]
pub struct TreeBuilder {
    tree: FileTree,
}

impl TreeBuilder {
    pub fn new(file: FileId, name: &str, form: FileForm) -> Self {
        Self {
            tree: FileTree {
                file,
                name: SmolStr::new(name),
                form,
                copy_of: None,
                elements: Vec::new(),
                roots: Vec::new(),
            },
        }
    }

    pub fn source(file: FileId, name: &str) -> Self {
        Self::new(file, name, FileForm::Source)
    }

    pub fn compiled(file: FileId, name: &str) -> Self {
        Self::new(file, name, FileForm::Compiled)
    }

    /// Mark the file as an in-memory copy of `original`.
    pub fn copy_of(mut self, original: FileId) -> Self {
        self.tree.copy_of = Some(original);
        self
    }

    pub fn file(&self) -> FileId {
        self.tree.file
    }

    /// Add a named class. `parent: None` makes it a top-level declaration.
    pub fn class(
        &mut self,
        parent: Option<ElementId>,
        name: &str,
        qualified_name: Option<&str>,
    ) -> ElementId {
        self.push(
            parent,
            Some(SmolStr::new(name)),
            qualified_name.map(SmolStr::new),
            ElementDetail::Class(ClassDetail::default()),
            name.to_string(),
        )
    }

    /// Add the synthesized top-level class of a compilation unit without one.
    pub fn implicit_class(&mut self, qualified_name: Option<&str>) -> ElementId {
        self.push(
            None,
            None,
            qualified_name.map(SmolStr::new),
            ElementDetail::Class(ClassDetail {
                implicit: true,
                type_param: None,
            }),
            String::new(),
        )
    }

    pub fn field(&mut self, class: ElementId, name: &str, ty: Ty) -> ElementId {
        let text = format!("{} {}", ty.canonical_text(), name);
        self.push(
            Some(class),
            Some(SmolStr::new(name)),
            None,
            ElementDetail::Field(FieldDetail { ty }),
            text,
        )
    }

    pub fn method(&mut self, class: ElementId, name: &str, params: Vec<Param>) -> ElementId {
        let rendered: Vec<String> = params
            .iter()
            .map(|p| format!("{} {}", p.ty.canonical_text(), p.name))
            .collect();
        let text = format!("{}({})", name, rendered.join(", "));
        self.push(
            Some(class),
            Some(SmolStr::new(name)),
            None,
            ElementDetail::Method(MethodDetail { params }),
            text,
        )
    }

    /// Add a type parameter declared by `owner` (a class or method).
    pub fn type_param(&mut self, owner: ElementId, name: &str, index: u32) -> ElementId {
        self.push(
            Some(owner),
            Some(SmolStr::new(name)),
            None,
            ElementDetail::Class(ClassDetail {
                implicit: false,
                type_param: Some(TypeParamDetail {
                    index,
                    owner,
                    bounds: Vec::new(),
                    fresh: None,
                }),
            }),
            name.to_string(),
        )
    }

    pub fn add_bound(&mut self, type_param: ElementId, bound: Ty) {
        if let Some(tp) = self.type_param_slot(type_param) {
            tp.bounds.push(bound);
        }
    }

    /// Tag a type parameter as the fresh variable `fresh`.
    pub fn mark_fresh(&mut self, type_param: ElementId, fresh: u32) {
        if let Some(tp) = self.type_param_slot(type_param) {
            tp.fresh = Some(fresh);
        }
    }

    /// Add an element of a kind the search does not distinguish.
    pub fn other(&mut self, parent: ElementId, name: Option<&str>) -> ElementId {
        self.push(
            Some(parent),
            name.map(SmolStr::new),
            None,
            ElementDetail::Other,
            name.unwrap_or_default().to_string(),
        )
    }

    /// Record that `id` mirrors `original`.
    pub fn set_original(&mut self, id: ElementId, original: ElementId) {
        if let Some(data) = self.slot(id) {
            data.original = Some(original);
        }
    }

    /// Replace the declaration text and place it at byte offset `start`.
    pub fn set_text(&mut self, id: ElementId, text: &str, start: u32) {
        if let Some(data) = self.slot(id) {
            data.range = range(start, start + text.len() as u32);
            data.text = Arc::from(text);
        }
    }

    pub fn finish(self) -> FileTree {
        self.tree
    }

    fn push(
        &mut self,
        parent: Option<ElementId>,
        name: Option<SmolStr>,
        qualified_name: Option<SmolStr>,
        detail: ElementDetail,
        text: String,
    ) -> ElementId {
        let id = ElementId::new(
            self.tree.file,
            LocalDefId::new(self.tree.elements.len() as u32),
        );
        self.tree.elements.push(ElementData {
            name,
            qualified_name,
            detail,
            parent,
            children: Vec::new(),
            original: None,
            text: Arc::from(text),
            range: TextRange::default(),
        });

        match parent {
            Some(parent) => {
                if let Some(data) = self.slot(parent) {
                    data.children.push(id);
                }
            }
            None => self.tree.roots.push(id),
        }
        id
    }

    fn slot(&mut self, id: ElementId) -> Option<&mut ElementData> {
        if id.file != self.tree.file {
            return None;
        }
        self.tree.elements.get_mut(id.local.index() as usize)
    }

    fn type_param_slot(&mut self, id: ElementId) -> Option<&mut TypeParamDetail> {
        match &mut self.slot(id)?.detail {
            ElementDetail::Class(ClassDetail {
                type_param: Some(tp),
                ..
            }) => Some(tp),
            _ => None,
        }
    }
}

//! Structural model: the trees of source files and compiled artifacts, and
//! the equivalence relation between their declarations.

mod builder;
mod db;
mod element;
mod equivalence;
mod ids;
mod model;
mod symbol;
mod ty;

pub use builder::{FileForm, FileTree, TreeBuilder};
pub use db::SymbolDb;
pub use element::{
    ClassDetail, ElementData, ElementDetail, FieldDetail, MethodDetail, Param, SymbolKind,
    TypeParamDetail,
};
pub use equivalence::Equivalence;
pub use ids::{ElementId, LocalDefId};
pub use model::{ModelManager, StructuralRoot};
pub use symbol::{ElementRef, Symbol};
pub use ty::Ty;

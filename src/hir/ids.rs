//! Identifiers for structural elements.

use std::fmt;

use crate::base::FileId;

/// The identity of one structural element.
///
/// Combines the file the element was parsed from with a file-local index.
/// Two elements are the same object exactly when their ids are equal, so a
/// source declaration and its compiled mirror always have distinct ids even
/// when they describe the same declaration.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ElementId {
    /// The file containing this element
    pub file: FileId,
    /// The position of the element in its file's arena
    pub local: LocalDefId,
}

impl ElementId {
    #[inline]
    pub const fn new(file: FileId, local: LocalDefId) -> Self {
        Self { file, local }
    }
}

impl fmt::Debug for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ElementId({:?}:{})", self.file, self.local.0)
    }
}

/// A file-local element index.
///
/// Assigned sequentially by [`TreeBuilder`](super::TreeBuilder) in the order
/// elements are declared.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct LocalDefId(pub u32);

impl LocalDefId {
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw index.
    #[inline]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for LocalDefId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LocalDefId({})", self.0)
    }
}

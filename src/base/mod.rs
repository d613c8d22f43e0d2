//! Foundation types shared by every layer.
//!
//! - [`FileId`] - Interned virtual file identifiers
//! - [`TextRange`], [`TextSize`] - Source positions used for navigation
//!
//! This module has NO dependencies on other crate modules.

mod file_id;
mod span;

pub use file_id::FileId;
pub use span::{TextRange, TextSize};
pub(crate) use span::range;

// Re-export text-size types for convenience
pub use text_size;

//! # usage-bridge
//!
//! Find Usages across the source/compiled boundary of a JVM project.
//!
//! A declaration in project source is searched through its compiled class
//! file: the class file is located by build-layout convention, the
//! structurally equivalent declaration is found in its tree, and that
//! declaration is handed to the host's usage search behind a proxy whose
//! identity check answers as the source declaration.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide      → Locator, tree search, delegating proxies, Find Usages action
//!   ↓
//! hir      → Structural model, symbol database, equivalence
//!   ↓
//! project  → Host collaborators: project index, virtual file system
//!   ↓
//! base     → Primitives (FileId, TextRange)
//!
//! config   → Build layout and match policy
//! ```

// ============================================================================
// LAYERS
// ============================================================================

/// Foundation types: FileId, TextRange
pub mod base;

/// Project index and file system collaborators
pub mod project;

/// Structural model and equivalence
pub mod hir;

/// The Find Usages pipeline
pub mod ide;

/// Search settings
pub mod config;

// Re-export the entry points
pub use base::{FileId, TextRange, TextSize};
pub use config::{BuildLayout, MatchPolicy, SearchConfig};
pub use hir::{ElementId, Equivalence, Symbol, SymbolDb, SymbolKind};
pub use ide::{FindUsages, Notifier, SearchEngine, SearchOutcome};

//! IDE features: the translated Find Usages action.
//!
//! This module turns a source-side symbol into search targets the host's
//! usage search understands:
//!
//! - [`locator`]: source file → compiled artifact on disk
//! - [`tree_search`]: compiled tree → equivalent declarations
//! - [`proxy`]: compiled declaration → delegating search target
//! - [`find_usages`]: the action tying them together
//!
//! ## Usage
//!
//! ```ignore
//! use usage_bridge::ide::{FindUsages, SearchOutcome};
//!
//! let action = FindUsages::new(&db, &layout, &files, &db, &config);
//! match action.start_find_usages(symbol, &mut engine, &mut dialogs)? {
//!     SearchOutcome::Translated { targets } => { /* usages reported */ }
//!     SearchOutcome::Passthrough | SearchOutcome::Aborted(_) => {}
//! }
//! ```

pub mod find_usages;
pub mod locator;
pub mod proxy;
pub mod tree_search;

pub use find_usages::{
    ERROR_TITLE, FindUsages, Notifier, SearchAbort, SearchEngine, SearchError, SearchOutcome,
};
pub use locator::{CompiledArtifact, CompiledArtifactLocator, LocateError};
pub use proxy::{DelegatingProxy, ProxyError, SearchTarget};
pub use tree_search::{TraversalError, find_equivalent, find_first};

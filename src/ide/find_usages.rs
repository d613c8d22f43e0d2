//! Find Usages entry point.
//!
//! ## Pipeline
//!
//! ```text
//! source symbol
//!   ├─ not in project content ─────────────→ search(source)        Passthrough
//!   └─ locate compiled artifact
//!        ├─ failed ────────────────────────→ one error dialog       Aborted
//!        └─ tree search over artifact roots
//!             ├─ no match ─────────────────→ one error dialog       Aborted
//!             └─ proxy per match ──────────→ search(proxy) each     Translated
//! ```
//!
//! Dialog-worthy failures come back as [`SearchOutcome::Aborted`]. A corrupt
//! tree or a proxy contract violation is a [`SearchError`] and reaches the
//! caller without any dialog or search.

use smol_str::SmolStr;
use thiserror::Error;

use crate::config::{MatchPolicy, SearchConfig};
use crate::hir::{ElementId, Equivalence, ModelManager, Symbol, SymbolDb};
use crate::project::{FileSystem, ProjectIndex};
use super::locator::{CompiledArtifactLocator, LocateError};
use super::proxy::{ProxyError, SearchTarget};
use super::tree_search::{TraversalError, find_equivalent};

/// Title of every error dialog raised by a search.
pub const ERROR_TITLE: &str = "Error";

/// The host's usage search. Consumes one target per call.
pub trait SearchEngine {
    fn search(&mut self, target: &dyn Symbol);
}

impl<F> SearchEngine for F
where
    F: FnMut(&dyn Symbol),
{
    fn search(&mut self, target: &dyn Symbol) {
        self(target)
    }
}

/// The host's modal error dialog.
pub trait Notifier {
    fn show_error(&mut self, title: &str, message: &str);
}

/// A search stopped before reaching the engine. Shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchAbort {
    #[error("No .class file found for: {symbol}")]
    ArtifactNotFound {
        symbol: String,
        #[source]
        cause: LocateError,
    },

    #[error("No matching element {text} found in compiled class for {file}")]
    NoStructuralMatch { text: String, file: SmolStr },

    #[error("{count} elements matching {text} found in compiled class for {file}")]
    AmbiguousMatch {
        text: String,
        file: SmolStr,
        count: usize,
    },
}

/// The host's model broke an invariant. The search is abandoned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("element {0:?} is not in the symbol database")]
    UnknownElement(ElementId),

    #[error("compiled tree traversal failed: {0}")]
    Traversal(#[from] TraversalError),

    #[error("cannot build search target: {0}")]
    Contract(#[from] ProxyError),
}

/// How one invocation ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The symbol is outside project content and was searched as is.
    Passthrough,
    /// The engine ran once per target, in match order.
    Translated { targets: Vec<ElementId> },
    /// An error dialog was shown and nothing was searched.
    Aborted(SearchAbort),
}

/// The Find Usages action, wired to its collaborators.
pub struct FindUsages<'a> {
    db: &'a SymbolDb,
    project: &'a dyn ProjectIndex,
    fs: &'a dyn FileSystem,
    models: &'a dyn ModelManager,
    config: &'a SearchConfig,
}

impl<'a> FindUsages<'a> {
    pub fn new(
        db: &'a SymbolDb,
        project: &'a dyn ProjectIndex,
        fs: &'a dyn FileSystem,
        models: &'a dyn ModelManager,
        config: &'a SearchConfig,
    ) -> Self {
        Self {
            db,
            project,
            fs,
            models,
            config,
        }
    }

    /// Start a usage search for `source`.
    pub fn start_find_usages(
        &self,
        source: ElementId,
        engine: &mut dyn SearchEngine,
        notifier: &mut dyn Notifier,
    ) -> Result<SearchOutcome, SearchError> {
        let eq = Equivalence::new(self.db, self.project);
        let symbol = eq.symbol(source).ok_or(SearchError::UnknownElement(source))?;

        if !self.project.is_in_content(symbol.containing_file()) {
            tracing::debug!(symbol = %symbol.describe(), "outside project content, searching as is");
            engine.search(&symbol);
            return Ok(SearchOutcome::Passthrough);
        }

        let locator =
            CompiledArtifactLocator::new(self.project, self.fs, self.models, &self.config.layout);
        let artifact = match locator.locate(&symbol) {
            Ok(artifact) => artifact,
            Err(cause) => {
                let abort = SearchAbort::ArtifactNotFound {
                    symbol: symbol.describe(),
                    cause,
                };
                return Ok(abort_search(notifier, abort));
            }
        };

        let matches = find_equivalent(eq, source, &artifact.roots)?;
        tracing::debug!(
            symbol = %symbol.describe(),
            path = %artifact.path.display(),
            matches = matches.len(),
            "searched compiled artifact"
        );

        if matches.is_empty() {
            let abort = SearchAbort::NoStructuralMatch {
                text: symbol.text().to_string(),
                file: self.file_name(&symbol),
            };
            return Ok(abort_search(notifier, abort));
        }
        if matches.len() > 1 {
            match self.config.on_multiple_matches {
                MatchPolicy::DispatchAll => {
                    tracing::warn!(
                        symbol = %symbol.describe(),
                        count = matches.len(),
                        "several compiled declarations match, searching all"
                    );
                }
                MatchPolicy::RequireUnique => {
                    let abort = SearchAbort::AmbiguousMatch {
                        text: symbol.text().to_string(),
                        file: self.file_name(&symbol),
                        count: matches.len(),
                    };
                    return Ok(abort_search(notifier, abort));
                }
            }
        }

        // All targets are built before the first search runs.
        let targets = matches
            .iter()
            .map(|&id| -> Result<SearchTarget<'a>, SearchError> {
                let matched = eq.symbol(id).ok_or(SearchError::UnknownElement(id))?;
                Ok(SearchTarget::for_match(matched, symbol.clone())?)
            })
            .collect::<Result<Vec<_>, _>>()?;

        for target in &targets {
            engine.search(target.as_symbol());
        }
        Ok(SearchOutcome::Translated { targets: matches })
    }

    fn file_name(&self, symbol: &dyn Symbol) -> SmolStr {
        let file = symbol.containing_file();
        self.db
            .file_name(file)
            .or_else(|| self.fs.name(file))
            .unwrap_or_default()
    }
}

fn abort_search(notifier: &mut dyn Notifier, abort: SearchAbort) -> SearchOutcome {
    tracing::warn!(reason = %abort, "usage search aborted");
    notifier.show_error(ERROR_TITLE, &abort.to_string());
    SearchOutcome::Aborted(abort)
}

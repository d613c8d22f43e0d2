//! Depth-first search of a compiled tree for a source symbol's counterpart.

use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::hir::{ElementId, Equivalence};

/// The tree being searched is corrupt. Aborts the whole search.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TraversalError {
    #[error("tree node {0:?} does not resolve")]
    DanglingNode(ElementId),

    #[error("tree node {0:?} reached twice")]
    Cycle(ElementId),
}

/// All nodes under `roots` equivalent to `source`, in pre-order.
///
/// A matching node is recorded and its children are not searched.
pub fn find_equivalent(
    eq: Equivalence<'_>,
    source: ElementId,
    roots: &[ElementId],
) -> Result<Vec<ElementId>, TraversalError> {
    let mut matches = Vec::new();
    walk(eq, source, roots, &mut |node| {
        matches.push(node);
        true
    })?;
    Ok(matches)
}

/// The first node of [`find_equivalent`]'s result, without searching further.
pub fn find_first(
    eq: Equivalence<'_>,
    source: ElementId,
    roots: &[ElementId],
) -> Result<Option<ElementId>, TraversalError> {
    let mut first = None;
    walk(eq, source, roots, &mut |node| {
        first = Some(node);
        false
    })?;
    Ok(first)
}

/// Pre-order walk with an explicit stack. `on_match` returns whether to go on.
fn walk(
    eq: Equivalence<'_>,
    source: ElementId,
    roots: &[ElementId],
    on_match: &mut dyn FnMut(ElementId) -> bool,
) -> Result<(), TraversalError> {
    let db = eq.db();
    let mut visited = FxHashSet::default();
    let mut stack: Vec<ElementId> = roots.iter().rev().copied().collect();

    while let Some(node) = stack.pop() {
        if !visited.insert(node) {
            return Err(TraversalError::Cycle(node));
        }
        let data = db.element(node).ok_or(TraversalError::DanglingNode(node))?;

        if eq.matches(node, source) {
            tracing::trace!(?node, "equivalent node");
            if !on_match(node) {
                return Ok(());
            }
            continue;
        }
        stack.extend(data.children.iter().rev().copied());
    }
    Ok(())
}

//! End-to-end Find Usages scenarios against an in-memory Gradle project.

mod common;

use std::path::PathBuf;

use common::{FOO_CLASS, FOO_JAVA, Workspace, foo, foo_pair};
use usage_bridge::hir::{Param, TreeBuilder, Ty};
use usage_bridge::ide::{LocateError, SearchAbort, SearchError, SearchOutcome, TraversalError};
use usage_bridge::{Equivalence, MatchPolicy, SearchConfig, SymbolKind};

// ============================================================================
// PASSTHROUGH
// ============================================================================

#[test]
fn test_library_symbol_is_searched_unchanged() {
    let ws = Workspace::gradle();
    let lib = ws.file("/libs/guava/com/google/common/collect/Lists.class");
    let mut b = TreeBuilder::compiled(lib, "Lists.class");
    let lists = b.class(None, "Lists", Some("com.google.common.collect.Lists"));
    ws.insert(b.finish());

    let run = ws.find_usages(lists);

    assert_eq!(run.outcome, Ok(SearchOutcome::Passthrough));
    assert_eq!(run.searched.len(), 1);
    assert_eq!(run.searched[0].id, lists);
    assert!(run.dialogs.is_empty());
}

#[test]
fn test_build_output_symbol_is_searched_unchanged() {
    let ws = Workspace::gradle();
    let (_, compiled) = foo_pair(&ws);

    let run = ws.find_usages(compiled.run_int);

    assert_eq!(run.outcome, Ok(SearchOutcome::Passthrough));
    assert_eq!(run.searched.len(), 1);
    assert_eq!(run.searched[0].id, compiled.run_int);
    assert!(run.dialogs.is_empty());
}

// ============================================================================
// TRANSLATION
// ============================================================================

#[test]
fn test_method_is_translated_to_compiled_method() {
    let ws = Workspace::gradle();
    let (source, compiled) = foo_pair(&ws);

    let run = ws.find_usages(source.run_int);

    assert_eq!(
        run.outcome,
        Ok(SearchOutcome::Translated {
            targets: vec![compiled.run_int]
        })
    );
    assert!(run.dialogs.is_empty());
    assert_eq!(run.searched.len(), 1);

    let target = &run.searched[0];
    assert_eq!(target.id, compiled.run_int);
    assert_eq!(target.kind, SymbolKind::Method);
    assert_eq!(target.name.as_deref(), Some("run"));
    assert_eq!(target.containing_class, Some(compiled.class));
    assert!(target.equivalent_to_source);
}

#[test]
fn test_every_member_kind_is_translated() {
    let ws = Workspace::gradle();
    let (source, compiled) = foo_pair(&ws);

    for (src, cls) in [
        (source.class, compiled.class),
        (source.count, compiled.count),
        (source.run_int_int, compiled.run_int_int),
        (source.run_string, compiled.run_string),
        (source.sum, compiled.sum),
    ] {
        let run = ws.find_usages(src);
        assert_eq!(
            run.outcome,
            Ok(SearchOutcome::Translated { targets: vec![cls] }),
            "translating {src:?}"
        );
        assert_eq!(run.searched[0].id, cls);
    }
}

#[test]
fn test_proxy_identity_answers_as_source() {
    let ws = Workspace::gradle();
    let (source, compiled) = foo_pair(&ws);
    let probes = [
        source.run_int,
        source.run_int_int,
        compiled.run_int,
        compiled.run_string,
        source.class,
        compiled.count,
    ];

    let run = ws.find_usages_probing(source.run_int, &probes);

    let eq = Equivalence::new(&ws.db, &ws.layout);
    let expected: Vec<bool> = probes
        .iter()
        .map(|&p| eq.methods_equivalent(source.run_int, p))
        .collect();
    assert_eq!(run.searched[0].probes, expected);
    assert_eq!(expected, vec![true, false, true, false, false, false]);
}

#[test]
fn test_test_source_set() {
    let ws = Workspace::gradle();
    let (tree, source) = foo(ws.file("/repo/test/com/acme/Foo.java"), false);
    ws.insert(tree);
    let (tree, compiled) = foo(ws.file("/repo/build/classes/java/test/com/acme/Foo.class"), true);
    ws.insert(tree);

    let run = ws.find_usages(source.count);

    assert_eq!(
        run.outcome,
        Ok(SearchOutcome::Translated {
            targets: vec![compiled.count]
        })
    );
}

#[test]
fn test_second_top_level_class_in_artifact() {
    let ws = Workspace::gradle();
    let src = ws.file(FOO_JAVA);
    let cls = ws.file(FOO_CLASS);

    let mut b = TreeBuilder::source(src, "Foo.java");
    b.class(None, "Foo", Some("com.acme.Foo"));
    let helper = b.class(None, "FooHelper", Some("com.acme.FooHelper"));
    ws.insert(b.finish());

    let mut b = TreeBuilder::compiled(cls, "Foo.class");
    b.class(None, "Foo", Some("com.acme.Foo"));
    let compiled_helper = b.class(None, "FooHelper", Some("com.acme.FooHelper"));
    ws.insert(b.finish());

    let run = ws.find_usages(helper);

    assert_eq!(
        run.outcome,
        Ok(SearchOutcome::Translated {
            targets: vec![compiled_helper]
        })
    );
}

// ============================================================================
// ABORTS
// ============================================================================

#[test]
fn test_missing_class_file_shows_one_dialog() {
    let ws = Workspace::gradle();
    let (tree, source) = foo(ws.file(FOO_JAVA), false);
    ws.insert(tree);

    let run = ws.find_usages(source.class);

    assert_eq!(
        run.outcome,
        Ok(SearchOutcome::Aborted(SearchAbort::ArtifactNotFound {
            symbol: "Class:Foo".to_string(),
            cause: LocateError::ArtifactMissing(PathBuf::from(FOO_CLASS)),
        }))
    );
    assert!(run.searched.is_empty());
    assert_eq!(
        run.dialogs,
        vec![(
            "Error".to_string(),
            "No .class file found for: Class:Foo".to_string()
        )]
    );
}

#[test]
fn test_stale_class_file_counts_as_missing() {
    let ws = Workspace::gradle();
    let (source, compiled) = foo_pair(&ws);
    ws.db.invalidate_file(compiled.class.file);

    let run = ws.find_usages(source.count);

    assert!(matches!(
        run.outcome,
        Ok(SearchOutcome::Aborted(SearchAbort::ArtifactNotFound {
            cause: LocateError::LoadFailed(_),
            ..
        }))
    ));
    assert!(run.searched.is_empty());
    assert_eq!(run.dialogs.len(), 1);
}

#[test]
fn test_source_outside_source_roots() {
    let ws = Workspace::gradle();
    let (tree, source) = foo(ws.file("/repo/scripts/Foo.java"), false);
    ws.insert(tree);

    let run = ws.find_usages(source.class);

    assert!(matches!(
        run.outcome,
        Ok(SearchOutcome::Aborted(SearchAbort::ArtifactNotFound {
            cause: LocateError::NoSourceRoot,
            ..
        }))
    ));
    assert_eq!(run.dialogs.len(), 1);
    assert!(run.searched.is_empty());
}

#[test]
fn test_no_structural_match_shows_one_dialog() {
    let ws = Workspace::gradle();
    let (tree, source) = foo(ws.file(FOO_JAVA), false);
    ws.insert(tree);

    // The class file is stale: `run(int)` was renamed before the last build.
    let mut b = TreeBuilder::compiled(ws.file(FOO_CLASS), "Foo.class");
    let class = b.class(None, "Foo", Some("com.acme.Foo"));
    b.method(class, "execute", vec![Param::new("a", Ty::primitive("int"))]);
    ws.insert(b.finish());

    let run = ws.find_usages(source.run_int);

    assert!(matches!(
        run.outcome,
        Ok(SearchOutcome::Aborted(SearchAbort::NoStructuralMatch { .. }))
    ));
    assert!(run.searched.is_empty());
    assert_eq!(
        run.dialogs,
        vec![(
            "Error".to_string(),
            "No matching element run(int a) found in compiled class for Foo.java".to_string()
        )]
    );
}

#[test]
fn test_duplicates_with_unique_policy() {
    let config = SearchConfig::from_toml_str(r#"on_multiple_matches = "require_unique""#).unwrap();
    let ws = Workspace::with_config(config);
    assert_eq!(ws.config.on_multiple_matches, MatchPolicy::RequireUnique);

    let (tree, source) = foo(ws.file(FOO_JAVA), false);
    ws.insert(tree);
    let mut b = TreeBuilder::compiled(ws.file(FOO_CLASS), "Foo.class");
    b.class(None, "Foo", Some("com.acme.Foo"));
    b.class(None, "Foo", Some("com.acme.Foo"));
    ws.insert(b.finish());

    let run = ws.find_usages(source.class);

    assert!(matches!(
        run.outcome,
        Ok(SearchOutcome::Aborted(SearchAbort::AmbiguousMatch { count: 2, .. }))
    ));
    assert!(run.searched.is_empty());
    assert_eq!(run.dialogs.len(), 1);
}

#[test]
fn test_duplicates_dispatched_by_default() {
    let ws = Workspace::gradle();
    let (tree, source) = foo(ws.file(FOO_JAVA), false);
    ws.insert(tree);
    let mut b = TreeBuilder::compiled(ws.file(FOO_CLASS), "Foo.class");
    let first = b.class(None, "Foo", Some("com.acme.Foo"));
    let second = b.class(None, "Foo", Some("com.acme.Foo"));
    ws.insert(b.finish());

    let run = ws.find_usages(source.class);

    assert_eq!(
        run.outcome,
        Ok(SearchOutcome::Translated {
            targets: vec![first, second]
        })
    );
    assert_eq!(run.searched.len(), 2);
    assert!(run.searched.iter().all(|s| s.equivalent_to_source));
}

// ============================================================================
// FATAL ERRORS
// ============================================================================

#[test]
fn test_corrupt_tree_aborts_without_dialog() {
    let ws = Workspace::gradle();
    let (tree, source) = foo(ws.file(FOO_JAVA), false);
    ws.insert(tree);

    let mut b = TreeBuilder::compiled(ws.file(FOO_CLASS), "Foo.class");
    let outer = b.class(None, "Outer", Some("com.acme.Outer"));
    let mut tree = b.finish();
    // The class lists itself as its own child.
    tree.elements[0].children.push(outer);
    ws.insert(tree);

    let run = ws.find_usages(source.count);

    assert_eq!(
        run.outcome,
        Err(SearchError::Traversal(TraversalError::Cycle(outer)))
    );
    assert!(run.searched.is_empty());
    assert!(run.dialogs.is_empty());
}

#[test]
fn test_custom_build_layout() {
    let config = SearchConfig::from_toml_str(
        r#"
        [layout]
        output_dir = "out/production"
        "#,
    )
    .unwrap();
    let mut ws = Workspace::with_config(config);
    ws.layout.add_excluded_root("/repo/out");
    let (tree, source) = foo(ws.file(FOO_JAVA), false);
    ws.insert(tree);
    let (tree, compiled) = foo(ws.file("/repo/out/production/main/com/acme/Foo.class"), true);
    ws.insert(tree);

    let run = ws.find_usages(source.sum);

    assert_eq!(
        run.outcome,
        Ok(SearchOutcome::Translated {
            targets: vec![compiled.sum]
        })
    );
}

//! Shared fixture: a Gradle-style project with source, test and build roots.
#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use usage_bridge::hir::{FileTree, Param, TreeBuilder, Ty};
use usage_bridge::ide::{FindUsages, Notifier, SearchError, SearchOutcome};
use usage_bridge::project::{FileSet, ProjectLayout};
use usage_bridge::{ElementId, FileId, SearchConfig, Symbol, SymbolDb, SymbolKind};

pub const FOO_JAVA: &str = "/repo/src/com/acme/Foo.java";
pub const FOO_CLASS: &str = "/repo/build/classes/java/main/com/acme/Foo.class";

/// Project rooted at `/repo`:
///
/// ```text
/// /repo           content
/// /repo/src       source (set "main")
/// /repo/test      source (set "test")
/// /repo/build     excluded
/// /libs           library classes
/// ```
pub struct Workspace {
    pub db: SymbolDb,
    pub layout: ProjectLayout,
    pub config: SearchConfig,
}

impl Workspace {
    pub fn gradle() -> Self {
        Self::with_config(SearchConfig::default())
    }

    pub fn with_config(config: SearchConfig) -> Self {
        let mut layout = ProjectLayout::new(Arc::new(FileSet::new()));
        layout.add_content_root("/repo");
        layout.add_source_root("/repo/src");
        layout.add_source_root("/repo/test");
        layout.add_excluded_root("/repo/build");
        layout.add_library_root("/libs");
        Self {
            db: SymbolDb::new(),
            layout,
            config,
        }
    }

    /// Register an existing file on the virtual file system.
    pub fn file(&self, path: &str) -> FileId {
        self.layout.files().add_file(Path::new(path))
    }

    pub fn insert(&self, tree: FileTree) {
        self.db.insert_file(tree);
    }

    /// Run Find Usages on `source`, recording what reached the engine.
    pub fn find_usages(&self, source: ElementId) -> Run {
        self.find_usages_probing(source, &[])
    }

    /// Like [`Workspace::find_usages`], also asking every target whether it
    /// is equivalent to each of `probes`.
    pub fn find_usages_probing(&self, source: ElementId, probes: &[ElementId]) -> Run {
        let action = FindUsages::new(
            &self.db,
            &self.layout,
            &**self.layout.files(),
            &self.db,
            &self.config,
        );
        let mut searched = Vec::new();
        let mut dialogs = Dialogs::default();
        let mut engine = |target: &dyn Symbol| {
            searched.push(Searched {
                id: target.id(),
                kind: target.kind(),
                name: target.name().map(str::to_string),
                containing_class: target.containing_class(),
                equivalent_to_source: target.is_equivalent_to(source),
                probes: probes.iter().map(|&p| target.is_equivalent_to(p)).collect(),
            });
        };
        let outcome = action.start_find_usages(source, &mut engine, &mut dialogs);
        Run {
            outcome,
            searched,
            dialogs: dialogs.0,
        }
    }
}

/// What the engine saw of one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Searched {
    pub id: ElementId,
    pub kind: SymbolKind,
    pub name: Option<String>,
    pub containing_class: Option<ElementId>,
    pub equivalent_to_source: bool,
    pub probes: Vec<bool>,
}

#[derive(Debug)]
pub struct Run {
    pub outcome: Result<SearchOutcome, SearchError>,
    pub searched: Vec<Searched>,
    pub dialogs: Vec<(String, String)>,
}

#[derive(Default)]
struct Dialogs(Vec<(String, String)>);

impl Notifier for Dialogs {
    fn show_error(&mut self, title: &str, message: &str) {
        self.0.push((title.to_string(), message.to_string()));
    }
}

/// Ids of the declarations in [`foo`].
#[derive(Debug, Clone, Copy)]
pub struct Foo {
    pub class: ElementId,
    pub string: ElementId,
    pub count: ElementId,
    pub run_int: ElementId,
    pub run_int_int: ElementId,
    pub run_string: ElementId,
    pub sum: ElementId,
    pub note: ElementId,
}

/// ```java
/// package com.acme;
/// class Foo {
///     int count;
///     void run(int a);
///     void run(int a, int b);
///     void run(String s);
///     int sum(int[] values);
///     // plus one element of another kind
/// }
/// ```
pub fn foo(file: FileId, compiled: bool) -> (FileTree, Foo) {
    let mut b = if compiled {
        TreeBuilder::compiled(file, "Foo.class")
    } else {
        TreeBuilder::source(file, "Foo.java")
    };
    let class = b.class(None, "Foo", Some("com.acme.Foo"));
    let string = b.class(Some(class), "String", Some("java.lang.String"));
    let count = b.field(class, "count", Ty::primitive("int"));
    let run_int = b.method(class, "run", vec![Param::new("a", Ty::primitive("int"))]);
    let run_int_int = b.method(
        class,
        "run",
        vec![
            Param::new("a", Ty::primitive("int")),
            Param::new("b", Ty::primitive("int")),
        ],
    );
    let run_string = b.method(
        class,
        "run",
        vec![Param::new("s", Ty::class("java.lang.String", string))],
    );
    let sum = b.method(
        class,
        "sum",
        vec![Param::new("values", Ty::array(Ty::primitive("int")))],
    );
    let note = b.other(class, Some("note"));
    let ids = Foo {
        class,
        string,
        count,
        run_int,
        run_int_int,
        run_string,
        sum,
        note,
    };
    (b.finish(), ids)
}

/// `Foo.java` in `src` and its class file under `build`.
pub fn foo_pair(ws: &Workspace) -> (Foo, Foo) {
    let (tree, source) = foo(ws.file(FOO_JAVA), false);
    ws.insert(tree);
    let (tree, compiled) = foo(ws.file(FOO_CLASS), true);
    ws.insert(tree);
    (source, compiled)
}

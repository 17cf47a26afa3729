use std::path::Path;

use pretty_assertions::assert_eq;

use super::parse_module;
use crate::{
    error::PackError,
    frontend::ast::{Module, TypeKind},
};

fn parse_ok(src: &str) -> Module {
    parse_module(src, Path::new("test.cs")).expect("module should parse")
}

#[test]
fn parses_global_directives_and_namespace() {
    let module = parse_ok(
        "extern alias Game;\n\
         using System;\n\
         using System.Text;\n\
         \n\
         namespace App.Core\n\
         {\n\
             using System.Linq;\n\
         \n\
             public class Engine\n\
             {\n\
                 public void Run() { }\n\
             }\n\
         }\n",
    );

    assert_eq!(module.extern_aliases.len(), 1);
    assert_eq!(module.extern_aliases[0].alias, "Game");
    let targets: Vec<_> = module.imports.iter().map(|i| i.target.as_str()).collect();
    assert_eq!(targets, ["System", "System.Text"]);

    assert_eq!(module.namespaces.len(), 1);
    let ns = &module.namespaces[0];
    assert_eq!(ns.spelled_name, "App.Core");
    assert_eq!(ns.imports.len(), 1);
    assert_eq!(ns.imports[0].target, "System.Linq");
    assert_eq!(ns.types.len(), 1);
    assert_eq!(ns.types[0].kind, TypeKind::Class);
    assert_eq!(ns.types[0].name, "Engine");
}

#[test]
fn parses_alias_and_static_usings() {
    let module = parse_ok(
        "namespace N\n{\n    using IO = System.IO;\n    using static System.Math;\n\n    class C { }\n}\n",
    );
    let ns = &module.namespaces[0];
    assert_eq!(ns.imports[0].alias.as_deref(), Some("IO"));
    assert_eq!(ns.imports[0].target, "System.IO");
    assert_eq!(ns.imports[0].render(), "using IO = System.IO;");
    assert!(ns.imports[1].is_static);
    assert_eq!(ns.imports[1].target, "System.Math");
    assert_eq!(ns.imports[1].render(), "using static System.Math;");
}

#[test]
fn dotted_name_normalizes_whitespace() {
    let module = parse_ok("namespace A . B\n{\n    class C { }\n}\n");
    assert_eq!(module.namespaces[0].spelled_name, "A.B");
}

#[test]
fn parses_nested_namespaces() {
    let module = parse_ok(
        "namespace A\n{\n    using System;\n\n    namespace B.C\n    {\n        class Inner { }\n    }\n\n    class Outer { }\n}\n",
    );
    let outer = &module.namespaces[0];
    assert_eq!(outer.spelled_name, "A");
    assert_eq!(outer.types.len(), 1);
    assert_eq!(outer.children.len(), 1);
    let child = &outer.children[0];
    assert_eq!(child.spelled_name, "B.C");
    assert_eq!(child.types[0].name, "Inner");
}

#[test]
fn declaration_text_includes_attributes_and_modifiers() {
    let module = parse_ok(
        "namespace N\n{\n    [Serializable]\n    public sealed class Tagged\n    {\n        int x;\n    }\n}\n",
    );
    let decl = &module.namespaces[0].types[0];
    assert!(decl.text.starts_with("[Serializable]"));
    assert!(decl.text.ends_with('}'));
    assert!(decl.body_text().contains("int x;"));
}

#[test]
fn discovers_nested_types_with_spans() {
    let module = parse_ok(
        "namespace N\n{\n    public class Outer\n    {\n        private int field;\n\n        public enum Mode\n        {\n            On,\n            Off,\n        }\n\n        public class Inner\n        {\n            public class Innermost { }\n        }\n    }\n}\n",
    );
    let outer = &module.namespaces[0].types[0];
    assert_eq!(outer.nested.len(), 2);
    assert_eq!(outer.nested[0].decl.kind, TypeKind::Enum);
    assert_eq!(outer.nested[0].decl.name, "Mode");
    assert_eq!(outer.nested[1].decl.name, "Inner");
    assert_eq!(outer.nested[1].decl.nested[0].decl.name, "Innermost");

    // the recorded span must splice the nested declaration out exactly
    let inner = &outer.nested[1];
    assert_eq!(&outer.text[inner.span.clone()], inner.decl.text);
}

#[test]
fn methods_do_not_hide_nested_types() {
    let module = parse_ok(
        "namespace N\n{\n    class C\n    {\n        void M()\n        {\n            var x = new { };\n        }\n\n        struct S { }\n    }\n}\n",
    );
    let decl = &module.namespaces[0].types[0];
    assert_eq!(decl.nested.len(), 1);
    assert_eq!(decl.nested[0].decl.name, "S");
}

#[test]
fn generic_constraints_are_not_declarations() {
    let module = parse_ok(
        "namespace N\n{\n    class C\n    {\n        T Make<T>() where T : class, new() { return new T(); }\n    }\n}\n",
    );
    assert!(module.namespaces[0].types[0].nested.is_empty());
}

#[test]
fn parses_delegates() {
    let module = parse_ok(
        "namespace N\n{\n    public delegate void Handler(object sender);\n    public delegate T Factory<T>(string name);\n    class C { }\n}\n",
    );
    let ns = &module.namespaces[0];
    assert_eq!(ns.types.len(), 3);
    assert_eq!(ns.types[0].kind, TypeKind::Delegate);
    assert_eq!(ns.types[0].name, "Handler");
    assert_eq!(ns.types[1].name, "Factory");
    assert!(ns.types[0].body.is_none());
}

#[test]
fn interface_struct_enum_kinds() {
    let module = parse_ok(
        "namespace N\n{\n    interface IThing { void Do(); }\n    struct Point { int x; }\n    enum Color { Red, Green }\n}\n",
    );
    let kinds: Vec<_> = module.namespaces[0].types.iter().map(|t| t.kind).collect();
    assert_eq!(kinds, [TypeKind::Interface, TypeKind::Struct, TypeKind::Enum]);
}

#[test]
fn free_statements_at_global_scope_are_dropped() {
    let module = parse_ok("int x = 1;\n[assembly: Something]\nnamespace N { class C { } }\n");
    assert_eq!(module.namespaces.len(), 1);
    assert!(module.imports.is_empty());
}

#[test]
fn rejects_file_scoped_namespaces() {
    let err = parse_module("namespace N;\nclass C { }\n", Path::new("fs.cs"))
        .expect_err("file-scoped namespace must be rejected");
    match err {
        PackError::Parse { message, .. } => {
            assert!(message.contains("file-scoped"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn rejects_types_outside_namespaces() {
    let err = parse_module("class Orphan { }\n", Path::new("orphan.cs"))
        .expect_err("top-level type must be rejected");
    match err {
        PackError::Parse { message, .. } => {
            assert!(message.contains("outside a namespace"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn reports_unbalanced_namespace_body() {
    let err = parse_module("namespace N {\nclass C { }\n", Path::new("open.cs"))
        .expect_err("unterminated namespace must be rejected");
    assert!(matches!(err, PackError::Parse { .. }));
}

#[test]
fn module_with_only_usings_is_empty() {
    let module = parse_ok("using System;\n");
    assert!(module.is_empty());
    assert_eq!(module.imports.len(), 1);
}

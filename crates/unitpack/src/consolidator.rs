//! Namespace consolidator — third stage of the pipeline
//!
//! Groups namespace declarations by resolved fully-qualified identity and
//! merges each group into one declaration. Identity comes from syntactic
//! nesting, so `namespace A.B { }` and `namespace A { namespace B { } }`
//! land in the same group regardless of spelling. The accumulator is an
//! explicit insertion-ordered map threaded through the walk, which both
//! keeps group order at first encounter and keeps this stage trivially
//! testable.

use crate::{
    frontend::ast::{ExternAlias, ImportDirective, NamespaceDecl, TypeDecl},
    merger::CombinedUnit,
    types::FxIndexMap,
};

/// One namespace group under its resolved identity.
#[derive(Debug)]
pub struct MergedNamespace {
    pub identity: String,
    pub extern_aliases: Vec<ExternAlias>,
    pub imports: Vec<ImportDirective>,
    pub members: Vec<TypeDecl>,
}

impl MergedNamespace {
    fn new(identity: String) -> Self {
        Self {
            identity,
            extern_aliases: Vec::new(),
            imports: Vec::new(),
            members: Vec::new(),
        }
    }

    /// First occurrence wins on duplicate alias names.
    fn add_extern_alias(&mut self, alias: ExternAlias) {
        if !self.extern_aliases.iter().any(|e| e.alias == alias.alias) {
            self.extern_aliases.push(alias);
        }
    }

    /// First occurrence wins on duplicate referenced paths.
    fn add_import(&mut self, import: ImportDirective) {
        if !self.imports.iter().any(|i| i.target == import.target) {
            self.imports.push(import);
        }
    }
}

/// Ordered list of merged namespace declarations.
#[derive(Debug, Default)]
pub struct ConsolidatedUnit {
    pub namespaces: Vec<MergedNamespace>,
}

/// Consolidate the combined tree into one declaration per namespace
/// identity. Namespaces with zero member declarations are omitted.
pub fn consolidate(unit: CombinedUnit) -> ConsolidatedUnit {
    let mut groups: FxIndexMap<String, MergedNamespace> = FxIndexMap::default();

    for ns in unit.namespaces {
        flatten(ns, None, &[], &[], &mut groups);
    }

    ConsolidatedUnit {
        namespaces: groups.into_values().collect(),
    }
}

/// Flatten one namespace declaration (and its nested blocks) into the
/// group accumulator. Nested blocks inherit the directives of their
/// enclosing blocks, prepended before their own, since flattening moves
/// their members out of the enclosing scope.
fn flatten(
    ns: NamespaceDecl,
    prefix: Option<&str>,
    inherited_externs: &[ExternAlias],
    inherited_imports: &[ImportDirective],
    groups: &mut FxIndexMap<String, MergedNamespace>,
) {
    let identity = match prefix {
        Some(prefix) => format!("{prefix}.{}", ns.spelled_name),
        None => ns.spelled_name.clone(),
    };

    let NamespaceDecl {
        extern_aliases,
        imports,
        types,
        children,
        ..
    } = ns;

    let mut all_externs = inherited_externs.to_vec();
    all_externs.extend(extern_aliases);
    let mut all_imports = inherited_imports.to_vec();
    all_imports.extend(imports);

    if !types.is_empty() {
        let group = groups
            .entry(identity.clone())
            .or_insert_with(|| MergedNamespace::new(identity.clone()));
        for alias in all_externs.iter().cloned() {
            group.add_extern_alias(alias);
        }
        for import in all_imports.iter().cloned() {
            group.add_import(import);
        }
        group.members.extend(types);
    }

    for child in children {
        flatten(child, Some(&identity), &all_externs, &all_imports, groups);
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::{frontend::parse_module, merger::merge_units};

    fn consolidate_sources(sources: &[&str]) -> ConsolidatedUnit {
        let modules = sources
            .iter()
            .enumerate()
            .map(|(idx, src)| {
                parse_module(src, Path::new(&format!("m{idx}.cs"))).expect("module should parse")
            })
            .collect();
        consolidate(merge_units(modules))
    }

    #[test]
    fn groups_same_namespace_across_modules() {
        let unit = consolidate_sources(&[
            "namespace N { class A { } }\n",
            "namespace N { class B { } }\n",
        ]);

        assert_eq!(unit.namespaces.len(), 1);
        let ns = &unit.namespaces[0];
        assert_eq!(ns.identity, "N");
        let members: Vec<_> = ns.members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(members, ["A", "B"]);
    }

    #[test]
    fn unions_imports_in_first_seen_order() {
        let unit = consolidate_sources(&[
            "namespace N { using X; using Y; class A { } }\n",
            "namespace N { using Y; using Z; class B { } }\n",
        ]);

        let targets: Vec<_> = unit.namespaces[0]
            .imports
            .iter()
            .map(|i| i.target.as_str())
            .collect();
        assert_eq!(targets, ["X", "Y", "Z"]);
    }

    #[test]
    fn unions_extern_aliases_by_name() {
        let unit = consolidate_sources(&[
            "namespace N { extern alias Game; class A { } }\n",
            "namespace N { extern alias Game; extern alias Mods; class B { } }\n",
        ]);

        let aliases: Vec<_> = unit.namespaces[0]
            .extern_aliases
            .iter()
            .map(|e| e.alias.as_str())
            .collect();
        assert_eq!(aliases, ["Game", "Mods"]);
    }

    #[test]
    fn nested_spelling_merges_with_dotted_spelling() {
        let unit = consolidate_sources(&[
            "namespace A { namespace B { class Inner { } } }\n",
            "namespace A.B { class Dotted { } }\n",
        ]);

        assert_eq!(unit.namespaces.len(), 1);
        let ns = &unit.namespaces[0];
        assert_eq!(ns.identity, "A.B");
        let members: Vec<_> = ns.members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(members, ["Inner", "Dotted"]);
    }

    #[test]
    fn nested_blocks_inherit_enclosing_directives() {
        let unit = consolidate_sources(&[
            "namespace A\n{\n    using System;\n\n    class Outer { }\n\n    namespace B\n    {\n        using System.Text;\n\n        class Inner { }\n    }\n}\n",
        ]);

        assert_eq!(unit.namespaces.len(), 2);
        let inner = &unit.namespaces[1];
        assert_eq!(inner.identity, "A.B");
        let targets: Vec<_> = inner.imports.iter().map(|i| i.target.as_str()).collect();
        assert_eq!(targets, ["System", "System.Text"]);
    }

    #[test]
    fn memberless_namespaces_are_omitted() {
        let unit = consolidate_sources(&[
            "namespace Empty { using System; }\nnamespace Full { class C { } }\n",
        ]);

        assert_eq!(unit.namespaces.len(), 1);
        assert_eq!(unit.namespaces[0].identity, "Full");
    }

    #[test]
    fn group_order_is_first_encounter() {
        let unit = consolidate_sources(&[
            "namespace B { class X { } }\nnamespace A { class Y { } }\n",
            "namespace B { class Z { } }\n",
        ]);

        let identities: Vec<_> = unit.namespaces.iter().map(|n| n.identity.as_str()).collect();
        assert_eq!(identities, ["B", "A"]);
    }
}

//! Unit merger — second stage of the pipeline
//!
//! Constructs that are not member declarations were already dropped at
//! parse time, so merging is: relocate each module's global-scope
//! directives into every top-level namespace of that module (globals
//! before the namespace's own, module order preserved; duplicates are
//! removed later, at consolidation), then concatenate the surviving
//! namespaces in closure order. Global directives never appear at the top
//! level of the output.

use crate::frontend::ast::{Module, NamespaceDecl};

/// Combined declaration tree of all modules, in closure order.
#[derive(Debug, Default)]
pub struct CombinedUnit {
    pub namespaces: Vec<NamespaceDecl>,
}

/// Merge parsed modules into one combined tree. A module contributing no
/// namespace declarations is silently skipped, its global directives with
/// it.
pub fn merge_units(modules: Vec<Module>) -> CombinedUnit {
    let mut combined = CombinedUnit::default();

    for module in modules {
        if module.is_empty() {
            log::debug!(
                "Skipping {}: no namespace declarations",
                module.path.display()
            );
            continue;
        }

        let Module {
            extern_aliases,
            imports,
            namespaces,
            ..
        } = module;

        for mut ns in namespaces {
            let mut merged_externs = extern_aliases.clone();
            merged_externs.extend(std::mem::take(&mut ns.extern_aliases));
            ns.extern_aliases = merged_externs;

            let mut merged_imports = imports.clone();
            merged_imports.extend(std::mem::take(&mut ns.imports));
            ns.imports = merged_imports;

            combined.namespaces.push(ns);
        }
    }

    combined
}

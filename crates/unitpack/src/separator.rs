//! Entry separator — fourth stage of the pipeline
//!
//! Bindings computed before merging are invalid once declarations have
//! moved between scopes, so this stage re-derives qualified names over the
//! consolidated tree, then extracts the single declaration matching the
//! configured entry name. Zero matches and multiple matches are both hard
//! errors; the pack never guesses.

use std::ops::Range;

use crate::{
    consolidator::{ConsolidatedUnit, MergedNamespace},
    error::{PackError, Result},
    frontend::ast::TypeDecl,
};

/// Location of one matching declaration: namespace index, then the member
/// index followed by nested indices.
#[derive(Debug, Clone)]
struct MatchLoc {
    ns: usize,
    path: Vec<usize>,
}

/// The consolidated tree with the entry declaration pulled out.
#[derive(Debug)]
pub struct SeparatedUnit {
    pub entry: TypeDecl,
    pub dependencies: Vec<MergedNamespace>,
}

/// Extract the declaration whose resolved qualified name equals
/// `entry_name`. The namespace it leaves behind is dropped if the
/// extraction empties it.
pub fn separate(unit: ConsolidatedUnit, entry_name: &str) -> Result<SeparatedUnit> {
    let mut matches = Vec::new();
    for (ns_idx, ns) in unit.namespaces.iter().enumerate() {
        for (member_idx, member) in ns.members.iter().enumerate() {
            let mut path = vec![member_idx];
            collect_matches(member, &ns.identity, entry_name, ns_idx, &mut path, &mut matches);
        }
    }

    log::debug!(
        "Entry `{entry_name}` matched {} declaration(s)",
        matches.len()
    );

    match matches.len() {
        0 => Err(PackError::UnresolvedEntry(entry_name.to_string())),
        1 => Ok(extract(unit, &matches[0])),
        count => Err(PackError::AmbiguousEntry {
            name: entry_name.to_string(),
            count,
        }),
    }
}

fn collect_matches(
    decl: &TypeDecl,
    scope: &str,
    entry_name: &str,
    ns: usize,
    path: &mut Vec<usize>,
    matches: &mut Vec<MatchLoc>,
) {
    let qualified = format!("{scope}.{}", decl.name);
    if qualified == entry_name {
        matches.push(MatchLoc {
            ns,
            path: path.clone(),
        });
    }
    for (idx, nested) in decl.nested.iter().enumerate() {
        path.push(idx);
        collect_matches(&nested.decl, &qualified, entry_name, ns, path, matches);
        path.pop();
    }
}

fn extract(mut unit: ConsolidatedUnit, loc: &MatchLoc) -> SeparatedUnit {
    let ns = &mut unit.namespaces[loc.ns];
    let entry = if loc.path.len() == 1 {
        ns.members.remove(loc.path[0])
    } else {
        remove_nested(&mut ns.members[loc.path[0]], &loc.path[1..])
    };

    if ns.members.is_empty() {
        unit.namespaces.remove(loc.ns);
    }

    SeparatedUnit {
        entry,
        dependencies: unit.namespaces,
    }
}

/// Remove the nested declaration at `path` from `parent`, splicing it out
/// of the raw declaration text along the way.
fn remove_nested(parent: &mut TypeDecl, path: &[usize]) -> TypeDecl {
    if path.len() == 1 {
        let nested = parent.nested.remove(path[0]);
        splice(parent, nested.span.clone(), "");
        nested.decl
    } else {
        let (extracted, new_text) = {
            let child = &mut parent.nested[path[0]];
            let extracted = remove_nested(&mut child.decl, &path[1..]);
            (extracted, child.decl.text.clone())
        };
        let span = parent.nested[path[0]].span.clone();
        let new_end = span.start + new_text.len();
        splice(parent, span, &new_text);
        parent.nested[path[0]].span.end = new_end;
        extracted
    }
}

/// Replace `span` of the declaration text, keeping the body extent and the
/// sibling spans behind the edit consistent.
fn splice(parent: &mut TypeDecl, span: Range<usize>, replacement: &str) {
    let delta = replacement.len() as isize - span.len() as isize;
    parent.text.replace_range(span.clone(), replacement);
    if let Some(body) = &mut parent.body {
        if body.end >= span.end {
            body.end = (body.end as isize + delta) as usize;
        }
    }
    for sibling in &mut parent.nested {
        if sibling.span.start >= span.end {
            sibling.span.start = (sibling.span.start as isize + delta) as usize;
            sibling.span.end = (sibling.span.end as isize + delta) as usize;
        }
    }
}

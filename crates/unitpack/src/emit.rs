//! Canonical rendering of consolidated declaration trees
//!
//! The packer does not preserve original formatting; it re-renders merged
//! namespaces in one canonical shape so identical inputs produce identical
//! bytes. Member declarations are carried as raw source slices and only
//! re-margined: the common leading whitespace is stripped and replaced
//! with the target indentation.

use crate::consolidator::MergedNamespace;

/// One indentation level.
pub const INDENT: &str = "    ";

/// Render merged namespaces in order, one blank line between them.
pub fn render_namespaces(namespaces: &[MergedNamespace]) -> String {
    let mut out = String::new();
    for (idx, ns) in namespaces.iter().enumerate() {
        if idx > 0 {
            out.push('\n');
        }
        render_namespace(ns, &mut out);
    }
    out
}

fn render_namespace(ns: &MergedNamespace, out: &mut String) {
    out.push_str("namespace ");
    out.push_str(&ns.identity);
    out.push_str("\n{\n");

    let mut wrote_directives = false;
    for alias in &ns.extern_aliases {
        out.push_str(INDENT);
        out.push_str("extern alias ");
        out.push_str(&alias.alias);
        out.push_str(";\n");
        wrote_directives = true;
    }
    for import in &ns.imports {
        out.push_str(INDENT);
        out.push_str(&import.render());
        out.push('\n');
        wrote_directives = true;
    }

    for (idx, member) in ns.members.iter().enumerate() {
        if wrote_directives || idx > 0 {
            out.push('\n');
        }
        out.push_str(&reindent(&member.text, INDENT));
        out.push('\n');
    }

    out.push_str("}\n");
}

/// Strip the common leading margin and re-indent every non-blank line.
pub fn reindent(text: &str, indent: &str) -> String {
    let dedented = dedent(text);
    let mut out = String::new();
    for (idx, line) in dedented.lines().enumerate() {
        if idx > 0 {
            out.push('\n');
        }
        if !line.trim().is_empty() {
            out.push_str(indent);
            out.push_str(line);
        }
    }
    out
}

/// Strip leading and trailing blank lines, then remove the longest common
/// leading whitespace of the non-blank lines.
pub fn dedent(text: &str) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let first = lines
        .iter()
        .position(|line| !line.trim().is_empty())
        .unwrap_or(lines.len());
    let last = lines
        .iter()
        .rposition(|line| !line.trim().is_empty())
        .map_or(first, |idx| idx + 1);
    let lines = &lines[first..last];

    let margin = lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| leading_whitespace(line))
        .min()
        .unwrap_or(0);

    let mut out = String::new();
    for (idx, line) in lines.iter().enumerate() {
        if idx > 0 {
            out.push('\n');
        }
        if line.trim().is_empty() {
            continue;
        }
        let cut = margin.min(leading_whitespace(line));
        out.push_str(&line[cut..]);
    }
    out
}

fn leading_whitespace(line: &str) -> usize {
    line.bytes()
        .take_while(|byte| *byte == b' ' || *byte == b'\t')
        .count()
}

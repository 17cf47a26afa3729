//! Assembler — final stage of the pipeline
//!
//! Splices the extracted entry declaration and the consolidated dependency
//! namespaces into one syntactically balanced translation unit. Entry code
//! comes first; that ordering is a hard requirement of single-class
//! deployment targets.

use crate::{config::HostConvention, emit, separator::SeparatedUnit};

/// Produce the final unit text under the configured host convention.
pub fn assemble(unit: &SeparatedUnit, host: HostConvention) -> String {
    match host {
        HostConvention::Ambient => assemble_ambient(unit),
        HostConvention::Standalone => assemble_standalone(unit),
    }
}

/// The deployment target wraps the output in an ambient host declaration:
/// emit the entry's members bare, close the host shell, then emit the
/// dependency namespaces with their final closing brace handed over to the
/// host's own closing delimiter.
fn assemble_ambient(unit: &SeparatedUnit) -> String {
    let mut out = emit::dedent(unit.entry.body_text());
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }

    let dependencies = emit::render_namespaces(&unit.dependencies);
    let trimmed = dependencies.trim_end();
    if let Some(rest) = trimmed.strip_suffix('}') {
        out.push_str("}\n");
        out.push_str(rest.trim_end());
        out.push('\n');
    }

    out
}

/// No ambient host: the entry declaration stays intact, followed by the
/// dependency namespaces, forming a freestanding file.
fn assemble_standalone(unit: &SeparatedUnit) -> String {
    let mut out = emit::reindent(&unit.entry.text, "");
    out.push('\n');

    let dependencies = emit::render_namespaces(&unit.dependencies);
    if !dependencies.is_empty() {
        out.push('\n');
        out.push_str(&dependencies);
    }

    out
}

//! Pack orchestration
//!
//! Runs the five-stage pipeline over one root project: dependency
//! collection, unit merging, namespace consolidation, entry separation,
//! assembly. Each stage fully consumes the previous stage's output; every
//! error aborts the whole invocation with nothing written.

use std::{fs, path::Path};

use crate::{
    assembler,
    config::HostConvention,
    consolidator,
    dep_graph::ProjectGraph,
    error::{PackError, Result},
    frontend::{self, ast::Module},
    merger, separator,
    workspace::Workspace,
};

/// Options of one pack() invocation.
#[derive(Debug, Clone)]
pub struct PackOptions {
    /// Fully-qualified name of the entry type.
    pub entry: String,
    /// Splice convention of the deployment target.
    pub host: HostConvention,
}

/// Packs a root project and its transitive references into a single
/// translation unit.
#[derive(Debug)]
pub struct Packer {
    workspace: Workspace,
}

impl Packer {
    pub fn new(workspace: Workspace) -> Self {
        Self { workspace }
    }

    /// Produce the packed unit text for `root_project`.
    pub fn pack(&self, root_project: &Path, options: &PackOptions) -> Result<String> {
        log::info!(
            "Packing {} with entry `{}`",
            root_project.display(),
            options.entry
        );

        let graph = ProjectGraph::build(&self.workspace, root_project)?;
        let closure = graph.closure()?;
        let names: Vec<&str> = closure.iter().map(|p| p.name.as_str()).collect();
        log::debug!("Dependency closure: {}", names.join(", "));

        let mut modules: Vec<Module> = Vec::new();
        for project in &closure {
            for source in &project.sources {
                let text = fs::read_to_string(source).map_err(|err| {
                    PackError::workspace_io(
                        format!("cannot read source file {}", source.display()),
                        err,
                    )
                })?;
                modules.push(frontend::parse_module(&text, source)?);
            }
        }
        log::debug!("Parsed {} modules", modules.len());

        let combined = merger::merge_units(modules);
        let consolidated = consolidator::consolidate(combined);
        log::debug!(
            "Consolidated into {} namespace(s)",
            consolidated.namespaces.len()
        );

        let separated = separator::separate(consolidated, &options.entry)?;
        let output = assembler::assemble(&separated, options.host);
        log::info!("Packed unit is {} bytes", output.len());
        Ok(output)
    }
}

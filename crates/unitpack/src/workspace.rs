//! Workspace and project discovery
//!
//! A workspace is a directory tree of projects. Each project directory
//! carries a `project.toml` manifest naming the project, optionally listing
//! its sources explicitly, and declaring references to other project
//! directories as paths relative to the manifest. Without an explicit
//! source list, a project's modules are all `.cs` files in its directory in
//! lexicographic order, so module order is stable across machines.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::error::{PackError, Result};

/// Manifest file expected in every project directory.
pub const PROJECT_MANIFEST_NAME: &str = "project.toml";

/// Extension of module source files.
pub const SOURCE_EXTENSION: &str = "cs";

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ProjectManifest {
    name: Option<String>,
    sources: Vec<String>,
    references: Vec<String>,
}

/// One loaded project: its modules plus references to other projects.
#[derive(Debug, Clone)]
pub struct Project {
    pub name: String,
    /// Canonical project directory.
    pub dir: PathBuf,
    /// Absolute module paths in deterministic order.
    pub sources: Vec<PathBuf>,
    /// Referenced project directories as declared, resolved against `dir`
    /// but not yet located on disk; the dependency collector does that.
    pub references: Vec<PathBuf>,
}

/// The root of a project tree.
#[derive(Debug)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    /// Open a workspace root directory.
    pub fn open(root: &Path) -> Result<Self> {
        let root = fs::canonicalize(root).map_err(|err| {
            PackError::workspace_io(format!("cannot open workspace {}", root.display()), err)
        })?;
        if !root.is_dir() {
            return Err(PackError::workspace(format!(
                "workspace path {} is not a directory",
                root.display()
            )));
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load the project in `dir`. The directory must exist, lie inside the
    /// workspace, and carry a readable manifest.
    pub fn load_project(&self, dir: &Path) -> Result<Project> {
        let dir = fs::canonicalize(dir).map_err(|_| {
            PackError::CyclicOrMissingReference(format!(
                "project directory {} cannot be located",
                dir.display()
            ))
        })?;
        if !dir.starts_with(&self.root) {
            return Err(PackError::workspace(format!(
                "project {} lies outside the workspace {}",
                dir.display(),
                self.root.display()
            )));
        }

        let manifest_path = dir.join(PROJECT_MANIFEST_NAME);
        let raw = fs::read_to_string(&manifest_path).map_err(|err| {
            PackError::workspace_io(
                format!("cannot read project manifest {}", manifest_path.display()),
                err,
            )
        })?;
        let manifest: ProjectManifest = toml::from_str(&raw).map_err(|err| {
            PackError::workspace(format!(
                "malformed project manifest {}: {err}",
                manifest_path.display()
            ))
        })?;

        let name = match manifest.name {
            Some(name) => name,
            None => dir
                .file_name()
                .map(|os| os.to_string_lossy().into_owned())
                .unwrap_or_else(|| dir.display().to_string()),
        };

        let sources = if manifest.sources.is_empty() {
            discover_sources(&dir)?
        } else {
            manifest.sources.iter().map(|rel| dir.join(rel)).collect()
        };

        let references = manifest
            .references
            .iter()
            .map(|rel| dir.join(rel))
            .collect();

        log::debug!(
            "Loaded project `{name}` from {} ({} sources)",
            dir.display(),
            sources.len()
        );

        Ok(Project {
            name,
            dir,
            sources,
            references,
        })
    }
}

/// All `.cs` files directly in the project directory, lexicographically.
fn discover_sources(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|err| {
        PackError::workspace_io(format!("cannot read project directory {}", dir.display()), err)
    })?;

    let mut sources = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|err| {
            PackError::workspace_io(format!("cannot read project directory {}", dir.display()), err)
        })?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == SOURCE_EXTENSION) {
            sources.push(path);
        }
    }
    sources.sort();
    Ok(sources)
}

//! Packer configuration
//!
//! Configuration lives in a `unitpack.toml` at the workspace root. Every
//! field has a default so the file is optional; the CLI can override the
//! entry type per invocation.

use std::{fs, path::Path};

use serde::Deserialize;

use crate::error::{PackError, Result};

/// Name of the configuration file looked up in the workspace root.
pub const CONFIG_FILE_NAME: &str = "unitpack.toml";

/// Shape of the final splice, dictated by the deployment target.
///
/// The single-ambient-host assumption is a protocol detail of one target
/// family, so it is a configuration value rather than a hardcoded shell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostConvention {
    /// The deployment target wraps the output in its own host declaration:
    /// entry members come first as bare member text, the host shell is
    /// closed, and the trailing delimiter of the dependency code is left to
    /// the host's own closing delimiter.
    #[default]
    Ambient,

    /// No ambient host: the entry declaration is emitted intact, followed
    /// by the dependency namespaces, forming a freestanding file.
    Standalone,
}

/// Workspace-level packer configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Fully-qualified name of the entry type. The CLI `--entry` flag takes
    /// precedence over this value.
    pub entry: Option<String>,

    /// Splice convention of the deployment target.
    pub host: HostConvention,
}

impl Config {
    /// Load configuration from an explicit file path.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|err| {
            PackError::workspace_io(format!("cannot read config file {}", path.display()), err)
        })?;
        toml::from_str(&raw).map_err(|err| {
            PackError::workspace(format!("malformed config file {}: {err}", path.display()))
        })
    }

    /// Load `unitpack.toml` from the workspace root if present, defaults
    /// otherwise.
    pub fn load_or_default(workspace_root: &Path) -> Result<Self> {
        let path = workspace_root.join(CONFIG_FILE_NAME);
        if path.is_file() {
            log::debug!("Loading configuration from {}", path.display());
            Self::load(&path)
        } else {
            log::debug!("No {CONFIG_FILE_NAME} in workspace root, using defaults");
            Ok(Self::default())
        }
    }
}

//! Install configuration schema and loading.
//!
//! An install run is described by a small YAML file mapping directly onto
//! [`InstallConfig`]. The schema is declared statically; unknown or
//! mistyped fields fail at load time instead of surfacing later as
//! stringly-typed lookup errors.
//!
//! ```yaml
//! official_version: "2016.0.109"
//! install_root: /opt/intel
//! hide_mpi: true
//! ```

use crate::error::{PsxeError, Result};
use crate::version::Version;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Installer component selector meaning "install everything".
///
/// Installing only the installer's own defaults omits key binaries
/// (e.g. `bin/icc`) on 2016-layout releases.
pub const COMP_ALL: &str = "ALL";

/// Declared inputs for one installation run.
///
/// Immutable once loaded and validated; every derived value (layout,
/// guesses, sanity spec) is computed fresh from this.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallConfig {
    /// Official product version, e.g. "2016.0.109" or "2013_sp1".
    pub official_version: String,

    /// Installer components to select; None lets version rules decide.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<String>>,

    /// Install the 32-bit toolchain instead of the 64-bit one.
    #[serde(default)]
    pub m32: bool,

    /// Keep MPI libraries and headers out of the generated search paths.
    #[serde(default = "default_hide_mpi")]
    pub hide_mpi: bool,

    /// Directory the product installs under.
    pub install_root: PathBuf,
}

fn default_hide_mpi() -> bool {
    true
}

impl InstallConfig {
    /// Load and validate a config from a YAML file.
    pub fn load(path: &Path) -> Result<InstallConfig> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                PsxeError::ConfigNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                PsxeError::Io(e)
            }
        })?;

        let config: InstallConfig =
            serde_yaml::from_str(&content).map_err(|e| PsxeError::ConfigParse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Check structural constraints not expressible in the schema.
    pub fn validate(&self) -> Result<()> {
        if self.official_version.trim().is_empty() {
            return Err(PsxeError::ConfigValidation {
                message: "official_version must not be empty".to_string(),
            });
        }
        if self.install_root.as_os_str().is_empty() {
            return Err(PsxeError::ConfigValidation {
                message: "install_root must not be empty".to_string(),
            });
        }
        if let Some(components) = &self.components {
            if components.iter().any(|c| c.trim().is_empty()) {
                return Err(PsxeError::ConfigValidation {
                    message: "components must not contain empty names".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Parse the declared version.
    pub fn version(&self) -> Result<Version> {
        Version::parse(&self.official_version)
    }

    /// Component list to hand the installer.
    ///
    /// 2016-layout releases need an explicit `ALL` when nothing was
    /// declared; earlier releases leave the selection to the installer.
    pub fn effective_components(&self, version: &Version) -> Vec<String> {
        match &self.components {
            Some(components) => components.clone(),
            None if version.at_least("2016") => {
                tracing::debug!(
                    version = %version,
                    "no components declared, selecting {} for 2016-layout release",
                    COMP_ALL
                );
                vec![COMP_ALL.to_string()]
            }
            None => Vec::new(),
        }
    }
}

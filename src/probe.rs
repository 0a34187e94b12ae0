//! Filesystem probe for the install root.
//!
//! Layout and guess resolution repeatedly ask one question: does a path
//! exist under the install root? The probe is the only filesystem access the
//! resolution engine performs, and it is read-only. A probe that cannot
//! answer (install root not created yet, permission denied) reports the path
//! as absent; absence of evidence is absence of the path, and resolution
//! carries on with the non-prefixed defaults.

use std::path::{Path, PathBuf};

/// Read-only existence checks against an install root.
///
/// Paths handed to the probe are relative to the root. Implementations must
/// be reentrant; independent resolutions may share one probe.
pub trait InstallProbe {
    /// Whether `relative` names an existing regular file under the root.
    fn is_file(&self, relative: &Path) -> bool;

    /// Whether `relative` names an existing directory under the root.
    fn is_dir(&self, relative: &Path) -> bool;
}

/// Probe backed by a directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct DirProbe {
    root: PathBuf,
}

impl DirProbe {
    /// Create a probe rooted at `root`. The directory does not need to
    /// exist; a missing root answers "absent" for every query.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The install root this probe answers for.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl InstallProbe for DirProbe {
    fn is_file(&self, relative: &Path) -> bool {
        self.root.join(relative).is_file()
    }

    fn is_dir(&self, relative: &Path) -> bool {
        self.root.join(relative).is_dir()
    }
}

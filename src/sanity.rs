//! Post-install sanity check specification.
//!
//! The sanity runner downstream asserts every listed file and directory
//! exists under the install root and every command succeeds; any miss fails
//! the installation run.

use crate::layout::Layout;
use crate::version::Version;
use serde::Serialize;

/// Everything the sanity runner must find after an install.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SanityCheckSpec {
    /// Required files, relative to the install root.
    pub files: Vec<String>,

    /// Required directories, relative to the install root.
    pub dirs: Vec<String>,

    /// Shell commands that must succeed.
    pub commands: Vec<String>,
}

/// Extension of shared libraries on the host platform.
pub fn shared_lib_ext() -> &'static str {
    if cfg!(target_os = "macos") {
        "dylib"
    } else {
        "so"
    }
}

/// Assemble the sanity-check spec for a resolved layout.
pub fn build_sanity_spec(layout: &Layout, version: &Version) -> SanityCheckSpec {
    let mut binfiles = vec!["icc", "icpc"];
    if version.below("2014") {
        // idb was retired in favor of gdb-ia with the 2014 releases.
        binfiles.push("idb");
    }

    let mut files: Vec<String> = binfiles
        .iter()
        .map(|f| format!("{}/{f}", layout.bin_prefix))
        .collect();
    files.extend(
        ["iomp5.a".to_string(), format!("iomp5.{}", shared_lib_ext())]
            .iter()
            .map(|lib| format!("{}/lib{lib}", layout.lib_prefix)),
    );
    if version.above("2015") {
        files.push("include/omp.h".to_string());
    }

    // The guesses rely on the versioned subdir being there for recent
    // releases; check it explicitly in case the installer output is
    // incomplete.
    let dirs: Vec<String> = layout.comp_libs_subdir.iter().cloned().collect();

    SanityCheckSpec {
        files,
        dirs,
        commands: vec!["which icc".to_string()],
    }
}

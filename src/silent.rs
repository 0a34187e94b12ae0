//! Silent-configuration naming conventions.
//!
//! The unattended installer is driven by a silent config file whose key
//! names changed with the 2013 SP1 release. The selector runs before the
//! install command is assembled; `None` means the current names apply.

use crate::version::Version;
use serde::Serialize;

/// Activation key name used since 2013 SP1.
pub const ACTIVATION_NAME: &str = "ACTIVATION_TYPE";

/// Activation key name used by 2012-era installers.
pub const ACTIVATION_NAME_2012: &str = "ACTIVATION";

/// License-file key name used since 2013 SP1.
pub const LICENSE_FILE_NAME: &str = "ACTIVATION_LICENSE_FILE";

/// License-file key name used by 2012-era installers.
pub const LICENSE_FILE_NAME_2012: &str = "PSET_LICENSE_FILE_PATH";

/// Key names to use in the generated silent config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SilentCfgNames {
    pub activation_name: &'static str,
    pub license_file_name: &'static str,
}

/// Legacy naming map for releases predating the 2013 SP1 convention, or
/// `None` when the current names apply.
pub fn select_silent_cfg_names(version: &Version) -> Option<SilentCfgNames> {
    version.below("2013_sp1").then_some(SilentCfgNames {
        activation_name: ACTIVATION_NAME_2012,
        license_file_name: LICENSE_FILE_NAME_2012,
    })
}

//! Version-conditional directory layout resolution.
//!
//! Each release generation of the compiler suite moved files around: 2011
//! releases kept binaries in a flat `bin`, the 2011-update/2012/2013 series
//! moved OpenMP libraries under `compiler/lib`, 2013 SP1 went back to `bin`,
//! 2015 introduced a versioned debugger tree, and 2016 nested the whole
//! product under `compilers_and_libraries_<version>/linux`. The resolver
//! encodes those thresholds once; everything downstream (guesses, sanity
//! checks) consumes the resulting [`Layout`] value.

use crate::probe::InstallProbe;
use crate::version::Version;
use serde::Serialize;
use std::path::Path;

/// First release series the threshold table was written against.
const EARLIEST_KNOWN_SERIES: u64 = 2011;

/// Most recent release series the threshold table was verified against.
const LATEST_KNOWN_SERIES: u64 = 2016;

/// Resolved directory layout for one install, relative to the install root.
///
/// Produced once per run and never mutated; optional fields are genuinely
/// absent for the versions that predate them, and downstream consumers
/// treat absence as "do not emit".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    /// Directory holding the compiler binaries, e.g. `bin/intel64`.
    pub bin_prefix: String,

    /// Directory holding the OpenMP runtime libraries.
    pub lib_prefix: String,

    /// `compilers_and_libraries_<version>/linux`, present from 2016 on.
    pub comp_libs_subdir: Option<String>,

    /// Versioned debugger tree, present from 2015 on.
    pub debugger_subdir: Option<String>,

    /// Top-level subdirectory the installer nests the product into.
    pub prefix: String,

    /// Whether the version fell outside the verified threshold table and
    /// the layout is a nearest-default guess.
    best_effort: bool,
}

impl Layout {
    /// Whether this layout is a nearest-default guess for an unverified
    /// release series rather than a known-good resolution.
    pub fn is_best_effort(&self) -> bool {
        self.best_effort
    }
}

/// Resolves a [`Layout`] from a declared version.
///
/// The probe is consulted for exactly one rule: the pre-2016 top-level
/// prefix, where some older releases unpacked into `composerxe-<version>`
/// instead of `composer_xe_<version>`.
pub struct LayoutResolver<'a> {
    probe: &'a dyn InstallProbe,
}

impl<'a> LayoutResolver<'a> {
    pub fn new(probe: &'a dyn InstallProbe) -> Self {
        Self { probe }
    }

    /// Apply the version-threshold rules. Never fails: versions outside the
    /// verified range resolve to the nearest defaults, flagged as
    /// best-effort and logged.
    pub fn resolve(&self, version: &Version) -> Layout {
        let mut bin_prefix = "bin/intel64";
        let mut lib_prefix = "lib/intel64";

        if version.at_least("2011") {
            if version.at_most("2011.3.174") {
                bin_prefix = "bin";
            } else if version.at_least("2013_sp1") {
                bin_prefix = "bin";
            } else {
                // 2011-update through 2013 series keep libiomp5 under the
                // compiler component tree.
                lib_prefix = "compiler/lib/intel64";
            }
        }

        let comp_libs_subdir = version
            .at_least("2016")
            .then(|| format!("compilers_and_libraries_{}/linux", version));

        let prefix = match &comp_libs_subdir {
            Some(subdir) => subdir.clone(),
            None => self.composer_prefix(version),
        };

        let debugger_subdir = if version.at_least("2016") {
            // A single debugger tree per release series, named off the
            // leading version component.
            Some(format!("debugger_{}", version.major_component()))
        } else if version.at_least("2015") {
            Some(format!("{prefix}/debugger"))
        } else {
            None
        };

        let best_effort = !Self::within_known_series(version);
        if best_effort {
            tracing::warn!(
                version = %version,
                "version outside verified {EARLIEST_KNOWN_SERIES}-{LATEST_KNOWN_SERIES} range, using nearest-default layout"
            );
        }

        Layout {
            bin_prefix: bin_prefix.to_string(),
            lib_prefix: lib_prefix.to_string(),
            comp_libs_subdir,
            debugger_subdir,
            prefix,
            best_effort,
        }
    }

    /// Pre-2016 top-level prefix, with the probe-gated spelling fallback.
    fn composer_prefix(&self, version: &Version) -> String {
        let primary = format!("composer_xe_{version}");
        if self.probe.is_dir(Path::new(&primary)) {
            return primary;
        }

        let candidate = format!("composerxe-{version}");
        if self.probe.is_dir(Path::new(&candidate)) {
            tracing::debug!(prefix = %candidate, "using legacy prefix spelling");
            candidate
        } else {
            // Neither exists yet (install may not have run); keep the
            // modern spelling and let the probe gate downstream decisions.
            primary
        }
    }

    fn within_known_series(version: &Version) -> bool {
        version
            .major()
            .is_some_and(|major| (EARLIEST_KNOWN_SERIES..=LATEST_KNOWN_SERIES).contains(&major))
    }
}

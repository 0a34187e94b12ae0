//! Environment-variable guesses for the generated module file.
//!
//! For each environment variable the module file will touch, the builder
//! proposes an ordered list of path fragments relative to the install root.
//! The module generator downstream checks each fragment for existence before
//! emitting a prepend-path statement, so fragments that only apply to some
//! versions are harmless; what matters is the order. Later entries take
//! precedence in append semantics, so the generic `lib/intel64` fragment is
//! always the final `LD_LIBRARY_PATH` entry and never shadows the more
//! specific subdirectories before it.

use crate::layout::Layout;
use crate::probe::InstallProbe;
use crate::shell::CommandRunner;
use crate::toolchain;
use crate::version::Version;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::path::{Path, PathBuf};

/// Insertion-ordered mapping from environment variable to path fragments.
///
/// Treated as immutable by callers once built; iteration and serialization
/// preserve insertion order so two identical builds produce byte-identical
/// output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnvGuessMap {
    entries: Vec<(String, Vec<String>)>,
}

impl EnvGuessMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a variable's fragment list.
    pub fn insert<I, S>(&mut self, var: &str, fragments: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fragments: Vec<String> = fragments.into_iter().map(Into::into).collect();
        match self.entries.iter_mut().find(|(name, _)| name == var) {
            Some((_, existing)) => *existing = fragments,
            None => self.entries.push((var.to_string(), fragments)),
        }
    }

    /// Append fragments to a variable, creating it if absent.
    pub fn extend<I, S>(&mut self, var: &str, fragments: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entry(var).extend(fragments.into_iter().map(Into::into));
    }

    /// Append one fragment to a variable, creating it if absent.
    pub fn push(&mut self, var: &str, fragment: impl Into<String>) {
        self.entry(var).push(fragment.into());
    }

    /// Fragment list for a variable, if present.
    pub fn get(&self, var: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(name, _)| name == var)
            .map(|(_, fragments)| fragments.as_slice())
    }

    /// Whether the variable has an entry at all. A missing key means
    /// "do not emit", which is different from an empty list.
    pub fn contains(&self, var: &str) -> bool {
        self.entries.iter().any(|(name, _)| name == var)
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(name, fragments)| (name.as_str(), fragments.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry(&mut self, var: &str) -> &mut Vec<String> {
        match self.entries.iter().position(|(name, _)| name == var) {
            Some(idx) => &mut self.entries[idx].1,
            None => {
                self.entries.push((var.to_string(), Vec::new()));
                let idx = self.entries.len() - 1;
                &mut self.entries[idx].1
            }
        }
    }

    /// Rewrite every fragment of every variable to live under `prefix`.
    fn prepend_prefix(&mut self, prefix: &str) {
        for (_, fragments) in &mut self.entries {
            for fragment in fragments.iter_mut() {
                *fragment = format!("{prefix}/{fragment}");
            }
        }
    }
}

impl Serialize for EnvGuessMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, fragments) in &self.entries {
            map.serialize_entry(name, fragments)?;
        }
        map.end()
    }
}

/// Builds the per-variable guess lists for one install.
pub struct EnvGuessBuilder<'a> {
    probe: &'a dyn InstallProbe,
    tbb_abi_prefix: String,
}

impl<'a> EnvGuessBuilder<'a> {
    /// `tbb_abi_prefix` is the GCC ABI directory name the bundled TBB
    /// libraries resolve under, from [`toolchain::tbb_gcc_abi_prefix`].
    pub fn new(probe: &'a dyn InstallProbe, tbb_abi_prefix: impl Into<String>) -> Self {
        Self {
            probe,
            tbb_abi_prefix: tbb_abi_prefix.into(),
        }
    }

    /// Construct the guess map. Pure apart from read-only probes; identical
    /// inputs and probe answers produce identical output.
    pub fn build(
        &self,
        layout: &Layout,
        version: &Version,
        hide_mpi: bool,
        m32: bool,
    ) -> EnvGuessMap {
        let docpath = format!("documentation_{}", version.major_component());
        let mut guesses = EnvGuessMap::new();

        // Fragments that only apply to certain versions or components are
        // fine here: the module generator checks existence before emitting.
        guesses.insert("CLASSPATH", ["daal/lib/daal.jar"]);
        // 'include' is deliberately omitted; it breaks the C++ <complex>
        // header by shadowing it with the C complex.h.
        guesses.insert(
            "CPATH",
            ["ipp/include", "mkl/include", "mkl/include/fftw", "tbb/include"],
        );
        guesses.insert("DAALROOT", ["daal"]);
        guesses.insert("IPPROOT", ["ipp"]);
        guesses.insert("LD_LIBRARY_PATH", ["lib"]);
        guesses.insert(
            "MANPATH",
            [
                "debugger/gdb/intel64/share/man",
                "man/common",
                "man/en_US",
                "share/man",
            ],
        );
        guesses.insert("PATH", ["tbb/bin", "mkl/bin"]);
        guesses.insert("TBBROOT", ["tbb"]);
        guesses.insert("MKLROOT", ["mkl"]);
        guesses.insert("PSTLROOT", ["pstl"]);
        guesses.insert("INFOPATH", [docpath.clone()]);
        guesses.insert("PKG_CONFIG_PATH", ["mkl/bin/pkgconfig"]);

        if m32 {
            guesses.extend("PATH", ["bin/ia32", "tbb/bin/ia32"]);
            guesses.push("LD_LIBRARY_PATH", "lib/ia32");
        } else {
            guesses.extend(
                "PATH",
                [
                    "bin/intel64",
                    "debugger/gdb/intel64/bin",
                    "ipp/bin/intel64",
                    "tbb/bin/emt64",
                    "tbb/bin/intel64",
                ],
            );
            guesses.extend(
                "LD_LIBRARY_PATH",
                [
                    format!("tbb/lib/intel64/{}", self.tbb_abi_prefix),
                    "mkl/lib/intel64".to_string(),
                    "ipp/lib/intel64".to_string(),
                    "debugger/ipt/intel64/lib".to_string(),
                    "compiler/lib/intel64".to_string(),
                ],
            );
            guesses.insert(
                "MIC_LD_LIBRARY_PATH",
                [
                    "compiler/lib/mic",
                    "debugger/ipt/lib/mic",
                    "ipp/lib/mic",
                    "mkl/lib/mic",
                    "tbb/lib/mic",
                ],
            );
        }

        if !hide_mpi {
            guesses.extend("LD_LIBRARY_PATH", ["mpi/mic/lib", "mpi/intel64/lib"]);
            if guesses.contains("MIC_LD_LIBRARY_PATH") {
                guesses.push("MIC_LD_LIBRARY_PATH", "mpi/mic/lib");
            }
            guesses.push("PATH", "mpi/intel64/bin");
            guesses.push("CPATH", "mpi/intel64/include");
        }

        if version.at_least("2016") {
            if let Some(debugger) = &layout.debugger_subdir {
                guesses.push("LD_LIBRARY_PATH", format!("{debugger}/libipt/intel64/lib"));
            }
            guesses.push("LD_LIBRARY_PATH", "daal/lib/intel64_lin");
        }

        // Recent distributions keep the real binaries in deeper directories
        // with top-level symlinks, and not every binary is symlinked. When
        // the versioned prefix exists, point every fragment into it, then
        // re-add the root-relative entries the rewrite must not touch.
        let prefixed = self.probe.is_dir(Path::new(&layout.prefix));
        if prefixed {
            guesses.prepend_prefix(&layout.prefix);

            guesses.extend(
                "PATH",
                [
                    "daal/bin",
                    "advisor/bin64",
                    "advisor_xe/bin64",
                    "inspector/bin64",
                    "inspector_xe/bin64",
                ],
            );
            guesses.extend(
                "MANPATH",
                [
                    "man/common".to_string(),
                    format!("{docpath}/en/debugger/gdb-mic/man"),
                    format!("{docpath}/en/debugger/gdb-igfx/man"),
                    format!("{docpath}/en/debugger/gdb-ia/man"),
                ],
            );
            guesses.extend(
                "INFOPATH",
                [
                    format!("{docpath}/en/debugger/gdb-mic/info"),
                    format!("{docpath}/en/debugger/gdb-ia/info"),
                    format!("{docpath}/en/debugger/gdb-igfx/info"),
                ],
            );

            if let Some(debugger) = &layout.debugger_subdir {
                guesses.extend(
                    "LD_LIBRARY_PATH",
                    [
                        format!("{debugger}/libipt/intel64/lib"),
                        format!("{debugger}/iga/lib"),
                    ],
                );
                guesses.insert("GDB_CROSS", self.gdb_cross_candidates(debugger));
                guesses.insert(
                    "GDBSERVER_MIC",
                    [
                        format!("{debugger}/gdb/targets/intel64/x200/bin/gdbserver"),
                        format!("{debugger}/gdb/targets/mic/bin/gdbserver"),
                    ],
                );
            }

            guesses.push("LD_LIBRARY_PATH", "daal/lib/intel64_lin");
        }

        // Debugger trees are named relative to the install root, so the gdb
        // launcher entry goes in after any prefix rewrite.
        if let Some(debugger) = &layout.debugger_subdir {
            guesses.push("PATH", format!("{debugger}/gdb/intel64/bin"));
        }

        // The generic fragment is listed last so it never takes precedence
        // over the subdirectory entries above it.
        let generic = if prefixed {
            format!("{}/lib/intel64", layout.prefix)
        } else {
            "lib/intel64".to_string()
        };
        guesses.push("LD_LIBRARY_PATH", generic);

        // $IDB_HOME only exists when the legacy debugger shipped.
        if self.probe.is_file(Path::new("bin/intel64/idb")) {
            guesses.insert("IDB_HOME", ["bin/intel64"]);
        }

        // Snapshot copy, after every other mutation.
        let library_path: Vec<String> = guesses
            .get("LD_LIBRARY_PATH")
            .map(<[String]>::to_vec)
            .unwrap_or_default();
        guesses.insert("LIBRARY_PATH", library_path);

        guesses
    }

    /// First debugger cross-gdb binary present on disk, or every candidate
    /// when none is (the generator's existence check settles it).
    fn gdb_cross_candidates(&self, debugger: &str) -> Vec<String> {
        let candidates = [
            format!("{debugger}/gdb/intel64_mic/bin/gdb-mic"),
            format!("{debugger}/gdb/intel64/bin/gdb-ia"),
        ];
        match candidates
            .iter()
            .find(|candidate| self.probe.is_file(Path::new(candidate)))
        {
            Some(existing) => vec![existing.clone()],
            None => candidates.to_vec(),
        }
    }
}

/// Append the host's multiarch include directory as the lowest-priority
/// `CPATH` entry. Debian and Ubuntu keep system headers under
/// `/usr/include/<triplet>`, which icc does not search on its own.
pub fn append_multiarch_include(guesses: &mut EnvGuessMap, runner: &dyn CommandRunner) {
    if let Some(triplet) = toolchain::multiarch_include_subdir(runner) {
        let include_dir = format!("/usr/include/{triplet}");
        tracing::info!(path = %include_dir, "adding multiarch include path to CPATH");
        guesses.push("CPATH", include_dir);
    }
}

/// Root-relative Python home for the bundled debugger, when it exists.
///
/// The 2015-and-later gdb needs `INTEL_PYTHONHOME` set to a single value,
/// emitted as a set-environment statement rather than a path list.
pub fn debugger_python_home(layout: &Layout, probe: &dyn InstallProbe) -> Option<PathBuf> {
    let debugger = layout.debugger_subdir.as_ref()?;
    let python_home = PathBuf::from(debugger).join("python/intel64");
    probe.is_dir(&python_home).then_some(python_home)
}

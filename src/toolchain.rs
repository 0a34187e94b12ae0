//! Host toolchain discovery.
//!
//! Three small questions answered by running the host's compilers through
//! the [`CommandRunner`] capability:
//!
//! - which compiler suite version is actually on PATH (`icc --version`)
//! - which GCC ABI directory the bundled TBB libraries should resolve to
//! - whether the host uses a multiarch include layout (Debian/Ubuntu)
//!
//! Only [`icc_version`] is fallible to the caller; the other two degrade to
//! a documented fallback when the host cannot answer.

use crate::error::{PsxeError, Result};
use crate::shell::CommandRunner;
use regex::Regex;
use std::sync::LazyLock;

/// Pattern matching the version line of an `icc --version` banner,
/// e.g. `icc (ICC) 16.0.1 20151021`.
static ICC_VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^icc \(ICC\) (?P<version>[0-9.]+) [0-9]+$").expect("ICC_VERSION_RE must compile")
});

/// ABI directory used when the host GCC is 4.4 or newer (or unknown).
const TBB_GCC_PREFIX_MODERN: &str = "gcc4.4";

/// ABI directory used for GCC older than 4.4.
const TBB_GCC_PREFIX_LEGACY: &str = "gcc4.1";

/// Obtain the installed compiler version via `icc --version`.
pub fn icc_version(runner: &dyn CommandRunner) -> Result<String> {
    let output = runner.run("icc --version")?;
    if !output.success {
        return Err(PsxeError::VersionDetection {
            message: format!("icc --version exited with {:?}", output.exit_code),
        });
    }

    match ICC_VERSION_RE.captures(&output.stdout) {
        Some(caps) => Ok(caps["version"].to_string()),
        None => Err(PsxeError::VersionDetection {
            message: "no version line in icc --version output".to_string(),
        }),
    }
}

/// GCC ABI directory name for the bundled TBB libraries.
///
/// TBB ships one library tree per GCC ABI generation; the 64-bit guess map
/// picks the tree matching the host GCC (`tbb/lib/intel64/<prefix>`).
/// When `gcc -dumpversion` fails or is unparseable, assumes the modern ABI.
pub fn tbb_gcc_abi_prefix(runner: &dyn CommandRunner) -> String {
    let prefix = match runner.run("gcc -dumpversion") {
        Ok(output) if output.success => match parse_gcc_version(output.stdout.trim()) {
            Some((major, minor)) if (major, minor) < (4, 4) => TBB_GCC_PREFIX_LEGACY,
            Some(_) => TBB_GCC_PREFIX_MODERN,
            None => {
                tracing::debug!(
                    output = output.stdout.trim(),
                    "unparseable gcc -dumpversion output, assuming modern ABI"
                );
                TBB_GCC_PREFIX_MODERN
            }
        },
        _ => {
            tracing::debug!("gcc -dumpversion unavailable, assuming modern ABI");
            TBB_GCC_PREFIX_MODERN
        }
    };
    prefix.to_string()
}

/// Multiarch include subdirectory of the host, e.g. `x86_64-linux-gnu`.
///
/// On Debian and Ubuntu, `/usr/include/<triplet>` must be on `CPATH` for
/// icc to find system headers. Returns `None` when the host GCC does not
/// report a multiarch triplet.
pub fn multiarch_include_subdir(runner: &dyn CommandRunner) -> Option<String> {
    match runner.run("gcc -print-multiarch") {
        Ok(output) if output.success => {
            let triplet = output.stdout.trim();
            if triplet.is_empty() {
                None
            } else {
                Some(triplet.to_string())
            }
        }
        _ => None,
    }
}

/// Parse `major.minor` out of a `gcc -dumpversion` answer ("4.8.5", "12").
fn parse_gcc_version(text: &str) -> Option<(u32, u32)> {
    let mut parts = text.split('.');
    let major = parts.next()?.parse().ok()?;
    let minor = parts.next().map_or(Some(0), |m| m.parse().ok())?;
    Some((major, minor))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::CommandOutput;

    /// Runner returning canned output per command prefix.
    struct StubRunner {
        stdout: &'static str,
        success: bool,
    }

    impl CommandRunner for StubRunner {
        fn run(&self, command: &str) -> Result<CommandOutput> {
            let _ = command;
            Ok(CommandOutput {
                exit_code: if self.success { Some(0) } else { Some(1) },
                stdout: self.stdout.to_string(),
                stderr: String::new(),
                success: self.success,
            })
        }
    }

    /// Runner whose spawn itself fails.
    struct BrokenRunner;

    impl CommandRunner for BrokenRunner {
        fn run(&self, command: &str) -> Result<CommandOutput> {
            Err(PsxeError::CommandFailed {
                command: command.to_string(),
                code: None,
            })
        }
    }

    #[test]
    fn icc_version_extracts_from_banner() {
        let runner = StubRunner {
            stdout: "icc (ICC) 16.0.1 20151021\nCopyright (C) 1985-2015 Intel Corporation.\n",
            success: true,
        };
        assert_eq!(icc_version(&runner).unwrap(), "16.0.1");
    }

    #[test]
    fn icc_version_rejects_unexpected_output() {
        let runner = StubRunner {
            stdout: "gcc (GCC) 9.4.0\n",
            success: true,
        };
        let err = icc_version(&runner).unwrap_err();
        assert!(matches!(err, PsxeError::VersionDetection { .. }));
    }

    #[test]
    fn icc_version_rejects_failed_command() {
        let runner = StubRunner {
            stdout: "",
            success: false,
        };
        assert!(icc_version(&runner).is_err());
    }

    #[test]
    fn tbb_prefix_modern_gcc() {
        let runner = StubRunner {
            stdout: "4.8.5\n",
            success: true,
        };
        assert_eq!(tbb_gcc_abi_prefix(&runner), "gcc4.4");
    }

    #[test]
    fn tbb_prefix_legacy_gcc() {
        let runner = StubRunner {
            stdout: "4.1.2\n",
            success: true,
        };
        assert_eq!(tbb_gcc_abi_prefix(&runner), "gcc4.1");
    }

    #[test]
    fn tbb_prefix_single_component_version() {
        let runner = StubRunner {
            stdout: "12\n",
            success: true,
        };
        assert_eq!(tbb_gcc_abi_prefix(&runner), "gcc4.4");
    }

    #[test]
    fn tbb_prefix_garbage_falls_back_to_modern() {
        let runner = StubRunner {
            stdout: "not-a-version\n",
            success: true,
        };
        assert_eq!(tbb_gcc_abi_prefix(&runner), "gcc4.4");
    }

    #[test]
    fn tbb_prefix_survives_missing_gcc() {
        assert_eq!(tbb_gcc_abi_prefix(&BrokenRunner), "gcc4.4");
    }

    #[test]
    fn multiarch_trims_triplet() {
        let runner = StubRunner {
            stdout: "x86_64-linux-gnu\n",
            success: true,
        };
        assert_eq!(
            multiarch_include_subdir(&runner).as_deref(),
            Some("x86_64-linux-gnu")
        );
    }

    #[test]
    fn multiarch_empty_output_is_none() {
        let runner = StubRunner {
            stdout: "\n",
            success: true,
        };
        assert!(multiarch_include_subdir(&runner).is_none());
    }

    #[test]
    fn multiarch_failure_is_none() {
        assert!(multiarch_include_subdir(&BrokenRunner).is_none());
        let failing = StubRunner {
            stdout: "",
            success: false,
        };
        assert!(multiarch_include_subdir(&failing).is_none());
    }

    #[test]
    fn gcc_version_parser_handles_forms() {
        assert_eq!(parse_gcc_version("4.8.5"), Some((4, 8)));
        assert_eq!(parse_gcc_version("12"), Some((12, 0)));
        assert_eq!(parse_gcc_version(""), None);
        assert_eq!(parse_gcc_version("4.x"), None);
    }
}

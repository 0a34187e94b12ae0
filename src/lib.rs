//! psxe - install resolution for the Intel Parallel Studio XE compiler suite.
//!
//! Given a declared product version and a few flags, psxe derives everything
//! a precompiled compiler-suite install needs beyond running the installer
//! itself: the version-conditional directory layout, the environment-variable
//! guesses an environment-module generator emits, the post-install sanity
//! checks, and the silent-config naming convention the installer expects.
//! A decade of releases moved files between directories and renamed
//! subcomponents; the whole point of the crate is encoding those thresholds
//! once, explicitly, and testing them.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and dispatch
//! - [`config`] - Install configuration schema and loading
//! - [`error`] - Error types and result aliases
//! - [`guess`] - Environment-variable guesses for the module generator
//! - [`layout`] - Version-conditional directory layout resolution
//! - [`probe`] - Read-only filesystem probes against the install root
//! - [`sanity`] - Post-install sanity-check specification
//! - [`shell`] - Shell command execution
//! - [`silent`] - Silent-configuration naming conventions
//! - [`toolchain`] - Host toolchain discovery (icc, gcc)
//! - [`version`] - Release version parsing and comparison
//!
//! # Example
//!
//! ```
//! use psxe::layout::LayoutResolver;
//! use psxe::probe::DirProbe;
//! use psxe::version::Version;
//!
//! let probe = DirProbe::new("/opt/intel");
//! let version = Version::parse("2016.0.109").unwrap();
//! let layout = LayoutResolver::new(&probe).resolve(&version);
//! assert_eq!(
//!     layout.comp_libs_subdir.as_deref(),
//!     Some("compilers_and_libraries_2016.0.109/linux")
//! );
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod guess;
pub mod layout;
pub mod probe;
pub mod sanity;
pub mod shell;
pub mod silent;
pub mod toolchain;
pub mod version;

pub use error::{PsxeError, Result};

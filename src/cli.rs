//! CLI argument definitions and command dispatch.
//!
//! Every subcommand loads the install config, resolves the layout, and
//! prints one derived value as pretty JSON. All decisions live in the
//! library; the CLI is presentation only.

use crate::config::InstallConfig;
use crate::error::Result;
use crate::guess::{append_multiarch_include, debugger_python_home, EnvGuessBuilder, EnvGuessMap};
use crate::layout::LayoutResolver;
use crate::probe::DirProbe;
use crate::sanity::build_sanity_spec;
use crate::shell::SystemRunner;
use crate::silent::select_silent_cfg_names;
use crate::toolchain;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

/// psxe - install resolution for the Intel Parallel Studio XE compiler suite.
#[derive(Debug, Parser)]
#[command(name = "psxe")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the install config file
    #[arg(short, long, env = "PSXE_CONFIG")]
    pub config: PathBuf,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the resolved directory layout
    Layout,

    /// Show the environment-variable guesses for the module generator
    Guesses(GuessesArgs),

    /// Show the post-install sanity-check spec
    Sanity,

    /// Show the silent-config key naming for the installer run
    SilentConfig,

    /// Show the icc version found on PATH alongside the declared one
    Detect,
}

/// Arguments for the `guesses` command.
#[derive(Debug, Clone, clap::Args)]
pub struct GuessesArgs {
    /// Also consult the host gcc for the multiarch include directory
    #[arg(long)]
    pub with_multiarch: bool,
}

/// Guess output: the variable map plus the probe-gated set-environment
/// value for the debugger's Python home.
#[derive(Debug, Serialize)]
struct GuessReport<'a> {
    guesses: &'a EnvGuessMap,
    intel_pythonhome: Option<PathBuf>,
}

/// Load the config, resolve, and print the requested value.
pub fn run(cli: &Cli) -> Result<()> {
    let config = InstallConfig::load(&cli.config)?;
    let version = config.version()?;
    let probe = DirProbe::new(&config.install_root);
    let layout = LayoutResolver::new(&probe).resolve(&version);

    match &cli.command {
        Commands::Layout => print_json(&layout),
        Commands::Guesses(args) => {
            let runner = SystemRunner;
            let abi_prefix = toolchain::tbb_gcc_abi_prefix(&runner);
            let builder = EnvGuessBuilder::new(&probe, abi_prefix);
            let mut guesses = builder.build(&layout, &version, config.hide_mpi, config.m32);
            if args.with_multiarch {
                append_multiarch_include(&mut guesses, &runner);
            }
            let report = GuessReport {
                guesses: &guesses,
                intel_pythonhome: debugger_python_home(&layout, &probe)
                    .map(|home| config.install_root.join(home)),
            };
            print_json(&report)
        }
        Commands::Sanity => print_json(&build_sanity_spec(&layout, &version)),
        Commands::SilentConfig => print_json(&select_silent_cfg_names(&version)),
        Commands::Detect => {
            let detected = toolchain::icc_version(&SystemRunner)?;
            print_json(&serde_json::json!({
                "declared": config.official_version,
                "detected": detected,
            }))
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).map_err(anyhow::Error::from)?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_layout_command() {
        let cli = Cli::try_parse_from(["psxe", "--config", "install.yml", "layout"]).unwrap();
        assert!(matches!(cli.command, Commands::Layout));
        assert_eq!(cli.config, PathBuf::from("install.yml"));
    }

    #[test]
    fn parses_guesses_with_multiarch_flag() {
        let cli = Cli::try_parse_from([
            "psxe",
            "--config",
            "install.yml",
            "guesses",
            "--with-multiarch",
        ])
        .unwrap();
        match cli.command {
            Commands::Guesses(args) => assert!(args.with_multiarch),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn parses_detect_command() {
        let cli = Cli::try_parse_from(["psxe", "--config", "install.yml", "detect"]).unwrap();
        assert!(matches!(cli.command, Commands::Detect));
    }

    #[test]
    fn config_flag_is_required() {
        assert!(Cli::try_parse_from(["psxe", "layout"]).is_err());
    }
}

//! Integration tests for the resolution public API.

use psxe::config::InstallConfig;
use psxe::guess::{debugger_python_home, EnvGuessBuilder};
use psxe::layout::LayoutResolver;
use psxe::probe::DirProbe;
use psxe::sanity::build_sanity_spec;
use psxe::silent::select_silent_cfg_names;
use psxe::version::Version;
use std::fs;
use tempfile::TempDir;

/// Install root holding the versioned 2016 subdirectory, as the installer
/// leaves it behind.
fn installed_2016_root() -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("compilers_and_libraries_2016.0.109/linux")).unwrap();
    temp
}

#[test]
fn full_resolution_for_installed_2016_release() {
    let root = installed_2016_root();
    let config = InstallConfig {
        official_version: "2016.0.109".to_string(),
        components: None,
        m32: false,
        hide_mpi: true,
        install_root: root.path().to_path_buf(),
    };
    config.validate().unwrap();

    let version = config.version().unwrap();
    let probe = DirProbe::new(&config.install_root);

    // 1. Layout: prefix collapses onto the versioned subdirectory
    let layout = LayoutResolver::new(&probe).resolve(&version);
    assert_eq!(layout.prefix, "compilers_and_libraries_2016.0.109/linux");
    assert_eq!(
        layout.comp_libs_subdir.as_deref(),
        Some("compilers_and_libraries_2016.0.109/linux")
    );
    assert!(!layout.is_best_effort());

    // 2. Guesses: MPI stays hidden, generic lib fragment stays last
    let guesses =
        EnvGuessBuilder::new(&probe, "gcc4.4").build(&layout, &version, config.hide_mpi, config.m32);
    assert!(!guesses
        .get("PATH")
        .unwrap()
        .iter()
        .any(|fragment| fragment.contains("mpi/")));

    let ld = guesses.get("LD_LIBRARY_PATH").unwrap();
    assert_eq!(
        ld.last().unwrap(),
        "compilers_and_libraries_2016.0.109/linux/lib/intel64"
    );
    assert!(ld[..ld.len() - 1]
        .iter()
        .any(|fragment| fragment.contains("daal/lib/intel64_lin")));

    // 3. Sanity: versioned subdir is a required directory
    let sanity = build_sanity_spec(&layout, &version);
    assert!(sanity
        .dirs
        .contains(&"compilers_and_libraries_2016.0.109/linux".to_string()));
    assert!(sanity.files.contains(&"include/omp.h".to_string()));

    // 4. Silent config: current naming, no legacy map
    assert!(select_silent_cfg_names(&version).is_none());

    // 5. Components: defaulted to ALL for the 2016 layout
    assert_eq!(config.effective_components(&version), vec!["ALL"]);
}

#[test]
fn resolution_against_empty_root_stays_unprefixed() {
    let temp = TempDir::new().unwrap();
    let probe = DirProbe::new(temp.path());
    let version = Version::parse("2016.0.109").unwrap();

    let layout = LayoutResolver::new(&probe).resolve(&version);
    let guesses = EnvGuessBuilder::new(&probe, "gcc4.4").build(&layout, &version, true, false);

    // subdir not on disk: no prefix rewrite, fragments stay root-relative
    assert_eq!(guesses.get("MKLROOT").unwrap(), &["mkl"]);
    assert_eq!(guesses.get("LD_LIBRARY_PATH").unwrap().last().unwrap(), "lib/intel64");
    assert!(!guesses.contains("GDB_CROSS"));
}

#[test]
fn legacy_2012_run_resolves_legacy_conventions() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("composerxe-2012.1.100")).unwrap();
    let probe = DirProbe::new(temp.path());
    let version = Version::parse("2012.1.100").unwrap();

    let layout = LayoutResolver::new(&probe).resolve(&version);
    assert_eq!(layout.prefix, "composerxe-2012.1.100");
    assert_eq!(layout.lib_prefix, "compiler/lib/intel64");
    assert!(layout.debugger_subdir.is_none());

    let names = select_silent_cfg_names(&version).unwrap();
    assert_eq!(names.activation_name, "ACTIVATION");
    assert_eq!(names.license_file_name, "PSET_LICENSE_FILE_PATH");
}

#[test]
fn debugger_python_home_surfaces_only_when_installed() {
    let root = installed_2016_root();
    let probe = DirProbe::new(root.path());
    let version = Version::parse("2016.0.109").unwrap();
    let layout = LayoutResolver::new(&probe).resolve(&version);

    assert!(debugger_python_home(&layout, &probe).is_none());

    fs::create_dir_all(root.path().join("debugger_2016/python/intel64")).unwrap();
    let home = debugger_python_home(&layout, &probe).unwrap();
    assert_eq!(home.to_str().unwrap(), "debugger_2016/python/intel64");
}

#[test]
fn guess_map_json_round_trips_scenario() {
    let root = installed_2016_root();
    let probe = DirProbe::new(root.path());
    let version = Version::parse("2016.0.109").unwrap();
    let layout = LayoutResolver::new(&probe).resolve(&version);
    let guesses = EnvGuessBuilder::new(&probe, "gcc4.4").build(&layout, &version, true, false);

    let json: serde_json::Value = serde_json::from_str(&serde_json::to_string(&guesses).unwrap()).unwrap();
    let ld = json["LD_LIBRARY_PATH"].as_array().unwrap();
    assert_eq!(
        ld.last().unwrap().as_str().unwrap(),
        "compilers_and_libraries_2016.0.109/linux/lib/intel64"
    );
}

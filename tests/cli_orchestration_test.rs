use std::fs;
use std::path::Path;

use pinsync::cli::orchestration::{run_sync_workflow, SyncMode, SyncWorkflowArgs};
use pinsync::config::{load_config, Preset};
use pinsync::plan::Plan;
use pinsync::warnings::SyncWarning;
use pinsync::SyncError;
use serial_test::serial;
use tempfile::TempDir;

const WORKFLOW: &str = r#"name: test
on: [push]
jobs:
  test:
    runs-on: ubuntu-latest
    steps:
      - uses: actions/checkout@v4
      - uses: dtolnay/rust-toolchain@1.74.0
        with:
          components: clippy
"#;

const DOCKERFILE: &str = r#"FROM lukemathwalker/cargo-chef:0.1.41-rust-1.74.0-slim-buster AS chef
WORKDIR /app

FROM chef AS planner
COPY . .
"#;

/// Lays out a repository using the `update` preset's file names.
fn scratch_repo(toolchain: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join(".github/workflows")).unwrap();
    fs::write(root.join("rust-toolchain"), toolchain).unwrap();
    fs::write(root.join(".github/workflows/test.yml"), WORKFLOW).unwrap();
    fs::write(root.join(".github/workflows/test-slim.yml"), WORKFLOW).unwrap();
    fs::write(root.join("Dockerfile.build"), DOCKERFILE).unwrap();
    dir
}

fn read(root: &Path, file: &str) -> String {
    fs::read_to_string(root.join(file)).unwrap()
}

fn args(root: &Path, mode: SyncMode, export: Option<bool>) -> SyncWorkflowArgs {
    SyncWorkflowArgs {
        root: root.to_path_buf(),
        mode,
        export,
    }
}

#[test]
fn test_toolchain_channel_line_is_extracted() {
    let dir = scratch_repo("[toolchain]\nchannel = \"1.75.0\"\n");
    let plan = Plan::compile(&Preset::RustToolchain.config()).unwrap();

    let report = run_sync_workflow(&args(dir.path(), SyncMode::Write, None), &plan).unwrap();
    assert_eq!(report.values.get("rust_version"), Some("1.75.0"));
}

#[test]
fn test_workflow_action_reference_updated() {
    let dir = scratch_repo("1.75.0\n");
    let plan = Plan::compile(&Preset::RustToolchain.config()).unwrap();

    run_sync_workflow(&args(dir.path(), SyncMode::Write, None), &plan).unwrap();

    let expected = WORKFLOW.replace(
        "dtolnay/rust-toolchain@1.74.0",
        "dtolnay/rust-toolchain@1.75.0",
    );
    assert_eq!(read(dir.path(), ".github/workflows/test.yml"), expected);
    assert_eq!(read(dir.path(), ".github/workflows/test-slim.yml"), expected);
}

#[test]
fn test_dockerfile_image_tag_updated() {
    for preset in [Preset::Update, Preset::RustToolchain] {
        let dir = scratch_repo("1.75.0\n");
        let plan = Plan::compile(&preset.config()).unwrap();

        let report =
            run_sync_workflow(&args(dir.path(), SyncMode::Write, Some(false)), &plan).unwrap();

        assert_eq!(report.values.get("chef_version"), Some("0.1.41"));
        assert_eq!(
            read(dir.path(), "Dockerfile.build"),
            DOCKERFILE.replace(
                "cargo-chef:0.1.41-rust-1.74.0-slim-buster AS chef",
                "cargo-chef:0.1.41-rust-1.75.0-slim-buster AS chef"
            ),
            "preset {}",
            preset.name()
        );
    }
}

#[test]
fn test_rerun_is_idempotent() {
    let dir = scratch_repo("1.75.0\n");
    let plan = Plan::compile(&Preset::RustToolchain.config()).unwrap();
    let run_args = args(dir.path(), SyncMode::Write, None);

    let first = run_sync_workflow(&run_args, &plan).unwrap();
    let after_first = read(dir.path(), "Dockerfile.build");
    let second = run_sync_workflow(&run_args, &plan).unwrap();

    assert_eq!(first.changed.len(), 3);
    assert!(second.changed.is_empty());
    assert_eq!(read(dir.path(), "Dockerfile.build"), after_first);
}

#[test]
fn test_missing_toolchain_file_fails() {
    let dir = scratch_repo("1.75.0\n");
    fs::remove_file(dir.path().join("rust-toolchain")).unwrap();
    let plan = Plan::compile(&Preset::RustToolchain.config()).unwrap();

    let err = run_sync_workflow(&args(dir.path(), SyncMode::Write, None), &plan).unwrap_err();
    assert!(matches!(err, SyncError::Read { .. }));
    assert_eq!(read(dir.path(), ".github/workflows/test.yml"), WORKFLOW);
}

#[test]
fn test_unmatched_toolchain_aborts_without_writing() {
    let dir = scratch_repo("stable\n");
    let plan = Plan::compile(&Preset::RustToolchain.config()).unwrap();

    let err = run_sync_workflow(&args(dir.path(), SyncMode::Write, None), &plan).unwrap_err();

    assert!(matches!(err, SyncError::NoMatch { ref name, .. } if name == "rust_version"));
    assert_eq!(read(dir.path(), ".github/workflows/test.yml"), WORKFLOW);
    assert_eq!(read(dir.path(), "Dockerfile.build"), DOCKERFILE);
}

#[test]
fn test_missing_target_keeps_earlier_writes() {
    let dir = scratch_repo("1.75.0\n");
    fs::remove_file(dir.path().join(".github/workflows/test-slim.yml")).unwrap();
    let plan = Plan::compile(&Preset::RustToolchain.config()).unwrap();

    let err = run_sync_workflow(&args(dir.path(), SyncMode::Write, None), &plan).unwrap_err();

    assert!(err.to_string().contains("test-slim.yml"));
    // no rollback: the first workflow stays rewritten
    assert!(read(dir.path(), ".github/workflows/test.yml").contains("@1.75.0"));
}

#[test]
fn test_dry_run_writes_nothing() {
    let dir = scratch_repo("1.75.0\n");
    let plan = Plan::compile(&Preset::Update.config()).unwrap();

    let report = run_sync_workflow(&args(dir.path(), SyncMode::DryRun, None), &plan).unwrap();

    assert_eq!(report.changed.len(), 3);
    assert!(report.export.is_none());
    assert_eq!(read(dir.path(), ".github/workflows/test.yml"), WORKFLOW);
    assert_eq!(read(dir.path(), "Dockerfile.build"), DOCKERFILE);
    assert!(!dir.path().join("github_output.txt").exists());
}

#[test]
fn test_check_reports_drift() {
    let dir = scratch_repo("1.75.0\n");
    let plan = Plan::compile(&Preset::RustToolchain.config()).unwrap();

    let report = run_sync_workflow(&args(dir.path(), SyncMode::Check, None), &plan).unwrap();
    assert!(report.has_drift());
    assert!(report
        .changed
        .iter()
        .any(|p| p == Path::new("Dockerfile.build")));
}

#[test]
fn test_check_passes_when_in_sync() {
    let dir = scratch_repo("1.74.0\n");
    let plan = Plan::compile(&Preset::RustToolchain.config()).unwrap();

    let report = run_sync_workflow(&args(dir.path(), SyncMode::Check, None), &plan).unwrap();
    assert!(!report.has_drift());
}

#[test]
#[serial]
fn test_export_appends_to_env_path() {
    let dir = scratch_repo("1.75.0\n");
    let output_file = dir.path().join("gh_output");
    fs::write(&output_file, "earlier=value\n").unwrap();
    std::env::set_var("GITHUB_OUTPUT", &output_file);

    let plan = Plan::compile(&Preset::Update.config()).unwrap();
    let result = run_sync_workflow(&args(dir.path(), SyncMode::Write, None), &plan);
    std::env::remove_var("GITHUB_OUTPUT");

    let report = result.unwrap();
    let export = report.export.expect("export should run");
    assert!(export.target.from_env);
    assert_eq!(
        fs::read_to_string(&output_file).unwrap(),
        "earlier=value\nrust_version=1.75.0\n"
    );
    assert!(report.warnings.is_empty());
}

#[test]
#[serial]
fn test_export_falls_back_when_env_unset() {
    std::env::remove_var("GITHUB_OUTPUT");
    let dir = scratch_repo("1.75.0\n");
    let plan = Plan::compile(&Preset::Update.config()).unwrap();

    let report = run_sync_workflow(&args(dir.path(), SyncMode::Write, None), &plan).unwrap();

    assert_eq!(
        read(dir.path(), "github_output.txt"),
        "rust_version=1.75.0\n"
    );
    assert!(report
        .warnings
        .iter()
        .any(|w| matches!(w, SyncWarning::OutputFallback { .. })));
}

#[test]
#[serial]
fn test_export_can_be_forced_on() {
    std::env::remove_var("GITHUB_OUTPUT");
    let dir = scratch_repo("1.75.0\n");
    let plan = Plan::compile(&Preset::RustToolchain.config()).unwrap();

    run_sync_workflow(&args(dir.path(), SyncMode::Write, Some(true)), &plan).unwrap();
    assert_eq!(
        read(dir.path(), "github_output.txt"),
        "rust_version=1.75.0\n"
    );
}

#[test]
#[serial]
fn test_fixture_config_exports_custom_keys() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join(".github/workflows")).unwrap();
    fs::write(
        root.join("rust-toolchain.toml"),
        "[toolchain]\nchannel = \"1.76.0\"\ncomponents = [\"clippy\"]\n",
    )
    .unwrap();
    fs::write(root.join(".github/workflows/ci.yml"), WORKFLOW).unwrap();
    std::env::remove_var("PINSYNC_TEST_OUTPUT");

    let config = load_config(Some("tests/fixtures/pinsync.toml"), root).unwrap();
    let plan = Plan::compile(&config).unwrap();
    run_sync_workflow(&args(root, SyncMode::Write, None), &plan).unwrap();

    assert!(read(root, ".github/workflows/ci.yml").contains("dtolnay/rust-toolchain@1.76.0"));
    assert_eq!(
        read(root, "outputs.txt"),
        "toolchain=1.76.0\nmsrv_label=rust-1.76.0\n"
    );
}

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use pinsync::cli::orchestration::{self, SyncMode, SyncWorkflowArgs};
use pinsync::config::{self, Preset};
use pinsync::logging;
use pinsync::plan::Plan;
use pinsync::ui;

#[derive(clap::Parser)]
#[command(
    name = "pinsync",
    version,
    about = "Keep a pinned toolchain version in sync across CI workflows and container files"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(
        short = 'C',
        long,
        default_value = ".",
        help = "Repository root that configured paths are relative to"
    )]
    root: PathBuf,

    #[arg(
        long,
        value_enum,
        conflicts_with = "config",
        help = "Use a built-in pipeline instead of a configuration file"
    )]
    preset: Option<Preset>,

    #[arg(long, help = "Preview what would change without writing files")]
    dry_run: bool,

    #[arg(
        long,
        conflicts_with = "dry_run",
        help = "Exit with status 1 if any file is out of sync; writes nothing"
    )]
    check: bool,

    #[arg(long, help = "Export values even if the configuration disables it")]
    output: bool,

    #[arg(
        long,
        conflicts_with = "output",
        help = "Do not export values even if the configuration enables it"
    )]
    no_output: bool,

    #[arg(long, help = "Show the configured steps and exit")]
    list: bool,

    #[arg(short, long, action = clap::ArgAction::Count, help = "Increase log verbosity")]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    // Load configuration
    let config = match args.preset {
        Some(preset) => {
            ui::display_status(&format!("Using preset '{}'", preset.name()));
            preset.config()
        }
        None => match config::load_config(args.config.as_deref(), &args.root) {
            Ok(cfg) => cfg,
            Err(e) => {
                ui::display_error(&format!("Error loading config: {}", e));
                std::process::exit(1);
            }
        },
    };

    let plan = match Plan::compile(&config) {
        Ok(plan) => plan,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    if args.list {
        ui::display_plan(&plan);
        return Ok(());
    }

    let mode = if args.check {
        SyncMode::Check
    } else if args.dry_run {
        SyncMode::DryRun
    } else {
        SyncMode::Write
    };

    let export = if args.output {
        Some(true)
    } else if args.no_output {
        Some(false)
    } else {
        None
    };

    let workflow_args = SyncWorkflowArgs {
        root: args.root,
        mode,
        export,
    };

    let report = match orchestration::run_sync_workflow(&workflow_args, &plan) {
        Ok(report) => report,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    match mode {
        SyncMode::Check if report.has_drift() => {
            ui::display_drift(&orchestration::changed_refs(&report));
            std::process::exit(1);
        }
        SyncMode::Check => ui::display_success("All files in sync"),
        SyncMode::DryRun => ui::display_status(&format!(
            "Dry run: {} file(s) would change, nothing written",
            report.changed.len()
        )),
        SyncMode::Write => ui::display_success(&format!(
            "Synced {} value(s), {} file(s) changed",
            report.values.len(),
            report.changed.len()
        )),
    }

    Ok(())
}

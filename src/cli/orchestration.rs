//! Main sync workflow orchestration logic
//!
//! Runs a compiled [Plan] in three phases: extract every value, render every
//! replacement, then substitute file by file and export. Nothing is written
//! until the first two phases have succeeded, so a missing value or a bad
//! template never produces a partial write.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::domain::{ExtractedValues, Extraction};
use crate::error::{Result, SyncError};
use crate::extractor;
use crate::output::{self, ExportReport};
use crate::plan::{Plan, Target};
use crate::store::{FsStore, OverlayStore, TextStore};
use crate::substituter;
use crate::ui;
use crate::warnings::SyncWarning;

/// How target files are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncMode {
    /// Rewrite target files in place and export values
    #[default]
    Write,
    /// Compute and report changes without writing anything
    DryRun,
    /// Like `DryRun`; callers fail when any file would change
    Check,
}

impl SyncMode {
    pub fn writes(&self) -> bool {
        matches!(self, SyncMode::Write)
    }
}

/// Arguments for the sync workflow
///
/// Mirrors the CLI Args in a form that does not depend on clap.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncWorkflowArgs {
    /// Directory configured paths are relative to
    pub root: PathBuf,

    pub mode: SyncMode,

    /// Overrides the configured export flag when set
    pub export: Option<bool>,
}

impl Default for SyncWorkflowArgs {
    fn default() -> Self {
        SyncWorkflowArgs {
            root: PathBuf::from("."),
            mode: SyncMode::Write,
            export: None,
        }
    }
}

/// Result of one substitution on one file
#[derive(Debug, Clone, PartialEq)]
pub struct FileReport {
    pub path: PathBuf,
    pub matches: usize,
    pub changed: bool,
}

/// Result of a sync workflow
#[derive(Debug, Clone, PartialEq)]
pub struct SyncReport {
    pub mode: SyncMode,

    /// Extracted values in pipeline order
    pub values: ExtractedValues,

    /// One entry per substitution, in the order applied
    pub files: Vec<FileReport>,

    /// Files whose content differs (or would differ) from before the run
    pub changed: Vec<PathBuf>,

    pub export: Option<ExportReport>,

    pub warnings: Vec<SyncWarning>,
}

impl SyncReport {
    /// Whether `--check` should fail.
    pub fn has_drift(&self) -> bool {
        !self.changed.is_empty()
    }
}

/// Main sync workflow
///
/// Uses the real filesystem under `args.root` in `Write` mode and a
/// buffering overlay on top of it otherwise.
pub fn run_sync_workflow(args: &SyncWorkflowArgs, plan: &Plan) -> Result<SyncReport> {
    let fs = FsStore::new(&args.root);

    if args.mode.writes() {
        let mut store = fs;
        run_with_store(&mut store, plan, args)
    } else {
        let mut store = OverlayStore::new(fs);
        let mut report = run_with_store(&mut store, plan, args)?;
        report.changed = store.changed_paths()?;
        Ok(report)
    }
}

/// Runs the plan against any store.
///
/// Export happens only in `Write` mode and always goes to the real
/// filesystem.
pub fn run_with_store<S: TextStore + ?Sized>(
    store: &mut S,
    plan: &Plan,
    args: &SyncWorkflowArgs,
) -> Result<SyncReport> {
    let export_enabled = args.export.unwrap_or(plan.output.enabled) && args.mode.writes();
    if export_enabled && plan.output.values.is_empty() {
        return Err(SyncError::config(
            "output export requested but no output values are configured",
        ));
    }

    let values = extract_values(&*store, plan)?;

    let rendered = render_targets(plan, &values)?;
    let export_entries = if export_enabled {
        Some(render_output(plan, &values)?)
    } else {
        None
    };

    let mut files = Vec::new();
    let mut warnings = Vec::new();
    for (target, replacement) in &rendered {
        for path in &target.files {
            let result = substituter::replace_in_file(store, path, &target.pattern, replacement)?;
            ui::display_file_result(path, result.matches, result.changed, !args.mode.writes());

            if result.matches == 0 {
                let warning = SyncWarning::NoMatchesInTarget {
                    path: path.clone(),
                    pattern: target.pattern.as_str().to_string(),
                };
                ui::display_warning(&warning);
                warnings.push(warning);
            }

            files.push(FileReport {
                path: path.clone(),
                matches: result.matches,
                changed: result.changed,
            });
        }
    }

    let export = match export_entries {
        Some(entries) => {
            let target = output::resolve_target_from_env(
                &plan.output.env_var,
                &plan.output.fallback_path,
                &args.root,
            );
            if !target.from_env {
                let warning = SyncWarning::OutputFallback {
                    env_var: plan.output.env_var.clone(),
                    path: target.path.clone(),
                };
                ui::display_warning(&warning);
                warnings.push(warning);
            }

            let report = output::append_lines(&target, &entries)?;
            ui::display_export(&report.target.path, &report.lines);
            Some(report)
        }
        None => None,
    };

    let changed = changed_paths(&files);
    info!(
        values = %values,
        substitutions = files.len(),
        changed = changed.len(),
        "sync finished"
    );

    Ok(SyncReport {
        mode: args.mode,
        values,
        files,
        changed,
        export,
        warnings,
    })
}

/// Extracts every step's value in order, printing each one.
///
/// A step whose pattern matches no line aborts the run.
pub fn extract_values<S: TextStore + ?Sized>(store: &S, plan: &Plan) -> Result<ExtractedValues> {
    let mut values = ExtractedValues::new();

    for step in &plan.steps {
        match extractor::extract(store, &step.source, &step.pattern)? {
            Extraction::Found(value) => {
                ui::display_value(&step.name, &value);
                info!(step = %step.name, value = %value, "value extracted");
                values.insert(step.name.clone(), value);
            }
            Extraction::NotFound => {
                return Err(SyncError::NoMatch {
                    name: step.name.clone(),
                    path: step.source.clone(),
                    pattern: step.pattern.as_str().to_string(),
                });
            }
        }
    }

    Ok(values)
}

/// Renders every target's replacement text.
pub fn render_targets<'p>(
    plan: &'p Plan,
    values: &ExtractedValues,
) -> Result<Vec<(&'p Target, String)>> {
    let mut rendered = Vec::new();
    for step in &plan.steps {
        for target in &step.targets {
            rendered.push((target, target.template.render(values)?));
        }
    }
    Ok(rendered)
}

/// Renders the configured output values as `(key, value)` pairs.
pub fn render_output(plan: &Plan, values: &ExtractedValues) -> Result<Vec<(String, String)>> {
    plan.output
        .values
        .iter()
        .map(|(key, template)| {
            let value = template.render(values)?;
            output::format_line(key, &value)?;
            Ok((key.clone(), value))
        })
        .collect()
}

fn changed_paths(files: &[FileReport]) -> Vec<PathBuf> {
    let mut changed: Vec<PathBuf> = Vec::new();
    for file in files.iter().filter(|f| f.changed) {
        if !changed.iter().any(|p| p == &file.path) {
            changed.push(file.path.clone());
        }
    }
    changed
}

/// Paths from a report as borrowed slices, for display.
pub fn changed_refs(report: &SyncReport) -> Vec<&Path> {
    report.changed.iter().map(PathBuf::as_path).collect()
}

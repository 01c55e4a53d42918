//! Pure formatting functions for UI output.
//!
//! Everything operator-facing is printed from here. Diagnostics go through
//! `tracing` instead.

use std::path::Path;

use console::style;

use crate::plan::Plan;
use crate::warnings::SyncWarning;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a non-fatal warning on stderr.
pub fn display_warning(warning: &SyncWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Display an extracted value.
pub fn display_value(name: &str, value: &str) {
    println!("{} = {}", style(name).bold(), style(value).cyan());
}

/// Display the result of substituting into one file.
///
/// # Arguments
/// * `path` - The file as named in the configuration
/// * `matches` - Number of occurrences replaced
/// * `changed` - Whether the content differs from before
/// * `dry_run` - Whether the write was only simulated
pub fn display_file_result(path: &Path, matches: usize, changed: bool, dry_run: bool) {
    let verb = match (changed, dry_run) {
        (true, true) => "would update",
        (true, false) => "updated",
        (false, _) => "up to date",
    };
    let plural = if matches == 1 { "" } else { "es" };

    if changed {
        display_success(&format!(
            "{} {} ({} match{})",
            verb,
            path.display(),
            matches,
            plural
        ));
    } else {
        display_status(&format!(
            "{} {} ({} match{})",
            verb,
            path.display(),
            matches,
            plural
        ));
    }
}

/// Display the exported lines and where they went.
pub fn display_export(path: &Path, lines: &[String]) {
    for line in lines {
        display_success(&format!("exported {} to {}", line, path.display()));
    }
}

/// Display files that differ from what a sync would produce.
pub fn display_drift(paths: &[&Path]) {
    eprintln!(
        "\n{} {} file(s) out of sync:",
        style("✗").red(),
        paths.len()
    );
    for path in paths {
        eprintln!("  - {}", path.display());
    }
}

/// Display the configured pipeline.
pub fn display_plan(plan: &Plan) {
    println!("{}", style("Configured steps:").bold());
    for step in &plan.steps {
        println!(
            "  {} <- {} ({})",
            style(&step.name).bold(),
            step.source.display(),
            step.pattern.as_str()
        );
        for target in &step.targets {
            for file in &target.files {
                println!(
                    "      {} {}: '{}' -> '{}'",
                    style("→").yellow(),
                    file.display(),
                    target.pattern.as_str(),
                    target.template.as_str()
                );
            }
        }
    }

    if plan.output.enabled && !plan.output.values.is_empty() {
        println!(
            "{} (${} or {})",
            style("Exported values:").bold(),
            plan.output.env_var,
            plan.output.fallback_path
        );
        for (key, template) in &plan.output.values {
            println!("  {}={}", key, template.as_str());
        }
    } else {
        println!("{}", style("Output export disabled").dim());
    }
}

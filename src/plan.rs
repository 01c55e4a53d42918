//! Validated, compiled form of a [Config].
//!
//! Compiling checks everything that can be checked without reading a file,
//! so a bad pattern or a template naming an unknown value aborts the run
//! before anything is touched.

use std::collections::HashSet;
use std::path::PathBuf;

use crate::config::Config;
use crate::domain::{is_placeholder_name, LinePattern, SubstitutionPattern, Template};
use crate::error::{Result, SyncError};

#[derive(Debug, Clone)]
pub struct Plan {
    pub steps: Vec<Step>,
    pub output: OutputPlan,
}

#[derive(Debug, Clone)]
pub struct Step {
    pub name: String,
    pub source: PathBuf,
    pub pattern: LinePattern,
    pub targets: Vec<Target>,
}

#[derive(Debug, Clone)]
pub struct Target {
    pub files: Vec<PathBuf>,
    pub pattern: SubstitutionPattern,
    pub template: Template,
}

#[derive(Debug, Clone)]
pub struct OutputPlan {
    pub enabled: bool,
    pub env_var: String,
    pub fallback_path: String,
    pub values: Vec<(String, Template)>,
}

impl Plan {
    pub fn compile(config: &Config) -> Result<Self> {
        if config.steps.is_empty() {
            return Err(SyncError::config("no steps configured"));
        }

        let mut known: HashSet<&str> = HashSet::new();
        let mut steps = Vec::with_capacity(config.steps.len());

        for step in &config.steps {
            if step.name.is_empty() {
                return Err(SyncError::config("step name must not be empty"));
            }
            if !is_placeholder_name(&step.name) {
                return Err(SyncError::config(format!(
                    "step name '{}' cannot be used as a {{placeholder}}; use letters, digits and '_'",
                    step.name
                )));
            }
            if !known.insert(step.name.as_str()) {
                return Err(SyncError::config(format!(
                    "duplicate step name '{}'",
                    step.name
                )));
            }

            let pattern = LinePattern::new(&step.pattern)?;

            let mut targets = Vec::with_capacity(step.targets.len());
            for target in &step.targets {
                if target.files.is_empty() {
                    return Err(SyncError::config(format!(
                        "step '{}' has a target with no files",
                        step.name
                    )));
                }
                let template = Template::parse(&target.template);
                check_placeholders(&template, &known, &format!("step '{}'", step.name))?;

                targets.push(Target {
                    files: target.files.iter().map(PathBuf::from).collect(),
                    pattern: SubstitutionPattern::new(&target.pattern)?,
                    template,
                });
            }

            steps.push(Step {
                name: step.name.clone(),
                source: PathBuf::from(&step.source),
                pattern,
                targets,
            });
        }

        let mut values = Vec::with_capacity(config.output.values.len());
        for value in &config.output.values {
            let key = &value.key;
            if key.is_empty() || key.contains('=') || key.contains('\n') {
                return Err(SyncError::config(format!("invalid output key '{}'", key)));
            }
            if values.iter().any(|(existing, _)| existing == key) {
                return Err(SyncError::config(format!("duplicate output key '{}'", key)));
            }
            let template = Template::parse(&value.value);
            check_placeholders(&template, &known, &format!("output '{}'", key))?;
            values.push((key.clone(), template));
        }

        if config.output.enabled && values.is_empty() {
            return Err(SyncError::config(
                "output is enabled but no output values are configured",
            ));
        }
        if !values.is_empty() && config.output.env_var.is_empty() {
            return Err(SyncError::config("output env_var must not be empty"));
        }

        Ok(Plan {
            steps,
            output: OutputPlan {
                enabled: config.output.enabled,
                env_var: config.output.env_var.clone(),
                fallback_path: config.output.fallback_path.clone(),
                values,
            },
        })
    }
}

/// Every placeholder must name a value extracted by the current step or an
/// earlier one, and no brace group may be a misspelled placeholder that would
/// otherwise be written out literally.
fn check_placeholders(template: &Template, known: &HashSet<&str>, owner: &str) -> Result<()> {
    if let Some(group) = template.malformed_placeholders().first() {
        return Err(SyncError::config(format!(
            "{} template '{}' contains '{}', which is not a valid placeholder",
            owner,
            template.as_str(),
            group
        )));
    }
    for name in template.placeholders() {
        if !known.contains(name.as_str()) {
            return Err(SyncError::config(format!(
                "{} template '{}' refers to '{}', which is not extracted by this or an earlier step",
                owner,
                template.as_str(),
                name
            )));
        }
    }
    Ok(())
}

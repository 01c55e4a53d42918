use std::sync::OnceLock;

use regex::{Captures, Regex};

use super::ExtractedValues;
use crate::error::{Result, SyncError};

fn placeholder_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("placeholder regex is valid")
    })
}

/// Brace groups that look like a placeholder but are not a valid name,
/// e.g. `{rust-version}`.
fn near_placeholder_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\{([A-Za-z_][^{}\s]*)\}").expect("near-placeholder regex is valid")
    })
}

/// Whether `name` can be referenced as `{name}` in a template.
pub fn is_placeholder_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Replacement text with `{name}` placeholders.
///
/// Anything that is not a `{identifier}` is kept literally, so templates can
/// hold regex-looking text or stray braces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    raw: String,
    placeholders: Vec<String>,
}

impl Template {
    pub fn parse(raw: &str) -> Self {
        let mut placeholders: Vec<String> = Vec::new();
        for caps in placeholder_regex().captures_iter(raw) {
            let name = caps[1].to_string();
            if !placeholders.contains(&name) {
                placeholders.push(name);
            }
        }

        Template {
            raw: raw.to_string(),
            placeholders,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Brace groups such as `{rust-version}` that would be written out
    /// literally because their content is not a valid placeholder name.
    pub fn malformed_placeholders(&self) -> Vec<&str> {
        near_placeholder_regex()
            .find_iter(&self.raw)
            .map(|m| m.as_str())
            .filter(|group| !is_placeholder_name(&group[1..group.len() - 1]))
            .collect()
    }

    /// Distinct placeholder names, in order of first appearance.
    pub fn placeholders(&self) -> &[String] {
        &self.placeholders
    }

    /// Substitutes every placeholder with its extracted value.
    ///
    /// Fails if any placeholder has no value, rather than rendering a
    /// partial string.
    pub fn render(&self, values: &ExtractedValues) -> Result<String> {
        if let Some(missing) = self.placeholders.iter().find(|p| !values.contains(p)) {
            return Err(SyncError::template(format!(
                "no value named '{}' for template '{}'",
                missing, self.raw
            )));
        }

        let rendered = placeholder_regex().replace_all(&self.raw, |caps: &Captures| {
            values.get(&caps[1]).unwrap_or_default().to_string()
        });
        Ok(rendered.into_owned())
    }
}

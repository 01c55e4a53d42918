use regex::Regex;

use crate::error::{Result, SyncError};

/// Pattern used to pull a single value out of a line.
///
/// The expression is anchored at the start of the line and must contain
/// exactly one capturing group.
#[derive(Debug, Clone)]
pub struct LinePattern {
    source: String,
    regex: Regex,
}

impl LinePattern {
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(&format!("^(?:{})", pattern))
            .map_err(|e| SyncError::pattern(pattern, e))?;

        // captures_len counts the implicit whole-match group
        let groups = regex.captures_len() - 1;
        if groups != 1 {
            return Err(SyncError::config(format!(
                "extraction pattern '{}' must contain exactly one capturing group, found {}",
                pattern, groups
            )));
        }

        Ok(LinePattern {
            source: pattern.to_string(),
            regex,
        })
    }

    /// The pattern as written, without the anchor.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Returns the captured value if the line matches from its first byte.
    pub fn capture<'a>(&self, line: &'a str) -> Option<&'a str> {
        self.regex
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

/// Pattern replaced everywhere it occurs in a target file.
#[derive(Debug, Clone)]
pub struct SubstitutionPattern {
    regex: Regex,
}

impl SubstitutionPattern {
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|e| SyncError::pattern(pattern, e))?;
        Ok(SubstitutionPattern { regex })
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }
}

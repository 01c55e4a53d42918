use std::collections::BTreeMap;
use std::fmt;

/// Outcome of scanning a source file for a value.
///
/// Absence is a distinct case so callers have to decide what it means
/// instead of letting an empty string flow into a replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Found(String),
    NotFound,
}

impl Extraction {
    pub fn is_found(&self) -> bool {
        matches!(self, Extraction::Found(_))
    }
}

/// Values extracted so far in a run, keyed by step name.
///
/// Insertion order is kept so reports list values in pipeline order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedValues {
    order: Vec<String>,
    values: BTreeMap<String, String>,
}

impl ExtractedValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a value. Re-inserting a name overwrites the value but keeps
    /// its original position.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        if !self.values.contains_key(&name) {
            self.order.push(name.clone());
        }
        self.values.insert(name, value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterates `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.order
            .iter()
            .map(move |name| (name.as_str(), self.values[name].as_str()))
    }
}

impl fmt::Display for ExtractedValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "(none)");
        }
        let mut first = true;
        for (name, value) in self.iter() {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", name, value)?;
            first = false;
        }
        Ok(())
    }
}

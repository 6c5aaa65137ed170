use std::fmt;

use serde::{Deserialize, Serialize};

/// Ordered list of identifiers read from one reference file.
///
/// Positions matter and duplicates are allowed, so this is not a set. The
/// optional `source` label (usually a file path) is only used in messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifierList {
    entries: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    source: Option<String>,
}

impl IdentifierList {
    pub fn new(entries: Vec<String>) -> Self {
        Self {
            entries,
            source: None,
        }
    }

    /// Attaches a source label such as the file the entries were read from.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Entry at a 1-based position.
    pub fn get(&self, position: usize) -> Option<&str> {
        position
            .checked_sub(1)
            .and_then(|idx| self.entries.get(idx))
            .map(String::as_str)
    }

    /// Entries in sorted order, used for multiset comparison.
    pub fn sorted(&self) -> Vec<&str> {
        let mut sorted: Vec<&str> = self.iter().collect();
        sorted.sort_unstable();
        sorted
    }
}

impl From<Vec<String>> for IdentifierList {
    fn from(entries: Vec<String>) -> Self {
        Self::new(entries)
    }
}

impl<S: Into<String>> FromIterator<S> for IdentifierList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for IdentifierList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Some(source) => write!(f, "{} ({} entries)", source, self.entries.len()),
            None => write!(f, "{} entries", self.entries.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_are_one_based() {
        let list: IdentifierList = ["Ada", "Grace"].into_iter().collect();
        assert_eq!(list.get(1), Some("Ada"));
        assert_eq!(list.get(2), Some("Grace"));
        assert_eq!(list.get(0), None);
        assert_eq!(list.get(3), None);
    }

    #[test]
    fn sorted_keeps_duplicates() {
        let list: IdentifierList = ["b", "a", "b"].into_iter().collect();
        assert_eq!(list.sorted(), vec!["a", "b", "b"]);
        assert_eq!(list.as_slice(), ["b", "a", "b"]);
    }

    #[test]
    fn display_includes_source() {
        let list = IdentifierList::from(vec!["x".to_string()]).with_source("team.csv");
        assert_eq!(list.to_string(), "team.csv (1 entries)");
        assert_eq!(list.source(), Some("team.csv"));
    }
}

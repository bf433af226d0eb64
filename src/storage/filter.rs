use regex::{Regex, RegexBuilder};

use crate::model::Transaction;

/// Filter document passed to the record store.
#[derive(Debug, Clone)]
pub enum RecordFilter {
    All,
    /// Case-insensitive literal substring match on title or description.
    Text(TextMatch),
}

#[derive(Debug, Clone)]
pub enum TextMatch {
    Pattern(Regex),
    /// Needles too large to compile are compared by lowercasing both sides.
    Folded(String),
}

impl TextMatch {
    pub fn is_match(&self, haystack: &str) -> bool {
        match self {
            Self::Pattern(pattern) => pattern.is_match(haystack),
            Self::Folded(needle) => haystack.to_lowercase().contains(needle.as_str()),
        }
    }
}

impl RecordFilter {
    pub fn text(needle: &str) -> Self {
        let matcher = match RegexBuilder::new(&regex::escape(needle))
            .case_insensitive(true)
            .build()
        {
            Ok(pattern) => TextMatch::Pattern(pattern),
            Err(_) => TextMatch::Folded(needle.to_lowercase()),
        };

        Self::Text(matcher)
    }

    pub fn matches(&self, record: &Transaction) -> bool {
        match self {
            Self::All => true,
            Self::Text(text) => text.is_match(&record.title) || text.is_match(&record.description),
        }
    }
}

/*!
 * Data model shared by the locator, planner and executor.
 */

use serde::{Deserialize, Serialize};
use std::fmt;

/// One reviewed original/translated text unit from a translation document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentencePair {
    /// Text as it was extracted from the source file
    pub original: String,
    /// Reviewed translation
    pub translated: String,
}

impl SentencePair {
    /// Create a new sentence pair
    pub fn new(original: impl Into<String>, translated: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            translated: translated.into(),
        }
    }

    /// A pair whose translation equals its original needs no merge
    pub fn is_noop(&self) -> bool {
        self.original == self.translated
    }
}

/// A sentence pair resolved to a byte range of the file content
///
/// Only the planner constructs these, so `start <= end <= content.len()`
/// always holds for the content the location was resolved against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentenceLocation {
    pub(crate) start: usize,
    pub(crate) end: usize,
    pub(crate) original: String,
    pub(crate) translated: String,
}

impl SentenceLocation {
    /// Start byte offset (inclusive)
    pub fn start(&self) -> usize {
        self.start
    }

    /// End byte offset (exclusive)
    pub fn end(&self) -> usize {
        self.end
    }

    /// Stored original sentence
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Translation to substitute
    pub fn translated(&self) -> &str {
        &self.translated
    }
}

impl fmt::Display for SentenceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}::{}", self.start, self.end, self.original)
    }
}

/// Ordered, non-overlapping replacement spans for one file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergePlan {
    locations: Vec<SentenceLocation>,
}

impl MergePlan {
    pub(crate) fn push(&mut self, location: SentenceLocation) {
        debug_assert!(
            self.locations.last().is_none_or(|prev| prev.end <= location.start),
            "plan locations must not overlap"
        );
        self.locations.push(location);
    }

    /// Resolved locations in file order
    pub fn locations(&self) -> &[SentenceLocation] {
        &self.locations
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SentenceLocation> {
        self.locations.iter()
    }
}

impl<'a> IntoIterator for &'a MergePlan {
    type Item = &'a SentenceLocation;
    type IntoIter = std::slice::Iter<'a, SentenceLocation>;

    fn into_iter(self) -> Self::IntoIter {
        self.locations.iter()
    }
}

impl IntoIterator for MergePlan {
    type Item = SentenceLocation;
    type IntoIter = std::vec::IntoIter<SentenceLocation>;

    fn into_iter(self) -> Self::IntoIter {
        self.locations.into_iter()
    }
}

/// Outcome of applying a plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeResult {
    /// Merged file content
    pub output: String,
    /// Locations the caller declined, in file order
    pub skipped: Vec<SentenceLocation>,
}

impl MergeResult {
    /// True when every planned sentence was merged
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

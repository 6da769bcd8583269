/*!
 * Sentence locator.
 *
 * Finds the byte range of a stored sentence in file content that may have
 * drifted since the sentence was extracted. The start is anchored on the
 * longest prefix of the sentence found at or after the search floor, the
 * end on the longest suffix found at or after the resolved start.
 *
 * Both searches shrink the target one character at a time, so a sentence of
 * n characters costs at most n substring searches.
 */

use log::{debug, trace};

use crate::errors::LocationError;

/// Offset of the longest prefix of `target` occurring at or after `floor`
pub fn find_start(content: &str, floor: usize, target: &str) -> Option<usize> {
    let haystack = content.get(floor..)?;
    let mut prefix = target;

    loop {
        if let Some(offset) = haystack.find(prefix) {
            if prefix.len() < target.len() {
                debug!(
                    "Start anchored on a {}/{} byte prefix at {}",
                    prefix.len(),
                    target.len(),
                    floor + offset
                );
            }
            return Some(floor + offset);
        }

        let mut chars = prefix.chars();
        chars.next_back();
        prefix = chars.as_str();
        trace!("Start search shrunk to {:?}", prefix);

        if prefix.is_empty() {
            return None;
        }
    }
}

/// Offset just past the longest suffix of `target` occurring at or after `floor`
pub fn find_end(content: &str, floor: usize, target: &str) -> Option<usize> {
    let haystack = content.get(floor..)?;
    let mut suffix = target;

    loop {
        if let Some(offset) = haystack.find(suffix) {
            if suffix.len() < target.len() {
                debug!(
                    "End anchored on a {}/{} byte suffix at {}",
                    suffix.len(),
                    target.len(),
                    floor + offset
                );
            }
            return Some(floor + offset + suffix.len());
        }

        let mut chars = suffix.chars();
        chars.next();
        suffix = chars.as_str();
        trace!("End search shrunk to {:?}", suffix);

        if suffix.is_empty() {
            return None;
        }
    }
}

/// Resolve `target` to a `(start, end)` byte range at or after `floor`
///
/// The range is not checked for `start <= end`; the planner owns that check.
pub fn locate(content: &str, floor: usize, target: &str) -> Result<(usize, usize), LocationError> {
    let start = find_start(content, floor, target).ok_or_else(|| LocationError::StartNotFound {
        sentence: target.to_string(),
        floor,
    })?;

    let end = find_end(content, start, target).ok_or_else(|| LocationError::EndNotFound {
        sentence: target.to_string(),
        floor: start,
    })?;

    Ok((start, end))
}

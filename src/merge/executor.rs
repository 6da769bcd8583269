/*!
 * Merge executor.
 *
 * Applies a plan to the content it was built from. The caller decides per
 * location whether to substitute the translation; declined locations keep
 * the file's own text and are reported back as skipped.
 */

use log::debug;

use crate::merge::model::{MergePlan, MergeResult};

/// Apply `plan` to `content`
///
/// `decide` receives the file text currently covering the location and the
/// translation, and returns true to merge. `plan` must have been built
/// against this exact `content`.
pub fn execute<F>(content: &str, plan: MergePlan, mut decide: F) -> MergeResult
where
    F: FnMut(&str, &str) -> bool,
{
    let mut output = String::with_capacity(content.len());
    let mut skipped = Vec::new();
    let mut cursor = 0;

    for location in plan {
        output.push_str(&content[cursor..location.start]);
        cursor = location.end;

        let current = &content[location.start..location.end];
        if decide(current, &location.translated) {
            output.push_str(&location.translated);
        } else {
            output.push_str(current);
            debug!("Skipped location {}", location);
            skipped.push(location);
        }
    }

    output.push_str(&content[cursor..]);

    MergeResult { output, skipped }
}

/// Decision function that merges every location
pub fn accept_all(_current: &str, _translated: &str) -> bool {
    true
}

/// Decision function that declines every location
pub fn reject_all(_current: &str, _translated: &str) -> bool {
    false
}

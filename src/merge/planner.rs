/*!
 * Merge planner.
 *
 * Walks the sentence pairs in document order and resolves each one to a
 * span of the file content. Every lookup starts at the end of the previous
 * span, so the resulting plan is ordered and non-overlapping.
 */

use log::{debug, info};

use crate::errors::LocationError;
use crate::merge::locator;
use crate::merge::model::{MergePlan, SentenceLocation, SentencePair};

/// Build a merge plan, logging each resolved location
pub fn plan(content: &str, pairs: &[SentencePair]) -> Result<MergePlan, LocationError> {
    plan_with_observer(content, pairs, |location| info!("{}", location))
}

/// Build a merge plan, reporting each resolved location to `on_resolved`
///
/// Pairs whose original equals their translation are skipped before any
/// lookup. The first failure aborts planning.
pub fn plan_with_observer<F>(
    content: &str,
    pairs: &[SentencePair],
    mut on_resolved: F,
) -> Result<MergePlan, LocationError>
where
    F: FnMut(&SentenceLocation),
{
    let mut plan = MergePlan::default();
    let mut search_floor = 0;

    for (index, pair) in pairs.iter().enumerate() {
        if pair.is_noop() {
            debug!("Sentence {} is unchanged, nothing to merge", index);
            continue;
        }

        let (start, end) = locator::locate(content, search_floor, &pair.original)?;

        if start > end {
            return Err(LocationError::InvalidRange {
                sentence: pair.original.clone(),
                start,
                end,
            });
        }

        let location = SentenceLocation {
            start,
            end,
            original: pair.original.clone(),
            translated: pair.translated.clone(),
        };
        on_resolved(&location);

        search_floor = end;
        plan.push(location);
    }

    Ok(plan)
}

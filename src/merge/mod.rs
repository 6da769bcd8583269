/*!
 * Core merge engine.
 *
 * Merging runs in two linear passes over one file:
 *
 * - `locator`: shrink search that anchors a stored sentence in drifted content
 * - `planner`: resolves every sentence pair to a span, in document order
 * - `executor`: applies the spans, asking a decision function per span
 * - `model`: sentence pairs, locations, plans and results
 */

// Re-export main types for easier usage
pub use self::executor::{accept_all, execute, reject_all};
pub use self::locator::locate;
pub use self::model::{MergePlan, MergeResult, SentenceLocation, SentencePair};
pub use self::planner::{plan, plan_with_observer};

// Submodules
pub mod executor;
pub mod locator;
pub mod model;
pub mod planner;

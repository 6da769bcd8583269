/*!
 * # tlmerge - Translation Merge Tool
 *
 * A Rust library for merging human-reviewed translations back into the
 * source files they were extracted from.
 *
 * ## Features
 *
 * - Fetch translation documents from a Couchbase bucket or a local JSON record
 * - Locate each stored sentence in the file, tolerating drift since extraction
 * - Confirm every replacement interactively, or accept all of them
 * - Report declined sentences with their offsets for manual follow-up
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `merge`: Sentence locator, merge planner and merge executor:
 *   - `merge::locator`: Shrink search anchoring sentences in drifted content
 *   - `merge::planner`: Ordered, non-overlapping replacement spans
 *   - `merge::executor`: Applies spans through a decision function
 * - `store`: Document store clients:
 *   - `store::couchbase`: Couchbase Server REST client
 *   - `store::mock`: In-memory store
 * - `prompt`: Interactive yes/no confirmation
 * - `file_utils`: File system operations and URI-to-path mapping
 * - `app_controller`: Main application controller
 * - `language_utils`: ISO language code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod merge;
pub mod prompt;
pub mod store;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, MergeOptions, MergeOutcome, MergeReport};
pub use errors::{LocationError, StoreError};
pub use merge::{MergePlan, MergeResult, SentenceLocation, SentencePair};
pub use prompt::Prompter;
pub use store::{DocumentStore, TranslationDocument};

/*!
 * Document store access.
 *
 * Translation documents live in a key-value store, one record per source
 * file. This module defines the store interface and turns raw records into
 * the `TranslationDocument` the merge engine consumes:
 * - `couchbase`: Couchbase Server REST client
 * - `mock`: in-memory store for tests and offline runs
 */

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt::Debug;

use crate::errors::StoreError;
use crate::merge::SentencePair;

pub mod couchbase;
pub mod mock;

pub use couchbase::CouchbaseStore;
pub use mock::InMemoryStore;

/// Common trait for key-value stores holding translation records
#[async_trait]
pub trait DocumentStore: Send + Sync + Debug {
    /// Fetch the raw JSON record stored under `id`
    async fn fetch_record(&self, id: &str) -> Result<Value, StoreError>;
}

/// Translation document for one source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationDocument {
    /// Store key of the record
    pub id: String,
    /// Location of the source file the sentences were extracted from
    pub uri: String,
    /// Sentence pairs in file order
    pub sentences: Vec<SentencePair>,
}

#[derive(Debug, Deserialize)]
struct RawRecord {
    uri: String,
    sentences: Vec<RawSentence>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawSentence {
    Pair { original: String, translated: String },
    Localized { txt: HashMap<String, Value> },
}

impl TranslationDocument {
    /// Build a document from a raw store record
    ///
    /// Sentences are either `{original, translated}` objects or `{txt: {..}}`
    /// objects keyed by language code, read with `source_language` and
    /// `target_language`.
    pub fn from_record(
        id: impl Into<String>,
        record: Value,
        source_language: &str,
        target_language: &str,
    ) -> Result<Self, StoreError> {
        let raw: RawRecord = serde_json::from_value(record)
            .map_err(|e| StoreError::InvalidDocument(e.to_string()))?;

        let sentences = raw
            .sentences
            .into_iter()
            .enumerate()
            .map(|(index, sentence)| match sentence {
                RawSentence::Pair { original, translated } => Ok(SentencePair { original, translated }),
                RawSentence::Localized { txt } => {
                    let text = |language: &str| {
                        txt.get(language)
                            .and_then(Value::as_str)
                            .map(str::to_string)
                            .ok_or_else(|| {
                                StoreError::InvalidDocument(format!(
                                    "sentence {} has no '{}' text",
                                    index, language
                                ))
                            })
                    };
                    Ok(SentencePair {
                        original: text(source_language)?,
                        translated: text(target_language)?,
                    })
                }
            })
            .collect::<Result<Vec<_>, StoreError>>()?;

        Ok(Self {
            id: id.into(),
            uri: raw.uri,
            sentences,
        })
    }

    /// Number of sentences whose translation differs from the original
    pub fn changed_count(&self) -> usize {
        self.sentences.iter().filter(|s| !s.is_noop()).count()
    }
}

/// Fetch `id` from `store` and parse it as a translation document
pub async fn fetch_document(
    store: &dyn DocumentStore,
    id: &str,
    source_language: &str,
    target_language: &str,
) -> Result<TranslationDocument, StoreError> {
    let record = store.fetch_record(id).await?;
    TranslationDocument::from_record(id, record, source_language, target_language)
}

use anyhow::{anyhow, Context, Result};
use log::{debug, info, warn};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use crate::app_config::Config;
use crate::file_utils::FileManager;
use crate::language_utils;
use crate::merge::{self, SentenceLocation};
use crate::prompt::Prompter;
use crate::store::{self, DocumentStore, TranslationDocument};

// @module: Application controller for merging reviewed translations

/// Inputs of one merge run
#[derive(Debug, Clone, Default)]
pub struct MergeOptions {
    /// File to merge into; derived from the document URI when absent
    pub file: Option<PathBuf>,
    /// Document id; prompted for when absent
    pub doc: Option<String>,
    /// Local JSON record used instead of the document store
    pub doc_file: Option<PathBuf>,
    /// Regex applied to the document URI to derive the file path
    pub file_uri_regex: Option<String>,
    /// Replacement for `file_uri_regex` matches
    pub file_uri_replace: Option<String>,
}

/// Summary of a completed merge run
#[derive(Debug, Clone)]
pub struct MergeReport {
    /// File the document was merged into
    pub file: PathBuf,
    /// Number of planned replacements
    pub planned: usize,
    /// Number of replacements accepted
    pub merged: usize,
    /// Replacements the operator declined
    pub skipped: Vec<SentenceLocation>,
    /// Whether the merged content was written back
    pub written: bool,
    /// Merged content
    pub output: String,
}

/// How a merge run ended
#[derive(Debug, Clone)]
pub enum MergeOutcome {
    /// Operator declined the derived file
    Quit,
    /// Merge ran to the overwrite decision
    Completed(MergeReport),
}

/// Main application controller for merging translations
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self { config })
    }

    /// Controller configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run one merge: load the document, plan, confirm each sentence, write
    ///
    /// A planning failure aborts before anything is written.
    pub async fn run<R: BufRead, W: Write>(
        &self,
        options: MergeOptions,
        store: &dyn DocumentStore,
        prompter: &mut Prompter<R, W>,
    ) -> Result<MergeOutcome> {
        let document = self.load_document(&options, store, prompter).await?;
        info!(
            "Loaded document {} with {} sentences ({} to merge)",
            document.id,
            document.sentences.len(),
            document.changed_count()
        );

        let file = match options.file.clone() {
            Some(file) => file,
            None => {
                let file = FileManager::path_from_uri(
                    &document.uri,
                    options.file_uri_regex.as_deref(),
                    options.file_uri_replace.as_deref(),
                )?;
                if !prompter.confirm_file(&file.to_string_lossy())? {
                    prompter.say("Quit.")?;
                    return Ok(MergeOutcome::Quit);
                }
                file
            }
        };

        let language = language_utils::get_language_name(&self.config.target_language)
            .unwrap_or_else(|_| self.config.target_language.clone());
        info!("Merging {} translations into {:?}", language, file);

        let content = FileManager::read_to_string(&file)?;
        let plan = merge::plan(&content, &document.sentences)
            .with_context(|| format!("Failed to locate sentences in {:?}", file))?;
        let planned = plan.len();
        debug!("Planned {} replacements", planned);

        let mut prompt_error: Option<io::Error> = None;
        let result = merge::execute(&content, plan, |current, translated| {
            if prompt_error.is_some() {
                return false;
            }
            match prompter.confirm_merge(current, translated) {
                Ok(true) => true,
                Ok(false) => {
                    if let Err(e) = prompter.say("Skipped a sentence.") {
                        prompt_error = Some(e);
                    }
                    false
                }
                Err(e) => {
                    prompt_error = Some(e);
                    false
                }
            }
        });
        if let Some(e) = prompt_error {
            return Err(anyhow!(e).context("Failed to read merge confirmation"));
        }

        let written = if prompter.confirm_overwrite(&file.to_string_lossy())? {
            FileManager::write_to_file(&file, &result.output)?;
            prompter.say("## Done.")?;

            if !result.skipped.is_empty() {
                warn!("{} sentences were not merged", result.skipped.len());
                prompter.say("## These sentences were not merged. Please merge it manually:")?;
                for location in &result.skipped {
                    prompter.say(&format!("{}: {}", location.start(), location.original()))?;
                }
            }
            true
        } else {
            prompter.say("## Just showing the result:")?;
            prompter.say(&result.output)?;
            false
        };

        Ok(MergeOutcome::Completed(MergeReport {
            file,
            planned,
            merged: planned - result.skipped.len(),
            skipped: result.skipped,
            written,
            output: result.output,
        }))
    }

    /// Load the translation document from a local record or the store
    async fn load_document<R: BufRead, W: Write>(
        &self,
        options: &MergeOptions,
        store: &dyn DocumentStore,
        prompter: &mut Prompter<R, W>,
    ) -> Result<TranslationDocument> {
        let source = &self.config.source_language;
        let target = &self.config.target_language;

        if let Some(path) = &options.doc_file {
            let record = FileManager::read_json(path)?;
            let id = options
                .doc
                .clone()
                .unwrap_or_else(|| path.to_string_lossy().into_owned());
            return Ok(TranslationDocument::from_record(id, record, source, target)?);
        }

        let id = match options.doc.as_deref().filter(|d| !d.is_empty()) {
            Some(id) => id.to_string(),
            None => prompter.ask_document_id()?,
        };
        if id.is_empty() {
            return Err(anyhow!("A translation document id is required"));
        }

        store::fetch_document(store, &id, source, target)
            .await
            .with_context(|| format!("Failed to load translation document {}", id))
    }
}

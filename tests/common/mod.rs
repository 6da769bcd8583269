/*!
 * Common test utilities for the tlmerge test suite
 */

use anyhow::Result;
use serde_json::{json, Value};
use std::fs;
use std::io::{self, BufReader, Cursor, Read};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tlmerge::Prompter;

/// Prompter reading scripted answers and capturing its output
pub type ScriptedPrompter = Prompter<Cursor<Vec<u8>>, Vec<u8>>;

/// Installs a test logger once per process
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates a prompter answering with the given lines in order
pub fn scripted_prompter(answers: &[&str]) -> ScriptedPrompter {
    let mut input = answers.join("\n");
    input.push('\n');
    Prompter::new(Cursor::new(input.into_bytes()), Vec::new())
}

/// Input that yields one line and then fails every read
pub struct FailingInput {
    first_line: Option<Vec<u8>>,
}

impl Read for FailingInput {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.first_line.take() {
            Some(line) => {
                let len = line.len().min(buf.len());
                buf[..len].copy_from_slice(&line[..len]);
                Ok(len)
            }
            None => Err(io::Error::other("input closed")),
        }
    }
}

/// Creates a prompter whose second answer fails to read
pub fn failing_prompter(first_answer: &str) -> Prompter<BufReader<FailingInput>, Vec<u8>> {
    let input = FailingInput {
        first_line: Some(format!("{}\n", first_answer).into_bytes()),
    };
    Prompter::new(BufReader::new(input), Vec::new())
}

/// Everything the prompter printed so far
pub fn printed(prompter: &ScriptedPrompter) -> String {
    String::from_utf8_lossy(prompter.output()).into_owned()
}

/// Builds a raw record in the stored `txt` layout
pub fn localized_record(uri: &str, pairs: &[(&str, &str)]) -> Value {
    let sentences: Vec<Value> = pairs
        .iter()
        .map(|(en, ja)| json!({ "txt": { "en": en, "ja": ja } }))
        .collect();
    json!({ "uri": uri, "sentences": sentences })
}

use anyhow::{anyhow, Context, Result};
use regex::Regex;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

// @module: File utilities for merge targets and offline records

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    /// Read a UTF-8 file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write a string to a file, replacing its content
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))
    }

    /// Read a raw translation record from a JSON file
    pub fn read_json<P: AsRef<Path>>(path: P) -> Result<Value> {
        let content = Self::read_to_string(&path)?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON file: {:?}", path.as_ref()))
    }

    /// Map a document URI to a local file path
    ///
    /// Every match of `pattern` in `uri` is replaced with `replacement`
    /// (`$1`-style group references are expanded). Without a pattern the URI
    /// is used as-is.
    pub fn path_from_uri(uri: &str, pattern: Option<&str>, replacement: Option<&str>) -> Result<PathBuf> {
        let mapped = match pattern.filter(|p| !p.is_empty()) {
            Some(pattern) => {
                let regex = Regex::new(pattern)
                    .with_context(|| format!("Invalid file URI regex: {}", pattern))?;
                regex.replace_all(uri, replacement.unwrap_or_default()).into_owned()
            }
            None => uri.to_string(),
        };

        if mapped.trim().is_empty() {
            return Err(anyhow!("Document URI {:?} maps to an empty file path", uri));
        }

        Ok(PathBuf::from(mapped))
    }
}

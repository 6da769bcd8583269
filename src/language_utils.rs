//! Language key utilities
//!
//! Stored sentences are keyed by language code (`"en"`, `"ja"`, ...). These
//! helpers validate such keys against ISO 639-1 and ISO 639-2 and compare
//! them regardless of which form was used.

use anyhow::{anyhow, Result};
use isolang::Language;

/// ISO 639-2/B codes that differ from their ISO 639-2/T form
const BIBLIOGRAPHIC_CODES: &[(&str, &str)] = &[
    ("fre", "fra"),
    ("ger", "deu"),
    ("dut", "nld"),
    ("gre", "ell"),
    ("chi", "zho"),
    ("cze", "ces"),
    ("ice", "isl"),
    ("alb", "sqi"),
    ("arm", "hye"),
    ("baq", "eus"),
    ("bur", "mya"),
    ("per", "fas"),
    ("geo", "kat"),
    ("may", "msa"),
    ("mac", "mkd"),
    ("rum", "ron"),
    ("slo", "slk"),
    ("wel", "cym"),
];

/// Resolve a 2- or 3-letter language code
fn resolve(code: &str) -> Option<Language> {
    let normalized = code.trim().to_lowercase();

    match normalized.len() {
        2 => Language::from_639_1(&normalized),
        3 => {
            let terminological = BIBLIOGRAPHIC_CODES
                .iter()
                .find(|(bibliographic, _)| *bibliographic == normalized)
                .map_or(normalized.as_str(), |(_, terminological)| *terminological);
            Language::from_639_3(terminological)
        }
        _ => None,
    }
}

/// Validate a language key, returning its ISO 639-2/T form
pub fn validate_language_code(code: &str) -> Result<String> {
    resolve(code)
        .map(|lang| lang.to_639_3().to_string())
        .ok_or_else(|| anyhow!("Invalid language code: {}", code))
}

/// Check if two language codes name the same language
pub fn language_codes_match(code1: &str, code2: &str) -> bool {
    match (resolve(code1), resolve(code2)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Get the English language name for a code
pub fn get_language_name(code: &str) -> Result<String> {
    resolve(code)
        .map(|lang| lang.to_name().to_string())
        .ok_or_else(|| anyhow!("Failed to get language from code: {}", code))
}

//! Source language detection from the locale file name

use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

/// Language assumed when the file name does not look like a language code
pub const DEFAULT_SOURCE_LANGUAGE: &str = "en";

static LANGUAGE_FILE_STEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([a-z]{2})(?:-[A-Z]{2})?$").expect("valid regex"));

/// Guess the source language from a locale file name
///
/// The extension is stripped and the remaining stem must look like `xx` or
/// `xx-YY`. In that case the two-letter language code is returned:
/// - `en.json` → `en`
/// - `pt-BR.json` → `pt`
/// - `messages.json` → `en` (default)
pub fn detect_source_language(filename: &str) -> String {
    Path::new(filename)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .and_then(|stem| LANGUAGE_FILE_STEM.captures(stem))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| DEFAULT_SOURCE_LANGUAGE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_language_code() {
        assert_eq!(detect_source_language("fr.json"), "fr");
        assert_eq!(detect_source_language("de.yaml"), "de");
        assert_eq!(detect_source_language("ja"), "ja");
    }

    #[test]
    fn test_language_with_region() {
        assert_eq!(detect_source_language("en-US.json"), "en");
        assert_eq!(detect_source_language("pt-BR.json"), "pt");
    }

    #[test]
    fn test_non_language_names_default_to_en() {
        assert_eq!(detect_source_language("messages.json"), "en");
        assert_eq!(detect_source_language("common.json"), "en");
        assert_eq!(detect_source_language(""), "en");
    }

    #[test]
    fn test_case_must_match() {
        assert_eq!(detect_source_language("FR.json"), "en");
        assert_eq!(detect_source_language("fr-br.json"), "en");
        assert_eq!(detect_source_language("fr_BR.json"), "en");
    }

    #[test]
    fn test_only_last_extension_is_stripped() {
        assert_eq!(detect_source_language("fr.messages.json"), "en");
        assert_eq!(detect_source_language("es.json.bak"), "en");
    }

    #[test]
    fn test_directories_are_ignored() {
        assert_eq!(detect_source_language("src/locales/it.json"), "it");
        assert_eq!(detect_source_language("/app/en/messages.json"), "en");
        assert_eq!(detect_source_language("/app/nl/strings.json"), "en");
    }

    #[test]
    fn test_longer_codes_default_to_en() {
        assert_eq!(detect_source_language("fil.json"), "en");
        assert_eq!(detect_source_language("zh-Hans.json"), "en");
    }
}

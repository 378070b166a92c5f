//! Machine Translation trait and utilities
//!
//! This module defines the `MachineTranslator` trait for provider abstraction,
//! plus the language-code normalization every request goes through before it
//! reaches the wire.
//!
//! # Example
//!
//! ```ignore
//! use googletrans::mt::{ClientConfig, MachineTranslator, Translator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = Translator::new(ClientConfig::default())?;
//!
//!     let result = provider.translate("Hello, world!", "fr", "auto").await?;
//!     println!("{}", result.text);
//!
//!     let texts = vec!["Hello".to_string(), "Goodbye".to_string()];
//!     let results = MachineTranslator::translate_batch(&provider, &texts, "en", "fr").await?;
//!     println!("{:?}", results);
//!
//!     Ok(())
//! }
//! ```

use crate::mt::error::{MtError, MtResult};
use crate::mt::languages::resolve_language;
use async_trait::async_trait;

/// Source language value that asks the service to detect the language
pub const AUTO: &str = "auto";

/// Generic trait for machine translation providers
///
/// All methods are async to support I/O-bound operations like network requests.
#[async_trait]
pub trait MachineTranslator: Send + Sync {
    /// Translate a single text string from source to target locale
    ///
    /// # Arguments
    ///
    /// * `text` - The text to translate
    /// * `source_locale` - Source language code, name, or `"auto"`
    /// * `target_locale` - Target language code or name
    async fn translate_text(
        &self,
        text: &str,
        source_locale: &str,
        target_locale: &str,
    ) -> MtResult<String>;

    /// Translate multiple strings, one after another
    ///
    /// # Guarantees
    ///
    /// - Output order matches input order
    /// - Output length equals input length
    /// - The first failure aborts the batch
    async fn translate_batch(
        &self,
        texts: &[String],
        source_locale: &str,
        target_locale: &str,
    ) -> MtResult<Vec<String>>;

    /// Name of this translation provider, for logging
    fn provider_name(&self) -> &str;
}

/// Normalize a source language before lookup
///
/// Lower-cases the input and drops everything from the first underscore,
/// so regional variants collapse to their base code:
/// - `EN` → `en`
/// - `zh-CN` → `zh-cn`
/// - `pt_BR` → `pt`
pub fn normalize_locale(locale: &str) -> String {
    let lowered = locale.to_lowercase();
    match lowered.split_once('_') {
        Some((base, _)) => base.to_string(),
        None => lowered,
    }
}

/// Resolve the source language to a canonical code, keeping `"auto"` as is
pub fn resolve_source_language(src: &str) -> MtResult<String> {
    let src = normalize_locale(src);
    if src == AUTO {
        return Ok(src);
    }
    resolve_language(&src)
        .map(str::to_string)
        .ok_or_else(|| MtError::InvalidLanguage(format!("invalid source language: {}", src)))
}

/// Resolve the destination language to a canonical code
pub fn resolve_destination_language(dest: &str) -> MtResult<String> {
    resolve_language(dest)
        .map(str::to_string)
        .ok_or_else(|| {
            MtError::InvalidLanguage(format!("invalid destination language: {}", dest))
        })
}

/// Resolve both ends of a request, source first
///
/// Returns `(src, dest)`.
pub fn resolve_languages(src: &str, dest: &str) -> MtResult<(String, String)> {
    let src = resolve_source_language(src)?;
    let dest = resolve_destination_language(dest)?;
    Ok((src, dest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_locale_with_underscore() {
        assert_eq!(normalize_locale("pt_BR"), "pt");
        assert_eq!(normalize_locale("zh_Hant_TW"), "zh");
    }

    #[test]
    fn test_normalize_locale_keeps_hyphens() {
        assert_eq!(normalize_locale("zh-CN"), "zh-cn");
        assert_eq!(normalize_locale("ZH-TW"), "zh-tw");
    }

    #[test]
    fn test_normalize_locale_case_insensitive() {
        assert_eq!(normalize_locale("EN"), "en");
        assert_eq!(normalize_locale("Auto"), "auto");
    }

    #[test]
    fn test_resolve_source_language() {
        assert_eq!(resolve_source_language("auto").unwrap(), "auto");
        assert_eq!(resolve_source_language("EN_us").unwrap(), "en");
        assert_eq!(resolve_source_language("ee").unwrap(), "et");
        assert_eq!(resolve_source_language("Korean").unwrap(), "ko");
    }

    #[test]
    fn test_resolve_destination_language() {
        assert_eq!(resolve_destination_language("fr").unwrap(), "fr");
        assert_eq!(resolve_destination_language("french").unwrap(), "fr");
        assert_eq!(resolve_destination_language("ee").unwrap(), "et");
        // Destinations are not lower-cased.
        assert!(resolve_destination_language("FR").is_err());
        // "auto" is only meaningful as a source.
        assert!(resolve_destination_language("auto").is_err());
    }

    #[test]
    fn test_invalid_language_errors() {
        match resolve_languages("xx", "fr") {
            Err(MtError::InvalidLanguage(msg)) => assert!(msg.contains("source")),
            other => panic!("Expected InvalidLanguage, got {:?}", other),
        }
        match resolve_languages("en", "xx") {
            Err(MtError::InvalidLanguage(msg)) => assert!(msg.contains("destination")),
            other => panic!("Expected InvalidLanguage, got {:?}", other),
        }
    }
}

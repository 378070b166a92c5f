//! Async client for the Google Translate web endpoints
//!
//! Translates text, detects languages and batches requests over the
//! unofficial endpoints the translate web front end uses. Requests run
//! through a shared transport whose proxy can be swapped while other
//! requests are in flight.
//!
//! ```ignore
//! use googletrans::{ClientConfig, Translator};
//!
//! # async fn run() -> googletrans::MtResult<()> {
//! let translator = Translator::new(ClientConfig::default())?;
//! let result = translator.translate("Hello", "fr", "auto").await?;
//! assert_eq!(result.dest, "fr");
//! # Ok(())
//! # }
//! ```

pub mod mt;

pub use mt::{
    ClientConfig, ClientMode, DetectionResult, MachineTranslator, MtError, MtResult, Overrides,
    ProxySpec, TranslatedPart, TranslationResult, Translator,
};

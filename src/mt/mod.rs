/// Google Translate web-endpoint client
///
/// This module talks to the two unofficial endpoints behind the translate
/// web front end and turns their undocumented positional payloads into
/// typed results.
///
/// # Overview
///
/// The pieces fit together like this:
///
/// 1. **Languages** - code/name tables and resolution of user input
/// 2. **Request builder** - query parameters and the RPC `f.req` envelope
/// 3. **Scanner** - pulls the translation call out of a batch-execute body
/// 4. **Decoder** - turns payloads into `TranslationResult` / `DetectionResult`
/// 5. **Sessions** - the proxied HTTP transport behind an async `RwLock`
/// 6. **Translator** - orchestrates the above for each public operation
///
/// # Example
///
/// ```ignore
/// use googletrans::mt::{ClientConfig, ProxySpec, Translator};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let translator = Translator::new(ClientConfig::default())?;
///
///     let result = translator.translate_and_detect("Hello", "ko", "auto").await?;
///     println!("{} [{}]", result.text, result.src);
///
///     translator
///         .reconfigure_proxy(Some(ProxySpec::parse("socks5://127.0.0.1:1080")?))
///         .await?;
///     let detected = translator.detect("Bonjour").await?;
///     println!("{}", detected);
///
///     translator.close().await;
///     Ok(())
/// }
/// ```
pub mod config;
pub mod data;
pub mod decoder;
pub mod endpoint;
pub mod error;
pub mod google_translate;
pub mod languages;
pub mod request;
pub mod scanner;
pub mod session;
pub mod token;
pub mod translator;


pub use config::ClientConfig;
pub use data::{DetectionResult, ExtraData, TranslatedPart, TranslationResult};
pub use error::{MtError, MtResult, RATE_LIMIT_PHRASE};
pub use google_translate::Translator;
pub use languages::{LANGUAGES, SPECIAL_CASES, resolve_language};
pub use request::{ClientMode, Overrides};
pub use session::{ProxySpec, SessionManager};
pub use token::{TokenAcquirer, TokenFactory, TokenProvider, compute_token};
pub use translator::{AUTO, MachineTranslator};

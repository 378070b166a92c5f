//! Google Translate web-endpoint client
//!
//! This module drives the two unofficial endpoints the translate web front
//! end talks to:
//!
//! - the simple `translate_a/single` GET endpoint, used by `translate` and
//!   `detect_legacy`;
//! - the batch-execute RPC endpoint, used by `translate_and_detect` and
//!   `detect`, and by `translate` to find out which language an `auto`
//!   source really was.
//!
//! # Example
//!
//! ```ignore
//! use googletrans::mt::{ClientConfig, Translator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let translator = Translator::new(ClientConfig::default())?;
//!
//!     let result = translator.translate("안녕하세요.", "en", "auto").await?;
//!     println!("{} ({} → {})", result.text, result.src, result.dest);
//!
//!     let detected = translator.detect("Tiu frazo estas skribita en Esperanto.").await?;
//!     println!("{}", detected);
//!
//!     translator.close().await;
//!     Ok(())
//! }
//! ```

use crate::mt::config::ClientConfig;
use crate::mt::data::{DetectionResult, TranslationResult};
use crate::mt::decoder::{
    decode_legacy_detection, decode_rpc, decode_simple, ensure_not_rate_limited, format_json,
    placeholder_payload,
};
use crate::mt::endpoint::{EndpointSelector, base_url, rpc_url, translate_url};
use crate::mt::error::{MtError, MtResult};
use crate::mt::request::{ClientMode, Overrides, RPC_ID, build_params, build_rpc_request, rpc_query};
use crate::mt::scanner::extract_rpc_payload;
use crate::mt::session::{ProxySpec, SessionManager, TransportSettings};
use crate::mt::translator::{AUTO, MachineTranslator, resolve_languages};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, info, warn};

/// What came back from the RPC endpoint
enum RpcOutcome {
    Body(String),
    /// Non-2xx status while degrading gracefully
    Degraded,
}

/// Client for the translate web endpoints
///
/// Cheap to share behind an `Arc`: every operation takes `&self`, and
/// concurrent calls only contend on the session lock when the proxy is
/// reconfigured or the client is closed.
pub struct Translator {
    hosts: EndpointSelector,
    client_mode: ClientMode,
    raise_exception: bool,
    scheme: String,
    sessions: SessionManager,
}

impl Translator {
    /// Create a translator and open its transport session
    ///
    /// # Example
    ///
    /// ```ignore
    /// let translator = Translator::new(
    ///     ClientConfig::default().with_service_urls(["translate.google.com"]),
    /// )?;
    /// ```
    pub fn new(config: ClientConfig) -> MtResult<Self> {
        let (hosts, client_mode) = config.resolve_client()?;
        let settings = TransportSettings {
            user_agent: config.user_agent.clone(),
            timeout: config.timeout,
            http2: config.http2,
            token_base_url: base_url(&config.scheme, &hosts[0]),
            token_factory: config.token_factory.clone(),
        };
        let sessions = SessionManager::new(settings, config.proxy.clone())?;
        info!(hosts = ?hosts, mode = client_mode.as_str(), "translator ready");

        Ok(Self {
            hosts: EndpointSelector::new(hosts)?,
            client_mode,
            raise_exception: config.raise_exception,
            scheme: config.scheme,
            sessions,
        })
    }

    /// Create a translator configured from `GOOGLETRANS_*` environment variables
    pub fn from_env() -> MtResult<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    pub fn client_mode(&self) -> ClientMode {
        self.client_mode
    }

    pub fn service_urls(&self) -> &[String] {
        self.hosts.hosts()
    }

    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    /// Route all further requests through `proxy`, or directly with `None`
    ///
    /// Waits for in-flight requests to finish with the old session.
    pub async fn reconfigure_proxy(&self, proxy: Option<ProxySpec>) -> MtResult<()> {
        self.sessions.reconfigure(proxy).await
    }

    /// Release the transport; further requests fail until reconfigured
    pub async fn close(&self) {
        self.sessions.close().await;
        info!("translator closed");
    }

    fn unexpected_status(&self, status: StatusCode) -> MtError {
        MtError::UnexpectedStatus {
            status: status.as_u16(),
            hosts: self.hosts.hosts().to_vec(),
        }
    }

    fn check_rate_limit(&self, body: &str, url: &str) -> MtResult<()> {
        ensure_not_rate_limited(body).inspect_err(|_| {
            warn!(url = %url, "service reported unusual traffic");
        })
    }

    async fn request_simple(
        &self,
        text: &str,
        dest: &str,
        src: &str,
        overrides: &Overrides,
    ) -> MtResult<Value> {
        let session = self.sessions.acquire_for_read().await?;
        let token = if self.client_mode.requires_token() {
            session.token_provider().provide_token(text).await?
        } else {
            String::new()
        };
        let params = build_params(self.client_mode, text, src, dest, &token, overrides);
        let url = translate_url(&self.scheme, self.hosts.pick());

        let response = session.client().get(&url).query(&params).send().await?;
        let status = response.status();
        let body = response.text().await?;
        drop(session);
        debug!(url = %url, status = %status, "simple request finished");

        self.check_rate_limit(&body, &url)?;
        if status.is_success() {
            return format_json(&body);
        }
        if self.raise_exception {
            return Err(self.unexpected_status(status));
        }
        warn!(url = %url, status = %status, "substituting placeholder payload");
        Ok(placeholder_payload(text))
    }

    async fn request_rpc(&self, text: &str, dest: &str, src: &str) -> MtResult<RpcOutcome> {
        let envelope = build_rpc_request(text, dest, src)?;
        let session = self.sessions.acquire_for_read().await?;
        let url = rpc_url(&self.scheme, self.hosts.pick());

        let response = session
            .client()
            .post(&url)
            .query(&rpc_query())
            .form(&[("f.req", envelope.as_str())])
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        drop(session);
        debug!(url = %url, status = %status, "rpc request finished");

        self.check_rate_limit(&body, &url)?;
        if status.is_success() {
            return Ok(RpcOutcome::Body(body));
        }
        if self.raise_exception {
            return Err(self.unexpected_status(status));
        }
        warn!(url = %url, status = %status, "rpc call degraded");
        Ok(RpcOutcome::Degraded)
    }

    /// Translate through the RPC endpoint; `None` when the call degraded
    async fn rpc_translate(
        &self,
        text: &str,
        dest: &str,
        src: &str,
    ) -> MtResult<Option<TranslationResult>> {
        match self.request_rpc(text, dest, src).await? {
            RpcOutcome::Degraded => Ok(None),
            RpcOutcome::Body(body) => {
                let fragment = extract_rpc_payload(&body, RPC_ID)?;
                decode_rpc(&fragment, text, src, dest).map(Some)
            }
        }
    }

    /// The source language the RPC endpoint reports for `text`
    ///
    /// Only rate limiting propagates; any other failure means "unknown".
    async fn detected_source(&self, text: &str) -> MtResult<Option<String>> {
        match self.rpc_translate(text, "en", AUTO).await {
            Ok(result) => Ok(result.map(|r| r.src)),
            Err(e) if e.is_rate_limited() => Err(e),
            Err(e) => {
                warn!(error = %e, "source detection failed, keeping requested source");
                Ok(None)
            }
        }
    }

    async fn translate_resolved(
        &self,
        text: &str,
        dest: &str,
        src: &str,
        overrides: &Overrides,
    ) -> MtResult<TranslationResult> {
        let data = self.request_simple(text, dest, src, overrides).await?;
        let mut result = decode_simple(&data, text, src, dest)?;

        // The simple payload's own language field is unreliable.
        if src == AUTO {
            if let Some(detected) = self.detected_source(text).await? {
                result.src = detected;
            }
        }
        Ok(result)
    }

    /// Translate `text` into `dest`
    ///
    /// `src` may be `"auto"`, in which case the detected language is looked
    /// up with a second call once the translation is in.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let result = translator.translate("veritas lux mea", "en", "la").await?;
    /// assert_eq!(result.src, "la");
    /// ```
    pub async fn translate(&self, text: &str, dest: &str, src: &str) -> MtResult<TranslationResult> {
        self.translate_with_overrides(text, dest, src, &Overrides::new())
            .await
    }

    /// `translate` with extra or replacement query parameters
    pub async fn translate_with_overrides(
        &self,
        text: &str,
        dest: &str,
        src: &str,
        overrides: &Overrides,
    ) -> MtResult<TranslationResult> {
        let (src, dest) = resolve_languages(src, dest)?;
        self.translate_resolved(text, &dest, &src, overrides).await
    }

    /// Translate every text in order, one request chain at a time
    ///
    /// The first failure aborts the batch; later texts are never sent.
    pub async fn translate_batch(
        &self,
        texts: &[String],
        dest: &str,
        src: &str,
        overrides: &Overrides,
    ) -> MtResult<Vec<TranslationResult>> {
        let (src, dest) = resolve_languages(src, dest)?;
        let mut results = Vec::with_capacity(texts.len());
        for text in texts {
            results.push(self.translate_resolved(text, &dest, &src, overrides).await?);
        }
        Ok(results)
    }

    /// Translate through the RPC endpoint, which also reports the source
    /// language, pronunciations and the individual translated parts
    pub async fn translate_and_detect(
        &self,
        text: &str,
        dest: &str,
        src: &str,
    ) -> MtResult<TranslationResult> {
        let (src, dest) = resolve_languages(src, dest)?;
        Ok(self
            .rpc_translate(text, &dest, &src)
            .await?
            .unwrap_or_else(|| TranslationResult::placeholder(text, &src, &dest)))
    }

    /// Detect the language of `text`
    ///
    /// The RPC endpoint reports no confidence, so it is always `None`. The
    /// language stays `"auto"` when the service could not decide.
    pub async fn detect(&self, text: &str) -> MtResult<DetectionResult> {
        let result = self.translate_and_detect(text, "en", AUTO).await?;
        Ok(DetectionResult {
            lang: result.src,
            confidence: None,
        })
    }

    /// Detect the language of `text` through the simple endpoint
    ///
    /// Unlike `detect` this reports a confidence when the service sends one.
    pub async fn detect_legacy(&self, text: &str, overrides: &Overrides) -> MtResult<DetectionResult> {
        let data = self.request_simple(text, "en", AUTO, overrides).await?;
        Ok(decode_legacy_detection(&data))
    }

    /// `detect_legacy` for several texts, in order, aborting on the first failure
    pub async fn detect_legacy_batch(
        &self,
        texts: &[String],
        overrides: &Overrides,
    ) -> MtResult<Vec<DetectionResult>> {
        let mut results = Vec::with_capacity(texts.len());
        for text in texts {
            results.push(self.detect_legacy(text, overrides).await?);
        }
        Ok(results)
    }
}

impl std::fmt::Debug for Translator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Translator")
            .field("service_urls", &self.hosts.hosts())
            .field("client_mode", &self.client_mode)
            .field("raise_exception", &self.raise_exception)
            .finish()
    }
}

#[async_trait]
impl MachineTranslator for Translator {
    async fn translate_text(
        &self,
        text: &str,
        source_locale: &str,
        target_locale: &str,
    ) -> MtResult<String> {
        Ok(self.translate(text, target_locale, source_locale).await?.text)
    }

    async fn translate_batch(
        &self,
        texts: &[String],
        source_locale: &str,
        target_locale: &str,
    ) -> MtResult<Vec<String>> {
        let results = Translator::translate_batch(
            self,
            texts,
            target_locale,
            source_locale,
            &Overrides::new(),
        )
        .await?;
        Ok(results.into_iter().map(|r| r.text).collect())
    }

    fn provider_name(&self) -> &str {
        "Google Translate"
    }
}

//! Client configuration
//!
//! Defaults mirror what the web front end expects from a desktop browser.
//! `ClientConfig::from_env` reads overrides from `GOOGLETRANS_*` variables.

use crate::mt::error::{MtError, MtResult};
use crate::mt::request::ClientMode;
use crate::mt::session::ProxySpec;
use crate::mt::token::{TokenFactory, default_token_factory};
use std::fmt;
use std::time::Duration;

pub const DEFAULT_SERVICE_URLS: &[&str] = &["translate.googleapis.com"];

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Host the pool collapses to when it points at the direct API
const API_HOST: &str = "translate.googleapis.com";

#[derive(Clone)]
pub struct ClientConfig {
    /// Hosts requests are spread over, e.g. `translate.google.com`
    pub service_urls: Vec<String>,
    pub user_agent: String,
    /// Fail on non-2xx statuses instead of returning a placeholder
    pub raise_exception: bool,
    pub proxy: Option<ProxySpec>,
    /// Upper bound for every outbound request
    pub timeout: Duration,
    /// Negotiate HTTP/2 where the server offers it
    pub http2: bool,
    pub scheme: String,
    /// Forces a client mode instead of inferring it from `service_urls`
    pub client_mode: Option<ClientMode>,
    pub token_factory: TokenFactory,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            service_urls: DEFAULT_SERVICE_URLS.iter().map(|s| s.to_string()).collect(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            raise_exception: false,
            proxy: None,
            timeout: DEFAULT_TIMEOUT,
            http2: true,
            scheme: "https".to_string(),
            client_mode: None,
            token_factory: default_token_factory(),
        }
    }
}

impl ClientConfig {
    /// Build a configuration from `GOOGLETRANS_*` environment variables
    ///
    /// Unset variables keep their defaults:
    ///
    /// * `GOOGLETRANS_SERVICE_URLS` - comma separated hosts
    /// * `GOOGLETRANS_USER_AGENT`
    /// * `GOOGLETRANS_PROXY` - e.g. `socks5://127.0.0.1:1080`
    /// * `GOOGLETRANS_TIMEOUT_SECS`
    /// * `GOOGLETRANS_RAISE_EXCEPTION` - `true`/`false`/`1`/`0`
    /// * `GOOGLETRANS_HTTP2` - same boolean forms
    pub fn from_env() -> MtResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> MtResult<Self> {
        let mut config = Self::default();

        if let Some(urls) = lookup("GOOGLETRANS_SERVICE_URLS") {
            config.service_urls = urls
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Some(user_agent) = lookup("GOOGLETRANS_USER_AGENT") {
            config.user_agent = user_agent;
        }
        if let Some(proxy) = lookup("GOOGLETRANS_PROXY") {
            config.proxy = Some(ProxySpec::parse(&proxy)?);
        }
        if let Some(timeout) = lookup("GOOGLETRANS_TIMEOUT_SECS") {
            let secs = timeout.trim().parse::<u64>().map_err(|_| {
                MtError::ConfigError(format!("GOOGLETRANS_TIMEOUT_SECS is not a number: {}", timeout))
            })?;
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(flag) = lookup("GOOGLETRANS_RAISE_EXCEPTION") {
            config.raise_exception = parse_flag("GOOGLETRANS_RAISE_EXCEPTION", &flag)?;
        }
        if let Some(flag) = lookup("GOOGLETRANS_HTTP2") {
            config.http2 = parse_flag("GOOGLETRANS_HTTP2", &flag)?;
        }

        Ok(config)
    }

    pub fn with_service_urls<S: Into<String>>(mut self, urls: impl IntoIterator<Item = S>) -> Self {
        self.service_urls = urls.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_raise_exception(mut self, raise_exception: bool) -> Self {
        self.raise_exception = raise_exception;
        self
    }

    pub fn with_proxy(mut self, proxy: Option<ProxySpec>) -> Self {
        self.proxy = proxy;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_http2(mut self, http2: bool) -> Self {
        self.http2 = http2;
        self
    }

    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    pub fn with_client_mode(mut self, mode: ClientMode) -> Self {
        self.client_mode = Some(mode);
        self
    }

    pub fn with_token_factory(mut self, factory: TokenFactory) -> Self {
        self.token_factory = factory;
        self
    }

    /// The effective host pool and client mode
    ///
    /// A pool whose first host is a `googleapis` host collapses to the
    /// direct API host in `gtx` mode; anything else is a `webapp` pool.
    pub fn resolve_client(&self) -> MtResult<(Vec<String>, ClientMode)> {
        let first = self
            .service_urls
            .first()
            .ok_or_else(|| MtError::ConfigError("service url list cannot be empty".to_string()))?;

        if let Some(mode) = self.client_mode {
            return Ok((self.service_urls.clone(), mode));
        }
        if first.contains("googleapis") {
            Ok((vec![API_HOST.to_string()], ClientMode::Gtx))
        } else {
            Ok((self.service_urls.clone(), ClientMode::Webapp))
        }
    }
}

fn parse_flag(name: &str, value: &str) -> MtResult<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        _ => Err(MtError::ConfigError(format!(
            "{} is not a boolean: {}",
            name, value
        ))),
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("service_urls", &self.service_urls)
            .field("user_agent", &self.user_agent)
            .field("raise_exception", &self.raise_exception)
            .field("proxy", &self.proxy)
            .field("timeout", &self.timeout)
            .field("http2", &self.http2)
            .field("scheme", &self.scheme)
            .field("client_mode", &self.client_mode)
            .finish()
    }
}

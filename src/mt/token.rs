//! Signing tokens for the `webapp` client mode
//!
//! The web front end signs every simple request with a `tk` value derived
//! from the query text and a server-issued seed (the TKK). The seed rotates
//! hourly, so `TokenAcquirer` refreshes it at most once per hour.

use crate::mt::error::MtResult;
use async_trait::async_trait;
use regex::Regex;
use std::sync::{Arc, LazyLock};
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::sync::Mutex;
use tracing::{debug, warn};

static TKK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"tkk:'(.+?)'").expect("TKK pattern is a valid regex"));

/// Produces a signing token for a given input text
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn provide_token(&self, text: &str) -> MtResult<String>;
}

/// Builds a token provider bound to a session's client and base URL
///
/// The session manager calls this every time it replaces the session, so a
/// provider never outlives the transport it was created against.
pub type TokenFactory = Arc<dyn Fn(reqwest::Client, String) -> Arc<dyn TokenProvider> + Send + Sync>;

pub fn default_token_factory() -> TokenFactory {
    Arc::new(|client, base_url| Arc::new(TokenAcquirer::new(client, base_url)))
}

struct TkkState {
    tkk: String,
    last_refresh_hour: Option<u64>,
}

/// Default token provider: fetches the TKK seed from the host page
pub struct TokenAcquirer {
    client: reqwest::Client,
    base_url: String,
    state: Mutex<TkkState>,
}

impl TokenAcquirer {
    pub fn new(client: reqwest::Client, base_url: String) -> Self {
        Self::with_tkk(client, base_url, "0")
    }

    pub fn with_tkk(client: reqwest::Client, base_url: String, tkk: &str) -> Self {
        Self {
            client,
            base_url,
            state: Mutex::new(TkkState {
                tkk: tkk.to_string(),
                last_refresh_hour: None,
            }),
        }
    }

    async fn current_tkk(&self) -> MtResult<String> {
        let mut state = self.state.lock().await;
        let hour = current_hour();
        let seed_hour = state
            .tkk
            .split('.')
            .next()
            .and_then(|h| h.parse::<u64>().ok());
        if seed_hour == Some(hour) || state.last_refresh_hour == Some(hour) {
            return Ok(state.tkk.clone());
        }

        let page = self.client.get(&self.base_url).send().await?.text().await?;
        match TKK_PATTERN.captures(&page) {
            Some(caps) => {
                state.tkk = caps[1].to_string();
                debug!(tkk = %state.tkk, "refreshed TKK seed");
            }
            None => warn!(url = %self.base_url, "host page carries no TKK seed, keeping the old one"),
        }
        state.last_refresh_hour = Some(hour);
        Ok(state.tkk.clone())
    }
}

impl std::fmt::Debug for TokenAcquirer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenAcquirer")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl TokenProvider for TokenAcquirer {
    async fn provide_token(&self, text: &str) -> MtResult<String> {
        let tkk = self.current_tkk().await?;
        Ok(compute_token(text, &tkk))
    }
}

fn current_hour() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() / 3600)
        .unwrap_or(0)
}

/// Apply a sequence of shift/add/xor steps with 32-bit integer semantics
///
/// `ops` is read three bytes at a time: combine op (`+` add, else xor),
/// shift direction (`+` logical right, else left), shift amount (digit or
/// letter, `a` = 10).
fn mix(mut a: i64, ops: &[u8]) -> i64 {
    let mut c = 0;
    while c + 2 < ops.len() {
        let amount = ops[c + 2];
        let amount = if amount >= b'a' {
            u32::from(amount - 87)
        } else {
            u32::from(amount - b'0')
        };
        let shifted = if ops[c + 1] == b'+' {
            i64::from((a as i32 as u32) >> amount)
        } else {
            i64::from((a as i32).wrapping_shl(amount))
        };
        a = if ops[c] == b'+' {
            i64::from(a.wrapping_add(shifted) as i32)
        } else {
            i64::from((a as i32) ^ (shifted as i32))
        };
        c += 3;
    }
    a
}

/// Compute the `tk` parameter for `text` under seed `tkk`
pub fn compute_token(text: &str, tkk: &str) -> String {
    let (b, key) = match tkk.split_once('.') {
        Some((high, low)) => (
            high.parse::<i64>().unwrap_or(0),
            low.parse::<i64>().unwrap_or(0),
        ),
        None => (0, 0),
    };

    let mut a = b;
    for byte in text.as_bytes() {
        a += i64::from(*byte);
        a = mix(a, b"+-a^+6");
    }
    a = mix(a, b"+-3^+b+-f");
    a = i64::from((a as i32) ^ (key as i32));
    if a < 0 {
        a = (a & 2_147_483_647) + 2_147_483_648;
    }
    a %= 1_000_000;
    format!("{}.{}", a, a ^ b)
}

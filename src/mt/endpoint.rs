//! Service host selection and URL templates

use crate::mt::error::{MtError, MtResult};
use rand::seq::SliceRandom;
use tracing::debug;

/// Path of the simple GET translation endpoint
pub const TRANSLATE_PATH: &str = "/translate_a/single";

/// Path of the batch-execute RPC endpoint
pub const TRANSLATE_RPC_PATH: &str = "/_/TranslateWebserverUi/data/batchexecute";

/// Picks a host from the configured pool for every request
///
/// A single-host pool is always returned as is; larger pools are sampled
/// uniformly at random on each call with no stickiness.
#[derive(Debug, Clone)]
pub struct EndpointSelector {
    hosts: Vec<String>,
}

impl EndpointSelector {
    pub fn new(hosts: Vec<String>) -> MtResult<Self> {
        if hosts.is_empty() {
            return Err(MtError::ConfigError(
                "service url list cannot be empty".to_string(),
            ));
        }
        Ok(Self { hosts })
    }

    pub fn hosts(&self) -> &[String] {
        &self.hosts
    }

    pub fn pick(&self) -> &str {
        let host = if self.hosts.len() == 1 {
            &self.hosts[0]
        } else {
            // The pool is never empty, see `new`.
            self.hosts
                .choose(&mut rand::thread_rng())
                .unwrap_or(&self.hosts[0])
        };
        debug!(host = %host, "picked service host");
        host
    }
}

/// URL of the simple endpoint on `host`
pub fn translate_url(scheme: &str, host: &str) -> String {
    format!("{}://{}{}", scheme, host, TRANSLATE_PATH)
}

/// URL of the RPC endpoint on `host`
///
/// The RPC endpoint only lives on the web front end, so API hosts are
/// mapped to their `google` counterpart.
pub fn rpc_url(scheme: &str, host: &str) -> String {
    format!(
        "{}://{}{}",
        scheme,
        host.replace("googleapis", "google"),
        TRANSLATE_RPC_PATH
    )
}

/// Base URL of a host, used to fetch the page that carries the TKK seed
pub fn base_url(scheme: &str, host: &str) -> String {
    format!("{}://{}", scheme, host)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_empty_pool_is_rejected() {
        match EndpointSelector::new(vec![]) {
            Err(MtError::ConfigError(msg)) => assert!(msg.contains("empty")),
            _ => panic!("Expected ConfigError"),
        }
    }

    #[test]
    fn test_single_host_is_deterministic() {
        let selector = EndpointSelector::new(vec!["translate.google.com".to_string()]).unwrap();
        for _ in 0..50 {
            assert_eq!(selector.pick(), "translate.google.com");
        }
    }

    #[test]
    fn test_multiple_hosts_are_all_reachable() {
        let hosts = vec![
            "translate.google.com".to_string(),
            "translate.google.co.kr".to_string(),
            "translate.google.de".to_string(),
        ];
        let selector = EndpointSelector::new(hosts.clone()).unwrap();
        let seen: HashSet<&str> = (0..500).map(|_| selector.pick()).collect();
        for host in &hosts {
            assert!(seen.contains(host.as_str()), "host {} never picked", host);
        }
    }

    #[test]
    fn test_urls() {
        assert_eq!(
            translate_url("https", "translate.googleapis.com"),
            "https://translate.googleapis.com/translate_a/single"
        );
        assert_eq!(
            rpc_url("https", "translate.googleapis.com"),
            "https://translate.google.com/_/TranslateWebserverUi/data/batchexecute"
        );
        assert_eq!(
            rpc_url("http", "127.0.0.1:8080"),
            "http://127.0.0.1:8080/_/TranslateWebserverUi/data/batchexecute"
        );
        assert_eq!(base_url("https", "translate.google.com"), "https://translate.google.com");
    }
}

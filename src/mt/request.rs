//! Request builders for the two endpoint shapes
//!
//! The simple endpoint takes a flat list of query parameters. The RPC
//! endpoint takes a batch-execute envelope whose inner payload is itself a
//! JSON-encoded string, so it has to be encoded twice.

use crate::mt::error::MtResult;
use serde_json::{Value, json};
use std::collections::BTreeMap;

/// Identifier of the translate call in the batch-execute protocol
pub const RPC_ID: &str = "MkEWBc";

/// Backend build the RPC envelope was captured against
pub const RPC_BACKEND_LABEL: &str = "boq_translate-webserver_20201207.13_p0";

/// Caller-supplied parameters that replace the defaults by key
pub type Overrides = BTreeMap<String, String>;

/// Which front end the client impersonates
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientMode {
    /// Browser front end; requests must carry a signing token
    Webapp,
    /// Direct API front end; the token is left empty
    Gtx,
}

impl ClientMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClientMode::Webapp => "webapp",
            ClientMode::Gtx => "gtx",
        }
    }

    pub fn requires_token(&self) -> bool {
        matches!(self, ClientMode::Webapp)
    }
}

const DATA_TYPES: &[&str] = &["at", "bd", "ex", "ld", "md", "qca", "rw", "rm", "ss", "t"];

/// Query parameters of a simple translation request
///
/// Every key named in `overrides` drops all default pairs with that key
/// before the override value is appended.
pub fn build_params(
    client: ClientMode,
    query: &str,
    src: &str,
    dest: &str,
    token: &str,
    overrides: &Overrides,
) -> Vec<(String, String)> {
    let mut params: Vec<(String, String)> = vec![
        ("client".to_string(), client.as_str().to_string()),
        ("sl".to_string(), src.to_string()),
        ("tl".to_string(), dest.to_string()),
        ("hl".to_string(), dest.to_string()),
    ];
    params.extend(DATA_TYPES.iter().map(|dt| ("dt".to_string(), dt.to_string())));
    params.extend([
        ("ie".to_string(), "UTF-8".to_string()),
        ("oe".to_string(), "UTF-8".to_string()),
        ("otf".to_string(), "1".to_string()),
        ("ssel".to_string(), "0".to_string()),
        ("tsel".to_string(), "0".to_string()),
        ("tk".to_string(), token.to_string()),
        ("q".to_string(), query.to_string()),
    ]);

    for (key, value) in overrides {
        params.retain(|(k, _)| k != key);
        params.push((key.clone(), value.clone()));
    }
    params
}

/// Fixed query parameters of the RPC endpoint
pub fn rpc_query() -> [(&'static str, &'static str); 6] {
    [
        ("rpcids", RPC_ID),
        ("bl", RPC_BACKEND_LABEL),
        ("soc-app", "1"),
        ("soc-platform", "1"),
        ("soc-device", "1"),
        ("rt", "c"),
    ]
}

/// The `f.req` value for an RPC translation request
///
/// Produces `[[["MkEWBc","[[text,src,dest,true],[null]]",null,"generic"]]]`
/// with the inner array compactly encoded into a string.
pub fn build_rpc_request(text: &str, dest: &str, src: &str) -> MtResult<String> {
    let inner: Value = json!([[text, src, dest, true], [null]]);
    let inner = serde_json::to_string(&inner)?;
    let envelope = json!([[[RPC_ID, inner, null, "generic"]]]);
    Ok(serde_json::to_string(&envelope)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values<'a>(params: &'a [(String, String)], key: &str) -> Vec<&'a str> {
        params
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    #[test]
    fn test_build_params_defaults() {
        let params = build_params(ClientMode::Webapp, "Hello", "auto", "fr", "123.456", &Overrides::new());
        assert_eq!(values(&params, "client"), vec!["webapp"]);
        assert_eq!(values(&params, "sl"), vec!["auto"]);
        assert_eq!(values(&params, "tl"), vec!["fr"]);
        assert_eq!(values(&params, "hl"), vec!["fr"]);
        assert_eq!(values(&params, "tk"), vec!["123.456"]);
        assert_eq!(values(&params, "q"), vec!["Hello"]);
        assert_eq!(values(&params, "dt"), DATA_TYPES.to_vec());
    }

    #[test]
    fn test_build_params_gtx_mode_with_empty_token() {
        let params = build_params(ClientMode::Gtx, "Hello", "en", "ko", "", &Overrides::new());
        assert_eq!(values(&params, "client"), vec!["gtx"]);
        assert_eq!(values(&params, "tk"), vec![""]);
    }

    #[test]
    fn test_overrides_replace_defaults() {
        let mut overrides = Overrides::new();
        overrides.insert("hl".to_string(), "ko".to_string());
        overrides.insert("dt".to_string(), "t".to_string());
        overrides.insert("extra".to_string(), "1".to_string());

        let params = build_params(ClientMode::Gtx, "Hello", "en", "fr", "", &overrides);
        assert_eq!(values(&params, "hl"), vec!["ko"]);
        assert_eq!(values(&params, "dt"), vec!["t"]);
        assert_eq!(values(&params, "extra"), vec!["1"]);
        assert_eq!(values(&params, "tl"), vec!["fr"]);
    }

    #[test]
    fn test_rpc_request_is_double_encoded_without_whitespace() {
        let body = build_rpc_request("Hello", "fr", "auto").unwrap();
        assert_eq!(
            body,
            r#"[[["MkEWBc","[[\"Hello\",\"auto\",\"fr\",true],[null]]",null,"generic"]]]"#
        );

        let outer: Value = serde_json::from_str(&body).unwrap();
        let inner = outer[0][0][1].as_str().unwrap();
        let inner: Value = serde_json::from_str(inner).unwrap();
        assert_eq!(inner, json!([["Hello", "auto", "fr", true], [null]]));
    }

    #[test]
    fn test_rpc_request_escapes_text() {
        let body = build_rpc_request("say \"hi\" [now]", "de", "en").unwrap();
        let outer: Value = serde_json::from_str(&body).unwrap();
        let inner: Value = serde_json::from_str(outer[0][0][1].as_str().unwrap()).unwrap();
        assert_eq!(inner[0][0], "say \"hi\" [now]");
    }

    #[test]
    fn test_rpc_query() {
        let query = rpc_query();
        assert_eq!(query[0], ("rpcids", "MkEWBc"));
        assert!(query.contains(&("rt", "c")));
    }
}

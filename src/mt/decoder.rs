//! Decoding of endpoint payloads into typed results
//!
//! Both endpoints answer with positional arrays whose layout is not
//! documented. The translation text itself is required; everything else
//! (pronunciation, detected language, metadata) is optional enrichment and
//! reads as `None` on any structural mismatch.

use crate::mt::data::{DetectionResult, ExtraData, TranslatedPart, TranslationResult};
use crate::mt::error::{MtError, MtResult, RATE_LIMIT_PHRASE};
use crate::mt::translator::AUTO;
use serde_json::{Value, json};
use std::sync::LazyLock;

/// Destinations whose pronunciation falls back to the translation when the
/// service echoed the input instead of transliterating it
pub const PRONUNCIATION_PASSTHROUGH: &[&str] = &["en", "ca", "fr"];

/// Index of each metadata category in a simple-endpoint payload
pub const EXTRA_CATEGORIES: &[(usize, &str)] = &[
    (0, "translation"),
    (1, "all-translations"),
    (2, "original-language"),
    (5, "possible-translations"),
    (6, "confidence"),
    (7, "possible-mistakes"),
    (8, "language"),
    (11, "synonyms"),
    (12, "definitions"),
    (13, "examples"),
    (14, "see-also"),
];

static PLACEHOLDER_PAYLOAD: LazyLock<Value> = LazyLock::new(|| {
    json!([
        [["", null, null, 0]],
        null,
        "en",
        null,
        null,
        null,
        1,
        null,
        [["en"], null, [1], ["en"]]
    ])
});

/// Fails with `RateLimited` if `body` is the abuse-detection page
pub fn ensure_not_rate_limited(body: &str) -> MtResult<()> {
    if body.contains(RATE_LIMIT_PHRASE) {
        return Err(MtError::RateLimited);
    }
    Ok(())
}

/// A fresh copy of the degraded-status payload carrying `text`
pub fn placeholder_payload(text: &str) -> Value {
    let mut data = PLACEHOLDER_PAYLOAD.clone();
    if let Some(slot) = data.pointer_mut("/0/0/0") {
        *slot = Value::String(text.to_string());
    }
    data
}

/// Parse a simple-endpoint body, repairing elided array elements if needed
pub fn format_json(body: &str) -> MtResult<Value> {
    match serde_json::from_str(body) {
        Ok(value) => Ok(value),
        Err(_) => serde_json::from_str(&repair_legacy_json(body)).map_err(|e| {
            MtError::malformed(format!("simple endpoint returned invalid JSON: {}", e))
        }),
    }
}

/// Rewrite `[,` and `,,` outside string literals so elided elements become `null`
pub fn repair_legacy_json(original: &str) -> String {
    let mut out = String::with_capacity(original.len() + 16);
    let mut in_string = false;
    let mut escaped = false;
    let mut previous = None;

    for ch in original.chars() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
        } else {
            if ch == ',' && matches!(previous, Some('[') | Some(',')) {
                out.push_str("null");
            }
            if ch == '"' {
                in_string = true;
            }
        }
        out.push(ch);
        previous = Some(ch);
    }
    out
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Metadata categories of a simple-endpoint payload
pub fn parse_extra_data(data: &Value) -> ExtraData {
    EXTRA_CATEGORIES
        .iter()
        .map(|&(index, category)| {
            let value = data.get(index).filter(|v| is_truthy(v)).cloned();
            (category.to_string(), value)
        })
        .collect()
}

fn read_pronunciation(data: &Value, origin: &str) -> Option<String> {
    let row = match data.pointer("/0/1").and_then(Value::as_array) {
        Some(row) if row.len() >= 2 => row,
        _ => return Some(origin.to_string()),
    };
    match &row[row.len() - 2] {
        Value::Null => row.get(2).and_then(Value::as_str).map(str::to_string),
        other => other.as_str().map(str::to_string),
    }
}

/// Decode a simple-endpoint payload
///
/// The translation is the concatenation of the first cell of every row in
/// `data[0]`; a payload without that table is malformed.
pub fn decode_simple(data: &Value, origin: &str, src: &str, dest: &str) -> MtResult<TranslationResult> {
    let rows = data
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| MtError::malformed("simple payload has no translation rows"))?;
    let text: String = rows
        .iter()
        .filter_map(|row| row.get(0).and_then(Value::as_str))
        .collect();

    let mut pronunciation = read_pronunciation(data, origin);
    if PRONUNCIATION_PASSTHROUGH.contains(&dest) && pronunciation.as_deref() == Some(origin) {
        pronunciation = Some(text.clone());
    }

    Ok(TranslationResult {
        src: src.to_string(),
        dest: dest.to_string(),
        origin: origin.to_string(),
        text,
        pronunciation,
        origin_pronunciation: None,
        parts: Vec::new(),
        extra_data: parse_extra_data(data),
    })
}

fn decode_part(part: &Value) -> MtResult<TranslatedPart> {
    let items = part
        .as_array()
        .ok_or_else(|| MtError::malformed("translated part is not an array"))?;
    let text = items
        .first()
        .and_then(Value::as_str)
        .ok_or_else(|| MtError::malformed("translated part has no text"))?;
    let candidates = items
        .get(1)
        .and_then(Value::as_array)
        .map(|c| c.iter().filter_map(Value::as_str).map(str::to_string).collect())
        .unwrap_or_default();
    Ok(TranslatedPart::new(text, candidates))
}

fn detect_source(parsed: &Value) -> Option<String> {
    parsed
        .get(2)
        .and_then(Value::as_str)
        .or_else(|| parsed.pointer("/0/2").and_then(Value::as_str))
        .map(str::to_string)
}

/// Decode the fragment extracted by the scanner
///
/// The call's third element is a JSON string holding the working payload.
pub fn decode_rpc(fragment: &str, origin: &str, src: &str, dest: &str) -> MtResult<TranslationResult> {
    let outer: Value = serde_json::from_str(fragment)?;
    let payload = outer
        .pointer("/0/2")
        .and_then(Value::as_str)
        .ok_or_else(|| MtError::malformed("RPC call carries no payload string"))?;
    let parsed: Value = serde_json::from_str(payload)?;

    let translation = parsed
        .pointer("/1/0/0")
        .and_then(Value::as_array)
        .ok_or_else(|| MtError::malformed("RPC payload has no translation block"))?;
    let should_space = translation
        .get(3)
        .map(is_truthy)
        .ok_or_else(|| MtError::malformed("RPC translation block has no spacing flag"))?;
    let parts = translation
        .get(5)
        .and_then(Value::as_array)
        .ok_or_else(|| MtError::malformed("RPC translation block has no parts"))?
        .iter()
        .map(decode_part)
        .collect::<MtResult<Vec<_>>>()?;
    let text = parts
        .iter()
        .map(|part| part.text.as_str())
        .collect::<Vec<_>>()
        .join(if should_space { " " } else { "" });

    let src = if src == AUTO {
        detect_source(&parsed).unwrap_or_else(|| AUTO.to_string())
    } else {
        src.to_string()
    };

    let pronunciation = parsed
        .pointer("/1/0/0/1")
        .and_then(Value::as_str)
        .map(str::to_string);
    let origin_pronunciation = parsed
        .pointer("/0/0")
        .and_then(Value::as_str)
        .map(str::to_string);

    let mut extra_data = ExtraData::new();
    extra_data.insert("confidence".to_string(), None);
    extra_data.insert("parsed".to_string(), Some(parsed));

    Ok(TranslationResult {
        src,
        dest: dest.to_string(),
        origin: origin.to_string(),
        text,
        pronunciation,
        origin_pronunciation,
        parts,
        extra_data,
    })
}

/// Decode the language block (`data[8]`) of a simple-endpoint payload
///
/// When several candidates are listed the first one is reported with its
/// confidence. Missing pieces leave the language empty or the confidence
/// absent.
pub fn decode_legacy_detection(data: &Value) -> DetectionResult {
    let block = data.get(8).and_then(Value::as_array);
    let codes = block
        .and_then(|b| b.first())
        .and_then(Value::as_array);
    let scores = block
        .filter(|b| b.len() >= 2)
        .map(|b| &b[b.len() - 2]);

    let lang = match codes {
        Some(codes) if codes.len() > 1 => codes[0].as_str().unwrap_or_default().to_string(),
        Some(codes) => codes.iter().filter_map(Value::as_str).collect(),
        None => String::new(),
    };
    let confidence = scores
        .and_then(|s| s.get(0))
        .and_then(Value::as_f64);

    DetectionResult { lang, confidence }
}

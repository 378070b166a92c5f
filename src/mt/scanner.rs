//! Extraction of a single RPC result from a batch-execute response body
//!
//! A batch-execute body interleaves length prefixes and the JSON results of
//! several calls, one or more lines each:
//!
//! ```text
//! )]}'
//!
//! 1234
//! [["wrb.fr","MkEWBc","[[...]]",null,null,null,"generic"],["di",42]]
//! 25
//! [["e",4,null,null,160]]
//! ```
//!
//! The scanner skips everything before the first line that names the call,
//! then accumulates lines until the square brackets outside string literals
//! balance.

use crate::mt::error::{MtError, MtResult};

/// How far into a line the quoted call identifier may appear
const ID_WINDOW: usize = 30;

/// Returns the reassembled JSON fragment for call `rpc_id`
///
/// Fails with `MalformedResponse` when no line names the call or when the
/// body ends before the brackets balance.
pub fn extract_rpc_payload(body: &str, rpc_id: &str) -> MtResult<String> {
    let needle = format!("\"{}\"", rpc_id);
    let mut found = false;
    let mut opened = 0usize;
    let mut closed = 0usize;
    let mut fragment = String::new();

    for line in body.split('\n') {
        found = found || line_prefix(line, ID_WINDOW).contains(&needle);
        if !found {
            continue;
        }

        let mut in_string = false;
        let mut previous = None;
        for ch in line.chars() {
            if ch == '"' && previous != Some('\\') {
                in_string = !in_string;
            }
            if !in_string {
                match ch {
                    '[' => opened += 1,
                    ']' => closed += 1,
                    _ => {}
                }
            }
            previous = Some(ch);
        }

        fragment.push_str(line);
        if opened == closed {
            return Ok(fragment);
        }
    }

    if found {
        Err(MtError::malformed(format!(
            "unbalanced brackets in {} payload ({} open, {} closed)",
            rpc_id, opened, closed
        )))
    } else {
        Err(MtError::malformed(format!(
            "no {} call in batch response",
            rpc_id
        )))
    }
}

fn line_prefix(line: &str, chars: usize) -> &str {
    match line.char_indices().nth(chars) {
        Some((idx, _)) => &line[..idx],
        None => line,
    }
}

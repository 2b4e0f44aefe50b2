//! Keeps narrative and player-typed text on a single log line.
//!
//! Story beats span paragraphs and player input is arbitrary; both are
//! folded into an escaped, length-capped preview before they reach a log
//! record.

use std::fmt::Write;

/// Longest preview emitted into a log record, in characters.
const PREVIEW_CHARS: usize = 200;

/// Fold `text` into a single-line preview: backslashes and the common
/// control characters become their escape sequences, other control
/// characters become `\xNN`, and anything past [`PREVIEW_CHARS`] is dropped
/// behind an ellipsis.
pub fn escape_log(text: &str) -> String {
    let mut out = String::with_capacity(text.len().min(PREVIEW_CHARS) + 8);
    let mut chars = text.chars();
    for ch in chars.by_ref().take(PREVIEW_CHARS) {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\x{:02X}", c as u32);
            }
            c => out.push(c),
        }
    }
    if chars.next().is_some() {
        out.push('…');
    }
    out
}

//! ANSI escape removal for captured tool output

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

// Control Sequence Introducer: ESC `[`, digits or semicolons, one letter.
static CSI: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[[0-9;]*[A-Za-z]").unwrap());

/// Remove terminal color/cursor sequences from `text`.
///
/// Everything that is not an exact CSI match passes through unchanged.
/// Deleting a sequence can splice together a new one (`ESC[ESC[0m1m`), so
/// matching repeats until nothing is left, which keeps the function
/// idempotent.
pub fn strip_ansi(text: &str) -> Cow<'_, str> {
    if !CSI.is_match(text) {
        return Cow::Borrowed(text);
    }

    let mut cleaned = CSI.replace_all(text, "").into_owned();
    while CSI.is_match(&cleaned) {
        cleaned = CSI.replace_all(&cleaned, "").into_owned();
    }
    Cow::Owned(cleaned)
}

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Normalize a raw attribute token.
///
/// Steps, in order:
/// 1. Unicode NFD decomposition, dropping combining marks (`á` → `a`, `ñ` → `n`).
/// 2. Lowercasing.
/// 3. Every run of whitespace, `-` or `_` becomes a single `_`.
/// 4. Any other non-alphanumeric character is dropped.
/// 5. Leading and trailing separators are trimmed.
///
/// Returns `None` when nothing is left. Normalizing an already normalized
/// token returns it unchanged.
pub fn normalize_token(raw: &str) -> Option<String> {
    let mut out = String::with_capacity(raw.len());
    let mut pending_separator = false;

    for ch in raw.nfd() {
        if is_combining_mark(ch) {
            continue;
        }
        if ch.is_whitespace() || ch == '-' || ch == '_' {
            pending_separator = true;
            continue;
        }
        if !ch.is_alphanumeric() {
            continue;
        }
        if pending_separator && !out.is_empty() {
            out.push('_');
        }
        pending_separator = false;
        // Lowercasing can reintroduce combining marks (e.g. `İ`).
        out.extend(ch.to_lowercase().filter(|c| !is_combining_mark(*c)));
    }

    if out.is_empty() {
        None
    } else {
        Some(out)
    }
}

//! Keep log records single-line when they echo player input.

/// Longest slice of a typed line that gets logged.
const LOG_PREVIEW_CHARS: usize = 120;

/// Debug-escape `line` (`\n`, `\t`, control chars) and cut it at
/// `LOG_PREVIEW_CHARS`, marking the cut with `…`.
pub fn escape_log(line: &str) -> String {
    let mut chars = line.chars();
    let mut out: String = chars
        .by_ref()
        .take(LOG_PREVIEW_CHARS)
        .flat_map(char::escape_debug)
        .collect();
    if chars.next().is_some() {
        out.push('…');
    }
    out
}

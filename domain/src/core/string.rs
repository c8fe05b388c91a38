//! One-line previews of chat text for log messages.

/// Single-line preview of `text`, at most `max_chars` characters.
///
/// Whitespace runs (including newlines) become one space. Longer text is cut
/// on a character boundary and ends with `...`.
pub fn preview(text: &str, max_chars: usize) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    match flat.char_indices().nth(max_chars) {
        None => flat,
        Some(_) => {
            let keep = max_chars.saturating_sub(3);
            let cut = flat
                .char_indices()
                .nth(keep)
                .map_or(flat.len(), |(i, _)| i);
            format!("{}...", &flat[..cut])
        }
    }
}

//! Splits long replies to fit Telegram's message size limit.

/// Maximum length of one Telegram text message, in UTF-16 code units.
pub const TELEGRAM_MESSAGE_LIMIT: usize = 4096;

/// Splits `text` into chunks of at most `limit` UTF-16 code units, on char boundaries.
/// Empty text yields no chunks. A single char wider than `limit` still gets its own chunk.
pub fn split_message(text: &str, limit: usize) -> Vec<&str> {
    let limit = limit.max(1);
    let mut chunks = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        let mut units = 0;
        let mut end = rest.len();
        for (idx, c) in rest.char_indices() {
            units += c.len_utf16();
            if units > limit && idx > 0 {
                end = idx;
                break;
            }
        }
        let (head, tail) = rest.split_at(end);
        chunks.push(head);
        rest = tail;
    }
    chunks
}

//! MarkdownV2 escaping and message chunking for the chat transport.

/// Characters Telegram's MarkdownV2 dialect requires to be escaped.
const ESCAPED: &[char] = &[
    '\\', '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!',
];

/// Maximum characters per outgoing message, under the platform's 4096
/// hard limit.
pub const CHUNK_SIZE: usize = 4000;

pub fn escape_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if ESCAPED.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Split `text` into chunks of at most `chunk_size` characters,
/// counting characters rather than bytes so multi-byte text never gets
/// split mid-character.
pub fn chunk_text(text: &str, chunk_size: usize) -> Vec<String> {
    debug_assert!(chunk_size > 0);
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut count = 0usize;

    for c in text.chars() {
        if count == chunk_size {
            chunks.push(std::mem::take(&mut current));
            count = 0;
        }
        current.push(c);
        count += 1;
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

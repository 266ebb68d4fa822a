//! Splitting of oversized input into sentence-bounded chunks.
//!
//! All lengths are counted in `char`s.

/// Inputs longer than this are translated chunk by chunk.
pub const CHUNK_THRESHOLD: usize = 1000;

/// Upper bound on the length of a single chunk.
pub const MAX_CHUNK_CHARS: usize = 800;

/// Confidence reported for a reassembled chunked translation.
pub const CHUNKED_CONFIDENCE: f64 = 0.8;

const SENTENCE_TERMINATORS: &[char] = &['。', '！', '？', '.', '!', '?', '\n'];

pub fn needs_chunking(text: &str) -> bool {
    text.chars().count() > CHUNK_THRESHOLD
}

/// Splits `text` into trimmed, non-empty chunks of at most `max_chars`.
///
/// Sentences are packed greedily; a chunk is closed as soon as the next
/// sentence would push it past `max_chars`. A single sentence longer than
/// `max_chars` is cut at the last whitespace inside the limit, or at the
/// limit itself when there is none.
pub fn split_into_chunks(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for sentence in split_sentences(text) {
        for piece in hard_split(sentence, max_chars) {
            let piece_len = piece.chars().count();
            if current_len > 0 && current_len + piece_len > max_chars {
                close_chunk(&mut chunks, &current);
                current.clear();
                current_len = 0;
            }
            current.push_str(piece);
            current_len += piece_len;
        }
    }
    close_chunk(&mut chunks, &current);

    chunks
}

fn close_chunk(chunks: &mut Vec<String>, current: &str) {
    let trimmed = current.trim();
    if !trimmed.is_empty() {
        chunks.push(trimmed.to_string());
    }
}

/// Splits after every terminator, keeping the terminator with its sentence.
fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for (idx, ch) in text.char_indices() {
        if SENTENCE_TERMINATORS.contains(&ch) {
            let end = idx + ch.len_utf8();
            sentences.push(&text[start..end]);
            start = end;
        }
    }
    if start < text.len() {
        sentences.push(&text[start..]);
    }

    sentences
}

fn hard_split(sentence: &str, max_chars: usize) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut rest = sentence;

    while rest.chars().count() > max_chars {
        // Byte offset just past the `max_chars`-th char.
        let limit = rest
            .char_indices()
            .nth(max_chars)
            .map_or(rest.len(), |(idx, _)| idx);

        let cut = rest[..limit]
            .char_indices()
            .rev()
            .find(|(idx, ch)| *idx > 0 && ch.is_whitespace())
            .map_or(limit, |(idx, ch)| idx + ch.len_utf8());

        pieces.push(&rest[..cut]);
        rest = &rest[cut..];
    }
    if !rest.is_empty() {
        pieces.push(rest);
    }

    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    fn without_whitespace(s: &str) -> String {
        s.chars().filter(|c| !c.is_whitespace()).collect()
    }

    #[test]
    fn test_needs_chunking_counts_chars() {
        assert!(!needs_chunking(&"a".repeat(CHUNK_THRESHOLD)));
        assert!(needs_chunking(&"a".repeat(CHUNK_THRESHOLD + 1)));
        // 400 CJK chars are 1200 bytes but still below the threshold.
        assert!(!needs_chunking(&"字".repeat(400)));
    }

    #[test]
    fn test_short_text_is_one_chunk() {
        assert_eq!(
            split_into_chunks("One. Two! Three?", 800),
            vec!["One. Two! Three?".to_string()]
        );
    }

    #[test]
    fn test_sentences_are_packed_greedily() {
        let text = "aaaa. bbbb. cccc. dddd.";
        let chunks = split_into_chunks(text, 12);
        assert_eq!(chunks, vec!["aaaa. bbbb.", "cccc. dddd."]);
    }

    #[test]
    fn test_splits_on_cjk_terminators() {
        let text = "你好。世界！真的？是的";
        let chunks = split_into_chunks(text, 4);
        assert_eq!(chunks, vec!["你好。", "世界！", "真的？", "是的"]);
    }

    #[test]
    fn test_empty_fragments_are_dropped() {
        let text = "First line.\n\n\n   \n.\nSecond line.\n\n";
        let chunks = split_into_chunks(text, 12);
        assert!(chunks.iter().all(|c| !c.trim().is_empty()));
        assert_eq!(chunks.first().map(String::as_str), Some("First line."));
        assert_eq!(chunks.last().map(String::as_str), Some("Second line."));
    }

    #[test]
    fn test_whitespace_only_input_has_no_chunks() {
        assert!(split_into_chunks("  \n\n \n", 800).is_empty());
    }

    #[test]
    fn test_long_sentence_is_cut_at_whitespace() {
        let text = "word ".repeat(300);
        let chunks = split_into_chunks(&text, 800);

        assert!(chunks.len() > 1);
        assert!(chunks.iter().all(|c| c.chars().count() <= 800));
        assert!(chunks.iter().all(|c| c.starts_with("word") && c.ends_with("word")));
    }

    #[test]
    fn test_long_unbroken_sentence_is_cut_at_limit() {
        let text = "字".repeat(2000);
        let chunks = split_into_chunks(&text, 800);

        let lengths: Vec<_> = chunks.iter().map(|c| c.chars().count()).collect();
        assert_eq!(lengths, vec![800, 800, 400]);
    }

    #[test]
    fn test_chunks_respect_limit_and_keep_all_text() {
        let sentence = "The quick brown fox jumps over the lazy dog. ";
        let text = sentence.repeat(60);
        let chunks = split_into_chunks(&text, MAX_CHUNK_CHARS);

        assert!(chunks.len() >= 3);
        assert!(chunks.iter().all(|c| c.chars().count() <= MAX_CHUNK_CHARS));
        assert_eq!(without_whitespace(&chunks.concat()), without_whitespace(&text));
    }
}

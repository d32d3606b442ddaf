/// Default max characters per chunk handed to the model per call.
pub const DEFAULT_MAX_CHUNK: usize = 1000;

/// Splits text into consecutive non-overlapping slices of at most
/// `max_chunk` characters, in order; the last chunk may be shorter.
///
/// Slicing is pure arithmetic on character counts, deliberately not
/// sentence- or token-aware, so mid-word cuts are expected. Cuts land on
/// `char` boundaries, never inside a UTF-8 scalar. Concatenating the
/// returned chunks reproduces the input exactly.
pub fn chunk_text(text: &str, max_chunk: usize) -> Vec<&str> {
    assert!(max_chunk > 0, "max_chunk must be positive");
    let mut chunks = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        let cut = rest
            .char_indices()
            .nth(max_chunk)
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        let (head, tail) = rest.split_at(cut);
        chunks.push(head);
        rest = tail;
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_a_single_chunk() {
        let chunks = chunk_text("hello world", 1000);
        assert_eq!(chunks, vec!["hello world"]);
    }

    #[test]
    fn text_at_exact_boundary_is_one_chunk() {
        let text = "a".repeat(10);
        assert_eq!(chunk_text(&text, 10), vec![text.as_str()]);
    }

    #[test]
    fn chunk_count_is_ceil_of_length_over_max() {
        let text = "x".repeat(2500);
        let chunks = chunk_text(&text, 1000);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].len(), 1000);
        assert_eq!(chunks[1].len(), 1000);
        assert_eq!(chunks[2].len(), 500);
    }

    #[test]
    fn concatenation_reproduces_input() {
        let text = "The quick brown fox jumps over the lazy dog. ".repeat(40);
        let chunks = chunk_text(&text, 100);
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn counts_characters_not_bytes() {
        // Three-byte scalars; a byte-based slicer would panic mid-char.
        let text = "€".repeat(7);
        let chunks = chunk_text(&text, 3);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].chars().count(), 3);
        assert_eq!(chunks[2].chars().count(), 1);
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn empty_text_yields_no_chunks() {
        assert!(chunk_text("", 1000).is_empty());
    }
}

//! Small shared utilities.

/// Split a text into fixed-size chunks for delivery.
///
/// Every chunk except possibly the last contains exactly `max_len`
/// characters; concatenating the chunks reproduces the input. Splits may
/// land mid-word: chunking is purely size-driven, with no boundary
/// awareness. An empty input yields an empty vector.
///
/// Counting is per `char`, so multi-byte characters are never split.
#[must_use]
pub fn split_into_chunks(text: &str, max_len: usize) -> Vec<String> {
    assert!(max_len > 0, "chunk length must be positive");

    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut count = 0;

    for ch in text.chars() {
        current.push(ch);
        count += 1;
        if count == max_len {
            chunks.push(std::mem::take(&mut current));
            count = 0;
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concatenation_reproduces_input() {
        let text = "The quick brown fox jumps over the lazy dog";
        for max_len in [1, 3, 7, 44, 100] {
            let chunks = split_into_chunks(text, max_len);
            assert_eq!(chunks.concat(), text, "max_len = {max_len}");
        }
    }

    #[test]
    fn test_all_chunks_full_except_last() {
        let text = "abcdefghij";
        let chunks = split_into_chunks(text, 4);
        assert_eq!(chunks, vec!["abcd", "efgh", "ij"]);
        for chunk in &chunks[..chunks.len() - 1] {
            assert_eq!(chunk.chars().count(), 4);
        }
    }

    #[test]
    fn test_exact_multiple() {
        let chunks = split_into_chunks("abcdef", 3);
        assert_eq!(chunks, vec!["abc", "def"]);
    }

    #[test]
    fn test_empty_input() {
        let chunks = split_into_chunks("", 4096);
        assert!(chunks.is_empty());
    }

    #[test]
    fn test_short_input_is_single_chunk() {
        let chunks = split_into_chunks("hello", 4096);
        assert_eq!(chunks, vec!["hello"]);
    }

    #[test]
    fn test_multibyte_chars_not_split() {
        let text = "héllö wörld émoji 🎙️ tëst";
        let chunks = split_into_chunks(text, 5);
        assert_eq!(chunks.concat(), text);
        for chunk in &chunks[..chunks.len() - 1] {
            assert_eq!(chunk.chars().count(), 5);
        }
    }
}

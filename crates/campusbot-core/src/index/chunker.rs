//! Document chunking for embedding
//!
//! Windows of at most `chunk_size` characters that prefer to end after a
//! paragraph break or a period, with `overlap` characters carried into the
//! next window.

/// Default chunk length in characters
pub const DEFAULT_CHUNK_SIZE: usize = 500;

/// Default overlap between consecutive chunks in characters
pub const DEFAULT_CHUNK_OVERLAP: usize = 50;

/// A raw chunk window, in character offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Split `text` into trimmed, non-empty chunks
pub fn chunk_text(text: &str, chunk_size: usize, overlap: usize) -> Vec<String> {
    let offsets = char_offsets(text);
    chunk_spans(text, chunk_size, overlap)
        .into_iter()
        .map(|span| text[offsets[span.start]..offsets[span.end]].trim().to_string())
        .filter(|chunk| !chunk.is_empty())
        .collect()
}

/// Compute the raw chunk windows for `text`.
///
/// Windows are untrimmed and may be whitespace-only. The first starts at 0,
/// the last ends at the text length, and each next window starts `overlap`
/// characters before the previous end.
pub fn chunk_spans(text: &str, chunk_size: usize, overlap: usize) -> Vec<Span> {
    let chunk_size = chunk_size.max(1);
    let overlap = overlap.min(chunk_size - 1);

    let chars: Vec<char> = text.chars().collect();
    let len = chars.len();
    let mut spans = Vec::new();
    let mut start = 0;

    while start < len {
        let limit = (start + chunk_size).min(len);
        let mut end = limit;

        if limit < len {
            // A boundary only counts if the next window still moves forward
            if let Some(boundary) = natural_end(&chars[start..limit]) {
                if boundary > overlap {
                    end = start + boundary;
                }
            }
        }

        spans.push(Span { start, end });

        if end >= len {
            break;
        }
        start = end.saturating_sub(overlap);
    }

    spans
}

/// Relative end of the window after its last `\n\n` or `.`, whichever is later
fn natural_end(window: &[char]) -> Option<usize> {
    let after_period = window.iter().rposition(|&c| c == '.').map(|pos| pos + 1);
    let after_paragraph = window
        .windows(2)
        .rposition(|pair| pair == ['\n', '\n'])
        .map(|pos| pos + 2);

    match (after_period, after_paragraph) {
        (Some(p), Some(n)) => Some(p.max(n)),
        (p, n) => p.or(n),
    }
}

/// Byte offset of every char boundary, plus the text length
fn char_offsets(text: &str) -> Vec<usize> {
    text.char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_chunk_small_content() {
        let content = "Small content.";
        let chunks = chunk_text(content, 100, 20);
        assert_eq!(chunks, vec![content.to_string()]);
    }

    #[test]
    fn test_chunks_end_at_boundaries() {
        let text = "Sentence one. Sentence two.\n\nParagraph two.";
        let chunks = chunk_text(text, 20, 5);

        assert_eq!(chunks[0], "Sentence one.");
        for chunk in &chunks {
            assert!(chunk.ends_with('.'), "chunk ends mid-sentence: {:?}", chunk);
            assert!(chunk.chars().count() <= 20);
        }
        assert!(chunks.last().unwrap().ends_with("Paragraph two."));
    }

    #[test]
    fn test_prefers_later_boundary() {
        // Period after the paragraph break wins
        let text = "Alpha\n\nBeta. Gamma delta epsilon zeta";
        let spans = chunk_spans(text, 20, 0);
        assert_eq!(spans[0], Span { start: 0, end: 12 });

        // Paragraph break after the period wins
        let text = "Alpha beta.\n\nGamma delta epsilon zeta";
        let spans = chunk_spans(text, 20, 0);
        assert_eq!(spans[0], Span { start: 0, end: 13 });
    }

    #[test]
    fn test_no_boundary_cuts_at_size() {
        let text = "abcdefghijklmnopqrstuvwxyz";
        let spans = chunk_spans(text, 10, 2);
        assert_eq!(
            spans,
            vec![
                Span { start: 0, end: 10 },
                Span { start: 8, end: 18 },
                Span { start: 16, end: 26 },
            ]
        );
    }

    #[test]
    fn test_boundary_inside_overlap_is_ignored() {
        // The only period sits within the overlap, so the window runs to its limit
        let text = "A. bcdefghijklmnopqrstuvwxyz";
        let spans = chunk_spans(text, 10, 5);
        assert_eq!(spans[0], Span { start: 0, end: 10 });
    }

    #[test]
    fn test_whitespace_chunks_dropped() {
        let text = format!("First.{}Second.", " ".repeat(30));
        let chunks = chunk_text(&text, 10, 0);
        assert_eq!(chunks, vec!["First.".to_string(), "Second.".to_string()]);
    }

    #[test]
    fn test_empty_text() {
        assert!(chunk_text("", 500, 50).is_empty());
        assert!(chunk_text("   \n\n  ", 500, 50).is_empty());
    }

    #[test]
    fn test_handles_unicode() {
        let content = "Hostel fees are ₹95,000. Mess charges are extra. Laundry is free — ask the warden.";
        let chunks = chunk_text(content, 20, 5);
        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(!chunk.is_empty());
            assert!(chunk.chars().count() <= 20);
        }
    }

    #[test]
    fn test_degenerate_parameters_terminate() {
        let text = "one. two. three. four.";
        assert!(!chunk_text(text, 0, 0).is_empty());
        assert!(!chunk_text(text, 3, 10).is_empty());
    }

    proptest! {
        #[test]
        fn prop_spans_reconstruct_text(
            text in "[a-z .\n]{0,400}",
            size in 1usize..80,
            overlap in 0usize..40,
        ) {
            let chars: Vec<char> = text.chars().collect();
            let spans = chunk_spans(&text, size, overlap);

            let mut rebuilt = String::new();
            let mut covered = 0;
            for span in &spans {
                prop_assert!(span.start <= covered);
                prop_assert!(span.end > covered);
                prop_assert!(span.len() <= size.max(1));
                rebuilt.extend(&chars[covered..span.end]);
                covered = span.end;
            }
            prop_assert_eq!(rebuilt, text);
        }

        #[test]
        fn prop_chunks_bounded_and_non_empty(
            text in "[a-zA-Z .\n]{0,400}",
            size in 1usize..80,
            overlap in 0usize..40,
        ) {
            for chunk in chunk_text(&text, size, overlap) {
                prop_assert!(!chunk.trim().is_empty());
                prop_assert!(chunk.chars().count() <= size);
            }
        }

        #[test]
        fn prop_chunking_is_deterministic(
            text in "[a-z .\n]{0,300}",
            size in 1usize..60,
            overlap in 0usize..30,
        ) {
            prop_assert_eq!(
                chunk_text(&text, size, overlap),
                chunk_text(&text, size, overlap)
            );
        }
    }
}

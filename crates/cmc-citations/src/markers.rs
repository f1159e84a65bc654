//! Inline citation marker resolution
//!
//! Document text refers to citations with bracketed decimal markers such as
//! `[12]`. [`resolve`] splits a line of text into [`Segment`]s: literal text,
//! and markers that resolved against the document's citation collection.
//!
//! Markers are found with a single left-to-right byte scan for `[`, one or more
//! ASCII digits, and `]`. All three are ASCII, so every match boundary is also
//! a UTF-8 char boundary and slicing the input is always valid.
//!
//! Unresolved markers (no citation with that id, or a digit run too large for
//! an id) are not special: they stay inside the surrounding plain text, so
//! `"[2] unknown"` with no citation 2 is a single plain segment.
//!
//! # Example
//!
//! ```
//! use cmc_citations::{resolve, Segment};
//! use cmc_domain::Citation;
//!
//! let citations = vec![Citation::new(1, "ICH Q6A guideline", "ICH Q6A")];
//! let segments = resolve("Limits follow [1].", &citations);
//! assert_eq!(segments.len(), 3);
//! assert!(matches!(segments[1], Segment::ResolvedCitation { citation_id: 1, .. }));
//! ```

use std::collections::HashMap;

use cmc_domain::{parse_citation_id, Citation, CitationId};
use serde::Serialize;
use tracing::trace;

/// Immutable id → citation lookup built once per call (or once per document)
///
/// When the collection violates id uniqueness, the citation that appears
/// last wins.
#[derive(Debug, Clone, Default)]
pub struct CitationIndex<'a> {
    by_id: HashMap<CitationId, &'a Citation>,
}

impl<'a> CitationIndex<'a> {
    /// Index a citation collection
    pub fn new(citations: &'a [Citation]) -> Self {
        citations.iter().collect()
    }

    /// Look up a citation by id
    pub fn get(&self, id: CitationId) -> Option<&'a Citation> {
        self.by_id.get(&id).copied()
    }

    /// Check if a citation id is present
    pub fn contains(&self, id: CitationId) -> bool {
        self.by_id.contains_key(&id)
    }

    /// Number of distinct ids
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Check if the index is empty
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

impl<'a> FromIterator<&'a Citation> for CitationIndex<'a> {
    fn from_iter<I: IntoIterator<Item = &'a Citation>>(iter: I) -> Self {
        let mut by_id = HashMap::new();
        for citation in iter {
            by_id.insert(citation.id, citation);
        }
        Self { by_id }
    }
}

/// One unit of resolved output
///
/// Segments borrow from the input text and citation collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Segment<'a> {
    /// Literal text, including any unresolved markers
    PlainText { value: &'a str },

    /// A marker that resolved to a citation in the collection
    ResolvedCitation {
        citation_id: CitationId,
        /// The raw marker text this segment replaces (e.g., `[01]`)
        marker: &'a str,
        citation: &'a Citation,
    },
}

impl<'a> Segment<'a> {
    /// The slice of the original input this segment covers
    pub fn source_text(&self) -> &'a str {
        match self {
            Self::PlainText { value } => value,
            Self::ResolvedCitation { marker, .. } => marker,
        }
    }

    /// The resolved citation, if this segment is one
    pub fn citation(&self) -> Option<&'a Citation> {
        match self {
            Self::PlainText { .. } => None,
            Self::ResolvedCitation { citation, .. } => Some(citation),
        }
    }

    pub fn is_citation(&self) -> bool {
        matches!(self, Self::ResolvedCitation { .. })
    }
}

/// Rebuild the original input from its segments
pub fn concat_source(segments: &[Segment<'_>]) -> String {
    segments.iter().map(Segment::source_text).collect()
}

/// A well-formed `[digits]` marker located in the text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MarkerMatch<'a> {
    start: usize,
    end: usize,
    digits: &'a str,
}

/// Iterator over non-overlapping `[digits]` markers, left to right
struct MarkerScanner<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> MarkerScanner<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }
}

impl<'a> Iterator for MarkerScanner<'a> {
    type Item = MarkerMatch<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let bytes = self.text.as_bytes();

        while self.pos < bytes.len() {
            let start = self.pos;
            if bytes[start] != b'[' {
                self.pos += 1;
                continue;
            }

            let digits_start = start + 1;
            let digits_end = digits_start
                + bytes[digits_start..]
                    .iter()
                    .take_while(|b| b.is_ascii_digit())
                    .count();

            if digits_end > digits_start && bytes.get(digits_end) == Some(&b']') {
                self.pos = digits_end + 1;
                return Some(MarkerMatch {
                    start,
                    end: digits_end + 1,
                    digits: &self.text[digits_start..digits_end],
                });
            }

            // A digit can never open a marker, so skip the whole run.
            self.pos = digits_end.max(digits_start);
        }

        None
    }
}

/// Resolve the citation markers in `text` against a citation collection
pub fn resolve<'a>(text: &'a str, citations: &'a [Citation]) -> Vec<Segment<'a>> {
    let index = CitationIndex::new(citations);
    resolve_with_index(text, &index)
}

/// Resolve the citation markers in `text` against a prebuilt index
///
/// Use this when resolving many lines of the same document.
pub fn resolve_with_index<'a>(text: &'a str, index: &CitationIndex<'a>) -> Vec<Segment<'a>> {
    let mut segments = Vec::new();
    let mut plain_start = 0;

    for m in MarkerScanner::new(text) {
        let marker = &text[m.start..m.end];
        let Some((id, citation)) =
            parse_citation_id(m.digits).and_then(|id| index.get(id).map(|c| (id, c)))
        else {
            trace!(marker, "unresolved citation marker left as text");
            continue;
        };

        if m.start > plain_start {
            segments.push(Segment::PlainText {
                value: &text[plain_start..m.start],
            });
        }
        segments.push(Segment::ResolvedCitation {
            citation_id: id,
            marker,
            citation,
        });
        plain_start = m.end;
    }

    if plain_start < text.len() {
        segments.push(Segment::PlainText {
            value: &text[plain_start..],
        });
    }

    segments
}

/// Ids of every well-formed marker in `text`, in order of appearance
///
/// Markers whose digit run overflows a [`CitationId`] are skipped.
pub fn marker_ids(text: &str) -> Vec<CitationId> {
    MarkerScanner::new(text)
        .filter_map(|m| parse_citation_id(m.digits))
        .collect()
}

/// Raw text of every marker in `text` that does not resolve against `index`
pub fn unresolved_markers<'t>(text: &'t str, index: &CitationIndex<'_>) -> Vec<&'t str> {
    MarkerScanner::new(text)
        .filter(|m| !parse_citation_id(m.digits).is_some_and(|id| index.contains(id)))
        .map(|m| &text[m.start..m.end])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn plain(value: &str) -> Segment<'_> {
        Segment::PlainText { value }
    }

    fn cited<'a>(marker: &'a str, citation: &'a Citation) -> Segment<'a> {
        Segment::ResolvedCitation {
            citation_id: citation.id,
            marker,
            citation,
        }
    }

    fn sample_citations() -> Vec<Citation> {
        vec![
            Citation::new(1, "ICH Q6A guideline for specifications", "ICH Q6A").with_page(15),
            Citation::new(2, "Stability testing of new drug substances", "ICH Q1A").with_page(3),
        ]
    }

    #[test]
    fn test_resolves_markers_in_order() {
        let citations = sample_citations();
        let segments = resolve("See [1] and [2].", &citations);
        assert_eq!(
            segments,
            vec![
                plain("See "),
                cited("[1]", &citations[0]),
                plain(" and "),
                cited("[2]", &citations[1]),
                plain("."),
            ]
        );
    }

    #[test]
    fn test_unresolved_marker_stays_in_plain_text() {
        let citations = vec![Citation::new(1, "a", "A")];
        assert_eq!(resolve("[2] unknown", &citations), vec![plain("[2] unknown")]);
    }

    #[test]
    fn test_unresolved_between_resolved() {
        let citations = sample_citations();
        let segments = resolve("[1] then [9] then [2]", &citations);
        assert_eq!(
            segments,
            vec![
                cited("[1]", &citations[0]),
                plain(" then [9] then "),
                cited("[2]", &citations[1]),
            ]
        );
    }

    #[test]
    fn test_adjacent_markers() {
        let citations = sample_citations();
        let segments = resolve("[1][2]", &citations);
        assert_eq!(
            segments,
            vec![cited("[1]", &citations[0]), cited("[2]", &citations[1])]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(resolve("", &sample_citations()).is_empty());
    }

    #[test]
    fn test_leading_zeros_resolve_and_keep_marker() {
        let citations = sample_citations();
        let segments = resolve("x[01]", &citations);
        assert_eq!(segments, vec![plain("x"), cited("[01]", &citations[0])]);
        assert_eq!(concat_source(&segments), "x[01]");
    }

    #[rstest]
    #[case::letters("[abc]")]
    #[case::unterminated("see [1")]
    #[case::empty_brackets("[]")]
    #[case::signed("[+1]")]
    #[case::spaced("[ 1 ]")]
    #[case::overflow("[99999999999999999999999999]")]
    fn test_malformed_markers_pass_through(#[case] text: &str) {
        let citations = sample_citations();
        assert_eq!(resolve(text, &citations), vec![plain(text)]);
    }

    #[test]
    fn test_nested_open_bracket() {
        let citations = sample_citations();
        let segments = resolve("[[1]]", &citations);
        assert_eq!(
            segments,
            vec![plain("["), cited("[1]", &citations[0]), plain("]")]
        );
    }

    #[test]
    fn test_multibyte_text_around_markers() {
        let citations = sample_citations();
        let text = "Pureté ≥ 99 % [1] — conformément";
        let segments = resolve(text, &citations);
        assert_eq!(segments.len(), 3);
        assert_eq!(concat_source(&segments), text);
    }

    #[test]
    fn test_duplicate_ids_last_write_wins() {
        let citations = vec![Citation::new(1, "first", "A"), Citation::new(1, "second", "B")];
        let index = CitationIndex::new(&citations);
        assert_eq!(index.len(), 1);
        assert_eq!(index.get(1).map(|c| c.text.as_str()), Some("second"));

        let segments = resolve_with_index("[1]", &index);
        assert_eq!(segments[0].citation().map(|c| c.source.as_str()), Some("B"));
    }

    #[test]
    fn test_marker_ids_and_unresolved() {
        let citations = sample_citations();
        let index = CitationIndex::new(&citations);
        let text = "[2] [7] [abc] [1] [99999999999999999999999]";
        assert_eq!(marker_ids(text), vec![2, 7, 1]);
        assert_eq!(
            unresolved_markers(text, &index),
            vec!["[7]", "[99999999999999999999999]"]
        );
    }

    #[test]
    fn test_segment_serializes_with_kind_tag() {
        let citations = vec![Citation::new(3, "t", "S")];
        let segments = resolve("a[3]", &citations);
        let json = serde_json::to_value(&segments).unwrap();
        assert_eq!(json[0]["kind"], "plain_text");
        assert_eq!(json[0]["value"], "a");
        assert_eq!(json[1]["kind"], "resolved_citation");
        assert_eq!(json[1]["citation_id"], 3);
        assert_eq!(json[1]["citation"]["source"], "S");
    }
}

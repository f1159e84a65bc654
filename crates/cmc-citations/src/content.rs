//! Paragraph and line layout of section content
//!
//! Section content is free text: paragraphs are separated by a blank line and
//! lines within a paragraph by a newline. Each line is resolved on its own,
//! against one index shared by the whole section.

use cmc_domain::{Citation, CitationId};
use serde::Serialize;

use crate::markers::{concat_source, resolve_with_index, CitationIndex, Segment};

const PARAGRAPH_BREAK: &str = "\n\n";

/// A single resolved line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line<'a> {
    pub segments: Vec<Segment<'a>>,
}

impl<'a> Line<'a> {
    /// The original text of the line
    pub fn plain_text(&self) -> String {
        concat_source(&self.segments)
    }

    /// Citations referenced on this line, in order, repeats included
    pub fn citations(&self) -> impl Iterator<Item = &'a Citation> + '_ {
        self.segments.iter().filter_map(Segment::citation)
    }
}

/// A paragraph of resolved lines
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paragraph<'a> {
    pub lines: Vec<Line<'a>>,
}

/// Lay out and resolve a block of section content
pub fn layout_content<'a>(content: &'a str, citations: &'a [Citation]) -> Vec<Paragraph<'a>> {
    let index = CitationIndex::new(citations);
    layout_with_index(content, &index)
}

/// Lay out section content against a prebuilt index
///
/// Paragraphs that are empty or whitespace-only are dropped. Lines are kept
/// as written, including empty ones.
pub fn layout_with_index<'a>(content: &'a str, index: &CitationIndex<'a>) -> Vec<Paragraph<'a>> {
    content
        .split(PARAGRAPH_BREAK)
        .filter(|p| !p.trim().is_empty())
        .map(|paragraph| Paragraph {
            lines: paragraph
                .split('\n')
                .map(|line| Line {
                    segments: resolve_with_index(line, index),
                })
                .collect(),
        })
        .collect()
}

/// Distinct ids cited in laid-out content, in order of first appearance
pub fn cited_ids(paragraphs: &[Paragraph<'_>]) -> Vec<CitationId> {
    let mut ids: Vec<CitationId> = Vec::new();
    for citation in paragraphs
        .iter()
        .flat_map(|p| p.lines.iter())
        .flat_map(|l| l.citations())
    {
        if !ids.contains(&citation.id) {
            ids.push(citation.id);
        }
    }
    ids
}

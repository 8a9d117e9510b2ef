//! Display-ready block assembly.
//!
//! The second phase of the pipeline: turns IR chapters into flat block
//! lists a renderer can walk top to bottom. Each verse becomes a span with
//! a scroll anchor, an optional number label, and text runs interleaved
//! with footnote callouts. No layout decisions are left to the caller
//! beyond drawing what is here.

use serde::{Deserialize, Serialize};

use crate::canon::BookId;
use crate::ir::{Bible, Chapter, ChapterElement, Verse, VerseBlock};
use crate::usj::marker;

/// Layout class of a block, derived from its paragraph marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BlockStyle {
    /// Flowing prose, justified margins.
    Justified,
    /// A poetry line, indented one to four stops.
    Poetry { indent: u8 },
}

impl BlockStyle {
    pub fn for_marker(marker: &str) -> Self {
        if marker::is_poetry(marker) {
            BlockStyle::Poetry {
                indent: marker::poetry_indent(marker),
            }
        } else {
            BlockStyle::Justified
        }
    }
}

/// One display block of a chapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    BookTitle {
        text: String,
    },
    Heading {
        level: u8,
        text: String,
    },
    ReferenceLine {
        text: String,
    },
    Blank,
    Prose {
        style: BlockStyle,
        marker: String,
        text: String,
    },
    Verses {
        style: BlockStyle,
        marker: String,
        spans: Vec<VerseSpan>,
    },
}

/// One verse's rendering within a block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerseSpan {
    /// Scroll anchor (`"GEN-1-1"`). Continuation spans repeat the anchor
    /// of the verse they extend; lookups resolve to the first occurrence.
    pub anchor: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<SpanLabel>,
    pub runs: Vec<Run>,
}

/// The number shown in front of a verse span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SpanLabel {
    /// Verse 1 carries the chapter number, set large.
    Chapter { number: u32 },
    Verse { number: u32 },
}

/// A run of verse text or an inline footnote callout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Run {
    Text {
        text: String,
    },
    Note {
        letter: String,
        reference: String,
        text: String,
    },
}

/// A chapter ready for rendering, with its stable id for navigation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormattedChapter {
    pub book: BookId,
    pub chapter: u32,
    /// Stable chapter id (`"GEN-1"`).
    pub id: String,
    pub blocks: Vec<Block>,
}

/// Format every chapter of a Bible in reading order.
pub fn format_bible(bible: &Bible) -> Vec<FormattedChapter> {
    bible
        .chapters()
        .map(|chapter| FormattedChapter {
            book: chapter.book,
            chapter: chapter.number,
            id: chapter.id(),
            blocks: format_chapter(chapter),
        })
        .collect()
}

/// Format a single chapter into display blocks.
pub fn format_chapter(chapter: &Chapter) -> Vec<Block> {
    chapter
        .elements
        .iter()
        .map(|element| format_element(chapter, element))
        .collect()
}

fn format_element(chapter: &Chapter, element: &ChapterElement) -> Block {
    match element {
        ChapterElement::BookTitle { text } => Block::BookTitle { text: text.clone() },
        ChapterElement::Heading { level, text } => Block::Heading {
            level: *level,
            text: text.clone(),
        },
        ChapterElement::ReferenceLine { text } => Block::ReferenceLine { text: text.clone() },
        ChapterElement::Blank => Block::Blank,
        ChapterElement::Prose { style, text } => Block::Prose {
            style: BlockStyle::for_marker(style),
            marker: style.clone(),
            text: text.clone(),
        },
        ChapterElement::Verses(block) => format_verse_block(chapter, block),
    }
}

fn format_verse_block(chapter: &Chapter, block: &VerseBlock) -> Block {
    let spans = block
        .verses
        .iter()
        .map(|verse| format_verse(chapter, verse, block.continuation))
        .collect();
    Block::Verses {
        style: BlockStyle::for_marker(&block.style),
        marker: block.style.clone(),
        spans,
    }
}

fn format_verse(chapter: &Chapter, verse: &Verse, continuation: bool) -> VerseSpan {
    // Continuations never repeat the number; a fresh verse 1 shows the
    // chapter number instead of "1".
    let label = if continuation {
        None
    } else if verse.number == 1 {
        Some(SpanLabel::Chapter {
            number: chapter.number,
        })
    } else {
        Some(SpanLabel::Verse {
            number: verse.number,
        })
    };

    let mut runs = Vec::new();
    for part in &verse.parts {
        if !part.text.is_empty() {
            runs.push(Run::Text {
                text: part.text.clone(),
            });
        }
        for footnote in &part.footnotes {
            runs.push(Run::Note {
                letter: footnote.letter.clone(),
                reference: footnote.reference.clone(),
                text: footnote.text.clone(),
            });
        }
    }

    VerseSpan {
        anchor: verse.id(),
        label,
        runs,
    }
}

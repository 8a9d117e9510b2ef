//! Semantic intermediate representation of a Bible text.
//!
//! The IR is the format-agnostic middle of the pipeline: importers
//! ([`crate::import`]) produce it, the formatter ([`crate::format`]) and the
//! exporters consume it. It records what the source meant (books, chapters,
//! headings, verse blocks, footnotes) and forgets how the source spelled it
//! (node nesting, char markup, canonical keys).
//!
//! Verse text is stored in *parts*: a verse's flowing text split at each
//! footnote attachment point, so a renderer can interleave text runs with
//! footnote callouts without re-scanning.

mod compile;

pub use compile::compile;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::canon::BookId;
use crate::reference::Reference;

/// A complete Bible: books in document order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Bible {
    pub books: Vec<Book>,
}

impl Bible {
    /// Look up a book by id.
    pub fn book(&self, id: BookId) -> Option<&Book> {
        self.books.iter().find(|b| b.id == id)
    }

    /// All chapters of all books, in reading order.
    pub fn chapters(&self) -> impl Iterator<Item = &Chapter> {
        self.books.iter().flat_map(|b| b.chapters.iter())
    }

    pub fn chapter_count(&self) -> usize {
        self.books.iter().map(|b| b.chapters.len()).sum()
    }

    /// Number of distinct verses (split verses like `12a`/`12b` count once).
    pub fn verse_count(&self) -> usize {
        self.chapters().map(Chapter::verse_count).sum()
    }

    pub fn footnote_count(&self) -> usize {
        self.chapters()
            .flat_map(Chapter::verses)
            .flat_map(|v| v.parts.iter())
            .map(|p| p.footnotes.len())
            .sum()
    }
}

/// One book: canonical id, display title, chapters in document order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub chapters: Vec<Chapter>,
}

impl Book {
    pub fn chapter(&self, number: u32) -> Option<&Chapter> {
        self.chapters.iter().find(|c| c.number == number)
    }
}

/// One chapter: an ordered run of display elements.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chapter {
    pub book: BookId,
    pub number: u32,
    pub elements: Vec<ChapterElement>,
}

impl Chapter {
    pub fn reference(&self) -> Reference {
        Reference::chapter(self.book, self.number)
    }

    /// The chapter's stable id (`"GEN-1"`).
    pub fn id(&self) -> String {
        self.reference().id()
    }

    /// Every verse entry in document order.
    ///
    /// A verse that spans paragraphs (poetry, mid-verse paragraph breaks)
    /// appears once per block it occupies; the later entries sit in blocks
    /// with `continuation` set.
    pub fn verses(&self) -> impl Iterator<Item = &Verse> {
        self.elements.iter().flat_map(|e| match e {
            ChapterElement::Verses(block) => block.verses.iter(),
            _ => [].iter(),
        })
    }

    /// Number of distinct verses in this chapter.
    pub fn verse_count(&self) -> usize {
        self.verses()
            .map(|v| v.number)
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// Distinct verse numbers in ascending order.
    pub fn verse_numbers(&self) -> Vec<u32> {
        let set: BTreeSet<u32> = self.verses().map(|v| v.number).collect();
        set.into_iter().collect()
    }

    /// The full text of one verse, with footnotes excluded.
    ///
    /// Segments from separate blocks (continuations) are joined with a
    /// space. Returns `None` when the chapter has no such verse.
    pub fn verse_text(&self, number: u32) -> Option<String> {
        let mut out = String::new();
        let mut found = false;

        for verse in self.verses().filter(|v| v.number == number) {
            found = true;
            let segment: String = verse.parts.iter().map(|p| p.text.as_str()).collect();
            let segment = segment.trim();
            if !segment.is_empty() {
                if !out.is_empty() {
                    out.push(' ');
                }
                out.push_str(segment);
            }
        }

        found.then_some(out)
    }
}

/// A display element within a chapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChapterElement {
    /// The book's display title, emitted at the top of chapter 1.
    BookTitle { text: String },
    /// A section heading (`s1`, `s2`, `sr`, ...). Level 1 is the major
    /// section head.
    Heading { level: u8, text: String },
    /// A parallel-passage reference line (`r`).
    ReferenceLine { text: String },
    /// Vertical spacing (`b`, or an empty paragraph).
    Blank,
    /// Prose outside any verse (style is the raw USFM marker).
    Prose { style: String, text: String },
    /// A run of verse text under one paragraph style.
    Verses(VerseBlock),
}

/// Verses under a single paragraph marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerseBlock {
    /// The raw USFM paragraph marker (`"p"`, `"m"`, `"q1"`, ...).
    pub style: String,
    /// True when this block re-opens a verse begun in an earlier block
    /// (a poetry line or paragraph continuing mid-verse).
    pub continuation: bool,
    pub verses: Vec<Verse>,
}

/// One verse's content within one block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verse {
    pub number: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sid: Option<String>,
    pub reference: Reference,
    pub parts: Vec<VersePart>,
}

impl Verse {
    /// The verse's stable id (`"GEN-1-1"`), used as a scroll anchor.
    pub fn id(&self) -> String {
        self.reference.id()
    }
}

/// A run of verse text followed by the footnotes attached at its end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersePart {
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub footnotes: Vec<Footnote>,
}

/// A footnote: origin reference (`"1:2"`), body text, and the letter it is
/// called out with (`"a"`, `"b"`, ... per chapter).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Footnote {
    pub reference: String,
    pub text: String,
    pub letter: String,
}

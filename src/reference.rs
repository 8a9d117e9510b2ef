//! Scripture references: stable ids, human-readable parsing, and display.
//!
//! A [`Reference`] points at a book, a chapter, or a single verse. The id
//! form (`"GEN"`, `"GEN-1"`, `"GEN-1-1"`) is the stable key used for scroll
//! anchors and verse lookup; the display form (`"Genesis 1:1"`) is what
//! readers see.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::canon::BookId;

/// A reference to a book, chapter, or verse.
///
/// `verse` is only meaningful when `chapter` is present; the constructors
/// maintain that invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Reference {
    pub book: BookId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chapter: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verse: Option<u32>,
}

impl Reference {
    /// Reference to a whole book.
    pub fn book(book: BookId) -> Reference {
        Reference {
            book,
            chapter: None,
            verse: None,
        }
    }

    /// Reference to a chapter.
    pub fn chapter(book: BookId, chapter: u32) -> Reference {
        Reference {
            book,
            chapter: Some(chapter),
            verse: None,
        }
    }

    /// Reference to a single verse.
    pub fn verse(book: BookId, chapter: u32, verse: u32) -> Reference {
        Reference {
            book,
            chapter: Some(chapter),
            verse: Some(verse),
        }
    }

    /// The stable id: `"GEN"`, `"GEN-1"`, or `"GEN-1-1"`.
    ///
    /// These ids are used as scroll anchors in rendered output and as keys
    /// in exported data.
    pub fn id(&self) -> String {
        match (self.chapter, self.verse) {
            (Some(c), Some(v)) => format!("{}-{}-{}", self.book.code(), c, v),
            (Some(c), None) => format!("{}-{}", self.book.code(), c),
            _ => self.book.code().to_string(),
        }
    }

    /// Parse a stable id back into a reference.
    ///
    /// Returns `None` for unknown book codes, non-numeric segments, or
    /// trailing segments beyond the verse.
    pub fn parse_id(id: &str) -> Option<Reference> {
        let mut parts = id.split('-');
        let book = BookId::from_code(parts.next()?)?;
        let chapter = match parts.next() {
            Some(s) => Some(parse_number(s)?),
            None => None,
        };
        let verse = match parts.next() {
            Some(s) => Some(parse_number(s)?),
            None => None,
        };
        if parts.next().is_some() {
            return None;
        }
        Some(Reference {
            book,
            chapter,
            verse,
        })
    }

    /// Parse either a stable id or a human-readable reference.
    ///
    /// Accepts `"GEN-1-1"`, `"John 3:16"`, `"1 Samuel 1:1"`,
    /// `"Song of Solomon 2"`, and bare book names or codes. Book names must
    /// match the canonical English name (case-insensitively); abbreviations
    /// other than the USFM code are not resolved.
    pub fn parse(text: &str) -> Option<Reference> {
        let text = text.trim();
        Self::parse_id(text).or_else(|| Self::parse_readable(text))
    }

    fn parse_readable(text: &str) -> Option<Reference> {
        if text.is_empty() {
            return None;
        }

        // A bare book name or code refers to the whole book.
        if let Some(book) = lookup_book(text) {
            return Some(Reference::book(book));
        }

        // Otherwise the final token must be "chapter" or "chapter:verse" and
        // everything before it the book name. Splitting on the last run of
        // whitespace keeps multi-word names ("1 Samuel") intact.
        let (head, tail) = text.rsplit_once(char::is_whitespace)?;
        let book = lookup_book(head.trim_end())?;

        match tail.split_once(':') {
            Some((c, v)) => Some(Reference::verse(book, parse_number(c)?, parse_number(v)?)),
            None => Some(Reference::chapter(book, parse_number(tail)?)),
        }
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.book.name())?;
        if let Some(c) = self.chapter {
            write!(f, " {c}")?;
            if let Some(v) = self.verse {
                write!(f, ":{v}")?;
            }
        }
        Ok(())
    }
}

/// An inclusive range of references, displayed in collapsed form.
///
/// Collapsing drops the parts the endpoints share: `"Genesis 1:1-3"` within
/// a chapter, `"Genesis 1:1-2:3"` within a book, and the full
/// `"Genesis 50:26-Exodus 1:1"` across books.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReferenceRange {
    pub start: Reference,
    pub end: Reference,
}

impl ReferenceRange {
    pub fn new(start: Reference, end: Reference) -> ReferenceRange {
        ReferenceRange { start, end }
    }

    /// A range covering a single reference.
    pub fn single(reference: Reference) -> ReferenceRange {
        ReferenceRange {
            start: reference,
            end: reference,
        }
    }
}

impl fmt::Display for ReferenceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.start)?;
        if self.start == self.end {
            return Ok(());
        }

        if self.start.book != self.end.book {
            return write!(f, "-{}", self.end);
        }

        if self.start.chapter == self.end.chapter {
            match self.end.verse {
                Some(v) => write!(f, "-{v}"),
                None => Ok(()),
            }
        } else {
            match (self.end.chapter, self.end.verse) {
                (Some(c), Some(v)) => write!(f, "-{c}:{v}"),
                (Some(c), None) => write!(f, "-{c}"),
                _ => Ok(()),
            }
        }
    }
}

fn lookup_book(s: &str) -> Option<BookId> {
    BookId::from_name(s).or_else(|| BookId::from_code(s))
}

/// Strict decimal parse: all digits, no sign, no surrounding whitespace.
fn parse_number(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

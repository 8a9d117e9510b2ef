//! Lightweight book and chapter metadata.
//!
//! A summary is what a navigation UI needs before any chapter text is
//! loaded: which books exist, how many chapters each has, and how many
//! verses each chapter holds. It serializes small and builds pickers and
//! jump menus without touching the full text.

use serde::{Deserialize, Serialize};

use crate::canon::BookId;
use crate::ir::Bible;

/// Per-book metadata for a whole Bible, in reading order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Summary(pub Vec<BookSummary>);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSummary {
    pub book: BookId,
    pub name: String,
    pub chapters: Vec<ChapterSummary>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterSummary {
    pub chapter: u32,
    /// Count of distinct verse numbers in the chapter.
    pub verses: u32,
}

impl Summary {
    pub fn from_bible(bible: &Bible) -> Self {
        Summary(
            bible
                .books
                .iter()
                .map(|book| BookSummary {
                    book: book.id,
                    name: book.title.clone(),
                    chapters: book
                        .chapters
                        .iter()
                        .map(|chapter| ChapterSummary {
                            chapter: chapter.number,
                            verses: chapter.verse_count() as u32,
                        })
                        .collect(),
                })
                .collect(),
        )
    }

    pub fn book(&self, id: BookId) -> Option<&BookSummary> {
        self.0.iter().find(|b| b.book == id)
    }

    pub fn chapter_count(&self) -> usize {
        self.0.iter().map(|b| b.chapters.len()).sum()
    }

    /// Every addressable id, book to chapter to verse, in reading order
    /// (`"JON"`, `"JON-1"`, `"JON-1-1"`, ...). Verse ids are enumerated
    /// from the count, so chapters with gaps in their numbering may list
    /// ids with no matching anchor.
    pub fn reference_ids(&self) -> Vec<String> {
        let mut ids = Vec::new();
        for book in &self.0 {
            let code = book.book.code();
            ids.push(code.to_string());
            for chapter in &book.chapters {
                ids.push(format!("{}-{}", code, chapter.chapter));
                for verse in 1..=chapter.verses {
                    ids.push(format!("{}-{}-{}", code, chapter.chapter, verse));
                }
            }
        }
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Book, Chapter, ChapterElement, Verse, VerseBlock, VersePart};
    use crate::reference::Reference;

    fn verse(book: BookId, chapter: u32, number: u32) -> Verse {
        Verse {
            number,
            sid: None,
            reference: Reference::verse(book, chapter, number),
            parts: vec![VersePart {
                text: format!("verse {number}"),
                footnotes: Vec::new(),
            }],
        }
    }

    fn chapter(book: BookId, number: u32, verses: Vec<Verse>) -> Chapter {
        Chapter {
            book,
            number,
            elements: vec![ChapterElement::Verses(VerseBlock {
                style: "p".to_string(),
                continuation: false,
                verses,
            })],
        }
    }

    fn sample_bible() -> Bible {
        Bible {
            books: vec![Book {
                id: BookId::Jonah,
                title: "Jonah".to_string(),
                chapters: vec![
                    chapter(
                        BookId::Jonah,
                        1,
                        vec![verse(BookId::Jonah, 1, 1), verse(BookId::Jonah, 1, 2)],
                    ),
                    chapter(BookId::Jonah, 2, vec![verse(BookId::Jonah, 2, 1)]),
                ],
            }],
        }
    }

    #[test]
    fn test_from_bible_counts() {
        let summary = Summary::from_bible(&sample_bible());
        assert_eq!(summary.0.len(), 1);
        assert_eq!(summary.chapter_count(), 2);

        let jonah = summary.book(BookId::Jonah).unwrap();
        assert_eq!(jonah.name, "Jonah");
        assert_eq!(
            jonah.chapters,
            vec![
                ChapterSummary {
                    chapter: 1,
                    verses: 2
                },
                ChapterSummary {
                    chapter: 2,
                    verses: 1
                },
            ]
        );
    }

    #[test]
    fn test_continuations_do_not_inflate_counts() {
        let mut bible = sample_bible();
        // Re-open verse 1 of chapter 2 in a continued poetry block.
        bible.books[0].chapters[1]
            .elements
            .push(ChapterElement::Verses(VerseBlock {
                style: "q1".to_string(),
                continuation: true,
                verses: vec![verse(BookId::Jonah, 2, 1)],
            }));

        let summary = Summary::from_bible(&bible);
        assert_eq!(summary.book(BookId::Jonah).unwrap().chapters[1].verses, 1);
    }

    #[test]
    fn test_reference_ids_enumeration() {
        let summary = Summary::from_bible(&sample_bible());
        assert_eq!(
            summary.reference_ids(),
            vec![
                "JON", "JON-1", "JON-1-1", "JON-1-2", "JON-2", "JON-2-1",
            ]
        );
    }

    #[test]
    fn test_serializes_as_bare_array() {
        let summary = Summary::from_bible(&sample_bible());
        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.starts_with('['));
        assert!(json.contains(r#""book":"JON""#));
        assert!(json.contains(r#""chapter":2,"verses":1"#));

        let back: Summary = serde_json::from_str(&json).unwrap();
        assert_eq!(back, summary);
    }
}

//! Navigation over a flattened Bible.
//!
//! Readers render the whole Bible as one scrollable chapter list. This
//! module maps references onto that list: which chapter index to jump to,
//! and which anchor id to settle on within it. It also builds the
//! clipboard text for a copied verse range.

use serde::{Deserialize, Serialize};

use crate::canon::BookId;
use crate::ir::{Bible, Chapter};
use crate::reference::{Reference, ReferenceRange};

/// All chapters of a Bible in reading order.
pub fn flatten(bible: &Bible) -> Vec<&Chapter> {
    bible.chapters().collect()
}

/// Where a reference lands in the flattened chapter list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrollTarget {
    /// Index into the flattened chapter list.
    pub chapter: usize,
    /// Anchor id to settle on within the chapter, present when the
    /// reference names a verse.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor: Option<String>,
}

/// Resolves references against one Bible's chapter list.
pub struct Navigator<'a> {
    chapters: Vec<&'a Chapter>,
}

impl<'a> Navigator<'a> {
    pub fn new(bible: &'a Bible) -> Self {
        Navigator {
            chapters: bible.chapters().collect(),
        }
    }

    pub fn chapters(&self) -> &[&'a Chapter] {
        &self.chapters
    }

    pub fn chapter_index(&self, book: BookId, chapter: u32) -> Option<usize> {
        self.chapters
            .iter()
            .position(|c| c.book == book && c.number == chapter)
    }

    /// Map a reference to a chapter index and optional verse anchor.
    ///
    /// A book-only reference lands on the book's first chapter. Verse
    /// existence is not checked; a missing anchor leaves the view at the
    /// top of the chapter.
    pub fn scroll_target(&self, reference: &Reference) -> Option<ScrollTarget> {
        match (reference.chapter, reference.verse) {
            (None, _) => {
                let chapter = self
                    .chapters
                    .iter()
                    .position(|c| c.book == reference.book)?;
                Some(ScrollTarget {
                    chapter,
                    anchor: None,
                })
            }
            (Some(number), None) => {
                let chapter = self.chapter_index(reference.book, number)?;
                Some(ScrollTarget {
                    chapter,
                    anchor: None,
                })
            }
            (Some(number), Some(_)) => {
                let chapter = self.chapter_index(reference.book, number)?;
                Some(ScrollTarget {
                    chapter,
                    anchor: Some(reference.id()),
                })
            }
        }
    }
}

/// Clipboard text for a verse range within one chapter: the verses joined
/// with spaces, then an attribution line with the collapsed reference.
///
/// Reversed bounds are swapped. Returns `None` when the chapter has no
/// verse in the range.
pub fn copy_verses(chapter: &Chapter, start: u32, end: u32) -> Option<String> {
    let (start, end) = if start <= end { (start, end) } else { (end, start) };

    let numbers: Vec<u32> = chapter
        .verse_numbers()
        .into_iter()
        .filter(|n| (start..=end).contains(n))
        .collect();
    let first = *numbers.first()?;
    let last = *numbers.last()?;

    let texts: Vec<String> = numbers
        .iter()
        .filter_map(|n| chapter.verse_text(*n))
        .filter(|t| !t.is_empty())
        .collect();

    let range = ReferenceRange::new(
        Reference::verse(chapter.book, chapter.number, first),
        Reference::verse(chapter.book, chapter.number, last),
    );
    Some(format!("{}\n\u{2014} {range}", texts.join(" ")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Book, ChapterElement, Verse, VerseBlock, VersePart};

    fn verse(book: BookId, chapter: u32, number: u32, text: &str) -> Verse {
        Verse {
            number,
            sid: None,
            reference: Reference::verse(book, chapter, number),
            parts: vec![VersePart {
                text: text.to_string(),
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
            books: vec![
                Book {
                    id: BookId::Obadiah,
                    title: "Obadiah".to_string(),
                    chapters: vec![chapter(
                        BookId::Obadiah,
                        1,
                        vec![verse(BookId::Obadiah, 1, 1, "The vision of Obadiah.")],
                    )],
                },
                Book {
                    id: BookId::Jonah,
                    title: "Jonah".to_string(),
                    chapters: vec![
                        chapter(
                            BookId::Jonah,
                            1,
                            vec![verse(BookId::Jonah, 1, 1, "Now the word of the LORD")],
                        ),
                        chapter(
                            BookId::Jonah,
                            2,
                            vec![
                                verse(BookId::Jonah, 2, 1, "From inside the fish"),
                                verse(BookId::Jonah, 2, 2, "he said:"),
                                verse(BookId::Jonah, 2, 3, "For You cast me into the deep,"),
                            ],
                        ),
                    ],
                },
            ],
        }
    }

    #[test]
    fn test_flatten_orders_chapters() {
        let bible = sample_bible();
        let chapters = flatten(&bible);
        let ids: Vec<String> = chapters.iter().map(|c| c.id()).collect();
        assert_eq!(ids, vec!["OBA-1", "JON-1", "JON-2"]);
    }

    #[test]
    fn test_chapter_index() {
        let bible = sample_bible();
        let nav = Navigator::new(&bible);
        assert_eq!(nav.chapter_index(BookId::Obadiah, 1), Some(0));
        assert_eq!(nav.chapter_index(BookId::Jonah, 2), Some(2));
        assert_eq!(nav.chapter_index(BookId::Jonah, 5), None);
        assert_eq!(nav.chapter_index(BookId::Genesis, 1), None);
    }

    #[test]
    fn test_scroll_target_precision() {
        let bible = sample_bible();
        let nav = Navigator::new(&bible);

        // Book only: first chapter, no anchor.
        assert_eq!(
            nav.scroll_target(&Reference::book(BookId::Jonah)),
            Some(ScrollTarget {
                chapter: 1,
                anchor: None
            })
        );

        assert_eq!(
            nav.scroll_target(&Reference::chapter(BookId::Jonah, 2)),
            Some(ScrollTarget {
                chapter: 2,
                anchor: None
            })
        );

        assert_eq!(
            nav.scroll_target(&Reference::verse(BookId::Jonah, 2, 3)),
            Some(ScrollTarget {
                chapter: 2,
                anchor: Some("JON-2-3".to_string())
            })
        );

        assert_eq!(nav.scroll_target(&Reference::book(BookId::Genesis)), None);
        assert_eq!(nav.scroll_target(&Reference::chapter(BookId::Jonah, 9)), None);
    }

    #[test]
    fn test_copy_single_verse() {
        let bible = sample_bible();
        let chapter = bible.book(BookId::Jonah).unwrap().chapter(2).unwrap();
        assert_eq!(
            copy_verses(chapter, 3, 3).as_deref(),
            Some("For You cast me into the deep,\n\u{2014} Jonah 2:3")
        );
    }

    #[test]
    fn test_copy_range_collapses_reference() {
        let bible = sample_bible();
        let chapter = bible.book(BookId::Jonah).unwrap().chapter(2).unwrap();
        assert_eq!(
            copy_verses(chapter, 1, 2).as_deref(),
            Some("From inside the fish he said:\n\u{2014} Jonah 2:1-2")
        );
    }

    #[test]
    fn test_copy_swaps_reversed_bounds() {
        let bible = sample_bible();
        let chapter = bible.book(BookId::Jonah).unwrap().chapter(2).unwrap();
        assert_eq!(copy_verses(chapter, 2, 1), copy_verses(chapter, 1, 2));
    }

    #[test]
    fn test_copy_clips_to_existing_verses() {
        let bible = sample_bible();
        let chapter = bible.book(BookId::Jonah).unwrap().chapter(2).unwrap();
        // Verses 4 and up do not exist; the range clips to 2-3.
        assert_eq!(
            copy_verses(chapter, 2, 40).as_deref(),
            Some("he said: For You cast me into the deep,\n\u{2014} Jonah 2:2-3")
        );
        assert_eq!(copy_verses(chapter, 10, 40), None);
    }
}

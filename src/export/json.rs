//! JSON exporters.
//!
//! Three shapes share one config:
//! - *Simple*: books, chapters, and verse texts with no markup, for search
//!   indexes and quick lookups.
//! - *Blocks*: the full display-block stream from [`crate::format`], what a
//!   reader front end consumes.
//! - *Summary*: the navigation metadata from [`crate::summary`].

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::canon::BookId;
use crate::error::Result;
use crate::format;
use crate::ir::Bible;
use crate::summary::Summary;

use super::Exporter;

/// Configuration shared by the JSON exporters.
#[derive(Debug, Clone, Default)]
pub struct JsonConfig {
    /// Indent the output for human eyes.
    pub pretty: bool,
}

/// A Bible reduced to plain verse text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleBible {
    pub books: Vec<SimpleBook>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleBook {
    pub book: BookId,
    pub name: String,
    pub chapters: Vec<SimpleChapter>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleChapter {
    pub chapter: u32,
    pub verses: Vec<SimpleVerse>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleVerse {
    pub verse: u32,
    pub text: String,
}

impl SimpleBible {
    /// Flatten a Bible to verse text, joining continuations and dropping
    /// footnotes and headings.
    pub fn from_bible(bible: &Bible) -> Self {
        SimpleBible {
            books: bible
                .books
                .iter()
                .map(|book| SimpleBook {
                    book: book.id,
                    name: book.title.clone(),
                    chapters: book
                        .chapters
                        .iter()
                        .map(|chapter| SimpleChapter {
                            chapter: chapter.number,
                            verses: chapter
                                .verse_numbers()
                                .into_iter()
                                .filter_map(|number| {
                                    chapter
                                        .verse_text(number)
                                        .map(|text| SimpleVerse {
                                            verse: number,
                                            text,
                                        })
                                })
                                .collect(),
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

/// Exporter for the simple verse-text shape.
#[derive(Debug, Clone, Default)]
pub struct SimpleJsonExporter {
    config: JsonConfig,
}

impl SimpleJsonExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: JsonConfig) -> Self {
        SimpleJsonExporter { config }
    }
}

impl Exporter for SimpleJsonExporter {
    fn export<W: Write>(&self, bible: &Bible, writer: &mut W) -> Result<()> {
        write_json(writer, &SimpleBible::from_bible(bible), self.config.pretty)
    }
}

/// Exporter for the display-block stream.
#[derive(Debug, Clone, Default)]
pub struct BlocksExporter {
    config: JsonConfig,
}

impl BlocksExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: JsonConfig) -> Self {
        BlocksExporter { config }
    }
}

impl Exporter for BlocksExporter {
    fn export<W: Write>(&self, bible: &Bible, writer: &mut W) -> Result<()> {
        write_json(writer, &format::format_bible(bible), self.config.pretty)
    }
}

/// Exporter for navigation metadata.
#[derive(Debug, Clone, Default)]
pub struct SummaryExporter {
    config: JsonConfig,
}

impl SummaryExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: JsonConfig) -> Self {
        SummaryExporter { config }
    }
}

impl Exporter for SummaryExporter {
    fn export<W: Write>(&self, bible: &Bible, writer: &mut W) -> Result<()> {
        write_json(writer, &Summary::from_bible(bible), self.config.pretty)
    }
}

fn write_json<W: Write, T: Serialize>(writer: &mut W, value: &T, pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *writer, value)?;
    } else {
        serde_json::to_writer(&mut *writer, value)?;
    }
    writer.write_all(b"\n")?;
    Ok(())
}

/// Write the simple verse-text shape to disk.
pub fn write_simple_json<P: AsRef<Path>>(bible: &Bible, path: P) -> Result<()> {
    let mut file = File::create(path)?;
    SimpleJsonExporter::new().export(bible, &mut file)
}

/// Write the display-block stream to disk.
pub fn write_blocks_json<P: AsRef<Path>>(bible: &Bible, path: P) -> Result<()> {
    let mut file = File::create(path)?;
    BlocksExporter::new().export(bible, &mut file)
}

/// Write navigation metadata to disk.
pub fn write_summary_json<P: AsRef<Path>>(bible: &Bible, path: P) -> Result<()> {
    let mut file = File::create(path)?;
    SummaryExporter::new().export(bible, &mut file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Book, Chapter, ChapterElement, Verse, VerseBlock, VersePart};
    use crate::reference::Reference;

    fn sample_bible() -> Bible {
        let verse = |number: u32, text: &str| Verse {
            number,
            sid: None,
            reference: Reference::verse(BookId::Jonah, 1, number),
            parts: vec![VersePart {
                text: text.to_string(),
                footnotes: Vec::new(),
            }],
        };

        Bible {
            books: vec![Book {
                id: BookId::Jonah,
                title: "Jonah".to_string(),
                chapters: vec![Chapter {
                    book: BookId::Jonah,
                    number: 1,
                    elements: vec![
                        ChapterElement::BookTitle {
                            text: "Jonah".to_string(),
                        },
                        ChapterElement::Verses(VerseBlock {
                            style: "p".to_string(),
                            continuation: false,
                            verses: vec![
                                verse(1, "Now the word of the LORD"),
                                verse(2, "\u{201c}Get up! Go to Nineveh.\u{201d}"),
                            ],
                        }),
                    ],
                }],
            }],
        }
    }

    #[test]
    fn test_simple_shape() {
        let simple = SimpleBible::from_bible(&sample_bible());
        assert_eq!(simple.books.len(), 1);
        assert_eq!(simple.books[0].book, BookId::Jonah);
        assert_eq!(simple.books[0].name, "Jonah");
        assert_eq!(
            simple.books[0].chapters[0].verses,
            vec![
                SimpleVerse {
                    verse: 1,
                    text: "Now the word of the LORD".to_string()
                },
                SimpleVerse {
                    verse: 2,
                    text: "\u{201c}Get up! Go to Nineveh.\u{201d}".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_simple_export_round_trips() {
        let bible = sample_bible();
        let mut out = Vec::new();
        SimpleJsonExporter::new().export(&bible, &mut out).unwrap();
        assert_eq!(out.last(), Some(&b'\n'));

        let back: SimpleBible = serde_json::from_slice(&out).unwrap();
        assert_eq!(back, SimpleBible::from_bible(&bible));
        let json = String::from_utf8(out).unwrap();
        assert!(json.contains(r#""book":"JON""#));
    }

    #[test]
    fn test_blocks_export_matches_formatter() {
        let bible = sample_bible();
        let mut out = Vec::new();
        BlocksExporter::new().export(&bible, &mut out).unwrap();

        let direct = serde_json::to_string(&format::format_bible(&bible)).unwrap();
        assert_eq!(String::from_utf8(out).unwrap().trim_end(), direct);
    }

    #[test]
    fn test_summary_export_matches_summary() {
        let bible = sample_bible();
        let mut out = Vec::new();
        SummaryExporter::new().export(&bible, &mut out).unwrap();

        let back: Summary = serde_json::from_slice(&out).unwrap();
        assert_eq!(back, Summary::from_bible(&bible));
    }

    #[test]
    fn test_pretty_output_is_indented() {
        let bible = sample_bible();
        let mut out = Vec::new();
        SimpleJsonExporter::with_config(JsonConfig { pretty: true })
            .export(&bible, &mut out)
            .unwrap();
        let json = String::from_utf8(out).unwrap();
        assert!(json.contains("\n  "));
    }
}

//! Plain-text exporter.
//!
//! Walks the IR and emits a readable text rendition: book titles and
//! headings set off by blank lines, poetry lines indented by their stop,
//! verse numbers in brackets. Footnotes are dropped; this output is for
//! reading and diffing, not round-tripping.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::ir::{Bible, Chapter, ChapterElement, Verse, VerseBlock};
use crate::usj::marker;

use super::Exporter;

/// Configuration for plain-text export.
#[derive(Debug, Clone)]
pub struct TextConfig {
    /// Prefix each verse with its number in brackets.
    pub verse_numbers: bool,
}

impl Default for TextConfig {
    fn default() -> Self {
        TextConfig {
            verse_numbers: true,
        }
    }
}

/// Exporter for plain-text output.
#[derive(Debug, Clone, Default)]
pub struct TextExporter {
    config: TextConfig,
}

impl TextExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: TextConfig) -> Self {
        TextExporter { config }
    }

    fn render(&self, bible: &Bible) -> String {
        let mut lines: Vec<String> = Vec::new();
        for chapter in bible.chapters() {
            self.render_chapter(chapter, &mut lines);
        }

        // Drop trailing blanks, end with a single newline.
        while lines.last().is_some_and(String::is_empty) {
            lines.pop();
        }
        let mut out = lines.join("\n");
        out.push('\n');
        out
    }

    fn render_chapter(&self, chapter: &Chapter, lines: &mut Vec<String>) {
        let mut last_poetry = false;
        for element in &chapter.elements {
            match element {
                ChapterElement::BookTitle { text } => {
                    push_blank(lines);
                    lines.push(text.clone());
                    last_poetry = false;
                }
                ChapterElement::Heading { text, .. } => {
                    push_blank(lines);
                    lines.push(text.clone());
                    last_poetry = false;
                }
                ChapterElement::ReferenceLine { text } => {
                    push_blank(lines);
                    lines.push(text.clone());
                    last_poetry = false;
                }
                ChapterElement::Blank => {
                    // A stanza break; poetry may continue after it.
                    push_blank(lines);
                }
                ChapterElement::Prose { text, .. } => {
                    push_blank(lines);
                    lines.push(text.clone());
                    last_poetry = false;
                }
                ChapterElement::Verses(block) => {
                    let poetry = marker::is_poetry(&block.style);
                    if !poetry || !last_poetry {
                        push_blank(lines);
                    }
                    if let Some(line) = self.render_verse_block(block, poetry) {
                        lines.push(line);
                    }
                    last_poetry = poetry;
                }
            }
        }
    }

    fn render_verse_block(&self, block: &VerseBlock, poetry: bool) -> Option<String> {
        let mut pieces = Vec::new();
        for verse in &block.verses {
            let text = verse_text(verse);
            let piece = if self.config.verse_numbers && !block.continuation {
                if text.is_empty() {
                    format!("[{}]", verse.number)
                } else {
                    format!("[{}] {}", verse.number, text)
                }
            } else {
                text
            };
            if !piece.is_empty() {
                pieces.push(piece);
            }
        }

        if pieces.is_empty() {
            return None;
        }
        let line = pieces.join(" ");
        if poetry {
            let indent = "  ".repeat(marker::poetry_indent(&block.style) as usize);
            Some(format!("{indent}{line}"))
        } else {
            Some(line)
        }
    }
}

impl Exporter for TextExporter {
    fn export<W: Write>(&self, bible: &Bible, writer: &mut W) -> Result<()> {
        writer.write_all(self.render(bible).as_bytes())?;
        Ok(())
    }
}

fn verse_text(verse: &Verse) -> String {
    let text: String = verse.parts.iter().map(|p| p.text.as_str()).collect();
    text.trim().to_string()
}

fn push_blank(lines: &mut Vec<String>) {
    if !lines.is_empty() && !lines.last().is_some_and(String::is_empty) {
        lines.push(String::new());
    }
}

/// Write a Bible to disk as plain text with default configuration.
///
/// # Example
///
/// ```no_run
/// use lampstand::{Bible, write_text};
///
/// let bible = Bible::open("bsb.usj.json")?;
/// write_text(&bible, "bsb.txt")?;
/// # Ok::<(), lampstand::Error>(())
/// ```
pub fn write_text<P: AsRef<Path>>(bible: &Bible, path: P) -> Result<()> {
    let mut file = File::create(path)?;
    TextExporter::new().export(bible, &mut file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canon::BookId;
    use crate::ir::{Book, VersePart};
    use crate::reference::Reference;

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

    fn block(style: &str, continuation: bool, verses: Vec<Verse>) -> ChapterElement {
        ChapterElement::Verses(VerseBlock {
            style: style.to_string(),
            continuation,
            verses,
        })
    }

    fn sample_bible() -> Bible {
        Bible {
            books: vec![Book {
                id: BookId::Jonah,
                title: "Jonah".to_string(),
                chapters: vec![Chapter {
                    book: BookId::Jonah,
                    number: 2,
                    elements: vec![
                        ChapterElement::Heading {
                            level: 1,
                            text: "Jonah's Prayer".to_string(),
                        },
                        block(
                            "p",
                            false,
                            vec![
                                verse(BookId::Jonah, 2, 1, "From inside the fish Jonah prayed,"),
                                verse(BookId::Jonah, 2, 2, "saying:"),
                            ],
                        ),
                        block(
                            "q1",
                            true,
                            vec![verse(
                                BookId::Jonah,
                                2,
                                2,
                                "\u{201c}In my distress I called to the LORD,",
                            )],
                        ),
                        block(
                            "q2",
                            true,
                            vec![verse(BookId::Jonah, 2, 2, "and He answered me.")],
                        ),
                        ChapterElement::Blank,
                        block(
                            "q1",
                            false,
                            vec![verse(BookId::Jonah, 2, 3, "For You cast me into the deep,")],
                        ),
                    ],
                }],
            }],
        }
    }

    #[test]
    fn test_text_layout() {
        let mut out = Vec::new();
        TextExporter::new().export(&sample_bible(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(
            text,
            "Jonah's Prayer\n\
             \n\
             [1] From inside the fish Jonah prayed, [2] saying:\n\
             \n\
             \u{20}\u{20}\u{201c}In my distress I called to the LORD,\n\
             \u{20}\u{20}\u{20}\u{20}and He answered me.\n\
             \n\
             \u{20}\u{20}[3] For You cast me into the deep,\n"
        );
    }

    #[test]
    fn test_verse_numbers_can_be_disabled() {
        let config = TextConfig {
            verse_numbers: false,
        };
        let mut out = Vec::new();
        TextExporter::with_config(config)
            .export(&sample_bible(), &mut out)
            .unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(!text.contains('['));
        assert!(text.contains("From inside the fish Jonah prayed, saying:"));
    }

    #[test]
    fn test_continuation_lines_repeat_no_number() {
        let mut out = Vec::new();
        TextExporter::new().export(&sample_bible(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        // Verse 2 is numbered once, in the prose block.
        assert_eq!(text.matches("[2]").count(), 1);
    }

    #[test]
    fn test_book_title_leads_chapter_one() {
        let bible = Bible {
            books: vec![Book {
                id: BookId::Obadiah,
                title: "Obadiah".to_string(),
                chapters: vec![Chapter {
                    book: BookId::Obadiah,
                    number: 1,
                    elements: vec![
                        ChapterElement::BookTitle {
                            text: "Obadiah".to_string(),
                        },
                        block(
                            "p",
                            false,
                            vec![verse(BookId::Obadiah, 1, 1, "The vision of Obadiah.")],
                        ),
                    ],
                }],
            }],
        };

        let mut out = Vec::new();
        TextExporter::new().export(&bible, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Obadiah\n\n[1] The vision of Obadiah.\n"
        );
    }
}

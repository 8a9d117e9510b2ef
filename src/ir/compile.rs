//! USJ to IR compilation.
//!
//! A single forward pass over each scripture document, tracking the open
//! book, chapter, block, and verse. Paragraph markers decide what each node
//! becomes; a verse left open at a paragraph boundary is remembered so a
//! following paragraph (a poetry line, a `m` continuation) can re-open it
//! in a new block with the `continuation` flag set.

use std::mem;

use crate::canon::BookId;
use crate::error::{Error, Result};
use crate::ir::{Bible, Book, Chapter, ChapterElement, Footnote, Verse, VerseBlock, VersePart};
use crate::reference::Reference;
use crate::usj::marker;
use crate::usj::{Usj, UsjContent, UsjNode};
use crate::util::leading_number;

/// Compile a USJ bundle into the semantic IR.
///
/// Documents whose `type` is not `"USJ"` are skipped, as are books whose
/// code cannot be resolved against the Protestant canon. Errors only when
/// no scripture book at all could be compiled.
pub fn compile(usj: &Usj) -> Result<Bible> {
    let mut compiler = Compiler::default();

    for (key, doc) in &usj.entries {
        if !doc.is_scripture() {
            continue;
        }
        compiler.start_book(key);
        for entry in &doc.content {
            if let UsjContent::Node(node) = entry {
                compiler.dispatch(node);
            }
        }
    }

    compiler.finish()
}

#[derive(Default)]
struct Compiler {
    books: Vec<Book>,
    /// Id and display title of the open book, once resolved.
    book: Option<(BookId, String)>,
    /// Closed chapters of the open book.
    chapters: Vec<Chapter>,
    chapter: Option<Chapter>,
    block: Option<VerseBlock>,
    verse: Option<Verse>,
    /// Verse text accumulated since the last part boundary.
    text: String,
    /// Footnotes seen in the open chapter, for callout letters.
    footnote_index: usize,
    /// True while the last started verse may continue into the next
    /// paragraph.
    continuing: bool,
    last_number: Option<u32>,
    last_sid: Option<String>,
}

impl Compiler {
    fn dispatch(&mut self, node: &UsjNode) {
        match node.kind.as_str() {
            "book" => self.handle_book_node(node),
            "chapter" => {
                if let Some(number) = &node.number {
                    self.start_chapter(number);
                }
            }
            "para" => self.handle_paragraph(node),
            _ => {}
        }
    }

    fn start_book(&mut self, key: &str) {
        self.finish_book();
        if let Some(id) = BookId::from_canonical_key(key) {
            self.book = Some((id, id.name().to_string()));
        }
    }

    /// An explicit `book` node overrides the id derived from the bundle
    /// key. Unresolvable codes leave the current id in place.
    fn handle_book_node(&mut self, node: &UsjNode) {
        if let Some(code) = &node.code
            && let Some(id) = BookId::from_code(code)
        {
            self.book = Some((id, id.name().to_string()));
        }
    }

    fn handle_paragraph(&mut self, node: &UsjNode) {
        let style = node.marker_str();

        if marker::is_identification(style) {
            return;
        }
        if style == "c" {
            if let Some(number) = &node.number {
                self.start_chapter(number);
            }
            return;
        }
        if marker::is_section_heading(style) {
            self.add_heading(style, flatten_text(node));
            return;
        }
        if style == "r" {
            self.add_reference_line(flatten_text(node));
            return;
        }
        if style == "b" {
            self.add_blank();
            return;
        }

        if node.has_verse_child() {
            self.start_block(style, false);
            self.read_verse_content(&node.content);
            self.flush_part();
            self.finish_block();
            return;
        }

        // A paragraph without verse markers continues the open verse when
        // one is pending. This is how a verse spans poetry lines and
        // paragraph breaks.
        if self.continuing
            && let Some(number) = self.last_number
            && let Some(sid) = self.last_sid.clone()
        {
            self.continue_verse(style, number, sid, &node.content);
            return;
        }

        self.finish_block();
        self.reset_continuation();
        let text = flatten_text(node);
        let text = text.trim();
        if text.is_empty() {
            self.add_blank();
        } else if let Some(chapter) = &mut self.chapter {
            chapter.elements.push(ChapterElement::Prose {
                style: style.to_string(),
                text: text.to_string(),
            });
        }
    }

    fn start_chapter(&mut self, raw: &str) {
        let Some((book, title)) = self.book.clone() else {
            return;
        };
        let Some(number) = leading_number(raw) else {
            return;
        };

        self.finish_chapter();
        self.reset_continuation();
        self.footnote_index = 0;

        let mut elements = Vec::new();
        if number == 1 {
            elements.push(ChapterElement::BookTitle { text: title });
        }
        self.chapter = Some(Chapter {
            book,
            number,
            elements,
        });
    }

    fn add_heading(&mut self, style: &str, text: String) {
        self.finish_block();
        self.reset_continuation();
        if let Some(chapter) = &mut self.chapter {
            chapter.elements.push(ChapterElement::Heading {
                level: marker::heading_level(style),
                text: text.trim().to_string(),
            });
        }
    }

    fn add_reference_line(&mut self, text: String) {
        self.finish_block();
        self.reset_continuation();
        if let Some(chapter) = &mut self.chapter {
            chapter.elements.push(ChapterElement::ReferenceLine {
                text: text.trim().to_string(),
            });
        }
    }

    /// Blanks close the open block but leave the continuation state alone:
    /// a `b` between poetry lines must not cut the verse short.
    fn add_blank(&mut self) {
        self.finish_block();
        if let Some(chapter) = &mut self.chapter {
            chapter.elements.push(ChapterElement::Blank);
        }
    }

    fn read_verse_content(&mut self, content: &[UsjContent]) {
        for entry in content {
            match entry {
                UsjContent::Text(text) => self.text.push_str(text),
                UsjContent::Node(node) => match node.kind.as_str() {
                    "verse" => {
                        // End-of-verse markers carry no number and are
                        // skipped outright.
                        if let Some(number) = node.number.as_deref().and_then(leading_number) {
                            let sid = node.sid.clone().filter(|s| !s.is_empty());
                            self.start_verse(number, sid);
                        }
                    }
                    "note" => self.attach_footnote(node),
                    "char" => flatten_into(&node.content, &mut self.text),
                    _ => {}
                },
            }
        }
    }

    fn start_verse(&mut self, number: u32, sid: Option<String>) {
        let Some(chapter) = &self.chapter else {
            return;
        };
        if self.block.is_none() {
            return;
        }
        let book = chapter.book;
        let chapter_number = chapter.number;

        if let Some(open) = &self.verse {
            // Split verses (`7a`, `7b`) resolve to the same number and
            // merge into the verse already open.
            if open.number == number {
                return;
            }
            self.flush_part();
            if let Some(open) = self.verse.take()
                && let Some(block) = &mut self.block
            {
                block.verses.push(open);
            }
        }

        // Text buffered before the first verse marker stays put and
        // becomes the opening part of this verse.
        self.continuing = true;
        self.last_number = Some(number);
        self.last_sid = sid.clone();
        self.verse = Some(Verse {
            number,
            sid,
            reference: Reference::verse(book, chapter_number, number),
            parts: Vec::new(),
        });
    }

    fn continue_verse(&mut self, style: &str, number: u32, sid: String, content: &[UsjContent]) {
        let Some(chapter) = &self.chapter else {
            return;
        };
        let book = chapter.book;
        let chapter_number = chapter.number;

        self.start_block(style, true);
        self.verse = Some(Verse {
            number,
            sid: Some(sid),
            reference: Reference::verse(book, chapter_number, number),
            parts: Vec::new(),
        });

        for entry in content {
            match entry {
                UsjContent::Text(text) => self.text.push_str(text),
                UsjContent::Node(node) => match node.kind.as_str() {
                    "note" => self.attach_footnote(node),
                    "char" => flatten_into(&node.content, &mut self.text),
                    _ => {}
                },
            }
        }

        self.flush_part();
        self.finish_block();
    }

    fn attach_footnote(&mut self, node: &UsjNode) {
        // A note outside any verse has nowhere to hang; drop it without
        // consuming a callout letter.
        let Some(verse) = &mut self.verse else {
            return;
        };

        let mut reference = String::new();
        let mut text = String::new();
        for entry in &node.content {
            match entry {
                UsjContent::Text(part) => text.push_str(part),
                UsjContent::Node(child) if child.kind == "char" => {
                    if child.marker_str() == "fr" {
                        flatten_into(&child.content, &mut reference);
                    } else {
                        flatten_into(&child.content, &mut text);
                    }
                }
                UsjContent::Node(_) => {}
            }
        }

        let footnote = Footnote {
            reference: reference.trim().to_string(),
            text: text.trim().to_string(),
            letter: footnote_letter(self.footnote_index),
        };
        self.footnote_index += 1;

        // The callout sits flush against the text before it.
        let part_text = self.text.trim_end().to_string();
        self.text.clear();
        verse.parts.push(VersePart {
            text: part_text,
            footnotes: vec![footnote],
        });
    }

    fn start_block(&mut self, style: &str, continuation: bool) {
        self.finish_block();
        self.block = Some(VerseBlock {
            style: style.to_string(),
            continuation,
            verses: Vec::new(),
        });
    }

    fn flush_part(&mut self) {
        if self.text.is_empty() {
            return;
        }
        if let Some(verse) = &mut self.verse {
            verse.parts.push(VersePart {
                text: mem::take(&mut self.text),
                footnotes: Vec::new(),
            });
        }
    }

    fn finish_block(&mut self) {
        self.flush_part();
        if let Some(verse) = self.verse.take()
            && let Some(block) = &mut self.block
        {
            block.verses.push(verse);
        }
        if let Some(block) = self.block.take()
            && !block.verses.is_empty()
            && let Some(chapter) = &mut self.chapter
        {
            chapter.elements.push(ChapterElement::Verses(block));
        }
        self.text.clear();
    }

    fn finish_chapter(&mut self) {
        self.finish_block();
        if let Some(chapter) = self.chapter.take() {
            self.chapters.push(chapter);
        }
    }

    fn finish_book(&mut self) {
        self.finish_chapter();
        if let Some((id, title)) = self.book.take() {
            self.books.push(Book {
                id,
                title,
                chapters: mem::take(&mut self.chapters),
            });
        }
        self.chapters.clear();
        self.reset_continuation();
        self.footnote_index = 0;
    }

    fn reset_continuation(&mut self) {
        self.continuing = false;
        self.last_number = None;
        self.last_sid = None;
    }

    fn finish(mut self) -> Result<Bible> {
        self.finish_book();
        if self.books.is_empty() {
            return Err(Error::InvalidUsj("no scripture books found".to_string()));
        }
        Ok(Bible { books: self.books })
    }
}

/// Direct strings plus the text of nested `char` runs, in order. Verse and
/// note nodes are structural and contribute nothing here.
fn flatten_text(node: &UsjNode) -> String {
    let mut out = String::new();
    flatten_into(&node.content, &mut out);
    out
}

fn flatten_into(content: &[UsjContent], out: &mut String) {
    for entry in content {
        match entry {
            UsjContent::Text(text) => out.push_str(text),
            UsjContent::Node(node) if node.kind == "char" => flatten_into(&node.content, out),
            UsjContent::Node(_) => {}
        }
    }
}

/// Callout letters run `a`..`z`, then `aa`, `ab`, and so on.
fn footnote_letter(mut index: usize) -> String {
    let mut letter = String::new();
    loop {
        letter.insert(0, (b'a' + (index % 26) as u8) as char);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    letter
}

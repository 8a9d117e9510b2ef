//! Zefania XML import.
//!
//! Zefania is a flat interchange format: `BIBLEBOOK` elements holding
//! `CHAPTER` elements holding `VERS` elements, with verse text as character
//! data. It carries no paragraphing, so every chapter imports as a single
//! justified verse block.

use std::fs;
use std::io::Read;
use std::mem;
use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::canon::BookId;
use crate::error::{Error, Result};
use crate::ir::{Bible, Book, Chapter, ChapterElement, Verse, VerseBlock, VersePart};
use crate::reference::Reference;
use crate::util::{decode_text, extract_xml_encoding, leading_number};

/// Read a Zefania XML file from disk into a [`Bible`].
///
/// Books are matched against the Protestant canon by `bnumber`, falling
/// back to the `bsname` and `bname` attributes; books outside the canon
/// are skipped.
///
/// # Example
///
/// ```no_run
/// use lampstand::read_zefania;
///
/// let bible = read_zefania("kjv.xml")?;
/// println!("{} books", bible.books.len());
/// # Ok::<(), lampstand::Error>(())
/// ```
pub fn read_zefania<P: AsRef<Path>>(path: P) -> Result<Bible> {
    let bytes = fs::read(path)?;
    parse_zefania(&bytes)
}

/// Read Zefania XML from any [`Read`] source.
pub fn read_zefania_from_reader<R: Read>(mut reader: R) -> Result<Bible> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    parse_zefania(&bytes)
}

fn parse_zefania(bytes: &[u8]) -> Result<Bible> {
    let text = decode_text(bytes, extract_xml_encoding(bytes));
    let mut reader = Reader::from_str(&text);

    let mut books: Vec<Book> = Vec::new();
    let mut book: Option<Book> = None;
    let mut chapter_number: Option<u32> = None;
    let mut verses: Vec<Verse> = Vec::new();
    let mut verse_number: Option<u32> = None;
    let mut verse_text = String::new();
    // NOTE elements nest inside VERS; their text is annotation, not verse.
    let mut note_depth = 0usize;
    let mut saw_root = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = e.name();
                let name = name.as_ref();
                if !saw_root {
                    saw_root = true;
                    if name != b"XMLBIBLE" {
                        return Err(Error::InvalidZefania(format!(
                            "unexpected root element: {}",
                            String::from_utf8_lossy(name)
                        )));
                    }
                }
                match name {
                    b"BIBLEBOOK" => {
                        if let Some(open) = book.take() {
                            books.push(open);
                        }
                        chapter_number = None;
                        verses.clear();
                        book = resolve_book(&e).map(|id| Book {
                            id,
                            title: id.name().to_string(),
                            chapters: Vec::new(),
                        });
                    }
                    b"CHAPTER" => {
                        if book.is_some() {
                            chapter_number = attribute(&e, b"cnumber")
                                .as_deref()
                                .and_then(leading_number);
                            verses.clear();
                        }
                    }
                    b"VERS" => {
                        if chapter_number.is_some() {
                            verse_number =
                                attribute(&e, b"vnumber").as_deref().and_then(leading_number);
                            verse_text.clear();
                        }
                    }
                    b"NOTE" => note_depth += 1,
                    _ => {}
                }
            }
            Ok(Event::Empty(e)) => {
                // A self-closing VERS is an omitted verse; keep its number.
                if e.name().as_ref() == b"VERS"
                    && let (Some(book), Some(chapter)) = (&book, chapter_number)
                    && let Some(number) = attribute(&e, b"vnumber").as_deref().and_then(leading_number)
                {
                    verses.push(Verse {
                        number,
                        sid: None,
                        reference: Reference::verse(book.id, chapter, number),
                        parts: Vec::new(),
                    });
                }
            }
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"BIBLEBOOK" => {
                    if let Some(book) = book.take() {
                        books.push(book);
                    }
                }
                b"CHAPTER" => {
                    if let (Some(book), Some(number)) = (&mut book, chapter_number.take()) {
                        let mut elements = Vec::new();
                        if number == 1 {
                            elements.push(ChapterElement::BookTitle {
                                text: book.title.clone(),
                            });
                        }
                        if !verses.is_empty() {
                            elements.push(ChapterElement::Verses(VerseBlock {
                                style: "p".to_string(),
                                continuation: false,
                                verses: mem::take(&mut verses),
                            }));
                        }
                        book.chapters.push(Chapter {
                            book: book.id,
                            number,
                            elements,
                        });
                    }
                    verses.clear();
                }
                b"VERS" => {
                    if let (Some(book), Some(chapter), Some(number)) =
                        (&book, chapter_number, verse_number.take())
                    {
                        let text: String = verse_text.split_whitespace().collect::<Vec<_>>().join(" ");
                        let parts = if text.is_empty() {
                            Vec::new()
                        } else {
                            vec![VersePart {
                                text,
                                footnotes: Vec::new(),
                            }]
                        };
                        verses.push(Verse {
                            number,
                            sid: None,
                            reference: Reference::verse(book.id, chapter, number),
                            parts,
                        });
                    }
                    verse_text.clear();
                }
                b"NOTE" => note_depth = note_depth.saturating_sub(1),
                _ => {}
            },
            Ok(Event::Text(e)) => {
                if verse_number.is_some() && note_depth == 0 {
                    verse_text.push_str(&String::from_utf8_lossy(e.as_ref()));
                }
            }
            Ok(Event::GeneralRef(e)) => {
                if verse_number.is_some()
                    && note_depth == 0
                    && let Some(resolved) = resolve_entity(&String::from_utf8_lossy(e.as_ref()))
                {
                    verse_text.push(resolved);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::Xml(e)),
            _ => {}
        }
    }

    if books.is_empty() {
        return Err(Error::InvalidZefania(
            "no recognizable books found".to_string(),
        ));
    }
    Ok(Bible { books })
}

/// Resolve a `BIBLEBOOK` element to a canon id: `bnumber` first, then the
/// short and long name attributes.
fn resolve_book(e: &quick_xml::events::BytesStart<'_>) -> Option<BookId> {
    let mut bnumber = None;
    let mut bsname = None;
    let mut bname = None;
    for attr in e.attributes().flatten() {
        let value = String::from_utf8_lossy(&attr.value).to_string();
        match attr.key.as_ref() {
            b"bnumber" => bnumber = Some(value),
            b"bsname" => bsname = Some(value),
            b"bname" => bname = Some(value),
            _ => {}
        }
    }

    bnumber
        .as_deref()
        .and_then(leading_number)
        .and_then(|n| u8::try_from(n).ok())
        .and_then(BookId::from_number)
        .or_else(|| bsname.as_deref().and_then(BookId::from_code))
        .or_else(|| bname.as_deref().and_then(BookId::from_name))
}

fn attribute(e: &quick_xml::events::BytesStart<'_>, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .map(|attr| String::from_utf8_lossy(&attr.value).to_string())
}

/// Handle entity references like `&apos;` and numeric forms like `&#8212;`.
fn resolve_entity(name: &str) -> Option<char> {
    match name {
        "apos" => Some('\''),
        "quot" => Some('"'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "amp" => Some('&'),
        _ => {
            let digits = name.strip_prefix('#')?;
            let code = if let Some(hex) = digits.strip_prefix(['x', 'X']) {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                digits.parse().ok()?
            };
            char::from_u32(code)
        }
    }
}

//! # lampstand
//!
//! A fast, lightweight engine for turning USJ Bible bundles into display-ready text.
//!
//! ## Features
//!
//! - Parse USJ (Unified Scripture JSON) bundles and Zefania XML bibles
//! - Compile scripture into a semantic chapter/verse/footnote model
//! - Format chapters into display blocks (headings, paragraphs, poetry lines)
//! - Stable `BOOK-chapter-verse` ids for linking and scroll navigation
//! - Export to plain text or JSON via the [`Exporter`] trait
//!
//! ## Quick Start
//!
//! ```no_run
//! use lampstand::{format_chapter, Bible, Reference};
//!
//! let bible = Bible::open("bsb.usj.json").unwrap();
//!
//! // Render John 3 as display blocks
//! let reference = Reference::parse("John 3").unwrap();
//! let chapter = bible
//!     .book(reference.book)
//!     .and_then(|book| book.chapter(reference.chapter.unwrap()))
//!     .unwrap();
//! let blocks = format_chapter(chapter);
//! ```
//!
//! ## Working with References
//!
//! The [`Reference`] struct is the central addressing type. It round-trips
//! between stable ids (used as scroll anchors) and human-readable forms:
//!
//! ```
//! use lampstand::{BookId, Reference};
//!
//! let reference = Reference::verse(BookId::John, 3, 16);
//! assert_eq!(reference.id(), "JHN-3-16");
//! assert_eq!(reference.to_string(), "John 3:16");
//! assert_eq!(Reference::parse("John 3:16"), Some(reference));
//! ```

pub mod canon;
pub mod error;
pub mod export;
pub mod format;
pub mod import;
pub mod ir;
pub mod nav;
pub mod reference;
pub mod summary;
pub mod usj;
pub(crate) mod util;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use canon::{BookId, Division, Testament};
pub use error::{Error, Result};
pub use export::{Exporter, write_blocks_json, write_simple_json, write_summary_json, write_text};
pub use format::{Block, FormattedChapter, format_bible, format_chapter};
pub use import::{read_bible, read_usj, read_zefania};
pub use ir::{Bible, Book, Chapter, compile};
pub use nav::Navigator;
pub use reference::{Reference, ReferenceRange};
pub use summary::Summary;
pub use usj::Usj;

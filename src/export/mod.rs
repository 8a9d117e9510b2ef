//! Exporters for writing Bibles to output formats.
//!
//! # Architecture
//!
//! The `Exporter` trait uses a builder pattern:
//! - `new()` creates an exporter with default configuration
//! - `with_config()` allows customization
//! - `export()` writes to any `Write` destination
//!
//! # Example
//!
//! ```no_run
//! use lampstand::Bible;
//! use lampstand::export::{Exporter, TextExporter};
//! use std::fs::File;
//!
//! let bible = Bible::open("bsb.usj.json")?;
//! let mut file = File::create("bsb.txt")?;
//! TextExporter::new().export(&bible, &mut file)?;
//! # Ok::<(), lampstand::Error>(())
//! ```

use std::io::Write;

mod json;
mod text;

pub use json::{
    BlocksExporter, JsonConfig, SimpleBible, SimpleBook, SimpleChapter, SimpleJsonExporter,
    SimpleVerse, SummaryExporter, write_blocks_json, write_simple_json, write_summary_json,
};
pub use text::{TextConfig, TextExporter, write_text};

use crate::error::Result;
use crate::ir::Bible;

/// Trait for exporting Bibles to specific formats.
///
/// Configuration is held in the exporter struct; `export` writes to any
/// [`Write`] destination: a `File`, a `Vec<u8>`, or a network stream.
pub trait Exporter {
    fn export<W: Write>(&self, bible: &Bible, writer: &mut W) -> Result<()>;
}

//! Importers for reading Bible source files.
//!
//! Two source formats are supported: USJ assets (the primary path, fed
//! through the semantic compiler) and Zefania XML (imported directly into
//! the IR). [`read_bible`] picks the importer from the file extension,
//! falling back to content sniffing.

mod usj;
mod zefania;

pub use usj::{read_usj, read_usj_from_reader};
pub use zefania::{read_zefania, read_zefania_from_reader};

use std::path::Path;

use crate::error::{Error, Result};
use crate::ir::{Bible, compile};

/// Source formats the importers understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// USJ JSON, either a keyed bundle or a lone book document.
    Usj,
    /// Zefania XML.
    Zefania,
}

impl SourceFormat {
    /// Guess the format from a file extension.
    pub fn from_path(path: &Path) -> Option<SourceFormat> {
        let ext = path.extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("json") || ext.eq_ignore_ascii_case("usj") {
            Some(SourceFormat::Usj)
        } else if ext.eq_ignore_ascii_case("xml") {
            Some(SourceFormat::Zefania)
        } else {
            None
        }
    }

    /// Guess the format from leading content bytes.
    pub fn sniff(bytes: &[u8]) -> Option<SourceFormat> {
        let bytes = bytes.strip_prefix(b"\xef\xbb\xbf").unwrap_or(bytes);
        match bytes.iter().find(|b| !b.is_ascii_whitespace())? {
            b'{' => Some(SourceFormat::Usj),
            b'<' => Some(SourceFormat::Zefania),
            _ => None,
        }
    }
}

/// Read a Bible from any supported source file.
///
/// # Example
///
/// ```no_run
/// use lampstand::read_bible;
///
/// let bible = read_bible("bsb.usj.json")?;
/// println!("{} chapters", bible.chapter_count());
/// # Ok::<(), lampstand::Error>(())
/// ```
pub fn read_bible<P: AsRef<Path>>(path: P) -> Result<Bible> {
    let path = path.as_ref();
    match SourceFormat::from_path(path) {
        Some(SourceFormat::Usj) => compile(&read_usj(path)?),
        Some(SourceFormat::Zefania) => read_zefania(path),
        None => {
            let bytes = std::fs::read(path)?;
            match SourceFormat::sniff(&bytes) {
                Some(SourceFormat::Usj) => compile(&read_usj_from_reader(bytes.as_slice())?),
                Some(SourceFormat::Zefania) => read_zefania_from_reader(bytes.as_slice()),
                None => Err(Error::UnsupportedFormat(path.display().to_string())),
            }
        }
    }
}

impl Bible {
    /// Open and compile a Bible from a USJ or Zefania file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Bible> {
        read_bible(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            SourceFormat::from_path(Path::new("bsb.usj.json")),
            Some(SourceFormat::Usj)
        );
        assert_eq!(
            SourceFormat::from_path(Path::new("text.USJ")),
            Some(SourceFormat::Usj)
        );
        assert_eq!(
            SourceFormat::from_path(Path::new("kjv.xml")),
            Some(SourceFormat::Zefania)
        );
        assert_eq!(SourceFormat::from_path(Path::new("bible.txt")), None);
        assert_eq!(SourceFormat::from_path(Path::new("noextension")), None);
    }

    #[test]
    fn test_format_sniffing() {
        assert_eq!(SourceFormat::sniff(b"  {\"type\":"), Some(SourceFormat::Usj));
        assert_eq!(
            SourceFormat::sniff(b"\xef\xbb\xbf{\"01GENBSB\":"),
            Some(SourceFormat::Usj)
        );
        assert_eq!(
            SourceFormat::sniff(b"<?xml version=\"1.0\"?>"),
            Some(SourceFormat::Zefania)
        );
        assert_eq!(SourceFormat::sniff(b"plain text"), None);
        assert_eq!(SourceFormat::sniff(b"   "), None);
        assert_eq!(SourceFormat::sniff(b""), None);
    }
}

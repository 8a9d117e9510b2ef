//! USJ asset import.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::Result;
use crate::usj::Usj;
use crate::util::decode_text;

/// Read a USJ asset from disk.
///
/// Accepts both a keyed bundle (`{"01GENBSB": {...}, ...}`) and a lone book
/// document (`{"type": "USJ", ...}`).
///
/// # Example
///
/// ```no_run
/// use lampstand::read_usj;
///
/// let usj = read_usj("bsb.usj.json")?;
/// println!("{} documents", usj.len());
/// # Ok::<(), lampstand::Error>(())
/// ```
pub fn read_usj<P: AsRef<Path>>(path: P) -> Result<Usj> {
    let file = File::open(path)?;
    read_usj_from_reader(BufReader::new(file))
}

/// Read a USJ asset from any [`Read`] source.
///
/// Useful for reading from memory buffers or network streams. Input is
/// decoded as UTF-8, with a byte order mark stripped when present.
pub fn read_usj_from_reader<R: Read>(mut reader: R) -> Result<Usj> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    decode_text(&bytes, None).parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_bundle_from_reader() {
        let json = br#"{
            "32JONBSB": {"type": "USJ", "version": "3.1", "content": []},
            "31OBABSB": {"type": "USJ", "version": "3.1", "content": []}
        }"#;

        let usj = read_usj_from_reader(&json[..]).unwrap();
        assert_eq!(usj.len(), 2);
        assert_eq!(usj.entries[0].0, "32JONBSB");
        assert_eq!(usj.entries[1].0, "31OBABSB");
    }

    #[test]
    fn test_read_lone_document() {
        let json = br#"{"type": "USJ", "version": "3.1", "content": []}"#;
        let usj = read_usj_from_reader(&json[..]).unwrap();
        assert_eq!(usj.len(), 1);
        assert_eq!(usj.entries[0].0, "");
    }

    #[test]
    fn test_bom_is_stripped() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice(br#"{"type": "USJ", "content": []}"#);
        let usj = read_usj_from_reader(bytes.as_slice()).unwrap();
        assert_eq!(usj.len(), 1);
    }

    #[test]
    fn test_rejects_non_json() {
        assert!(read_usj_from_reader(&b"<XMLBIBLE/>"[..]).is_err());
    }
}

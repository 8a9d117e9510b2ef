//! Small shared utilities: text decoding and lenient number parsing.

use std::borrow::Cow;

/// Decode bytes to a string, handling various encodings.
///
/// This function:
/// 1. First tries UTF-8 (handles BOM automatically via encoding_rs)
/// 2. If malformed, tries the hint encoding (from `<?xml encoding="..."?>`)
/// 3. Falls back to Windows-1252 (common in older Bible modules)
///
/// Uses `Cow<str>` to avoid allocation when the input is valid UTF-8.
pub fn decode_text<'a>(bytes: &'a [u8], hint_encoding: Option<&str>) -> Cow<'a, str> {
    // Try UTF-8 first (handles BOM automatically)
    let (result, _encoding, malformed) = encoding_rs::UTF_8.decode(bytes);

    if !malformed {
        return result;
    }

    // If UTF-8 failed, try the hint encoding
    if let Some(name) = hint_encoding
        && let Some(encoding) = encoding_rs::Encoding::for_label(name.as_bytes())
    {
        let (result, _, _) = encoding.decode(bytes);
        return result;
    }

    // Fallback: Windows-1252 (superset of ISO-8859-1)
    let (result, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    result
}

/// Extract encoding from an XML declaration.
///
/// Parses `<?xml ... encoding="..." ?>` to extract the encoding name.
/// Only the first ~100 bytes are checked.
pub fn extract_xml_encoding(bytes: &[u8]) -> Option<&str> {
    let check_len = bytes.len().min(100);
    let prefix = &bytes[..check_len];

    // Look for <?xml
    let xml_start = prefix.windows(5).position(|w| w == b"<?xml")?;
    let after_xml = &prefix[xml_start..];

    // Look for encoding="..." or encoding='...'
    let enc_pos = after_xml
        .windows(9)
        .position(|w| w.eq_ignore_ascii_case(b"encoding="))?;
    let after_enc = &after_xml[enc_pos + 9..];

    if after_enc.is_empty() {
        return None;
    }

    let quote = after_enc[0];
    if quote != b'"' && quote != b'\'' {
        return None;
    }

    let value_start = 1;
    let value_end = after_enc[value_start..].iter().position(|&b| b == quote)? + value_start;

    std::str::from_utf8(&after_enc[value_start..value_end]).ok()
}

/// Parse the leading decimal digits of a string.
///
/// Scripture data is loose about number attributes: split verses appear as
/// `"12a"`, and some sources pad with whitespace. Ordering and ids use the
/// numeric prefix; anything without one yields `None`.
pub fn leading_number(s: &str) -> Option<u32> {
    let s = s.trim_start();
    let end = s
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(s.len());
    if end == 0 {
        return None;
    }
    s[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_text_utf8() {
        assert_eq!(decode_text(b"Hello, World!", None), "Hello, World!");
        // BOM is stripped
        assert_eq!(decode_text(b"\xEF\xBB\xBFhi", None), "hi");
        // Multibyte sequences survive
        assert_eq!(decode_text("b\u{259}r\u{25b}sh\u{2ccc}th".as_bytes(), None), "b\u{259}r\u{25b}sh\u{2ccc}th");
    }

    #[test]
    fn test_decode_text_fallback() {
        // 0xE9 is not valid UTF-8 on its own; Windows-1252 maps it to e-acute
        assert_eq!(decode_text(&[0x63, 0x61, 0x66, 0xE9], None), "caf\u{e9}");
    }

    #[test]
    fn test_decode_text_with_hint() {
        let bytes = [0x63, 0x61, 0x66, 0xE9];
        assert_eq!(decode_text(&bytes, Some("iso-8859-1")), "caf\u{e9}");
        // Unknown hints fall through to the 1252 fallback
        assert_eq!(decode_text(&bytes, Some("not-a-charset")), "caf\u{e9}");
    }

    #[test]
    fn test_extract_xml_encoding() {
        let xml = br#"<?xml version="1.0" encoding="ISO-8859-1"?><XMLBIBLE/>"#;
        assert_eq!(extract_xml_encoding(xml), Some("ISO-8859-1"));

        let xml = br#"<?xml version='1.0' ENCODING='utf-8'?>"#;
        assert_eq!(extract_xml_encoding(xml), Some("utf-8"));

        let xml = br#"<?xml version="1.0"?><XMLBIBLE/>"#;
        assert_eq!(extract_xml_encoding(xml), None);

        assert_eq!(extract_xml_encoding(b"not xml at all"), None);
    }

    #[test]
    fn test_leading_number() {
        assert_eq!(leading_number("12"), Some(12));
        assert_eq!(leading_number("12a"), Some(12));
        assert_eq!(leading_number(" 3"), Some(3));
        assert_eq!(leading_number("7-9"), Some(7));
        assert_eq!(leading_number("a12"), None);
        assert_eq!(leading_number(""), None);
        assert_eq!(leading_number("  "), None);
    }
}

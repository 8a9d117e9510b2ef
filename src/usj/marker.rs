//! USFM paragraph-marker classification.
//!
//! The compiler and formatter only need a coarse taxonomy: which markers are
//! front matter to skip, which start headings, and which carry poetry
//! indentation. Everything unrecognized flows through as prose with its raw
//! marker preserved.

use crate::util::leading_number;

/// Identification and front-matter markers that never render: running
/// headers (`h`), table-of-contents labels (`toc1`-`toc3`), main titles
/// (`mt1`-`mt3`), and editorial bookkeeping (`ide`, `usfm`, `rem`, `sts`).
pub fn is_identification(marker: &str) -> bool {
    matches!(marker, "h" | "ide" | "usfm" | "rem" | "sts")
        || marker.starts_with("toc")
        || marker.starts_with("mt")
}

/// Section headings: `s`, `s1`, `s2`, ... and their lettered relatives
/// (`sr`, `sp`). Checked after [`is_identification`] so `sts` never lands
/// here.
pub fn is_section_heading(marker: &str) -> bool {
    marker.starts_with('s') && !is_identification(marker)
}

/// Heading level for a section marker.
///
/// `s` and `s1` are the major section head; numbered variants keep their
/// digit (clamped to 4); lettered variants (`sr`, `sp`) render at the minor
/// level.
pub fn heading_level(marker: &str) -> u8 {
    match marker.strip_prefix('s') {
        Some("") | Some("1") => 1,
        Some(rest) => leading_number(rest)
            .map(|n| n.clamp(1, 4) as u8)
            .unwrap_or(2),
        None => 1,
    }
}

/// Poetry markers: `q` optionally followed by an indent digit. Lettered
/// q-markers (`qa`, `qs`, `qr`) are not indented poetry lines.
pub fn is_poetry(marker: &str) -> bool {
    match marker.strip_prefix('q') {
        Some(rest) => rest.bytes().all(|b| b.is_ascii_digit()),
        None => false,
    }
}

/// Indent level for a poetry marker (`q`/`q1` are level 1).
pub fn poetry_indent(marker: &str) -> u8 {
    marker
        .strip_prefix('q')
        .and_then(leading_number)
        .map(|n| n.clamp(1, 4) as u8)
        .unwrap_or(1)
}

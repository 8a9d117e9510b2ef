//! WASM bindings for browser-based Bible rendering.
//!
//! This module exposes the core pipeline to JavaScript via wasm-bindgen.

use wasm_bindgen::prelude::*;

use crate::format::format_bible;
use crate::import::read_usj_from_reader;
use crate::ir::compile;
use crate::summary::Summary;
use crate::reference::Reference;

/// Initialize panic hook for better error messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "wasm")]
    console_error_panic_hook::set_once();
}

/// Render a USJ bundle to display blocks.
///
/// Takes raw USJ JSON bytes and returns the formatted chapters (headings,
/// paragraphs, poetry lines, verse spans, footnotes) as a JSON string ready
/// for a virtualized viewer.
#[wasm_bindgen]
pub fn usj_to_blocks(data: &[u8]) -> Result<String, JsValue> {
    let usj = read_usj_from_reader(data).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let bible = compile(&usj).map_err(|e| JsValue::from_str(&e.to_string()))?;

    serde_json::to_string(&format_bible(&bible)).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Summarize a USJ bundle.
///
/// Takes raw USJ JSON bytes and returns per-book chapter and verse counts as
/// a JSON string, suitable for building navigation menus.
#[wasm_bindgen]
pub fn usj_to_summary(data: &[u8]) -> Result<String, JsValue> {
    let usj = read_usj_from_reader(data).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let bible = compile(&usj).map_err(|e| JsValue::from_str(&e.to_string()))?;

    serde_json::to_string(&Summary::from_bible(&bible))
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Normalize a reference string to a stable scroll id.
///
/// Accepts both stable ids (`"JHN-3-16"`) and human-readable references
/// (`"John 3:16"`). Returns `None` when the input names no known book.
#[wasm_bindgen]
pub fn parse_reference(input: &str) -> Option<String> {
    Reference::parse(input).map(|r| r.id())
}

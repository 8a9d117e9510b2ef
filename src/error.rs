//! Error types for lampstand operations.

use thiserror::Error;

/// Errors that can occur while reading or writing Bible texts.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Invalid USJ: {0}")]
    InvalidUsj(String),

    #[error("Invalid Zefania XML: {0}")]
    InvalidZefania(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

pub type Result<T> = std::result::Result<T, Error>;

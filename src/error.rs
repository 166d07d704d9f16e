//! Error and Result types.
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeoBlobError {
    #[error("unknown geometry type tag: {0}")]
    UnknownTag(u8),
    #[error("unexpected end of input at offset {offset} (needed {needed} more byte(s))")]
    UnexpectedEof { offset: usize, needed: usize },
    #[error("WKB parse failed: {0}")]
    WkbParseFailed(String),
    #[error("internal codec invariant violated: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, GeoBlobError>;

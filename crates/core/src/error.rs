use thiserror::Error;

#[derive(Error, Debug)]
pub enum HdrError {
    #[error("invalid pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },
    #[error("malformed keyword token {0:?}")]
    MalformedToken(String),
    #[error("mask shape {mask:?} does not match cube shape {cube:?}")]
    ShapeMismatch {
        cube: (usize, usize, usize),
        mask: (usize, usize, usize),
    },
    #[error("cube data length {len} does not fill shape {shape:?}")]
    NotACube {
        shape: (usize, usize, usize),
        len: usize,
    },
    #[error("unsupported header value for keyword {0:?}")]
    BadHeaderValue(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serde json error: {0}")]
    SerdeJson(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, HdrError>;

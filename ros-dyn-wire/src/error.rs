//! Error types for wire-format encoding/decoding

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unexpected end of input: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEof { needed: usize, remaining: usize },

    #[error("invalid boolean value: {0}")]
    InvalidBool(u8),

    #[error("{0}")]
    Utf8(#[from] std::str::Utf8Error),
}

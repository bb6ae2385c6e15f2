use thiserror::Error;

/// Everything that can go wrong while turning `.sspm` bytes into a [`Chart`](crate::Chart).
///
/// Every variant is terminal for the decode call that produced it.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DecodeError {
    #[error("Bad signature: expected \"SS+m\", got {got:?}")]
    BadSignature { got: [u8; 4] },

    #[error("Unsupported SSPM version: {0}")]
    UnsupportedVersion(u16),

    #[error("Unexpected end of input: needed {needed} byte(s) at offset {offset}")]
    Truncated { offset: usize, needed: u64 },

    #[error("String at offset {offset} is not valid UTF-8")]
    InvalidText { offset: usize },

    #[error("Time scale must be a positive finite number, got {0}")]
    InvalidScale(f64),
}

pub type DecodeResult<T> = std::result::Result<T, DecodeError>;

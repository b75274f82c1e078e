use thiserror::Error;

/**
    Errors returned by the encode and decode crates and the codec wrapper.
*/
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("codec error: {0}")]
    Codec(String),

    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("buffer too small: need {needed} bytes, have {available}")]
    BufferTooSmall { needed: usize, available: usize },

    #[error("codec is not open")]
    NotOpen,

    #[error("codec is not an {expected}")]
    WrongDirection { expected: &'static str },
}

impl Error {
    pub fn codec(msg: impl Into<String>) -> Self {
        Self::Codec(msg.into())
    }

    pub fn unsupported_format(msg: impl Into<String>) -> Self {
        Self::UnsupportedFormat(msg.into())
    }

    pub fn invalid_data(msg: impl Into<String>) -> Self {
        Self::InvalidData(msg.into())
    }
}

/**
    Error returned by `FromStr` implementations on enum types.
*/
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}'")]
pub struct ParseError {
    pub kind: &'static str,
    pub value: String,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            Error::codec("open failed").to_string(),
            "codec error: open failed"
        );
        assert_eq!(
            Error::BufferTooSmall {
                needed: 24,
                available: 8
            }
            .to_string(),
            "buffer too small: need 24 bytes, have 8"
        );
        assert_eq!(
            Error::WrongDirection {
                expected: "encoder"
            }
            .to_string(),
            "codec is not an encoder"
        );
    }
}

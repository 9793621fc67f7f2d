use thiserror::Error;

use crate::encoding::TextEncoding;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CursorError {
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
    /// `target` is the absolute offset a seek or read would have reached.
    #[error("offset {target} out of range for buffer of {len} bytes")]
    OutOfRange { target: i128, len: usize },
    #[error("cannot decode {len} bytes at offset {offset} as {encoding}: {reason}")]
    Decode {
        encoding: TextEncoding,
        offset: usize,
        len: usize,
        reason: String,
    },
    #[error("unknown text encoding: {0}")]
    UnknownEncoding(String),
    #[error("unknown scalar kind: {0}")]
    UnknownScalar(String),
}

impl CursorError {
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, CursorError::OutOfRange { .. })
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, CursorError::InvalidInput(_))
    }
}

pub type Result<T, E = CursorError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_message_names_target_and_length() {
        let err = CursorError::OutOfRange { target: 5, len: 4 };
        assert_eq!(
            err.to_string(),
            "offset 5 out of range for buffer of 4 bytes"
        );
        assert!(err.is_out_of_range());
        assert!(!err.is_invalid_input());
    }

    #[test]
    fn decode_message_names_encoding() {
        let err = CursorError::Decode {
            encoding: TextEncoding::Utf8,
            offset: 2,
            len: 3,
            reason: "bad byte".into(),
        };
        assert_eq!(
            err.to_string(),
            "cannot decode 3 bytes at offset 2 as utf-8: bad byte"
        );
    }
}

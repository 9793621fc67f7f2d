use crate::encoding::TextEncoding;

/// How text reads treat byte sequences that are invalid for their encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DecodeMode {
    /// Reject the read and leave the offset where it was.
    #[default]
    Strict,
    /// Substitute U+FFFD and advance as usual.
    Lossy,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CursorConfig {
    pub mode: DecodeMode,
    /// Encoding used by `next_string_default`.
    pub default_encoding: TextEncoding,
}

impl CursorConfig {
    pub fn lossy() -> Self {
        Self {
            mode: DecodeMode::Lossy,
            ..Self::default()
        }
    }

    pub fn with_encoding(mut self, encoding: TextEncoding) -> Self {
        self.default_encoding = encoding;
        self
    }
}

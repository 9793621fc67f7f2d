use std::fmt;
use std::str::FromStr;

use data_encoding::{BASE64, BASE64URL_NOPAD, HEXLOWER};

use crate::config::DecodeMode;
use crate::error::{CursorError, Result};

/// Text encodings accepted by string reads.
///
/// Names are matched case-insensitively:
///
/// | Encoding | Names |
/// |---|---|
/// | `Utf8` | `utf8`, `utf-8` |
/// | `Utf16Le` | `utf16le`, `utf-16le`, `ucs2`, `ucs-2` |
/// | `Latin1` | `latin1`, `binary` |
/// | `Ascii` | `ascii` |
/// | `Hex` | `hex` |
/// | `Base64` | `base64` |
/// | `Base64Url` | `base64url` |
///
/// `Hex`, `Base64` and `Base64Url` render the raw bytes as text rather than
/// interpreting them as characters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TextEncoding {
    #[default]
    Utf8,
    Utf16Le,
    Latin1,
    Ascii,
    Hex,
    Base64,
    Base64Url,
}

impl TextEncoding {
    pub fn name(&self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Utf16Le => "utf-16le",
            TextEncoding::Latin1 => "latin1",
            TextEncoding::Ascii => "ascii",
            TextEncoding::Hex => "hex",
            TextEncoding::Base64 => "base64",
            TextEncoding::Base64Url => "base64url",
        }
    }

    /// Decodes `bytes` in full. Failures report offset 0 relative to `bytes`.
    pub fn decode(&self, bytes: &[u8], mode: DecodeMode) -> Result<String> {
        self.decode_at(bytes, 0, mode)
    }

    pub(crate) fn decode_at(
        &self,
        bytes: &[u8],
        offset: usize,
        mode: DecodeMode,
    ) -> Result<String> {
        let failed = |reason: String| CursorError::Decode {
            encoding: *self,
            offset,
            len: bytes.len(),
            reason,
        };

        match self {
            TextEncoding::Utf8 => match mode {
                DecodeMode::Strict => std::str::from_utf8(bytes)
                    .map(str::to_owned)
                    .map_err(|e| failed(e.to_string())),
                DecodeMode::Lossy => Ok(String::from_utf8_lossy(bytes).into_owned()),
            },
            TextEncoding::Utf16Le => {
                // A dangling odd byte cannot form a code unit and is dropped.
                let units: Vec<u16> = bytes
                    .chunks_exact(2)
                    .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
                    .collect();
                match mode {
                    DecodeMode::Strict => {
                        String::from_utf16(&units).map_err(|e| failed(e.to_string()))
                    }
                    DecodeMode::Lossy => Ok(String::from_utf16_lossy(&units)),
                }
            }
            TextEncoding::Latin1 => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
            TextEncoding::Ascii => Ok(bytes.iter().map(|&b| char::from(b & 0x7f)).collect()),
            TextEncoding::Hex => Ok(HEXLOWER.encode(bytes)),
            TextEncoding::Base64 => Ok(BASE64.encode(bytes)),
            TextEncoding::Base64Url => Ok(BASE64URL_NOPAD.encode(bytes)),
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TextEncoding {
    type Err = CursorError;

    fn from_str(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "utf8" | "utf-8" => Ok(TextEncoding::Utf8),
            "utf16le" | "utf-16le" | "ucs2" | "ucs-2" => Ok(TextEncoding::Utf16Le),
            "latin1" | "binary" => Ok(TextEncoding::Latin1),
            "ascii" => Ok(TextEncoding::Ascii),
            "hex" => Ok(TextEncoding::Hex),
            "base64" => Ok(TextEncoding::Base64),
            "base64url" => Ok(TextEncoding::Base64Url),
            _ => Err(CursorError::UnknownEncoding(name.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("UTF-8".parse::<TextEncoding>(), Ok(TextEncoding::Utf8));
        assert_eq!("utf8".parse::<TextEncoding>(), Ok(TextEncoding::Utf8));
        assert_eq!("ucs2".parse::<TextEncoding>(), Ok(TextEncoding::Utf16Le));
        assert_eq!("Binary".parse::<TextEncoding>(), Ok(TextEncoding::Latin1));
        assert_eq!(
            "ebcdic".parse::<TextEncoding>(),
            Err(CursorError::UnknownEncoding("ebcdic".into()))
        );
    }

    #[test]
    fn display_round_trips_through_parse() {
        for encoding in [
            TextEncoding::Utf8,
            TextEncoding::Utf16Le,
            TextEncoding::Latin1,
            TextEncoding::Ascii,
            TextEncoding::Hex,
            TextEncoding::Base64,
            TextEncoding::Base64Url,
        ] {
            assert_eq!(encoding.to_string().parse::<TextEncoding>(), Ok(encoding));
        }
    }

    #[test]
    fn strict_utf8_rejects_invalid_sequences() {
        let err = TextEncoding::Utf8
            .decode(&[b'o', b'k', 0xff], DecodeMode::Strict)
            .expect_err("0xff is never valid utf-8");
        assert!(matches!(err, CursorError::Decode { len: 3, .. }));
    }

    #[test]
    fn lossy_utf8_replaces_invalid_sequences() {
        let text = TextEncoding::Utf8
            .decode(&[b'o', b'k', 0xff], DecodeMode::Lossy)
            .expect("lossy decode never fails");
        assert_eq!(text, "ok\u{fffd}");
    }

    #[test]
    fn utf16le_decodes_code_units_and_drops_odd_byte() {
        let bytes = [b'h', 0x00, b'i', 0x00, 0x41];
        let text = TextEncoding::Utf16Le
            .decode(&bytes, DecodeMode::Strict)
            .expect("valid utf-16le");
        assert_eq!(text, "hi");
    }

    #[test]
    fn utf16le_unpaired_surrogate_depends_on_mode() {
        let bytes = 0xd800u16.to_le_bytes();
        assert!(
            TextEncoding::Utf16Le
                .decode(&bytes, DecodeMode::Strict)
                .is_err()
        );
        assert_eq!(
            TextEncoding::Utf16Le.decode(&bytes, DecodeMode::Lossy),
            Ok("\u{fffd}".to_string())
        );
    }

    #[test]
    fn single_byte_encodings() {
        let bytes = [0x48, 0xe9, 0xc8];
        assert_eq!(
            TextEncoding::Latin1.decode(&bytes, DecodeMode::Strict),
            Ok("H\u{e9}\u{c8}".to_string())
        );
        assert_eq!(
            TextEncoding::Ascii.decode(&bytes, DecodeMode::Strict),
            Ok("HiH".to_string())
        );
    }

    #[test]
    fn binary_to_text_encodings() {
        let bytes = [0xfb, 0xff, 0x01];
        assert_eq!(
            TextEncoding::Hex.decode(&bytes, DecodeMode::Strict),
            Ok("fbff01".to_string())
        );
        assert_eq!(
            TextEncoding::Base64.decode(&bytes[..2], DecodeMode::Strict),
            Ok("+/8=".to_string())
        );
        assert_eq!(
            TextEncoding::Base64Url.decode(&bytes[..2], DecodeMode::Strict),
            Ok("-_8".to_string())
        );
    }
}

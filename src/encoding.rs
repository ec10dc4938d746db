//! Text encoding detection and decoding for configuration sources

use crate::error::{ConfigError, Result};
use std::fmt;

/// Text encodings a configuration file can be read in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    Utf16Le,
    Utf16Be,
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TextEncoding::Utf8 => "UTF-8",
            TextEncoding::Utf16Le => "UTF-16LE",
            TextEncoding::Utf16Be => "UTF-16BE",
        };
        f.write_str(name)
    }
}

const BOM_UTF8: [u8; 3] = [0xEF, 0xBB, 0xBF];
const BOM_UTF16_LE: [u8; 2] = [0xFF, 0xFE];
const BOM_UTF16_BE: [u8; 2] = [0xFE, 0xFF];

/// Detect the encoding from a byte order mark; bytes without a recognized
/// mark are treated as UTF-8.
pub fn detect(bytes: &[u8]) -> TextEncoding {
    if bytes.starts_with(&BOM_UTF8) {
        TextEncoding::Utf8
    } else if bytes.starts_with(&BOM_UTF16_LE) {
        TextEncoding::Utf16Le
    } else if bytes.starts_with(&BOM_UTF16_BE) {
        TextEncoding::Utf16Be
    } else {
        TextEncoding::Utf8
    }
}

/// Decode raw bytes to a string.
///
/// Pass `None` to detect the encoding from the byte order mark. A leading
/// mark matching the effective encoding is stripped; malformed input fails
/// with [`ConfigError::Encoding`] instead of being replaced lossily.
pub fn decode(bytes: &[u8], text_encoding: Option<TextEncoding>) -> Result<String> {
    let effective = text_encoding.unwrap_or_else(|| detect(bytes));
    let body = strip_bom(bytes, effective);

    match effective {
        TextEncoding::Utf8 => std::str::from_utf8(body)
            .map(str::to_string)
            .map_err(|e| ConfigError::encoding(format!("invalid UTF-8 input: {}", e))),
        TextEncoding::Utf16Le => decode_utf16(body, u16::from_le_bytes),
        TextEncoding::Utf16Be => decode_utf16(body, u16::from_be_bytes),
    }
}

fn strip_bom(bytes: &[u8], text_encoding: TextEncoding) -> &[u8] {
    let bom: &[u8] = match text_encoding {
        TextEncoding::Utf8 => &BOM_UTF8,
        TextEncoding::Utf16Le => &BOM_UTF16_LE,
        TextEncoding::Utf16Be => &BOM_UTF16_BE,
    };
    bytes.strip_prefix(bom).unwrap_or(bytes)
}

fn decode_utf16(bytes: &[u8], from_bytes: fn([u8; 2]) -> u16) -> Result<String> {
    if bytes.len() % 2 != 0 {
        return Err(ConfigError::encoding(
            "UTF-16 input has an odd number of bytes",
        ));
    }
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| from_bytes([pair[0], pair[1]]))
        .collect();
    String::from_utf16(&units)
        .map_err(|e| ConfigError::encoding(format!("invalid UTF-16 input: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detection_defaults_to_utf8() {
        assert_eq!(detect(b"[A]\nx = 1"), TextEncoding::Utf8);
        assert_eq!(detect(b""), TextEncoding::Utf8);
    }

    #[test]
    fn test_bom_detection() {
        assert_eq!(detect(&[0xEF, 0xBB, 0xBF, b'x']), TextEncoding::Utf8);
        assert_eq!(detect(&[0xFF, 0xFE, b'x', 0]), TextEncoding::Utf16Le);
        assert_eq!(detect(&[0xFE, 0xFF, 0, b'x']), TextEncoding::Utf16Be);
    }

    #[test]
    fn test_utf8_bom_is_stripped() {
        let mut bytes = BOM_UTF8.to_vec();
        bytes.extend_from_slice(b"[A]");
        assert_eq!(decode(&bytes, None).unwrap(), "[A]");
    }

    #[test]
    fn test_utf16_round_trip_both_orders() {
        let text = "[A]\nkey = värde";

        let mut le = BOM_UTF16_LE.to_vec();
        for unit in text.encode_utf16() {
            le.extend_from_slice(&unit.to_le_bytes());
        }
        assert_eq!(decode(&le, None).unwrap(), text);

        let mut be = BOM_UTF16_BE.to_vec();
        for unit in text.encode_utf16() {
            be.extend_from_slice(&unit.to_be_bytes());
        }
        assert_eq!(decode(&be, None).unwrap(), text);
    }

    #[test]
    fn test_invalid_utf8_is_an_encoding_error() {
        match decode(&[0x80, 0x81], Some(TextEncoding::Utf8)) {
            Err(ConfigError::Encoding(_)) => {}
            _ => panic!("expected Encoding"),
        }
    }

    #[test]
    fn test_odd_length_utf16_is_rejected() {
        match decode(&[0xFF, 0xFE, 0x41], None) {
            Err(ConfigError::Encoding(_)) => {}
            _ => panic!("expected Encoding"),
        }
    }
}

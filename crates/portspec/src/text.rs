//! Text transport stage: standard base64, padding required.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::DecodeError;

/// Decodes standard-alphabet, padded base64 into raw bytes.
///
/// Whitespace, the URL-safe alphabet, missing padding and non-zero trailing
/// bits are all rejected. The empty string decodes to no bytes.
///
/// ```
/// assert_eq!(portspec::text::decode("CAE=").unwrap(), vec![0x08, 0x01]);
/// assert!(portspec::text::decode("CAE").is_err());
/// ```
pub fn decode(input: &str) -> Result<Vec<u8>, DecodeError> {
    STANDARD
        .decode(input)
        .map_err(|err| DecodeError::MalformedText {
            len: input.len(),
            message: err.to_string(),
        })
}

/// Encodes bytes as standard, padded base64.
pub fn encode(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_empty() {
        assert_eq!(decode("").unwrap(), Vec::<u8>::new());
        assert_eq!(encode(&[]), "");
    }

    #[test]
    fn padding_is_required() {
        assert_eq!(decode("aGVsbG8=").unwrap(), b"hello");
        assert!(matches!(
            decode("aGVsbG8"),
            Err(DecodeError::MalformedText { len: 7, .. })
        ));
    }

    #[test]
    fn rejects_foreign_characters() {
        let err = decode("not-valid-base64!!").unwrap_err();
        match err {
            DecodeError::MalformedText { len, message } => {
                assert_eq!(len, 18);
                assert!(!message.is_empty());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn rejects_whitespace_and_url_alphabet() {
        assert!(decode("aGVs\nbG8=").is_err());
        assert!(decode(" aGVsbG8=").is_err());
        assert!(decode("-_-_").is_err());
    }

    #[test]
    fn rejects_non_canonical_trailing_bits() {
        // "aGVsbG9=" carries set bits after the last full byte.
        assert!(decode("aGVsbG9=").is_err());
    }
}

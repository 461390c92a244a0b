//! URL-fragment-safe text encoding of compressed bytes.
//!
//! Tokens are standard base64 with `+` replaced by `-`, `/` replaced by `_`
//! and the trailing `=` padding removed. The resulting alphabet
//! (`A-Z a-z 0-9 - _`) never needs percent-encoding inside a URL fragment.

use base64::{
    Engine as _,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig, general_purpose},
};

use crate::error::{Result, ShareError};

const LENIENT_STANDARD: GeneralPurpose = GeneralPurpose::new(
    &base64::alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Returns `true` if `c` belongs to the token alphabet.
pub fn is_token_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

/// Converts standard base64 text to the URL-safe token form.
pub fn to_url_safe(base64: &str) -> String {
    base64
        .trim_end_matches('=')
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            c => c,
        })
        .collect()
}

/// Converts a URL-safe token back to standard base64 text (without padding).
pub fn from_url_safe(token: &str) -> String {
    token
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            c => c,
        })
        .collect()
}

/// Encodes bytes into a token.
pub fn encode_bytes(data: &[u8]) -> String {
    to_url_safe(&general_purpose::STANDARD.encode(data))
}

/// Decodes a token into bytes.
///
/// Padding is optional. Characters outside the token alphabet, other than
/// the standard `+`, `/` and `=`, are rejected.
pub fn decode_bytes(token: &str) -> Result<Vec<u8>> {
    if let Some(bad) = token
        .chars()
        .find(|&c| !is_token_char(c) && !matches!(c, '+' | '/' | '='))
    {
        return Err(ShareError::decode_failed(format!(
            "unexpected character {bad:?} in token"
        )));
    }

    LENIENT_STANDARD
        .decode(from_url_safe(token))
        .map_err(|e| ShareError::decode_failed(format!("invalid base64: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substitution() {
        assert_eq!(to_url_safe("a+b/c=="), "a-b_c");
        assert_eq!(from_url_safe("a-b_c"), "a+b/c");
    }

    #[test]
    fn test_substitution_is_reversible() {
        // 覆盖所有会产生 '+' 和 '/' 的字节
        let data: Vec<u8> = (0..=255u8).collect();
        let standard = general_purpose::STANDARD.encode(&data);
        let safe = to_url_safe(&standard);

        assert_eq!(from_url_safe(&safe), standard.trim_end_matches('='));
        assert!(safe.chars().all(is_token_char));
    }

    #[test]
    fn test_decode_tolerates_padding() {
        for len in 0..6 {
            let data = vec![0xfbu8; len];
            let token = encode_bytes(&data);
            assert!(!token.contains('='));
            assert_eq!(decode_bytes(&token).unwrap(), data);

            let padded = general_purpose::URL_SAFE.encode(&data);
            assert_eq!(decode_bytes(&padded).unwrap(), data);
        }
    }

    #[test]
    fn test_decode_rejects_foreign_characters() {
        assert!(matches!(
            decode_bytes("abc!def"),
            Err(ShareError::DecodeFailed(_))
        ));
        assert!(decode_bytes("abc def").is_err());
        assert!(decode_bytes("ä").is_err());
    }

    #[test]
    fn test_decode_rejects_impossible_length() {
        // 单个字符无法构成合法的 base64 分组
        assert!(decode_bytes("A").is_err());
    }
}

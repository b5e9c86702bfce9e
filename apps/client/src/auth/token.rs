//! Structural decoding of bearer tokens.
//!
//! Tokens are `header.payload.signature`. Only the payload is read, and the
//! signature is never verified: the client holds no key. Decoded claims are
//! advisory and must not gate anything the server does not re-check.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use serde_json::{Map, Value};

use crate::auth::claims::Claims;
use crate::errors::DecodeError;

/// URL-safe alphabet; issuers commonly strip padding, some keep it.
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Decode the claims of a token without verifying its signature.
///
/// Exactly three `.`-separated segments are required. The middle segment must
/// be URL-safe base64 of UTF-8 JSON whose top level is an object.
pub fn decode(token: &str) -> Result<Claims, DecodeError> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return Err(DecodeError::malformed(format!(
            "expected 3 segments, found {}",
            segments.len()
        )));
    }

    let bytes = PAYLOAD_ENGINE
        .decode(segments[1])
        .map_err(|e| DecodeError::malformed(format!("payload is not base64url: {e}")))?;

    let text = String::from_utf8(bytes)
        .map_err(|_| DecodeError::malformed("payload is not valid UTF-8"))?;

    let map = serde_json::from_str::<Map<String, Value>>(&text)
        .map_err(|e| DecodeError::malformed(format!("payload is not a JSON object: {e}")))?;

    Ok(Claims::new(map))
}

#[cfg(test)]
mod tests {
    use base64::engine::general_purpose::{URL_SAFE, URL_SAFE_NO_PAD};
    use base64::Engine;

    use super::decode;
    use crate::errors::DecodeError;

    fn token_with_payload(payload: &str) -> String {
        format!(
            "{}.{}.sig",
            URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#),
            URL_SAFE_NO_PAD.encode(payload)
        )
    }

    #[test]
    fn no_dots_is_malformed() {
        assert!(matches!(
            decode("abc"),
            Err(DecodeError::MalformedToken { .. })
        ));
    }

    #[test]
    fn wrong_segment_counts_are_malformed() {
        for token in ["", "a.b", "a.b.c.d", "....", "a..b.c"] {
            assert!(decode(token).is_err(), "{token:?} should not decode");
        }
    }

    #[test]
    fn decodes_admin_claim() {
        let claims = decode(&token_with_payload(r#"{"isAdmin":true,"userID":"u-1"}"#)).unwrap();
        assert!(claims.is_admin());
        assert_eq!(claims.user_id(), Some("u-1"));
    }

    #[test]
    fn empty_object_decodes_to_empty_claims() {
        let claims = decode(&token_with_payload("{}")).unwrap();
        assert!(claims.is_empty());
        assert!(!claims.is_admin());
    }

    #[test]
    fn padded_payload_is_accepted() {
        let token = format!("h.{}.s", URL_SAFE.encode(r#"{"isAdmin":true}"#));
        assert!(decode(&token).unwrap().is_admin());
    }

    #[test]
    fn url_safe_characters_are_decoded() {
        let payload = r#"{"note":"~~~???>>>"}"#;
        let token = token_with_payload(payload);
        let middle = token.split('.').nth(1).unwrap();
        assert!(middle.contains('-') && middle.contains('_'));
        let claims = decode(&token).unwrap();
        assert_eq!(
            claims.get("note").and_then(|v| v.as_str()),
            Some("~~~???>>>")
        );
    }

    #[test]
    fn standard_alphabet_characters_are_rejected() {
        assert!(decode("h.ab+/.s").is_err());
    }

    #[test]
    fn invalid_utf8_is_malformed() {
        let token = format!("h.{}.s", URL_SAFE_NO_PAD.encode([0xff, 0xfe, 0xfd]));
        let err = decode(&token).unwrap_err();
        assert!(err.to_string().contains("UTF-8"));
    }

    #[test]
    fn non_object_json_is_malformed() {
        for payload in ["[1,2]", "true", "\"text\"", "42", "null", "{"] {
            assert!(decode(&token_with_payload(payload)).is_err(), "{payload}");
        }
    }
}

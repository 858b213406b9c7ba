//! Request unwrapping and response re-encoding
//!
//! Requests arrive either as raw JSON or form-encoded as `args=<json>`.
//! Text responses go back as UTF-16LE without a BOM, which is what the
//! client's string reader expects.

use std::borrow::Cow;

use crate::error::{ApiError, ApiResult};

pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

const ARGS_PREFIX: &str = "args=";

/// How the request body is wrapped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    RawJson,
    FormUrlEncoded,
}

impl ContentKind {
    /// Anything that isn't form-urlencoded is treated as raw JSON
    pub fn from_content_type(content_type: Option<&str>) -> Self {
        let essence = content_type
            .and_then(|value| value.split(';').next())
            .map(str::trim);

        match essence {
            Some(mime) if mime.eq_ignore_ascii_case(FORM_URLENCODED) => ContentKind::FormUrlEncoded,
            _ => ContentKind::RawJson,
        }
    }
}

/// Strip the transport wrapping off a request body
pub fn unwrap(body: &[u8], kind: ContentKind) -> ApiResult<Cow<'_, [u8]>> {
    if body.is_empty() {
        return Err(ApiError::EmptyBody);
    }

    match kind {
        ContentKind::RawJson => Ok(Cow::Borrowed(body)),
        ContentKind::FormUrlEncoded => {
            let text = std::str::from_utf8(body)
                .map_err(|_| ApiError::MalformedEnvelope("body is not valid UTF-8".to_string()))?;
            check_escapes(text)?;

            let unescaped = urlencoding::decode(text)
                .map_err(|e| ApiError::MalformedEnvelope(format!("failed to unescape: {}", e)))?;

            match unescaped.strip_prefix(ARGS_PREFIX) {
                Some(inner) => Ok(Cow::Owned(inner.as_bytes().to_vec())),
                None => Err(ApiError::MalformedEnvelope(
                    "missing args= prefix".to_string(),
                )),
            }
        }
    }
}

/// Every `%` must introduce two hex digits
fn check_escapes(text: &str) -> ApiResult<()> {
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = bytes
                .get(i + 1..i + 3)
                .is_some_and(|pair| pair.iter().all(u8::is_ascii_hexdigit));
            if !valid {
                return Err(ApiError::MalformedEnvelope(format!(
                    "invalid escape at byte {}",
                    i
                )));
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    Ok(())
}

/// Re-encode a text response as UTF-16LE. Bytes that aren't valid UTF-8
/// are returned untouched.
pub fn encode_for_wire(bytes: &[u8]) -> Vec<u8> {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.encode_utf16().flat_map(u16::to_le_bytes).collect(),
        Err(_) => bytes.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_utf16le(bytes: &[u8]) -> String {
        assert_eq!(bytes.len() % 2, 0);
        let units: Vec<u16> = bytes
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect();
        String::from_utf16(&units).unwrap()
    }

    #[test]
    fn test_content_kind_detection() {
        assert_eq!(
            ContentKind::from_content_type(Some(FORM_URLENCODED)),
            ContentKind::FormUrlEncoded
        );
        assert_eq!(
            ContentKind::from_content_type(Some("Application/X-WWW-Form-Urlencoded; charset=utf-8")),
            ContentKind::FormUrlEncoded
        );
        assert_eq!(
            ContentKind::from_content_type(Some("application/json")),
            ContentKind::RawJson
        );
        assert_eq!(ContentKind::from_content_type(None), ContentKind::RawJson);
    }

    #[test]
    fn test_unwrap_form_body() {
        let body = b"args=%7B%22region%22%3A%22JPN%22%7D";
        let inner = unwrap(body, ContentKind::FormUrlEncoded).unwrap();
        assert_eq!(inner.as_ref(), br#"{"region":"JPN"}"#);
    }

    #[test]
    fn test_unwrap_keeps_plus_signs() {
        let body = b"args=%7B%22keyword%22%3A%22YQ+%3D%22%7D";
        let inner = unwrap(body, ContentKind::FormUrlEncoded).unwrap();
        assert_eq!(inner.as_ref(), br#"{"keyword":"YQ+="}"#);
    }

    #[test]
    fn test_unwrap_raw_body_unchanged() {
        let body = br#"{"region":"US"}"#;
        let inner = unwrap(body, ContentKind::RawJson).unwrap();
        assert!(matches!(inner, Cow::Borrowed(_)));
        assert_eq!(inner.as_ref(), body);
    }

    #[test]
    fn test_unwrap_empty_body() {
        assert!(matches!(
            unwrap(b"", ContentKind::RawJson),
            Err(ApiError::EmptyBody)
        ));
        assert!(matches!(
            unwrap(b"", ContentKind::FormUrlEncoded),
            Err(ApiError::EmptyBody)
        ));
    }

    #[test]
    fn test_unwrap_malformed_form_body() {
        let bodies: [&[u8]; 5] = [b"region=JPN", b"arg", b"args=%7", b"args=%zz", b"args=%FF"];
        for body in bodies {
            let result = unwrap(body, ContentKind::FormUrlEncoded);
            assert!(
                matches!(result, Err(ApiError::MalformedEnvelope(_))),
                "{:?} was accepted",
                String::from_utf8_lossy(body)
            );
        }
    }

    #[test]
    fn test_encode_for_wire_utf16le_without_bom() {
        let wire = encode_for_wire(br#"{"endcode":0}"#);
        assert_eq!(&wire[..4], &[b'{', 0, b'"', 0]);
        assert_eq!(wire.len(), 26);
        assert_eq!(decode_utf16le(&wire), r#"{"endcode":0}"#);
    }

    #[test]
    fn test_encode_for_wire_surrogate_pairs() {
        let text = "{\"name\":\"\u{1F3AE}é\"}";
        let wire = encode_for_wire(text.as_bytes());
        assert_eq!(wire.len(), text.encode_utf16().count() * 2);
        assert_eq!(decode_utf16le(&wire), text);
        // U+1F3AE -> D83C DFAE
        assert!(wire.windows(4).any(|w| w == [0x3C, 0xD8, 0xAE, 0xDF]));
    }

    #[test]
    fn test_encode_for_wire_passes_binary_through() {
        let binary = vec![0x28, 0xB5, 0x2F, 0xFD, 0xFF, 0x00, 0x80];
        assert_eq!(encode_for_wire(&binary), binary);
    }
}

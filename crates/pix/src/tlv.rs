//! Tag-Length-Value Fields
//!
//! Every BR Code field is `ID` (2 chars) + `LEN` (2 decimal digits, the byte
//! length of the value) + `VALUE`. Values of some fields are themselves TLV
//! sequences (merchant account information, additional data).

use serde::{Deserialize, Serialize};

use crate::error::{PixError, PixResult};

/// Largest value a 2-digit length prefix can declare.
pub const MAX_FIELD_LEN: usize = 99;

/// One decoded field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TlvField {
    pub id: String,
    pub value: String,
}

impl TlvField {
    /// Decode this field's value as a nested TLV sequence.
    pub fn children(&self) -> PixResult<Vec<TlvField>> {
        parse_fields(&self.value)
    }
}

/// Encode one field. The value must already fit in [`MAX_FIELD_LEN`] bytes;
/// use [`truncate_to`] first when it might not.
pub fn encode_field(id: &str, value: &str) -> String {
    debug_assert!(id.len() == 2, "TLV ids are two characters");
    debug_assert!(value.len() <= MAX_FIELD_LEN, "TLV value exceeds 99 bytes");
    format!("{}{:02}{}", id, value.len(), value)
}

/// Longest prefix of `value` that is at most `max_bytes` long and ends on a
/// char boundary.
pub fn truncate_to(value: &str, max_bytes: usize) -> &str {
    if value.len() <= max_bytes {
        return value;
    }
    let mut end = max_bytes;
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    &value[..end]
}

/// Decode a whole TLV sequence. Every declared length must match the bytes
/// that follow it exactly; trailing garbage is an error.
pub fn parse_fields(payload: &str) -> PixResult<Vec<TlvField>> {
    let mut fields = Vec::new();
    let mut pos = 0;

    while pos < payload.len() {
        let header = payload
            .get(pos..pos + 4)
            .ok_or_else(|| PixError::malformed(format!("truncated field header at byte {}", pos)))?;
        // Ids and lengths are ASCII digits; anything else cannot be split safely.
        if !header.is_ascii() {
            return Err(PixError::malformed(format!(
                "non-ASCII field header at byte {}",
                pos
            )));
        }
        let (id, len) = header.split_at(2);
        if !len.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PixError::malformed(format!(
                "field {} has a non-numeric length '{}'",
                id, len
            )));
        }
        let len: usize = len
            .parse()
            .map_err(|_| PixError::malformed(format!("field {} has an invalid length", id)))?;

        let start = pos + 4;
        let value = payload.get(start..start + len).ok_or_else(|| {
            PixError::malformed(format!(
                "field {} declares {} bytes but the payload ends early",
                id, len
            ))
        })?;

        fields.push(TlvField {
            id: id.to_string(),
            value: value.to_string(),
        });
        pos = start + len;
    }

    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_field_pads_length() {
        assert_eq!(encode_field("58", "BR"), "5802BR");
        assert_eq!(encode_field("05", ""), "0500");
    }

    #[test]
    fn test_encode_field_counts_bytes() {
        // "São" is 3 chars but 4 bytes.
        assert_eq!(encode_field("60", "São"), "6004São");
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate_to("abcdef", 4), "abcd");
        assert_eq!(truncate_to("abc", 10), "abc");
        // 'ã' occupies bytes 1..3; cutting at 2 would split it.
        assert_eq!(truncate_to("São", 2), "S");
        assert_eq!(truncate_to("São", 3), "Sã");
    }

    #[test]
    fn test_parse_nested_fields() {
        let err = parse_fields("0002016207050312326").unwrap_err();
        assert!(matches!(err, PixError::Malformed(_)));

        let fields = parse_fields("000201620705031235802BR").unwrap();
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[1].id, "62");
        let children = fields[1].children().unwrap();
        assert_eq!(children, vec![TlvField { id: "05".into(), value: "123".into() }]);
        assert_eq!(fields[2].value, "BR");
    }

    #[test]
    fn test_parse_rejects_bad_length() {
        assert!(parse_fields("00x1").is_err());
        assert!(parse_fields("0").is_err());
        assert!(parse_fields("0005ab").is_err());
    }

    #[test]
    fn test_parse_rejects_multibyte_header() {
        // 'é' spans bytes 1..3, so the id/length split would fall inside it.
        let err = parse_fields("0é0").unwrap_err();
        assert!(matches!(err, PixError::Malformed(_)));
        assert!(parse_fields("000201é0020").is_err());
    }

    #[test]
    fn test_parse_multibyte_value() {
        let fields = parse_fields("6004São").unwrap();
        assert_eq!(fields[0].value, "São");
    }
}

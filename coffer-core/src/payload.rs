use crate::errors::PayloadError;

/// Check that `bytes` is a well-formed simple secret.
///
/// The only accepted shape is a JSON object with exactly two keys: `type`,
/// which must be the literal `"simple"`, and `value`, an opaque string. The
/// payload itself is stored verbatim, so validation never re-serializes.
pub fn validate_simple_secret(bytes: &[u8]) -> Result<(), PayloadError> {
    let text = std::str::from_utf8(bytes).map_err(|_| PayloadError::InvalidUtf8)?;
    let message: serde_json::Value =
        serde_json::from_str(text).map_err(|_| PayloadError::InvalidJson)?;
    let Some(fields) = message.as_object() else {
        return Err(PayloadError::TypeMissing);
    };
    match fields.get("type") {
        None => return Err(PayloadError::TypeMissing),
        Some(kind) if kind != "simple" => return Err(PayloadError::TypeUnknown),
        Some(_) => {}
    }
    if !fields.contains_key("value") {
        return Err(PayloadError::ValueMissing);
    }
    if fields.len() != 2 {
        return Err(PayloadError::UnknownAttributes);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_a_simple_secret() {
        assert_eq!(
            validate_simple_secret(br#"{"type":"simple","value":"1234"}"#),
            Ok(())
        );
    }

    #[test]
    fn rejects_malformed_json() {
        assert_eq!(
            validate_simple_secret(br#"{"type":}"simple"}"#),
            Err(PayloadError::InvalidJson)
        );
    }

    #[test]
    fn rejects_non_utf8_bytes() {
        assert_eq!(
            validate_simple_secret(&[0xff, 0xfe]),
            Err(PayloadError::InvalidUtf8)
        );
    }

    #[test]
    fn rejects_a_missing_type() {
        assert_eq!(
            validate_simple_secret(br#"{"value":"1234"}"#),
            Err(PayloadError::TypeMissing)
        );
    }

    #[test]
    fn rejects_a_non_object_document() {
        assert_eq!(
            validate_simple_secret(br#"["simple"]"#),
            Err(PayloadError::TypeMissing)
        );
    }

    #[test]
    fn rejects_an_unknown_type() {
        assert_eq!(
            validate_simple_secret(br#"{"type":"kem","value":"1234"}"#),
            Err(PayloadError::TypeUnknown)
        );
    }

    #[test]
    fn rejects_a_missing_value() {
        assert_eq!(
            validate_simple_secret(br#"{"type":"simple"}"#),
            Err(PayloadError::ValueMissing)
        );
    }

    #[test]
    fn rejects_extra_attributes() {
        assert_eq!(
            validate_simple_secret(br#"{"type":"simple","value":"1234","extra":1}"#),
            Err(PayloadError::UnknownAttributes)
        );
    }
}

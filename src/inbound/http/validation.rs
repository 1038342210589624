//! Shared validation helpers for inbound HTTP handlers.
//!
//! Path ids arrive as strings and are parsed here so malformed input is
//! rejected with the uniform JSON error shape before any service call.

use serde_json::json;

use crate::domain::{Error, UserId, UserValidationError};

/// Parse a path segment into an integer entity id.
pub(crate) fn parse_id(raw: &str, field: &'static str) -> Result<i32, Error> {
    raw.parse::<i32>().map_err(|_| {
        Error::invalid_request(format!("{field} must be an integer id")).with_details(json!({
            "field": field,
            "value": raw,
            "code": "invalid_id",
        }))
    })
}

/// Parse a path segment into a [`UserId`].
pub(crate) fn parse_user_id(raw: &str) -> Result<UserId, Error> {
    parse_id(raw, "id").map(UserId::new)
}

/// Map username validation failures onto the uniform error shape.
pub(crate) fn map_username_error(err: UserValidationError) -> Error {
    let code = match err {
        UserValidationError::EmptyUsername => "empty_username",
        UserValidationError::UsernameTooShort { .. } => "username_too_short",
        UserValidationError::UsernameTooLong { .. } => "username_too_long",
        UserValidationError::UsernameInvalidCharacters => "username_invalid_characters",
    };
    Error::invalid_request(err.to_string()).with_details(json!({
        "field": "username",
        "code": code,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;
    use serde_json::Value;

    #[rstest]
    #[case("42", 42)]
    #[case("-7", -7)]
    #[case("0", 0)]
    fn parse_id_accepts_integers(#[case] raw: &str, #[case] expected: i32) {
        assert_eq!(parse_id(raw, "id").expect("parses"), expected);
    }

    #[rstest]
    #[case("abc")]
    #[case("1.5")]
    #[case("")]
    #[case("9999999999999")]
    fn parse_id_rejects_non_integers(#[case] raw: &str) {
        let err = parse_id(raw, "id").expect_err("rejects");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        let details = err.details().and_then(Value::as_object).expect("details");
        assert_eq!(details.get("code").and_then(Value::as_str), Some("invalid_id"));
    }

    #[test]
    fn username_errors_carry_field_details() {
        let err = map_username_error(UserValidationError::EmptyUsername);
        let details = err.details().and_then(Value::as_object).expect("details");
        assert_eq!(details.get("field").and_then(Value::as_str), Some("username"));
        assert_eq!(
            details.get("code").and_then(Value::as_str),
            Some("empty_username")
        );
    }
}

//! Request bodies.

use serde::{Deserialize, Deserializer, Serialize};

/// Body of `POST /room/comment`. Every field is required.
///
/// `category` stays a plain string here; it is checked against the allowed
/// categories by the engine so that a bad value is reported as 400 with a
/// readable message rather than as a body parse failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCommentRequest {
    pub user_email: String,
    #[serde(deserialize_with = "integer_or_numeric_string")]
    pub room_id: i64,
    pub text: String,
    pub category: String,
}

/// Accepts `1` as well as `"1"`; older clients send keys as strings.
fn integer_or_numeric_string<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Key {
        Number(i64),
        Text(String),
    }

    match Key::deserialize(deserializer)? {
        Key::Number(n) => Ok(n),
        Key::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("room_id '{s}' is not an integer"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn room_id_accepts_numbers_and_numeric_strings() {
        let numeric: CreateCommentRequest = serde_json::from_str(
            r#"{"user_email":"a@b.com","room_id":1,"text":"careful","category":"Bug"}"#,
        )
        .expect("numeric room_id");
        let textual: CreateCommentRequest = serde_json::from_str(
            r#"{"user_email":"a@b.com","room_id":"1","text":"careful","category":"Bug"}"#,
        )
        .expect("string room_id");

        assert_eq!(numeric, textual);
        assert_eq!(numeric.room_id, 1);
    }

    #[test]
    fn missing_fields_are_rejected() {
        let result = serde_json::from_str::<CreateCommentRequest>(
            r#"{"user_email":"a@b.com","room_id":1,"category":"Bug"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn non_numeric_room_id_is_rejected() {
        let result = serde_json::from_str::<CreateCommentRequest>(
            r#"{"user_email":"a@b.com","room_id":"hall","text":"t","category":"Bug"}"#,
        );
        assert!(result.is_err());
    }
}

//! Lenient integer decoding for request bodies.
//!
//! Clients post form values straight from `<input>` elements, so integer
//! fields arrive either as JSON numbers or as numeric strings. Floats are
//! truncated toward zero.

use serde::de::{self, Deserializer};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoerceError {
    #[error("invalid literal for integer: '{0}'")]
    InvalidLiteral(String),
    #[error("integer out of range: {0}")]
    OutOfRange(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Loose {
    Int(i64),
    Float(f64),
    Text(String),
}

pub fn coerce_i32(raw: &str) -> Result<i32, CoerceError> {
    let trimmed = raw.trim();
    match trimmed.parse::<i64>() {
        Ok(n) => i32::try_from(n).map_err(|_| CoerceError::OutOfRange(trimmed.to_string())),
        Err(_) => Err(CoerceError::InvalidLiteral(trimmed.to_string())),
    }
}

pub fn int<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    match Loose::deserialize(deserializer)? {
        Loose::Int(n) => {
            i32::try_from(n).map_err(|_| de::Error::custom(CoerceError::OutOfRange(n.to_string())))
        }
        Loose::Float(f) if f.is_finite() && f.abs() < i32::MAX as f64 => Ok(f.trunc() as i32),
        Loose::Float(f) => Err(de::Error::custom(CoerceError::OutOfRange(f.to_string()))),
        Loose::Text(s) => coerce_i32(&s).map_err(de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Body {
        #[serde(deserialize_with = "int")]
        value: i32,
    }

    fn parse(json: &str) -> Result<i32, serde_json::Error> {
        serde_json::from_str::<Body>(json).map(|b| b.value)
    }

    #[test]
    fn accepts_numbers_and_numeric_strings() {
        assert_eq!(parse(r#"{"value": 7}"#).unwrap(), 7);
        assert_eq!(parse(r#"{"value": -1}"#).unwrap(), -1);
        assert_eq!(parse(r#"{"value": " 42 "}"#).unwrap(), 42);
        assert_eq!(parse(r#"{"value": 3.9}"#).unwrap(), 3);
    }

    #[test]
    fn coerce_reports_the_offending_text() {
        assert_eq!(coerce_i32(" 12 "), Ok(12));
        assert_eq!(
            coerce_i32("12 szt"),
            Err(CoerceError::InvalidLiteral("12 szt".to_string()))
        );
        assert_eq!(
            coerce_i32("3000000000"),
            Err(CoerceError::OutOfRange("3000000000".to_string()))
        );
    }

    #[test]
    fn rejects_garbage() {
        let err = parse(r#"{"value": "abc"}"#).unwrap_err();
        assert!(err.to_string().contains("invalid literal"));
        assert!(parse(r#"{"value": 99999999999}"#).is_err());
        assert!(parse(r#"{"value": null}"#).is_err());
    }
}

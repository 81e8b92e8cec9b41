//! Path parameter parsing
//!
//! All identifiers are opaque decimal Snowflake strings; a malformed id is a
//! 400 before any lookup happens.

use tube_core::Snowflake;

use crate::response::ApiError;

/// Parse a path segment as a Snowflake id, naming the parameter in the error
pub fn parse_id(raw: &str, name: &str) -> Result<Snowflake, ApiError> {
    Snowflake::parse(raw).map_err(|_| ApiError::invalid_path(format!("Invalid {name} format")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("42", "video_id").unwrap(), Snowflake::new(42));
    }

    #[test]
    fn test_parse_id_rejects_garbage() {
        let err = parse_id("not-a-number", "video_id").unwrap_err();
        assert!(err.to_string().contains("video_id"));
    }
}

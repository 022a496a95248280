//! Request and response bodies
//!
//! Enumerated request fields arrive as strings and are parsed here, so an
//! unknown value is a 400 rather than a body deserialization failure.

pub mod auth;
pub mod items;
pub mod claims;

use std::fmt::Display;
use std::str::FromStr;

use serde::Serialize;

use crate::error::ApiError;

/// Parses an enumerated field, mapping failure to 400
pub fn parse_enum<T>(value: &str) -> Result<T, ApiError>
where
    T: FromStr,
    T::Err: Display,
{
    value
        .trim()
        .parse()
        .map_err(|e: T::Err| ApiError::BadRequest(e.to_string()))
}

/// Parses an optional enumerated field
pub fn parse_optional_enum<T>(value: Option<&str>) -> Result<Option<T>, ApiError>
where
    T: FromStr,
    T::Err: Display,
{
    value.map(parse_enum).transpose()
}

/// `{message}` acknowledgement
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// `{success, count, data}` listing envelope
#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub success: bool,
    pub count: usize,
    pub data: Vec<T>,
}

impl<T> ListResponse<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self {
            success: true,
            count: data.len(),
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_items::ItemStatus;

    #[test]
    fn test_parse_enum() {
        assert_eq!(parse_enum::<ItemStatus>(" found ").unwrap(), ItemStatus::Found);
        assert!(matches!(
            parse_enum::<ItemStatus>("misplaced"),
            Err(ApiError::BadRequest(_))
        ));
        assert_eq!(parse_optional_enum::<ItemStatus>(None).unwrap(), None);
    }
}

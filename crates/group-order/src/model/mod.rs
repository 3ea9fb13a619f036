//! # Domain Model
//!
//! Plain data types for restaurants, menus and group orders, plus the input
//! validation they share. The actor crates own these values; nothing here
//! talks to storage or to other actors.

pub mod menu_item;
pub mod order;
pub mod price;
pub mod restaurant;

pub use menu_item::*;
pub use order::*;
pub use price::*;
pub use restaurant::*;

use thiserror::Error;

/// Longest accepted text value, in characters (`VARCHAR(255)` columns).
pub const MAX_TEXT_LEN: usize = 255;

/// A required field is missing or a value is malformed.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{0}")]
pub struct InvalidInput(pub String);

impl InvalidInput {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

/// Validates a required text field: trimmed, non-empty, at most
/// [`MAX_TEXT_LEN`] characters.
pub fn required_text(field: &str, value: &str) -> Result<String, InvalidInput> {
    let value = value.trim();
    if value.is_empty() {
        return Err(InvalidInput(format!("{field} is required")));
    }
    bounded(field, value)
}

/// Validates an optional text field. Blank input means "no value".
pub fn optional_text(field: &str, value: Option<&str>) -> Result<Option<String>, InvalidInput> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => bounded(field, value).map(Some),
    }
}

fn bounded(field: &str, value: &str) -> Result<String, InvalidInput> {
    if value.chars().count() > MAX_TEXT_LEN {
        return Err(InvalidInput(format!(
            "{field} must be at most {MAX_TEXT_LEN} characters"
        )));
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_text_trims_and_rejects_blank() {
        assert_eq!(required_text("name", "  Cafe ").unwrap(), "Cafe");
        assert_eq!(
            required_text("name", "   "),
            Err(InvalidInput::new("name is required"))
        );
    }

    #[test]
    fn text_longer_than_column_is_rejected() {
        let long = "x".repeat(MAX_TEXT_LEN + 1);
        assert!(required_text("name", &long).is_err());
        assert!(required_text("name", &long[..MAX_TEXT_LEN]).is_ok());
        assert!(optional_text("notes", Some(&long)).is_err());
    }

    #[test]
    fn blank_optional_text_is_none() {
        assert_eq!(optional_text("notes", None).unwrap(), None);
        assert_eq!(optional_text("notes", Some("  ")).unwrap(), None);
        assert_eq!(
            optional_text("notes", Some("oat milk")).unwrap(),
            Some("oat milk".to_string())
        );
    }
}

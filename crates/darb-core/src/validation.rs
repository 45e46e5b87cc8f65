//! # Validation
//!
//! Checks run on shopper input before anything is sent to the API.
//!
//! ## Where Validation Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Review form          Checkout form          CLI arguments              │
//! │  comment, stars       address                product id, code           │
//! │       │                    │                       │                    │
//! │       ▼                    ▼                       ▼                    │
//! │  validate_review     validate_address      validate_product_id          │
//! │       │                    │                       │                    │
//! │       └────────────────────┴───────────────────────┘                    │
//! │                            │                                            │
//! │                            ▼                                            │
//! │             ValidationError → CoreError::Validation                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::review::MAX_STARS;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest review comment accepted.
pub const MAX_COMMENT_LENGTH: usize = 1000;

/// Longest delivery address accepted.
pub const MAX_ADDRESS_LENGTH: usize = 300;

/// Validates a review before submission.
///
/// ## Rules
/// - Comment must not be blank and at most [`MAX_COMMENT_LENGTH`] characters
/// - Rating must be 1 to 5 stars
///
/// ## Returns
/// The trimmed comment.
///
/// ```rust
/// use darb_core::validation::validate_review;
///
/// assert_eq!(validate_review("  Lasts all day ", 5).unwrap(), "Lasts all day");
/// assert!(validate_review("   ", 4).is_err());
/// assert!(validate_review("Nice", 0).is_err());
/// ```
pub fn validate_review(comment: &str, rating: u8) -> ValidationResult<String> {
    let comment = comment.trim();

    if comment.is_empty() {
        return Err(ValidationError::Required {
            field: "comment".to_string(),
        });
    }

    if comment.chars().count() > MAX_COMMENT_LENGTH {
        return Err(ValidationError::TooLong {
            field: "comment".to_string(),
            max: MAX_COMMENT_LENGTH,
        });
    }

    validate_stars(rating)?;
    Ok(comment.to_string())
}

/// Validates a star count (1 to 5).
pub fn validate_stars(rating: u8) -> ValidationResult<()> {
    if !(1..=MAX_STARS).contains(&rating) {
        return Err(ValidationError::OutOfRange {
            field: "rating".to_string(),
            min: 1,
            max: i64::from(MAX_STARS),
        });
    }
    Ok(())
}

/// Validates a delivery address and returns it trimmed.
///
/// Blank addresses are reported by checkout as `MissingAddress`; this check
/// covers the length bound.
pub fn validate_address(address: &str) -> ValidationResult<String> {
    let address = address.trim();

    if address.is_empty() {
        return Err(ValidationError::Required {
            field: "address".to_string(),
        });
    }

    if address.chars().count() > MAX_ADDRESS_LENGTH {
        return Err(ValidationError::TooLong {
            field: "address".to_string(),
            max: MAX_ADDRESS_LENGTH,
        });
    }

    Ok(address.to_string())
}

/// Validates a product id taken from user input.
pub fn validate_product_id(id: &str) -> ValidationResult<()> {
    let id = id.trim();

    if id.is_empty() {
        return Err(ValidationError::Required {
            field: "product id".to_string(),
        });
    }

    // Ids end up in URL paths.
    if id.contains('/') || id.contains('?') || id.contains('#') {
        return Err(ValidationError::InvalidFormat {
            field: "product id".to_string(),
            reason: "must not contain '/', '?' or '#'".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_review() {
        assert_eq!(validate_review("Great projection", 4).unwrap(), "Great projection");

        assert_eq!(
            validate_review(" \n ", 3),
            Err(ValidationError::Required {
                field: "comment".to_string()
            })
        );
        assert!(validate_review("ok", 6).is_err());
        assert!(validate_review(&"a".repeat(MAX_COMMENT_LENGTH + 1), 5).is_err());
    }

    #[test]
    fn test_validate_stars() {
        for stars in 1..=5 {
            assert!(validate_stars(stars).is_ok());
        }
        assert!(validate_stars(0).is_err());
        assert!(validate_stars(6).is_err());
    }

    #[test]
    fn test_validate_address() {
        assert_eq!(validate_address("  5 Tahrir Sq ").unwrap(), "5 Tahrir Sq");
        assert!(validate_address("").is_err());
        assert!(validate_address(&"x".repeat(MAX_ADDRESS_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_validate_product_id() {
        assert!(validate_product_id("42").is_ok());
        assert!(validate_product_id("Discovery set").is_ok());
        assert!(validate_product_id(" ").is_err());
        assert!(validate_product_id("../users").is_err());
    }
}

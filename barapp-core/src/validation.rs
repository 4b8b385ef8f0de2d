//! Field validation applied before a record enters a collection.

use thiserror::Error;

/// Reasons a record is rejected before it is written.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{entity} {field} cannot be empty")]
    EmptyField {
        entity: &'static str,
        field: &'static str,
    },

    #[error("Quantity must be a positive number, got {0}")]
    InvalidQuantity(f64),

    #[error("No unused id after {attempts} attempts")]
    IdsExhausted { attempts: usize },
}

/// Fails when `value` is empty once surrounding whitespace is removed.
pub fn require_trimmed(
    entity: &'static str,
    field: &'static str,
    value: &str,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField { entity, field });
    }
    Ok(())
}

/// Fails only on the empty string; whitespace counts as content.
pub fn require_present(
    entity: &'static str,
    field: &'static str,
    value: &str,
) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::EmptyField { entity, field });
    }
    Ok(())
}

/// Quantities must be finite and strictly greater than zero.
pub fn require_positive(quantity: f64) -> Result<(), ValidationError> {
    if quantity.is_finite() && quantity > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::InvalidQuantity(quantity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_trimmed_rejects_whitespace() {
        let err = require_trimmed("Drink", "name", "   ").unwrap_err();
        assert_eq!(
            err,
            ValidationError::EmptyField {
                entity: "Drink",
                field: "name"
            }
        );
        assert_eq!(err.to_string(), "Drink name cannot be empty");
    }

    #[test]
    fn test_require_present_accepts_whitespace() {
        assert!(require_present("User", "name", " ").is_ok());
        assert!(require_present("User", "name", "").is_err());
    }

    #[test]
    fn test_require_positive() {
        assert!(require_positive(0.5).is_ok());
        assert!(require_positive(0.0).is_err());
        assert!(require_positive(-1.0).is_err());
        assert!(require_positive(f64::NAN).is_err());
        assert!(require_positive(f64::INFINITY).is_err());
    }
}

//! # Validation Module
//!
//! Field-level input validation for AccounTech.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend (TypeScript)                                        │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Session boundary (Rust)                                      │
//! │  └── THIS MODULE: field validation before draft mutation               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Draft rules (draft.rs / voucher.rs)                          │
//! │  ├── Balance invariants                                                │
//! │  ├── Section applicability per voucher type                            │
//! │  └── Minimum line counts                                               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 4: Store (SQLite)                                               │
//! │  └── NOT NULL / UNIQUE / foreign key constraints                        │
//! │                                                                         │
//! │  Defense in depth: multiple layers catch different errors              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a user-entered voucher number.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 30 characters
/// - Letters, digits, hyphens, slashes, and underscores only
///
/// A blank number is legal while editing (the store lookup may have
/// failed); this validator runs when the user types an override.
pub fn validate_voucher_number(number: &str) -> ValidationResult<()> {
    let number = number.trim();

    if number.is_empty() {
        return Err(ValidationError::Required {
            field: "voucher number".to_string(),
        });
    }

    if number.len() > 30 {
        return Err(ValidationError::TooLong {
            field: "voucher number".to_string(),
            max: 30,
        });
    }

    if !number
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '/' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "voucher number".to_string(),
            reason: "must contain only letters, numbers, hyphens, slashes, and underscores"
                .to_string(),
        });
    }

    Ok(())
}

/// Validates a narration or reference text.
///
/// ## Rules
/// - Can be empty (both fields are optional)
/// - Maximum 500 characters
///
/// ## Returns
/// The trimmed text.
pub fn validate_narration(text: &str) -> ValidationResult<String> {
    let text = text.trim();

    if text.len() > 500 {
        return Err(ValidationError::TooLong {
            field: "narration".to_string(),
            max: 500,
        });
    }

    Ok(text.to_string())
}

/// Validates a place-of-supply state code.
///
/// ## Rules
/// - Exactly two ASCII digits ("27", "09")
pub fn validate_state_code(code: &str) -> ValidationResult<()> {
    let code = code.trim();

    if code.len() != 2 || !code.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "place of supply".to_string(),
            reason: "must be a two-digit state code".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a stock quantity.
///
/// ## Rules
/// - Must be zero or positive (a row may be mid-entry)
pub fn validate_quantity(quantity: Decimal) -> ValidationResult<()> {
    if quantity.is_sign_negative() && !quantity.is_zero() {
        return Err(ValidationError::MustBeNonNegative {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a per-unit rate in paise.
///
/// ## Rules
/// - Must be zero or positive (zero allowed for free samples)
pub fn validate_rate(rate: Money) -> ValidationResult<()> {
    if rate.is_negative() {
        return Err(ValidationError::MustBeNonNegative {
            field: "rate".to_string(),
        });
    }

    Ok(())
}

/// Validates a line amount in paise.
///
/// ## Rules
/// - Must be zero or positive; the debit/credit side carries the sign
///   semantics, never the amount itself
pub fn validate_amount(amount: Money) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::MustBeNonNegative {
            field: "amount".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// UUID Validators
// =============================================================================

/// Validates a UUID string format.
///
/// ## Example
/// ```rust
/// use accountech_core::validation::validate_uuid;
///
/// assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_uuid("not-a-uuid").is_err());
/// ```
pub fn validate_uuid(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_voucher_number() {
        assert!(validate_voucher_number("SA0001").is_ok());
        assert!(validate_voucher_number("SA/25-26/0001").is_ok());

        assert!(validate_voucher_number("").is_err());
        assert!(validate_voucher_number("   ").is_err());
        assert!(validate_voucher_number("has space").is_err());
        assert!(validate_voucher_number(&"A".repeat(40)).is_err());
    }

    #[test]
    fn test_validate_narration() {
        assert_eq!(
            validate_narration("  Being rent for August  ").unwrap(),
            "Being rent for August"
        );
        assert!(validate_narration("").is_ok());
        assert!(validate_narration(&"A".repeat(600)).is_err());
    }

    #[test]
    fn test_validate_state_code() {
        assert!(validate_state_code("27").is_ok());
        assert!(validate_state_code("09").is_ok());
        assert!(validate_state_code("MH").is_err());
        assert!(validate_state_code("123").is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(Decimal::ZERO).is_ok());
        assert!(validate_quantity(Decimal::new(25, 1)).is_ok()); // 2.5
        assert!(validate_quantity(Decimal::new(-1, 0)).is_err());
    }

    #[test]
    fn test_validate_rate_and_amount() {
        assert!(validate_rate(Money::zero()).is_ok());
        assert!(validate_rate(Money::from_paise(100)).is_ok());
        assert!(validate_rate(Money::from_paise(-1)).is_err());
        assert!(validate_amount(Money::from_paise(-1)).is_err());
    }

    #[test]
    fn test_validate_uuid() {
        assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_uuid("").is_err());
        assert!(validate_uuid("not-a-uuid").is_err());
    }
}

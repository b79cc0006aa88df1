//! # Voucher Number Generation
//!
//! Produces the next sequential number for a (company, voucher type) pair.
//!
//! ## Algorithm
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 Next Number From Last Number                            │
//! │                                                                         │
//! │  Store lookup: last number for (company, type), newest first           │
//! │       │                                                                 │
//! │       ├── None ─────────────────────────► sequence starts at 1         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  "SA0007" ── strip non-digits ──► "0007" ── parse ──► 7 ──► 8          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PREFIX + zero-pad(4) ──► "SA0008"                                     │
//! │                                                                         │
//! │  Failure mode: a failed store lookup leaves the field blank for        │
//! │  manual entry (handled by the session layer, non-fatal).               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Race
//! Two concurrent sessions reading the same last number would both
//! generate "SA0008". The number is therefore only a suggestion: the
//! store enforces uniqueness per (company, type, number), and the session
//! layer regenerates and retries on a uniqueness violation at save time.

use crate::types::VoucherType;
use crate::NUMBER_PAD_WIDTH;

/// Generates the next voucher number from the last persisted one.
///
/// Non-digit characters in the last number are ignored; a last number
/// with no digits at all (or `None`) restarts the sequence at 1.
///
/// ## Example
/// ```rust
/// use accountech_core::numbering::next_voucher_number;
/// use accountech_core::types::VoucherType;
///
/// assert_eq!(
///     next_voucher_number(VoucherType::Sales, Some("SA0007")),
///     "SA0008"
/// );
/// assert_eq!(next_voucher_number(VoucherType::Payment, None), "PA0001");
/// ```
pub fn next_voucher_number(voucher_type: VoucherType, last: Option<&str>) -> String {
    let next = last.map_or(1, |n| parse_sequence(n) + 1);
    format!(
        "{}{:0width$}",
        voucher_type.prefix(),
        next,
        width = NUMBER_PAD_WIDTH
    )
}

/// Extracts the numeric sequence from a voucher number.
///
/// User-overridden numbers may carry arbitrary separators ("SA/25-26/07"):
/// every digit counts, everything else is dropped. Returns 0 when no
/// digits remain, so the caller's +1 restarts the sequence.
fn parse_sequence(number: &str) -> u64 {
    let digits: String = number.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(0)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increments_last_number() {
        assert_eq!(
            next_voucher_number(VoucherType::Sales, Some("SA0007")),
            "SA0008"
        );
    }

    #[test]
    fn test_starts_at_one_without_history() {
        assert_eq!(next_voucher_number(VoucherType::Payment, None), "PA0001");
        assert_eq!(next_voucher_number(VoucherType::Journal, None), "JO0001");
    }

    #[test]
    fn test_strips_non_digits() {
        assert_eq!(
            next_voucher_number(VoucherType::Receipt, Some("RE-0042")),
            "RE0043"
        );
    }

    #[test]
    fn test_digit_free_last_number_restarts() {
        assert_eq!(
            next_voucher_number(VoucherType::Contra, Some("DRAFT")),
            "CO0001"
        );
        assert_eq!(next_voucher_number(VoucherType::Contra, Some("")), "CO0001");
    }

    #[test]
    fn test_width_grows_past_padding() {
        assert_eq!(
            next_voucher_number(VoucherType::Sales, Some("SA9999")),
            "SA10000"
        );
    }

    #[test]
    fn test_sequence_parse() {
        assert_eq!(parse_sequence("SA0007"), 7);
        assert_eq!(parse_sequence("no digits"), 0);
        assert_eq!(parse_sequence("A1B2C3"), 123);
    }
}

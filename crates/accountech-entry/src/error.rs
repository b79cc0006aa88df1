//! # API Error Type
//!
//! Unified error type for entry session operations.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in AccounTech                             │
//! │                                                                         │
//! │  Frontend                    Rust Backend                               │
//! │  ────────                    ────────────                               │
//! │                                                                         │
//! │  invoke('save_voucher')                                                 │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Session Operation                                               │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Database Error? ─── DbError::QueryFailed("...") ──┐            │  │
//! │  │         │                                          │            │  │
//! │  │         ▼                                          ▼            │  │
//! │  │  Domain Error? ───── VoucherError::Unbalanced ─── ApiError ────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  try {                                                                  │
//! │    await invoke('save_voucher')                                         │
//! │  } catch (e) {                                                          │
//! │    // e.message = "Journal is unbalanced: debit ₹500.00, ..."           │
//! │    // e.code = "BALANCE_ERROR"                                          │
//! │  }                                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;

use accountech_core::VoucherError;
use accountech_db::DbError;

/// API error returned from session operations.
///
/// ## Serialization
/// This is what the frontend receives when an operation fails:
/// ```json
/// {
///   "code": "BALANCE_ERROR",
///   "message": "Journal is unbalanced: debit ₹500.00, credit ₹300.00 (difference ₹200.00)"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
///
/// ## Usage in Frontend
/// ```typescript
/// try {
///   await invoke('save_voucher');
/// } catch (e) {
///   switch (e.code) {
///     case 'BALANCE_ERROR':
///       highlightTotalsRow(e.message);
///       break;
///     case 'MISSING_COMPANY':
///       redirectToCompanyPicker();
///       break;
///     default:
///       showError(e.message);
///   }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Input validation failed (400)
    ValidationError,

    /// Database operation failed (500)
    DatabaseError,

    /// Business logic error (422)
    BusinessLogic,

    /// Debit and credit totals differ on a journal voucher
    BalanceError,

    /// No company is bound to the session
    MissingCompany,

    /// Internal server error (500)
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates a missing company error.
    pub fn missing_company() -> Self {
        ApiError::new(
            ErrorCode::MissingCompany,
            "No company is selected for this session",
        )
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            DbError::UniqueViolation { field, value } => ApiError::new(
                ErrorCode::ValidationError,
                format!("{} '{}' already exists", field, value),
            ),
            DbError::ConnectionFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Database query failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::TransactionFailed(e) => {
                tracing::error!("Transaction failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database transaction failed")
            }
            DbError::ForeignKeyViolation { message } => {
                tracing::error!("Foreign key violation: {}", message);
                ApiError::new(ErrorCode::ValidationError, "Invalid reference")
            }
            DbError::CorruptValue { column, value } => {
                tracing::error!("Corrupt {} value in database: {}", column, value);
                ApiError::new(ErrorCode::DatabaseError, "Stored data could not be read")
            }
            DbError::PoolExhausted => {
                ApiError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts domain errors to API errors.
impl From<VoucherError> for ApiError {
    fn from(err: VoucherError) -> Self {
        let code = match &err {
            VoucherError::Unbalanced { .. } => ErrorCode::BalanceError,
            VoucherError::Validation(_)
            | VoucherError::NumberRequired
            | VoucherError::LedgerRequired { .. }
            | VoucherError::DateOutsideFinancialYear { .. } => ErrorCode::ValidationError,
            _ => ErrorCode::BusinessLogic,
        };
        ApiError::new(code, err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use accountech_core::Money;

    #[test]
    fn test_unbalanced_maps_to_balance_error() {
        let err = VoucherError::Unbalanced {
            total_debit: Money::from_rupees(500),
            total_credit: Money::from_rupees(300),
            difference: Money::from_rupees(200),
        };
        let api: ApiError = err.into();
        assert_eq!(api.code, ErrorCode::BalanceError);
        assert!(api.message.contains("₹200.00"));
    }

    #[test]
    fn test_number_required_maps_to_validation() {
        let api: ApiError = VoucherError::NumberRequired.into();
        assert_eq!(api.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_db_not_found_maps_to_not_found() {
        let api: ApiError = DbError::not_found("Ledger", "l9").into();
        assert_eq!(api.code, ErrorCode::NotFound);
        assert_eq!(api.message, "Ledger not found: l9");
    }
}

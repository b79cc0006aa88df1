//! # Company Context
//!
//! The explicit company/financial-year context passed by reference into
//! the voucher engine. There is no ambient singleton; anything that needs
//! company scope takes a `&CompanyContext`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Active company and financial-year scope for an entry session.
///
/// ## Invariants
/// - `fy_start <= fy_end`
/// - Vouchers dated outside `[fy_start, fy_end]` are rejected at
///   finalization.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CompanyContext {
    /// Company identifier (UUID v4); scopes every store query.
    pub id: String,

    /// Display name.
    pub name: String,

    /// State code of the company's principal place of business
    /// (two digits, e.g., "27"). Used as the default place of supply.
    pub state_code: Option<String>,

    /// Whether stock entries carry a godown reference.
    pub multi_godown: bool,

    /// First day of the active financial year.
    #[ts(as = "String")]
    pub fy_start: NaiveDate,

    /// Last day of the active financial year.
    #[ts(as = "String")]
    pub fy_end: NaiveDate,
}

impl CompanyContext {
    /// Checks whether a voucher date falls inside the financial year.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.fy_start && date <= self.fy_end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> CompanyContext {
        CompanyContext {
            id: "co-1".to_string(),
            name: "Acme Traders".to_string(),
            state_code: Some("27".to_string()),
            multi_godown: false,
            fy_start: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
            fy_end: NaiveDate::from_ymd_opt(2026, 3, 31).unwrap(),
        }
    }

    #[test]
    fn test_contains_date() {
        let ctx = ctx();
        assert!(ctx.contains_date(NaiveDate::from_ymd_opt(2025, 4, 1).unwrap()));
        assert!(ctx.contains_date(NaiveDate::from_ymd_opt(2026, 3, 31).unwrap()));
        assert!(!ctx.contains_date(NaiveDate::from_ymd_opt(2026, 4, 1).unwrap()));
        assert!(!ctx.contains_date(NaiveDate::from_ymd_opt(2025, 3, 31).unwrap()));
    }
}

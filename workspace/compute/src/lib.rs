//! Aggregation and reporting engine for the expense tracker.
//!
//! Everything in this crate is invoked once per request with an
//! explicitly resolved user id and reference date; nothing is cached
//! between calls. Amounts accumulate as [`rust_decimal::Decimal`] and
//! are only rounded for display by the presentation layer.

pub mod categories;
pub mod dashboard;
pub mod error;
pub mod report;

use chrono::NaiveDate;

use error::{ComputeError, Result};

/// Returns the last calendar day of the given month.
pub fn last_day_of_month(year: i32, month: u32) -> Result<NaiveDate> {
    let first_of_next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };

    first_of_next
        .and_then(|d| d.pred_opt())
        .ok_or_else(|| ComputeError::Date(format!("invalid month: {}-{}", year, month)))
}

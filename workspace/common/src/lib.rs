//! Plain data types returned by the aggregation engine.
//!
//! The HTTP layer serializes these directly; no store row types leak
//! past the compute crate. Amounts stay as [`Decimal`] all the way to
//! serialization so that accumulation never loses sub-unit precision.
//! Rounding to two places is a display concern.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Aggregate figures shown on the dashboard header cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DashboardStats {
    /// Per-day cost of all recurring obligations (amount/30 for monthly,
    /// amount/365 for yearly).
    #[schema(value_type = String)]
    pub fixed_daily_cost: Decimal,
    /// Sum of one-off expenses dated today.
    #[schema(value_type = String)]
    pub todays_variable: Decimal,
    /// Sum of one-off expenses within the current calendar month.
    #[schema(value_type = String)]
    pub monthly_variable: Decimal,
    /// `todays_variable + fixed_daily_cost`.
    #[schema(value_type = String)]
    pub total_daily_spend: Decimal,
    /// Number of recurring expense definitions.
    pub recurring_count: u64,
}

impl DashboardStats {
    /// The all-zero statistics of a user with no records.
    pub fn empty() -> Self {
        Self {
            fixed_daily_cost: Decimal::ZERO,
            todays_variable: Decimal::ZERO,
            monthly_variable: Decimal::ZERO,
            total_daily_spend: Decimal::ZERO,
            recurring_count: 0,
        }
    }
}

/// One point of the seven-day spending trend.
///
/// Only dates with at least one expense appear; zero days are not
/// synthesized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TrendPoint {
    /// Short weekday label ("Mon", "Tue", ...).
    pub date: String,
    #[schema(value_type = String)]
    pub amount: Decimal,
}

/// One slice of the current-month category breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CategorySlice {
    pub name: String,
    #[schema(value_type = String)]
    pub value: Decimal,
    pub color: Option<String>,
}

/// One slice of the monthly report pie, keyed by consolidated bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PieSlice {
    pub name: String,
    #[schema(value_type = String)]
    pub value: Decimal,
}

/// A month's total spend plus its consolidated per-bucket amounts.
///
/// `pie_data` is sorted by value descending; ties keep the order in
/// which the buckets were first seen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MonthlyReport {
    #[schema(value_type = String)]
    pub total_spend: Decimal,
    pub pie_data: Vec<PieSlice>,
}

impl MonthlyReport {
    pub fn new(total_spend: Decimal, pie_data: Vec<PieSlice>) -> Self {
        Self {
            total_spend,
            pie_data,
        }
    }
}

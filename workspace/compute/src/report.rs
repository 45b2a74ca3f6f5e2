//! Monthly report: total spend and consolidated category buckets.
//!
//! Raw category names map through a fixed table onto coarser reporting
//! buckets; names absent from the table stand for themselves. Recurring
//! expenses contribute their full per-period value once per month they
//! overlap; there is no pro-rating for mid-month starts or ends.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter};
use std::collections::HashMap;
use tracing::{debug, instrument};

use common::{MonthlyReport, PieSlice};
use model::entities::category;
use model::entities::daily_expense;
use model::entities::recurring_expense::{self, RecurrenceFrequency};

use crate::error::{ComputeError, Result};

/// Maps raw category names onto the coarser reporting buckets.
static CATEGORY_BUCKETS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        // Medical
        ("Pharmacy", "Medical"),
        ("Doctor Visits", "Medical"),
        ("Hospital", "Medical"),
        ("Medicines", "Medical"),
        // Food
        ("Dining Out", "Food"),
        ("Travel Food", "Food"),
        ("Snacks & Beverages", "Food"),
        ("Snacks", "Food"),
        ("Beverages", "Food"),
        ("Food Delivery", "Food"),
        // Transport
        ("Fuel", "Transport"),
        ("Cab / Ride-hailing", "Transport"),
        ("Cab", "Transport"),
        ("Public Transport", "Transport"),
        ("Parking & Tolls", "Transport"),
        ("Parking", "Transport"),
        ("Tolls", "Transport"),
        ("Vehicle Maintenance", "Transport"),
        // Essentials
        ("Rent", "Housing"),
        ("EMI / Loans", "Loans"),
        ("Electricity", "Utilities"),
        ("Water", "Utilities"),
        ("Gas", "Utilities"),
        ("Internet", "Utilities"),
        ("Mobile", "Utilities"),
    ])
});

/// Resolves the reporting bucket for a raw category name.
///
/// Names without a mapping stand for themselves.
pub fn consolidated_bucket(name: &str) -> &str {
    CATEGORY_BUCKETS.get(name).copied().unwrap_or(name)
}

/// Accumulates bucketed amounts while remembering first-seen order so
/// that the final descending sort is stable on ties.
#[derive(Default)]
struct BucketTotals {
    order: Vec<String>,
    totals: HashMap<String, Decimal>,
}

impl BucketTotals {
    fn add(&mut self, raw_category: &str, amount: Decimal) {
        let bucket = consolidated_bucket(raw_category);
        if !self.totals.contains_key(bucket) {
            self.order.push(bucket.to_string());
        }
        *self
            .totals
            .entry(bucket.to_string())
            .or_insert(Decimal::ZERO) += amount;
    }

    fn into_sorted_slices(self) -> Vec<PieSlice> {
        let mut slices: Vec<PieSlice> = self
            .order
            .into_iter()
            .map(|name| {
                let value = self.totals.get(&name).copied().unwrap_or(Decimal::ZERO);
                PieSlice { name, value }
            })
            .collect();

        slices.sort_by(|a, b| b.value.cmp(&a.value));
        slices
    }
}

/// The monthly contribution of one recurring expense.
fn monthly_contribution(expense: &recurring_expense::Model) -> Decimal {
    match expense.frequency {
        RecurrenceFrequency::Monthly => expense.amount,
        RecurrenceFrequency::Yearly => expense.amount / Decimal::from(12),
    }
}

/// Builds the report for one calendar month.
///
/// One-off expenses dated within the month contribute their amount;
/// recurring expenses whose active interval overlaps the month
/// contribute their per-month value.
#[instrument(skip(db))]
pub async fn monthly_report(
    db: &DatabaseConnection,
    user_id: i32,
    year: i32,
    month: u32,
) -> Result<MonthlyReport> {
    let window_start = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| ComputeError::Date(format!("invalid month: {}-{}", year, month)))?;
    let window_end = crate::last_day_of_month(year, month)?;

    let daily = daily_expense::Entity::find()
        .filter(daily_expense::Column::UserId.eq(user_id))
        .filter(daily_expense::Column::Date.between(window_start, window_end))
        .find_also_related(category::Entity)
        .all(db)
        .await?;

    // Active interval overlaps the window:
    // start_date <= window_end AND (end_date IS NULL OR end_date >= window_start)
    let recurring = recurring_expense::Entity::find()
        .filter(recurring_expense::Column::UserId.eq(user_id))
        .filter(recurring_expense::Column::StartDate.lte(window_end))
        .filter(
            Condition::any()
                .add(recurring_expense::Column::EndDate.is_null())
                .add(recurring_expense::Column::EndDate.gte(window_start)),
        )
        .find_also_related(category::Entity)
        .all(db)
        .await?;

    debug!(
        "Monthly report {}-{} for user {}: {} one-off, {} recurring",
        year,
        month,
        user_id,
        daily.len(),
        recurring.len()
    );

    let mut total_spend = Decimal::ZERO;
    let mut buckets = BucketTotals::default();

    for (expense, resolved) in daily {
        total_spend += expense.amount;
        let raw = resolved
            .map(|c| c.name)
            .unwrap_or_else(|| "Uncategorized".to_string());
        buckets.add(&raw, expense.amount);
    }

    for (expense, resolved) in recurring {
        let contribution = monthly_contribution(&expense);
        total_spend += contribution;
        let raw = resolved
            .map(|c| c.name)
            .unwrap_or_else(|| "Uncategorized".to_string());
        buckets.add(&raw, contribution);
    }

    Ok(MonthlyReport::new(total_spend, buckets.into_sorted_slices()))
}

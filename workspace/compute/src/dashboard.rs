//! Dashboard statistics: amortized fixed costs, daily/monthly variable
//! totals, the seven-day trend and the current-month category breakdown.
//!
//! Recurring amortization intentionally uses flat divisors (30 days per
//! month, 365 per year, 12 months per year); no leap-year or
//! days-in-month correction is applied.

use chrono::{Datelike, Days, NaiveDate};
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, instrument};

use common::{CategorySlice, DashboardStats, TrendPoint};
use model::entities::daily_expense;
use model::entities::recurring_expense::{self, RecurrenceFrequency};
use model::entities::category;

use crate::error::{ComputeError, Result};

/// Days in the trend window, including the reference day itself.
const TREND_WINDOW_DAYS: u64 = 7;

fn month_bounds(day: NaiveDate) -> Result<(NaiveDate, NaiveDate)> {
    let start = day
        .with_day(1)
        .ok_or_else(|| ComputeError::Date(format!("invalid date: {}", day)))?;
    let end = crate::last_day_of_month(day.year(), day.month())?;
    Ok((start, end))
}

/// Sums the user's one-off expense amounts within `[from, to]`.
async fn sum_expenses(
    db: &DatabaseConnection,
    user_id: i32,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Decimal> {
    let amounts: Vec<Decimal> = daily_expense::Entity::find()
        .select_only()
        .column(daily_expense::Column::Amount)
        .filter(daily_expense::Column::UserId.eq(user_id))
        .filter(daily_expense::Column::Date.between(from, to))
        .into_tuple()
        .all(db)
        .await?;

    Ok(amounts.into_iter().sum())
}

/// The daily-equivalent cost of one recurring expense.
fn daily_equivalent(expense: &recurring_expense::Model) -> Decimal {
    match expense.frequency {
        RecurrenceFrequency::Monthly => expense.amount / Decimal::from(30),
        RecurrenceFrequency::Yearly => expense.amount / Decimal::from(365),
    }
}

/// Computes the dashboard header figures for one user.
///
/// A user with no records gets exact zeros, not an error.
#[instrument(skip(db))]
pub async fn dashboard_stats(
    db: &DatabaseConnection,
    user_id: i32,
    today: NaiveDate,
) -> Result<DashboardStats> {
    let recurring = recurring_expense::Entity::find()
        .filter(recurring_expense::Column::UserId.eq(user_id))
        .all(db)
        .await?;

    let fixed_daily_cost: Decimal = recurring.iter().map(daily_equivalent).sum();

    let todays_variable = sum_expenses(db, user_id, today, today).await?;

    let (month_start, month_end) = month_bounds(today)?;
    let monthly_variable = sum_expenses(db, user_id, month_start, month_end).await?;

    debug!(
        "Dashboard stats for user {}: {} recurring, fixed daily cost {}",
        user_id,
        recurring.len(),
        fixed_daily_cost
    );

    Ok(DashboardStats {
        fixed_daily_cost,
        todays_variable,
        monthly_variable,
        total_daily_spend: todays_variable + fixed_daily_cost,
        recurring_count: recurring.len() as u64,
    })
}

/// Computes the seven-day spending trend ending at `today`.
///
/// Expenses are grouped by calendar day and summed; the output is
/// ascending by date and labeled with the short weekday name. Days
/// without expenses are omitted, not zero-filled.
#[instrument(skip(db))]
pub async fn spending_trend(
    db: &DatabaseConnection,
    user_id: i32,
    today: NaiveDate,
) -> Result<Vec<TrendPoint>> {
    let window_start = today
        .checked_sub_days(Days::new(TREND_WINDOW_DAYS - 1))
        .ok_or_else(|| ComputeError::Date(format!("invalid date: {}", today)))?;

    let expenses = daily_expense::Entity::find()
        .filter(daily_expense::Column::UserId.eq(user_id))
        .filter(daily_expense::Column::Date.between(window_start, today))
        .order_by_asc(daily_expense::Column::Date)
        .all(db)
        .await?;

    let mut by_date: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for expense in expenses {
        *by_date.entry(expense.date).or_insert(Decimal::ZERO) += expense.amount;
    }

    Ok(by_date
        .into_iter()
        .map(|(date, amount)| TrendPoint {
            date: date.format("%a").to_string(),
            amount,
        })
        .collect())
}

/// Computes the current-month spend per category.
///
/// Only category ids that actually appear in the month's expenses are
/// resolved to names and colors. Slices are sorted by value descending;
/// ties keep first-appearance order.
#[instrument(skip(db))]
pub async fn category_breakdown(
    db: &DatabaseConnection,
    user_id: i32,
    today: NaiveDate,
) -> Result<Vec<CategorySlice>> {
    let (month_start, month_end) = month_bounds(today)?;

    let expenses = daily_expense::Entity::find()
        .filter(daily_expense::Column::UserId.eq(user_id))
        .filter(daily_expense::Column::Date.between(month_start, month_end))
        .all(db)
        .await?;

    let mut order: Vec<i32> = Vec::new();
    let mut totals: HashMap<i32, Decimal> = HashMap::new();
    for expense in expenses {
        if !totals.contains_key(&expense.category_id) {
            order.push(expense.category_id);
        }
        *totals.entry(expense.category_id).or_insert(Decimal::ZERO) += expense.amount;
    }

    if order.is_empty() {
        return Ok(Vec::new());
    }

    let categories = category::Entity::find()
        .filter(category::Column::UserId.eq(user_id))
        .filter(category::Column::Id.is_in(order.clone()))
        .all(db)
        .await?;
    let by_id: HashMap<i32, &category::Model> =
        categories.iter().map(|c| (c.id, c)).collect();

    let mut slices: Vec<CategorySlice> = order
        .into_iter()
        .map(|category_id| {
            let resolved = by_id.get(&category_id);
            CategorySlice {
                name: resolved
                    .map(|c| c.name.clone())
                    .unwrap_or_else(|| "Unknown".to_string()),
                value: totals.get(&category_id).copied().unwrap_or(Decimal::ZERO),
                color: resolved.and_then(|c| c.color.clone()),
            }
        })
        .collect();

    // Vec::sort_by is stable, so equal values keep first-appearance order.
    slices.sort_by(|a, b| b.value.cmp(&a.value));

    Ok(slices)
}

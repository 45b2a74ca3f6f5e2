use axum::{extract::State, http::StatusCode, response::Json};
use chrono::Utc;
use tracing::{error, instrument};

use common::{CategorySlice, DashboardStats, TrendPoint};

use crate::auth::CurrentUser;
use crate::schemas::{ApiResponse, AppState, ErrorResponse};

fn aggregation_failed(operation: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: format!("Failed to compute {}", operation),
            code: "ERROR".to_string(),
            success: false,
        }),
    )
}

/// Get the dashboard header statistics for the current user
///
/// Recomputed on every request; nothing is cached.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/stats",
    tag = "dashboard",
    responses(
        (status = 200, description = "Dashboard statistics retrieved successfully", body = ApiResponse<DashboardStats>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_dashboard_stats(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<ApiResponse<DashboardStats>>, (StatusCode, Json<ErrorResponse>)> {
    let today = Utc::now().date_naive();

    match compute::dashboard::dashboard_stats(&state.db, user.id, today).await {
        Ok(stats) => Ok(Json(ApiResponse {
            data: stats,
            message: "Dashboard statistics retrieved successfully".to_string(),
            success: true,
        })),
        Err(e) => {
            error!("Failed to compute dashboard stats for user {}: {}", user.id, e);
            Err(aggregation_failed("dashboard statistics"))
        }
    }
}

/// Get the seven-day spending trend for the current user
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/trend",
    tag = "dashboard",
    responses(
        (status = 200, description = "Spending trend retrieved successfully", body = ApiResponse<Vec<TrendPoint>>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_spending_trend(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<ApiResponse<Vec<TrendPoint>>>, (StatusCode, Json<ErrorResponse>)> {
    let today = Utc::now().date_naive();

    match compute::dashboard::spending_trend(&state.db, user.id, today).await {
        Ok(trend) => Ok(Json(ApiResponse {
            data: trend,
            message: "Spending trend retrieved successfully".to_string(),
            success: true,
        })),
        Err(e) => {
            error!("Failed to compute spending trend for user {}: {}", user.id, e);
            Err(aggregation_failed("spending trend"))
        }
    }
}

/// Get the current-month category breakdown for the current user
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/breakdown",
    tag = "dashboard",
    responses(
        (status = 200, description = "Category breakdown retrieved successfully", body = ApiResponse<Vec<CategorySlice>>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_category_breakdown(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<ApiResponse<Vec<CategorySlice>>>, (StatusCode, Json<ErrorResponse>)> {
    let today = Utc::now().date_naive();

    match compute::dashboard::category_breakdown(&state.db, user.id, today).await {
        Ok(breakdown) => Ok(Json(ApiResponse {
            data: breakdown,
            message: "Category breakdown retrieved successfully".to_string(),
            success: true,
        })),
        Err(e) => {
            error!(
                "Failed to compute category breakdown for user {}: {}",
                user.id, e
            );
            Err(aggregation_failed("category breakdown"))
        }
    }
}

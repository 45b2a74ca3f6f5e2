use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use tracing::{error, instrument, warn};
use utoipa::IntoParams;

use common::MonthlyReport;

use crate::auth::CurrentUser;
use crate::schemas::{ApiResponse, AppState, ErrorResponse};

/// Query parameters for the monthly report endpoint
#[derive(Debug, Deserialize, IntoParams)]
pub struct MonthlyReportQuery {
    /// Year of the report (e.g. 2025)
    pub year: i32,
    /// Month of the report (1-12)
    pub month: u32,
}

/// Get the monthly report for the current user
///
/// Consolidates raw categories into coarser buckets and folds recurring
/// expenses in at their per-month value.
#[utoipa::path(
    get,
    path = "/api/v1/reports/monthly",
    tag = "reports",
    params(MonthlyReportQuery),
    responses(
        (status = 200, description = "Monthly report retrieved successfully", body = ApiResponse<MonthlyReport>),
        (status = 400, description = "Invalid year or month", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_monthly_report(
    Query(query): Query<MonthlyReportQuery>,
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<ApiResponse<MonthlyReport>>, (StatusCode, Json<ErrorResponse>)> {
    if !(1..=12).contains(&query.month) {
        warn!("Rejecting monthly report request with month {}", query.month);
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Month must be between 1 and 12".to_string(),
                code: "INVALID_MONTH".to_string(),
                success: false,
            }),
        ));
    }

    match compute::report::monthly_report(&state.db, user.id, query.year, query.month).await {
        Ok(report) => Ok(Json(ApiResponse {
            data: report,
            message: "Monthly report retrieved successfully".to_string(),
            success: true,
        })),
        Err(e) => {
            error!(
                "Failed to compute monthly report {}-{} for user {}: {}",
                query.year, query.month, user.id, e
            );
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to compute monthly report".to_string(),
                    code: "ERROR".to_string(),
                    success: false,
                }),
            ))
        }
    }
}

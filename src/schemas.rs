use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

use common::{CategorySlice, DashboardStats, MonthlyReport, PieSlice, TrendPoint};

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection
    pub db: DatabaseConnection,
}

/// API response wrapper
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success status
    pub success: bool,
}

/// Error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::users::create_user,
        crate::handlers::users::get_users,
        crate::handlers::users::get_user,
        crate::handlers::users::delete_user,
        crate::handlers::categories::seed_default_categories,
        crate::handlers::categories::get_categories,
        crate::handlers::categories::create_category,
        crate::handlers::expenses::create_expense,
        crate::handlers::expenses::get_expenses,
        crate::handlers::expenses::delete_expense,
        crate::handlers::recurring::create_recurring_expense,
        crate::handlers::recurring::get_recurring_expenses,
        crate::handlers::recurring::delete_recurring_expense,
        crate::handlers::dashboard::get_dashboard_stats,
        crate::handlers::dashboard::get_spending_trend,
        crate::handlers::dashboard::get_category_breakdown,
        crate::handlers::reports::get_monthly_report,
    ),
    components(
        schemas(
            ErrorResponse,
            HealthResponse,
            crate::handlers::users::CreateUserRequest,
            crate::handlers::users::UserResponse,
            crate::handlers::categories::CreateCategoryRequest,
            crate::handlers::categories::CategoryResponse,
            crate::handlers::categories::SeedDefaultsResponse,
            crate::handlers::expenses::CreateExpenseRequest,
            crate::handlers::expenses::ExpenseResponse,
            crate::handlers::recurring::CreateRecurringExpenseRequest,
            crate::handlers::recurring::RecurringExpenseResponse,
            DashboardStats,
            TrendPoint,
            CategorySlice,
            MonthlyReport,
            PieSlice,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "users", description = "User management endpoints"),
        (name = "categories", description = "Spending category endpoints"),
        (name = "expenses", description = "One-off expense endpoints"),
        (name = "recurring", description = "Recurring expense endpoints"),
        (name = "dashboard", description = "Dashboard aggregation endpoints"),
        (name = "reports", description = "Monthly report endpoints"),
    ),
    info(
        title = "Kharcha API",
        description = "Personal expense tracker API - daily and recurring expenses with aggregated dashboards and monthly reports",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
